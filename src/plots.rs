use std::path::{Path, PathBuf};

use ndarray::Array;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::dataset::Sample;
use crate::error::{RegressionError, Result};
use crate::model::Coefficients;
use crate::normalization::{find_max_min, MinMax};

const LINE_POINTS: usize = 100;

fn padded(MinMax { min, max }: MinMax<f64>) -> std::ops::Range<f64> {
    let pad = ((max - min) * 0.05).max(1.);

    (min - pad)..(max + pad)
}

/// Scatter of `samples` with the fitted line drawn over their mileage span.
pub fn plot_fit<DB>(
    samples: &[Sample],
    coefficients: Coefficients,
    caption: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let x_span = find_max_min(samples.iter().map(|s| s.mileage)).ok_or("nothing to plot")?;

    let x = Array::linspace(x_span.min, x_span.max, LINE_POINTS);
    let y: Array<_, _> = x.iter().map(|&x| coefficients.apply(x)).collect();

    let y_span = find_max_min(samples.iter().map(|s| s.price).chain(y.iter().copied()))
        .ok_or("nothing to plot")?;

    drawing_area.fill(&WHITE)?;

    let mut chart_builder = ChartBuilder::on(drawing_area);

    let mut chart_context = chart_builder
        .caption(caption, ("Arial", 20))
        .set_all_label_area_size(70)
        .margin(30)
        .build_cartesian_2d(padded(x_span), padded(y_span))?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Mileage (km)")
        .y_labels(10)
        .y_desc("Price")
        .draw()?;

    chart_context
        .draw_series(
            samples
                .iter()
                .map(|s| Circle::new((s.mileage, s.price), 3, BLUE.filled())),
        )?
        .label("samples")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));

    let line_series = LineSeries::new(x.iter().cloned().zip(y), RED.stroke_width(2));

    chart_context
        .draw_series(line_series)?
        .label(format!(
            "price = {:.2} + {:.5} * mileage",
            coefficients.theta0, coefficients.theta1
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart_context
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE)
        .draw()?;

    Ok(())
}

pub fn fit_plot_path(plot_dir: &Path, iterations: usize) -> PathBuf {
    plot_dir.join(format!("price_vs_mileage_{iterations}.svg"))
}

/// Renders [`plot_fit`] into an SVG file, creating its directory when needed.
pub fn render_fit_svg(path: &Path, samples: &[Sample], coefficients: Coefficients) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let drawing_area = SVGBackend::new(path, (1000, 625)).into_drawing_area();

    plot_fit(samples, coefficients, "Car Price vs Mileage", &drawing_area)
        .map_err(|e| RegressionError::Plot(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| RegressionError::Plot(e.to_string()))?;

    Ok(())
}
