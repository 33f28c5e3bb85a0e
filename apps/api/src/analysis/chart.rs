//! Summary chart rendering.
//!
//! `AppState` holds an `Arc<dyn ChartRenderer>`; the default `PieChartRenderer`
//! draws the ranked shares as an SVG pie with `plotters` and hands it back
//! base64-encoded so it can be embedded as a data URI.

use base64::{engine::general_purpose::STANDARD, Engine};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::summary::SubjectShare;

const SVG_MIME: &str = "image/svg+xml";

/// Slice colours, cycled when there are more subjects than entries.
const SLICE_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no slices to draw")]
    Empty,

    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Encoded chart image, opaque to callers.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub mime: &'static str,
    pub base64: String,
}

impl Chart {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Turns ranked shares into an image. Implementations must be pure: same input, same bytes.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, shares: &[SubjectShare]) -> Result<Chart, ChartError>;
}

pub struct PieChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl ChartRenderer for PieChartRenderer {
    fn render(&self, shares: &[SubjectShare]) -> Result<Chart, ChartError> {
        if shares.is_empty() {
            return Err(ChartError::Empty);
        }
        let svg = self.draw_svg(shares)?;
        Ok(Chart {
            mime: SVG_MIME,
            base64: STANDARD.encode(svg.as_bytes()),
        })
    }
}

impl PieChartRenderer {
    fn draw_svg(&self, shares: &[SubjectShare]) -> Result<String, ChartError> {
        let draw_err = |e: DrawingAreaErrorKind<std::io::Error>| ChartError::Draw(e.to_string());

        let sizes: Vec<f64> = shares.iter().map(|s| s.share).collect();
        let labels: Vec<&str> = shares.iter().map(|s| s.subject.as_str()).collect();
        let colors: Vec<RGBColor> = (0..shares.len())
            .map(|i| SLICE_COLORS[i % SLICE_COLORS.len()])
            .collect();

        let half = |px: u32| {
            i32::try_from(px)
                .map(|px| px / 2)
                .map_err(|_| ChartError::Draw(format!("chart size {px} too large")))
        };
        let center = (half(self.width)?, half(self.height)?);
        let radius = f64::from(self.width.min(self.height)) * 0.35;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(90.0);
            pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 12).into_font().color(&BLACK));
            root.draw(&pie).map_err(draw_err)?;
            root.present().map_err(draw_err)?;
        }
        Ok(svg)
    }
}
