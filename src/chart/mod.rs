// src/chart/mod.rs — Score visualization

pub mod fonts;
pub mod radar;

use std::path::PathBuf;

pub use fonts::{ensure_font, register_font_file};
pub use radar::RadarChart;

/// Where a rendered chart should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    /// Write a PNG to this path.
    File(PathBuf),
    /// Keep the PNG in memory and return it base64-encoded.
    Base64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedChart {
    Saved(PathBuf),
    Encoded(String),
}

impl RenderedChart {
    pub fn into_base64(self) -> Option<String> {
        match self {
            RenderedChart::Encoded(data) => Some(data),
            RenderedChart::Saved(_) => None,
        }
    }
}
