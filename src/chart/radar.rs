// src/chart/radar.rs — Radar (spider) chart of a ScoreSet

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::io::Cursor;
use std::path::Path;

use super::fonts::{self, FONT_FAMILY};
use super::{ChartOutput, RenderedChart};
use crate::evaluator::scores::ScoreSet;
use crate::infra::config::ChartConfig;
use crate::infra::errors::AppError;

pub const TITLE: &str = "面试评分雷达图";
/// Radial axis upper bound; every dimension is scored out of 20.
pub const AXIS_MAX: u32 = 20;
pub const RINGS: [u32; 4] = [5, 10, 15, 20];

const MIN_SIZE: u32 = 200;
const SERIES: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const GRID: RGBColor = RGBColor(200, 200, 200);
const RING_TEXT: RGBColor = RGBColor(90, 90, 90);

/// Renders score sets into PNG radar charts. Holds only sizing options; every
/// call allocates and drops its own pixel buffer and drawing area.
#[derive(Debug, Clone)]
pub struct RadarChart {
    width: u32,
    height: u32,
    open_after_save: bool,
}

impl RadarChart {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SIZE),
            height: height.max(MIN_SIZE),
            open_after_save: false,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            open_after_save: config.open_after_save,
            ..Self::new(config.width, config.height)
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn render(
        &self,
        scores: &ScoreSet,
        output: &ChartOutput,
    ) -> Result<RenderedChart, AppError> {
        let image = self.rasterize(scores)?;

        match output {
            ChartOutput::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                image.save_with_format(path, ImageFormat::Png)?;
                tracing::info!("Radar chart saved to {}", path.display());

                if self.open_after_save {
                    open_in_viewer(path);
                }
                Ok(RenderedChart::Saved(path.clone()))
            }
            ChartOutput::Base64 => {
                let mut png = Vec::new();
                image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
                tracing::debug!(bytes = png.len(), "Radar chart encoded");
                Ok(RenderedChart::Encoded(general_purpose::STANDARD.encode(&png)))
            }
        }
    }

    fn rasterize(&self, scores: &ScoreSet) -> Result<RgbImage, AppError> {
        fonts::ensure_font();

        let (w, h) = self.size();
        let mut buffer = vec![0u8; w as usize * h as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_radar(&root, scores, w, h)?;
            root.present().map_err(chart_err)?;
        }

        RgbImage::from_raw(w, h, buffer)
            .ok_or_else(|| AppError::Chart("pixel buffer does not match chart size".into()))
    }
}

fn chart_err(e: impl std::fmt::Display) -> AppError {
    AppError::Chart(e.to_string())
}

/// Spoke angle for dimension `i`, counter-clockwise from east.
fn spoke_angle(i: usize) -> f64 {
    2.0 * PI * i as f64 / 5.0
}

fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

fn draw_radar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scores: &ScoreSet,
    w: u32,
    h: u32,
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(chart_err)?;

    let (wf, hf) = (w as f64, h as f64);
    let center = ((wf / 2.0) as i32, (hf * 0.53) as i32);
    let radius = wf.min(hf) * 0.33;
    let unit = radius / AXIS_MAX as f64;

    // Grid rings and spokes
    for ring in RINGS {
        root.draw(&Circle::new(
            center,
            (ring as f64 * unit).round() as i32,
            GRID.stroke_width(1),
        ))
        .map_err(chart_err)?;
    }
    for i in 0..5 {
        let outer = polar(center, radius, spoke_angle(i));
        root.draw(&PathElement::new(vec![center, outer], GRID.stroke_width(1)))
            .map_err(chart_err)?;
    }

    // Data polygon, closed by repeating the first point
    let mut points: Vec<(i32, i32)> = scores
        .dimensions()
        .iter()
        .enumerate()
        .map(|(i, (_, value))| {
            let plotted = (*value).min(AXIS_MAX) as f64;
            polar(center, plotted * unit, spoke_angle(i))
        })
        .collect();
    root.draw(&Polygon::new(points.clone(), SERIES.mix(0.25).filled()))
        .map_err(chart_err)?;
    points.push(points[0]);
    root.draw(&PathElement::new(points.clone(), SERIES.stroke_width(2)))
        .map_err(chart_err)?;
    for p in &points[..5] {
        root.draw(&Circle::new(*p, 5, SERIES.filled()))
            .map_err(chart_err)?;
    }

    // Legend swatch
    let legend_y = (hf * 0.09) as i32;
    let legend_x = (wf * 0.74) as i32;
    let swatch = vec![(legend_x, legend_y), (legend_x + (wf * 0.04) as i32, legend_y)];
    root.draw(&PathElement::new(swatch, SERIES.stroke_width(2)))
        .map_err(chart_err)?;

    // Text is best-effort: without a registered font the shapes still render.
    let centered = Pos::new(HPos::Center, VPos::Center);
    let title_style = TextStyle::from((FONT_FAMILY, hf * 0.032).into_font()).pos(centered);
    let label_style = TextStyle::from((FONT_FAMILY, hf * 0.022).into_font()).pos(centered);
    let ring_style = TextStyle::from((FONT_FAMILY, hf * 0.016).into_font())
        .color(&RING_TEXT)
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    let legend_style = TextStyle::from((FONT_FAMILY, hf * 0.02).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut labels = vec![(
        TITLE.to_string(),
        ((wf / 2.0) as i32, (hf * 0.05) as i32),
        title_style,
    )];
    for (i, (dimension, _)) in scores.dimensions().iter().enumerate() {
        let at = polar(center, radius * 1.15, spoke_angle(i));
        labels.push((dimension.label().to_string(), at, label_style.clone()));
    }
    for ring in RINGS {
        let at = polar(center, ring as f64 * unit, PI / 8.0);
        labels.push((format!("{ring}分"), at, ring_style.clone()));
    }
    labels.push((
        format!("总分: {}分", scores.total),
        (legend_x + (wf * 0.05) as i32, legend_y),
        legend_style,
    ));

    let mut skipped = 0usize;
    for (text, at, style) in labels {
        if root.draw(&Text::new(text, at, style)).is_err() {
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "Chart labels skipped, no usable font registered");
    }

    Ok(())
}

/// Hand the saved chart to the platform viewer without waiting on it.
fn open_in_viewer(path: &Path) {
    #[cfg(target_os = "macos")]
    let mut cmd = std::process::Command::new("open");
    #[cfg(windows)]
    let mut cmd = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(not(any(target_os = "macos", windows)))]
    let mut cmd = std::process::Command::new("xdg-open");

    match cmd.arg(path).spawn() {
        Ok(mut child) => {
            // Reap in the background so the viewer never blocks the caller.
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(e) => tracing::warn!("Could not open chart viewer: {}", e),
    }
}
