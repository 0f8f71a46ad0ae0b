//! Temperature chart assembly
//!
//! `temperature_plot` turns validated hourly samples into a `TemperatureChart`:
//! the layers to draw in z-order, the axis limits and the color scale. Nothing
//! is drawn here; see `render` for the plotters backends.

use std::path::PathBuf;

use super::error::Result;
use super::palettes::{finite_range, Colormap};
use super::series::{HourlySeries, TemperatureSeries};
use super::units::{secondary_limits, TemperatureUnit};
use crate::config::ChartConfig;

/// Fraction of the data span added above and below the left-axis range
const Y_MARGIN: f64 = 0.05;

const BLACK: [u8; 3] = [0, 0, 0];
const RED: [u8; 3] = [255, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const GREEN: [u8; 3] = [0, 128, 0];

/// What a line layer represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Measured,
    ReferenceMax,
    ReferenceMin,
    Reference,
    StdevUpper,
    StdevLower,
}

/// Line appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: [u8; 3],
    pub opacity: f64,
    pub width: u32,
    pub dashed: bool,
}

impl LineStyle {
    const fn solid(color: [u8; 3], opacity: f64) -> Self {
        Self {
            color,
            opacity,
            width: 1,
            dashed: false,
        }
    }

    const fn dashed(color: [u8; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            width: 1,
            dashed: true,
        }
    }
}

/// One polyline of the chart; NaN y values break the line
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    pub kind: LayerKind,
    /// None keeps the layer out of the legend
    pub label: Option<String>,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

impl LineLayer {
    /// Runs of consecutive finite points
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// A scatter marker; `color` is None when the count is missing
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub hour: f64,
    pub value: f64,
    pub count: f64,
    pub color: Option<[u8; 3]>,
}

/// Density-colored markers drawn on top of every line
#[derive(Debug, Clone, PartialEq)]
pub struct DensityScatter {
    pub label: String,
    /// Marker radius in pixels
    pub radius: f64,
    pub points: Vec<ScatterPoint>,
}

/// Legend swatch
#[derive(Debug, Clone, PartialEq)]
pub enum LegendMarker {
    Line(LineStyle),
    Marker([u8; 3]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub marker: LegendMarker,
}

/// The rendered-chart handle returned by `temperature_plot`
#[derive(Debug, Clone)]
pub struct TemperatureChart {
    /// Densified input the layers were built from
    pub series: HourlySeries,
    /// Line layers, back to front
    pub lines: Vec<LineLayer>,
    pub scatter: DensityScatter,
    pub colormap: Colormap,
    /// Colorbar title
    pub colorbar_label: String,
    pub x_limits: (f64, f64),
    pub left_limits: (f64, f64),
    /// Always `secondary_limits(left_limits, left_unit)`
    pub right_limits: (f64, f64),
    pub left_unit: TemperatureUnit,
    pub x_label: String,
    pub y_label_left: String,
    pub y_label_right: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub font_path: Option<PathBuf>,
}

impl TemperatureChart {
    pub fn layer(&self, kind: LayerKind) -> Option<&LineLayer> {
        self.lines.iter().find(|l| l.kind == kind)
    }

    pub fn has_layer(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some()
    }

    pub fn right_unit(&self) -> TemperatureUnit {
        self.left_unit.complement()
    }

    /// Legend entries in drawing order, unlabeled layers skipped
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let mut entries: Vec<LegendEntry> = self
            .lines
            .iter()
            .filter_map(|layer| {
                layer.label.as_ref().map(|label| LegendEntry {
                    label: label.clone(),
                    marker: LegendMarker::Line(layer.style),
                })
            })
            .collect();

        entries.push(LegendEntry {
            label: self.scatter.label.clone(),
            marker: LegendMarker::Marker(self.colormap.color_at(0.5)),
        });
        entries
    }
}

/// Build the composite hourly temperature chart
///
/// Fails without producing a chart when an array-like parameter has the wrong
/// type; optional layers whose inputs are absent are simply left out.
pub fn temperature_plot(
    input: &TemperatureSeries,
    config: &ChartConfig,
) -> Result<TemperatureChart> {
    let normalized = input.normalize()?;
    let series = normalized.hourly;
    let labels = &config.labels;

    let mut lines = vec![LineLayer {
        kind: LayerKind::Measured,
        label: Some(labels.plot.clone()),
        style: LineStyle::solid(BLACK, 1.0),
        points: zip_hours(&series.hours, &series.values),
    }];

    if let Some((max, min)) = normalized.reference_bounds {
        lines.push(LineLayer {
            kind: LayerKind::ReferenceMax,
            label: Some(labels.max.clone()),
            style: LineStyle::solid(RED, 0.5),
            points: constant_line(&series.hours, max),
        });
        lines.push(LineLayer {
            kind: LayerKind::ReferenceMin,
            label: Some(labels.min.clone()),
            style: LineStyle::solid(BLUE, 0.5),
            points: constant_line(&series.hours, min),
        });
    }

    if let Some(reference) = &normalized.reference {
        lines.push(LineLayer {
            kind: LayerKind::Reference,
            label: Some(labels.compare.clone()),
            style: LineStyle::dashed(BLACK),
            points: zip_hours(&series.hours, reference),
        });
    }

    if let Some(stdev) = &series.stdev {
        let upper: Vec<f64> = series.values.iter().zip(stdev).map(|(v, s)| v + s).collect();
        let lower: Vec<f64> = series.values.iter().zip(stdev).map(|(v, s)| v - s).collect();
        lines.push(LineLayer {
            kind: LayerKind::StdevUpper,
            label: Some(labels.stdev.clone()),
            style: LineStyle::dashed(GREEN),
            points: zip_hours(&series.hours, &upper),
        });
        lines.push(LineLayer {
            kind: LayerKind::StdevLower,
            label: None,
            style: LineStyle::dashed(GREEN),
            points: zip_hours(&series.hours, &lower),
        });
    }

    let colormap = Colormap::for_values(&config.palette, &series.counts);
    let points = series
        .hours
        .iter()
        .zip(&series.values)
        .zip(&series.counts)
        .filter(|((_, value), _)| value.is_finite())
        .map(|((&hour, &value), &count)| ScatterPoint {
            hour,
            value,
            count,
            color: colormap.color(count),
        })
        .collect();
    let scatter = DensityScatter {
        label: labels.colormap.clone(),
        radius: config.point_size,
        points,
    };

    let left_unit = config.left_unit();
    let left_limits = auto_limits(&lines, &scatter);
    let right_limits = secondary_limits(left_limits, left_unit);
    let (y_label_left, y_label_right) = config.y_axis_titles();

    log::debug!(
        "Built chart with {} line layers, {} markers, left {:?} {:?}, right {:?}",
        lines.len(),
        scatter.points.len(),
        left_unit,
        left_limits,
        right_limits
    );

    Ok(TemperatureChart {
        series,
        lines,
        scatter,
        colormap,
        colorbar_label: labels.colormap.clone(),
        x_limits: config.x_limits,
        left_limits,
        right_limits,
        left_unit,
        x_label: labels.x_axis.clone(),
        y_label_left: y_label_left.to_string(),
        y_label_right: y_label_right.to_string(),
        title: labels.title.clone(),
        width: config.width,
        height: config.height,
        font_path: config.font_path.clone(),
    })
}

/// Pair each hour with a value; extra values beyond 24 hours are dropped and
/// missing ones become NaN
fn zip_hours(hours: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    hours
        .iter()
        .enumerate()
        .map(|(i, &h)| (h, values.get(i).copied().unwrap_or(f64::NAN)))
        .collect()
}

fn constant_line(hours: &[f64], value: f64) -> Vec<(f64, f64)> {
    hours.iter().map(|&h| (h, value)).collect()
}

/// Left-axis range over every drawn y value, padded by `Y_MARGIN`
pub fn auto_limits(lines: &[LineLayer], scatter: &DensityScatter) -> (f64, f64) {
    let ys: Vec<f64> = lines
        .iter()
        .flat_map(|l| l.points.iter().map(|&(_, y)| y))
        .chain(scatter.points.iter().map(|p| p.value))
        .collect();

    match finite_range(&ys) {
        None => (0.0, 1.0),
        Some((lo, hi)) if hi - lo == 0.0 => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * Y_MARGIN;
            (lo - pad, hi + pad)
        }
    }
}
