//! Drawing a `TemperatureChart` with plotters
//!
//! Layout, left to right: plot area with both temperature axes, colorbar,
//! legend. The legend lives outside the plot so it never hides data.

use base64::Engine;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, FontTransform};
use std::path::Path;

use super::error::Result;
use super::fonts::{self, FONT_FAMILY};
use super::plot::{LegendMarker, LineStyle, TemperatureChart};

const COLORBAR_PANEL_WIDTH: u32 = 130;
const LEGEND_PANEL_WIDTH: u32 = 280;
const COLORBAR_TICKS: usize = 5;
const LEGEND_ROW_HEIGHT: i32 = 26;

impl TemperatureChart {
    /// Render to PNG bytes
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        fonts::ensure_registered(self.font_path.as_deref())?;

        let (width, height) = (self.width, self.height);
        let mut rgb = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            draw_chart(&root, self)?;
            root.present()?;
        }

        let mut png_bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_bytes, width, height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgb)?;
            writer.finish()?;
        }

        log::debug!("Rendered {}x{} PNG, {} bytes", width, height, png_bytes.len());
        Ok(png_bytes)
    }

    /// Render to a base64-encoded PNG, e.g. for embedding in HTML or JSON
    pub fn to_png_base64(&self) -> Result<String> {
        let png = self.to_png_bytes()?;
        Ok(base64::engine::general_purpose::STANDARD.encode(png))
    }

    /// Render to a PNG file, overwriting it
    pub fn render_png(&self, path: &Path) -> Result<()> {
        let png = self.to_png_bytes()?;
        std::fs::write(path, png)?;
        Ok(())
    }

    /// Render to an SVG document
    pub fn to_svg_string(&self) -> Result<String> {
        fonts::ensure_registered(self.font_path.as_deref())?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            draw_chart(&root, self)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Render to an SVG file, overwriting it
    pub fn render_svg(&self, path: &Path) -> Result<()> {
        let svg = self.to_svg_string()?;
        std::fs::write(path, svg)?;
        Ok(())
    }

    /// Render by file extension: `.svg` writes SVG, anything else PNG
    pub fn save(&self, path: &Path) -> Result<()> {
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            self.render_svg(path)
        } else {
            self.render_png(path)
        }
    }
}

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

fn line_shape(style: &LineStyle) -> ShapeStyle {
    rgb(style.color).mix(style.opacity).stroke_width(style.width)
}

/// Draw every panel of the chart onto `root`
pub fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &TemperatureChart) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let plot_width = width.saturating_sub(COLORBAR_PANEL_WIDTH + LEGEND_PANEL_WIDTH);
    let (plot_area, side) = root.split_horizontally(plot_width);
    let (colorbar_area, legend_area) = side.split_horizontally(COLORBAR_PANEL_WIDTH);

    draw_plot(&plot_area, chart)?;
    draw_colorbar(&colorbar_area, chart)?;
    draw_legend(&legend_area, chart)?;
    Ok(())
}

fn draw_plot<DB>(area: &DrawingArea<DB, Shift>, chart: &TemperatureChart) -> Result<()>
where
    DB: DrawingBackend,
{
    let (x0, x1) = chart.x_limits;
    let (l0, l1) = chart.left_limits;
    let (r0, r1) = chart.right_limits;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .right_y_label_area_size(80);
    if !chart.title.is_empty() {
        builder.caption(
            &chart.title,
            (FONT_FAMILY, 16).into_font().style(FontStyle::Bold),
        );
    }

    let mut ctx = builder
        .build_cartesian_2d(x0..x1, l0..l1)?
        .set_secondary_coord(x0..x1, r0..r1);

    // One tick per hour
    let x_ticks = (x1 - x0).round() as usize + 1;
    ctx.configure_mesh()
        .disable_mesh()
        .x_labels(x_ticks)
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label_left.as_str())
        .axis_desc_style((FONT_FAMILY, 14))
        .draw()?;

    ctx.configure_secondary_axes()
        .y_label_formatter(&|v| format!("{:.1}", v))
        .y_desc(chart.y_label_right.as_str())
        .axis_desc_style((FONT_FAMILY, 14))
        .draw()?;

    for layer in &chart.lines {
        let shape = line_shape(&layer.style);
        for segment in layer.segments() {
            if layer.style.dashed {
                ctx.draw_series(DashedLineSeries::new(segment, 6, 4, shape))?;
            } else {
                ctx.draw_series(LineSeries::new(segment, shape))?;
            }
        }
    }

    let radius = chart.scatter.radius.round() as i32;
    ctx.draw_series(chart.scatter.points.iter().map(|p| match p.color {
        Some(color) => Circle::new((p.hour, p.value), radius, rgb(color).filled()),
        // Missing count: unmapped outline
        None => Circle::new((p.hour, p.value), radius, BLACK.mix(0.6).stroke_width(1)),
    }))?;

    Ok(())
}

fn draw_colorbar<DB>(area: &DrawingArea<DB, Shift>, chart: &TemperatureChart) -> Result<()>
where
    DB: DrawingBackend,
{
    let (_, height) = area.dim_in_pixel();
    let top = 25;
    let bottom = (height as i32 - 65).max(top + 1);
    let left = 10;
    let right = left + 20;
    let span = bottom - top;

    for i in 0..span {
        let t = 1.0 - i as f64 / span as f64;
        area.draw(&Rectangle::new(
            [(left, top + i), (right, top + i + 1)],
            rgb(chart.colormap.color_at(t)).filled(),
        ))?;
    }
    area.draw(&Rectangle::new(
        [(left, top), (right, bottom)],
        BLACK.stroke_width(1),
    ))?;

    let (lo, hi) = chart.colormap.range();
    let label_style = (FONT_FAMILY, 12).into_font().color(&BLACK);
    for k in 0..COLORBAR_TICKS {
        let frac = k as f64 / (COLORBAR_TICKS - 1) as f64;
        let value = lo + frac * (hi - lo);
        let y = bottom - (frac * span as f64).round() as i32;
        area.draw(&PathElement::new(
            vec![(right, y), (right + 4, y)],
            BLACK.stroke_width(1),
        ))?;
        area.draw(&Text::new(
            format_tick(value),
            (right + 7, y - 6),
            label_style.clone(),
        ))?;
    }

    let title_style = (FONT_FAMILY, 13)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK);
    area.draw(&Text::new(
        chart.colorbar_label.clone(),
        (right + 80, top),
        title_style,
    ))?;
    Ok(())
}

fn draw_legend<DB>(area: &DrawingArea<DB, Shift>, chart: &TemperatureChart) -> Result<()>
where
    DB: DrawingBackend,
{
    let text_style = (FONT_FAMILY, 14).into_font().color(&BLACK);
    let x = 10;

    for (i, entry) in chart.legend_entries().into_iter().enumerate() {
        let y = 40 + i as i32 * LEGEND_ROW_HEIGHT;
        match &entry.marker {
            LegendMarker::Line(style) => {
                let shape = line_shape(style).stroke_width(2);
                if style.dashed {
                    area.draw(&PathElement::new(vec![(x, y), (x + 10, y)], shape))?;
                    area.draw(&PathElement::new(vec![(x + 16, y), (x + 26, y)], shape))?;
                } else {
                    area.draw(&PathElement::new(vec![(x, y), (x + 26, y)], shape))?;
                }
            }
            LegendMarker::Marker(color) => {
                area.draw(&Circle::new((x + 13, y), 7, rgb(*color).filled()))?;
            }
        }
        area.draw(&Text::new(entry.label, (x + 36, y - 8), text_style.clone()))?;
    }
    Ok(())
}

/// Compact tick label: integers without decimals
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
