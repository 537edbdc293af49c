//! Image export: draw a [`Scene`] through plotters to **SVG** or **PNG**.
//!
//! The backend is picked from the file extension, as in `plot_chart`-style
//! helpers: `.svg` uses `SVGBackend`, `.png`/`.bmp`/`.jpg` use `BitMapBackend`.
//! Bitmap text needs a font registered with [`register_font_file`] (the
//! `ab_glyph` text path does not discover system fonts). The caller says
//! whether one is available; without it, bitmap exports draw every mark
//! except text.

use anyhow::{Context, Result, anyhow, bail};
use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle, FontTransform};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

use super::color::Rgb8;
use super::scene::{AxisOrient, Scene};

const TICK_SIZE: i32 = 6;

/// Register a TTF/OTF file as the "sans-serif" family for exports.
///
/// Once this succeeds, pass `bitmap_text = true` to [`export_image`].
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    // Plotters keeps registered fonts for the life of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font {}", path.display()))?;
    Ok(())
}

fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Write the scene to `out_path` as an image.
///
/// `bitmap_text` turns on labels for bitmap formats and should only be set
/// after [`register_font_file`] succeeded. SVG output always carries text.
pub fn export_image<P: AsRef<Path>>(scene: &Scene, out_path: P, bitmap_text: bool) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let ext = out_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    let size = (scene.width, scene.height);

    match ext.as_str() {
        "svg" => {
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_scene(root, scene, true)?;
        }
        "png" | "bmp" | "jpg" | "jpeg" => {
            if !bitmap_text {
                warn!("no font registered; {} is exported without text", out_path.display());
            }
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_scene(root, scene, bitmap_text)?;
        }
        other => bail!("unsupported image format: {:?}", other),
    }
    info!("wrote {}", out_path.display());
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_scene<DB>(root: DrawingArea<DB, Shift>, scene: &Scene, mut with_text: bool) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (ox, oy) = scene.origin;
    let px = |x: f64, y: f64| ((ox + x).round() as i32, (oy + y).round() as i32);

    for bar in &scene.bars {
        let r = bar.rect;
        root.draw(&Rectangle::new(
            [px(r.x, r.y), px(r.x + r.width, r.y + r.height)],
            rgb(bar.fill).filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    let area = &scene.area;
    if !area.top.is_empty() {
        let poly: Vec<(i32, i32)> = area.polygon().into_iter().map(|(x, y)| px(x, y)).collect();
        let color = rgb(area.fill);
        root.draw(&Polygon::new(poly.clone(), color.mix(area.opacity).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
        let mut outline = poly;
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        root.draw(&PathElement::new(outline, color.mix(area.opacity).stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let tick_font = (FontFamily::SansSerif, scene.tick_font_px as f64).into_font();
    for axis in &scene.axes {
        let (tx, ty) = axis.translate;
        let at = |dx: i32, dy: i32, along: f64| -> (i32, i32) {
            let (x, y) = match axis.orient {
                AxisOrient::Bottom => px(tx + along, ty),
                AxisOrient::Left | AxisOrient::Right => px(tx, ty + along),
            };
            (x + dx, y + dy)
        };
        let side = match axis.orient {
            AxisOrient::Left => -1,
            _ => 1,
        };

        let domain = vec![at(0, 0, 0.0), at(0, 0, axis.length)];
        root.draw(&PathElement::new(domain, BLACK.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;

        for tick in &axis.ticks {
            let (start, end, anchor, label_at) = match axis.orient {
                AxisOrient::Bottom => (
                    at(0, 0, tick.offset),
                    at(0, TICK_SIZE, tick.offset),
                    Pos::new(HPos::Center, VPos::Top),
                    at(0, TICK_SIZE + 3, tick.offset),
                ),
                AxisOrient::Left | AxisOrient::Right => (
                    at(0, 0, tick.offset),
                    at(side * TICK_SIZE, 0, tick.offset),
                    Pos::new(
                        if side < 0 { HPos::Right } else { HPos::Left },
                        VPos::Center,
                    ),
                    at(side * (TICK_SIZE + 3), 0, tick.offset),
                ),
            };
            root.draw(&PathElement::new(vec![start, end], BLACK.stroke_width(1)))
                .map_err(|e| anyhow!("{:?}", e))?;
            if with_text {
                let style = TextStyle::from(tick_font.clone()).pos(anchor);
                with_text = draw_text(&root, Text::new(tick.text.clone(), label_at, style));
            }
        }

        if let (Some(title), true) = (&axis.title, with_text) {
            let dx = if axis.orient == AxisOrient::Right { 70 } else { -40 };
            let font = (FontFamily::SansSerif, scene.axis_title_font_px as f64)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&rgb(title.color));
            let style = font.pos(Pos::new(HPos::Right, VPos::Center));
            with_text = draw_text(&root, Text::new(title.text.clone(), at(dx, 0, 0.0), style));
        }
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Draw one label. A font failure turns text off for the rest of the image
/// instead of failing the export; returns whether text is still enabled.
fn draw_text<DB>(root: &DrawingArea<DB, Shift>, text: Text<'_, (i32, i32), String>) -> bool
where
    DB: DrawingBackend,
{
    match root.draw(&text) {
        Ok(()) => true,
        Err(e) => {
            warn!("text disabled for this export: {:?}", e);
            false
        }
    }
}
