//! Annotated SVG and static HTML output.
//!
//! Unlike the plotters export, this writer keeps one element per mark with its
//! accessibility role (`bar`, `area`, `x-axis`, `y-axis-bar`, `y-axis-area`,
//! `tooltip`), so the output can be queried the way a DOM would be.

use std::fmt::Write;

use crate::dashboard::Dashboard;
use crate::tooltip::TooltipLines;

use super::scene::{AxisMark, AxisOrient, Scene, fmt_px};

const TICK_SIZE: f64 = 6.0;

/// Escape text for element content and double-quoted attributes.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the scene as a standalone SVG document.
pub fn render_svg(scene: &Scene) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write_svg(&mut s, scene);
    s
}

fn write_svg(s: &mut String, scene: &Scene) -> std::fmt::Result {
    writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        scene.width, scene.height, scene.width, scene.height
    )?;
    writeln!(
        s,
        r#"<g width="{}" height="{}" transform="translate({}, {})">"#,
        fmt_px(scene.chart_width),
        fmt_px(scene.chart_height),
        fmt_px(scene.origin.0),
        fmt_px(scene.origin.1)
    )?;

    for axis in &scene.axes {
        write_axis(s, axis, scene)?;
    }

    for bar in &scene.bars {
        writeln!(
            s,
            r#"<rect role="bar" data-index="{}" data-label="{}" data-id="{}" x="{}" y="{}" width="{}" height="{}" fill="{}" style="cursor: pointer"><title>{}</title></rect>"#,
            bar.index,
            escape(&bar.label),
            escape(&bar.point.id),
            fmt_px(bar.rect.x),
            fmt_px(bar.rect.y),
            fmt_px(bar.rect.width),
            fmt_px(bar.rect.height),
            bar.fill.to_hex(),
            escape(&bar.point.id),
        )?;
    }

    let fill = scene.area.fill.to_hex();
    writeln!(
        s,
        r#"<path role="area" fill="{}" stroke="{}" opacity="{}" d="{}"/>"#,
        fill,
        fill,
        scene.area.opacity,
        scene.area.path_data()
    )?;

    writeln!(s, "</g>")?;
    writeln!(s, "</svg>")
}

fn write_axis(s: &mut String, axis: &AxisMark, scene: &Scene) -> std::fmt::Result {
    let len = fmt_px(axis.length);
    let (anchor, domain) = match axis.orient {
        AxisOrient::Bottom => ("middle", format!("M0,{TICK_SIZE}V0H{len}V{TICK_SIZE}")),
        AxisOrient::Left => ("end", format!("M-{TICK_SIZE},{len}H0V0H-{TICK_SIZE}")),
        AxisOrient::Right => ("start", format!("M{TICK_SIZE},{len}H0V0H{TICK_SIZE}")),
    };
    let weight = if axis.orient == AxisOrient::Bottom {
        r#" font-weight="bold""#
    } else {
        ""
    };
    writeln!(
        s,
        r#"<g role="{}" transform="translate({}, {})" fill="none" font-size="{}" font-family="sans-serif" text-anchor="{}"{}>"#,
        axis.role.as_str(),
        fmt_px(axis.translate.0),
        fmt_px(axis.translate.1),
        scene.tick_font_px,
        anchor,
        weight
    )?;
    writeln!(
        s,
        r#"<path class="domain" stroke="currentColor" d="{domain}"/>"#
    )?;

    for tick in &axis.ticks {
        let offset = fmt_px(tick.offset);
        let text = escape(&tick.text);
        match axis.orient {
            AxisOrient::Bottom => writeln!(
                s,
                r#"<g class="tick" transform="translate({offset},0)"><line stroke="currentColor" y2="{TICK_SIZE}"/><text fill="currentColor" y="9" dy="0.71em">{text}</text></g>"#
            )?,
            AxisOrient::Left => writeln!(
                s,
                r#"<g class="tick" transform="translate(0,{offset})"><line stroke="currentColor" x2="-{TICK_SIZE}"/><text fill="currentColor" x="-9" dy="0.32em">{text}</text></g>"#
            )?,
            AxisOrient::Right => writeln!(
                s,
                r#"<g class="tick" transform="translate(0,{offset})"><line stroke="currentColor" x2="{TICK_SIZE}"/><text fill="currentColor" x="9" dy="0.32em">{text}</text></g>"#
            )?,
        }
    }

    if let Some(title) = &axis.title {
        let y = if axis.orient == AxisOrient::Right { 70 } else { -40 };
        writeln!(
            s,
            r#"<text transform="rotate(-90)" y="{}" text-anchor="end" fill="{}" font-size="{}">{}</text>"#,
            y,
            title.color.to_hex(),
            scene.axis_title_font_px,
            escape(&title.text)
        )?;
    }
    writeln!(s, "</g>")
}

const PAGE_STYLE: &str = r#"
main.home { width: fit-content; margin: 0 auto; font-family: sans-serif; }
.btn-wrapper { margin: 20px; display: flex; align-items: center; gap: 10px; }
button { font-weight: 700; border: 0; border-radius: 3em; cursor: pointer; display: inline-block; line-height: 1; }
button.color-primary { color: #FFFFFF; background-color: #4472C4; }
button.color-secondary { color: #000000; background-color: transparent; box-shadow: rgba(0, 0, 0, 0.15) 0 0 0 1px inset; }
button.size-medium { font-size: 14px; padding: 11px 20px; }
.tooltip { padding: 10px; position: absolute; background-color: #FFFFFF; border: 3px solid black; border-radius: 14px; }
.tooltip .content-wrapper { width: 100%; display: flex; flex-direction: column; gap: 10px; }
.tooltip .title { font-weight: bold; }
"#;

/// Render the whole dashboard (filter buttons, chart, tooltip) as a static HTML page.
pub fn render_page(dashboard: &Dashboard) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write_page(&mut s, dashboard);
    s
}

fn write_page(s: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    let config = dashboard.config();
    writeln!(s, "<!DOCTYPE html>")?;
    writeln!(s, r#"<html lang="{}">"#, escape(&config.locale))?;
    writeln!(
        s,
        r#"<head><meta charset="utf-8"><title>regionviz</title><style>{PAGE_STYLE}</style></head>"#
    )?;
    writeln!(s, r#"<body><main class="home">"#)?;

    writeln!(s, r#"<div class="btn-wrapper">"#)?;
    for button in dashboard.buttons() {
        writeln!(
            s,
            r#"<button type="button" class="{}" data-region="{}">{}</button>"#,
            button.class_name(),
            escape(button.region().unwrap_or("")),
            escape(&button.label)
        )?;
    }
    writeln!(s, "</div>")?;

    writeln!(s, r#"<section class="chart"><div class="canvas">"#)?;
    if let Some(scene) = dashboard.scene() {
        s.push_str(&render_svg(scene));
    }
    writeln!(s, "</div>")?;

    if let Some(state) = dashboard.tooltip() {
        let lines = TooltipLines::for_point(&state.point, &config.locale);
        let style = match state.position {
            Some(pos) => format!(
                "display: block; left: {}px; top: {}px;",
                fmt_px(pos.x),
                fmt_px(pos.y)
            ),
            None => "display: none;".to_string(),
        };
        writeln!(
            s,
            r#"<div class="tooltip" role="tooltip" style="{style}"><div class="content-wrapper">"#
        )?;
        writeln!(s, r#"<div class="title">{}</div>"#, escape(&lines.title))?;
        writeln!(
            s,
            r#"<div class="bar-data" style="color: {}">{}</div>"#,
            escape(&config.bar_color),
            escape(&lines.bar)
        )?;
        writeln!(
            s,
            r#"<div class="area-data" style="color: {}">{}</div>"#,
            escape(&config.area_color),
            escape(&lines.area)
        )?;
        writeln!(s, "</div></div>")?;
    }
    writeln!(s, "</section>")?;
    writeln!(s, "</main></body>")?;
    writeln!(s, "</html>")
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
