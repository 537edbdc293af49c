/*!
 * Desktop dashboard for regionviz
 *
 * Shows the filter button row and the bar-and-area chart:
 * - click a region button (or a bar) to highlight that region
 * - hover a bar for its tooltip
 * - load another dataset file from the path field
 */

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Vec2};
use regionviz::tooltip::TooltipLines;
use regionviz::viz::{AxisOrient, Rgb8, Scene};
use regionviz::{ButtonAction, ChartConfig, Dashboard, PointerInput, UiEvent, storage};
use std::path::PathBuf;

const SAMPLE: &str = include_str!("../../data/sample.json");
const TICK_SIZE: f32 = 6.0;

#[derive(Parser, Debug)]
#[command(name = "regionviz-gui", version, about = "Interactive region chart dashboard")]
struct Args {
    /// Dataset JSON; the bundled sample is shown when omitted.
    data: Option<PathBuf>,
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use the 1800px-wide canvas.
    #[arg(long, default_value_t = false)]
    wide: bool,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Region chart - regionviz"),
        ..Default::default()
    };

    eframe::run_native(
        "regionviz",
        options,
        Box::new(move |_cc| Ok(Box::new(RegionApp::new(args)))),
    )
}

struct RegionApp {
    dashboard: Option<Dashboard>,
    config: ChartConfig,
    data_path: String,
    status_message: String,
    error_message: String,
}

impl RegionApp {
    fn new(args: Args) -> Self {
        let mut error_message = String::new();
        let mut config = match &args.config {
            Some(path) => ChartConfig::load(path).unwrap_or_else(|err| {
                error_message = format!("Config error: {}", err);
                ChartConfig::default()
            }),
            None => ChartConfig::default(),
        };
        if args.wide {
            config.width = regionviz::config::WIDE_WIDTH;
        }

        let mut app = Self {
            dashboard: None,
            config,
            data_path: args
                .data
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            status_message: String::new(),
            error_message,
        };
        match args.data {
            Some(_) => app.load_from_path(),
            None => app.load_sample(),
        }
        app
    }

    fn load_sample(&mut self) {
        let result = storage::parse_dataset(SAMPLE)
            .and_then(|dataset| Dashboard::new(dataset, self.config.clone()));
        self.finish_load(result, "bundled sample".to_string());
    }

    fn load_from_path(&mut self) {
        let path = self.data_path.trim().to_string();
        if path.is_empty() {
            self.error_message = "Please enter a dataset path".to_string();
            return;
        }
        let result = storage::load_dataset(&path)
            .and_then(|dataset| Dashboard::new(dataset, self.config.clone()));
        self.finish_load(result, path);
    }

    fn finish_load(&mut self, result: regionviz::Result<Dashboard>, source: String) {
        match result {
            Ok(dashboard) => {
                self.status_message = format!(
                    "Loaded {} entries, {} regions from {}",
                    dashboard.dataset().len(),
                    dashboard.regions().len(),
                    source
                );
                self.error_message.clear();
                self.dashboard = Some(dashboard);
            }
            Err(err) => {
                self.error_message = format!("Load error: {}", err);
                self.status_message.clear();
            }
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        if let Some(dashboard) = self.dashboard.as_mut()
            && let Err(err) = dashboard.handle(event)
        {
            self.error_message = err.to_string();
        }
    }
}

impl eframe::App for RegionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Dataset:");
                ui.text_edit_singleline(&mut self.data_path)
                    .on_hover_text("Path to a JSON file of label -> {id, value_bar, value_area}");
                if ui.button("Load").clicked() {
                    self.load_from_path();
                }
                if ui.button("Sample").clicked() {
                    self.load_sample();
                }
            });
            ui.add_space(4.0);

            let buttons = self
                .dashboard
                .as_ref()
                .map(|d| d.buttons())
                .unwrap_or_default();
            let mut clicked = None;
            ui.horizontal_wrapped(|ui| {
                for button in buttons {
                    let is_reset = button.action == ButtonAction::Reset;
                    let response = ui.selectable_label(button.primary, &button.label);
                    let response = if is_reset {
                        response.on_hover_text("Clear the highlighted region")
                    } else {
                        response
                    };
                    if response.clicked() {
                        clicked = Some(button.action);
                    }
                }
            });
            if let Some(action) = clicked {
                self.dispatch(UiEvent::Button(action));
            }

            if !self.error_message.is_empty() {
                ui.colored_label(Color32::RED, &self.error_message);
            } else if !self.status_message.is_empty() {
                ui.label(&self.status_message);
            }
            ui.add_space(4.0);
        });

        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(scene) = self.dashboard.as_ref().and_then(|d| d.scene()) else {
                ui.label("No chart loaded.");
                return;
            };
            egui::ScrollArea::both().show(ui, |ui| {
                let size = Vec2::new(scene.width as f32, scene.height as f32);
                let (response, painter) = ui.allocate_painter(size, Sense::click());
                let top_left = response.rect.min;
                paint_scene(&painter, top_left, scene);

                let to_canvas = |p: Pos2| ((p.x - top_left.x) as f64, (p.y - top_left.y) as f64);
                match response.hover_pos() {
                    Some(pos) => {
                        let input = PointerInput::new(to_canvas(pos), (pos.x as f64, pos.y as f64));
                        events.push(UiEvent::PointerMove(input));
                        if response.clicked() {
                            events.push(UiEvent::Click(input));
                        }
                    }
                    None => events.push(UiEvent::PointerLeave),
                }
            });
        });

        let before = self.dashboard.as_ref().map(|d| d.draw_count());
        for event in events {
            self.dispatch(event);
        }
        if self.dashboard.as_ref().map(|d| d.draw_count()) != before {
            ctx.request_repaint();
        }

        if let Some(dashboard) = &self.dashboard
            && let Some(tip) = dashboard.tooltip()
            && let Some(pos) = tip.position
        {
            let lines = TooltipLines::for_point(&tip.point, &dashboard.config().locale);
            egui::Area::new(egui::Id::new("bar-tooltip"))
                .order(egui::Order::Tooltip)
                .fixed_pos(Pos2::new(pos.x as f32, pos.y as f32))
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.strong(lines.title);
                        ui.label(lines.bar);
                        ui.label(lines.area);
                    });
                });
        }
    }
}

fn color(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Paint the scene with the egui painter, `top_left` being the canvas origin.
fn paint_scene(painter: &egui::Painter, top_left: Pos2, scene: &Scene) {
    painter.rect_filled(
        egui::Rect::from_min_size(
            top_left,
            Vec2::new(scene.width as f32, scene.height as f32),
        ),
        0.0,
        Color32::WHITE,
    );

    let (ox, oy) = scene.origin;
    let at = |x: f64, y: f64| Pos2::new(top_left.x + (ox + x) as f32, top_left.y + (oy + y) as f32);

    for bar in &scene.bars {
        let r = bar.rect;
        painter.rect_filled(
            egui::Rect::from_min_max(at(r.x, r.y), at(r.x + r.width, r.y + r.height)),
            0.0,
            color(bar.fill),
        );
    }

    // The area outline may be concave, so it goes in as a strip of triangles.
    let area = &scene.area;
    if area.top.len() >= 2 {
        let alpha = (area.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        let fill = Color32::from_rgba_unmultiplied(area.fill.r, area.fill.g, area.fill.b, alpha);
        let mut mesh = egui::Mesh::default();
        for &(x, y) in &area.top {
            mesh.colored_vertex(at(x, y), fill);
            mesh.colored_vertex(at(x, area.baseline), fill);
        }
        for i in 0..(area.top.len() as u32 - 1) {
            let (a, b, c, d) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(b, d, c);
        }
        painter.add(egui::Shape::mesh(mesh));
        let line: Vec<Pos2> = area.top.iter().map(|&(x, y)| at(x, y)).collect();
        painter.add(egui::Shape::line(line, Stroke::new(1.0, fill)));
    }

    let stroke = Stroke::new(1.0, Color32::BLACK);
    let tick_font = FontId::proportional(scene.tick_font_px as f32);
    for axis in &scene.axes {
        let (tx, ty) = axis.translate;
        let along = |offset: f64| match axis.orient {
            AxisOrient::Bottom => at(tx + offset, ty),
            AxisOrient::Left | AxisOrient::Right => at(tx, ty + offset),
        };
        painter.line_segment([along(0.0), along(axis.length)], stroke);

        for tick in &axis.ticks {
            let p = along(tick.offset);
            let (end, label_at, anchor) = match axis.orient {
                AxisOrient::Bottom => (
                    p + Vec2::new(0.0, TICK_SIZE),
                    p + Vec2::new(0.0, TICK_SIZE + 3.0),
                    Align2::CENTER_TOP,
                ),
                AxisOrient::Left => (
                    p - Vec2::new(TICK_SIZE, 0.0),
                    p - Vec2::new(TICK_SIZE + 3.0, 0.0),
                    Align2::RIGHT_CENTER,
                ),
                AxisOrient::Right => (
                    p + Vec2::new(TICK_SIZE, 0.0),
                    p + Vec2::new(TICK_SIZE + 3.0, 0.0),
                    Align2::LEFT_CENTER,
                ),
            };
            painter.line_segment([p, end], stroke);
            painter.text(label_at, anchor, &tick.text, tick_font.clone(), Color32::BLACK);
        }

        if let Some(title) = &axis.title {
            let dx = if axis.orient == AxisOrient::Right { 70.0 } else { -40.0 };
            let galley = painter.layout_no_wrap(
                title.text.clone(),
                FontId::proportional(scene.axis_title_font_px as f32),
                color(title.color),
            );
            let pos = along(0.0) + Vec2::new(dx, galley.size().x);
            let shape = egui::epaint::TextShape::new(pos, galley, color(title.color))
                .with_angle(-std::f32::consts::FRAC_PI_2);
            painter.add(shape);
        }
    }
}
