// ui.rs - egui front end for the simulation controller

use std::time::Instant;

use conway::{LatestFrame, PATTERNS, Rgb, SimulationController, Viewport};
use eframe::egui;
use egui::{Color32, Rect, Vec2};

/// Height reserved above the drawing surface for the control bar.
pub const CONTROLS_HEIGHT: f32 = 40.0;

pub struct GameOfLifeApp {
    controller: SimulationController<LatestFrame>,
    selected_pattern: usize,
}

impl GameOfLifeApp {
    pub fn new(controller: SimulationController<LatestFrame>) -> Self {
        Self { controller, selected_pattern: 0 }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.controller.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.controller.toggle();
            }

            if ui.button("⏹ Stop").clicked() {
                self.controller.stop();
            }

            if ui.button("⏭ Step").clicked() {
                self.controller.step_once();
            }

            if ui.button("🎲 Reset").clicked() {
                self.controller.reset();
            }

            if ui.button("Clear").clicked() {
                self.controller.clear();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.controller.apply_pattern(&PATTERNS[self.selected_pattern]);
            }

            ui.separator();

            let frame = self.controller.renderer().frame();
            ui.label(format!("Generation: {}", frame.generation));
            ui.label(format!("Live cells: {}", frame.population()));
            if self.controller.cycle_detected() {
                ui.label("↻ cycle");
            }
        });
    }

    fn surface(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let current = self.controller.viewport();
        let resized = (available.x - current.width).abs() >= 1.0
            || (available.y - current.height).abs() >= 1.0;
        if resized {
            self.controller.resize(Viewport::new(available.x, available.y));
        }

        let (response, painter) = ui.allocate_painter(available, egui::Sense::click());
        let origin = response.rect.min;
        let config = self.controller.config();

        painter.rect_filled(response.rect, 0.0, color(config.background));

        let frame = self.controller.renderer().frame();
        for sprite in &frame.sprites {
            let min = origin + Vec2::new(sprite.x, sprite.y);
            let rect = Rect::from_min_size(min, Vec2::splat(sprite.size));
            let rounding = sprite.size * 0.25;
            painter.rect_filled(rect, rounding, color(config.palette.color(sprite.bucket)));
        }

        // Toggle cells by clicking while stopped.
        if !self.controller.is_running() && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let cell_size = config.cell_size;
                let offset = pos - origin;
                let row = (offset.y / cell_size).floor() as isize;
                let col = (offset.x / cell_size).floor() as isize;
                let (rows, cols) = self.controller.dimensions();
                if row < rows as isize && col < cols as isize {
                    self.controller.toggle_cell(row, col);
                }
            }
        }
    }
}

impl eframe::App for GameOfLifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let space = ctx.input(|i| i.key_pressed(egui::Key::Space));
        if space_toggles(space, ctx.memory(|m| m.focus())) {
            self.controller.toggle();
        }

        let now = Instant::now();
        self.controller.poll(now);

        egui::TopBottomPanel::top("controls")
            .exact_height(CONTROLS_HEIGHT)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.surface(ui));

        // Wake up again when the next tick is due.
        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Space toggles the run state unless a widget has keyboard focus; a focused
/// button already treats Space as a click.
fn space_toggles(pressed: bool, focused: Option<egui::Id>) -> bool {
    pressed && focused.is_none()
}
