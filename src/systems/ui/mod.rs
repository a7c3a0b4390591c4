use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::config::*;
use crate::systems::assembly::RegenerateEvent;

// slider values, only applied when Generate is pressed
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct PanelInputs {
    pub height: f32,
    pub cell_size: f32,
}

impl Default for PanelInputs {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl PanelInputs {
    /// Request built from the current inputs and a fresh seed
    pub fn request(&self, seed: f64) -> RegenerateEvent {
        RegenerateEvent {
            seed,
            height: self.height,
            cell_size: self.cell_size,
        }
    }
}

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .insert_resource(PanelInputs::default())
            .add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    mut inputs: ResMut<PanelInputs>,
    mut regen_events: EventWriter<RegenerateEvent>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(200.0)
            .min_width(250.0)
            .max_width(400.0)
            .resizable(true)
            .show(ctx, |ui| {
                // camera
                ui.label("Camera: ");
                ui.label("WASD - Move");
                ui.label("Scroll - Zoom");
                ui.label("MMB - Rotate");

                ui.separator();

                ui.label("Assembly Parameters:");
                ui.add(egui::Slider::new(&mut inputs.height, HEIGHT_MIN..=HEIGHT_MAX)
                    .step_by(PARAM_STEP)
                    .text("Height (m)"));
                ui.add(egui::Slider::new(&mut inputs.cell_size, CELL_SIZE_MIN..=CELL_SIZE_MAX)
                    .step_by(PARAM_STEP)
                    .text("Cell Size (m)"));

                ui.separator();

                if ui.button("Generate")
                    .on_hover_text("Build a new assembly with a fresh seed")
                    .clicked() {
                    regen_events.write(inputs.request(rand::random()));
                }

                ui.separator();
                ui.label("ESC - Exit");
            });
    }
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(egui::RichText::new(format!("{:.0}", fps))
                                .size(26.0)
                                .color(egui::Color32::WHITE));
                        }
                    }
                });
            });
    }
}
