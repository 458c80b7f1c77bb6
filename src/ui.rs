/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for every simulation parameter and
 * the creature style, and reports what the app has to act on. Parameter
 * change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};
use crate::species::Species;
use crate::spine::ContourMode;
use crate::style::Style;

/// Everything the user asked for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub changes: ParamChanges,
    pub respawn: bool,
    pub restyle: bool,
    pub reset_camera: bool,
    pub save_config: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    style: &mut Style,
    debug_info: &DebugInfo,
    camera: &Camera,
) -> UiActions {
    let mut actions = UiActions::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Creatures", |ui| {
                egui::ComboBox::from_label("Species")
                    .selected_text(params.species.label())
                    .show_ui(ui, |ui| {
                        for species in Species::ALL {
                            ui.selectable_value(&mut params.species, species, species.label());
                        }
                    });
                ui.add(
                    egui::Slider::new(&mut params.num_creatures, SimulationParams::get_num_creatures_range())
                        .text("Population"),
                );
                egui::ComboBox::from_label("Body contour")
                    .selected_text(params.contour_mode.label())
                    .show_ui(ui, |ui| {
                        for mode in ContourMode::ALL {
                            ui.selectable_value(&mut params.contour_mode, mode, mode.label());
                        }
                    });
                if ui.button("Respawn").clicked() {
                    actions.respawn = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.perception_radius, SimulationParams::get_perception_range())
                        .text("Perception Radius"),
                );
                ui.add(egui::Slider::new(&mut params.align_impact, SimulationParams::get_impact_range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut params.cohesion_impact, SimulationParams::get_impact_range()).text("Cohesion"));
                ui.add(
                    egui::Slider::new(&mut params.separation_impact, SimulationParams::get_impact_range())
                        .text("Separation"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_velocity, SimulationParams::get_max_velocity_range())
                        .text("Max Velocity"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_acceleration, SimulationParams::get_max_acceleration_range())
                        .text("Max Acceleration"),
                );
            });

            ui.collapsing("Ripples & Pointer", |ui| {
                ui.add(egui::Slider::new(&mut params.ripple_force, SimulationParams::get_force_range()).text("Ripple Force"));
                ui.add(
                    egui::Slider::new(&mut params.ripple_radius, SimulationParams::get_force_radius_range())
                        .text("Ripple Radius (0 = unlimited)"),
                );
                ui.checkbox(&mut params.pointer_attraction, "Pointer Attraction");
                ui.add(egui::Slider::new(&mut params.pointer_force, SimulationParams::get_force_range()).text("Pointer Force"));
                ui.add(
                    egui::Slider::new(&mut params.pointer_radius, SimulationParams::get_force_radius_range())
                        .text("Pointer Radius (0 = unlimited)"),
                );
            });

            ui.collapsing("Style", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Fill");
                    ui.text_edit_singleline(&mut style.fill);
                });
                ui.horizontal(|ui| {
                    ui.label("Outline");
                    ui.text_edit_singleline(&mut style.outline);
                });
                ui.add(egui::Slider::new(&mut style.outline_width, 0.0..=10.0).text("Outline Width"));
                ui.horizontal(|ui| {
                    ui.label("Eyes");
                    ui.text_edit_singleline(&mut style.eyes_color);
                });

                let mut custom_fins = style.fin_fill.is_some();
                if ui.checkbox(&mut custom_fins, "Custom fin colour").changed() {
                    style.fin_fill = custom_fins.then(|| style.fill.clone());
                }
                if let Some(fin) = &mut style.fin_fill {
                    ui.text_edit_singleline(fin);
                }

                if ui.button("Apply Style").clicked() {
                    actions.restyle = true;
                }
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Zoom: mouse wheel");
                ui.label("Pan: right click and drag");
                ui.label("Ripple: left click");
                ui.label(format!("Zoom Level: {:.2}x", camera.zoom));
                ui.label(format!(
                    "Camera Position: ({:.0}, {:.0})",
                    camera.position.x, camera.position.y
                ));
                if ui.button("Reset Camera").clicked() {
                    actions.reset_camera = true;
                }
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");
                ui.add(
                    egui::Slider::new(&mut params.physics_fps, SimulationParams::get_physics_fps_range())
                        .text("Physics FPS"),
                );

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Physics steps/frame: {}", debug_info.physics_updates_per_frame));
                ui.label(format!("Creatures: {}", debug_info.creatures));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
            if ui.button("Save Config").clicked() {
                actions.save_config = true;
            }
        });

    actions.changes = params.detect_changes();
    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    camera_zoom: f32,
) {
    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Creatures: {}", debug_info.creatures),
        format!("Ripples: {}", debug_info.ripples),
        format!("Avg speed: {:.2}", debug_info.average_speed),
        format!("Avg curvature: {:.2}", debug_info.average_curvature),
        format!("Planted feet: {}/{}", debug_info.planted_feet, debug_info.total_feet),
        format!("Sim time: {:.1} s", debug_info.sim_time),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    // Background panel in the top-right corner, clear of the controls window
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_left = window_rect.right() - panel_width;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_left + panel_width / 2.0, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = panel_left + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
