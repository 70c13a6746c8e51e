/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the FlockParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::FlockParams;

// Update the UI. Returns whether boids should be reset, whether the boid
// count changed, and whether any parameter changed at all.
pub fn update_ui(
    egui: &mut Egui,
    params: &mut FlockParams,
    debug_info: &DebugInfo,
) -> (bool, bool, bool) {
    let mut should_reset_boids = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_boids, FlockParams::get_num_boids_range())
                        .text("Number of Boids"),
                );

                if ui.button("Reset Boids").clicked() {
                    should_reset_boids = true;
                }

                ui.add(
                    egui::Slider::new(&mut params.max_speed, FlockParams::get_max_speed_range())
                        .text("Max Speed"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.domain_half_extent,
                        FlockParams::get_extent_range(),
                    )
                    .text("Cube Half Extent"),
                );
            });

            ui.collapsing("Rules", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.weight_alignment, FlockParams::get_weight_range())
                        .text("Align"),
                );
                ui.add(
                    egui::Slider::new(&mut params.weight_cohesion, FlockParams::get_weight_range())
                        .text("Cohesion"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.weight_separation,
                        FlockParams::get_weight_range(),
                    )
                    .text("Separate"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.radius_awareness,
                        FlockParams::get_radius_range(),
                    )
                    .text("Radius of Awareness"),
                );
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Orbit: click and drag");
                ui.label("Dolly: mouse wheel or trackpad pinch");
                ui.label("Surveyor: WASD + arrow up/down");
            });

            ui.checkbox(&mut params.low_poly, "Low Poly");
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!(
                "Frame time: {:.2} ms",
                debug_info.frame_time.as_secs_f64() * 1000.0
            ));
        });

    // Detect parameter changes
    let (num_boids_changed, ui_changed) = params.detect_changes();

    (should_reset_boids, num_boids_changed, ui_changed)
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
) {
    // Create a background panel in the top-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Draw the background panel
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    // Draw each line of text
    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!(
            "Frame time: {:.2} ms",
            debug_info.frame_time.as_secs_f64() * 1000.0
        ),
        format!("Ticks: {}", debug_info.tick_count),
        format!(
            "Boids: {} ({} visible)",
            boids_len,
            *debug_info.visible_boids.lock().unwrap()
        ),
        format!("Planets: {}", debug_info.planet_count),
        format!("Mood: {}", debug_info.mood_label),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
