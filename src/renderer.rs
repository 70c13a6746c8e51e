/*
 * Renderer Module
 *
 * This module handles the rendering of the demo scene. World positions are
 * projected through the orbit camera and drawn back-to-front as depth-scaled
 * sprites, tinted by the surveyor's current light intensity.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;
use crate::BOID_SIZE;

const PLANET_SIZE: f32 = 0.9;
const SURVEYOR_SIZE: f32 = 0.45;

// A projected sprite awaiting its draw call.
struct DrawItem {
    screen: Vec2,
    radius: f32,
    depth: f32,
    color: Rgb,
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(BLACK);

    // Get the window rectangle
    let window_rect = app.window_rect();

    let light = model.surveyor.light_intensity();
    let mut items: Vec<DrawItem> = Vec::new();
    let mut visible_boids = 0;

    // Boids
    for boid in model.flock.boids() {
        if let Some((screen, scale)) = model.camera.project(boid.position(), window_rect) {
            items.push(DrawItem {
                screen,
                radius: BOID_SIZE * scale,
                depth: model.camera.view_transform(boid.position()).z,
                color: tint(boid.color(), light),
            });
            visible_boids += 1;
        }
    }

    // Planets, sized by their sampled scale
    for planet in &model.planets {
        if let Some((screen, scale)) = model.camera.project(planet.position(), window_rect) {
            items.push(DrawItem {
                screen,
                radius: PLANET_SIZE * planet.scale() * scale,
                depth: model.camera.view_transform(planet.position()).z,
                color: tint(planet.kind().base_color(), light),
            });
        }
    }

    // The surveyor
    if let Some((screen, scale)) = model.camera.project(model.surveyor.position(), window_rect) {
        items.push(DrawItem {
            screen,
            radius: SURVEYOR_SIZE * scale,
            depth: model.camera.view_transform(model.surveyor.position()).z,
            color: tint(model.surveyor.body_color(), light),
        });
    }

    // Track visible boid count for the debug overlay
    if model.params.show_debug {
        let mut count = model.debug_info.visible_boids.lock().unwrap();
        *count = visible_boids;
    }

    // Painter's order: far sprites first so near ones overdraw them.
    items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let resolution = if model.params.low_poly { 6.0 } else { 32.0 };
    for item in &items {
        draw.ellipse()
            .xy(pt2(item.screen.x, item.screen.y))
            .radius(item.radius)
            .resolution(resolution)
            .color(item.color);
    }

    // Draw debug visualization if enabled
    if model.params.show_debug {
        draw_domain_wireframe(&draw, model, window_rect);
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.flock.len());
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

// Component-wise light tint, clamped back into gamut.
fn tint(color: Rgb, light: Vec3) -> Rgb {
    rgb(
        (color.red * light.x).min(1.0),
        (color.green * light.y).min(1.0),
        (color.blue * light.z).min(1.0),
    )
}

// Outline the simulation cube so the wraparound boundary is visible.
fn draw_domain_wireframe(draw: &Draw, model: &Model, window_rect: Rect) {
    let edge = model.params.domain_half_extent;
    let corners: Vec<Vec3> = (0..8)
        .map(|i| {
            vec3(
                if i & 1 == 0 { -edge } else { edge },
                if i & 2 == 0 { -edge } else { edge },
                if i & 4 == 0 { -edge } else { edge },
            )
        })
        .collect();

    // Each pair of corners differing in exactly one bit shares an edge.
    for a in 0..8usize {
        for b in (a + 1)..8usize {
            if (a ^ b).count_ones() != 1 {
                continue;
            }
            if let (Some((start, _)), Some((end, _))) = (
                model.camera.project(corners[a], window_rect),
                model.camera.project(corners[b], window_rect),
            ) {
                draw.line()
                    .start(pt2(start.x, start.y))
                    .end(pt2(end.x, end.y))
                    .weight(1.0)
                    .color(rgba(0.3, 0.3, 0.3, 1.0));
            }
        }
    }
}
