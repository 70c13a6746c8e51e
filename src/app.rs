/*
 * Application Module
 *
 * This module defines the main application model and logic for the demo.
 * It wires the simulation core, scene population, camera and UI into the
 * nannou frame loop: one simulation tick per displayed frame.
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use nannou_egui::Egui;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::FlockParams;
use crate::random::RandomSource;
use crate::renderer;
use crate::scene::{Planet, Surveyor};
use crate::ui;

// Seconds between observable mood transitions.
const MOOD_PERIOD: f32 = 2.0;

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: FlockParams,
    pub planets: Vec<Planet>,
    pub surveyor: Surveyor,
    pub camera: Camera,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub rng: RandomSource,
    pub mouse_position: Vec2,
    pub mood_timer: f32,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    // Create the main window with dynamic size
    let window_id = app
        .new_window()
        .title("Boids boids boids!")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    // Get the window
    let window = app.window(window_id).unwrap();

    // Create the UI
    let egui = Egui::from_window(&window);

    // Reject invalid configuration before the first frame renders.
    let params = FlockParams::default();
    params
        .validate()
        .unwrap_or_else(|e| panic!("invalid flock parameters: {}", e));

    let mut rng = RandomSource::from_entropy();

    let flock = Flock::spawn(params.num_boids, &mut rng)
        .unwrap_or_else(|e| panic!("failed to spawn flock: {}", e));
    let planets = Planet::create_planets(&mut rng)
        .unwrap_or_else(|e| panic!("failed to populate planets: {}", e));
    let surveyor =
        Surveyor::new().unwrap_or_else(|e| panic!("invalid mood chain: {}", e));

    let mut debug_info = DebugInfo::default();
    debug_info.planet_count = planets.len();

    Model {
        flock,
        params,
        planets,
        surveyor,
        camera: Camera::new(),
        egui,
        debug_info,
        rng,
        mouse_position: Vec2::ZERO,
        mood_timer: 0.0,
    }
}

// Update the model once per frame
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Update UI and check if boids need to be reset
    let (should_reset_boids, num_boids_changed, _ui_changed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if should_reset_boids || num_boids_changed {
        if let Err(e) = model.flock.reset(model.params.num_boids, &mut model.rng) {
            log::warn!("flock reset failed: {}", e);
        }
    }

    // Player movement and hover wiggle
    let time = app.time;
    model.surveyor.steer(movement_direction(app));
    model.surveyor.apply_wiggle(time);

    // Mood transitions on a fixed cadence; lighting blends every frame.
    model.mood_timer += update.since_last.as_secs_f32();
    if model.mood_timer >= MOOD_PERIOD {
        model.mood_timer -= MOOD_PERIOD;
        let mood = model.surveyor.next_feeling(&mut model.rng);
        log::debug!("surveyor mood is now {}", mood.label());
    }
    model.surveyor.adapt_feeling();
    model.debug_info.mood_label = model.surveyor.mood().label();

    // Planets spin regardless of the simulation pause state
    for planet in &mut model.planets {
        planet.orbit(time);
    }

    // Only tick the flock if the simulation is not paused
    if !model.params.pause_simulation {
        model.flock.tick(&model.params);
        model.debug_info.tick_count += 1;
    }
}

// Assemble a movement direction from the currently pressed keys.
fn movement_direction(app: &App) -> Vec3 {
    let keys = &app.keys.down;
    let mut direction = Vec3::ZERO;

    if keys.contains(&Key::S) {
        direction.z += 1.0;
    }
    if keys.contains(&Key::W) {
        direction.z -= 1.0;
    }
    if keys.contains(&Key::D) {
        direction.x += 1.0;
    }
    if keys.contains(&Key::A) {
        direction.x -= 1.0;
    }
    if keys.contains(&Key::Up) {
        direction.y += 1.0;
    }
    if keys.contains(&Key::Down) {
        direction.y -= 1.0;
    }

    direction
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let new_pos = Vec2::new(pos.x, pos.y);

    if model.camera.is_dragging {
        model.camera.drag(new_pos);
    }

    model.mouse_position = new_pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        // Check if the click is on the UI before starting camera drag
        if !model.egui.ctx().is_pointer_over_area() {
            model.camera.start_drag(model.mouse_position);
        }
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for dollying
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            model.camera.zoom(vec2(x, y));
        }
        MouseScrollDelta::PixelDelta(pos) => {
            model.camera.zoom(vec2(pos.x as f32, pos.y as f32) * 0.01);
        }
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
