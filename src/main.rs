/*
 * 3D Boid Flocking Demo
 *
 * Boids drift inside a cube following three local rules (separation,
 * alignment, cohesion) while planets orbit around them and a player-driven
 * surveyor colors the lighting according to its current mood.
 *
 * Interactive sliders adjust the flocking parameters in real time.
 */

use boids3d::app;

fn main() {
    env_logger::init();

    nannou::app(app::model)
        .update(app::update)
        .run();
}
