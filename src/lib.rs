/*
 * 3D Boid Flocking Demo - Module Definitions
 *
 * This file defines the module structure for the demo application.
 * The simulation core (boid, flock, random, params) is usable headless;
 * the scene, camera, UI and renderer modules feed the nannou frame loop.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use camera::Camera;
pub use debug::DebugInfo;
pub use flock::Flock;
pub use markov::MarkovChain;
pub use params::FlockParams;
pub use random::RandomSource;

// Define modules
pub mod app;
pub mod boid;
pub mod camera;
pub mod color;
pub mod debug;
pub mod error;
pub mod flock;
pub mod markov;
pub mod params;
pub mod random;
pub mod renderer;
pub mod scene;
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 0.2;
pub const EDGE_OFFSET: f32 = 4.0;
