/*
 * Debug Information Module
 *
 * Performance metrics and simulation state shown in the UI overlay.
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

// Debug information to display. The visible-boid count is written from the
// render pass, which only sees a shared model reference.
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick_count: u64,
    pub visible_boids: Arc<Mutex<usize>>,
    pub planet_count: usize,
    pub mood_label: &'static str,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            tick_count: 0,
            visible_boids: Arc::new(Mutex::new(0)),
            planet_count: 0,
            mood_label: "relaxed",
        }
    }
}
