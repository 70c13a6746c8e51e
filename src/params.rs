/*
 * Flock Parameters Module
 *
 * This module defines the FlockParams struct that contains all the
 * adjustable parameters for the simulation. The struct is a plain value
 * object; the UI layer binds to its fields through ui.rs. It also provides
 * parameter change detection so the app can react to slider edits.
 */

use crate::error::ParamsError;
use crate::EDGE_OFFSET;

// Parameters for the simulation that can be adjusted via UI
pub struct FlockParams {
    pub num_boids: usize,
    pub radius_awareness: f32,
    pub weight_cohesion: f32,
    pub weight_alignment: f32,
    pub weight_separation: f32,
    pub domain_half_extent: f32,
    pub max_speed: f32,
    pub low_poly: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    num_boids: usize,
    radius_awareness: f32,
    weight_cohesion: f32,
    weight_alignment: f32,
    weight_separation: f32,
    domain_half_extent: f32,
    max_speed: f32,
    low_poly: bool,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            num_boids: 40,
            radius_awareness: 3.0,
            weight_cohesion: 0.5,
            weight_alignment: 0.5,
            weight_separation: 0.5,
            domain_half_extent: 10.4,
            max_speed: 0.03,
            low_poly: false,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl FlockParams {
    // Reject invalid configuration before the first tick runs. The per-tick
    // code assumes validated inputs and never errors.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.num_boids == 0 {
            return Err(ParamsError::EmptyFlock);
        }
        if self.radius_awareness <= 0.0 {
            return Err(ParamsError::NonPositiveRadius(self.radius_awareness));
        }
        if self.max_speed <= 0.0 {
            return Err(ParamsError::NonPositiveSpeed(self.max_speed));
        }
        for (name, value) in [
            ("cohesion", self.weight_cohesion),
            ("alignment", self.weight_alignment),
            ("separation", self.weight_separation),
        ] {
            if value < 0.0 {
                return Err(ParamsError::NegativeWeight { name, value });
            }
        }
        // The wraparound snaps to extent - EDGE_OFFSET, which must stay
        // inside the domain.
        if self.domain_half_extent <= EDGE_OFFSET {
            return Err(ParamsError::ExtentTooSmall {
                extent: self.domain_half_extent,
                inset: EDGE_OFFSET,
            });
        }
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_boids: self.num_boids,
            radius_awareness: self.radius_awareness,
            weight_cohesion: self.weight_cohesion,
            weight_alignment: self.weight_alignment,
            weight_separation: self.weight_separation,
            domain_half_extent: self.domain_half_extent,
            max_speed: self.max_speed,
            low_poly: self.low_poly,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Check if any parameters have changed since the last snapshot.
    // Returns (num_boids_changed, any_ui_changed).
    pub fn detect_changes(&self) -> (bool, bool) {
        let mut num_boids_changed = false;
        let mut ui_changed = false;

        if let Some(prev) = &self.previous_values {
            if self.num_boids != prev.num_boids {
                num_boids_changed = true;
                ui_changed = true;
            }

            if self.radius_awareness != prev.radius_awareness
                || self.weight_cohesion != prev.weight_cohesion
                || self.weight_alignment != prev.weight_alignment
                || self.weight_separation != prev.weight_separation
                || self.domain_half_extent != prev.domain_half_extent
                || self.max_speed != prev.max_speed
                || self.low_poly != prev.low_poly
                || self.show_debug != prev.show_debug
                || self.pause_simulation != prev.pause_simulation
            {
                ui_changed = true;
            }
        }

        (num_boids_changed, ui_changed)
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=500
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        0.1..=10.0
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.005..=0.2
    }

    pub fn get_extent_range() -> std::ops::RangeInclusive<f32> {
        5.0..=20.0
    }
}
