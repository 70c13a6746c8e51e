/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Forces are computed against a frozen pre-tick snapshot of the whole
 * population, so the update order within a tick does not matter.
 */

use nannou::prelude::*;

use crate::color;
use crate::error::DistributionError;
use crate::params::FlockParams;
use crate::random::RandomSource;
use crate::EDGE_OFFSET;

#[derive(Clone)]
pub struct Boid {
    position: Vec3,
    velocity: Vec3,
    color: Rgb,
}

impl Boid {
    pub fn new(rng: &mut RandomSource) -> Result<Self, DistributionError> {
        Ok(Self {
            position: random_vec3(rng, -2.0, 2.0)?,
            velocity: random_vec3(rng, -4.0, 4.0)?,
            color: color::vivid_color(rng)?,
        })
    }

    // Construct a boid with explicit kinematic state.
    pub fn with_state(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            color: rgb(0.86, 0.86, 0.86),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    // Calculate alignment force (average heading of everything within the
    // awareness radius). The boid's own snapshot entry sits at distance zero
    // and is counted too, which damps its pull toward the flock average.
    pub fn alignment(&self, flock: &[Boid], radius_awareness: f32, max_steer: f32) -> Vec3 {
        let mut target = Vec3::ZERO;
        let mut count = 0;

        for other in flock {
            if self.position.distance(other.position) < radius_awareness {
                target += other.velocity;
                count += 1;
            }
        }
        if count > 0 {
            target /= count as f32;
            target = limit(target, max_steer);
        }
        target
    }

    // Calculate cohesion force. The clamped average position is applied
    // directly as an acceleration toward the local centroid; the emergent
    // grouping depends on this exact shape.
    pub fn cohesion(&self, flock: &[Boid], radius_awareness: f32, max_steer: f32) -> Vec3 {
        let mut target = Vec3::ZERO;
        let mut count = 0;

        for other in flock {
            if self.position.distance(other.position) < radius_awareness {
                target += other.position;
                count += 1;
            }
        }
        if count > 0 {
            target /= count as f32;
            target = limit(target, max_steer);
        }
        target
    }

    // Calculate separation force (inverse-square repulsion from every other
    // boid within the awareness radius). Self is excluded by index, not by
    // distance, so coincident neighbors still repel.
    pub fn separation(
        &self,
        flock: &[Boid],
        self_index: usize,
        radius_awareness: f32,
        max_steer: f32,
    ) -> Vec3 {
        let mut target = Vec3::ZERO;
        let mut count = 0;

        for (i, other) in flock.iter().enumerate() {
            if i == self_index {
                continue;
            }
            let distance = self.position.distance(other.position);
            if distance < radius_awareness {
                let distance_squared = distance * distance;
                // Exactly coincident boids have no usable direction.
                if distance_squared > 0.0 {
                    target += (self.position - other.position) / distance_squared;
                    count += 1;
                }
            }
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        target /= count as f32;
        limit(target - self.velocity, max_steer)
    }

    // Advance one tick: combine weighted forces, clamp speed, integrate, and
    // keep the boid inside the cube.
    pub fn update(&mut self, flock: &[Boid], self_index: usize, params: &FlockParams) {
        // The steering clamp shares the speed cap magnitude.
        let max_steer = params.max_speed;
        let radius = params.radius_awareness;

        let mut acceleration = Vec3::ZERO;
        acceleration += self.cohesion(flock, radius, max_steer) * params.weight_cohesion;
        acceleration += self.alignment(flock, radius, max_steer) * params.weight_alignment;
        acceleration +=
            self.separation(flock, self_index, radius, max_steer) * params.weight_separation;

        self.velocity += acceleration;
        self.velocity = limit(self.velocity, params.max_speed);
        self.position += self.velocity;

        let edge = params.domain_half_extent;
        self.position.x = wrap_axis(self.position.x, edge);
        self.position.y = wrap_axis(self.position.y, edge);
        self.position.z = wrap_axis(self.position.z, edge);
    }
}

// Rescale a vector to exactly `max` magnitude when it exceeds the cap;
// vectors at or below the cap pass through unchanged.
pub fn limit(force: Vec3, max: f32) -> Vec3 {
    let norm = force.length();
    if norm > max {
        force * (max / norm)
    } else {
        force
    }
}

// Teleporting wraparound with an inset: crossing an edge re-enters from the
// opposite side, offset inward so the next tick does not re-trigger the wrap.
// Velocity is untouched by the boundary event.
fn wrap_axis(position: f32, edge: f32) -> f32 {
    if position < -edge {
        return edge - EDGE_OFFSET;
    }
    if position > edge {
        return -(edge - EDGE_OFFSET);
    }
    position
}

fn random_vec3(rng: &mut RandomSource, min: f64, max: f64) -> Result<Vec3, DistributionError> {
    Ok(vec3(
        rng.uniform(min, max)? as f32,
        rng.uniform(min, max)? as f32,
        rng.uniform(min, max)? as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_params() -> FlockParams {
        FlockParams::default()
    }

    #[test]
    fn limit_is_identity_below_the_cap() {
        let v = vec3(0.01, 0.0, 0.02);
        assert_eq!(limit(v, 0.03), v);
        assert_eq!(limit(Vec3::ZERO, 0.03), Vec3::ZERO);
    }

    #[test]
    fn limit_rescales_to_exactly_the_cap() {
        let v = vec3(3.0, 4.0, 0.0);
        let clamped = limit(v, 0.03);
        assert_relative_eq!(clamped.length(), 0.03, epsilon = 1e-6);
        // Direction preserved.
        assert_relative_eq!(clamped.x / clamped.y, 3.0 / 4.0, epsilon = 1e-5);
    }

    #[test]
    fn wrap_snaps_inward_from_both_edges() {
        assert_relative_eq!(wrap_axis(10.5, 10.4), -(10.4 - EDGE_OFFSET));
        assert_relative_eq!(wrap_axis(-10.5, 10.4), 10.4 - EDGE_OFFSET);
        assert_relative_eq!(wrap_axis(3.0, 10.4), 3.0);
    }

    #[test]
    fn resting_boid_at_origin_feels_no_force() {
        let boid = Boid::with_state(Vec3::ZERO, Vec3::ZERO);
        let flock = vec![boid.clone()];
        let params = test_params();
        assert_eq!(
            boid.alignment(&flock, params.radius_awareness, params.max_speed),
            Vec3::ZERO
        );
        assert_eq!(
            boid.cohesion(&flock, params.radius_awareness, params.max_speed),
            Vec3::ZERO
        );
        assert_eq!(
            boid.separation(&flock, 0, params.radius_awareness, params.max_speed),
            Vec3::ZERO
        );
    }

    #[test]
    fn alignment_counts_the_boid_itself() {
        // The distance-only neighbor check is trivially true at distance
        // zero, so an isolated moving boid averages over its own velocity.
        let boid = Boid::with_state(Vec3::ZERO, vec3(0.02, 0.0, 0.0));
        let flock = vec![boid.clone()];
        let params = test_params();
        let force = boid.alignment(&flock, params.radius_awareness, params.max_speed);
        assert_eq!(force, limit(boid.velocity(), params.max_speed));
    }

    #[test]
    fn forces_vanish_outside_the_awareness_radius() {
        let a = Boid::with_state(Vec3::ZERO, Vec3::ZERO);
        let b = Boid::with_state(vec3(100.0, 0.0, 0.0), vec3(0.01, 0.0, 0.0));
        let flock = vec![a.clone(), b];
        let params = test_params();
        assert_eq!(
            a.separation(&flock, 0, params.radius_awareness, params.max_speed),
            Vec3::ZERO
        );
        // Alignment and cohesion still see the self entry, which is at rest
        // at the origin, so they contribute nothing either.
        assert_eq!(
            a.alignment(&flock, params.radius_awareness, params.max_speed),
            Vec3::ZERO
        );
        assert_eq!(
            a.cohesion(&flock, params.radius_awareness, params.max_speed),
            Vec3::ZERO
        );
    }

    #[test]
    fn separation_contributions_are_antisymmetric() {
        let a = Boid::with_state(vec3(0.0, 0.0, 0.0), Vec3::ZERO);
        let b = Boid::with_state(vec3(0.1, 0.0, 0.0), Vec3::ZERO);
        let flock = vec![a.clone(), b.clone()];
        let params = test_params();

        // With zero velocities the separation force is the clamped average
        // displacement, so the two results must be exact negations.
        let sep_a = a.separation(&flock, 0, params.radius_awareness, params.max_speed);
        let sep_b = b.separation(&flock, 1, params.radius_awareness, params.max_speed);
        assert_relative_eq!(sep_a.x, -sep_b.x, epsilon = 1e-6);
        assert_relative_eq!(sep_a.y, -sep_b.y, epsilon = 1e-6);
        assert_relative_eq!(sep_a.z, -sep_b.z, epsilon = 1e-6);
        assert!(sep_a.x < 0.0 && sep_b.x > 0.0);
    }

    #[test]
    fn coincident_neighbors_do_not_divide_by_zero() {
        let a = Boid::with_state(vec3(1.0, 1.0, 1.0), Vec3::ZERO);
        let b = Boid::with_state(vec3(1.0, 1.0, 1.0), Vec3::ZERO);
        let flock = vec![a.clone(), b];
        let params = test_params();
        let force = a.separation(&flock, 0, params.radius_awareness, params.max_speed);
        assert!(force.is_finite());
        assert_eq!(force, Vec3::ZERO);
    }

    #[test]
    fn update_clamps_speed_for_any_force_input() {
        let params = test_params();
        // A dense cluster produces large raw force sums.
        let mut flock: Vec<Boid> = (0..20)
            .map(|i| {
                Boid::with_state(
                    vec3(i as f32 * 0.01, 0.0, 0.0),
                    vec3(5.0, -3.0, 1.0),
                )
            })
            .collect();
        let snapshot = flock.clone();
        for (i, boid) in flock.iter_mut().enumerate() {
            boid.update(&snapshot, i, &params);
            assert!(boid.velocity().length() <= params.max_speed + 1e-5);
        }
    }

    #[test]
    fn wraparound_preserves_velocity() {
        let params = test_params();
        let edge = params.domain_half_extent;
        let velocity = vec3(0.02, 0.0, 0.0);
        let mut boid = Boid::with_state(vec3(edge - 0.001, 0.0, 0.0), velocity);
        let snapshot = vec![boid.clone()];

        // Zero weights isolate the integration and boundary rule.
        let mut params = params;
        params.weight_cohesion = 0.0;
        params.weight_alignment = 0.0;
        params.weight_separation = 0.0;

        boid.update(&snapshot, 0, &params);
        assert_relative_eq!(boid.position().x, -(edge - EDGE_OFFSET));
        assert_eq!(boid.velocity(), velocity);
    }
}
