/*
 * Flock Module
 *
 * Owns the boid population and drives the per-tick update. Forces for every
 * boid in a tick are computed against the same frozen pre-tick snapshot, so
 * no boid ever observes another boid's post-tick state mid-tick.
 */

use crate::boid::Boid;
use crate::error::DistributionError;
use crate::params::FlockParams;
use crate::random::RandomSource;

pub struct Flock {
    boids: Vec<Boid>,
}

impl Flock {
    pub fn spawn(count: usize, rng: &mut RandomSource) -> Result<Self, DistributionError> {
        let mut boids = Vec::with_capacity(count);
        for _ in 0..count {
            boids.push(Boid::new(rng)?);
        }
        Ok(Self { boids })
    }

    // Build a flock from explicit boids, for scripted scenarios.
    pub fn from_boids(boids: Vec<Boid>) -> Self {
        Self { boids }
    }

    // Advance the whole population by one tick against a frozen snapshot.
    pub fn tick(&mut self, params: &FlockParams) {
        let snapshot = self.boids.clone();
        for (i, boid) in self.boids.iter_mut().enumerate() {
            boid.update(&snapshot, i, params);
        }
    }

    // Throw away the current population and draw a fresh one.
    pub fn reset(&mut self, count: usize, rng: &mut RandomSource) -> Result<(), DistributionError> {
        let mut boids = Vec::with_capacity(count);
        for _ in 0..count {
            boids.push(Boid::new(rng)?);
        }
        self.boids = boids;
        Ok(())
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }
}
