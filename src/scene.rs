/*
 * Scene Module
 *
 * Procedural scene population around the flock: orbiting planets placed by
 * probabilistic sampling, and the player-controlled surveyor whose mood
 * chain drives the scene lighting.
 *
 * The scene layer owns all render-proxy data; simulation entities only
 * expose read-only positions and colors to it.
 */

use nannou::prelude::*;

use crate::error::{ChainError, DistributionError};
use crate::markov::MarkovChain;
use crate::random::RandomSource;

// Side length scale of the region planets are scattered over.
const PLANET_SPREAD: f32 = 18.0;
// Trials/probability for the planet population draw.
const PLANET_TRIALS: u32 = 12;
const PLANET_PROBABILITY: f64 = 0.5;

const SURVEYOR_SPEED: f32 = 0.05;
const WIGGLE_AMPLITUDE_POSITION: f32 = 0.01;
const WIGGLE_PERIOD_POSITION: f32 = 2.0;
const WIGGLE_AMPLITUDE_ROTATION: f32 = 0.25;
const WIGGLE_PERIOD_ROTATION: f32 = 5.0;

// Blend factors toward the active mood's targets.
const LIGHT_MIX: f32 = 0.1;
const MATERIAL_MIX: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetKind {
    Jupiter,
    Mars,
    Neptune,
    Uranus,
    Mercury,
    VenusAtmosphere,
    VenusSurface,
}

impl PlanetKind {
    const ALL: [PlanetKind; 7] = [
        PlanetKind::Jupiter,
        PlanetKind::Mars,
        PlanetKind::Neptune,
        PlanetKind::Uranus,
        PlanetKind::Mercury,
        PlanetKind::VenusAtmosphere,
        PlanetKind::VenusSurface,
    ];

    pub fn base_color(&self) -> Rgb {
        match self {
            PlanetKind::Jupiter => rgb(0.80, 0.62, 0.45),
            PlanetKind::Mars => rgb(0.76, 0.33, 0.20),
            PlanetKind::Neptune => rgb(0.25, 0.41, 0.88),
            PlanetKind::Uranus => rgb(0.56, 0.81, 0.84),
            PlanetKind::Mercury => rgb(0.55, 0.53, 0.50),
            PlanetKind::VenusAtmosphere => rgb(0.90, 0.82, 0.60),
            PlanetKind::VenusSurface => rgb(0.72, 0.52, 0.30),
        }
    }
}

pub struct Planet {
    position: Vec3,
    scale: f32,
    rotation_rates: (f32, f32),
    rotation: Vec3,
    kind: PlanetKind,
}

impl Planet {
    // Draw the planet population for a run. The count comes from a binomial
    // draw, so an empty sky is a legal (if unlucky) outcome.
    pub fn create_planets(rng: &mut RandomSource) -> Result<Vec<Planet>, DistributionError> {
        let count = rng.binomial_cdf(PLANET_TRIALS, PLANET_PROBABILITY)?;
        (0..count).map(|_| Planet::new(rng)).collect()
    }

    fn new(rng: &mut RandomSource) -> Result<Self, DistributionError> {
        let kind_index = rng.discrete_uniform(0, PlanetKind::ALL.len() as i32 - 1)?;
        let position = vec3(
            (rng.beta(1.0, 1.0)? as f32 - 0.5) * PLANET_SPREAD,
            (rng.beta(1.0, 1.0)? as f32 - 0.5) * PLANET_SPREAD,
            (rng.beta(1.0, 1.0)? as f32 - 0.5) * PLANET_SPREAD,
        );
        let scale = rng.uniform(0.8, 1.2)? as f32;
        let (rate_x, rate_y) = rng.normal(0.0, 0.5)?;

        Ok(Self {
            position,
            scale,
            rotation_rates: (rate_x as f32, rate_y as f32),
            rotation: Vec3::ZERO,
            kind: PlanetKind::ALL[kind_index as usize],
        })
    }

    // Spin in place around the randomized axes as time advances.
    pub fn orbit(&mut self, time: f32) {
        self.rotation = vec3(
            self.rotation_rates.0 * time,
            self.rotation_rates.1 * time,
            0.0,
        );
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn kind(&self) -> PlanetKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Scared,
    Relaxed,
}

impl Mood {
    fn from_index(index: usize) -> Mood {
        match index {
            0 => Mood::Happy,
            1 => Mood::Sad,
            2 => Mood::Angry,
            3 => Mood::Scared,
            _ => Mood::Relaxed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Scared => "scared",
            Mood::Relaxed => "relaxed",
        }
    }
}

// Per-mood lighting and material targets.
struct MoodTargets {
    diffuse: Vec3,
    specular: Vec3,
    shininess: f32,
    light: Vec3,
}

fn mood_targets(mood: Mood) -> MoodTargets {
    match mood {
        // Slightly shiny stone under a warm, bright light
        Mood::Happy => MoodTargets {
            diffuse: vec3(0.7, 0.7, 0.7),
            specular: vec3(0.8, 0.8, 0.8),
            shininess: 100.0,
            light: vec3(2.5, 2.5, 2.0),
        },
        // Duller, slightly bluish stone under a dimmer, cooler light
        Mood::Sad => MoodTargets {
            diffuse: vec3(0.5, 0.5, 0.55),
            specular: vec3(0.4, 0.4, 0.45),
            shininess: 30.0,
            light: vec3(1.0, 1.0, 2.0),
        },
        // Darker, reddish stone under a reddish, intense light
        Mood::Angry => MoodTargets {
            diffuse: vec3(0.6, 0.3, 0.3),
            specular: vec3(0.6, 0.3, 0.3),
            shininess: 50.0,
            light: vec3(3.0, 0.5, 0.5),
        },
        // Darker, slightly purplish stone under a dim, purple light
        Mood::Scared => MoodTargets {
            diffuse: vec3(0.4, 0.4, 0.5),
            specular: vec3(0.5, 0.5, 0.6),
            shininess: 25.0,
            light: vec3(1.5, 1.5, 2.5),
        },
        // Calm, slightly bluish stone under a soft, blue-green light
        Mood::Relaxed => MoodTargets {
            diffuse: vec3(0.6, 0.65, 0.7),
            specular: vec3(0.7, 0.75, 0.8),
            shininess: 70.0,
            light: vec3(1.0, 2.0, 2.5),
        },
    }
}

pub struct Surveyor {
    position: Vec3,
    rotation: Vec3,
    light_intensity: Vec3,
    diffuse: Vec3,
    specular: Vec3,
    shininess: f32,
    feelings: MarkovChain,
}

impl Surveyor {
    pub fn new() -> Result<Self, ChainError> {
        Self::with_chain(default_feelings_matrix(), vec![0.2; 5])
    }

    pub fn with_chain(
        transition: Vec<Vec<f64>>,
        initial: Vec<f64>,
    ) -> Result<Self, ChainError> {
        Ok(Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            light_intensity: vec3(0.01, 0.01, 0.01),
            diffuse: vec3(0.6, 0.6, 0.6),
            specular: vec3(0.5, 0.5, 0.5),
            shininess: 50.0,
            feelings: MarkovChain::new(transition, initial)?,
        })
    }

    // Move along a unit direction assembled from the pressed keys.
    pub fn steer(&mut self, direction: Vec3) {
        self.position += direction * SURVEYOR_SPEED;
    }

    // Sinusoidal position and rotation offsets making the surveyor hover.
    pub fn wiggle_offsets(time: f32) -> (Vec3, Vec3) {
        let position_offset = vec3(
            (time / WIGGLE_PERIOD_POSITION).sin() * WIGGLE_AMPLITUDE_POSITION,
            (time / WIGGLE_PERIOD_POSITION * 1.25).cos() * WIGGLE_AMPLITUDE_POSITION,
            (time / WIGGLE_PERIOD_POSITION * 1.5).sin() * WIGGLE_AMPLITUDE_POSITION,
        );
        let rotation_offset = vec3(
            (time / WIGGLE_PERIOD_ROTATION).sin() * WIGGLE_AMPLITUDE_ROTATION,
            (time / WIGGLE_PERIOD_ROTATION).cos() * WIGGLE_AMPLITUDE_ROTATION,
            (time / WIGGLE_PERIOD_ROTATION * 1.5).sin() * WIGGLE_AMPLITUDE_ROTATION,
        );
        (position_offset, rotation_offset)
    }

    pub fn apply_wiggle(&mut self, time: f32) {
        let (position_offset, rotation_offset) = Self::wiggle_offsets(time);
        self.position += position_offset;
        self.rotation += rotation_offset;
    }

    // Advance the mood chain by one observable transition.
    pub fn next_feeling(&mut self, rng: &mut RandomSource) -> Mood {
        let state = self.feelings.step(rng);
        Mood::from_index(state)
    }

    // Blend lighting and material toward the active mood's targets.
    pub fn adapt_feeling(&mut self) {
        let targets = mood_targets(self.mood());
        self.light_intensity = self.light_intensity.lerp(targets.light, LIGHT_MIX);
        self.diffuse = self.diffuse.lerp(targets.diffuse, MATERIAL_MIX);
        self.specular = self.specular.lerp(targets.specular, MATERIAL_MIX);
        self.shininess += (targets.shininess - self.shininess) * MATERIAL_MIX;
    }

    pub fn mood(&self) -> Mood {
        Mood::from_index(self.feelings.active_state())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn light_intensity(&self) -> Vec3 {
        self.light_intensity
    }

    pub fn body_color(&self) -> Rgb {
        rgb(self.diffuse.x, self.diffuse.y, self.diffuse.z)
    }
}

// Default mood dynamics: moods are sticky, happy and relaxed trade places
// often, fear and anger are rarer excursions.
fn default_feelings_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.55, 0.10, 0.05, 0.05, 0.25],
        vec![0.15, 0.50, 0.10, 0.10, 0.15],
        vec![0.10, 0.15, 0.50, 0.10, 0.15],
        vec![0.10, 0.15, 0.15, 0.45, 0.15],
        vec![0.25, 0.10, 0.05, 0.05, 0.55],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn planet_population_is_bounded_by_the_trial_count() {
        for seed in 0..20 {
            let mut rng = RandomSource::with_seed(seed);
            let planets = Planet::create_planets(&mut rng).unwrap();
            assert!(planets.len() <= PLANET_TRIALS as usize);
        }
    }

    #[test]
    fn planets_scatter_inside_the_spread_and_scale_range() {
        let mut rng = RandomSource::with_seed(40);
        let planets = Planet::create_planets(&mut rng).unwrap();
        for planet in &planets {
            let p = planet.position();
            for component in [p.x, p.y, p.z] {
                assert!(component.abs() <= PLANET_SPREAD / 2.0 + 1e-3);
            }
            assert!((0.8..1.2).contains(&planet.scale()));
        }
    }

    #[test]
    fn orbit_scales_rotation_with_time() {
        let mut rng = RandomSource::with_seed(41);
        let mut planets = Planet::create_planets(&mut rng).unwrap();
        if let Some(planet) = planets.first_mut() {
            planet.orbit(2.0);
            let at_two = planet.rotation();
            planet.orbit(4.0);
            let at_four = planet.rotation();
            assert_relative_eq!(at_four.x, at_two.x * 2.0, epsilon = 1e-5);
            assert_relative_eq!(at_four.y, at_two.y * 2.0, epsilon = 1e-5);
            assert_eq!(at_four.z, 0.0);
        }
    }

    #[test]
    fn surveyor_steers_at_fixed_speed() {
        let mut surveyor = Surveyor::new().unwrap();
        surveyor.steer(vec3(1.0, 0.0, 0.0));
        assert_relative_eq!(surveyor.position().x, SURVEYOR_SPEED);
        surveyor.steer(vec3(0.0, -1.0, 0.0));
        assert_relative_eq!(surveyor.position().y, -SURVEYOR_SPEED);
    }

    #[test]
    fn mood_lighting_converges_toward_the_active_target() {
        let mut surveyor = Surveyor::new().unwrap();
        let mut rng = RandomSource::with_seed(42);
        let mood = surveyor.next_feeling(&mut rng);
        let target = mood_targets(mood).light;
        for _ in 0..400 {
            surveyor.adapt_feeling();
        }
        let light = surveyor.light_intensity();
        assert_relative_eq!(light.x, target.x, epsilon = 1e-3);
        assert_relative_eq!(light.y, target.y, epsilon = 1e-3);
        assert_relative_eq!(light.z, target.z, epsilon = 1e-3);
    }

    #[test]
    fn default_feelings_matrix_is_a_valid_chain() {
        let chain = MarkovChain::new(default_feelings_matrix(), vec![0.2; 5]).unwrap();
        let stationary = chain.stationary_distribution();
        assert_relative_eq!(stationary.iter().sum::<f64>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn wiggle_offsets_stay_within_their_amplitudes() {
        for i in 0..100 {
            let time = i as f32 * 0.37;
            let (position_offset, rotation_offset) = Surveyor::wiggle_offsets(time);
            assert!(position_offset.length() <= WIGGLE_AMPLITUDE_POSITION * 2.0);
            assert!(rotation_offset.length() <= WIGGLE_AMPLITUDE_ROTATION * 2.0);
        }
    }
}
