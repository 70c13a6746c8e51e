/*
 * Markov Chain Module
 *
 * A small discrete-state stochastic process used to drive the surveyor's
 * mood and, through it, the scene lighting. The chain holds a probability
 * vector that is evolved by the transition matrix and periodically collapsed
 * to a concrete state by sampling.
 */

use crate::error::ChainError;
use crate::random::RandomSource;

const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug)]
pub struct MarkovChain {
    transition: Vec<Vec<f64>>,
    state: Vec<f64>,
    counts: Vec<u32>,
    total_collapses: u32,
}

impl MarkovChain {
    pub fn new(transition: Vec<Vec<f64>>, initial: Vec<f64>) -> Result<Self, ChainError> {
        if transition.is_empty() || transition.iter().any(|row| row.len() != transition.len()) {
            return Err(ChainError::NotSquare);
        }
        if transition.len() != initial.len() {
            return Err(ChainError::DimensionMismatch {
                states: transition.len(),
                initial: initial.len(),
            });
        }
        for (i, row) in transition.iter().enumerate() {
            check_probability_sum(row)
                .map_err(|e| match e {
                    ChainError::InitialSumMismatch { sum } => {
                        ChainError::RowSumMismatch { row: i, sum }
                    }
                    other => other,
                })?;
        }
        check_probability_sum(&initial)?;

        let states = initial.len();
        log::debug!("markov chain initialized with {} states", states);
        Ok(Self {
            transition,
            state: initial,
            counts: vec![0; states],
            total_collapses: 0,
        })
    }

    // One probability-vector step: state' = state x transition.
    pub fn evolve(&mut self) {
        let states = self.state.len();
        let mut next = vec![0.0; states];
        for i in 0..states {
            for j in 0..states {
                next[j] += self.transition[i][j] * self.state[i];
            }
        }
        self.state = next;
    }

    // Sample a concrete state from the cumulative distribution and one-hot
    // the probability vector onto it.
    pub fn collapse(&mut self, rng: &mut RandomSource) -> usize {
        let mut cumulative = 0.0;
        let threshold = rng.unit();
        let mut active = self.state.len() - 1;
        for (i, p) in self.state.iter().enumerate() {
            cumulative += p;
            if threshold <= cumulative {
                active = i;
                break;
            }
        }

        self.counts[active] += 1;
        self.total_collapses += 1;

        self.state.iter_mut().for_each(|p| *p = 0.0);
        self.state[active] = 1.0;
        log::debug!("markov chain collapsed to state {}", active);
        active
    }

    // Evolve then collapse: one observable transition.
    pub fn step(&mut self, rng: &mut RandomSource) -> usize {
        self.evolve();
        self.collapse(rng)
    }

    pub fn current_state(&self) -> &[f64] {
        &self.state
    }

    pub fn state_counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total_collapses(&self) -> u32 {
        self.total_collapses
    }

    pub fn num_states(&self) -> usize {
        self.state.len()
    }

    // Index of the most probable state; after a collapse this is the
    // concrete active state.
    pub fn active_state(&self) -> usize {
        self.state
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    // Long-run state distribution by power iteration.
    pub fn stationary_distribution(&self) -> Vec<f64> {
        let states = self.num_states();
        let mut current = vec![1.0 / states as f64; states];
        for _ in 0..10_000 {
            let mut next = vec![0.0; states];
            for i in 0..states {
                for j in 0..states {
                    next[j] += self.transition[i][j] * current[i];
                }
            }
            let delta: f64 = next
                .iter()
                .zip(&current)
                .map(|(a, b)| (a - b).abs())
                .sum();
            current = next;
            if delta < 1e-9 {
                break;
            }
        }
        current
    }
}

fn check_probability_sum(probabilities: &[f64]) -> Result<(), ChainError> {
    let mut sum = 0.0;
    for &p in probabilities {
        if !(0.0..=1.0).contains(&p) {
            return Err(ChainError::InvalidProbability(p));
        }
        sum += p;
    }
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(ChainError::InitialSumMismatch { sum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn symmetric_chain() -> MarkovChain {
        MarkovChain::new(
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![0.5, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_invalid_input() {
        assert_eq!(
            MarkovChain::new(vec![], vec![]).unwrap_err(),
            ChainError::NotSquare
        );
        assert_eq!(
            MarkovChain::new(vec![vec![1.0, 0.0]], vec![1.0]).unwrap_err(),
            ChainError::NotSquare
        );
        assert!(matches!(
            MarkovChain::new(vec![vec![1.0]], vec![0.5, 0.5]).unwrap_err(),
            ChainError::DimensionMismatch { states: 1, initial: 2 }
        ));
        assert!(matches!(
            MarkovChain::new(
                vec![vec![1.2, -0.2], vec![0.5, 0.5]],
                vec![0.5, 0.5]
            )
            .unwrap_err(),
            ChainError::InvalidProbability(_)
        ));
        assert!(matches!(
            MarkovChain::new(
                vec![vec![0.4, 0.4], vec![0.5, 0.5]],
                vec![0.5, 0.5]
            )
            .unwrap_err(),
            ChainError::RowSumMismatch { row: 0, .. }
        ));
        assert!(matches!(
            MarkovChain::new(
                vec![vec![0.5, 0.5], vec![0.5, 0.5]],
                vec![0.9, 0.3]
            )
            .unwrap_err(),
            ChainError::InitialSumMismatch { .. }
        ));
    }

    #[test]
    fn evolve_conserves_probability_mass() {
        let mut chain = MarkovChain::new(
            vec![
                vec![0.2, 0.3, 0.5],
                vec![0.1, 0.6, 0.3],
                vec![0.4, 0.4, 0.2],
            ],
            vec![1.0, 0.0, 0.0],
        )
        .unwrap();
        for _ in 0..20 {
            chain.evolve();
            let sum: f64 = chain.current_state().iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn collapse_one_hots_the_state() {
        let mut chain = symmetric_chain();
        let mut rng = RandomSource::with_seed(30);
        let active = chain.step(&mut rng);
        let state = chain.current_state();
        assert_relative_eq!(state[active], 1.0);
        assert_relative_eq!(state.iter().sum::<f64>(), 1.0);
        assert_eq!(chain.active_state(), active);
        assert_eq!(chain.state_counts().iter().sum::<u32>(), 1);
        assert_eq!(chain.total_collapses(), 1);
    }

    #[test]
    fn identity_chain_never_leaves_its_state() {
        let mut chain = MarkovChain::new(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![0.0, 1.0],
        )
        .unwrap();
        let mut rng = RandomSource::with_seed(31);
        for _ in 0..50 {
            assert_eq!(chain.step(&mut rng), 1);
        }
        assert_eq!(chain.state_counts(), &[0, 50]);
    }

    #[test]
    fn stationary_distribution_of_symmetric_chain_is_uniform() {
        let chain = symmetric_chain();
        let stationary = chain.stationary_distribution();
        assert_relative_eq!(stationary[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(stationary[1], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn collapse_frequencies_track_the_distribution() {
        let mut chain = MarkovChain::new(
            vec![vec![0.8, 0.2], vec![0.8, 0.2]],
            vec![0.5, 0.5],
        )
        .unwrap();
        let mut rng = RandomSource::with_seed(32);
        for _ in 0..10_000 {
            chain.step(&mut rng);
        }
        let counts = chain.state_counts();
        let rate = counts[0] as f64 / chain.total_collapses() as f64;
        assert!((rate - 0.8).abs() < 0.02, "state 0 rate {} too far from 0.8", rate);
    }
}
