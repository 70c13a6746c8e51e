/*
 * Error Module
 *
 * Error types for configuration validation. Each failure domain gets its own
 * enum: distribution parameters, mood-chain construction, and flock
 * parameters. All of them are rejected once, at the edge, before the first
 * tick runs; per-tick work never produces errors.
 */

use std::fmt;

// Invalid parameters passed to a distribution sampler.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    // Probability outside [0, 1].
    InvalidProbability(f64),
    // Uniform range with lower bound not below upper bound.
    EmptyRange { lo: f64, hi: f64 },
    // Discrete range with lower bound above upper bound.
    EmptyDiscreteRange { lo: i32, hi: i32 },
    // Exponential rate that is zero, negative, or non-finite.
    NonPositiveRate(f64),
    // Normal variance that is negative or non-finite.
    NegativeVariance(f64),
    // Laplace scale that is zero, negative, or non-finite.
    NonPositiveScale(f64),
    // Beta shape parameters that are zero, negative, or non-finite.
    InvalidShape { alpha: f64, beta: f64 },
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::InvalidProbability(p) => {
                write!(f, "probability {} is outside [0, 1]", p)
            }
            DistributionError::EmptyRange { lo, hi } => {
                write!(f, "uniform range [{}, {}) is empty", lo, hi)
            }
            DistributionError::EmptyDiscreteRange { lo, hi } => {
                write!(f, "discrete range [{}, {}] is empty", lo, hi)
            }
            DistributionError::NonPositiveRate(lambda) => {
                write!(f, "exponential rate {} must be positive", lambda)
            }
            DistributionError::NegativeVariance(v) => {
                write!(f, "normal variance {} must be non-negative", v)
            }
            DistributionError::NonPositiveScale(b) => {
                write!(f, "laplace scale {} must be positive", b)
            }
            DistributionError::InvalidShape { alpha, beta } => {
                write!(f, "beta shape parameters ({}, {}) must be positive", alpha, beta)
            }
        }
    }
}

impl std::error::Error for DistributionError {}

// Invalid construction input for a Markov chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainError {
    // Empty matrix, or a row whose length differs from the row count.
    NotSquare,
    // Matrix dimension differs from the initial state vector length.
    DimensionMismatch { states: usize, initial: usize },
    // A transition or state probability outside [0, 1].
    InvalidProbability(f64),
    // A transition matrix row whose probabilities do not sum to 1.
    RowSumMismatch { row: usize, sum: f64 },
    // An initial state vector whose probabilities do not sum to 1.
    InitialSumMismatch { sum: f64 },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::NotSquare => {
                write!(f, "transition matrix must be a non-empty square matrix")
            }
            ChainError::DimensionMismatch { states, initial } => {
                write!(
                    f,
                    "transition matrix has {} states but the initial state has {} entries",
                    states, initial
                )
            }
            ChainError::InvalidProbability(p) => {
                write!(f, "probability {} is outside [0, 1]", p)
            }
            ChainError::RowSumMismatch { row, sum } => {
                write!(f, "row {} of the transition matrix sums to {}, expected 1", row, sum)
            }
            ChainError::InitialSumMismatch { sum } => {
                write!(f, "initial state probabilities sum to {}, expected 1", sum)
            }
        }
    }
}

impl std::error::Error for ChainError {}

// Invalid flock configuration, rejected before the first frame renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    EmptyFlock,
    NonPositiveRadius(f32),
    NonPositiveSpeed(f32),
    NegativeWeight { name: &'static str, value: f32 },
    // The half-extent must leave room for the wraparound inset.
    ExtentTooSmall { extent: f32, inset: f32 },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::EmptyFlock => write!(f, "the flock must contain at least one boid"),
            ParamsError::NonPositiveRadius(r) => {
                write!(f, "awareness radius {} must be positive", r)
            }
            ParamsError::NonPositiveSpeed(s) => {
                write!(f, "max speed {} must be positive", s)
            }
            ParamsError::NegativeWeight { name, value } => {
                write!(f, "{} weight {} must be non-negative", name, value)
            }
            ParamsError::ExtentTooSmall { extent, inset } => {
                write!(
                    f,
                    "domain half-extent {} must exceed the edge inset {}",
                    extent, inset
                )
            }
        }
    }
}

impl std::error::Error for ParamsError {}
