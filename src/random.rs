/*
 * Random/Distribution Module
 *
 * Pseudo-random sampling primitives built on a single [0,1) source. Boid
 * construction and scene population draw everything from here: uniform,
 * bernoulli, discrete uniform, binomial (inverse CDF), exponential, normal
 * (Box-Muller), laplace, and beta (inverse CDF by numerical integration).
 *
 * The source is an explicitly owned object rather than process-global state,
 * so tests can seed it deterministically.
 */

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::DistributionError;

// Grid step for the beta inverse-CDF integration. The sampling error is on
// the order of this step.
const BETA_STEP: f64 = 0.001;

pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    // Deterministic source for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    // One sample from the underlying [0, 1) source.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    // Linear scaling of a [0,1) sample into [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> Result<f64, DistributionError> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(DistributionError::EmptyRange { lo, hi });
        }
        Ok(lo + self.unit() * (hi - lo))
    }

    // True with probability p.
    pub fn bernoulli(&mut self, p: f64) -> Result<bool, DistributionError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DistributionError::InvalidProbability(p));
        }
        Ok(self.unit() < p)
    }

    // Unbiased inclusive integer range. Rejects and resamples against the
    // largest multiple of the span below the generator's max so that no
    // residue class is over-represented.
    pub fn discrete_uniform(&mut self, lo: i32, hi: i32) -> Result<i32, DistributionError> {
        if lo > hi {
            return Err(DistributionError::EmptyDiscreteRange { lo, hi });
        }
        let span = (hi as i64 - lo as i64 + 1) as u64;
        let zone = (u64::MAX / span) * span;
        loop {
            let sample = self.rng.next_u64();
            if sample < zone {
                return Ok((lo as i64 + (sample % span) as i64) as i32);
            }
        }
    }

    // Number of successes in n trials with success probability p, sampled by
    // accumulating the exact binomial PMF until a uniform threshold is
    // crossed.
    pub fn binomial_cdf(&mut self, n: u32, p: f64) -> Result<u32, DistributionError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DistributionError::InvalidProbability(p));
        }
        let threshold = self.unit();
        let mut cumulative = 0.0;
        for i in 0..=n {
            cumulative += binomial_coefficient(n, i) as f64
                * p.powi(i as i32)
                * (1.0 - p).powi((n - i) as i32);
            if threshold < cumulative {
                return Ok(i);
            }
        }
        // The cumulative mass sums to 1 up to rounding, so falling through
        // means the threshold landed in the rounding gap near 1.
        log::warn!(
            "binomial inverse CDF exhausted (n={}, p={}, threshold={}); clamping to n",
            n,
            p,
            threshold
        );
        Ok(n)
    }

    // Inverse-transform sample, -ln(1-u)/lambda.
    pub fn exponential(&mut self, lambda: f64) -> Result<f64, DistributionError> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(DistributionError::NonPositiveRate(lambda));
        }
        let u = self.unit();
        Ok(-(1.0 - u).ln() / lambda)
    }

    // Box-Muller transform; two independent samples per call.
    pub fn normal(&mut self, mean: f64, variance: f64) -> Result<(f64, f64), DistributionError> {
        if !variance.is_finite() || variance < 0.0 {
            return Err(DistributionError::NegativeVariance(variance));
        }
        // 1 - u keeps the logarithm argument in (0, 1].
        let u1 = 1.0 - self.unit();
        let u2 = self.unit();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * u2;
        let sd = variance.sqrt();
        Ok((mean + sd * radius * angle.cos(), mean + sd * radius * angle.sin()))
    }

    // Inverse-transform sample of the Laplace distribution.
    pub fn laplace(&mut self, mu: f64, b: f64) -> Result<f64, DistributionError> {
        if !b.is_finite() || b <= 0.0 {
            return Err(DistributionError::NonPositiveScale(b));
        }
        // Resample until strictly inside (0, 1) so the logarithm stays finite.
        let u = loop {
            let u = self.unit();
            if u > 0.0 {
                break u;
            }
        };
        let centered = u - 0.5;
        Ok(mu - b * centered.signum() * (1.0 - 2.0 * centered.abs()).ln())
    }

    // Inverse-CDF sample of the Beta distribution by numerical integration of
    // the PDF on a fixed midpoint grid. The threshold is compared against
    // u * total mass, which makes the normalizing Beta function implicit.
    // Midpoint evaluation keeps shape parameters below 1 finite.
    pub fn beta(&mut self, alpha: f64, beta: f64) -> Result<f64, DistributionError> {
        if !alpha.is_finite() || !beta.is_finite() || alpha <= 0.0 || beta <= 0.0 {
            return Err(DistributionError::InvalidShape { alpha, beta });
        }
        let steps = (1.0 / BETA_STEP) as usize;
        let mut weights = Vec::with_capacity(steps);
        let mut total = 0.0;
        for i in 0..steps {
            let x = (i as f64 + 0.5) * BETA_STEP;
            let w = x.powf(alpha - 1.0) * (1.0 - x).powf(beta - 1.0);
            weights.push(w);
            total += w;
        }
        let threshold = self.unit() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if cumulative >= threshold {
                return Ok((i as f64 + 0.5) * BETA_STEP);
            }
        }
        // Rounding can leave the last grid cell short of the threshold.
        Ok(1.0 - BETA_STEP / 2.0)
    }
}

// Number of ways to choose k items from a set of n distinct items,
// multiplicative formula.
pub fn binomial_coefficient(n: u32, k: u32) -> u64 {
    if k > n {
        return 0;
    }
    if k == 0 || k == n {
        return 1;
    }
    if k == 1 || k == n - 1 {
        return n as u64;
    }
    let mut coeff: u64 = n as u64;
    for i in 2..=k as u64 {
        coeff *= n as u64 - i + 1;
        coeff /= i;
    }
    coeff
}
