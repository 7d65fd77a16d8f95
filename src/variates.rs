//! Random variates driving arrivals and cart sizes.

use rand::{distr::Open01, Rng, RngCore};

use crate::error::{ensure_positive, ConfigError};

/// A source of uniform draws in the open interval (0, 1).
///
/// Every [`RngCore`] is a source, so seeded [`rand::rngs::StdRng`]s give reproducible runs. Use
/// [`FixedDraws`] to replay an exact sequence.
pub trait UniformSource {
    /// The next draw, strictly between 0 and 1.
    fn next_open01(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    fn next_open01(&mut self) -> f64 {
        self.sample(Open01)
    }
}

/// Replays a fixed sequence of uniform draws, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct FixedDraws {
    draws: Vec<f64>,
    next: usize,
}

impl FixedDraws {
    /// Create a source from `draws`.
    ///
    /// # Panics
    ///
    /// If `draws` is empty or any draw lies outside (0, 1).
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "FixedDraws needs at least one draw");
        assert!(
            draws.iter().all(|u| *u > 0.0 && *u < 1.0),
            "uniform draws must lie in the open interval (0, 1)"
        );
        Self { draws, next: 0 }
    }

    /// How many draws have been taken so far.
    pub fn taken(&self) -> usize {
        self.next
    }
}

impl UniformSource for FixedDraws {
    fn next_open01(&mut self) -> f64 {
        let u = self.draws[self.next % self.draws.len()];
        self.next += 1;
        u
    }
}

/// Exponentially distributed gaps between arrivals.
#[derive(Debug, Clone, Copy)]
pub struct InterArrivalTimes {
    mean: f64,
}

impl InterArrivalTimes {
    /// Gaps with the given mean, in seconds.
    pub fn new(mean: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            mean: ensure_positive("mean_inter_arrival_secs", mean)?,
        })
    }

    pub(crate) fn new_unchecked(mean: f64) -> Self {
        Self { mean }
    }

    /// The mean gap.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample the next gap by inverting the exponential CDF.
    pub fn sample(&self, source: &mut (impl UniformSource + ?Sized)) -> f64 {
        let u = source.next_open01();
        -self.mean * (1.0 - u).ln()
    }
}

/// Poisson-like cart sizes, never smaller than one item.
///
/// Uses the classic multiplicative method, which costs one draw per item and loses precision as
/// the mean grows large. Fine for shopping carts.
#[derive(Debug, Clone, Copy)]
pub struct CartSizes {
    mean: f64,
    threshold: f64,
}

impl CartSizes {
    /// Cart sizes with the given mean number of items.
    pub fn new(mean: f64) -> Result<Self, ConfigError> {
        Ok(Self::new_unchecked(ensure_positive(
            "mean_items_per_cart",
            mean,
        )?))
    }

    pub(crate) fn new_unchecked(mean: f64) -> Self {
        Self {
            mean,
            threshold: (-mean).exp(),
        }
    }

    /// The configured mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample the number of items in the next cart.
    pub fn sample(&self, source: &mut (impl UniformSource + ?Sized)) -> u32 {
        let mut p = 1.0;
        let mut k: u32 = 0;

        loop {
            k += 1;
            p *= source.next_open01();
            if p <= self.threshold {
                break;
            }
        }

        (k - 1).max(1)
    }
}
