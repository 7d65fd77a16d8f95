use std::fmt::{self, Display};

use bon::bon;

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};

/// Time spent per customer, in simulated seconds.
///
/// A customer carrying `items` items spends `items * shopping_secs_per_item` in the aisles before
/// joining a queue, then `fixed_service_secs + items * secs_per_item` at the till.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceTimings {
    /// Time every customer spends at the till regardless of cart size.
    pub fixed_service_secs: f64,
    /// Additional till time for each item.
    pub secs_per_item: f64,
    /// Shopping time for each item, spent before joining a queue.
    pub shopping_secs_per_item: f64,
}

impl ServiceTimings {
    /// How long a customer with `items` items occupies a checkout.
    pub fn service_secs(&self, items: u32) -> f64 {
        self.fixed_service_secs + f64::from(items) * self.secs_per_item
    }

    /// How long a customer with `items` items shops before queueing.
    pub fn shopping_secs(&self, items: u32) -> f64 {
        f64::from(items) * self.shopping_secs_per_item
    }

    fn validate(self) -> Result<Self, ConfigError> {
        ensure_positive("fixed_service_secs", self.fixed_service_secs)?;
        ensure_non_negative("secs_per_item", self.secs_per_item)?;
        ensure_non_negative("shopping_secs_per_item", self.shopping_secs_per_item)?;
        Ok(self)
    }
}

impl Default for ServiceTimings {
    fn default() -> Self {
        Self {
            fixed_service_secs: 20.0,
            secs_per_item: 3.0,
            shopping_secs_per_item: 2.0,
        }
    }
}

/// A validated simulation configuration.
///
/// Built with [`SimulationConfig::builder()`], which rejects settings that would make the variate
/// generators ill-defined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct SimulationConfig {
    pub(crate) checkouts: usize,
    pub(crate) horizon_secs: f64,
    pub(crate) mean_inter_arrival_secs: f64,
    pub(crate) mean_items_per_cart: f64,
    pub(crate) timings: ServiceTimings,
}

#[bon]
impl SimulationConfig {
    #[allow(missing_docs)]
    #[builder]
    pub fn new(
        /// Number of checkouts, each with its own queue.
        #[builder(default = 4)]
        checkouts: usize,
        /// Simulated time after which no further events are processed.
        #[builder(default = 3600.0)]
        horizon_secs: f64,
        /// Mean of the exponentially distributed gap between arrivals.
        #[builder(default = 30.0)]
        mean_inter_arrival_secs: f64,
        /// Mean number of items in a cart.
        #[builder(default = 15.0)]
        mean_items_per_cart: f64,
        /// Per-customer service and shopping times.
        #[builder(default)]
        timings: ServiceTimings,
    ) -> Result<Self, ConfigError> {
        if checkouts == 0 {
            return Err(ConfigError::NoCheckouts);
        }

        Ok(Self {
            checkouts,
            horizon_secs: ensure_positive("horizon_secs", horizon_secs)?,
            mean_inter_arrival_secs: ensure_positive(
                "mean_inter_arrival_secs",
                mean_inter_arrival_secs,
            )?,
            mean_items_per_cart: ensure_positive("mean_items_per_cart", mean_items_per_cart)?,
            timings: timings.validate()?,
        })
    }

    /// Number of checkouts.
    pub fn checkouts(&self) -> usize {
        self.checkouts
    }

    /// Simulated cutoff time in seconds.
    pub fn horizon_secs(&self) -> f64 {
        self.horizon_secs
    }

    /// Mean gap between arrivals in seconds.
    pub fn mean_inter_arrival_secs(&self) -> f64 {
        self.mean_inter_arrival_secs
    }

    /// Mean cart size.
    pub fn mean_items_per_cart(&self) -> f64 {
        self.mean_items_per_cart
    }

    /// Per-customer timings.
    pub fn timings(&self) -> ServiceTimings {
        self.timings
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            checkouts: 4,
            horizon_secs: 3600.0,
            mean_inter_arrival_secs: 30.0,
            mean_items_per_cart: 15.0,
            timings: ServiceTimings::default(),
        }
    }
}

impl Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "checkouts: {}, horizon: {}s, mean inter-arrival: {}s, mean items: {}",
            self.checkouts, self.horizon_secs, self.mean_inter_arrival_secs, self.mean_items_per_cart
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let config = SimulationConfig::builder().build().unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn builder_rejects_zero_checkouts() {
        let err = SimulationConfig::builder().checkouts(0).build().unwrap_err();
        assert_eq!(err, ConfigError::NoCheckouts);
    }

    #[test]
    fn builder_rejects_non_positive_rates() {
        let err = SimulationConfig::builder()
            .mean_inter_arrival_secs(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "mean_inter_arrival_secs",
                ..
            }
        ));

        let err = SimulationConfig::builder()
            .horizon_secs(-60.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "horizon_secs", .. }));
    }

    #[test]
    fn builder_rejects_zero_fixed_service_time() {
        let timings = ServiceTimings {
            fixed_service_secs: 0.0,
            ..ServiceTimings::default()
        };
        let err = SimulationConfig::builder()
            .timings(timings)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "fixed_service_secs",
                ..
            }
        ));
    }

    #[test]
    fn timings_scale_with_items() {
        let timings = ServiceTimings::default();
        assert_eq!(timings.service_secs(1), 23.0);
        assert_eq!(timings.service_secs(10), 50.0);
        assert_eq!(timings.shopping_secs(10), 20.0);
    }

    #[test]
    fn display() {
        let config = SimulationConfig::default();
        assert_eq!(
            config.to_string(),
            "checkouts: 4, horizon: 3600s, mean inter-arrival: 30s, mean items: 15"
        );
    }
}
