//! Human-readable summaries of simulation results.

use std::fmt::{self, Display};

use crate::{config::SimulationConfig, statistics::Statistics};

/// Formats the configuration and results of a run for the console.
///
/// Waiting times are shown in minutes, queue lengths to two decimal places and utilization to one.
pub struct SimulationReporter<'a> {
    statistics: &'a Statistics,
    config: Option<&'a SimulationConfig>,
}

impl<'a> SimulationReporter<'a> {
    /// Report on `statistics` alone.
    pub fn new(statistics: &'a Statistics) -> Self {
        Self {
            statistics,
            config: None,
        }
    }

    /// Also print the configuration the run used.
    pub fn with_config(self, config: &'a SimulationConfig) -> Self {
        Self {
            config: Some(config),
            ..self
        }
    }

    /// Print the report to stdout.
    pub fn print_summary(&self) {
        print!("{self}");
    }
}

impl Display for SimulationReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(config) = self.config {
            writeln!(f, "=== Configuration ===")?;
            writeln!(f, "Checkouts:                 {}", config.checkouts())?;
            writeln!(
                f,
                "Simulation duration:       {} minutes",
                config.horizon_secs() / 60.0
            )?;
            writeln!(
                f,
                "Mean arrival interval:     {} seconds",
                config.mean_inter_arrival_secs()
            )?;
            writeln!(f, "Mean items in cart:        {}", config.mean_items_per_cart())?;
            writeln!(f)?;
        }

        let stats = self.statistics;

        writeln!(f, "=== Simulation Results ===")?;
        writeln!(f, "Total customers arrived: {}", stats.total_arrivals)?;
        writeln!(f, "Customers served: {}", stats.served)?;
        writeln!(f, "Number of checkouts: {}", stats.checkouts)?;

        match (stats.average_wait_secs, stats.average_service_secs) {
            (Some(wait), Some(service)) => {
                writeln!(f, "Average waiting time: {:.2} minutes", wait / 60.0)?;
                writeln!(f, "Average service time: {:.2} minutes", service / 60.0)?;
            }
            _ => writeln!(f, "Average waiting time: no customers were served")?,
        }

        writeln!(f, "Average queue length: {:.2}", stats.average_queue_length)?;
        writeln!(
            f,
            "Average queue length (time-weighted): {:.2}",
            stats.time_weighted_queue_length
        )?;
        writeln!(f, "Maximum queue length: {}", stats.max_queue_length)?;
        writeln!(f, "Checkout utilization: {:.1}%", stats.overall_utilization)?;

        writeln!(f)?;
        writeln!(f, "Per-checkout statistics:")?;
        for checkout in &stats.per_checkout {
            writeln!(
                f,
                "  Checkout {}: {:.1}% utilization",
                checkout.id, checkout.utilization
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{checkout::CheckoutId, statistics::CheckoutUtilization};

    fn statistics() -> Statistics {
        Statistics {
            checkouts: 2,
            horizon_secs: 3600.0,
            total_arrivals: 120,
            served: 118,
            average_wait_secs: Some(90.0),
            average_service_secs: Some(65.0),
            average_queue_length: 1.234,
            time_weighted_queue_length: 0.9,
            max_queue_length: 7,
            overall_utilization: 60.04,
            per_checkout: vec![
                CheckoutUtilization {
                    id: CheckoutId(1),
                    busy_secs: 2520.0,
                    utilization: 70.0,
                },
                CheckoutUtilization {
                    id: CheckoutId(2),
                    busy_secs: 1803.0,
                    utilization: 50.08,
                },
            ],
        }
    }

    #[test]
    fn formats_results() {
        let stats = statistics();
        let report = SimulationReporter::new(&stats).to_string();

        assert!(report.contains("Total customers arrived: 120\n"));
        assert!(report.contains("Customers served: 118\n"));
        assert!(report.contains("Average waiting time: 1.50 minutes\n"));
        assert!(report.contains("Average queue length: 1.23\n"));
        assert!(report.contains("Maximum queue length: 7\n"));
        assert!(report.contains("Checkout utilization: 60.0%\n"));
        assert!(report.contains("  Checkout 1: 70.0% utilization\n"));
        assert!(report.contains("  Checkout 2: 50.1% utilization\n"));
        assert!(!report.contains("Configuration"));
    }

    #[test]
    fn reports_when_nobody_was_served() {
        let stats = Statistics {
            served: 0,
            average_wait_secs: None,
            average_service_secs: None,
            ..statistics()
        };
        let report = SimulationReporter::new(&stats).to_string();

        assert!(report.contains("Average waiting time: no customers were served\n"));
        assert!(!report.contains("Average service time"));
    }

    #[test]
    fn includes_configuration() {
        let stats = statistics();
        let config = SimulationConfig::default();
        let report = SimulationReporter::new(&stats).with_config(&config).to_string();

        assert!(report.starts_with("=== Configuration ===\n"));
        assert!(report.contains("Simulation duration:       60 minutes\n"));
    }
}
