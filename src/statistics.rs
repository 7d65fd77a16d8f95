//! Queue-length sampling and end-of-run summary figures.

use crate::{
    checkout::{Checkout, CheckoutId},
    customer::Customer,
};

/// Queue-length samples, one per dispatched event.
///
/// Each sample is the number of customers waiting across all checkouts, not counting anyone being
/// served. The mean over samples is event-weighted: busy periods with many events count for more
/// than quiet ones. The time-weighted area is kept alongside for comparison.
#[derive(Debug, Clone, Default)]
pub struct QueueSamples {
    count: usize,
    sum: usize,
    max: usize,
    area: f64,
    last_time: f64,
}

impl QueueSamples {
    /// Record the number of waiting customers seen at `time`.
    ///
    /// Times must not decrease between calls.
    pub fn record(&mut self, time: f64, waiting: usize) {
        self.area += waiting as f64 * (time - self.last_time);
        self.last_time = time;

        self.count += 1;
        self.sum += waiting;
        self.max = self.max.max(waiting);
    }

    /// Number of samples taken.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The largest sample.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Mean of all samples, or zero if there are none.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    /// Mean queue length over `[0, until]`, assuming `waiting_now` customers wait from the last
    /// sample until then.
    pub fn time_weighted_mean(&self, until: f64, waiting_now: usize) -> f64 {
        let tail = waiting_now as f64 * (until - self.last_time).max(0.0);
        (self.area + tail) / until
    }
}

/// Summary figures for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Number of checkouts.
    pub checkouts: usize,
    /// The simulated cutoff.
    pub horizon_secs: f64,
    /// Customers who entered the store before the horizon.
    pub total_arrivals: usize,
    /// Customers whose service finished by the horizon.
    pub served: usize,
    /// Mean time served customers spent queueing. `None` if nobody was served.
    pub average_wait_secs: Option<f64>,
    /// Mean time served customers spent at the till. `None` if nobody was served.
    pub average_service_secs: Option<f64>,
    /// Event-weighted mean of the number of waiting customers.
    pub average_queue_length: f64,
    /// Time-weighted mean of the number of waiting customers.
    pub time_weighted_queue_length: f64,
    /// Largest number of waiting customers seen at any event.
    pub max_queue_length: usize,
    /// Busy time across all checkouts as a percentage of the time available.
    pub overall_utilization: f64,
    /// Per-checkout busy time, in id order.
    pub per_checkout: Vec<CheckoutUtilization>,
}

/// How busy one checkout was.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutUtilization {
    /// Which checkout.
    pub id: CheckoutId,
    /// Service time started at this checkout.
    pub busy_secs: f64,
    /// `busy_secs` as a percentage of the horizon.
    pub utilization: f64,
}

impl Statistics {
    /// Summarise a finished run.
    ///
    /// Busy time counts every service that started, including any still running at the horizon.
    pub fn compute(
        customers: &[Customer],
        checkouts: &[Checkout],
        samples: &QueueSamples,
        horizon_secs: f64,
    ) -> Self {
        let served: Vec<&Customer> = customers
            .iter()
            .filter(|customer| customer.served_by(horizon_secs))
            .collect();

        let average_wait_secs = mean(served.iter().filter_map(|c| c.waiting_time()));
        let average_service_secs = mean(served.iter().filter_map(|c| c.service_time()));

        let per_checkout: Vec<_> = checkouts
            .iter()
            .map(|checkout| CheckoutUtilization {
                id: checkout.id(),
                busy_secs: checkout.total_busy_time(),
                utilization: checkout.total_busy_time() / horizon_secs * 100.0,
            })
            .collect();

        let total_busy: f64 = checkouts.iter().map(Checkout::total_busy_time).sum();
        let overall_utilization = total_busy / (checkouts.len() as f64 * horizon_secs) * 100.0;

        let waiting_now = checkouts.iter().map(Checkout::waiting).sum();

        Self {
            checkouts: checkouts.len(),
            horizon_secs,
            total_arrivals: customers.len(),
            served: served.len(),
            average_wait_secs,
            average_service_secs,
            average_queue_length: samples.mean(),
            time_weighted_queue_length: samples.time_weighted_mean(horizon_secs, waiting_now),
            max_queue_length: samples.max(),
            overall_utilization,
            per_checkout,
        }
    }

    /// Customers who arrived but were not served by the horizon.
    pub fn unserved(&self) -> usize {
        self.total_arrivals - self.served
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (count, sum) = values.fold((0usize, 0.0), |(count, sum), v| (count + 1, sum + v));
    (count > 0).then(|| sum / count as f64)
}
