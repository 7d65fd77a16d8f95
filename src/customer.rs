use std::fmt::{self, Display};

use crate::checkout::CheckoutId;

/// Identifies a customer. Assigned in arrival order starting from 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerId(pub(crate) usize);

impl CustomerId {
    /// Position of this customer in the engine's customer list.
    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a customer is at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerState {
    /// In the aisles, not yet queueing.
    Shopping,
    /// Waiting in a checkout queue.
    Waiting,
    /// Being served at a checkout.
    InService,
    /// Finished and gone.
    Departed,
}

/// One simulated customer.
///
/// Created with its full arrival schedule up front. The engine fills in the service times exactly
/// once, when the customer reaches the front of a queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub(crate) id: CustomerId,
    pub(crate) items: u32,
    pub(crate) arrival_time: f64,
    pub(crate) queue_entry_time: f64,
    pub(crate) service_start_time: Option<f64>,
    pub(crate) service_end_time: Option<f64>,
    pub(crate) checkout: Option<CheckoutId>,
}

impl Customer {
    pub(crate) fn new(id: CustomerId, items: u32, arrival_time: f64, shopping_secs: f64) -> Self {
        Self {
            id,
            items,
            arrival_time,
            queue_entry_time: arrival_time + shopping_secs,
            service_start_time: None,
            service_end_time: None,
            checkout: None,
        }
    }

    pub(crate) fn start_service(
        &mut self,
        checkout: CheckoutId,
        now: f64,
        service_secs: f64,
    ) -> f64 {
        assert!(
            self.service_start_time.is_none(),
            "customer {} served twice",
            self.id
        );
        let end = now + service_secs;
        self.service_start_time = Some(now);
        self.service_end_time = Some(end);
        self.checkout = Some(checkout);
        end
    }

    /// The customer's id.
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Number of items in the cart.
    pub fn items(&self) -> u32 {
        self.items
    }

    /// When the customer walked into the store.
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// When the customer finished shopping and became ready to queue.
    pub fn queue_entry_time(&self) -> f64 {
        self.queue_entry_time
    }

    /// When service started, if it has.
    pub fn service_start_time(&self) -> Option<f64> {
        self.service_start_time
    }

    /// When service ends (or is scheduled to end), if it has started.
    pub fn service_end_time(&self) -> Option<f64> {
        self.service_end_time
    }

    /// The checkout that served (or is serving) this customer.
    pub fn checkout(&self) -> Option<CheckoutId> {
        self.checkout
    }

    /// Time spent queueing before service. `None` until service starts.
    pub fn waiting_time(&self) -> Option<f64> {
        self.service_start_time.map(|start| start - self.queue_entry_time)
    }

    /// Time spent at the till. `None` until service starts.
    pub fn service_time(&self) -> Option<f64> {
        self.service_start_time
            .zip(self.service_end_time)
            .map(|(start, end)| end - start)
    }

    /// Whether service completed by `time`.
    pub fn served_by(&self, time: f64) -> bool {
        self.service_end_time.is_some_and(|end| end <= time)
    }

    /// Where the customer is at `time`, assuming the engine has advanced at least that far.
    pub fn state_at(&self, time: f64) -> CustomerState {
        match (self.service_start_time, self.service_end_time) {
            (_, Some(end)) if end <= time => CustomerState::Departed,
            (Some(start), _) if start <= time => CustomerState::InService,
            _ if self.queue_entry_time <= time => CustomerState::Waiting,
            _ => CustomerState::Shopping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer::new(CustomerId(1), 5, 10.0, 10.0)
    }

    #[test]
    fn queue_entry_follows_shopping() {
        let customer = customer();
        assert_eq!(customer.queue_entry_time(), 20.0);
        assert_eq!(customer.waiting_time(), None);
        assert_eq!(customer.service_time(), None);
    }

    #[test]
    fn derived_times_after_service_starts() {
        let mut customer = customer();

        let end = customer.start_service(CheckoutId(2), 32.0, 35.0);

        assert_eq!(end, 67.0);
        assert_eq!(customer.checkout(), Some(CheckoutId(2)));
        assert_eq!(customer.waiting_time(), Some(12.0));
        assert_eq!(customer.service_time(), Some(35.0));
        assert!(!customer.served_by(66.9));
        assert!(customer.served_by(67.0));
    }

    #[test]
    fn lifecycle_states() {
        let mut customer = customer();
        customer.start_service(CheckoutId(2), 32.0, 35.0);

        assert_eq!(customer.state_at(15.0), CustomerState::Shopping);
        assert_eq!(customer.state_at(25.0), CustomerState::Waiting);
        assert_eq!(customer.state_at(40.0), CustomerState::InService);
        assert_eq!(customer.state_at(67.0), CustomerState::Departed);
    }

    #[test]
    #[should_panic(expected = "served twice")]
    fn cannot_start_service_twice() {
        let mut customer = customer();
        customer.start_service(CheckoutId(2), 32.0, 35.0);
        customer.start_service(CheckoutId(1), 70.0, 35.0);
    }
}
