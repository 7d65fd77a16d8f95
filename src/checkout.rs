use std::{
    collections::VecDeque,
    fmt::{self, Display},
};

use crate::customer::CustomerId;

/// Identifies a checkout, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckoutId(pub(crate) usize);

impl CheckoutId {
    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }
}

impl Display for CheckoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A till with its own first-in, first-out queue.
#[derive(Debug, Clone)]
pub struct Checkout {
    id: CheckoutId,
    current: Option<CustomerId>,
    queue: VecDeque<CustomerId>,
    total_busy_time: f64,
}

impl Checkout {
    pub(crate) fn new(id: CheckoutId) -> Self {
        Self {
            id,
            current: None,
            queue: VecDeque::new(),
            total_busy_time: 0.0,
        }
    }

    /// The checkout's id.
    pub fn id(&self) -> CheckoutId {
        self.id
    }

    /// Whether somebody is being served.
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// The customer being served, if any.
    pub fn current_customer(&self) -> Option<CustomerId> {
        self.current
    }

    /// Customers waiting, front first. Excludes the one being served.
    pub fn queue(&self) -> impl ExactSizeIterator<Item = CustomerId> + '_ {
        self.queue.iter().copied()
    }

    /// Number of customers waiting, excluding the one being served.
    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    /// Customers at this checkout, including the one being served.
    ///
    /// This is what the load balancer compares.
    pub fn queue_length(&self) -> usize {
        self.queue.len() + usize::from(self.is_busy())
    }

    /// Total service time started at this checkout so far.
    pub fn total_busy_time(&self) -> f64 {
        self.total_busy_time
    }

    pub(crate) fn join(&mut self, customer: CustomerId) {
        self.queue.push_back(customer);
    }

    /// Take the next customer from the queue and mark the checkout busy with them.
    pub(crate) fn begin_next(&mut self) -> Option<CustomerId> {
        let next = self.queue.pop_front()?;
        self.current = Some(next);
        Some(next)
    }

    pub(crate) fn add_busy_time(&mut self, service_secs: f64) {
        self.total_busy_time += service_secs;
    }

    pub(crate) fn finish(&mut self) -> Option<CustomerId> {
        self.current.take()
    }
}

/// Join-the-shortest-queue: the checkout with the fewest customers, waiting or being served.
///
/// Ties go to the lowest id.
///
/// # Panics
///
/// If there are no checkouts.
pub fn shortest_queue(checkouts: &[Checkout]) -> CheckoutId {
    checkouts
        .iter()
        .min_by_key(|checkout| checkout.queue_length())
        .map(Checkout::id)
        .expect("there should always be at least one checkout")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkouts(n: usize) -> Vec<Checkout> {
        (1..=n).map(|id| Checkout::new(CheckoutId(id))).collect()
    }

    #[test]
    fn queue_length_counts_the_customer_in_service() {
        let mut checkout = Checkout::new(CheckoutId(1));
        checkout.join(CustomerId(1));
        checkout.join(CustomerId(2));
        assert_eq!(checkout.queue_length(), 2);

        assert_eq!(checkout.begin_next(), Some(CustomerId(1)));
        checkout.add_busy_time(23.0);

        assert!(checkout.is_busy());
        assert_eq!(checkout.waiting(), 1);
        assert_eq!(checkout.queue_length(), 2);
        assert_eq!(checkout.total_busy_time(), 23.0);
    }

    #[test]
    fn serves_in_fifo_order() {
        let mut checkout = Checkout::new(CheckoutId(1));
        for id in 1..=3 {
            checkout.join(CustomerId(id));
        }

        let mut served = vec![];
        while let Some(customer) = checkout.begin_next() {
            checkout.add_busy_time(1.0);
            served.push(customer);
            checkout.finish();
        }

        assert_eq!(served, vec![CustomerId(1), CustomerId(2), CustomerId(3)]);
        assert!(!checkout.is_busy());
        assert_eq!(checkout.total_busy_time(), 3.0);
    }

    #[test]
    fn begin_next_on_empty_queue_is_a_no_op() {
        let mut checkout = Checkout::new(CheckoutId(1));
        assert_eq!(checkout.begin_next(), None);
        assert!(!checkout.is_busy());
        assert_eq!(checkout.total_busy_time(), 0.0);
    }

    #[test]
    fn shortest_queue_prefers_lowest_id_on_ties() {
        let checkouts = checkouts(3);
        assert_eq!(shortest_queue(&checkouts), CheckoutId(1));
    }

    #[test]
    fn shortest_queue_counts_busy_checkouts() {
        let mut checkouts = checkouts(3);
        checkouts[0].join(CustomerId(1));
        checkouts[0].begin_next();
        checkouts[1].join(CustomerId(2));

        assert_eq!(shortest_queue(&checkouts), CheckoutId(3));

        checkouts[2].join(CustomerId(3));
        checkouts[0].finish();

        assert_eq!(shortest_queue(&checkouts), CheckoutId(1));
    }
}
