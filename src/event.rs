use crate::{checkout::CheckoutId, customer::CustomerId};

/// Something that will happen at a given simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// When it happens. The only ordering key.
    pub time: f64,
    /// What happens.
    pub kind: EventKind,
}

/// The kinds of state change the engine handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A customer has finished shopping and joins a queue.
    Arrival(CustomerId),
    /// A checkout finishes serving its current customer.
    ServiceComplete(CheckoutId),
}

impl Event {
    pub(crate) fn arrival(time: f64, customer: CustomerId) -> Self {
        Self {
            time,
            kind: EventKind::Arrival(customer),
        }
    }

    pub(crate) fn service_complete(time: f64, checkout: CheckoutId) -> Self {
        Self {
            time,
            kind: EventKind::ServiceComplete(checkout),
        }
    }
}
