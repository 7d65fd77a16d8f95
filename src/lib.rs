//! Simulate customers queueing at store checkouts.
//!
//! Customers walk in at exponentially distributed intervals, shop for a while depending on how
//! many items they pick up, then join whichever checkout has the fewest customers. Each checkout
//! serves its own queue in order. The simulation runs on a virtual clock up to a fixed horizon and
//! reports waiting times, queue lengths and how busy the checkouts were.
//!
//! ```
//! use checkout_sim::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .checkouts(3)
//!     .horizon_secs(3600.0)
//!     .mean_inter_arrival_secs(30.0)
//!     .mean_items_per_cart(15.0)
//!     .build()
//!     .unwrap();
//!
//! let mut simulation = Simulation::from_seed(config, Some(42));
//! let statistics = simulation.run().unwrap();
//!
//! assert!(statistics.served <= statistics.total_arrivals);
//! ```

#![deny(missing_docs)]

mod checkout;
mod config;
mod customer;
mod engine;
pub mod error;
mod event;
mod event_queue;
mod report;
mod statistics;
mod variates;

pub use checkout::{shortest_queue, Checkout, CheckoutId};
pub use config::{ServiceTimings, SimulationConfig};
pub use customer::{Customer, CustomerId, CustomerState};
pub use engine::{Dispatch, Simulation};
pub use error::{ConfigError, SimulationError};
pub use event::{Event, EventKind};
pub use event_queue::EventQueue;
pub use report::SimulationReporter;
pub use statistics::{CheckoutUtilization, QueueSamples, Statistics};
pub use variates::{CartSizes, FixedDraws, InterArrivalTimes, UniformSource};
