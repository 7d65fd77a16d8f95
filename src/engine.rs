//! The event loop.

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, span, trace, Level};

use crate::{
    checkout::{shortest_queue, Checkout, CheckoutId},
    config::SimulationConfig,
    customer::{Customer, CustomerId},
    error::SimulationError,
    event::{Event, EventKind},
    event_queue::EventQueue,
    statistics::{QueueSamples, Statistics},
    variates::{CartSizes, InterArrivalTimes, UniformSource},
};

/// What happened when an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    /// Simulated time of the event.
    pub time: f64,
    /// The event that was handled.
    pub kind: EventKind,
    /// The checkout the event affected: the one chosen on arrival, or the one that finished.
    pub checkout: CheckoutId,
    /// The customer whose service finished, for service completions.
    pub finished: Option<CustomerId>,
    /// The customer whose service started as a result, if any.
    pub started: Option<CustomerId>,
}

/// A discrete-event simulation of customers queueing at checkouts.
///
/// The whole arrival stream is generated up front, so arrivals never depend on how congested the
/// store is. Only queueing and service react to the state of the checkouts.
///
/// A simulation runs once. Its customers, checkouts and statistics stay available afterwards.
#[derive(Debug)]
pub struct Simulation<S = StdRng> {
    config: SimulationConfig,
    source: S,
    inter_arrivals: InterArrivalTimes,
    cart_sizes: CartSizes,

    clock: f64,
    events: EventQueue,
    customers: Vec<Customer>,
    checkouts: Vec<Checkout>,
    samples: QueueSamples,

    events_processed: usize,
    has_run: bool,
}

impl Simulation<StdRng> {
    /// Create a simulation driven by a [`StdRng`], seeded for reproducibility if `seed` is given.
    pub fn from_seed(config: SimulationConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, rng)
    }
}

impl<S: UniformSource> Simulation<S> {
    /// Create a simulation drawing its randomness from `source`.
    pub fn new(config: SimulationConfig, source: S) -> Self {
        let checkouts = (1..=config.checkouts)
            .map(|id| Checkout::new(CheckoutId(id)))
            .collect();

        Self {
            inter_arrivals: InterArrivalTimes::new_unchecked(config.mean_inter_arrival_secs),
            cart_sizes: CartSizes::new_unchecked(config.mean_items_per_cart),
            config,
            source,
            clock: 0.0,
            events: EventQueue::new(),
            customers: Vec::new(),
            checkouts,
            samples: QueueSamples::default(),
            events_processed: 0,
            has_run: false,
        }
    }

    /// Run until no events remain or the next one lies beyond the horizon.
    pub fn run(&mut self) -> Result<Statistics, SimulationError> {
        self.run_observed(|_, _| {})
    }

    /// Like [`run()`](Self::run), calling `observe` after every dispatched event.
    pub fn run_observed<F>(&mut self, mut observe: F) -> Result<Statistics, SimulationError>
    where
        F: FnMut(&Self, &Dispatch),
    {
        if self.has_run {
            return Err(SimulationError::AlreadyRun);
        }
        self.has_run = true;

        let horizon = self.config.horizon_secs;
        let span = span!(Level::INFO, "simulation",
            checkouts = self.config.checkouts,
            horizon_secs = horizon
        );
        let _enter = span.enter();

        let arrivals = self.generate_arrivals(0.0);
        info!(arrivals, "Generated arrival stream");

        let mut discarded = 0;
        while let Some(event) = self.events.pop() {
            if event.time > horizon {
                discarded = self.events.len() + 1;
                break;
            }

            self.clock = event.time;
            self.samples.record(self.clock, self.waiting());

            let dispatch = match event.kind {
                EventKind::Arrival(customer) => self.handle_arrival(customer),
                EventKind::ServiceComplete(checkout) => self.handle_service_complete(checkout),
            };
            self.events_processed += 1;

            debug!(
                time = dispatch.time,
                kind = ?dispatch.kind,
                checkout = %dispatch.checkout,
                started = ?dispatch.started,
                "Dispatched event"
            );

            observe(self, &dispatch);
        }

        let statistics = self.statistics();
        info!(
            events = self.events_processed,
            discarded,
            served = statistics.served,
            "Simulation finished"
        );

        Ok(statistics)
    }

    /// Generate every arrival from `from` until the horizon, scheduling each customer's move
    /// into the queues once they have finished shopping.
    fn generate_arrivals(&mut self, from: f64) -> usize {
        let timings = self.config.timings;
        let mut time = from;
        let mut generated = 0;

        loop {
            let arrival_time = time + self.inter_arrivals.sample(&mut self.source);
            if arrival_time > self.config.horizon_secs {
                break;
            }

            let items = self.cart_sizes.sample(&mut self.source);
            let id = CustomerId(self.customers.len() + 1);
            let customer = Customer::new(id, items, arrival_time, timings.shopping_secs(items));

            trace!(customer = %id, items, arrival_time, "Scheduling arrival");
            self.events.push(Event::arrival(customer.queue_entry_time, id));
            self.customers.push(customer);

            generated += 1;
            time = arrival_time;
        }

        generated
    }

    fn handle_arrival(&mut self, customer: CustomerId) -> Dispatch {
        let checkout = shortest_queue(&self.checkouts);
        let chosen = &mut self.checkouts[checkout.index()];
        chosen.join(customer);

        let started = if chosen.is_busy() {
            None
        } else {
            self.start_service(checkout)
        };

        Dispatch {
            time: self.clock,
            kind: EventKind::Arrival(customer),
            checkout,
            finished: None,
            started,
        }
    }

    fn handle_service_complete(&mut self, checkout: CheckoutId) -> Dispatch {
        let finished = self.checkouts[checkout.index()].finish();
        let started = self.start_service(checkout);

        Dispatch {
            time: self.clock,
            kind: EventKind::ServiceComplete(checkout),
            checkout,
            finished,
            started,
        }
    }

    /// Serve the next customer in this checkout's queue, if there is one.
    fn start_service(&mut self, checkout: CheckoutId) -> Option<CustomerId> {
        let id = self.checkouts[checkout.index()].begin_next()?;

        let customer = &mut self.customers[id.index()];
        let service_secs = self.config.timings.service_secs(customer.items);
        let end = customer.start_service(checkout, self.clock, service_secs);

        self.checkouts[checkout.index()].add_busy_time(service_secs);
        self.events.push(Event::service_complete(end, checkout));

        trace!(customer = %id, checkout = %checkout, end, "Started service");
        Some(id)
    }

    /// Summary figures for the run so far.
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(
            &self.customers,
            &self.checkouts,
            &self.samples,
            self.config.horizon_secs,
        )
    }

    /// The configuration this simulation runs with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Time of the last dispatched event.
    pub fn current_time(&self) -> f64 {
        self.clock
    }

    /// Every customer generated, in arrival order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up a customer.
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        id.0.checked_sub(1).and_then(|index| self.customers.get(index))
    }

    /// The checkouts, in id order.
    pub fn checkouts(&self) -> &[Checkout] {
        &self.checkouts
    }

    /// Customers waiting across all checkouts, not counting those being served.
    pub fn waiting(&self) -> usize {
        self.checkouts.iter().map(Checkout::waiting).sum()
    }

    /// Customers at any checkout, waiting or being served.
    pub fn in_system(&self) -> usize {
        self.checkouts.iter().map(Checkout::queue_length).sum()
    }

    /// Events scheduled but not yet dispatched.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Events dispatched so far.
    pub fn events_processed(&self) -> usize {
        self.events_processed
    }
}
