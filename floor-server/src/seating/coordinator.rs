//! SeatingCoordinator - admission, allocation and release-on-payment
//!
//! # Patron lifecycle
//!
//! ```text
//! admit_patron ──► QUEUED_UNASSIGNED
//!                     │ sweep (waiter / table)
//!                     ▼
//!                  PARTIALLY_ASSIGNED ──► FULLY_ASSIGNED
//!                                             │ attach_order
//!                                             ▼
//!                                         ORDER_PLACED
//!                                             │ on_order_paid
//!                                             ▼
//!                                   released, removed from queue
//! ```
//!
//! All state (waiter ring, table pools, both queues) sits behind one mutex.
//! Every public method takes the lock once and runs to completion, so an
//! admission check and the enqueue it leads to, or a release and the re-sweep
//! that follows, never interleave with another caller.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use shared::models::{
    DineInAvailability, OrderId, PatronId, PatronView, PendingCounts, QueueCounts,
    ReleaseSummary, ServiceKind, TableStatus, TableView, WaiterView,
};

use super::error::{AdmissionError, SeatingError, SeatingResult};
use super::queue::{Patron, PatronQueue};
use super::tables::{TableDefinition, TableRegistry};
use super::waiters::{WaiterProfile, WaiterRegistry};

#[derive(Debug)]
struct FloorState {
    waiters: WaiterRegistry,
    tables: TableRegistry,
    dine_in: PatronQueue,
    takeout: PatronQueue,
    next_patron_id: PatronId,
}

impl FloorState {
    fn new(roster: Vec<WaiterProfile>, layout: Vec<TableDefinition>) -> Self {
        Self {
            waiters: WaiterRegistry::new(roster),
            tables: TableRegistry::new(layout),
            dine_in: PatronQueue::new(ServiceKind::DineIn),
            takeout: PatronQueue::new(ServiceKind::Takeout),
            next_patron_id: 1,
        }
    }

    fn queue_mut(&mut self, kind: ServiceKind) -> &mut PatronQueue {
        match kind {
            ServiceKind::DineIn => &mut self.dine_in,
            ServiceKind::Takeout => &mut self.takeout,
        }
    }

    fn find(&self, id: PatronId) -> Option<&Patron> {
        self.dine_in.get(id).or_else(|| self.takeout.get(id))
    }

    fn find_mut(&mut self, id: PatronId) -> Option<&mut Patron> {
        match self.dine_in.get_mut(id) {
            Some(patron) => Some(patron),
            None => self.takeout.get_mut(id),
        }
    }

    /// Dine-in queue first, then takeout
    fn patrons(&self) -> impl Iterator<Item = &Patron> {
        self.dine_in.snapshot().chain(self.takeout.snapshot())
    }

    fn view(&self, patron: &Patron) -> PatronView {
        let waiter = patron.waiter().and_then(|id| self.waiters.get(id));
        PatronView {
            id: patron.id(),
            party_size: patron.party_size(),
            service_kind: patron.service_kind(),
            state: patron.state(),
            table_number: patron.table(),
            waiter_staff_id: patron.waiter().map(str::to_string),
            waiter_name: waiter.map(|w| w.name().to_string()),
            order_id: patron.order(),
        }
    }

    fn sweep(&mut self, kind: ServiceKind) -> Vec<PatronId> {
        match kind {
            ServiceKind::DineIn => self.sweep_dine_in(),
            ServiceKind::Takeout => self.sweep_takeout(),
        }
    }

    /// Give waiters and tables to unassigned dine-in patrons, earliest first
    fn sweep_dine_in(&mut self) -> Vec<PatronId> {
        let FloorState {
            waiters,
            tables,
            dine_in,
            ..
        } = self;
        let mut progressed = Vec::new();

        dine_in.sweep_unassigned(|patron| {
            let mut changed = false;

            if patron.needs_waiter()
                && let Some(waiter) = waiters.allocate_for_dine_in()
            {
                patron.assign_waiter(waiter.staff_id());
                changed = true;
            }

            if patron.needs_table()
                && let Some(number) = tables.find_available(patron.party_size())
            {
                match tables.assign(number, patron.id()) {
                    Ok(()) => {
                        patron.assign_table(number);
                        changed = true;
                    }
                    Err(e) => tracing::error!(error = %e, "Pooled table could not be assigned"),
                }
            }

            if changed {
                tracing::debug!(
                    patron_id = patron.id(),
                    waiter = ?patron.waiter(),
                    table = ?patron.table(),
                    "Dine-in patron assigned"
                );
                progressed.push(patron.id());
            }
        });

        progressed
    }

    fn sweep_takeout(&mut self) -> Vec<PatronId> {
        let FloorState {
            waiters, takeout, ..
        } = self;
        let mut progressed = Vec::new();

        takeout.sweep_unassigned(|patron| {
            if let Some(waiter) = waiters.allocate_for_takeout() {
                patron.assign_waiter(waiter.staff_id());
                tracing::debug!(
                    patron_id = patron.id(),
                    waiter = waiter.staff_id(),
                    "Takeout patron assigned"
                );
                progressed.push(patron.id());
            }
        });

        progressed
    }
}

/// Front-of-house seating engine
#[derive(Debug)]
pub struct SeatingCoordinator {
    floor: Mutex<FloorState>,
}

impl SeatingCoordinator {
    pub fn new(roster: Vec<WaiterProfile>, layout: Vec<TableDefinition>) -> Self {
        tracing::info!(
            waiters = roster.len(),
            tables = layout.len(),
            "Seating coordinator initialized"
        );
        Self {
            floor: Mutex::new(FloorState::new(roster, layout)),
        }
    }

    /// Replace roster and layout and drop every queued patron
    ///
    /// Patron ids keep counting so they stay unique for the process lifetime.
    pub fn initialize(&self, roster: Vec<WaiterProfile>, layout: Vec<TableDefinition>) {
        let mut floor = self.floor.lock();
        let next_patron_id = floor.next_patron_id;
        *floor = FloorState::new(roster, layout);
        floor.next_patron_id = next_patron_id;
    }

    /// Admit a patron and try to serve it straight away
    ///
    /// Dine-in parties are refused, with no state created, unless a waiter is
    /// below the cap and a table class fits the party. Takeout is always admitted
    /// as a party of one. A dine-in party size of 0 counts as 1.
    pub fn admit_patron(
        &self,
        kind: ServiceKind,
        party_size: u32,
    ) -> Result<PatronId, AdmissionError> {
        let party_size = match kind {
            ServiceKind::Takeout => 1,
            ServiceKind::DineIn => party_size.max(1),
        };

        let mut floor = self.floor.lock();

        if kind.is_dine_in() {
            if !floor.waiters.has_dine_in_capacity() {
                tracing::info!(party_size, "Dine-in refused: every waiter is at the cap");
                return Err(AdmissionError::NoWaiters);
            }
            if !floor.tables.has_capacity_for(party_size) {
                tracing::info!(party_size, "Dine-in refused: no table fits the party");
                return Err(AdmissionError::NoTables {
                    party_size,
                    largest_table: floor.tables.largest_capacity(),
                });
            }
        }

        let id = floor.next_patron_id;
        floor.next_patron_id += 1;
        floor
            .queue_mut(kind)
            .enqueue(Patron::new(id, party_size, kind));
        let assigned = floor.sweep(kind);

        tracing::info!(
            patron_id = id,
            service_kind = ?kind,
            party_size,
            assigned = assigned.len(),
            "Patron admitted"
        );
        Ok(id)
    }

    pub fn get_patron(&self, id: PatronId) -> Option<PatronView> {
        let floor = self.floor.lock();
        floor.find(id).map(|patron| floor.view(patron))
    }

    /// Queued patrons matching `predicate`, dine-in queue first, each in queue order
    pub fn list_queued<F>(&self, predicate: F) -> Vec<PatronView>
    where
        F: Fn(&PatronView) -> bool,
    {
        let floor = self.floor.lock();
        floor
            .patrons()
            .map(|patron| floor.view(patron))
            .filter(|view| predicate(view))
            .collect()
    }

    /// Queue members that have not placed an order yet
    pub fn queue_counts(&self) -> QueueCounts {
        let floor = self.floor.lock();
        let waiting = |queue: &PatronQueue| queue.snapshot().filter(|p| p.order().is_none()).count();
        QueueCounts {
            dine_in_queued: waiting(&floor.dine_in),
            takeout_queued: waiting(&floor.takeout),
        }
    }

    /// Orders placed and not yet paid, per service kind
    pub fn pending_counts(&self) -> PendingCounts {
        let floor = self.floor.lock();
        let pending = |queue: &PatronQueue| queue.snapshot().filter(|p| p.order().is_some()).count();
        PendingCounts {
            dine_in_pending: pending(&floor.dine_in),
            takeout_pending: pending(&floor.takeout),
        }
    }

    /// What `admit_patron` would say for a dine-in party right now
    pub fn dine_in_availability(&self, party_size: u32) -> DineInAvailability {
        let party_size = party_size.max(1);
        let floor = self.floor.lock();
        let waiters_available = floor.waiters.has_dine_in_capacity();
        let table_capacity = floor.tables.next_available_capacity(party_size);
        let tables_available = table_capacity.is_some();
        let can_accept = waiters_available && tables_available;

        let message = match (waiters_available, tables_available) {
            (true, true) => "Restaurant can accept your booking".to_string(),
            (false, false) => format!(
                "Restaurant fully booked - no waiters and no tables for group of {}. Please order takeout.",
                party_size
            ),
            (false, true) => {
                "Restaurant fully booked - no waiters for dine-in. Please order takeout.".to_string()
            }
            (true, false) => format!(
                "Restaurant fully booked - no tables for group of {}. Please order takeout.",
                party_size
            ),
        };

        DineInAvailability {
            can_accept,
            waiters_available,
            tables_available,
            table_capacity,
            message,
        }
    }

    /// Record that `patron_id` placed `order_id`
    ///
    /// The patron must hold everything its service kind needs and must not
    /// already have an order. Resource assignment is unchanged.
    pub fn attach_order(&self, patron_id: PatronId, order_id: OrderId) -> SeatingResult<PatronView> {
        let mut floor = self.floor.lock();
        let patron = floor
            .find_mut(patron_id)
            .ok_or(SeatingError::PatronNotFound(patron_id))?;

        if patron.order().is_some() {
            return Err(SeatingError::OrderAlreadyAttached(patron_id));
        }
        if patron.is_unassigned() {
            return Err(SeatingError::NotSeated(patron_id));
        }
        patron.attach_order(order_id);

        let patron = floor
            .find(patron_id)
            .ok_or(SeatingError::PatronNotFound(patron_id))?;
        Ok(floor.view(patron))
    }

    /// Settle a patron: free its waiter slot and table, credit the sale, drop it from its queue
    ///
    /// A freed dine-in slot or table is offered to the next unassigned dine-in
    /// patrons straight away. An unknown or already released patron is a no-op
    /// and yields `None`, so a retried payment cannot release twice.
    pub fn on_order_paid(&self, patron_id: PatronId, order_total: Decimal) -> Option<ReleaseSummary> {
        let mut floor = self.floor.lock();

        let Some(kind) = floor.find(patron_id).map(Patron::service_kind) else {
            tracing::warn!(patron_id, "Payment for unknown or released patron ignored");
            return None;
        };
        let patron = floor.queue_mut(kind).remove_by_id(patron_id)?;
        let is_dine_in = kind.is_dine_in();

        if is_dine_in
            && let Some(staff_id) = patron.waiter()
            && !floor.waiters.release(staff_id)
        {
            tracing::warn!(patron_id, staff_id, "Waiter had no dine-in slot to release");
        }

        if let Some(number) = patron.table()
            && let Err(e) = floor.tables.release(number)
        {
            tracing::error!(patron_id, table = number, error = %e, "Table release failed");
        }

        if let Some(staff_id) = patron.waiter() {
            floor.waiters.record_sale(staff_id, order_total, is_dine_in);
        }

        let backfilled = if is_dine_in {
            floor.sweep_dine_in()
        } else {
            Vec::new()
        };

        tracing::info!(
            patron_id,
            service_kind = ?kind,
            total = %order_total,
            waiter = ?patron.waiter(),
            table = ?patron.table(),
            backfilled = backfilled.len(),
            "Patron released after payment"
        );

        Some(ReleaseSummary {
            patron_id,
            waiter_staff_id: patron.waiter().map(str::to_string),
            table_number: patron.table(),
            backfilled,
        })
    }

    pub fn waiter_snapshot(&self) -> Vec<WaiterView> {
        self.floor.lock().waiters.snapshot()
    }

    pub fn table_snapshot(&self) -> Vec<TableView> {
        self.floor.lock().tables.snapshot()
    }

    pub fn table_status(&self) -> TableStatus {
        self.floor.lock().tables.status()
    }

    /// Free tables per capacity class
    pub fn available_table_counts(&self) -> BTreeMap<u32, usize> {
        self.floor.lock().tables.available_counts()
    }
}
