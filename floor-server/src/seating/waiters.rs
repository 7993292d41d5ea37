//! Waiter ring - round-robin allocation with a dine-in cap
//!
//! The ring is a fixed `Vec` plus a cursor. Every allocation starts at the
//! cursor and leaves it on the successor of the chosen waiter, so repeated
//! calls spread parties evenly across the roster.

use rust_decimal::Decimal;
use shared::models::WaiterView;
use std::collections::HashMap;

/// Maximum concurrent unpaid dine-in parties per waiter
pub const MAX_DINE_IN_LOAD: u32 = 4;

/// Commission on lifetime sales: 0.15
pub const COMMISSION_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Roster entry used to build the ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterProfile {
    pub staff_id: String,
    pub name: String,
}

impl WaiterProfile {
    pub fn new(staff_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Waiter {
    staff_id: String,
    name: String,
    dine_in_load: u32,
    dine_in_served: u32,
    takeout_served: u32,
    total_sales: Decimal,
    total_commission: Decimal,
}

impl Waiter {
    fn new(profile: WaiterProfile) -> Self {
        Self {
            staff_id: profile.staff_id,
            name: profile.name,
            dine_in_load: 0,
            dine_in_served: 0,
            takeout_served: 0,
            total_sales: Decimal::ZERO,
            total_commission: Decimal::ZERO,
        }
    }

    pub fn staff_id(&self) -> &str {
        &self.staff_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dine_in_load(&self) -> u32 {
        self.dine_in_load
    }

    pub fn total_sales(&self) -> Decimal {
        self.total_sales
    }

    pub fn total_commission(&self) -> Decimal {
        self.total_commission
    }

    pub fn is_available_for_dine_in(&self) -> bool {
        self.dine_in_load < MAX_DINE_IN_LOAD
    }

    pub fn to_view(&self) -> WaiterView {
        WaiterView {
            staff_id: self.staff_id.clone(),
            name: self.name.clone(),
            dine_in_load: self.dine_in_load,
            dine_in_served: self.dine_in_served,
            takeout_served: self.takeout_served,
            total_sales: self.total_sales,
            total_commission: self.total_commission,
            available: self.is_available_for_dine_in(),
        }
    }
}

/// Fixed roster of waiters in ring order
#[derive(Debug, Default)]
pub struct WaiterRegistry {
    ring: Vec<Waiter>,
    /// staff_id -> position in `ring`
    index: HashMap<String, usize>,
    cursor: usize,
}

impl WaiterRegistry {
    pub fn new(roster: impl IntoIterator<Item = WaiterProfile>) -> Self {
        let mut registry = Self::default();
        registry.initialize(roster);
        registry
    }

    /// Replace the ring with exactly `roster`, counters zeroed, cursor on the first waiter
    ///
    /// A repeated staff id keeps its first position; later duplicates are dropped.
    pub fn initialize(&mut self, roster: impl IntoIterator<Item = WaiterProfile>) {
        self.ring.clear();
        self.index.clear();
        self.cursor = 0;

        for profile in roster {
            if self.index.contains_key(&profile.staff_id) {
                tracing::warn!(staff_id = %profile.staff_id, "Duplicate staff id in roster, skipped");
                continue;
            }
            self.index.insert(profile.staff_id.clone(), self.ring.len());
            self.ring.push(Waiter::new(profile));
        }
    }

    /// Next waiter below the dine-in cap, scanning at most one lap from the cursor
    ///
    /// On success the waiter's load is incremented and the cursor moves to its
    /// successor. When everyone is at the cap the cursor is left untouched.
    pub fn allocate_for_dine_in(&mut self) -> Option<&Waiter> {
        let len = self.ring.len();
        let chosen = (0..len)
            .map(|step| (self.cursor + step) % len)
            .find(|&idx| self.ring[idx].is_available_for_dine_in())?;

        self.ring[chosen].dine_in_load += 1;
        self.cursor = (chosen + 1) % len;
        Some(&self.ring[chosen])
    }

    /// Waiter at the cursor; takeout has no cap
    pub fn allocate_for_takeout(&mut self) -> Option<&Waiter> {
        if self.ring.is_empty() {
            return None;
        }
        let chosen = self.cursor;
        self.cursor = (chosen + 1) % self.ring.len();
        Some(&self.ring[chosen])
    }

    /// Hand back one dine-in slot, floored at zero
    ///
    /// Returns `false` for an unknown staff id or a waiter with no load, both no-ops.
    pub fn release(&mut self, staff_id: &str) -> bool {
        match self.get_mut(staff_id) {
            Some(waiter) if waiter.dine_in_load > 0 => {
                waiter.dine_in_load -= 1;
                true
            }
            _ => false,
        }
    }

    /// Add a settled order to the waiter's lifetime figures
    pub fn record_sale(&mut self, staff_id: &str, amount: Decimal, is_dine_in: bool) -> bool {
        let Some(waiter) = self.get_mut(staff_id) else {
            return false;
        };

        waiter.total_sales += amount;
        waiter.total_commission = waiter.total_sales * COMMISSION_RATE;
        if is_dine_in {
            waiter.dine_in_served += 1;
        } else {
            waiter.takeout_served += 1;
        }
        true
    }

    pub fn has_dine_in_capacity(&self) -> bool {
        self.ring.iter().any(Waiter::is_available_for_dine_in)
    }

    pub fn get(&self, staff_id: &str) -> Option<&Waiter> {
        self.index.get(staff_id).map(|&idx| &self.ring[idx])
    }

    fn get_mut(&mut self, staff_id: &str) -> Option<&mut Waiter> {
        let idx = *self.index.get(staff_id)?;
        Some(&mut self.ring[idx])
    }

    /// Waiters in ring order, starting from the first roster entry
    pub fn iter(&self) -> impl Iterator<Item = &Waiter> {
        self.ring.iter()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn snapshot(&self) -> Vec<WaiterView> {
        self.ring.iter().map(Waiter::to_view).collect()
    }
}
