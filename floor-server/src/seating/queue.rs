//! Patron queues
//!
//! One FIFO per service kind. A patron joins the queue matching its service
//! kind and leaves it only when its order is settled.

use shared::models::{OrderId, PatronId, PatronState, ServiceKind};
use std::collections::VecDeque;
use std::collections::vec_deque;

#[derive(Debug, Clone)]
pub struct Patron {
    id: PatronId,
    party_size: u32,
    service_kind: ServiceKind,
    waiter: Option<String>,
    table: Option<u32>,
    order: Option<OrderId>,
}

impl Patron {
    pub fn new(id: PatronId, party_size: u32, service_kind: ServiceKind) -> Self {
        Self {
            id,
            party_size,
            service_kind,
            waiter: None,
            table: None,
            order: None,
        }
    }

    pub fn id(&self) -> PatronId {
        self.id
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    pub fn service_kind(&self) -> ServiceKind {
        self.service_kind
    }

    /// Staff id of the assigned waiter
    pub fn waiter(&self) -> Option<&str> {
        self.waiter.as_deref()
    }

    pub fn table(&self) -> Option<u32> {
        self.table
    }

    pub fn order(&self) -> Option<OrderId> {
        self.order
    }

    pub fn needs_waiter(&self) -> bool {
        self.waiter.is_none()
    }

    pub fn needs_table(&self) -> bool {
        self.service_kind.is_dine_in() && self.table.is_none()
    }

    /// Still missing something its service kind requires
    pub fn is_unassigned(&self) -> bool {
        self.needs_waiter() || self.needs_table()
    }

    pub fn state(&self) -> PatronState {
        if self.order.is_some() {
            PatronState::OrderPlaced
        } else if !self.is_unassigned() {
            PatronState::FullyAssigned
        } else if self.waiter.is_some() || self.table.is_some() {
            PatronState::PartiallyAssigned
        } else {
            PatronState::QueuedUnassigned
        }
    }

    pub(crate) fn assign_waiter(&mut self, staff_id: impl Into<String>) {
        self.waiter = Some(staff_id.into());
    }

    pub(crate) fn assign_table(&mut self, number: u32) {
        self.table = Some(number);
    }

    pub(crate) fn attach_order(&mut self, order: OrderId) {
        self.order = Some(order);
    }
}

#[derive(Debug)]
pub struct PatronQueue {
    kind: ServiceKind,
    members: VecDeque<Patron>,
}

impl PatronQueue {
    pub fn new(kind: ServiceKind) -> Self {
        Self {
            kind,
            members: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Append at the tail
    pub fn enqueue(&mut self, patron: Patron) {
        debug_assert_eq!(patron.service_kind(), self.kind);
        self.members.push_back(patron);
    }

    /// Unlink a patron, keeping everyone else in order
    pub fn remove_by_id(&mut self, id: PatronId) -> Option<Patron> {
        let pos = self.members.iter().position(|p| p.id == id)?;
        self.members.remove(pos)
    }

    /// Head-to-tail view; clone it to restart from the head
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            inner: self.members.iter(),
        }
    }

    /// Visit every patron still missing a resource, in queue order, once each
    ///
    /// Returns the number of patrons visited.
    pub fn sweep_unassigned<F>(&mut self, mut visitor: F) -> usize
    where
        F: FnMut(&mut Patron),
    {
        let mut visited = 0;
        for patron in self.members.iter_mut().filter(|p| p.is_unassigned()) {
            visitor(patron);
            visited += 1;
        }
        visited
    }

    pub fn get(&self, id: PatronId) -> Option<&Patron> {
        self.members.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PatronId) -> Option<&mut Patron> {
        self.members.iter_mut().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Read-only, restartable pass over a queue
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    inner: vec_deque::Iter<'a, Patron>,
}

impl<'a> Iterator for Snapshot<'a> {
    type Item = &'a Patron;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Snapshot<'_> {}
