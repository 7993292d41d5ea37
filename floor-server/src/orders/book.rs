use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::models::{OrderId, OrderSettled, OrderView, PatronId};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::{OrderError, OrderResult};
use crate::seating::SeatingCoordinator;

#[derive(Debug)]
struct Ledger {
    orders: BTreeMap<OrderId, OrderView>,
    next_id: OrderId,
}

/// In-memory order book
///
/// Lock order is ledger, then the seating floor. The seating coordinator never
/// calls back into the book, so the two locks cannot deadlock.
#[derive(Debug)]
pub struct OrderBook {
    seating: Arc<SeatingCoordinator>,
    ledger: Mutex<Ledger>,
}

fn ensure_positive(amount: Decimal) -> OrderResult<()> {
    if amount <= Decimal::ZERO {
        return Err(OrderError::InvalidAmount(amount));
    }
    Ok(())
}

impl OrderBook {
    pub fn new(seating: Arc<SeatingCoordinator>) -> Self {
        Self {
            seating,
            ledger: Mutex::new(Ledger {
                orders: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Open an order for a seated patron
    pub fn create(&self, patron_id: PatronId, total: Decimal) -> OrderResult<OrderView> {
        ensure_positive(total)?;

        let mut ledger = self.ledger.lock();
        let id = ledger.next_id;
        let patron = self.seating.attach_order(patron_id, id)?;
        ledger.next_id += 1;

        let order = OrderView {
            id,
            patron_id,
            service_kind: patron.service_kind,
            waiter_staff_id: patron.waiter_staff_id,
            table_number: patron.table_number,
            total,
            paid: false,
        };
        ledger.orders.insert(id, order.clone());

        tracing::info!(order_id = id, patron_id, total = %total, "Order created");
        Ok(order)
    }

    /// Add to the running total of an unpaid order
    pub fn add_amount(&self, order_id: OrderId, amount: Decimal) -> OrderResult<OrderView> {
        ensure_positive(amount)?;

        let mut ledger = self.ledger.lock();
        let order = ledger
            .orders
            .get_mut(&order_id)
            .ok_or(OrderError::NotFound(order_id))?;
        if order.paid {
            return Err(OrderError::AlreadyPaid(order_id));
        }
        order.total += amount;

        tracing::debug!(order_id, amount = %amount, total = %order.total, "Order amount added");
        Ok(order.clone())
    }

    /// Settle an order and release the patron's waiter slot and table
    ///
    /// The paid flag flips exactly once; a second call fails with
    /// `AlreadyPaid` and releases nothing.
    pub fn mark_paid(&self, order_id: OrderId) -> OrderResult<OrderSettled> {
        let mut ledger = self.ledger.lock();
        let order = ledger
            .orders
            .get_mut(&order_id)
            .ok_or(OrderError::NotFound(order_id))?;
        if order.paid {
            return Err(OrderError::AlreadyPaid(order_id));
        }
        order.paid = true;
        let order = order.clone();

        let release = self.seating.on_order_paid(order.patron_id, order.total);

        crate::audit_log!(
            "order_paid",
            format!("order:{}", order.id),
            format!(
                "patron {} total {} waiter {}",
                order.patron_id,
                order.total,
                order.waiter_staff_id.as_deref().unwrap_or("-")
            )
        );

        Ok(OrderSettled { order, release })
    }

    pub fn get(&self, order_id: OrderId) -> OrderResult<OrderView> {
        self.ledger
            .lock()
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(OrderError::NotFound(order_id))
    }

    /// Unpaid orders, oldest first
    pub fn unpaid(&self) -> Vec<OrderView> {
        self.ledger
            .lock()
            .orders
            .values()
            .filter(|o| !o.paid)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::{SeatingError, TableDefinition, WaiterProfile};
    use shared::models::ServiceKind;

    fn book() -> OrderBook {
        let seating = SeatingCoordinator::new(
            vec![
                WaiterProfile::new("W1", "Ann"),
                WaiterProfile::new("W2", "Ben"),
            ],
            vec![TableDefinition::new(1, 2), TableDefinition::new(2, 4)],
        );
        OrderBook::new(Arc::new(seating))
    }

    #[test]
    fn test_create_copies_assignment() {
        let book = book();
        let patron = book.seating.admit_patron(ServiceKind::DineIn, 2).unwrap();

        let order = book.create(patron, Decimal::new(2500, 2)).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.waiter_staff_id.as_deref(), Some("W1"));
        assert_eq!(order.table_number, Some(1));
        assert!(!order.paid);
    }

    #[test]
    fn test_create_rejects_bad_requests() {
        let book = book();
        let patron = book.seating.admit_patron(ServiceKind::Takeout, 1).unwrap();

        assert_eq!(
            book.create(patron, Decimal::ZERO),
            Err(OrderError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            book.create(99, Decimal::ONE),
            Err(OrderError::Seating(SeatingError::PatronNotFound(99)))
        );

        book.create(patron, Decimal::ONE).unwrap();
        assert_eq!(
            book.create(patron, Decimal::ONE),
            Err(OrderError::Seating(SeatingError::OrderAlreadyAttached(patron)))
        );
        // Failed creates do not burn ids
        assert_eq!(book.unpaid()[0].id, 1);
    }

    #[test]
    fn test_add_amount_accumulates() {
        let book = book();
        let patron = book.seating.admit_patron(ServiceKind::Takeout, 1).unwrap();
        let order = book.create(patron, Decimal::new(10, 0)).unwrap();

        book.add_amount(order.id, Decimal::new(550, 2)).unwrap();
        let order = book.add_amount(order.id, Decimal::new(450, 2)).unwrap();
        assert_eq!(order.total, Decimal::new(20, 0));

        assert!(matches!(
            book.add_amount(order.id, Decimal::new(-1, 0)),
            Err(OrderError::InvalidAmount(_))
        ));
        assert_eq!(
            book.add_amount(42, Decimal::ONE),
            Err(OrderError::NotFound(42))
        );
    }

    #[test]
    fn test_mark_paid_releases_once() {
        let book = book();
        let patron = book.seating.admit_patron(ServiceKind::DineIn, 2).unwrap();
        let order = book.create(patron, Decimal::new(80, 0)).unwrap();

        let settled = book.mark_paid(order.id).unwrap();
        assert!(settled.order.paid);
        let release = settled.release.unwrap();
        assert_eq!(release.table_number, Some(1));
        assert_eq!(release.waiter_staff_id.as_deref(), Some("W1"));

        assert_eq!(book.mark_paid(order.id), Err(OrderError::AlreadyPaid(order.id)));
        assert_eq!(
            book.add_amount(order.id, Decimal::ONE),
            Err(OrderError::AlreadyPaid(order.id))
        );

        let waiter = &book.seating.waiter_snapshot()[0];
        assert_eq!(waiter.dine_in_load, 0);
        assert_eq!(waiter.total_sales, Decimal::new(80, 0));
        assert_eq!(waiter.total_commission, Decimal::new(12, 0));
        assert!(book.unpaid().is_empty());
        assert!(book.get(order.id).unwrap().paid);
    }

    #[test]
    fn test_paid_total_includes_added_amounts() {
        let book = book();
        let patron = book.seating.admit_patron(ServiceKind::Takeout, 1).unwrap();
        let order = book.create(patron, Decimal::new(10, 0)).unwrap();
        book.add_amount(order.id, Decimal::new(5, 0)).unwrap();

        book.mark_paid(order.id).unwrap();
        // Takeout went to W1 (cursor starts at the head)
        let waiter = &book.seating.waiter_snapshot()[0];
        assert_eq!(waiter.total_sales, Decimal::new(15, 0));
        assert_eq!(waiter.takeout_served, 1);
    }
}
