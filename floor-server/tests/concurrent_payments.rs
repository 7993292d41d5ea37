//! 并发压力测试 - 入场、下单、加单、结账交叉执行
//!
//! 多个线程共享同一个 ServerState, 验证结账释放不会重复、负载不会超限。

use floor_server::{AdmissionError, Config, ServerState};
use rand::Rng;
use rust_decimal::Decimal;
use shared::models::ServiceKind;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const PATRON_COUNT: usize = 2000;
const CONCURRENCY: usize = 16;

/// 顾客阶段
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Admit,
    Order,
    AddAmount,
    Pay,
}

#[derive(Debug, Default)]
struct Context {
    patron_id: Option<i64>,
    order_id: Option<i64>,
}

/// Returns `Ok(false)` when a dine-in party was turned away
fn execute_phase(
    state: &ServerState,
    ctx: &mut Context,
    phase: Phase,
    kind: ServiceKind,
) -> Result<bool, String> {
    let mut rng = rand::thread_rng();

    match phase {
        Phase::Admit => match state.seating().admit_patron(kind, rng.gen_range(1..=8)) {
            Ok(id) => {
                ctx.patron_id = Some(id);
                Ok(true)
            }
            Err(AdmissionError::NoWaiters | AdmissionError::NoTables { .. }) => Ok(false),
        },
        Phase::Order => {
            let patron_id = ctx.patron_id.ok_or("no patron")?;
            let total = Decimal::new(rng.gen_range(500..20_000), 2);
            let order = state
                .orders()
                .create(patron_id, total)
                .map_err(|e| format!("create failed: {}", e))?;
            ctx.order_id = Some(order.id);
            Ok(true)
        }
        Phase::AddAmount => {
            let order_id = ctx.order_id.ok_or("no order")?;
            state
                .orders()
                .add_amount(order_id, Decimal::new(rng.gen_range(100..2_000), 2))
                .map_err(|e| format!("add failed: {}", e))?;
            Ok(true)
        }
        Phase::Pay => {
            let order_id = ctx.order_id.ok_or("no order")?;
            state
                .orders()
                .mark_paid(order_id)
                .map_err(|e| format!("pay failed: {}", e))?;
            Ok(true)
        }
    }
}

#[test]
fn test_interleaved_patrons_release_everything() {
    let state = Arc::new(ServerState::initialize(&Config::default()));
    let paid = Arc::new(AtomicUsize::new(0));
    let turned_away = Arc::new(AtomicUsize::new(0));
    let next = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..CONCURRENCY)
        .map(|_| {
            let state = state.clone();
            let paid = paid.clone();
            let turned_away = turned_away.clone();
            let next = next.clone();

            std::thread::spawn(move || {
                loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    if i >= PATRON_COUNT {
                        break;
                    }
                    let kind = if i % 3 == 0 {
                        ServiceKind::Takeout
                    } else {
                        ServiceKind::DineIn
                    };

                    let mut ctx = Context::default();
                    if !execute_phase(&state, &mut ctx, Phase::Admit, kind).unwrap() {
                        turned_away.fetch_add(1, Ordering::Relaxed);
                        continue;
                    }
                    for phase in [Phase::Order, Phase::AddAmount, Phase::Pay] {
                        execute_phase(&state, &mut ctx, phase, kind).unwrap();
                    }
                    paid.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let paid = paid.load(Ordering::Relaxed);
    assert_eq!(paid + turned_away.load(Ordering::Relaxed), PATRON_COUNT);
    assert!(paid > 0);

    // Everything handed back exactly once
    let waiters = state.seating().waiter_snapshot();
    assert!(waiters.iter().all(|w| w.dine_in_load == 0));
    let served: u32 = waiters.iter().map(|w| w.total_served()).sum();
    assert_eq!(served as usize, paid);

    let status = state.seating().table_status();
    assert_eq!(status.occupied_tables, 0);
    assert_eq!(status.available_tables, status.total_tables);

    assert!(state.seating().list_queued(|_| true).is_empty());
    assert!(state.orders().unpaid().is_empty());
}

#[test]
fn test_racing_payments_release_once() {
    let state = Arc::new(ServerState::initialize(&Config::default()));

    let mut orders = Vec::new();
    for _ in 0..16 {
        let patron = state
            .seating()
            .admit_patron(ServiceKind::DineIn, 2)
            .unwrap();
        orders.push(state.orders().create(patron, Decimal::new(50, 0)).unwrap().id);
    }
    let orders = Arc::new(orders);
    let succeeded = Arc::new(AtomicUsize::new(0));

    // Every order is paid from four threads at once
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let state = state.clone();
            let orders = orders.clone();
            let succeeded = succeeded.clone();
            std::thread::spawn(move || {
                for &id in orders.iter() {
                    if state.orders().mark_paid(id).is_ok() {
                        succeeded.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(succeeded.load(Ordering::Relaxed), 16);
    let waiters = state.seating().waiter_snapshot();
    assert!(waiters.iter().all(|w| w.dine_in_load == 0));
    let sales: Decimal = waiters.iter().map(|w| w.total_sales).sum();
    assert_eq!(sales, Decimal::new(800, 0));
}
