//! Record builders shared by the unit tests.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::accounts::{ConnectionStatus, ManagedAccount, PayoutStructure, Platform};
use crate::activities::{AccountSnapshot, Cashflow, CashflowKind, Trade, TradeSide};
use crate::payments::{PaymentKind, PaymentRecord, PaymentStatus};

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Closed trade whose whole net PnL sits in `profit`.
pub fn trade(id: &str, closed_at: &str, net_pnl: Decimal, lots: Decimal) -> Trade {
    let close_time = ts(closed_at);
    Trade {
        id: id.to_string(),
        side: TradeSide::Buy,
        symbol: "EURUSD".to_string(),
        lots,
        open_price: Decimal::ONE,
        close_price: Some(Decimal::ONE),
        open_time: close_time - Duration::hours(1),
        close_time: Some(close_time),
        profit: net_pnl,
        swap: Decimal::ZERO,
        commission: Decimal::ZERO,
    }
}

pub fn snapshot(at: &str, drawdown_percent: Decimal) -> AccountSnapshot {
    AccountSnapshot {
        timestamp: ts(at),
        equity: Decimal::from(10_000),
        balance: Decimal::from(10_000),
        drawdown_percent,
    }
}

pub fn cashflow(id: &str, kind: CashflowKind, amount: Decimal, at: &str) -> Cashflow {
    Cashflow {
        id: id.to_string(),
        kind,
        amount,
        timestamp: ts(at),
        note: None,
    }
}

pub fn payment(
    id: &str,
    kind: PaymentKind,
    amount: Decimal,
    due: &str,
    status: PaymentStatus,
) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        kind,
        amount,
        due_date: date(due),
        status,
        period_label: String::new(),
    }
}

pub fn account(id: &str, pnl_share_percent: Decimal, rebate_per_lot: Decimal) -> ManagedAccount {
    ManagedAccount {
        id: id.to_string(),
        name: format!("Client {}", id),
        broker: "IC Markets".to_string(),
        server: "IC Markets-Live01".to_string(),
        vps_name: "CH-ZRH-01".to_string(),
        platform: Platform::Mt5,
        account_number: format!("10{}", id.len()),
        status: ConnectionStatus::Connected,
        strategy_tag: String::new(),
        balance: Decimal::ZERO,
        equity: Decimal::ZERO,
        margin_percent: Decimal::ZERO,
        current_drawdown_percent: Decimal::ZERO,
        live_pnl: Decimal::ZERO,
        buy_positions_count: 0,
        buy_lots_total: Decimal::ZERO,
        sell_positions_count: 0,
        sell_lots_total: Decimal::ZERO,
        trades: Vec::new(),
        cashflows: Vec::new(),
        snapshots: Vec::new(),
        payout_structure: PayoutStructure::new(pnl_share_percent, rebate_per_lot),
        payment_history: Vec::new(),
    }
}
