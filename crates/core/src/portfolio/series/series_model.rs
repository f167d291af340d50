//! Reducers, typed bucket accumulators and the rows a series produces.

use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::activities::{AccountSnapshot, Cashflow, CashflowKind, Trade};
use crate::payments::{PaymentKind, PaymentRecord};
use crate::portfolio::buckets::BucketKey;

/// How the values inside one bucket collapse into a single figure.
///
/// Flow quantities (PnL, lots, money paid) add up; level quantities
/// (drawdown) take the worst reading. Mean is used for balance curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReducePolicy {
    Sum,
    Max,
    Mean,
}

/// A single-field fold with a fixed policy.
pub trait Reducer: Default {
    const POLICY: ReducePolicy;

    fn absorb(&mut self, value: Decimal);

    /// Reduced figure; zero when nothing was absorbed.
    fn value(&self) -> Decimal;
}

/// Flow field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum(Decimal);

impl Reducer for Sum {
    const POLICY: ReducePolicy = ReducePolicy::Sum;

    fn absorb(&mut self, value: Decimal) {
        self.0 += value;
    }

    fn value(&self) -> Decimal {
        self.0
    }
}

/// Level field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max(Option<Decimal>);

impl Reducer for Max {
    const POLICY: ReducePolicy = ReducePolicy::Max;

    fn absorb(&mut self, value: Decimal) {
        self.0 = Some(self.0.map_or(value, |peak| peak.max(value)));
    }

    fn value(&self) -> Decimal {
        self.0.unwrap_or_else(Decimal::zero)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mean {
    total: Decimal,
    count: u32,
}

impl Reducer for Mean {
    const POLICY: ReducePolicy = ReducePolicy::Mean;

    fn absorb(&mut self, value: Decimal) {
        self.total += value;
        self.count += 1;
    }

    fn value(&self) -> Decimal {
        if self.count == 0 {
            Decimal::zero()
        } else {
            self.total / Decimal::from(self.count)
        }
    }
}

/// Per-bucket state for one kind of event. Built once per bucket.
pub trait BucketAccumulator<E>: Default {
    fn absorb(&mut self, event: &E);
}

/// Trade flows: net PnL and volume, both summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeFlow {
    pub net_pnl: Sum,
    pub lots: Sum,
}

impl BucketAccumulator<Trade> for TradeFlow {
    fn absorb(&mut self, trade: &Trade) {
        self.net_pnl.absorb(trade.net_pnl());
        self.lots.absorb(trade.lots);
    }
}

/// Worst drawdown reading in the bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawdownLevel {
    pub drawdown_percent: Max,
}

impl BucketAccumulator<AccountSnapshot> for DrawdownLevel {
    fn absorb(&mut self, snapshot: &AccountSnapshot) {
        self.drawdown_percent.absorb(snapshot.drawdown_percent);
    }
}

/// Average balance and equity over the bucket's snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquityLevel {
    pub balance: Mean,
    pub equity: Mean,
}

impl BucketAccumulator<AccountSnapshot> for EquityLevel {
    fn absorb(&mut self, snapshot: &AccountSnapshot) {
        self.balance.absorb(snapshot.balance);
        self.equity.absorb(snapshot.equity);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapitalFlow {
    pub deposits: Sum,
    pub withdrawals: Sum,
}

impl BucketAccumulator<Cashflow> for CapitalFlow {
    fn absorb(&mut self, cashflow: &Cashflow) {
        match cashflow.kind {
            CashflowKind::Deposit => self.deposits.absorb(cashflow.amount),
            CashflowKind::Withdrawal => self.withdrawals.absorb(cashflow.amount),
        }
    }
}

/// Settled invoice amounts split by fee type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentFlow {
    pub pnl_share: Sum,
    pub rebate: Sum,
}

impl BucketAccumulator<PaymentRecord> for PaymentFlow {
    fn absorb(&mut self, payment: &PaymentRecord) {
        match payment.kind {
            PaymentKind::PnlShare => self.pnl_share.absorb(payment.amount),
            PaymentKind::Rebate => self.rebate.absorb(payment.amount),
        }
    }
}

/// One bucket of a sparse series: only buckets with events exist.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRow<A> {
    pub key: BucketKey,
    pub event_count: usize,
    pub values: A,
}

/// Single-metric bucket, as produced by `aggregate_metric`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBucket {
    pub key: BucketKey,
    pub event_count: usize,
    pub value: Decimal,
}

/// PnL bucket with the house share split out.
///
/// `fintech_share` is computed from this bucket's aggregated `net_pnl`, so a
/// bucket that nets to a loss owes nothing even if some of its trades won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlBucket {
    pub key: BucketKey,
    pub trade_count: usize,
    pub net_pnl: Decimal,
    pub fintech_share: Decimal,
    pub client_pnl: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotsBucket {
    pub key: BucketKey,
    pub trade_count: usize,
    pub lots: Decimal,
    pub rebate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownBucket {
    pub key: BucketKey,
    pub snapshot_count: usize,
    pub max_drawdown_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityBucket {
    pub key: BucketKey,
    pub snapshot_count: usize,
    pub average_balance: Decimal,
    pub average_equity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalFlowBucket {
    pub key: BucketKey,
    pub cashflow_count: usize,
    pub deposits: Decimal,
    pub withdrawals: Decimal,
    pub net_flow: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsBucket {
    pub key: BucketKey,
    pub payment_count: usize,
    pub pnl_share: Decimal,
    pub rebate: Decimal,
    pub total: Decimal,
}
