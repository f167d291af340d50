//! Windowed, bucketed time series over account history.
//!
//! Every series follows the same pipeline: keep the events inside the window,
//! group them by bucket key, fold each group with a typed accumulator, then
//! emit rows in ascending key order. Buckets without events are never
//! synthesized, so gaps in the input stay gaps in the output.

use std::collections::BTreeMap;

use log::debug;

use super::series_model::{
    BucketAccumulator, BucketRow, CapitalFlow, CapitalFlowBucket, DrawdownBucket, DrawdownLevel,
    EarningsBucket, EquityBucket, EquityLevel, LotsBucket, Max, Mean, MetricBucket, PaymentFlow,
    PnlBucket, ReducePolicy, Reducer, Sum, TradeFlow,
};
use crate::accounts::{ManagedAccount, PayoutStructure};
use crate::activities::{AccountSnapshot, Cashflow, Trade};
use crate::payments::{PaymentRecord, PaymentStatus};
use crate::portfolio::buckets::{derive_key, BucketSortKey, Granularity};
use crate::utils::ReportingClock;
use crate::window::{TimeWindow, TimedEvent};
use rust_decimal::Decimal;

fn fold_buckets<E, A, F>(
    events: &[E],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
    mut absorb: F,
) -> Vec<BucketRow<A>>
where
    E: TimedEvent,
    A: Default,
    F: FnMut(&mut A, &E),
{
    let mut buckets: BTreeMap<BucketSortKey, (usize, A)> = BTreeMap::new();

    for event in window.select(events, clock) {
        let key = derive_key(event.event_time(clock.timezone), granularity, clock.timezone);
        let (count, acc) = buckets.entry(key.sort_key).or_default();
        *count += 1;
        absorb(acc, event);
    }

    buckets
        .into_iter()
        .map(|(sort_key, (event_count, values))| BucketRow {
            key: sort_key.into(),
            event_count,
            values,
        })
        .collect()
}

/// Folds `events` into per-bucket accumulators of type `A`.
pub fn aggregate<E, A>(
    events: &[E],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<BucketRow<A>>
where
    E: TimedEvent,
    A: BucketAccumulator<E>,
{
    fold_buckets(events, window, granularity, clock, |acc: &mut A, event| {
        acc.absorb(event)
    })
}

fn reduce_metric<E, R, F>(
    events: &[E],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
    field: F,
) -> Vec<MetricBucket>
where
    E: TimedEvent,
    R: Reducer,
    F: Fn(&E) -> Decimal,
{
    debug!("Reducing metric with {:?} policy into {} buckets", R::POLICY, granularity);
    fold_buckets(events, window, granularity, clock, |acc: &mut R, event| {
        acc.absorb(field(event))
    })
    .into_iter()
    .map(|row| MetricBucket {
        key: row.key,
        event_count: row.event_count,
        value: row.values.value(),
    })
    .collect()
}

/// Single-metric aggregation with the policy chosen at runtime.
pub fn aggregate_metric<E, F>(
    events: &[E],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
    policy: ReducePolicy,
    field: F,
) -> Vec<MetricBucket>
where
    E: TimedEvent,
    F: Fn(&E) -> Decimal,
{
    match policy {
        ReducePolicy::Sum => reduce_metric::<E, Sum, F>(events, window, granularity, clock, field),
        ReducePolicy::Max => reduce_metric::<E, Max, F>(events, window, granularity, clock, field),
        ReducePolicy::Mean => {
            reduce_metric::<E, Mean, F>(events, window, granularity, clock, field)
        }
    }
}

/// Net PnL per bucket with the profit share gated on each bucket's total.
pub fn pnl_series(
    trades: &[Trade],
    payout: &PayoutStructure,
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<PnlBucket> {
    let rows = aggregate::<Trade, TradeFlow>(trades, window, granularity, clock);
    debug!(
        "PnL series: {} trades folded into {} {} buckets",
        trades.len(),
        rows.len(),
        granularity
    );

    rows.into_iter()
        .map(|row| {
            let net_pnl = row.values.net_pnl.value();
            let fintech_share = payout.profit_share_on(net_pnl);
            PnlBucket {
                key: row.key,
                trade_count: row.event_count,
                net_pnl,
                fintech_share,
                client_pnl: net_pnl - fintech_share,
            }
        })
        .collect()
}

/// Lots traded per bucket with the rebate they earn.
pub fn lots_series(
    trades: &[Trade],
    payout: &PayoutStructure,
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<LotsBucket> {
    aggregate::<Trade, TradeFlow>(trades, window, granularity, clock)
        .into_iter()
        .map(|row| {
            let lots = row.values.lots.value();
            LotsBucket {
                key: row.key,
                trade_count: row.event_count,
                lots,
                rebate: payout.rebate_on(lots),
            }
        })
        .collect()
}

/// Worst drawdown per bucket.
///
/// Always reduced with MAX straight from the snapshots. Summing or averaging
/// daily maxima does not give the weekly or monthly maximum.
pub fn drawdown_series(
    snapshots: &[AccountSnapshot],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<DrawdownBucket> {
    aggregate::<AccountSnapshot, DrawdownLevel>(snapshots, window, granularity, clock)
        .into_iter()
        .map(|row| DrawdownBucket {
            key: row.key,
            snapshot_count: row.event_count,
            max_drawdown_percent: row.values.drawdown_percent.value(),
        })
        .collect()
}

/// Average balance and equity per bucket.
pub fn equity_curve(
    snapshots: &[AccountSnapshot],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<EquityBucket> {
    aggregate::<AccountSnapshot, EquityLevel>(snapshots, window, granularity, clock)
        .into_iter()
        .map(|row| EquityBucket {
            key: row.key,
            snapshot_count: row.event_count,
            average_balance: row.values.balance.value(),
            average_equity: row.values.equity.value(),
        })
        .collect()
}

/// Equity curve over every account's snapshots pooled together.
pub fn portfolio_equity_curve(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<EquityBucket> {
    let snapshots: Vec<&AccountSnapshot> = accounts
        .iter()
        .flat_map(|acc| acc.snapshots.iter())
        .collect();

    fold_buckets(&snapshots, window, granularity, clock, |acc: &mut EquityLevel, snapshot| {
        acc.absorb(*snapshot)
    })
    .into_iter()
    .map(|row| EquityBucket {
        key: row.key,
        snapshot_count: row.event_count,
        average_balance: row.values.balance.value(),
        average_equity: row.values.equity.value(),
    })
    .collect()
}

pub fn capital_flow_series(
    cashflows: &[Cashflow],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<CapitalFlowBucket> {
    aggregate::<Cashflow, CapitalFlow>(cashflows, window, granularity, clock)
        .into_iter()
        .map(|row| {
            let deposits = row.values.deposits.value();
            let withdrawals = row.values.withdrawals.value();
            CapitalFlowBucket {
                key: row.key,
                cashflow_count: row.event_count,
                deposits,
                withdrawals,
                net_flow: deposits - withdrawals,
            }
        })
        .collect()
}

/// Collected fees across all accounts, bucketed by due date.
///
/// Only PAID records count. The payouts chart shows this over `TimeWindow::All`
/// so that history stays visible whatever period is selected.
pub fn paid_earnings_series(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    granularity: Granularity,
    clock: &ReportingClock,
) -> Vec<EarningsBucket> {
    let paid: Vec<&PaymentRecord> = accounts
        .iter()
        .flat_map(|acc| acc.payment_history.iter())
        .filter(|payment| payment.status == PaymentStatus::Paid)
        .collect();

    fold_buckets(&paid, window, granularity, clock, |acc: &mut PaymentFlow, payment| {
        acc.absorb(*payment)
    })
    .into_iter()
    .map(|row| {
        let pnl_share = row.values.pnl_share.value();
        let rebate = row.values.rebate.value();
        EarningsBucket {
            key: row.key,
            payment_count: row.event_count,
            pnl_share,
            rebate,
            total: pnl_share + rebate,
        }
    })
    .collect()
}
