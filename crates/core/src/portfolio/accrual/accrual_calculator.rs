//! Window-level payout accrual for a single account.

use log::debug;

use super::accrual_model::AccrualSummary;
use crate::accounts::{ManagedAccount, PayoutStructure};
use crate::activities::Trade;
use crate::portfolio::series::{BucketAccumulator, Reducer, TradeFlow};
use crate::utils::ReportingClock;
use crate::window::TimeWindow;

/// Accrues profit share and rebate on the trades inside `window`.
///
/// Trades are matched on close time, or open time while still open. An empty
/// selection (including a custom range with `start > end`) yields zeros.
pub fn accrue(
    trades: &[Trade],
    payout: &PayoutStructure,
    window: &TimeWindow,
    clock: &ReportingClock,
) -> AccrualSummary {
    let mut flow = TradeFlow::default();
    let mut trade_count = 0usize;
    for trade in window.select(trades, clock) {
        flow.absorb(trade);
        trade_count += 1;
    }

    let net_pnl = flow.net_pnl.value();
    let lots_traded = flow.lots.value();
    let profit_share = payout.profit_share_on(net_pnl);
    let rebate = payout.rebate_on(lots_traded);

    debug!(
        "Accrued {} of {} trades in {} window: net {}, share {}, rebate {}",
        trade_count,
        trades.len(),
        window.kind(),
        net_pnl,
        profit_share,
        rebate
    );

    AccrualSummary {
        net_pnl,
        lots_traded,
        trade_count,
        profit_share,
        rebate,
        total_accrued: profit_share + rebate,
    }
}

/// [`accrue`] over an account's own trades and terms.
pub fn accrue_account(
    account: &ManagedAccount,
    window: &TimeWindow,
    clock: &ReportingClock,
) -> AccrualSummary {
    accrue(&account.trades, &account.payout_structure, window, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account, trade, ts};
    use chrono::Duration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn clock() -> ReportingClock {
        ReportingClock::utc(ts("2024-03-20T12:00:00Z"))
    }

    #[test]
    fn test_losses_offset_wins_before_share() {
        let payout = PayoutStructure::new(dec!(30), dec!(2));
        let trades = vec![
            trade("T-1", "2024-03-01T10:00:00Z", dec!(1000), dec!(1.0)),
            trade("T-2", "2024-03-02T10:00:00Z", dec!(-200), dec!(1.0)),
        ];

        let summary = accrue(&trades, &payout, &TimeWindow::All, &clock());

        assert_eq!(summary.net_pnl, dec!(800));
        assert_eq!(summary.lots_traded, dec!(2.0));
        assert_eq!(summary.trade_count, 2);
        assert_eq!(summary.profit_share, dec!(240));
        assert_eq!(summary.rebate, dec!(4.0));
        assert_eq!(summary.total_accrued, dec!(244));
    }

    #[test]
    fn test_rebate_is_earned_on_a_losing_window() {
        let payout = PayoutStructure::new(dec!(25), dec!(3.5));
        let trades = vec![trade("T-1", "2024-03-10T10:00:00Z", dec!(-450), dec!(2))];

        let summary = accrue(&trades, &payout, &TimeWindow::All, &clock());

        assert_eq!(summary.profit_share, Decimal::ZERO);
        assert_eq!(summary.rebate, dec!(7.0));
        assert_eq!(summary.total_accrued, dec!(7.0));
    }

    #[test]
    fn test_inverted_custom_range_is_empty_not_an_error() {
        let payout = PayoutStructure::new(dec!(30), dec!(2));
        let trades = vec![trade("T-1", "2024-03-10T10:00:00Z", dec!(100), dec!(1))];
        let window = TimeWindow::custom(
            Some(ts("2024-03-15T00:00:00Z")),
            Some(ts("2024-03-01T00:00:00Z")),
        );

        assert_eq!(accrue(&trades, &payout, &window, &clock()), AccrualSummary::default());
    }

    #[test]
    fn test_rolling_window_excludes_exact_boundary() {
        let payout = PayoutStructure::new(dec!(30), dec!(2));
        let boundary = clock().now - Duration::days(7);
        let mut edge = trade("edge", "2024-03-13T12:00:00Z", dec!(100), dec!(1));
        edge.close_time = Some(boundary);
        edge.open_time = boundary - Duration::hours(1);
        let inside = trade("inside", "2024-03-19T12:00:00Z", dec!(50), dec!(0.5));

        let summary = accrue(&[edge, inside], &payout, &TimeWindow::Last7Days, &clock());

        assert_eq!(summary.trade_count, 1);
        assert_eq!(summary.net_pnl, dec!(50));
        assert_eq!(summary.profit_share, dec!(15));
    }

    #[test]
    fn test_accrue_account_uses_account_terms() {
        let mut acc = account("acc-1", dec!(20), dec!(1.5));
        acc.trades = vec![
            trade("T-1", "2024-03-18T10:00:00Z", dec!(500), dec!(2)),
            trade("T-2", "2024-01-05T10:00:00Z", dec!(900), dec!(4)),
        ];

        let summary = accrue_account(&acc, &TimeWindow::MonthToDate, &clock());

        assert_eq!(summary.trade_count, 1);
        assert_eq!(summary.profit_share, dec!(100));
        assert_eq!(summary.rebate, dec!(3.0));
    }

    #[test]
    fn test_combine_keeps_per_account_gating() {
        let payout = PayoutStructure::new(dec!(30), dec!(0));
        let winner = accrue(
            &[trade("W", "2024-03-01T10:00:00Z", dec!(100), dec!(1))],
            &payout,
            &TimeWindow::All,
            &clock(),
        );
        let loser = accrue(
            &[trade("L", "2024-03-01T10:00:00Z", dec!(-300), dec!(1))],
            &payout,
            &TimeWindow::All,
            &clock(),
        );

        let mut total = AccrualSummary::default();
        total.combine(&winner);
        total.combine(&loser);

        assert_eq!(total.net_pnl, dec!(-200));
        assert_eq!(total.profit_share, dec!(30));
        assert_eq!(total.trade_count, 2);
    }

    #[test]
    fn test_summary_serializes_dashboard_names() {
        let json = serde_json::to_value(AccrualSummary::default()).unwrap();
        assert!(json.get("netPnL").is_some());
        assert!(json.get("lotsTraded").is_some());
        assert!(json.get("totalAccrued").is_some());
    }
}
