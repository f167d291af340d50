//! Tests for portfolio rollups.

#[cfg(test)]
mod tests {
    use crate::activities::CashflowKind;
    use crate::payments::{PaymentKind, PaymentStatus};
    use crate::portfolio::rollup::*;
    use crate::testing::{account, cashflow, date, payment, snapshot, trade, ts};
    use crate::utils::ReportingClock;
    use crate::window::TimeWindow;
    use crate::accounts::ManagedAccount;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn clock() -> ReportingClock {
        ReportingClock::utc(ts("2024-05-20T12:00:00Z"))
    }

    fn winner() -> ManagedAccount {
        let mut acc = account("acc-1", dec!(30), dec!(2));
        acc.balance = dec!(50000);
        acc.equity = dec!(51200);
        acc.live_pnl = dec!(1200);
        acc.current_drawdown_percent = dec!(1.5);
        acc.trades = vec![
            trade("T-1", "2024-05-10T10:00:00Z", dec!(1000), dec!(1)),
            trade("T-2", "2024-05-11T10:00:00Z", dec!(-200), dec!(1)),
            trade("T-0", "2024-03-01T10:00:00Z", dec!(5000), dec!(10)),
        ];
        acc.snapshots = vec![
            snapshot("2024-03-01T00:00:00Z", dec!(9.0)),
            snapshot("2024-05-12T00:00:00Z", dec!(3.5)),
        ];
        acc
    }

    fn loser() -> ManagedAccount {
        let mut acc = account("acc-22", dec!(25), dec!(4));
        acc.balance = dec!(20000);
        acc.equity = dec!(19500);
        acc.live_pnl = dec!(-500);
        acc.current_drawdown_percent = dec!(6.25);
        acc.trades = vec![trade("T-9", "2024-05-15T10:00:00Z", dec!(-300), dec!(0.5))];
        acc
    }

    // ==================== summarize ====================

    #[test]
    fn test_summary_totals_ignore_window() {
        let accounts = vec![winner(), loser()];
        let summary = summarize(&accounts, &TimeWindow::Last30Days, &clock());

        assert_eq!(summary.account_count, 2);
        assert_eq!(summary.total_balance, dec!(70000));
        assert_eq!(summary.total_equity, dec!(70700));
        assert_eq!(summary.total_live_pnl, dec!(700));
    }

    #[test]
    fn test_summary_realized_is_gated_per_account() {
        let accounts = vec![winner(), loser()];
        let summary = summarize(&accounts, &TimeWindow::Last30Days, &clock());

        // acc-1: net 800 -> share 240, rebate 4. acc-22: net -300 -> share 0, rebate 2.
        assert_eq!(summary.realized.net_pnl, dec!(500));
        assert_eq!(summary.realized.trade_count, 3);
        assert_eq!(summary.realized.lots_traded, dec!(2.5));
        assert_eq!(summary.realized.profit_share, dec!(240));
        assert_eq!(summary.realized.rebate, dec!(6.0));
        assert_eq!(summary.realized.total_accrued, dec!(246.0));
    }

    #[test]
    fn test_summary_drawdown_uses_worst_account() {
        let accounts = vec![winner(), loser()];
        let summary = summarize(&accounts, &TimeWindow::Last30Days, &clock());
        // acc-1 has a 3.5 snapshot in window, acc-22 falls back to its live 6.25.
        assert_eq!(summary.max_drawdown_percent, dec!(6.25));
    }

    #[test]
    fn test_summary_of_no_accounts_is_zero() {
        assert_eq!(
            summarize(&[], &TimeWindow::All, &clock()),
            PortfolioSummary::default()
        );
    }

    // ==================== drawdown ====================

    #[test]
    fn test_max_drawdown_in_window_prefers_snapshots() {
        let acc = winner();
        assert_eq!(max_drawdown_in_window(&acc, &TimeWindow::All, &clock()), dec!(9.0));
        assert_eq!(
            max_drawdown_in_window(&acc, &TimeWindow::Last30Days, &clock()),
            dec!(3.5)
        );
        assert_eq!(max_drawdown_in_window(&acc, &TimeWindow::Today, &clock()), dec!(1.5));
    }

    // ==================== breakdowns ====================

    #[test]
    fn test_account_breakdowns_follow_input_order() {
        let accounts = vec![winner(), loser()];
        let rows = account_breakdowns(&accounts, &TimeWindow::All, &clock());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].account_id, "acc-1");
        assert_eq!(rows[0].accrual.net_pnl, dec!(5800));
        assert_eq!(rows[0].accrual.profit_share, dec!(1740));
        assert_eq!(rows[0].accrual.rebate, dec!(24));
        assert_eq!(rows[1].accrual.profit_share, Decimal::ZERO);
        assert_eq!(rows[1].rebate_per_lot, dec!(4));

        let total = total_accrual(&rows);
        assert_eq!(total.total_accrued, dec!(1740) + dec!(24) + dec!(2.0));
    }

    // ==================== payment ledger ====================

    fn with_ledger() -> Vec<ManagedAccount> {
        let mut first = winner();
        first.payment_history = vec![
            payment("P-1", PaymentKind::PnlShare, dec!(1200), "2024-05-01", PaymentStatus::Paid),
            payment("P-2", PaymentKind::Rebate, dec!(50), "2024-05-01", PaymentStatus::Paid),
            payment("P-3", PaymentKind::PnlShare, dec!(300), "2024-05-15", PaymentStatus::Pending),
            payment("P-0", PaymentKind::Rebate, dec!(999), "2024-01-01", PaymentStatus::Paid),
        ];
        let mut second = loser();
        second.payment_history = vec![
            payment("P-4", PaymentKind::Rebate, dec!(20), "2024-05-02", PaymentStatus::Paid),
            payment("P-5", PaymentKind::Rebate, dec!(30), "2024-05-03", PaymentStatus::Overdue),
        ];
        vec![first, second]
    }

    #[test]
    fn test_payment_ledger_summary_splits_collected_and_pending() {
        let accounts = with_ledger();
        let summary = payment_ledger_summary(&accounts, &TimeWindow::MonthToDate, &clock());

        assert_eq!(summary.record_count, 5);
        assert_eq!(summary.collected_total, dec!(1270));
        assert_eq!(summary.collected_pnl_share, dec!(1200));
        assert_eq!(summary.collected_rebate, dec!(70));
        assert_eq!(summary.pending_total, dec!(330));
        assert_eq!(summary.overdue_total, dec!(30));
        // 50 / 2.0 + 20 / 4.0
        assert_eq!(summary.paid_lots, dec!(30));
        assert_eq!(summary.collection_rate, dec!(1270) / dec!(1600) * dec!(100));
    }

    #[test]
    fn test_payment_ledger_summary_skips_zero_rebate_rate() {
        let mut acc = account("acc-0", dec!(30), dec!(0));
        acc.payment_history = vec![payment(
            "P-1",
            PaymentKind::Rebate,
            dec!(40),
            "2024-05-01",
            PaymentStatus::Paid,
        )];
        let summary = payment_ledger_summary(&[acc], &TimeWindow::All, &clock());
        assert_eq!(summary.collected_rebate, dec!(40));
        assert_eq!(summary.paid_lots, Decimal::ZERO);
        assert_eq!(summary.collection_rate, dec!(100));
    }

    #[test]
    fn test_empty_ledger_has_zero_rate() {
        let summary = payment_ledger_summary(&[winner()], &TimeWindow::All, &clock());
        assert_eq!(summary, PaymentLedgerSummary::default());
    }

    #[test]
    fn test_payment_ledger_rows_filter_by_status() {
        let accounts = with_ledger();

        let all = payment_ledger(&accounts, &TimeWindow::MonthToDate, &clock(), None);
        assert_eq!(
            all.iter().map(|r| r.payment_id.as_str()).collect::<Vec<_>>(),
            vec!["P-1", "P-2", "P-3", "P-4", "P-5"]
        );
        assert_eq!(all[3].account_name, "Client acc-22");
        assert_eq!(all[3].rebate_per_lot, dec!(4));
        assert_eq!(all[0].due_date, date("2024-05-01"));

        let paid = payment_ledger(
            &accounts,
            &TimeWindow::All,
            &clock(),
            Some(PaymentStatus::Paid),
        );
        assert_eq!(paid.len(), 4);
        assert!(paid.iter().all(|r| r.status == PaymentStatus::Paid));
    }

    // ==================== overview & flows ====================

    #[test]
    fn test_account_overview_lifetime_drawdown() {
        let mut acc = loser();
        acc.snapshots = vec![snapshot("2023-11-01T00:00:00Z", dec!(4.0))];
        acc.buy_positions_count = 2;
        acc.sell_positions_count = 1;
        acc.buy_lots_total = dec!(0.3);
        acc.sell_lots_total = dec!(0.2);

        let rows = account_overviews(&[winner(), acc]);
        assert_eq!(rows[0].max_drawdown_percent, dec!(9.0));
        assert_eq!(rows[1].max_drawdown_percent, dec!(6.25));
        assert_eq!(rows[1].open_positions, 3);
        assert_eq!(rows[1].open_lots, dec!(0.5));
    }

    #[test]
    fn test_capital_flows_in_window() {
        let mut acc = winner();
        acc.cashflows = vec![
            cashflow("C-1", CashflowKind::Deposit, dec!(10000), "2024-05-02T09:00:00Z"),
            cashflow("C-2", CashflowKind::Withdrawal, dec!(2500), "2024-05-18T09:00:00Z"),
            cashflow("C-3", CashflowKind::Deposit, dec!(7000), "2024-02-01T09:00:00Z"),
        ];
        let flows = capital_flows(&[acc.clone()], &TimeWindow::MonthToDate, &clock());
        assert_eq!(flows.deposits, dec!(10000));
        assert_eq!(flows.withdrawals, dec!(2500));
        assert_eq!(flows.net_flow, dec!(7500));
        assert_eq!(flows.cashflow_count, 2);

        let summary = summarize(&[acc], &TimeWindow::All, &clock());
        assert_eq!(summary.capital_flows.net_flow, dec!(14500));
    }
}
