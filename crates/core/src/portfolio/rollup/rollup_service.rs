//! Portfolio-level rollups feeding the summary, accounts and payouts views.

use log::{debug, warn};
use num_traits::Zero;
use rust_decimal::Decimal;

use super::rollup_model::{
    AccountBreakdown, AccountOverview, CapitalFlowSummary, PaymentLedgerRow, PaymentLedgerSummary,
    PortfolioSummary,
};
use crate::accounts::ManagedAccount;
use crate::activities::CashflowKind;
use crate::payments::{PaymentKind, PaymentStatus};
use crate::portfolio::accrual::{accrue_account, AccrualSummary};
use crate::utils::ReportingClock;
use crate::window::TimeWindow;

/// Headline figures across every account.
pub fn summarize(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    clock: &ReportingClock,
) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        account_count: accounts.len(),
        capital_flows: capital_flows(accounts, window, clock),
        ..PortfolioSummary::default()
    };

    for account in accounts {
        summary.total_balance += account.balance;
        summary.total_equity += account.equity;
        summary.total_live_pnl += account.live_pnl;
        summary
            .realized
            .combine(&accrue_account(account, window, clock));
        summary.max_drawdown_percent = summary
            .max_drawdown_percent
            .max(max_drawdown_in_window(account, window, clock));
    }

    debug!(
        "Summarized {} accounts over {} window: realized {} on {} trades",
        summary.account_count,
        window.kind(),
        summary.realized.net_pnl,
        summary.realized.trade_count
    );
    summary
}

/// Worst snapshot drawdown inside the window, or the live drawdown when the
/// window holds no snapshot.
pub fn max_drawdown_in_window(
    account: &ManagedAccount,
    window: &TimeWindow,
    clock: &ReportingClock,
) -> Decimal {
    window
        .select(&account.snapshots, clock)
        .map(|snapshot| snapshot.drawdown_percent)
        .reduce(Decimal::max)
        .unwrap_or(account.current_drawdown_percent)
}

/// Per-account accruals in input order. Each row is gated on its own total.
pub fn account_breakdowns(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    clock: &ReportingClock,
) -> Vec<AccountBreakdown> {
    accounts
        .iter()
        .map(|account| AccountBreakdown {
            account_id: account.id.clone(),
            name: account.name.clone(),
            account_number: account.account_number.clone(),
            broker: account.broker.clone(),
            pnl_share_percent: account.payout_structure.pnl_share_percent,
            rebate_per_lot: account.payout_structure.rebate_per_lot,
            accrual: accrue_account(account, window, clock),
            max_drawdown_percent: max_drawdown_in_window(account, window, clock),
        })
        .collect()
}

/// Collected and outstanding fees for payments due inside the window.
///
/// Payment records stand on their own: trades play no part here.
pub fn payment_ledger_summary(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    clock: &ReportingClock,
) -> PaymentLedgerSummary {
    let mut summary = PaymentLedgerSummary::default();

    for account in accounts {
        let rate = account.payout_structure.rebate_per_lot;
        for payment in window.select(&account.payment_history, clock) {
            summary.record_count += 1;

            if payment.status.is_outstanding() {
                summary.pending_total += payment.amount;
                if payment.status == PaymentStatus::Overdue {
                    summary.overdue_total += payment.amount;
                }
                continue;
            }

            summary.collected_total += payment.amount;
            match payment.kind {
                PaymentKind::PnlShare => summary.collected_pnl_share += payment.amount,
                PaymentKind::Rebate => {
                    summary.collected_rebate += payment.amount;
                    if rate > Decimal::zero() {
                        summary.paid_lots += payment.amount / rate;
                    } else {
                        warn!(
                            "Account {} has no rebate rate; payment {} left out of paid lots",
                            account.id, payment.id
                        );
                    }
                }
            }
        }
    }

    let billed = summary.collected_total + summary.pending_total;
    if billed > Decimal::zero() {
        summary.collection_rate = summary.collected_total / billed * Decimal::ONE_HUNDRED;
    }
    summary
}

/// Flattened ledger of payments due inside the window, optionally narrowed
/// to one status. Rows keep account order, then each account's ledger order.
pub fn payment_ledger(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    clock: &ReportingClock,
    status: Option<PaymentStatus>,
) -> Vec<PaymentLedgerRow> {
    accounts
        .iter()
        .flat_map(|account| {
            window
                .select(&account.payment_history, clock)
                .filter(move |payment| status.map_or(true, |wanted| payment.status == wanted))
                .map(move |payment| PaymentLedgerRow {
                    payment_id: payment.id.clone(),
                    account_id: account.id.clone(),
                    account_name: account.name.clone(),
                    account_number: account.account_number.clone(),
                    kind: payment.kind,
                    amount: payment.amount,
                    due_date: payment.due_date,
                    status: payment.status,
                    period_label: payment.period_label.clone(),
                    pnl_share_percent: account.payout_structure.pnl_share_percent,
                    rebate_per_lot: account.payout_structure.rebate_per_lot,
                })
        })
        .collect()
}

/// Live account rows with lifetime drawdown.
pub fn account_overviews(accounts: &[ManagedAccount]) -> Vec<AccountOverview> {
    accounts
        .iter()
        .map(|account| AccountOverview {
            account_id: account.id.clone(),
            name: account.name.clone(),
            account_number: account.account_number.clone(),
            broker: account.broker.clone(),
            server: account.server.clone(),
            vps_name: account.vps_name.clone(),
            platform: account.platform,
            status: account.status,
            balance: account.balance,
            equity: account.equity,
            margin_percent: account.margin_percent,
            live_pnl: account.live_pnl,
            open_positions: account.open_positions_count(),
            open_lots: account.open_lots_total(),
            current_drawdown_percent: account.current_drawdown_percent,
            max_drawdown_percent: account.lifetime_max_drawdown(),
        })
        .collect()
}

/// Deposits and withdrawals inside the window across every account.
pub fn capital_flows(
    accounts: &[ManagedAccount],
    window: &TimeWindow,
    clock: &ReportingClock,
) -> CapitalFlowSummary {
    let mut flows = CapitalFlowSummary::default();
    for cashflow in accounts
        .iter()
        .flat_map(|account| window.select(&account.cashflows, clock))
    {
        flows.cashflow_count += 1;
        match cashflow.kind {
            CashflowKind::Deposit => flows.deposits += cashflow.amount,
            CashflowKind::Withdrawal => flows.withdrawals += cashflow.amount,
        }
    }
    flows.net_flow = flows.deposits - flows.withdrawals;
    flows
}

/// Sum of already computed breakdown accruals.
pub fn total_accrual(breakdowns: &[AccountBreakdown]) -> AccrualSummary {
    breakdowns
        .iter()
        .fold(AccrualSummary::default(), |mut total, row| {
            total.combine(&row.accrual);
            total
        })
}
