//! Sort keys for each dashboard table, and the row accessors behind them.
//!
//! Labels are the column names the dashboard sends (`"totalAccrued"`,
//! `"maxDD"`, ...). Parsing ignores case; an unknown label is a
//! configuration error.

use std::str::FromStr;

use crate::errors::ConfigurationError;
use crate::payments::PaymentKind;
use crate::portfolio::rollup::{AccountBreakdown, AccountOverview, PaymentLedgerRow};

use super::sort_filter::{Searchable, SortDirection, SortKey, SortSpec, SortValue, Sortable};

fn unknown(entity: &'static str, key: &str) -> ConfigurationError {
    ConfigurationError::UnknownSortKey {
        entity,
        key: key.to_string(),
    }
}

// ==================== Client accruals table ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountBreakdownSortKey {
    Name,
    AccountNumber,
    NetPnl,
    Lots,
    TradeCount,
    ShareEarned,
    RebateEarned,
    TotalAccrued,
    MaxDrawdown,
}

impl AccountBreakdownSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::AccountNumber => "accountNumber",
            Self::NetPnl => "netPnL",
            Self::Lots => "lots",
            Self::TradeCount => "tradeCount",
            Self::ShareEarned => "shareEarned",
            Self::RebateEarned => "rebateEarned",
            Self::TotalAccrued => "totalAccrued",
            Self::MaxDrawdown => "maxDD",
        }
    }
}

impl FromStr for AccountBreakdownSortKey {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "accountnumber" => Ok(Self::AccountNumber),
            "netpnl" => Ok(Self::NetPnl),
            "lots" | "lotstraded" => Ok(Self::Lots),
            "tradecount" => Ok(Self::TradeCount),
            "shareearned" | "profitshare" => Ok(Self::ShareEarned),
            "rebateearned" | "rebate" => Ok(Self::RebateEarned),
            "totalaccrued" => Ok(Self::TotalAccrued),
            "maxdd" => Ok(Self::MaxDrawdown),
            _ => Err(unknown("account breakdown", s)),
        }
    }
}

impl SortKey for AccountBreakdownSortKey {
    const FIRST_DIRECTION: SortDirection = SortDirection::Desc;

    fn default_spec() -> SortSpec<Self> {
        SortSpec::descending(Self::TotalAccrued)
    }
}

impl Sortable for AccountBreakdown {
    type Key = AccountBreakdownSortKey;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_> {
        match key {
            AccountBreakdownSortKey::Name => SortValue::Text(&self.name),
            AccountBreakdownSortKey::AccountNumber => SortValue::Text(&self.account_number),
            AccountBreakdownSortKey::NetPnl => SortValue::Number(self.accrual.net_pnl),
            AccountBreakdownSortKey::Lots => SortValue::Number(self.accrual.lots_traded),
            AccountBreakdownSortKey::TradeCount => {
                SortValue::Count(self.accrual.trade_count as u64)
            }
            AccountBreakdownSortKey::ShareEarned => SortValue::Number(self.accrual.profit_share),
            AccountBreakdownSortKey::RebateEarned => SortValue::Number(self.accrual.rebate),
            AccountBreakdownSortKey::TotalAccrued => SortValue::Number(self.accrual.total_accrued),
            AccountBreakdownSortKey::MaxDrawdown => SortValue::Number(self.max_drawdown_percent),
        }
    }
}

impl Searchable for AccountBreakdown {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

// ==================== Accounts table ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountOverviewSortKey {
    Name,
    AccountNumber,
    Broker,
    VpsName,
    Status,
    Balance,
    Equity,
    MarginPercent,
    LivePnl,
    OpenPositions,
    CurrentDrawdown,
    MaxDrawdown,
}

impl AccountOverviewSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::AccountNumber => "accountNumber",
            Self::Broker => "broker",
            Self::VpsName => "vpsName",
            Self::Status => "status",
            Self::Balance => "balance",
            Self::Equity => "equity",
            Self::MarginPercent => "marginPercent",
            Self::LivePnl => "livePnL",
            Self::OpenPositions => "openPositions",
            Self::CurrentDrawdown => "currentDDPercent",
            Self::MaxDrawdown => "maxDD",
        }
    }
}

impl FromStr for AccountOverviewSortKey {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "accountnumber" => Ok(Self::AccountNumber),
            "broker" => Ok(Self::Broker),
            "vpsname" => Ok(Self::VpsName),
            "status" => Ok(Self::Status),
            "balance" => Ok(Self::Balance),
            "equity" => Ok(Self::Equity),
            "marginpercent" => Ok(Self::MarginPercent),
            "livepnl" => Ok(Self::LivePnl),
            "openpositions" => Ok(Self::OpenPositions),
            "currentddpercent" => Ok(Self::CurrentDrawdown),
            "maxdd" => Ok(Self::MaxDrawdown),
            _ => Err(unknown("account overview", s)),
        }
    }
}

impl SortKey for AccountOverviewSortKey {
    const FIRST_DIRECTION: SortDirection = SortDirection::Asc;

    fn default_spec() -> SortSpec<Self> {
        SortSpec::descending(Self::Balance)
    }
}

impl Sortable for AccountOverview {
    type Key = AccountOverviewSortKey;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_> {
        match key {
            AccountOverviewSortKey::Name => SortValue::Text(&self.name),
            AccountOverviewSortKey::AccountNumber => SortValue::Text(&self.account_number),
            AccountOverviewSortKey::Broker => SortValue::Text(&self.broker),
            AccountOverviewSortKey::VpsName => SortValue::Text(&self.vps_name),
            AccountOverviewSortKey::Status => SortValue::Text(self.status.as_str()),
            AccountOverviewSortKey::Balance => SortValue::Number(self.balance),
            AccountOverviewSortKey::Equity => SortValue::Number(self.equity),
            AccountOverviewSortKey::MarginPercent => SortValue::Number(self.margin_percent),
            AccountOverviewSortKey::LivePnl => SortValue::Number(self.live_pnl),
            AccountOverviewSortKey::OpenPositions => {
                SortValue::Count(u64::from(self.open_positions))
            }
            AccountOverviewSortKey::CurrentDrawdown => {
                SortValue::Number(self.current_drawdown_percent)
            }
            AccountOverviewSortKey::MaxDrawdown => SortValue::Number(self.max_drawdown_percent),
        }
    }
}

impl Searchable for AccountOverview {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.account_number.as_str(),
            self.broker.as_str(),
            self.vps_name.as_str(),
        ]
    }
}

// ==================== Payment ledger ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentSortKey {
    AccountName,
    AccountNumber,
    Kind,
    Amount,
    DueDate,
    Status,
    PeriodLabel,
}

impl PaymentSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountName => "accountName",
            Self::AccountNumber => "accountNumber",
            Self::Kind => "type",
            Self::Amount => "amount",
            Self::DueDate => "dueDate",
            Self::Status => "status",
            Self::PeriodLabel => "periodLabel",
        }
    }
}

impl FromStr for PaymentSortKey {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accountname" => Ok(Self::AccountName),
            "accountnumber" => Ok(Self::AccountNumber),
            "type" => Ok(Self::Kind),
            "amount" => Ok(Self::Amount),
            "duedate" => Ok(Self::DueDate),
            "status" => Ok(Self::Status),
            "periodlabel" => Ok(Self::PeriodLabel),
            _ => Err(unknown("payment", s)),
        }
    }
}

impl SortKey for PaymentSortKey {
    const FIRST_DIRECTION: SortDirection = SortDirection::Desc;

    fn default_spec() -> SortSpec<Self> {
        SortSpec::descending(Self::Amount)
    }
}

impl Sortable for PaymentLedgerRow {
    type Key = PaymentSortKey;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_> {
        match key {
            PaymentSortKey::AccountName => SortValue::Text(&self.account_name),
            PaymentSortKey::AccountNumber => SortValue::Text(&self.account_number),
            PaymentSortKey::Kind => SortValue::Text(match self.kind {
                PaymentKind::PnlShare => "PNL_SHARE",
                PaymentKind::Rebate => "REBATE",
            }),
            PaymentSortKey::Amount => SortValue::Number(self.amount),
            PaymentSortKey::DueDate => SortValue::Date(self.due_date),
            PaymentSortKey::Status => SortValue::Text(self.status.as_str()),
            PaymentSortKey::PeriodLabel => SortValue::Text(&self.period_label),
        }
    }
}

impl Searchable for PaymentLedgerRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.account_name.as_str(), self.account_number.as_str()]
    }
}
