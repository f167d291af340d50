//! Activities module - trades, cashflows and snapshots recorded on an account.

mod activities_model;


pub use activities_model::{AccountSnapshot, Cashflow, CashflowKind, Trade, TradeSide};
