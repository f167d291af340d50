//! Accounts module - managed accounts and their payout terms.

mod accounts_model;


pub use accounts_model::{
    ConnectionStatus, ManagedAccount, PayoutStructure, Platform, SettlementFrequency,
};
