//! Series module - windowed, bucketed aggregation of account history.

mod series_model;
mod series_service;


pub use series_model::{
    BucketAccumulator, BucketRow, CapitalFlow, CapitalFlowBucket, DrawdownBucket, DrawdownLevel,
    EarningsBucket, EquityBucket, EquityLevel, LotsBucket, Max, Mean, MetricBucket, PaymentFlow,
    PnlBucket, ReducePolicy, Reducer, Sum, TradeFlow,
};
pub use series_service::{
    aggregate, aggregate_metric, capital_flow_series, drawdown_series, equity_curve,
    lots_series, paid_earnings_series, pnl_series, portfolio_equity_curve,
};
