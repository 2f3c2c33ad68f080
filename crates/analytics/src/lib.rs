//! # Stockdesk Analytics Engine
//!
//! This crate derives the numbers shown for every instrument: a drawdown curve with
//! annualized risk ratios, and a self-balancing breakdown of the latest income statement.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Total Functions:** Neither component returns an error. Degenerate inputs (an empty
//!   series, zero volatility, a missing cost of revenue) resolve to documented zero values.
//! - **Stateless Calculation:** `RiskMetricsEngine` and `StatementBalancer` hold only their
//!   configuration, so one instance can be shared across concurrent per-instrument tasks.
//!
//! ## Public API
//!
//! - `RiskMetricsEngine`: drawdown curve, Sharpe and Sortino ratios over a `PriceSeries`.
//! - `StatementBalancer`: reconciles an `IncomeStatementRaw` into a `BalancedIncomeStatement`.
//! - `RiskProfile`, `RiskMetrics`, `DrawdownPoint`: the engine's outputs.

pub mod engine;
pub mod report;
pub mod statement;
mod stats;

pub use engine::RiskMetricsEngine;
pub use report::{DrawdownPoint, RiskMetrics, RiskProfile};
pub use statement::{BalancedIncomeStatement, StatementBalancer};
