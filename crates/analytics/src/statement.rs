use core_types::IncomeStatementRaw;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An income statement broken down so that it always balances:
/// `revenue - cost_of_revenue - operating_expenses == net_income`.
///
/// Only `StatementBalancer` builds these. `operating_expenses` is a plug value chosen to
/// make the identity hold, not an audited line item. When the source had no cost of
/// revenue it also absorbs whatever that cost would have been.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedIncomeStatement {
    revenue: Decimal,
    cost_of_revenue: Decimal,
    gross_profit: Decimal,
    #[serde(rename = "op_expenses")]
    operating_expenses: Decimal,
    net_income: Decimal,
}

impl BalancedIncomeStatement {
    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    pub fn cost_of_revenue(&self) -> Decimal {
        self.cost_of_revenue
    }

    pub fn gross_profit(&self) -> Decimal {
        self.gross_profit
    }

    /// The balancing residual `gross_profit - net_income`.
    pub fn operating_expenses(&self) -> Decimal {
        self.operating_expenses
    }

    pub fn net_income(&self) -> Decimal {
        self.net_income
    }
}

/// Treats revenue and net income as trusted anchors and derives the remaining lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatementBalancer;

impl StatementBalancer {
    pub fn new() -> Self {
        Self
    }

    /// Reconciles one period. Never fails; negative and zero figures pass through unjudged.
    pub fn balance(&self, raw: &IncomeStatementRaw) -> BalancedIncomeStatement {
        let cost_of_revenue = raw.cost_of_revenue.unwrap_or_else(|| {
            tracing::debug!("No cost of revenue reported; substituting 0.");
            Decimal::ZERO
        });

        let gross_profit = raw.revenue - cost_of_revenue;
        let operating_expenses = gross_profit - raw.net_income;

        BalancedIncomeStatement {
            revenue: raw.revenue,
            cost_of_revenue,
            gross_profit,
            operating_expenses,
            net_income: raw.net_income,
        }
    }
}
