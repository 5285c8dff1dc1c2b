//! KPI bundle: the canonical output shape of both engine strategies.

use serde::{Deserialize, Serialize};

/// The four 0-100 marketing-mix sub-scores a bundle was derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MixScores {
    pub product: f64,
    pub price: f64,
    pub place: f64,
    pub promotion: f64,
}

/// Income statement (DRE) and balance sheet expanded from revenue and costs.
///
/// `total_assets == total_liabilities + equity` holds by construction:
/// retained earnings is the balancing residual.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountingStatement {
    // Income statement
    pub gross_revenue: f64,
    pub sales_taxes: f64,
    pub returns: f64,
    pub discounts: f64,
    pub net_revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub selling_expenses: f64,
    pub administrative_expenses: f64,
    pub general_expenses: f64,
    pub other_expenses: f64,
    pub operating_expenses: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub financial_result: f64,
    pub pre_tax_income: f64,
    pub income_tax: f64,
    pub net_income: f64,
    pub previous_accumulated_profit: f64,
    pub accumulated_profit: f64,

    // Balance sheet
    pub cash: f64,
    pub receivables: f64,
    pub inventory: f64,
    pub current_assets: f64,
    pub fixed_assets: f64,
    pub intangible_assets: f64,
    pub non_current_assets: f64,
    pub total_assets: f64,
    pub suppliers: f64,
    pub tax_obligations: f64,
    pub payroll_obligations: f64,
    pub current_liabilities: f64,
    pub long_term_loans: f64,
    pub non_current_liabilities: f64,
    pub total_liabilities: f64,
    pub capital_stock: f64,
    pub retained_earnings: f64,
    pub equity: f64,
    pub total_liabilities_and_equity: f64,
}

impl AccountingStatement {
    /// Difference between both sides of the balance sheet.
    pub fn balance_gap(&self) -> f64 {
        self.total_assets - (self.current_liabilities + self.non_current_liabilities + self.equity)
    }
}

/// Financial and marketing KPIs for one product or one team in one round.
///
/// Percentages are expressed in points (12.5 = 12.5%). Values are kept at
/// full precision; rounding happens when the bundle is persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiBundle {
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64,
    pub margin: f64,
    pub market_share: f64,
    pub roi: f64,
    pub brand_perception: f64,
    pub customer_satisfaction: f64,
    pub customer_loyalty: f64,
    pub cac: f64,
    pub ltv: f64,
    pub conversion_rate: f64,
    pub average_ticket: f64,
    pub ltv_to_cac_ratio: f64,
    pub nps: f64,
    pub average_conversion_days: f64,
    pub contribution_margin: f64,
    pub gross_revenue: f64,
    pub net_revenue: f64,
    pub customers: f64,
    pub scores: MixScores,
    pub accounting: AccountingStatement,
}

impl KpiBundle {
    /// Whether every scalar KPI is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.revenue,
            self.costs,
            self.profit,
            self.margin,
            self.market_share,
            self.roi,
            self.brand_perception,
            self.customer_satisfaction,
            self.customer_loyalty,
            self.cac,
            self.ltv,
            self.conversion_rate,
            self.average_ticket,
            self.ltv_to_cac_ratio,
            self.nps,
            self.average_conversion_days,
            self.contribution_margin,
            self.gross_revenue,
            self.net_revenue,
            self.customers,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
