//! Income statement and balance sheet expanded from revenue and costs.
//!
//! The splits are fixed proportions; they do not vary by sector.

use sim_core::AccountingStatement;

pub const REVENUE_DEDUCTION_RATE: f64 = 0.15;
const SALES_TAX_SHARE: f64 = 0.70;
const RETURNS_SHARE: f64 = 0.20;
const DISCOUNTS_SHARE: f64 = 0.10;

pub const COGS_SHARE: f64 = 0.60;
pub const OPEX_SHARE: f64 = 1.0 - COGS_SHARE;
const SELLING_SHARE: f64 = 0.625;
const ADMINISTRATIVE_SHARE: f64 = 0.25;
const GENERAL_SHARE: f64 = 0.075;
const OTHER_SHARE: f64 = 0.05;

/// Selling and marketing expense as a share of total costs.
pub const MARKETING_EXPENSE_SHARE: f64 = OPEX_SHARE * SELLING_SHARE;

const DEPRECIATION_RATE: f64 = 0.02;
const INCOME_TAX_RATE: f64 = 0.34;

const CASH_SHARE_OF_NET_REVENUE: f64 = 0.15;
const RECEIVABLES_SHARE_OF_NET_REVENUE: f64 = 0.20;
const INVENTORY_SHARE_OF_COGS: f64 = 0.25;
const FIXED_ASSETS_SHARE_OF_COSTS: f64 = 0.50;
const INTANGIBLES_SHARE_OF_COSTS: f64 = 0.10;
const SUPPLIERS_SHARE_OF_COGS: f64 = 0.30;
const UNPAID_SALES_TAX_SHARE: f64 = 0.25;
const PAYROLL_SHARE_OF_ADMIN: f64 = 0.40;
const LOANS_SHARE_OF_COSTS: f64 = 0.20;

/// Share of the team budget booked as paid-in capital.
pub const CAPITAL_SHARE_OF_BUDGET: f64 = 0.5;

/// Net revenue after sales deductions.
pub fn net_revenue(revenue: f64) -> f64 {
    revenue * (1.0 - REVENUE_DEDUCTION_RATE)
}

/// Expand revenue and costs into a full statement.
///
/// Retained earnings is the residual that closes the balance sheet, so
/// `total_assets == total_liabilities + equity` for every input.
pub fn derive_accounting(
    revenue: f64,
    costs: f64,
    capital_stock: f64,
    previous_accumulated_profit: f64,
) -> AccountingStatement {
    let gross_revenue = revenue;
    let deductions = revenue * REVENUE_DEDUCTION_RATE;
    let sales_taxes = deductions * SALES_TAX_SHARE;
    let returns = deductions * RETURNS_SHARE;
    let discounts = deductions * DISCOUNTS_SHARE;
    let net_revenue = gross_revenue - sales_taxes - returns - discounts;

    let cogs = costs * COGS_SHARE;
    let gross_profit = net_revenue - cogs;
    let operating_expenses = costs * OPEX_SHARE;
    let selling_expenses = operating_expenses * SELLING_SHARE;
    let administrative_expenses = operating_expenses * ADMINISTRATIVE_SHARE;
    let general_expenses = operating_expenses * GENERAL_SHARE;
    let other_expenses = operating_expenses * OTHER_SHARE;

    let ebitda = gross_profit - operating_expenses;
    let depreciation = costs * DEPRECIATION_RATE;
    let ebit = ebitda - depreciation;
    let financial_result = 0.0;
    let pre_tax_income = ebit + financial_result;
    let income_tax = pre_tax_income.max(0.0) * INCOME_TAX_RATE;
    let net_income = pre_tax_income - income_tax;
    let accumulated_profit = previous_accumulated_profit + net_income;

    let cash = (net_revenue * CASH_SHARE_OF_NET_REVENUE).max(0.0);
    let receivables = net_revenue * RECEIVABLES_SHARE_OF_NET_REVENUE;
    let inventory = cogs * INVENTORY_SHARE_OF_COGS;
    let current_assets = cash + receivables + inventory;
    let fixed_assets = costs * FIXED_ASSETS_SHARE_OF_COSTS;
    let intangible_assets = costs * INTANGIBLES_SHARE_OF_COSTS;
    let non_current_assets = fixed_assets + intangible_assets;
    let total_assets = current_assets + non_current_assets;

    let suppliers = cogs * SUPPLIERS_SHARE_OF_COGS;
    let tax_obligations = income_tax + sales_taxes * UNPAID_SALES_TAX_SHARE;
    let payroll_obligations = administrative_expenses * PAYROLL_SHARE_OF_ADMIN;
    let current_liabilities = suppliers + tax_obligations + payroll_obligations;
    let long_term_loans = costs * LOANS_SHARE_OF_COSTS;
    let non_current_liabilities = long_term_loans;
    let total_liabilities = current_liabilities + non_current_liabilities;

    let retained_earnings = total_assets - total_liabilities - capital_stock;
    let equity = capital_stock + retained_earnings;

    AccountingStatement {
        gross_revenue,
        sales_taxes,
        returns,
        discounts,
        net_revenue,
        cogs,
        gross_profit,
        selling_expenses,
        administrative_expenses,
        general_expenses,
        other_expenses,
        operating_expenses,
        ebitda,
        depreciation,
        ebit,
        financial_result,
        pre_tax_income,
        income_tax,
        net_income,
        previous_accumulated_profit,
        accumulated_profit,
        cash,
        receivables,
        inventory,
        current_assets,
        fixed_assets,
        intangible_assets,
        non_current_assets,
        total_assets,
        suppliers,
        tax_obligations,
        payroll_obligations,
        current_liabilities,
        long_term_loans,
        non_current_liabilities,
        total_liabilities,
        capital_stock,
        retained_earnings,
        equity,
        total_liabilities_and_equity: total_liabilities + equity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_add_up() {
        let s = derive_accounting(100_000.0, 60_000.0, 50_000.0, 0.0);
        assert!((s.net_revenue - 85_000.0).abs() < 1e-6);
        assert!((s.sales_taxes - 10_500.0).abs() < 1e-6);
        assert!((s.cogs - 36_000.0).abs() < 1e-6);
        assert!((s.selling_expenses - 15_000.0).abs() < 1e-6);
        let opex = s.selling_expenses
            + s.administrative_expenses
            + s.general_expenses
            + s.other_expenses;
        assert!((opex - s.operating_expenses).abs() < 1e-6);
    }

    #[test]
    fn no_income_tax_on_losses() {
        let s = derive_accounting(1_000.0, 50_000.0, 10_000.0, 5_000.0);
        assert!(s.pre_tax_income < 0.0);
        assert_eq!(s.income_tax, 0.0);
        assert!((s.accumulated_profit - (5_000.0 + s.net_income)).abs() < 1e-9);
    }

    #[test]
    fn zero_inputs_balance() {
        let s = derive_accounting(0.0, 0.0, 0.0, 0.0);
        assert_eq!(s.total_assets, 0.0);
        assert_eq!(s.balance_gap(), 0.0);
    }

    proptest! {
        #[test]
        fn balance_sheet_identity(rev in 0.0f64..10_000_000.0,
                                  costs in 0.0f64..10_000_000.0,
                                  capital in 0.0f64..5_000_000.0,
                                  prev in -1_000_000.0f64..1_000_000.0) {
            let s = derive_accounting(rev, costs, capital, prev);
            prop_assert!(s.balance_gap().abs() < 0.01);
            prop_assert!((s.total_assets - s.total_liabilities_and_equity).abs() < 0.01);
        }
    }
}
