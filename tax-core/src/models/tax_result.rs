use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mandatory payroll contributions, reported apart from taxes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxlikeContributions {
    pub pension: Decimal,
    pub unemployment: Decimal,
    pub illness: Decimal,
    pub total: Decimal,
}

/// Deductions made from earned income before taxes are computed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deductions {
    pub natural: Decimal,
    pub pension_income: Decimal,
    pub basic: Decimal,
    pub union_fee: Decimal,
    pub total: Decimal,
}

/// Statutory taxes. `total` is after the work income deduction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Taxes {
    pub state_income: Decimal,
    pub municipal: Decimal,
    pub church: Decimal,
    pub health_insurance: Decimal,
    pub radio: Decimal,
    pub additional_pension: Decimal,
    pub total: Decimal,
}

/// Full breakdown of one pass through the calculation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxBurdenResult {
    pub total_earned_income: Decimal,
    pub total_tax_burden: Decimal,
    pub taxlike_contributions: TaxlikeContributions,
    pub pure_earned_income: Decimal,
    pub deductions: Deductions,
    pub taxable_earned_income: Decimal,
    pub taxes: Taxes,
    pub work_income_deduction: Decimal,
    pub net_income: Decimal,
}

/// A [`TaxBurdenResult`] with effective and marginal tax rates, both in
/// percent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    #[serde(flatten)]
    pub burden: TaxBurdenResult,
    pub effective_tax_rate: Decimal,
    pub marginal_tax_rate: Decimal,
}
