use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;

/// A complete, versionable set of tax-system parameters.
///
/// Rates are percentages as a person would enter them (`7.15` meaning
/// 7.15 %); thresholds and amounts are currency units. [`TaxSystem::new`]
/// converts every rate to a fraction exactly once.
///
/// [`TaxSystem::new`]: crate::TaxSystem::new
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxParameters {
    // Pension contribution
    pub pension_standard_rate: Decimal,
    pub pension_senior_rate: Decimal,

    // Unemployment insurance
    pub unemployment_rate: Decimal,

    // Illness insurance
    pub illness_rate: Decimal,
    pub illness_threshold: Decimal,

    // State income tax
    pub state_income_tax_brackets: Vec<TaxBracket>,

    pub municipal_rate: Decimal,
    pub church_rate: Decimal,

    // Public health insurance
    pub health_work_rate: Decimal,
    pub health_other_rate: Decimal,

    // Public radio tax
    pub radio_rate: Decimal,
    pub radio_threshold: Decimal,
    pub radio_max_tax: Decimal,

    // Additional pension tax
    pub pension_additional_rate: Decimal,
    pub pension_additional_threshold: Decimal,

    // Deductions
    pub natural_deduction_min: Decimal,
    pub pension_deduction_base: Decimal,
    pub pension_deduction_reduction_rate: Decimal,
    pub basic_deduction_base: Decimal,
    pub basic_deduction_reduction_rate: Decimal,
    pub work_deduction_enabled: bool,
    pub work_deduction_rate: Decimal,
    pub work_deduction_standard_max: Decimal,
    pub work_deduction_senior_max: Decimal,
    pub work_deduction_child_bonus: Decimal,
    pub work_deduction_reduction_rate1: Decimal,
    pub work_deduction_reduction_threshold1: Decimal,
    pub work_deduction_reduction_threshold2: Decimal,
    pub work_deduction_reduction_rate2: Decimal,
    pub union_fee_deductible: bool,

    /// Fixed earned-income deduction. Carried in every parameter set but not
    /// applied by the current pipeline.
    #[serde(default)]
    pub earned_income_deduction: Decimal,
}

/// A named parameter set offered for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxParameterPreset {
    pub name: String,
    pub description: String,
    pub parameters: TaxParameters,
}
