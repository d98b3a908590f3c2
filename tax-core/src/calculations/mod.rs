//! Calculation pipeline for Finnish earned income taxation.
//!
//! The contribution, deduction and tax calculators are small value types that
//! each compute one line of the breakdown from a [`CalculationContext`].
//! [`TaxSystem`] wires them together; [`SystemComparison`] evaluates two
//! systems side by side.

pub mod common;
pub mod comparison;
pub mod context;
pub mod contributions;
pub mod deductions;
pub mod tax_system;
pub mod taxes;

pub use comparison::{ComparisonPoint, IncomeSweep, RatePoint, SystemComparison};
pub use context::CalculationContext;
pub use contributions::{
    IllnessInsuranceContribution, PensionContribution, UnemploymentInsuranceContribution,
};
pub use deductions::{BasicDeduction, NaturalDeduction, PensionIncomeDeduction, WorkIncomeDeduction};
pub use tax_system::{MARGINAL_STEP, TaxSystem};
pub use taxes::{
    AdditionalPensionTax, ChurchTax, MunicipalIncomeTax, PublicHealthInsuranceContribution,
    PublicRadioTax, StateIncomeTax,
};
