use rust_decimal::Decimal;

use crate::{IncomeComponents, TaxpayerCharacteristics};

/// Working state threaded through one pass of the calculation pipeline.
///
/// A context borrows the taxpayer and income for the duration of a single
/// [`TaxSystem::calculate_tax_burden`] call and cannot outlive it. The two
/// derived income figures start at zero and are filled in pipeline order:
/// `pure_earned_income` once contributions and the union fee are known,
/// `taxable_earned_income` once the earned-income deductions are applied.
///
/// [`TaxSystem::calculate_tax_burden`]: crate::TaxSystem::calculate_tax_burden
#[derive(Debug, Clone)]
pub struct CalculationContext<'a> {
    person: &'a TaxpayerCharacteristics,
    income: &'a IncomeComponents,
    total_earned_income: Decimal,
    pure_earned_income: Decimal,
    taxable_earned_income: Decimal,
}

impl<'a> CalculationContext<'a> {
    pub fn new(
        person: &'a TaxpayerCharacteristics,
        income: &'a IncomeComponents,
    ) -> Self {
        Self {
            person,
            income,
            total_earned_income: income.total(),
            pure_earned_income: Decimal::ZERO,
            taxable_earned_income: Decimal::ZERO,
        }
    }

    pub fn person(&self) -> &'a TaxpayerCharacteristics {
        self.person
    }

    pub fn income(&self) -> &'a IncomeComponents {
        self.income
    }

    pub fn total_earned_income(&self) -> Decimal {
        self.total_earned_income
    }

    pub fn pure_earned_income(&self) -> Decimal {
        self.pure_earned_income
    }

    pub fn taxable_earned_income(&self) -> Decimal {
        self.taxable_earned_income
    }

    /// Sets pure earned income out of pipeline order, for running a single
    /// calculator in isolation.
    #[doc(hidden)]
    pub fn with_pure_earned_income(
        mut self,
        value: Decimal,
    ) -> Self {
        self.pure_earned_income = value;
        self
    }

    /// Sets taxable earned income out of pipeline order, for running a single
    /// calculator in isolation.
    #[doc(hidden)]
    pub fn with_taxable_earned_income(
        mut self,
        value: Decimal,
    ) -> Self {
        self.taxable_earned_income = value;
        self
    }

    pub(crate) fn set_pure_earned_income(
        &mut self,
        value: Decimal,
    ) {
        self.pure_earned_income = value;
    }

    pub(crate) fn set_taxable_earned_income(
        &mut self,
        value: Decimal,
    ) {
        self.taxable_earned_income = value;
    }
}
