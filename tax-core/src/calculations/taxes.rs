//! Statutory taxes levied on earned income.
//!
//! State, municipal and church tax and the health insurance contribution are
//! computed on taxable earned income. The radio tax uses pure earned income
//! and the additional pension tax uses raw pension income.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::TaxBracket;
use crate::calculations::CalculationContext;

/// Progressive state income tax over a marginal bracket schedule.
///
/// Brackets are used in the given order and must be contiguous and
/// ascending; they are not validated here. Rates are fractions.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{IncomeComponents, TaxpayerCharacteristics};
/// use tax_core::calculations::{CalculationContext, StateIncomeTax};
///
/// let person = TaxpayerCharacteristics::default();
/// let income = IncomeComponents::new(dec!(35000), dec!(0), dec!(0));
/// let context = CalculationContext::new(&person, &income)
///     .with_taxable_earned_income(dec!(35000));
///
/// // 21200 * 0.1264 + 10300 * 0.19 + 3500 * 0.3025
/// assert_eq!(StateIncomeTax::default().calculate(&context), dec!(5695.43));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateIncomeTax {
    brackets: Vec<TaxBracket>,
}

impl StateIncomeTax {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let taxable_income = context.taxable_earned_income();
        let mut tax = Decimal::ZERO;

        for bracket in &self.brackets {
            if taxable_income <= bracket.min {
                break;
            }

            let upper = bracket
                .max
                .map_or(taxable_income, |max| taxable_income.min(max));
            tax += (upper - bracket.min) * bracket.rate;
        }

        tax
    }
}

impl Default for StateIncomeTax {
    fn default() -> Self {
        Self::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(21200)), dec!(0.1264)),
            TaxBracket::new(dec!(21200), Some(dec!(31500)), dec!(0.19)),
            TaxBracket::new(dec!(31500), Some(dec!(52100)), dec!(0.3025)),
            TaxBracket::new(dec!(52100), Some(dec!(88200)), dec!(0.34)),
            TaxBracket::new(dec!(88200), Some(dec!(150000)), dec!(0.4175)),
            TaxBracket::unbounded(dec!(150000), dec!(0.4425)),
        ])
    }
}

/// Flat municipal income tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalIncomeTax {
    rate: Decimal,
}

impl MunicipalIncomeTax {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        context.taxable_earned_income() * self.rate
    }
}

impl Default for MunicipalIncomeTax {
    fn default() -> Self {
        Self::new(dec!(0.0754))
    }
}

/// Church tax, charged from church members only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchTax {
    rate: Decimal,
}

impl ChurchTax {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        if !context.person().is_church_member {
            return Decimal::ZERO;
        }

        context.taxable_earned_income() * self.rate
    }
}

impl Default for ChurchTax {
    fn default() -> Self {
        Self::new(dec!(0.0138))
    }
}

/// Medical-care part of public health insurance.
///
/// Taxable earned income is attributed to work income first, up to the raw
/// work income; whatever remains is charged at the rate for other income.
/// Pension and other earned income share that second rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicHealthInsuranceContribution {
    work_income_rate: Decimal,
    other_income_rate: Decimal,
}

impl PublicHealthInsuranceContribution {
    pub fn new(
        work_income_rate: Decimal,
        other_income_rate: Decimal,
    ) -> Self {
        Self {
            work_income_rate,
            other_income_rate,
        }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let taxable_earned_income = context.taxable_earned_income();
        let taxable_work_income = context.income().work_income.min(taxable_earned_income);
        let taxable_other_income = taxable_earned_income - taxable_work_income;

        taxable_work_income * self.work_income_rate
            + taxable_other_income * self.other_income_rate
    }
}

impl Default for PublicHealthInsuranceContribution {
    fn default() -> Self {
        Self::new(dec!(0.0106), dec!(0.0145))
    }
}

/// Public broadcasting tax on pure earned income above a threshold, capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRadioTax {
    rate: Decimal,
    threshold: Decimal,
    max_tax: Decimal,
}

impl PublicRadioTax {
    pub fn new(
        rate: Decimal,
        threshold: Decimal,
        max_tax: Decimal,
    ) -> Self {
        Self {
            rate,
            threshold,
            max_tax,
        }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let taxable_amount = (context.pure_earned_income() - self.threshold).max(Decimal::ZERO);

        (taxable_amount * self.rate).min(self.max_tax)
    }
}

impl Default for PublicRadioTax {
    fn default() -> Self {
        Self::new(dec!(0.025), dec!(14000), dec!(163))
    }
}

/// Additional tax on raw pension income above a threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalPensionTax {
    rate: Decimal,
    threshold: Decimal,
}

impl AdditionalPensionTax {
    pub fn new(
        rate: Decimal,
        threshold: Decimal,
    ) -> Self {
        Self { rate, threshold }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let taxable_amount = (context.income().pension_income - self.threshold).max(Decimal::ZERO);

        taxable_amount * self.rate
    }
}

impl Default for AdditionalPensionTax {
    fn default() -> Self {
        Self::new(dec!(0.0585), dec!(47000))
    }
}
