//! Taxlike contributions: pension, unemployment and illness insurance.
//!
//! Each contribution depends only on the taxpayer's age and work income, and
//! all rates are fractions (`0.0715`, not `7.15`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::CalculationContext;

/// Earnings-related pension contribution with a higher rate for an
/// inclusive middle-age band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PensionContribution {
    standard_rate: Decimal,
    senior_rate: Decimal,
    senior_age_min: u32,
    senior_age_max: u32,
}

impl PensionContribution {
    pub fn new(
        standard_rate: Decimal,
        senior_rate: Decimal,
        senior_age_min: u32,
        senior_age_max: u32,
    ) -> Self {
        Self {
            standard_rate,
            senior_rate,
            senior_age_min,
            senior_age_max,
        }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let age = context.person().age;
        let rate = if (self.senior_age_min..=self.senior_age_max).contains(&age) {
            self.senior_rate
        } else {
            self.standard_rate
        };

        context.income().work_income * rate
    }
}

impl Default for PensionContribution {
    fn default() -> Self {
        Self::new(dec!(0.0715), dec!(0.0865), 53, 62)
    }
}

/// Unemployment insurance contribution, not charged from the exemption age on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnemploymentInsuranceContribution {
    rate: Decimal,
    exemption_age: u32,
}

impl UnemploymentInsuranceContribution {
    pub fn new(
        rate: Decimal,
        exemption_age: u32,
    ) -> Self {
        Self {
            rate,
            exemption_age,
        }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        if context.person().age >= self.exemption_age {
            return Decimal::ZERO;
        }

        context.income().work_income * self.rate
    }
}

impl Default for UnemploymentInsuranceContribution {
    fn default() -> Self {
        Self::new(dec!(0.0059), 65)
    }
}

/// Daily-allowance part of illness insurance.
///
/// Charged on the whole work income once it reaches the threshold; income
/// exactly at the threshold is charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllnessInsuranceContribution {
    rate: Decimal,
    threshold: Decimal,
    exemption_age: u32,
}

impl IllnessInsuranceContribution {
    pub fn new(
        rate: Decimal,
        threshold: Decimal,
        exemption_age: u32,
    ) -> Self {
        Self {
            rate,
            threshold,
            exemption_age,
        }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let work_income = context.income().work_income;
        if context.person().age >= self.exemption_age || work_income < self.threshold {
            return Decimal::ZERO;
        }

        work_income * self.rate
    }
}

impl Default for IllnessInsuranceContribution {
    fn default() -> Self {
        Self::new(dec!(0.0084), dec!(16862), 68)
    }
}
