//! Comparison of two tax systems and income sweeps across a range.
//!
//! A [`SystemComparison`] evaluates the same taxpayer and income under a
//! "current" and a "reference" [`TaxSystem`]. [`SystemComparison::sweep`]
//! repeats that for every amount of an [`IncomeSweep`], which is the data
//! behind effective/marginal rate and net income change charts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::TaxSystem;
use crate::calculations::common::round_whole_half_ceiling;
use crate::{IncomeComponents, IncomeType, TaxCalculationResult, TaxpayerCharacteristics};

/// An inclusive range of income amounts visited in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSweep {
    pub start: Decimal,
    pub end: Decimal,
    pub step: Decimal,
}

impl IncomeSweep {
    pub fn new(
        start: Decimal,
        end: Decimal,
        step: Decimal,
    ) -> Self {
        Self { start, end, step }
    }

    /// Income amounts from `start` to `end` inclusive.
    ///
    /// A zero or negative step yields `start` alone.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::calculations::IncomeSweep;
    ///
    /// let amounts: Vec<_> = IncomeSweep::new(dec!(0), dec!(300), dec!(120)).amounts().collect();
    ///
    /// assert_eq!(amounts, vec![dec!(0), dec!(120), dec!(240)]);
    /// ```
    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + use<> {
        let Self { start, end, step } = *self;
        let mut next = Some(start);

        std::iter::from_fn(move || {
            let current = next.filter(|amount| *amount <= end)?;
            next = (step > Decimal::ZERO).then(|| current + step);
            Some(current)
        })
    }
}

impl Default for IncomeSweep {
    fn default() -> Self {
        Self::new(dec!(0), dec!(180000), dec!(120))
    }
}

/// One taxpayer and income evaluated under both systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub current: TaxCalculationResult,
    pub reference: TaxCalculationResult,
    /// Current minus reference net income, rounded to whole units with
    /// midpoints toward positive infinity.
    pub net_income_change: Decimal,
    pub effective_tax_rate_change: Decimal,
    pub marginal_tax_rate_change: Decimal,
}

/// Rates and net income change at one income amount of a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePoint {
    pub income: Decimal,
    pub current_effective_tax_rate: Decimal,
    pub current_marginal_tax_rate: Decimal,
    pub reference_effective_tax_rate: Decimal,
    pub reference_marginal_tax_rate: Decimal,
    pub net_income_change: Decimal,
}

/// A current and a reference tax system evaluated side by side.
#[derive(Debug, Clone, Copy)]
pub struct SystemComparison<'a> {
    current: &'a TaxSystem,
    reference: &'a TaxSystem,
}

impl<'a> SystemComparison<'a> {
    pub fn new(
        current: &'a TaxSystem,
        reference: &'a TaxSystem,
    ) -> Self {
        Self { current, reference }
    }

    pub fn compare(
        &self,
        demographics: &TaxpayerCharacteristics,
        income: &IncomeComponents,
    ) -> ComparisonPoint {
        let current = self.current.calculate(demographics, income);
        let reference = self.reference.calculate(demographics, income);

        ComparisonPoint {
            net_income_change: round_whole_half_ceiling(
                current.burden.net_income - reference.burden.net_income,
            ),
            effective_tax_rate_change: current.effective_tax_rate - reference.effective_tax_rate,
            marginal_tax_rate_change: current.marginal_tax_rate - reference.marginal_tax_rate,
            current,
            reference,
        }
    }

    /// Compares both systems at every amount of `sweep`, placing the amount
    /// in the income stream selected by `income_type`.
    pub fn sweep(
        &self,
        demographics: &TaxpayerCharacteristics,
        income_type: IncomeType,
        sweep: &IncomeSweep,
    ) -> Vec<RatePoint> {
        let points: Vec<RatePoint> = sweep
            .amounts()
            .map(|amount| {
                let income = IncomeComponents::from_income_type(income_type, amount);
                let point = self.compare(demographics, &income);

                RatePoint {
                    income: amount,
                    current_effective_tax_rate: point.current.effective_tax_rate,
                    current_marginal_tax_rate: point.current.marginal_tax_rate,
                    reference_effective_tax_rate: point.reference.effective_tax_rate,
                    reference_marginal_tax_rate: point.reference.marginal_tax_rate,
                    net_income_change: point.net_income_change,
                }
            })
            .collect();

        debug!(
            income_type = income_type.as_str(),
            points = points.len(),
            "Completed income sweep"
        );

        points
    }
}
