//! Earned-income deductions and the work income tax credit.
//!
//! [`PensionIncomeDeduction`] and [`BasicDeduction`] reduce the taxable
//! earned income and must be applied in that order, the basic deduction
//! seeing the income left after the pension income deduction.
//! [`WorkIncomeDeduction`] is a credit against the combined tax instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::CalculationContext;

/// Deduction for the costs of acquiring income, modelled as a flat amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalDeduction {
    minimum_amount: Decimal,
}

impl NaturalDeduction {
    pub fn new(minimum_amount: Decimal) -> Self {
        Self { minimum_amount }
    }

    pub fn calculate(&self) -> Decimal {
        self.minimum_amount
    }
}

impl Default for NaturalDeduction {
    fn default() -> Self {
        Self::new(dec!(750))
    }
}

/// Pension income deduction, phased out as pure earned income exceeds the
/// base amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PensionIncomeDeduction {
    base_amount: Decimal,
    reduction_rate: Decimal,
}

impl PensionIncomeDeduction {
    pub fn new(
        base_amount: Decimal,
        reduction_rate: Decimal,
    ) -> Self {
        Self {
            base_amount,
            reduction_rate,
        }
    }

    /// Reads pension income and the finalized pure earned income.
    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let basic_amount = context.income().pension_income.min(self.base_amount);
        let excess_income = (context.pure_earned_income() - self.base_amount).max(Decimal::ZERO);
        let reduction = excess_income * self.reduction_rate;

        (basic_amount - reduction).max(Decimal::ZERO)
    }
}

impl Default for PensionIncomeDeduction {
    fn default() -> Self {
        Self::new(dec!(11030), dec!(0.51))
    }
}

/// Basic deduction, phased out above its own base amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicDeduction {
    base_amount: Decimal,
    reduction_rate: Decimal,
}

impl BasicDeduction {
    pub fn new(
        base_amount: Decimal,
        reduction_rate: Decimal,
    ) -> Self {
        Self {
            base_amount,
            reduction_rate,
        }
    }

    /// `income` is the taxable earned income left after every earlier
    /// deduction, not a context.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let excess_income = (income - self.base_amount).max(Decimal::ZERO);
        let reduction = excess_income * self.reduction_rate;

        (self.base_amount - reduction).max(Decimal::ZERO)
    }
}

impl Default for BasicDeduction {
    fn default() -> Self {
        Self::new(dec!(4115), dec!(0.18))
    }
}

/// Work income deduction, a credit against the combined state, municipal,
/// church and health insurance taxes.
///
/// The credit is a share of work income up to a maximum that rises for
/// seniors and per dependent child (doubled for single parents), reduced in
/// two tiers as pure earned income grows. It never exceeds the tax it
/// offsets.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{IncomeComponents, TaxpayerCharacteristics};
/// use tax_core::calculations::{CalculationContext, WorkIncomeDeduction};
///
/// let person = TaxpayerCharacteristics { age: 40, ..Default::default() };
/// let income = IncomeComponents::new(dec!(30000), dec!(0), dec!(0));
/// let context = CalculationContext::new(&person, &income)
///     .with_pure_earned_income(dec!(30000));
///
/// // 3225 - (30000 - 24250) * 0.0222
/// let deduction = WorkIncomeDeduction::default().calculate(&context, dec!(5000));
/// assert_eq!(deduction, dec!(3097.35));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkIncomeDeduction {
    base_rate: Decimal,
    standard_max_amount: Decimal,
    senior_max_amount: Decimal,
    senior_age: u32,
    child_bonus: Decimal,
    reduction_rate1: Decimal,
    reduction_threshold1: Decimal,
    reduction_threshold2: Decimal,
    reduction_rate2: Decimal,
}

impl WorkIncomeDeduction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_rate: Decimal,
        standard_max_amount: Decimal,
        senior_max_amount: Decimal,
        senior_age: u32,
        child_bonus: Decimal,
        reduction_rate1: Decimal,
        reduction_threshold1: Decimal,
        reduction_threshold2: Decimal,
        reduction_rate2: Decimal,
    ) -> Self {
        Self {
            base_rate,
            standard_max_amount,
            senior_max_amount,
            senior_age,
            child_bonus,
            reduction_rate1,
            reduction_threshold1,
            reduction_threshold2,
            reduction_rate2,
        }
    }

    pub fn calculate(
        &self,
        context: &CalculationContext<'_>,
        combined_tax_before_deduction: Decimal,
    ) -> Decimal {
        let basic_amount =
            (context.income().work_income * self.base_rate).min(self.max_amount(context));
        let reduction = self.reduction(context.pure_earned_income());
        let deduction = (basic_amount - reduction).max(Decimal::ZERO);

        deduction.min(combined_tax_before_deduction)
    }

    fn max_amount(
        &self,
        context: &CalculationContext<'_>,
    ) -> Decimal {
        let person = context.person();
        let base_max_amount = if person.age >= self.senior_age {
            self.senior_max_amount
        } else {
            self.standard_max_amount
        };
        let bonus_per_child = if person.is_single_parent {
            self.child_bonus * Decimal::TWO
        } else {
            self.child_bonus
        };

        base_max_amount + Decimal::from(person.dependent_children) * bonus_per_child
    }

    fn reduction(
        &self,
        pure_earned_income: Decimal,
    ) -> Decimal {
        if pure_earned_income > self.reduction_threshold2 {
            (self.reduction_threshold2 - self.reduction_threshold1) * self.reduction_rate1
                + (pure_earned_income - self.reduction_threshold2) * self.reduction_rate2
        } else if pure_earned_income > self.reduction_threshold1 {
            (pure_earned_income - self.reduction_threshold1) * self.reduction_rate1
        } else {
            Decimal::ZERO
        }
    }
}

impl Default for WorkIncomeDeduction {
    fn default() -> Self {
        Self::new(
            dec!(0.18),
            dec!(3225),
            dec!(4425),
            65,
            dec!(50),
            dec!(0.0222),
            dec!(24250),
            dec!(42550),
            dec!(0.0344),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};

    use super::*;
    use crate::{IncomeComponents, TaxpayerCharacteristics};

    fn person(
        age: u32,
        dependent_children: u32,
    ) -> TaxpayerCharacteristics {
        TaxpayerCharacteristics {
            age,
            dependent_children,
            ..TaxpayerCharacteristics::default()
        }
    }

    fn income(
        work_income: Decimal,
        pension_income: Decimal,
    ) -> IncomeComponents {
        IncomeComponents::new(work_income, pension_income, Decimal::ZERO)
    }

    // =========================================================================
    // NaturalDeduction
    // =========================================================================

    #[test]
    fn natural_returns_default_minimum() {
        assert_eq!(NaturalDeduction::default().calculate(), dec!(750));
    }

    #[test]
    fn natural_uses_custom_minimum() {
        assert_eq!(NaturalDeduction::new(dec!(1000)).calculate(), dec!(1000));
    }

    // =========================================================================
    // PensionIncomeDeduction
    // =========================================================================

    #[test]
    fn pension_income_full_when_pension_below_base() {
        let (person, income) = (person(65, 0), income(dec!(20000), dec!(8000)));
        let context = CalculationContext::new(&person, &income).with_pure_earned_income(dec!(8000));

        assert_eq!(PensionIncomeDeduction::default().calculate(&context), dec!(8000));
    }

    #[test]
    fn pension_income_capped_at_base_and_reduced() {
        let (person, income) = (person(65, 0), income(dec!(20000), dec!(15000)));
        let context = CalculationContext::new(&person, &income).with_pure_earned_income(dec!(15000));

        // 11030 - (15000 - 11030) * 0.51
        assert_eq!(PensionIncomeDeduction::default().calculate(&context), dec!(9005.3));
    }

    #[test]
    fn pension_income_reduced_by_excess_pure_income() {
        let (person, income) = (person(65, 0), income(dec!(20000), dec!(8000)));
        let context = CalculationContext::new(&person, &income).with_pure_earned_income(dec!(15000));

        assert_eq!(PensionIncomeDeduction::default().calculate(&context), dec!(5975.3));
    }

    #[test]
    fn pension_income_zero_when_reduction_exceeds_amount() {
        let (person, income) = (person(65, 0), income(dec!(20000), dec!(5000)));
        let context = CalculationContext::new(&person, &income).with_pure_earned_income(dec!(25000));

        assert_eq!(PensionIncomeDeduction::default().calculate(&context), Decimal::ZERO);
    }

    #[test]
    fn pension_income_not_reduced_at_base_amount() {
        let (person, income) = (person(65, 0), income(dec!(20000), dec!(8000)));
        let context = CalculationContext::new(&person, &income).with_pure_earned_income(dec!(11030));

        assert_eq!(PensionIncomeDeduction::default().calculate(&context), dec!(8000));
    }

    #[test]
    fn pension_income_uses_custom_parameters() {
        let (person, income) = (person(65, 0), income(dec!(20000), dec!(8000)));
        let context = CalculationContext::new(&person, &income).with_pure_earned_income(dec!(12000));

        let deduction = PensionIncomeDeduction::new(dec!(10000), dec!(0.4));

        assert_eq!(deduction.calculate(&context), dec!(7200));
    }

    // =========================================================================
    // BasicDeduction
    // =========================================================================

    #[test]
    fn basic_full_below_base_amount() {
        assert_eq!(BasicDeduction::default().calculate(dec!(3000)), dec!(4115));
    }

    #[test]
    fn basic_full_at_base_amount() {
        assert_eq!(BasicDeduction::default().calculate(dec!(4115)), dec!(4115));
    }

    #[test]
    fn basic_reduced_above_base_amount() {
        // 4115 - (10000 - 4115) * 0.18
        assert_eq!(BasicDeduction::default().calculate(dec!(10000)), dec!(3055.7));
    }

    #[test]
    fn basic_zero_when_fully_phased_out() {
        assert_eq!(BasicDeduction::default().calculate(dec!(50000)), Decimal::ZERO);
    }

    #[test]
    fn basic_uses_custom_parameters() {
        let deduction = BasicDeduction::new(dec!(5000), dec!(0.2));

        assert_eq!(deduction.calculate(dec!(8000)), dec!(4400));
    }

    proptest! {
        #[test]
        fn basic_is_non_increasing_and_never_negative(a in 0u32..200_000, b in 0u32..200_000) {
            let deduction = BasicDeduction::default();
            let (low, high) = (Decimal::from(a.min(b)), Decimal::from(a.max(b)));

            prop_assert!(deduction.calculate(low) >= deduction.calculate(high));
            prop_assert!(deduction.calculate(high) >= Decimal::ZERO);
        }
    }

    // =========================================================================
    // WorkIncomeDeduction
    // =========================================================================

    fn work_context<'a>(
        person: &'a TaxpayerCharacteristics,
        income: &'a IncomeComponents,
        pure_earned_income: Decimal,
    ) -> CalculationContext<'a> {
        CalculationContext::new(person, income).with_pure_earned_income(pure_earned_income)
    }

    #[test]
    fn work_full_amount_below_thresholds() {
        let (person, income) = (person(40, 0), income(dec!(30000), dec!(0)));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(WorkIncomeDeduction::default().calculate(&context, dec!(5000)), dec!(3225));
    }

    #[test]
    fn work_senior_maximum_from_senior_age() {
        let (person, income) = (person(65, 0), income(dec!(30000), dec!(0)));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(WorkIncomeDeduction::default().calculate(&context, dec!(5000)), dec!(4425));
    }

    #[test]
    fn work_child_bonus_raises_maximum() {
        let (person, income) = (person(40, 2), income(dec!(30000), dec!(0)));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(WorkIncomeDeduction::default().calculate(&context, dec!(5000)), dec!(3325));
    }

    #[test]
    fn work_child_bonus_doubles_for_single_parent() {
        let person = TaxpayerCharacteristics {
            is_single_parent: true,
            ..person(40, 2)
        };
        let income = income(dec!(30000), dec!(0));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(WorkIncomeDeduction::default().calculate(&context, dec!(5000)), dec!(3425));
    }

    #[test]
    fn work_first_tier_reduction_between_thresholds() {
        let (person, income) = (person(40, 0), income(dec!(30000), dec!(0)));
        let context = work_context(&person, &income, dec!(30000));

        assert_eq!(
            WorkIncomeDeduction::default().calculate(&context, dec!(5000)),
            dec!(3097.35)
        );
    }

    #[test]
    fn work_both_tier_reductions_above_upper_threshold() {
        let (person, income) = (person(40, 0), income(dec!(30000), dec!(0)));
        let context = work_context(&person, &income, dec!(50000));

        // 3225 - (18300 * 0.0222 + 7450 * 0.0344)
        assert_eq!(
            WorkIncomeDeduction::default().calculate(&context, dec!(5000)),
            dec!(2562.46)
        );
    }

    #[test]
    fn work_capped_at_combined_tax() {
        let (person, income) = (person(40, 0), income(dec!(50000), dec!(0)));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(WorkIncomeDeduction::default().calculate(&context, dec!(1000)), dec!(1000));
    }

    #[test]
    fn work_zero_when_reduction_exceeds_amount() {
        let (person, income) = (person(40, 0), income(dec!(10000), dec!(0)));
        let context = work_context(&person, &income, dec!(100000));

        assert_eq!(
            WorkIncomeDeduction::default().calculate(&context, dec!(5000)),
            Decimal::ZERO
        );
    }

    #[test]
    fn work_zero_without_work_income() {
        let (person, income) = (person(40, 0), income(dec!(0), dec!(0)));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(
            WorkIncomeDeduction::default().calculate(&context, dec!(5000)),
            Decimal::ZERO
        );
    }

    #[test]
    fn work_zero_without_tax_to_offset() {
        let (person, income) = (person(40, 0), income(dec!(30000), dec!(0)));
        let context = work_context(&person, &income, dec!(20000));

        assert_eq!(
            WorkIncomeDeduction::default().calculate(&context, Decimal::ZERO),
            Decimal::ZERO
        );
    }

    proptest! {
        #[test]
        fn work_stays_between_zero_and_combined_tax(
            age in 18u32..90,
            children in 0u32..6,
            work in 0u32..250_000,
            pure in 0u32..250_000,
            tax in 0u32..60_000,
        ) {
            let person = person(age, children);
            let income = income(Decimal::from(work), Decimal::ZERO);
            let context = work_context(&person, &income, Decimal::from(pure));
            let combined_tax = Decimal::from(tax);

            let deduction = WorkIncomeDeduction::default().calculate(&context, combined_tax);

            prop_assert!(deduction >= Decimal::ZERO);
            prop_assert!(deduction <= combined_tax);
        }
    }
}
