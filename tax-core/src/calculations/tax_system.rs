//! The tax system orchestrator.
//!
//! A [`TaxSystem`] owns one configured instance of every contribution,
//! deduction and tax calculator and runs them as a single linear pipeline:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Pension, unemployment and illness contributions |
//! | 2    | Pure earned income: total minus natural deduction and union fee |
//! | 3    | Taxable earned income: pure minus contributions, then pension income and basic deductions |
//! | 4    | State, municipal, church, health, radio and additional pension taxes |
//! | 5    | Work income deduction against state + municipal + church + health |
//! | 6    | Total tax burden and net income |
//!
//! [`TaxSystem::calculate`] runs the pipeline twice, at the given income and
//! at income inflated by one currency unit, and reports the difference as
//! the marginal tax rate.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::{apply_deduction, percent_to_fraction, round_whole};
use crate::calculations::{
    AdditionalPensionTax, BasicDeduction, CalculationContext, ChurchTax,
    IllnessInsuranceContribution, MunicipalIncomeTax, NaturalDeduction, PensionContribution,
    PensionIncomeDeduction, PublicHealthInsuranceContribution, PublicRadioTax, StateIncomeTax,
    UnemploymentInsuranceContribution, WorkIncomeDeduction,
};
use crate::{
    Deductions, IncomeComponents, TaxBracket, TaxBurdenResult, TaxCalculationResult,
    TaxParameters, TaxlikeContributions, TaxpayerCharacteristics, Taxes,
};

/// First and last age (inclusive) paying the senior pension contribution rate.
pub const PENSION_SENIOR_AGE_MIN: u32 = 53;
pub const PENSION_SENIOR_AGE_MAX: u32 = 62;
/// Age from which no unemployment insurance contribution is charged.
pub const UNEMPLOYMENT_EXEMPTION_AGE: u32 = 65;
/// Age from which no illness insurance contribution is charged.
pub const ILLNESS_EXEMPTION_AGE: u32 = 68;
/// Age from which the senior work income deduction maximum applies.
pub const WORK_DEDUCTION_SENIOR_AGE: u32 = 65;

/// Step used for the finite-difference marginal tax rate, in currency units.
pub const MARGINAL_STEP: Decimal = Decimal::ONE;

/// A tax system configured from one [`TaxParameters`] snapshot.
///
/// The system is immutable after construction; `calculate` takes `&self`
/// and allocates its working state per call, so one instance can be shared
/// between threads.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{IncomeComponents, TaxBracket, TaxParameters, TaxSystem, TaxpayerCharacteristics};
///
/// let parameters = TaxParameters {
///     pension_standard_rate: dec!(7.15),
///     pension_senior_rate: dec!(8.65),
///     unemployment_rate: dec!(0.59),
///     illness_rate: dec!(0.84),
///     illness_threshold: dec!(16862),
///     state_income_tax_brackets: vec![
///         TaxBracket::new(dec!(0), Some(dec!(36000)), dec!(35)),
///         TaxBracket::unbounded(dec!(36000), dec!(42)),
///     ],
///     municipal_rate: dec!(7.54),
///     church_rate: dec!(1.38),
///     health_work_rate: dec!(1.06),
///     health_other_rate: dec!(1.45),
///     radio_rate: dec!(2.5),
///     radio_threshold: dec!(14000),
///     radio_max_tax: dec!(0),
///     pension_additional_rate: dec!(5.85),
///     pension_additional_threshold: dec!(47000),
///     natural_deduction_min: dec!(750),
///     pension_deduction_base: dec!(0),
///     pension_deduction_reduction_rate: dec!(51),
///     basic_deduction_base: dec!(21000),
///     basic_deduction_reduction_rate: dec!(0),
///     work_deduction_enabled: false,
///     work_deduction_rate: dec!(18),
///     work_deduction_standard_max: dec!(3225),
///     work_deduction_senior_max: dec!(4425),
///     work_deduction_child_bonus: dec!(50),
///     work_deduction_reduction_rate1: dec!(2.22),
///     work_deduction_reduction_threshold1: dec!(24250),
///     work_deduction_reduction_threshold2: dec!(42550),
///     work_deduction_reduction_rate2: dec!(3.44),
///     union_fee_deductible: false,
///     earned_income_deduction: dec!(0),
/// };
///
/// let system = TaxSystem::new(&parameters);
/// let person = TaxpayerCharacteristics { age: 40, ..Default::default() };
/// let result = system.calculate(&person, &IncomeComponents::default());
///
/// assert_eq!(result.burden.total_tax_burden, dec!(0));
/// assert_eq!(result.effective_tax_rate, dec!(0));
/// ```
#[derive(Debug, Clone)]
pub struct TaxSystem {
    parameters: TaxParameters,
    pension_contribution: PensionContribution,
    unemployment_insurance_contribution: UnemploymentInsuranceContribution,
    illness_insurance_contribution: IllnessInsuranceContribution,
    natural_deduction: NaturalDeduction,
    pension_income_deduction: PensionIncomeDeduction,
    basic_deduction: BasicDeduction,
    state_income_tax: StateIncomeTax,
    municipal_income_tax: MunicipalIncomeTax,
    church_tax: ChurchTax,
    public_health_insurance_contribution: PublicHealthInsuranceContribution,
    public_radio_tax: PublicRadioTax,
    additional_pension_tax: AdditionalPensionTax,
    work_income_deduction: Option<WorkIncomeDeduction>,
    union_fee_deductible: bool,
}

impl TaxSystem {
    /// Builds every calculator from `params`, converting percentage rates to
    /// fractions. Thresholds, amounts and bracket limits pass through as-is.
    ///
    /// The parameters are copied; later changes to the caller's value do not
    /// affect the system.
    pub fn new(params: &TaxParameters) -> Self {
        let state_income_tax_brackets = params
            .state_income_tax_brackets
            .iter()
            .map(|bracket| TaxBracket {
                rate: percent_to_fraction(bracket.rate),
                ..bracket.clone()
            })
            .collect();

        let work_income_deduction = params.work_deduction_enabled.then(|| {
            WorkIncomeDeduction::new(
                percent_to_fraction(params.work_deduction_rate),
                params.work_deduction_standard_max,
                params.work_deduction_senior_max,
                WORK_DEDUCTION_SENIOR_AGE,
                params.work_deduction_child_bonus,
                percent_to_fraction(params.work_deduction_reduction_rate1),
                params.work_deduction_reduction_threshold1,
                params.work_deduction_reduction_threshold2,
                percent_to_fraction(params.work_deduction_reduction_rate2),
            )
        });

        debug!(
            brackets = params.state_income_tax_brackets.len(),
            work_deduction = params.work_deduction_enabled,
            union_fee_deductible = params.union_fee_deductible,
            "Configured tax system"
        );

        Self {
            parameters: params.clone(),
            pension_contribution: PensionContribution::new(
                percent_to_fraction(params.pension_standard_rate),
                percent_to_fraction(params.pension_senior_rate),
                PENSION_SENIOR_AGE_MIN,
                PENSION_SENIOR_AGE_MAX,
            ),
            unemployment_insurance_contribution: UnemploymentInsuranceContribution::new(
                percent_to_fraction(params.unemployment_rate),
                UNEMPLOYMENT_EXEMPTION_AGE,
            ),
            illness_insurance_contribution: IllnessInsuranceContribution::new(
                percent_to_fraction(params.illness_rate),
                params.illness_threshold,
                ILLNESS_EXEMPTION_AGE,
            ),
            natural_deduction: NaturalDeduction::new(params.natural_deduction_min),
            pension_income_deduction: PensionIncomeDeduction::new(
                params.pension_deduction_base,
                percent_to_fraction(params.pension_deduction_reduction_rate),
            ),
            basic_deduction: BasicDeduction::new(
                params.basic_deduction_base,
                percent_to_fraction(params.basic_deduction_reduction_rate),
            ),
            state_income_tax: StateIncomeTax::new(state_income_tax_brackets),
            municipal_income_tax: MunicipalIncomeTax::new(percent_to_fraction(
                params.municipal_rate,
            )),
            church_tax: ChurchTax::new(percent_to_fraction(params.church_rate)),
            public_health_insurance_contribution: PublicHealthInsuranceContribution::new(
                percent_to_fraction(params.health_work_rate),
                percent_to_fraction(params.health_other_rate),
            ),
            public_radio_tax: PublicRadioTax::new(
                percent_to_fraction(params.radio_rate),
                params.radio_threshold,
                params.radio_max_tax,
            ),
            additional_pension_tax: AdditionalPensionTax::new(
                percent_to_fraction(params.pension_additional_rate),
                params.pension_additional_threshold,
            ),
            work_income_deduction,
            union_fee_deductible: params.union_fee_deductible,
        }
    }

    /// The parameter snapshot this system was built from, rates still in
    /// percent.
    pub fn parameters(&self) -> &TaxParameters {
        &self.parameters
    }

    pub fn state_income_tax(&self) -> &StateIncomeTax {
        &self.state_income_tax
    }

    pub fn work_income_deduction(&self) -> Option<&WorkIncomeDeduction> {
        self.work_income_deduction.as_ref()
    }

    /// Calculates the full breakdown with effective and marginal tax rates.
    ///
    /// The marginal rate is the increase in total tax burden when income
    /// grows by [`MARGINAL_STEP`] (spread over the components in proportion
    /// to their shares), in percent.
    pub fn calculate(
        &self,
        demographics: &TaxpayerCharacteristics,
        income: &IncomeComponents,
    ) -> TaxCalculationResult {
        let burden = self.calculate_tax_burden(demographics, income);
        let inflated =
            self.calculate_tax_burden(demographics, &income.inflate(MARGINAL_STEP));

        let marginal_tax_rate = (inflated.total_tax_burden - burden.total_tax_burden)
            / MARGINAL_STEP
            * Decimal::ONE_HUNDRED;
        let effective_tax_rate = if burden.total_earned_income > Decimal::ZERO {
            burden.total_tax_burden / burden.total_earned_income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        TaxCalculationResult {
            burden,
            effective_tax_rate,
            marginal_tax_rate,
        }
    }

    /// Runs the pipeline once and returns the breakdown without rates.
    pub fn calculate_tax_burden(
        &self,
        demographics: &TaxpayerCharacteristics,
        income: &IncomeComponents,
    ) -> TaxBurdenResult {
        let mut context = CalculationContext::new(demographics, income);

        // Step 1: taxlike contributions
        let pension = self.pension_contribution.calculate(&context);
        let unemployment = self.unemployment_insurance_contribution.calculate(&context);
        let illness = self.illness_insurance_contribution.calculate(&context);
        let total_contributions = pension + unemployment + illness;

        // Step 2: pure earned income
        let natural_deduction = self.natural_deduction.calculate();
        let mut pure_earned_income = context.total_earned_income() - natural_deduction;

        let union_fee_deduction = if self.union_fee_deductible && demographics.is_union_member {
            let fee = round_whole(
                income.work_income * demographics.union_fee_percentage / Decimal::ONE_HUNDRED,
            );
            pure_earned_income = apply_deduction(pure_earned_income, fee);
            fee
        } else {
            Decimal::ZERO
        };

        context.set_pure_earned_income(pure_earned_income);

        // Step 3: taxable earned income
        let mut taxable_earned_income = pure_earned_income - total_contributions;
        let pension_income_deduction = self.pension_income_deduction.calculate(&context);
        taxable_earned_income = apply_deduction(taxable_earned_income, pension_income_deduction);
        let basic_deduction = self.basic_deduction.calculate(taxable_earned_income);
        taxable_earned_income = apply_deduction(taxable_earned_income, basic_deduction);

        context.set_taxable_earned_income(taxable_earned_income);

        trace!(
            %total_contributions,
            %pure_earned_income,
            %taxable_earned_income,
            "Earned income bases"
        );

        // Step 4: taxes
        let state_income = self.state_income_tax.calculate(&context);
        let municipal = self.municipal_income_tax.calculate(&context);
        let church = self.church_tax.calculate(&context);
        let health_insurance = self.public_health_insurance_contribution.calculate(&context);
        let radio = self.public_radio_tax.calculate(&context);
        let additional_pension = self.additional_pension_tax.calculate(&context);

        // Step 5: work income deduction
        let combined_tax_before_work_deduction = state_income + municipal + church + health_insurance;
        let work_income_deduction = self
            .work_income_deduction
            .as_ref()
            .map_or(Decimal::ZERO, |deduction| {
                deduction.calculate(&context, combined_tax_before_work_deduction)
            });

        // Step 6: totals
        let total_taxes = apply_deduction(combined_tax_before_work_deduction, work_income_deduction)
            + radio
            + additional_pension;
        let total_tax_burden = total_contributions + total_taxes;
        let net_income = context.total_earned_income() - total_tax_burden;

        trace!(
            %combined_tax_before_work_deduction,
            %work_income_deduction,
            %total_tax_burden,
            "Tax burden"
        );

        TaxBurdenResult {
            total_earned_income: context.total_earned_income(),
            total_tax_burden,
            taxlike_contributions: TaxlikeContributions {
                pension,
                unemployment,
                illness,
                total: total_contributions,
            },
            pure_earned_income,
            deductions: Deductions {
                natural: natural_deduction,
                pension_income: pension_income_deduction,
                basic: basic_deduction,
                union_fee: union_fee_deduction,
                total: natural_deduction
                    + pension_income_deduction
                    + basic_deduction
                    + union_fee_deduction,
            },
            taxable_earned_income,
            taxes: Taxes {
                state_income,
                municipal,
                church,
                health_insurance,
                radio,
                additional_pension,
                total: total_taxes,
            },
            work_income_deduction,
            net_income,
        }
    }
}
