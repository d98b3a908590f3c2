//! Plain-text rendering of calculation results for the command line.
//!
//! Amounts are shown with two decimals, rounded half away from zero. The
//! underlying results keep full precision; serialize them with `serde_json`
//! for machine-readable output.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;
use tax_core::{ComparisonPoint, RatePoint, TaxCalculationResult};

use crate::presets::PresetRegistry;

const LABEL_WIDTH: usize = 34;
const AMOUNT_WIDTH: usize = 12;

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$.2}",
        round_half_up(value)
    )
}

fn rate_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$.2} %",
        round_half_up(value)
    )
}

/// Full breakdown of a single calculation.
pub struct ResultReport<'a>(pub &'a TaxCalculationResult);

impl fmt::Display for ResultReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.0;
        let burden = &result.burden;
        let contributions = &burden.taxlike_contributions;
        let deductions = &burden.deductions;
        let taxes = &burden.taxes;

        line(f, "Earned income", burden.total_earned_income)?;
        writeln!(f)?;
        writeln!(f, "Contributions")?;
        line(f, "  Pension", contributions.pension)?;
        line(f, "  Unemployment insurance", contributions.unemployment)?;
        line(f, "  Illness insurance", contributions.illness)?;
        line(f, "  Total", contributions.total)?;
        writeln!(f)?;
        line(f, "Pure earned income", burden.pure_earned_income)?;
        writeln!(f)?;
        writeln!(f, "Deductions")?;
        line(f, "  Natural deduction", deductions.natural)?;
        line(f, "  Union fee", deductions.union_fee)?;
        line(f, "  Pension income deduction", deductions.pension_income)?;
        line(f, "  Basic deduction", deductions.basic)?;
        line(f, "  Total", deductions.total)?;
        writeln!(f)?;
        line(f, "Taxable earned income", burden.taxable_earned_income)?;
        writeln!(f)?;
        writeln!(f, "Taxes")?;
        line(f, "  State income tax", taxes.state_income)?;
        line(f, "  Municipal tax", taxes.municipal)?;
        line(f, "  Church tax", taxes.church)?;
        line(f, "  Health insurance", taxes.health_insurance)?;
        line(f, "  Public radio tax", taxes.radio)?;
        line(f, "  Additional pension tax", taxes.additional_pension)?;
        line(f, "  Work income deduction", burden.work_income_deduction)?;
        line(f, "  Total", taxes.total)?;
        writeln!(f)?;
        line(f, "Total tax burden", burden.total_tax_burden)?;
        line(f, "Net income", burden.net_income)?;
        rate_line(f, "Effective tax rate", result.effective_tax_rate)?;
        rate_line(f, "Marginal tax rate", result.marginal_tax_rate)
    }
}

/// Preset keys with their names and descriptions.
pub struct PresetList<'a>(pub &'a PresetRegistry);

impl fmt::Display for PresetList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let width = self.0.keys().map(str::len).max().unwrap_or(0);
        for (key, preset) in self.0.iter() {
            write!(f, "{key:<width$}  {}", preset.name)?;
            if preset.description != preset.name {
                write!(f, " ({})", preset.description)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Side-by-side summary of a comparison between two presets.
pub struct ComparisonReport<'a> {
    pub current: &'a str,
    pub reference: &'a str,
    pub point: &'a ComparisonPoint,
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let ComparisonReport {
            current,
            reference,
            point,
        } = *self;
        let rows = [
            (
                "Total tax burden",
                point.current.burden.total_tax_burden,
                point.reference.burden.total_tax_burden,
            ),
            (
                "Net income",
                point.current.burden.net_income,
                point.reference.burden.net_income,
            ),
            (
                "Effective tax rate %",
                point.current.effective_tax_rate,
                point.reference.effective_tax_rate,
            ),
            (
                "Marginal tax rate %",
                point.current.marginal_tax_rate,
                point.reference.marginal_tax_rate,
            ),
        ];

        writeln!(
            f,
            "{:<24}{current:>AMOUNT_WIDTH$}{reference:>AMOUNT_WIDTH$}",
            ""
        )?;
        for (label, current_value, reference_value) in rows {
            writeln!(
                f,
                "{label:<24}{:>AMOUNT_WIDTH$.2}{:>AMOUNT_WIDTH$.2}",
                round_half_up(current_value),
                round_half_up(reference_value)
            )?;
        }
        writeln!(
            f,
            "{:<24}{:>AMOUNT_WIDTH$}",
            "Net income change",
            point.net_income_change
        )
    }
}

/// One row per income amount of a sweep.
pub struct SweepReport<'a>(pub &'a [RatePoint]);

impl fmt::Display for SweepReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:>10}{:>10}{:>10}{:>10}{:>10}{:>10}",
            "income", "eff", "marg", "ref eff", "ref marg", "change"
        )?;
        for point in self.0 {
            writeln!(
                f,
                "{:>10}{:>10.2}{:>10.2}{:>10.2}{:>10.2}{:>10}",
                point.income,
                round_half_up(point.current_effective_tax_rate),
                round_half_up(point.current_marginal_tax_rate),
                round_half_up(point.reference_effective_tax_rate),
                round_half_up(point.reference_marginal_tax_rate),
                point.net_income_change
            )?;
        }
        Ok(())
    }
}
