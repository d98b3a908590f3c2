//! End-to-end calculations with the built-in presets and presets and
//! brackets loaded from the files under `test-data/`.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{
    IncomeComponents, IncomeSweep, IncomeType, SystemComparison, TaxSystem,
    TaxpayerCharacteristics,
};
use tax_data::{BracketLoader, PresetError, PresetLoader, PresetRegistry};

const TEST_PRESETS: &str = include_str!("../test-data/presets.toml");
const TEST_BRACKETS_2026_HE: &str = include_str!("../test-data/brackets_2026_he.csv");
const TEST_BRACKETS_2026_A: &str = include_str!("../test-data/brackets_2026_a.csv");

/// The taxpayer the calculator starts with.
fn default_person() -> TaxpayerCharacteristics {
    TaxpayerCharacteristics {
        age: 35,
        is_church_member: true,
        dependent_children: 0,
        is_single_parent: false,
        is_union_member: true,
        union_fee_percentage: dec!(1.0),
    }
}

fn work_income(amount: rust_decimal::Decimal) -> IncomeComponents {
    IncomeComponents::new(amount, dec!(0), dec!(0))
}

fn system(key: &str) -> TaxSystem {
    PresetRegistry::builtin()
        .tax_system(key)
        .expect("Built-in preset should exist")
}

// =============================================================================
// Built-in presets
// =============================================================================

#[test]
fn test_pensioner_church_member_2025() {
    let person = TaxpayerCharacteristics {
        age: 70,
        is_church_member: true,
        ..Default::default()
    };

    let result = system("2025").calculate(
        &person,
        &IncomeComponents::new(dec!(0), dec!(30000), dec!(0)),
    );
    let burden = &result.burden;

    assert_eq!(burden.taxlike_contributions.total, dec!(0));
    assert_eq!(burden.pure_earned_income, dec!(29250));
    assert_eq!(burden.deductions.pension_income, dec!(1737.80));
    assert_eq!(burden.deductions.basic, dec!(0));
    assert_eq!(burden.taxable_earned_income, dec!(27512.2));
    assert_eq!(burden.taxes.state_income, dec!(3878.998));
    assert_eq!(burden.taxes.municipal, dec!(2074.41988));
    assert_eq!(burden.taxes.church, dec!(379.66836));
    assert_eq!(burden.taxes.health_insurance, dec!(398.9269));
    assert_eq!(burden.taxes.radio, dec!(163));
    assert_eq!(burden.work_income_deduction, dec!(0));
    assert_eq!(burden.total_tax_burden, dec!(6895.01314));
    assert_eq!(burden.net_income, dec!(23104.98686));
    assert_eq!(result.marginal_tax_rate, dec!(44.3487));
}

#[test]
fn test_senior_worker_with_children_and_union_2025() {
    let person = TaxpayerCharacteristics {
        age: 55,
        is_church_member: true,
        dependent_children: 2,
        is_single_parent: true,
        is_union_member: true,
        union_fee_percentage: dec!(1),
    };

    let result = system("2025").calculate(
        &person,
        &IncomeComponents::new(dec!(45000), dec!(0), dec!(5000)),
    );
    let burden = &result.burden;

    assert_eq!(burden.taxlike_contributions.pension, dec!(3892.5));
    assert_eq!(burden.taxlike_contributions.unemployment, dec!(265.5));
    assert_eq!(burden.taxlike_contributions.illness, dec!(378));
    assert_eq!(burden.taxlike_contributions.total, dec!(4536));
    assert_eq!(burden.deductions.union_fee, dec!(450));
    assert_eq!(burden.pure_earned_income, dec!(48800));
    assert_eq!(burden.taxable_earned_income, dec!(44264));
    assert_eq!(burden.taxes.state_income, dec!(8497.79));
    assert_eq!(burden.taxes.municipal, dec!(3337.5056));
    assert_eq!(burden.taxes.church, dec!(610.8432));
    assert_eq!(burden.taxes.health_insurance, dec!(469.1984));
    assert_eq!(burden.work_income_deduction, dec!(2803.74));
    assert_eq!(burden.taxes.total, dec!(10274.5972));
    assert_eq!(burden.total_tax_burden, dec!(14810.5972));
    assert_eq!(burden.net_income, dec!(35189.4028));
    assert_eq!(result.effective_tax_rate, dec!(29.6211944));
    assert_eq!(result.marginal_tax_rate, dec!(49.0923344));
}

#[test]
fn test_large_pension_pays_additional_pension_tax() {
    let person = TaxpayerCharacteristics {
        age: 75,
        ..Default::default()
    };

    let result = system("2025").calculate(
        &person,
        &IncomeComponents::new(dec!(0), dec!(60000), dec!(0)),
    );
    let burden = &result.burden;

    assert_eq!(burden.deductions.pension_income, dec!(0));
    assert_eq!(burden.taxable_earned_income, dec!(59250));
    assert_eq!(burden.taxes.state_income, dec!(13299.18));
    assert_eq!(burden.taxes.municipal, dec!(4467.45));
    assert_eq!(burden.taxes.health_insurance, dec!(859.125));
    assert_eq!(burden.taxes.additional_pension, dec!(760.5));
    assert_eq!(burden.total_tax_burden, dec!(19549.255));
    assert_eq!(burden.net_income, dec!(40450.745));
    assert_eq!(result.marginal_tax_rate, dec!(48.84));
}

#[test]
fn test_default_person_under_2026_presets() {
    let income = work_income(dec!(45000));

    let base = system("2026_base").calculate(&default_person(), &income);
    let he = system("2026_he").calculate(&default_person(), &income);
    let a = system("2026_a").calculate(&default_person(), &income);

    assert_eq!(base.burden.deductions.union_fee, dec!(450));
    assert_eq!(base.burden.net_income, dec!(32455.31605));
    assert_eq!(base.marginal_tax_rate, dec!(49.067231));

    // union fees are not deductible under the proposal
    assert_eq!(he.burden.deductions.union_fee, dec!(0));
    assert_eq!(he.burden.net_income, dec!(32937.42105));
    assert_eq!(he.effective_tax_rate, dec!(26.805731));
    assert_eq!(he.marginal_tax_rate, dec!(47.627231));

    assert_eq!(a.burden.work_income_deduction, dec!(0));
    assert_eq!(a.burden.net_income, dec!(32508.8223));
    assert_eq!(a.marginal_tax_rate, dec!(49.948306));
}

#[test]
fn test_compare_2026_presets_against_base() {
    let base = system("2026_base");
    let he = system("2026_he");
    let a = system("2026_a");
    let income = work_income(dec!(45000));

    let he_point = SystemComparison::new(&he, &base).compare(&default_person(), &income);
    let a_point = SystemComparison::new(&a, &base).compare(&default_person(), &income);

    assert_eq!(he_point.net_income_change, dec!(482));
    assert_eq!(he_point.marginal_tax_rate_change, dec!(-1.44));
    // 53.50625 rounds up
    assert_eq!(a_point.net_income_change, dec!(54));
}

#[test]
fn test_half_unit_loss_rounds_toward_zero() {
    let base = system("2026_base");
    let previous = system("2025");
    let person = TaxpayerCharacteristics {
        age: 40,
        ..Default::default()
    };
    let comparison = SystemComparison::new(&base, &previous);

    // contributions rise by 0.45 % and no tax is due at these incomes
    let at_1000 = comparison.compare(&person, &work_income(dec!(1000)));
    let at_3000 = comparison.compare(&person, &work_income(dec!(3000)));

    assert_eq!(
        at_1000.current.burden.net_income - at_1000.reference.burden.net_income,
        dec!(-4.5)
    );
    assert_eq!(at_1000.net_income_change, dec!(-4));
    assert_eq!(at_3000.net_income_change, dec!(-13));
}

#[test]
fn test_sweep_2026_he_against_base() {
    let base = system("2026_base");
    let he = system("2026_he");

    let points = SystemComparison::new(&he, &base).sweep(
        &default_person(),
        IncomeType::Work,
        &IncomeSweep::new(dec!(0), dec!(45000), dec!(4500)),
    );

    assert_eq!(points.len(), 11);
    assert_eq!(points[0].income, dec!(0));
    assert_eq!(points[0].current_effective_tax_rate, dec!(0));
    assert_eq!(points[0].net_income_change, dec!(0));
    assert_eq!(points[10].income, dec!(45000));
    assert_eq!(points[10].net_income_change, dec!(482));
    assert_eq!(points[10].current_marginal_tax_rate, dec!(47.627231));
    assert_eq!(points[10].reference_marginal_tax_rate, dec!(49.067231));
}

// =============================================================================
// Presets from TOML
// =============================================================================

#[test]
fn test_toml_preset_extends_builtin() {
    let builtin = PresetRegistry::builtin();

    let loaded = PresetLoader::parse(TEST_PRESETS, &builtin).expect("Failed to parse presets");
    let no_church = TaxSystem::new(&loaded.get("2026_he_no_church").unwrap().parameters);
    let income = work_income(dec!(45000));

    let result = no_church.calculate(&default_person(), &income);
    let expected = system("2026_he").calculate(
        &TaxpayerCharacteristics {
            is_church_member: false,
            ..default_person()
        },
        &income,
    );

    assert_eq!(result, expected);
    assert_eq!(result.burden.net_income, dec!(33491.99475));
}

#[test]
fn test_toml_preset_extends_preset_from_same_file() {
    let loaded = PresetLoader::parse(TEST_PRESETS, &PresetRegistry::builtin())
        .expect("Failed to parse presets");
    let preset = loaded.get("2026_he_flat").unwrap();

    let result = TaxSystem::new(&preset.parameters)
        .calculate(&default_person(), &work_income(dec!(45000)));
    let burden = &result.burden;

    assert_eq!(
        preset.description,
        "Single 25 % state bracket on top of 2026_he_no_church"
    );
    assert_eq!(burden.taxable_earned_income, dec!(40186.5));
    assert_eq!(burden.taxes.state_income, dec!(10046.625));
    assert_eq!(burden.taxes.church, dec!(0));
    assert_eq!(burden.taxes.radio, dec!(160));
    assert_eq!(burden.work_income_deduction, dec!(0));
    assert_eq!(burden.net_income, dec!(27273.836));
    assert_eq!(result.marginal_tax_rate, dec!(39.59592));
}

#[test]
fn test_toml_presets_merge_into_registry() {
    let mut registry = PresetRegistry::builtin();
    let loaded =
        PresetLoader::parse(TEST_PRESETS, &registry).expect("Failed to parse presets");

    registry.extend(loaded);

    assert_eq!(
        registry.keys().collect::<Vec<_>>(),
        vec![
            "2025",
            "2026_base",
            "2026_he",
            "2026_a",
            "2026_he_no_church",
            "2026_he_flat"
        ]
    );
}

#[test]
fn test_toml_preset_requires_known_base() {
    let result = PresetLoader::parse(TEST_PRESETS, &PresetRegistry::new());

    let err = result.expect_err("Should fail without built-in bases");
    let PresetError::UnknownBase { preset, base } = err else {
        panic!("Expected UnknownBase error, got: {:?}", err);
    };
    assert_eq!(preset, "2026_he_no_church");
    assert_eq!(base, "2026_he");
}

// =============================================================================
// Brackets from CSV
// =============================================================================

#[test]
fn test_csv_brackets_match_builtin_schedules() {
    let registry = PresetRegistry::builtin();

    let he = BracketLoader::parse(TEST_BRACKETS_2026_HE.as_bytes()).expect("Failed to parse CSV");
    let a = BracketLoader::parse(TEST_BRACKETS_2026_A.as_bytes()).expect("Failed to parse CSV");

    assert_eq!(
        he,
        registry.get("2026_he").unwrap().parameters.state_income_tax_brackets
    );
    assert_eq!(
        a,
        registry.get("2026_a").unwrap().parameters.state_income_tax_brackets
    );
}

#[test]
fn test_csv_brackets_override_preset() {
    let registry = PresetRegistry::builtin();
    let mut parameters = registry.get("2026_base").unwrap().parameters.clone();
    parameters.state_income_tax_brackets =
        BracketLoader::parse(TEST_BRACKETS_2026_HE.as_bytes()).expect("Failed to parse CSV");
    let income = work_income(dec!(45000));

    let with_csv = TaxSystem::new(&parameters).calculate(&default_person(), &income);
    let base = system("2026_base").calculate(&default_person(), &income);

    assert_eq!(with_csv.burden.taxable_earned_income, dec!(39736.5));
    assert_eq!(
        with_csv.burden.taxable_earned_income,
        base.burden.taxable_earned_income
    );
    assert_eq!(with_csv.burden.taxes.state_income, dec!(6942.34125));
    assert_eq!(base.burden.taxes.state_income, dec!(7128.22125));
    assert_eq!(with_csv.burden.net_income, dec!(32641.19605));
}
