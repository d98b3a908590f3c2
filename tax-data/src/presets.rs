//! Named tax parameter presets.
//!
//! The built-in registry carries the 2025 legislation and three 2026
//! variants. Each variant starts from another preset and overrides a few
//! fields, which is also how presets loaded from TOML are resolved (see
//! [`crate::loader`]).

use rust_decimal_macros::dec;
use tax_core::{TaxBracket, TaxParameterPreset, TaxParameters, TaxSystem};

use crate::loader::PresetError;

/// Key of the preset used when none is requested.
pub const DEFAULT_PRESET: &str = "2025";

/// Ordered mapping from preset key to preset.
///
/// Insertion order is kept so listings follow the order presets were
/// defined in. Inserting an existing key replaces that preset in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetRegistry {
    entries: Vec<(String, TaxParameterPreset)>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The presets shipped with the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_data::PresetRegistry;
    ///
    /// let registry = PresetRegistry::builtin();
    /// let keys: Vec<&str> = registry.keys().collect();
    ///
    /// assert_eq!(keys, vec!["2025", "2026_base", "2026_he", "2026_a"]);
    /// ```
    pub fn builtin() -> Self {
        let params_2025 = params_2025();
        let params_2026_base = params_2026_base(&params_2025);

        let params_2026_he = params_2026_he(&params_2026_base);
        let params_2026_a = params_2026_a(&params_2026_base);

        let mut registry = Self::new();
        registry.insert("2025", preset("2025", "2025", params_2025));
        registry.insert(
            "2026_base",
            preset("2026 pohja", "2026 pohja", params_2026_base),
        );
        registry.insert(
            "2026_he",
            preset(
                "2026 hallituksen esitys",
                "2026 hallituksen esitys",
                params_2026_he,
            ),
        );
        registry.insert(
            "2026_a",
            preset("2026 a", "2026 vaihtoehto A", params_2026_a),
        );
        registry
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        preset: TaxParameterPreset,
    ) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = preset,
            None => self.entries.push((key, preset)),
        }
    }

    /// Adds every preset of `other`, replacing presets with the same key.
    pub fn extend(
        &mut self,
        other: PresetRegistry,
    ) {
        for (key, preset) in other.entries {
            self.insert(key, preset);
        }
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Result<&TaxParameterPreset, PresetError> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, preset)| preset)
            .ok_or_else(|| PresetError::UnknownPreset(key.to_string()))
    }

    /// Builds a [`TaxSystem`] from the preset stored under `key`.
    pub fn tax_system(
        &self,
        key: &str,
    ) -> Result<TaxSystem, PresetError> {
        self.get(key).map(|preset| TaxSystem::new(&preset.parameters))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaxParameterPreset)> {
        self.entries.iter().map(|(key, preset)| (key.as_str(), preset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn preset(
    name: &str,
    description: &str,
    parameters: TaxParameters,
) -> TaxParameterPreset {
    TaxParameterPreset {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    }
}

fn params_2025() -> TaxParameters {
    TaxParameters {
        pension_standard_rate: dec!(7.15),
        pension_senior_rate: dec!(8.65),
        unemployment_rate: dec!(0.59),
        illness_rate: dec!(0.84),
        illness_threshold: dec!(16862),
        state_income_tax_brackets: vec![
            TaxBracket::new(dec!(0), Some(dec!(21200)), dec!(12.64)),
            TaxBracket::new(dec!(21200), Some(dec!(31500)), dec!(19)),
            TaxBracket::new(dec!(31500), Some(dec!(52100)), dec!(30.25)),
            TaxBracket::new(dec!(52100), Some(dec!(88200)), dec!(34)),
            TaxBracket::new(dec!(88200), Some(dec!(150000)), dec!(41.75)),
            TaxBracket::unbounded(dec!(150000), dec!(44.25)),
        ],
        municipal_rate: dec!(7.54),
        church_rate: dec!(1.38),
        health_work_rate: dec!(1.06),
        health_other_rate: dec!(1.45),
        radio_rate: dec!(2.5),
        radio_threshold: dec!(14000),
        radio_max_tax: dec!(163),
        pension_additional_rate: dec!(5.85),
        pension_additional_threshold: dec!(47000),
        natural_deduction_min: dec!(750),
        pension_deduction_base: dec!(11030),
        pension_deduction_reduction_rate: dec!(51),
        basic_deduction_base: dec!(4115),
        basic_deduction_reduction_rate: dec!(18),
        work_deduction_enabled: true,
        work_deduction_rate: dec!(18),
        work_deduction_standard_max: dec!(3225),
        work_deduction_senior_max: dec!(4425),
        work_deduction_child_bonus: dec!(50),
        work_deduction_reduction_rate1: dec!(2.22),
        work_deduction_reduction_threshold1: dec!(24250),
        work_deduction_reduction_threshold2: dec!(42550),
        work_deduction_reduction_rate2: dec!(3.44),
        union_fee_deductible: true,
        earned_income_deduction: dec!(0),
    }
}

fn params_2026_base(base: &TaxParameters) -> TaxParameters {
    TaxParameters {
        pension_standard_rate: dec!(7.3),
        pension_senior_rate: dec!(7.3),
        unemployment_rate: dec!(0.89),
        ..base.clone()
    }
}

fn params_2026_he(base: &TaxParameters) -> TaxParameters {
    TaxParameters {
        state_income_tax_brackets: vec![
            TaxBracket::new(dec!(0), Some(dec!(22000)), dec!(12.64)),
            TaxBracket::new(dec!(22000), Some(dec!(32700)), dec!(19)),
            TaxBracket::new(dec!(32700), Some(dec!(40200)), dec!(30.25)),
            TaxBracket::new(dec!(40200), Some(dec!(52100)), dec!(33.25)),
            TaxBracket::unbounded(dec!(52100), dec!(37.5)),
        ],
        radio_max_tax: dec!(160),
        pension_additional_rate: dec!(4.0),
        pension_additional_threshold: dec!(57000),
        pension_deduction_base: dec!(11030),
        pension_deduction_reduction_rate: dec!(51),
        basic_deduction_base: dec!(4270),
        basic_deduction_reduction_rate: dec!(18),
        work_deduction_rate: dec!(18),
        work_deduction_standard_max: dec!(3435),
        work_deduction_senior_max: dec!(3435),
        work_deduction_child_bonus: dec!(105),
        work_deduction_reduction_rate1: dec!(2.0),
        work_deduction_reduction_threshold1: dec!(35000),
        work_deduction_reduction_threshold2: dec!(50450),
        work_deduction_reduction_rate2: dec!(0),
        union_fee_deductible: false,
        ..base.clone()
    }
}

fn params_2026_a(base: &TaxParameters) -> TaxParameters {
    TaxParameters {
        state_income_tax_brackets: vec![
            TaxBracket::new(dec!(0), Some(dec!(36000)), dec!(35)),
            TaxBracket::unbounded(dec!(36000), dec!(42)),
        ],
        radio_max_tax: dec!(0),
        pension_deduction_base: dec!(0),
        basic_deduction_base: dec!(21000),
        basic_deduction_reduction_rate: dec!(0),
        work_deduction_enabled: false,
        ..base.clone()
    }
}
