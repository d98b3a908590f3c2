use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One interval `[min, max)` of the progressive state income tax schedule.
///
/// `max` is `None` for the unbounded top bracket. In [`TaxParameters`] the
/// rate is a percentage (`12.64` meaning 12.64 %); the calculators receive it
/// as a fraction.
///
/// [`TaxParameters`]: crate::TaxParameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxBracket {
    pub min: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { min, max, rate }
    }

    pub fn unbounded(
        min: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { min, max: None, rate }
    }
}

/// Ways a bracket schedule can break the contiguity rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstMinNotZero(Decimal),

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("bracket {index} ends at {max} but the next bracket starts at {next_min}")]
    Discontinuous {
        index: usize,
        max: Decimal,
        next_min: Decimal,
    },

    #[error("bracket {index} is empty or inverted ({min}..{max})")]
    Inverted {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("last bracket must be unbounded, got max {0}")]
    BoundedTop(Decimal),

    #[error("bracket {index} has negative rate {rate}")]
    NegativeRate { index: usize, rate: Decimal },
}

/// Checks that `brackets` start at zero, are contiguous and ascending, and
/// end with an unbounded bracket.
///
/// The calculation engine trusts its brackets and never calls this; the
/// configuration loaders do.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{BracketScheduleError, TaxBracket, validate_brackets};
///
/// let brackets = vec![
///     TaxBracket::new(dec!(0), Some(dec!(36000)), dec!(35)),
///     TaxBracket::new(dec!(40000), None, dec!(42)),
/// ];
///
/// assert_eq!(
///     validate_brackets(&brackets),
///     Err(BracketScheduleError::Discontinuous {
///         index: 0,
///         max: dec!(36000),
///         next_min: dec!(40000),
///     })
/// );
/// ```
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketScheduleError> {
    let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
    if !first.min.is_zero() {
        return Err(BracketScheduleError::FirstMinNotZero(first.min));
    }

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO {
            return Err(BracketScheduleError::NegativeRate {
                index,
                rate: bracket.rate,
            });
        }

        let Some(next) = brackets.get(index + 1) else {
            if let Some(max) = bracket.max {
                return Err(BracketScheduleError::BoundedTop(max));
            }
            continue;
        };

        let max = bracket
            .max
            .ok_or(BracketScheduleError::UnboundedBeforeEnd { index })?;
        if max <= bracket.min {
            return Err(BracketScheduleError::Inverted {
                index,
                min: bracket.min,
                max,
            });
        }
        if max != next.min {
            return Err(BracketScheduleError::Discontinuous {
                index,
                max,
                next_min: next.min,
            });
        }
    }

    Ok(())
}

/// Re-derives each bracket's `max` from the following bracket's `min` and
/// makes the last bracket unbounded.
///
/// Only `min` and `rate` are read, so a schedule entered as a list of
/// thresholds becomes contiguous by construction.
pub fn normalize_brackets(brackets: &mut [TaxBracket]) {
    let len = brackets.len();
    for index in 0..len {
        brackets[index].max = brackets.get(index + 1).map(|next| next.min);
    }
}
