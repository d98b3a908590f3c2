mod income_components;
mod tax_bracket;
mod tax_parameters;
mod tax_result;
mod taxpayer;

pub use income_components::{IncomeComponents, IncomeType};
pub use tax_bracket::{BracketScheduleError, TaxBracket, normalize_brackets, validate_brackets};
pub use tax_parameters::{TaxParameterPreset, TaxParameters};
pub use tax_result::{Deductions, TaxBurdenResult, TaxCalculationResult, TaxlikeContributions, Taxes};
pub use taxpayer::TaxpayerCharacteristics;
