pub mod calculations;
pub mod models;

pub use calculations::{
    CalculationContext, ComparisonPoint, IncomeSweep, RatePoint, SystemComparison, TaxSystem,
};
pub use models::*;
