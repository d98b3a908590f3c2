use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Demographic attributes of the taxpayer that affect contributions,
/// deductions and taxes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxpayerCharacteristics {
    pub age: u32,
    pub is_church_member: bool,
    pub dependent_children: u32,
    pub is_single_parent: bool,
    pub is_union_member: bool,
    /// Union membership fee as a percentage of work income.
    pub union_fee_percentage: Decimal,
}
