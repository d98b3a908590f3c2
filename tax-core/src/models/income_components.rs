use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which income stream a single swept amount is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    Work,
    Pension,
}

impl IncomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Pension => "pension",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "work" => Some(Self::Work),
            "pension" => Some(Self::Pension),
            _ => None,
        }
    }
}

/// The three earned income streams of a taxpayer.
///
/// All amounts are annual and in currency units. The struct is a value
/// object: [`IncomeComponents::inflate`] returns a new instance and never
/// mutates the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeComponents {
    pub work_income: Decimal,
    pub pension_income: Decimal,
    pub other_earned_income: Decimal,
}

impl IncomeComponents {
    pub fn new(
        work_income: Decimal,
        pension_income: Decimal,
        other_earned_income: Decimal,
    ) -> Self {
        Self {
            work_income,
            pension_income,
            other_earned_income,
        }
    }

    /// Places the whole `amount` in the stream selected by `income_type`.
    pub fn from_income_type(
        income_type: IncomeType,
        amount: Decimal,
    ) -> Self {
        match income_type {
            IncomeType::Work => Self::new(amount, Decimal::ZERO, Decimal::ZERO),
            IncomeType::Pension => Self::new(Decimal::ZERO, amount, Decimal::ZERO),
        }
    }

    pub fn total(&self) -> Decimal {
        self.work_income + self.pension_income + self.other_earned_income
    }

    pub fn work_proportion(&self) -> Decimal {
        self.proportion_of(self.work_income)
    }

    pub fn pension_proportion(&self) -> Decimal {
        self.proportion_of(self.pension_income)
    }

    pub fn other_proportion(&self) -> Decimal {
        self.proportion_of(self.other_earned_income)
    }

    fn proportion_of(
        &self,
        component: Decimal,
    ) -> Decimal {
        let total = self.total();
        if total.is_zero() {
            Decimal::ZERO
        } else {
            component / total
        }
    }

    /// Returns a copy with `amount` added, spread over the components in
    /// proportion to their current shares.
    ///
    /// With zero total income there are no shares to follow, so the amount
    /// is split into equal thirds.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::IncomeComponents;
    ///
    /// let income = IncomeComponents::new(dec!(30000), dec!(10000), dec!(0));
    /// let inflated = income.inflate(dec!(100));
    ///
    /// assert_eq!(inflated.work_income, dec!(30075));
    /// assert_eq!(inflated.pension_income, dec!(10025));
    /// assert_eq!(inflated.other_earned_income, dec!(0));
    /// ```
    pub fn inflate(
        &self,
        amount: Decimal,
    ) -> Self {
        if self.total().is_zero() {
            let third = amount / Decimal::from(3);
            return Self::new(third, third, third);
        }

        Self::new(
            self.work_income + amount * self.work_proportion(),
            self.pension_income + amount * self.pension_proportion(),
            self.other_earned_income + amount * self.other_proportion(),
        )
    }
}
