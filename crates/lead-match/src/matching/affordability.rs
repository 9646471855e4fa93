use super::domain::CustomerIntent;
use serde::{Serialize, Serializer};
use std::fmt;

/// Absorbs binary floating point noise before truncating to whole currency units.
const CURRENCY_EPSILON: f64 = 1e-6;

/// Lending and budgeting dials used to turn income into a price ceiling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffordabilityPolicy {
    pub minimum_monthly_income: f64,
    /// Share of gross income a mortgage payment may consume when buying.
    pub purchase_dti_limit: f64,
    /// Share of gross income that may go to rent.
    pub rent_share_limit: f64,
    pub annual_interest_rate: f64,
    pub term_months: u32,
    pub currency: &'static str,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            minimum_monthly_income: 10_000.0,
            purchase_dti_limit: 0.28,
            rent_share_limit: 0.30,
            annual_interest_rate: 0.04,
            term_months: 360,
            currency: "AED",
        }
    }
}

impl AffordabilityPolicy {
    fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate / 12.0
    }

    /// Level monthly payment that amortizes `principal` over the policy term.
    pub fn monthly_payment(&self, principal: f64) -> f64 {
        let r = self.monthly_rate();
        let n = self.term_months as f64;
        if r == 0.0 {
            return principal / n;
        }
        let growth = (1.0 + r).powf(n);
        principal * r * growth / (growth - 1.0)
    }

    /// Largest principal a level `payment` can amortize over the policy term.
    pub fn max_principal(&self, payment: f64) -> f64 {
        let r = self.monthly_rate();
        let n = self.term_months as f64;
        if r == 0.0 {
            return payment * n;
        }
        let growth = (1.0 + r).powf(n);
        payment * (growth - 1.0) / (r * growth)
    }

    pub fn assess(
        &self,
        monthly_income: f64,
        intent: CustomerIntent,
        existing_debt: f64,
    ) -> AffordabilityResult {
        // Written as a negated comparison so NaN also lands on the floor.
        if !(monthly_income >= self.minimum_monthly_income) || monthly_income <= 0.0 {
            return AffordabilityResult {
                intent,
                monthly_income,
                max_monthly_payment: 0,
                max_buy_price: 0,
                max_rent_price: 0,
                dti_ratio: 100.0,
                is_affordable: false,
                recommendation: Recommendation::BelowMinimumIncome {
                    minimum_income: floor_currency(self.minimum_monthly_income),
                    currency: self.currency,
                },
            };
        }

        let existing_debt = if existing_debt.is_finite() && existing_debt > 0.0 {
            existing_debt
        } else {
            0.0
        };

        if intent.is_rental() {
            self.assess_rental(monthly_income, existing_debt)
        } else {
            self.assess_purchase(monthly_income, intent, existing_debt)
        }
    }

    fn assess_purchase(
        &self,
        monthly_income: f64,
        intent: CustomerIntent,
        existing_debt: f64,
    ) -> AffordabilityResult {
        let max_payment = monthly_income * self.purchase_dti_limit;
        // Negative when debt exceeds the budget. Only the reported figures are floored.
        let remaining = max_payment - existing_debt;
        let available = remaining.max(0.0);
        let max_buy_price = floor_currency(self.max_principal(available));
        let threshold = as_percent(self.purchase_dti_limit);
        let dti_ratio = dti_percent(existing_debt + remaining, monthly_income);
        let is_affordable = dti_ratio <= threshold;
        let monthly_payment = floor_currency(available);

        let recommendation = if is_affordable {
            Recommendation::PurchaseWithinThreshold {
                max_price: max_buy_price,
                monthly_payment,
                currency: self.currency,
            }
        } else {
            Recommendation::PurchaseOverThreshold {
                dti_ratio,
                threshold,
                max_price: max_buy_price,
                currency: self.currency,
            }
        };

        AffordabilityResult {
            intent,
            monthly_income,
            max_monthly_payment: monthly_payment,
            max_buy_price,
            max_rent_price: floor_currency(monthly_income * self.rent_share_limit),
            dti_ratio,
            is_affordable,
            recommendation,
        }
    }

    fn assess_rental(&self, monthly_income: f64, existing_debt: f64) -> AffordabilityResult {
        let max_rent = monthly_income * self.rent_share_limit;
        let remaining = max_rent - existing_debt;
        let max_rent_price = floor_currency(remaining);
        let threshold = as_percent(self.rent_share_limit);
        let dti_ratio = dti_percent(existing_debt + remaining, monthly_income);
        let is_affordable = dti_ratio <= threshold;

        let recommendation = if is_affordable {
            Recommendation::RentWithinThreshold {
                max_rent: max_rent_price,
                currency: self.currency,
            }
        } else {
            Recommendation::RentOverThreshold {
                dti_ratio,
                threshold,
                max_rent: max_rent_price,
                currency: self.currency,
            }
        };

        AffordabilityResult {
            intent: CustomerIntent::Rent,
            monthly_income,
            max_monthly_payment: max_rent_price,
            max_buy_price: 0,
            max_rent_price,
            dti_ratio,
            is_affordable,
            recommendation,
        }
    }
}

/// Assess affordability with the default lending policy.
pub fn calculate_affordability(
    monthly_income: f64,
    intent: CustomerIntent,
    existing_debt: f64,
) -> AffordabilityResult {
    AffordabilityPolicy::default().assess(monthly_income, intent, existing_debt)
}

/// Percentage of income committed to debt, clamped to [0, 100] and kept to two
/// decimals so threshold comparisons are not decided by rounding noise.
fn dti_percent(committed: f64, monthly_income: f64) -> f64 {
    let raw = (committed / monthly_income * 100.0).clamp(0.0, 100.0);
    (raw * 100.0).round() / 100.0
}

fn as_percent(share: f64) -> f64 {
    (share * 10_000.0).round() / 100.0
}

fn floor_currency(amount: f64) -> u64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    (amount + CURRENCY_EPSILON).floor() as u64
}

/// Renders `1234567` as `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Outcome of the affordability assessment for one (income, intent) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffordabilityResult {
    pub intent: CustomerIntent,
    pub monthly_income: f64,
    pub max_monthly_payment: u64,
    pub max_buy_price: u64,
    pub max_rent_price: u64,
    pub dti_ratio: f64,
    pub is_affordable: bool,
    pub recommendation: Recommendation,
}

impl AffordabilityResult {
    /// Price ceiling listings are compared against. Rental listings quote annual
    /// rent, so the monthly ceiling is annualized.
    pub fn price_ceiling(&self, intent: CustomerIntent) -> u64 {
        if intent.is_rental() {
            self.max_rent_price.saturating_mul(12)
        } else {
            self.max_buy_price
        }
    }
}

/// Advice templates parameterized by the computed affordability figures.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    BelowMinimumIncome {
        minimum_income: u64,
        currency: &'static str,
    },
    PurchaseWithinThreshold {
        max_price: u64,
        monthly_payment: u64,
        currency: &'static str,
    },
    PurchaseOverThreshold {
        dti_ratio: f64,
        threshold: f64,
        max_price: u64,
        currency: &'static str,
    },
    RentWithinThreshold {
        max_rent: u64,
        currency: &'static str,
    },
    RentOverThreshold {
        dti_ratio: f64,
        threshold: f64,
        max_rent: u64,
        currency: &'static str,
    },
}

fn millions(amount: u64) -> String {
    format!("{:.1}M", amount as f64 / 1_000_000.0)
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::BelowMinimumIncome {
                minimum_income,
                currency,
            } => write!(
                f,
                "Your income is below minimum threshold. Minimum recommended: {} {currency}/month.",
                group_thousands(*minimum_income)
            ),
            Recommendation::PurchaseWithinThreshold {
                max_price,
                monthly_payment,
                currency,
            } => write!(
                f,
                "You can afford up to {} {currency} purchase ({} {currency}/month)",
                millions(*max_price),
                group_thousands(*monthly_payment)
            ),
            Recommendation::PurchaseOverThreshold {
                dti_ratio,
                threshold,
                max_price,
                currency,
            } => write!(
                f,
                "Your DTI ratio is {dti_ratio:.1}% (safe threshold: {threshold:.0}%). Max affordable: {} {currency}",
                millions(*max_price)
            ),
            Recommendation::RentWithinThreshold { max_rent, currency } => write!(
                f,
                "You can afford up to {} {currency}/month rent",
                group_thousands(*max_rent)
            ),
            Recommendation::RentOverThreshold {
                dti_ratio,
                threshold,
                max_rent,
                currency,
            } => write!(
                f,
                "Your DTI ratio is {dti_ratio:.1}% (safe threshold: {threshold:.0}%). Max affordable rent: {} {currency}/month",
                group_thousands(*max_rent)
            ),
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
