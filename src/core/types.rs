use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }
}

/// Longest horizon the engine will project. Ages further apart are truncated.
pub const MAX_HORIZON_YEARS: u32 = 150;

/// Raw assumptions as the caller supplied them. Nothing here is trusted;
/// the engine runs everything through [`ProjectionInput::normalize`] first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub current_age: i32,
    pub retirement_age: i32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return_rate_percent: f64,
    pub inflation_rate_percent: f64,
}

/// Sanitized inputs: every amount and rate is finite-or-clamped and
/// non-negative, and `start_age <= end_age <= start_age + MAX_HORIZON_YEARS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedInput {
    pub start_age: u32,
    pub end_age: u32,
    pub years_to_retirement: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return_rate_percent: f64,
    pub inflation_rate_percent: f64,
}

impl ProjectionInput {
    pub fn normalize(&self) -> NormalizedInput {
        let start_age = self.current_age.max(0) as u32;
        let end_age = (self.retirement_age.max(0) as u32)
            .max(start_age)
            .min(start_age.saturating_add(MAX_HORIZON_YEARS));
        NormalizedInput {
            start_age,
            end_age,
            years_to_retirement: end_age - start_age,
            current_savings: non_negative(self.current_savings),
            monthly_contribution: non_negative(self.monthly_contribution),
            annual_return_rate_percent: non_negative(self.annual_return_rate_percent),
            inflation_rate_percent: non_negative(self.inflation_rate_percent),
        }
    }
}

/// Floors at zero. `f64::max` drops a NaN operand, so NaN maps to 0 as well.
pub(crate) fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSavingsResult {
    pub total_savings: f64,
    pub inflation_adjusted_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsDataPoint {
    pub year_index: u32,
    pub age: u32,
    pub initial_savings_value: f64,
    pub contributions_value: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSeries {
    pub points: Vec<SavingsDataPoint>,
    pub labels: Vec<String>,
    pub initial_savings_data: Vec<f64>,
    pub contributions_data: Vec<f64>,
    pub total_data: Vec<f64>,
    pub currency: Currency,
    pub years_to_retirement: u32,
}

/// Headline numbers for the result panel, rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years_to_retirement: u32,
    pub total_savings: f64,
    pub inflation_adjusted_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub summary: ProjectionSummary,
    pub series: ProjectionSeries,
}
