use super::types::{MAX_HORIZON_YEARS, RetirementSavingsResult, non_negative};

/// Future value of a lump sum, `P * (1 + r/n)^(n*t)`.
///
/// No growth is applied when the principal, the period or the rate is not
/// positive. A frequency of zero is read as annual compounding.
pub fn compound_interest(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    compounding_frequency: u32,
) -> f64 {
    if principal <= 0.0 || years < 0.0 || annual_rate_percent <= 0.0 {
        return principal;
    }

    let rate = annual_rate_percent / 100.0;
    let n = compounding_frequency.max(1) as f64;
    principal * (1.0 + rate / n).powf(n * years)
}

pub fn compound_interest_annual(principal: f64, annual_rate_percent: f64, years: f64) -> f64 {
    compound_interest(principal, annual_rate_percent, years, 1)
}

/// Future value of equal monthly deposits, each compounding monthly from the
/// month it lands until the end of the period.
///
/// Iterates month by month: `value = (value + deposit) * (1 + monthly_rate)`.
/// Without a positive rate the deposits simply add up. A NaN period counts
/// as zero; periods longer than [`MAX_HORIZON_YEARS`] are truncated to it.
pub fn future_value_of_contributions(
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> f64 {
    if monthly_contribution <= 0.0 || years.is_nan() || years <= 0.0 {
        return 0.0;
    }
    let years = years.min(MAX_HORIZON_YEARS as f64);
    if annual_rate_percent <= 0.0 {
        return monthly_contribution * 12.0 * years;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let total_months = (years * 12.0).round() as u64;

    let mut value = 0.0;
    for _ in 0..total_months {
        value = (value + monthly_contribution) * (1.0 + monthly_rate);
    }
    value
}

/// Purchasing power today of an amount received `years` from now.
pub fn inflation_adjusted_value(future_value: f64, inflation_rate_percent: f64, years: f64) -> f64 {
    if future_value <= 0.0 || years <= 0.0 || inflation_rate_percent <= 0.0 {
        return future_value;
    }

    let rate = inflation_rate_percent / 100.0;
    future_value / (1.0 + rate).powf(years)
}

/// Nominal and inflation-adjusted pot at retirement. The lump sum compounds
/// annually; contributions use the month-iterative estimate.
pub fn retirement_savings(
    current_savings: f64,
    monthly_contribution: f64,
    annual_return_rate_percent: f64,
    years: f64,
    inflation_rate_percent: f64,
) -> RetirementSavingsResult {
    let initial_savings = non_negative(current_savings);
    let contribution = non_negative(monthly_contribution);
    let return_rate = non_negative(annual_return_rate_percent);
    let inflation = non_negative(inflation_rate_percent);
    let period = non_negative(years);

    let total_savings = compound_interest_annual(initial_savings, return_rate, period)
        + future_value_of_contributions(contribution, return_rate, period);

    RetirementSavingsResult {
        total_savings,
        inflation_adjusted_savings: inflation_adjusted_value(total_savings, inflation, period),
    }
}
