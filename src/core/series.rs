use super::contribution::roll_forward;
use super::types::{Currency, ProjectionInput, ProjectionSeries, SavingsDataPoint};

/// Year-by-year split of the pot into grown initial savings and grown
/// contributions, from the current age up to and including retirement.
///
/// The inflation rate is accepted for signature parity with the summary
/// calculation; the series itself is nominal.
pub fn generate_series(
    current_age: i32,
    retirement_age: i32,
    current_savings: f64,
    monthly_contribution: f64,
    annual_return_rate_percent: f64,
    inflation_rate_percent: f64,
    currency: Currency,
) -> ProjectionSeries {
    let input = ProjectionInput {
        current_age,
        retirement_age,
        current_savings,
        monthly_contribution,
        annual_return_rate_percent,
        inflation_rate_percent,
    }
    .normalize();

    let annual_rate = input.annual_return_rate_percent / 100.0;
    let monthly_rate = annual_rate / 12.0;

    let mut points = Vec::with_capacity(input.years_to_retirement as usize + 1);
    let mut initial_savings_value = input.current_savings;
    let mut contributions_value = 0.0;

    points.push(SavingsDataPoint {
        year_index: 0,
        age: input.start_age,
        initial_savings_value,
        contributions_value,
        total_value: initial_savings_value,
    });

    for year in 1..=input.years_to_retirement {
        initial_savings_value *= 1.0 + annual_rate;
        contributions_value = roll_forward(
            contributions_value,
            input.monthly_contribution,
            annual_rate,
            monthly_rate,
            year == 1,
        );
        let total_value = initial_savings_value + contributions_value;

        points.push(SavingsDataPoint {
            year_index: year,
            age: input.start_age + year,
            initial_savings_value: initial_savings_value.round(),
            contributions_value: contributions_value.round(),
            total_value: total_value.round(),
        });
    }

    ProjectionSeries {
        labels: points.iter().map(|p| format!("Age {}", p.age)).collect(),
        initial_savings_data: points.iter().map(|p| p.initial_savings_value).collect(),
        contributions_data: points.iter().map(|p| p.contributions_value).collect(),
        total_data: points.iter().map(|p| p.total_value).collect(),
        points,
        currency,
        years_to_retirement: input.years_to_retirement,
    }
}
