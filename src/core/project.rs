use tracing::debug;

use super::finance::retirement_savings;
use super::series::generate_series;
use super::types::{Currency, Projection, ProjectionInput, ProjectionSummary};

/// Summary panel and chart series for one set of assumptions. Both halves
/// read the same raw inputs; amounts in the summary are rounded here, at the
/// point of display, and nowhere earlier.
pub fn project(input: &ProjectionInput, currency: Currency) -> Projection {
    let normalized = input.normalize();
    let savings = retirement_savings(
        normalized.current_savings,
        normalized.monthly_contribution,
        normalized.annual_return_rate_percent,
        normalized.years_to_retirement as f64,
        normalized.inflation_rate_percent,
    );
    let series = generate_series(
        input.current_age,
        input.retirement_age,
        input.current_savings,
        input.monthly_contribution,
        input.annual_return_rate_percent,
        input.inflation_rate_percent,
        currency,
    );

    debug!(
        years = normalized.years_to_retirement,
        total = savings.total_savings,
        adjusted = savings.inflation_adjusted_savings,
        currency = currency.code(),
        "projection computed"
    );

    Projection {
        summary: ProjectionSummary {
            years_to_retirement: normalized.years_to_retirement,
            total_savings: savings.total_savings.round(),
            inflation_adjusted_savings: savings.inflation_adjusted_savings.round(),
        },
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ProjectionInput {
        ProjectionInput {
            current_age: 30,
            retirement_age: 65,
            current_savings: 1_000_000.0,
            monthly_contribution: 20_000.0,
            annual_return_rate_percent: 7.0,
            inflation_rate_percent: 5.0,
        }
    }

    #[test]
    fn summary_and_series_share_the_horizon() {
        let projection = project(&sample_input(), Currency::Inr);
        assert_eq!(projection.summary.years_to_retirement, 35);
        assert_eq!(projection.series.years_to_retirement, 35);
        assert_eq!(projection.series.points.len(), 36);
        assert_eq!(projection.series.currency, Currency::Inr);
    }

    #[test]
    fn summary_amounts_are_rounded_scalar_totals() {
        let input = sample_input();
        let projection = project(&input, Currency::Inr);
        let raw = retirement_savings(1_000_000.0, 20_000.0, 7.0, 35.0, 5.0);
        assert_eq!(projection.summary.total_savings, raw.total_savings.round());
        assert_eq!(
            projection.summary.inflation_adjusted_savings,
            raw.inflation_adjusted_savings.round()
        );
        assert!(projection.summary.inflation_adjusted_savings < projection.summary.total_savings);
    }

    #[test]
    fn inverted_ages_produce_zero_horizon_summary() {
        let mut input = sample_input();
        input.retirement_age = 25;
        let projection = project(&input, Currency::Usd);
        assert_eq!(projection.summary.years_to_retirement, 0);
        assert_eq!(projection.summary.total_savings, 1_000_000.0);
        assert_eq!(projection.summary.inflation_adjusted_savings, 1_000_000.0);
        assert_eq!(projection.series.points.len(), 1);
    }

    #[test]
    fn zero_growth_summary_matches_series_end() {
        let input = ProjectionInput {
            current_age: 40,
            retirement_age: 50,
            current_savings: 12_000.0,
            monthly_contribution: 240.0,
            annual_return_rate_percent: 0.0,
            inflation_rate_percent: 0.0,
        };
        let projection = project(&input, Currency::Usd);
        assert_eq!(projection.summary.total_savings, 40_800.0);
        assert_eq!(projection.series.total_data.last().copied(), Some(40_800.0));
    }
}
