mod contribution;
mod finance;
mod project;
mod series;
mod types;

pub use contribution::{ContributionModel, roll_forward, yearly_contribution_growth};
pub use finance::{
    compound_interest, compound_interest_annual, future_value_of_contributions,
    inflation_adjusted_value, retirement_savings,
};
pub use project::project;
pub use series::generate_series;
pub use types::{
    Currency, MAX_HORIZON_YEARS, NormalizedInput, Projection, ProjectionInput, ProjectionSeries,
    ProjectionSummary, RetirementSavingsResult, SavingsDataPoint,
};
