mod analysis;
mod engine;
mod solver;
mod types;

pub use analysis::{
    Affordability, ComparisonSettings, GainPair, HorizonReport, MAX_SWEEP_POINTS, ReturnSweep,
    SweepPoint, Verdict, YearGain, affordability, break_even_is_bracketed, compare_horizons, gain_timeline,
    horizon_report, return_sweep,
};
pub use engine::{
    amortization_schedule, evaluate_scenario, investment_future_value, monthly_payment,
    months_in, mortgage_balance, mortgage_costs,
};
pub use solver::{
    BISECTION_ITERATIONS, BREAK_EVEN_SEARCH_MAX, BisectionConfig, bisect,
    break_even_gross_return, payoff_time,
};
pub use types::{
    Allocation, AmortizationRow, AmortizationSchedule, InvestmentPlan, MortgageCosts,
    MortgageTerms, ScenarioParameters, ScenarioResult,
};
