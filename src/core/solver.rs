use super::engine::{evaluate_scenario, investment_future_value, mortgage_balance};
use super::types::ScenarioParameters;

pub const BREAK_EVEN_SEARCH_MAX: f64 = 0.20;
pub const BISECTION_ITERATIONS: u32 = 60;

#[derive(Debug, Clone, Copy)]
pub struct BisectionConfig {
    pub search_min: f64,
    pub search_max: f64,
    pub max_iterations: u32,
}

impl BisectionConfig {
    pub fn new(search_min: f64, search_max: f64) -> Self {
        Self {
            search_min,
            search_max,
            max_iterations: BISECTION_ITERATIONS,
        }
    }
}

/// Narrows `[search_min, search_max]` onto the point where `reached` flips
/// from false to true and returns the midpoint of the final bracket.
///
/// Runs exactly `max_iterations` halvings. `reached` is assumed monotone over
/// the interval; if it isn't, the search still terminates but the returned
/// point need not be a crossing.
pub fn bisect(config: BisectionConfig, mut reached: impl FnMut(f64) -> bool) -> f64 {
    let mut lo = config.search_min;
    let mut hi = config.search_max;
    for _ in 0..config.max_iterations {
        let mid = (lo + hi) * 0.5;
        if reached(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo + hi) * 0.5
}

/// Gross annual return in `[0, 0.20]` at which the real gain of borrowing
/// and investing is zero. `gross_return_rate` on `params` is ignored.
///
/// When no crossing exists in the interval the result pins to one of its
/// ends: 0 if the scenario already gains at zero return, 0.20 if it still
/// loses at 20%.
pub fn break_even_gross_return(params: &ScenarioParameters) -> f64 {
    bisect(
        BisectionConfig::new(0.0, BREAK_EVEN_SEARCH_MAX),
        |rate| evaluate_scenario(&params.with_gross_return(rate)).gain_real >= 0.0,
    )
}

/// Elapsed years after which accumulated funds first cover the remaining
/// mortgage balance, or `f64::INFINITY` if that never happens within the
/// loan term. Inflation on `params` is not used.
pub fn payoff_time(params: &ScenarioParameters) -> f64 {
    let plan = params.investment();
    let terms = params.mortgage();
    let covered = |elapsed: f64| {
        investment_future_value(&plan, elapsed) >= mortgage_balance(&terms, elapsed)
    };

    if !covered(params.years) {
        return f64::INFINITY;
    }
    bisect(BisectionConfig::new(0.0, params.years), covered)
}
