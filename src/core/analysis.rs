use serde::Serialize;

use super::engine::evaluate_scenario;
use super::solver::{BREAK_EVEN_SEARCH_MAX, break_even_gross_return, payoff_time};
use super::types::{ScenarioParameters, ScenarioResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    MortgageAndInvest,
    PayCash,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSettings {
    /// Net yearly salary; 0 disables the salary-based ratios.
    pub annual_salary: f64,
    /// Minimum real gain as a share of the principal; 0 means "break even".
    pub min_gain_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    pub verdict: Verdict,
    pub salary_share: Option<f64>,
    pub price_share: Option<f64>,
    pub months_of_work: Option<f64>,
    pub gap_ratio: Option<f64>,
    pub gap_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonReport {
    pub years: f64,
    pub scenario: ScenarioResult,
    pub break_even_gross_return: f64,
    pub break_even_bracketed: bool,
    pub payoff_years: Option<f64>,
    pub affordability: Affordability,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnSweep {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for ReturnSweep {
    fn default() -> Self {
        Self {
            start: 0.02,
            end: 0.07,
            step: 0.0025,
        }
    }
}

/// Upper bound on the points a single sweep evaluates.
pub const MAX_SWEEP_POINTS: usize = 1_000;

impl ReturnSweep {
    /// Number of rates from `start` to `end` inclusive, saturating at `usize::MAX`.
    pub fn point_count(&self) -> usize {
        if !(self.step > 0.0) || self.end < self.start {
            return 0;
        }
        let span = ((self.end - self.start) / self.step + 1e-9).floor();
        (span as usize).saturating_add(1)
    }

    /// At most `MAX_SWEEP_POINTS` rates, starting at `start`.
    pub fn rates(&self) -> Vec<f64> {
        (0..self.point_count().min(MAX_SWEEP_POINTS))
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub gross_return: f64,
    /// Real gain per horizon, in the order the horizons were given.
    pub gain_real: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GainPair {
    pub nominal: f64,
    pub real: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGain {
    pub year: u32,
    /// `None` for horizons shorter than `year`.
    pub gains: Vec<Option<GainPair>>,
}

pub fn affordability(
    result: &ScenarioResult,
    price: f64,
    settings: &ComparisonSettings,
) -> Affordability {
    let target = settings.min_gain_ratio.max(0.0);
    let required = result.principal * target;
    let meets_target = if target > 0.0 {
        result.gain_real >= required
    } else {
        result.gain_real >= 0.0
    };
    let salary = settings.annual_salary;

    Affordability {
        verdict: if meets_target {
            Verdict::MortgageAndInvest
        } else {
            Verdict::PayCash
        },
        salary_share: (salary > 0.0).then(|| result.gain_real / salary),
        price_share: (price > 0.0).then(|| result.gain_real / price),
        months_of_work: (salary > 0.0).then(|| result.gain_real / (salary / 12.0)),
        gap_ratio: (result.principal > 0.0).then(|| result.gain_real / result.principal - target),
        gap_amount: result.gain_real - required,
    }
}

/// Whether the real gain changes sign inside the break-even search interval.
pub fn break_even_is_bracketed(params: &ScenarioParameters) -> bool {
    let at_zero = evaluate_scenario(&params.with_gross_return(0.0)).gain_real;
    let at_max = evaluate_scenario(&params.with_gross_return(BREAK_EVEN_SEARCH_MAX)).gain_real;
    at_zero < 0.0 && at_max >= 0.0
}

pub fn horizon_report(
    base: &ScenarioParameters,
    years: f64,
    settings: &ComparisonSettings,
) -> HorizonReport {
    let params = base.with_years(years);
    let scenario = evaluate_scenario(&params);
    let break_even = break_even_gross_return(&params);
    let bracketed = break_even_is_bracketed(&params);
    if !bracketed {
        tracing::debug!(years, break_even, "break-even return pinned to search bound");
    }
    let payoff = payoff_time(&params);

    HorizonReport {
        years,
        scenario,
        break_even_gross_return: break_even,
        break_even_bracketed: bracketed,
        payoff_years: payoff.is_finite().then_some(payoff),
        affordability: affordability(&scenario, params.price, settings),
    }
}

pub fn compare_horizons(
    base: &ScenarioParameters,
    horizons: &[f64],
    settings: &ComparisonSettings,
) -> Vec<HorizonReport> {
    horizons
        .iter()
        .map(|&years| horizon_report(base, years, settings))
        .collect()
}

pub fn return_sweep(
    base: &ScenarioParameters,
    horizons: &[f64],
    sweep: &ReturnSweep,
) -> Vec<SweepPoint> {
    sweep
        .rates()
        .into_iter()
        .map(|rate| SweepPoint {
            gross_return: rate,
            gain_real: horizons
                .iter()
                .map(|&years| {
                    evaluate_scenario(&base.with_years(years).with_gross_return(rate)).gain_real
                })
                .collect(),
        })
        .collect()
}

/// Gains re-evaluated as if each whole year were the horizon.
pub fn gain_timeline(base: &ScenarioParameters, horizons: &[f64]) -> Vec<YearGain> {
    let longest = horizons.iter().copied().fold(0.0_f64, f64::max);
    let last_year = longest.floor().max(0.0) as u32;

    (1..=last_year)
        .map(|year| {
            let y = f64::from(year);
            let gains = horizons
                .iter()
                .map(|&years| {
                    (y <= years + 1e-9).then(|| {
                        let result = evaluate_scenario(&base.with_years(y));
                        GainPair {
                            nominal: result.gain_nominal,
                            real: result.gain_real,
                        }
                    })
                })
                .collect();
            YearGain { year, gains }
        })
        .collect()
}
