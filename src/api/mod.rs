use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Allocation, AmortizationRow, ComparisonSettings, HorizonReport, MAX_SWEEP_POINTS, ReturnSweep,
    ScenarioParameters, SweepPoint, YearGain, amortization_schedule, compare_horizons,
    gain_timeline, monthly_payment, return_sweep,
};

mod error;

pub use error::ApiError;
use error::ErrorResponse;

const MAX_HORIZON_YEARS: f64 = 100.0;
const MAX_HORIZONS: usize = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliAllocation {
    Invest,
    Save,
}

impl From<CliAllocation> for Allocation {
    fn from(value: CliAllocation) -> Self {
        match value {
            CliAllocation::Invest => Allocation::Invested,
            CliAllocation::Save => Allocation::Saved,
        }
    }
}

impl From<bool> for CliAllocation {
    fn from(invest: bool) -> Self {
        if invest {
            CliAllocation::Invest
        } else {
            CliAllocation::Save
        }
    }
}

/// Horizon list as sent by clients: a bare number, an array, or "10,30".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum HorizonsField {
    Single(f64),
    Many(Vec<f64>),
    Csv(String),
}

impl HorizonsField {
    fn into_years(self) -> Result<Vec<f64>, ApiError> {
        match self {
            HorizonsField::Single(years) => Ok(vec![years]),
            HorizonsField::Many(years) => Ok(years),
            HorizonsField::Csv(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<f64>().map_err(|_| {
                        ApiError::invalid("--years", format!("has a non-numeric entry '{part}'"))
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    price: Option<f64>,
    down_payment: Option<f64>,
    mortgage_rate: Option<f64>,
    horizons: Option<HorizonsField>,
    inflation: Option<f64>,
    gross_return: Option<f64>,
    tax_rate: Option<f64>,
    initial_capital: Option<f64>,
    monthly_contribution: Option<f64>,
    invest_initial: Option<bool>,
    invest_monthly: Option<bool>,
    salary: Option<f64>,
    min_gain: Option<f64>,
    sweep_start: Option<f64>,
    sweep_end: Option<f64>,
    sweep_step: Option<f64>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cash_or_mortgage",
    about = "Compare paying cash for a property against borrowing and investing the capital"
)]
struct Cli {
    #[arg(long, default_value_t = 150_000.0, help = "Property price")]
    price: f64,
    #[arg(
        long,
        default_value_t = 15.0,
        help = "Down payment in percent of the price"
    )]
    down_payment: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Nominal annual mortgage rate in percent"
    )]
    mortgage_rate: f64,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [10.0, 30.0],
        help = "Loan horizons in years to compare, comma separated"
    )]
    years: Vec<f64>,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Expected annual inflation in percent"
    )]
    inflation: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Expected gross annual investment return in percent"
    )]
    gross_return: f64,
    #[arg(
        long,
        default_value_t = 26.0,
        help = "Tax on investment returns in percent"
    )]
    tax_rate: f64,
    #[arg(
        long,
        help = "Capital available up front; defaults to the financed principal"
    )]
    initial_capital: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    monthly_contribution: f64,
    #[arg(long, value_enum, default_value_t = CliAllocation::Invest)]
    initial_allocation: CliAllocation,
    #[arg(long, value_enum, default_value_t = CliAllocation::Invest)]
    monthly_allocation: CliAllocation,
    #[arg(
        long,
        default_value_t = 30_000.0,
        help = "Net annual salary, 0 disables salary comparisons"
    )]
    salary: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Minimum real gain in percent of the principal, 0 means break even"
    )]
    min_gain: f64,
    #[arg(long, default_value_t = 2.0, help = "First gross return of the sweep in percent")]
    sweep_start: f64,
    #[arg(long, default_value_t = 7.0, help = "Last gross return of the sweep in percent")]
    sweep_end: f64,
    #[arg(long, default_value_t = 0.25, help = "Sweep step in percent")]
    sweep_step: f64,
}

#[derive(Debug, Clone)]
pub struct ReportInputs {
    /// Scenario for the first horizon; other horizons reuse it with `years` swapped.
    pub scenario: ScenarioParameters,
    pub horizons: Vec<f64>,
    pub comparison: ComparisonSettings,
    pub sweep: ReturnSweep,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportResponse {
    price: f64,
    principal: f64,
    initial_capital: f64,
    initial_allocation: Allocation,
    monthly_allocation: Allocation,
    horizons: Vec<HorizonReport>,
    sweep: Vec<SweepPoint>,
    timeline: Vec<YearGain>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleResponse {
    years: f64,
    principal: f64,
    payment: f64,
    payoff_month: Option<u32>,
    rows: Vec<AmortizationRow>,
}

fn build_inputs(cli: Cli) -> Result<ReportInputs, ApiError> {
    let numeric = [
        ("--price", cli.price),
        ("--down-payment", cli.down_payment),
        ("--mortgage-rate", cli.mortgage_rate),
        ("--inflation", cli.inflation),
        ("--gross-return", cli.gross_return),
        ("--tax-rate", cli.tax_rate),
        ("--initial-capital", cli.initial_capital.unwrap_or(0.0)),
        ("--monthly-contribution", cli.monthly_contribution),
        ("--salary", cli.salary),
        ("--min-gain", cli.min_gain),
        ("--sweep-start", cli.sweep_start),
        ("--sweep-end", cli.sweep_end),
        ("--sweep-step", cli.sweep_step),
    ];
    for (flag, value) in numeric {
        if !value.is_finite() {
            return Err(ApiError::invalid(flag, "must be a finite number"));
        }
    }

    if cli.price < 0.0 {
        return Err(ApiError::invalid("--price", "must be >= 0"));
    }

    if !(0.0..=100.0).contains(&cli.down_payment) {
        return Err(ApiError::invalid("--down-payment", "must be between 0 and 100"));
    }

    if cli.mortgage_rate < 0.0 {
        return Err(ApiError::invalid("--mortgage-rate", "must be >= 0"));
    }

    if cli.inflation < 0.0 {
        return Err(ApiError::invalid("--inflation", "must be >= 0"));
    }

    if cli.gross_return < 0.0 {
        return Err(ApiError::invalid("--gross-return", "must be >= 0"));
    }

    if !(0.0..100.0).contains(&cli.tax_rate) {
        return Err(ApiError::invalid("--tax-rate", "must be >= 0 and < 100"));
    }

    if cli.years.is_empty() {
        return Err(ApiError::invalid("--years", "needs at least one horizon"));
    }

    if cli.years.len() > MAX_HORIZONS {
        return Err(ApiError::invalid(
            "--years",
            format!("accepts at most {MAX_HORIZONS} horizons, got {}", cli.years.len()),
        ));
    }

    if let Some(bad) = cli
        .years
        .iter()
        .find(|y| !y.is_finite() || **y <= 0.0 || **y > MAX_HORIZON_YEARS)
    {
        return Err(ApiError::invalid(
            "--years",
            format!("must be > 0 and <= {MAX_HORIZON_YEARS}, got {bad}"),
        ));
    }

    if cli.initial_capital.is_some_and(|v| v < 0.0) {
        return Err(ApiError::invalid("--initial-capital", "must be >= 0"));
    }

    if cli.monthly_contribution < 0.0 {
        return Err(ApiError::invalid("--monthly-contribution", "must be >= 0"));
    }

    if cli.salary < 0.0 {
        return Err(ApiError::invalid("--salary", "must be >= 0"));
    }

    if cli.min_gain < 0.0 {
        return Err(ApiError::invalid("--min-gain", "must be >= 0"));
    }

    if cli.sweep_step <= 0.0 {
        return Err(ApiError::invalid("--sweep-step", "must be > 0"));
    }

    if cli.sweep_end < cli.sweep_start {
        return Err(ApiError::invalid("--sweep-end", "must be >= --sweep-start"));
    }

    let sweep = ReturnSweep {
        start: cli.sweep_start / 100.0,
        end: cli.sweep_end / 100.0,
        step: cli.sweep_step / 100.0,
    };
    if sweep.point_count() > MAX_SWEEP_POINTS {
        return Err(ApiError::invalid(
            "--sweep-step",
            format!("yields more than {MAX_SWEEP_POINTS} sweep points"),
        ));
    }

    let down_payment_ratio = cli.down_payment / 100.0;
    let principal = cli.price * (1.0 - down_payment_ratio);

    Ok(ReportInputs {
        scenario: ScenarioParameters {
            price: cli.price,
            down_payment_ratio,
            annual_rate: cli.mortgage_rate / 100.0,
            years: cli.years[0],
            gross_return_rate: cli.gross_return / 100.0,
            tax_rate: cli.tax_rate / 100.0,
            inflation_rate: cli.inflation / 100.0,
            initial_capital: cli.initial_capital.unwrap_or(principal),
            monthly_contribution: cli.monthly_contribution,
            initial_allocation: cli.initial_allocation.into(),
            monthly_allocation: cli.monthly_allocation.into(),
        },
        horizons: cli.years,
        comparison: ComparisonSettings {
            annual_salary: cli.salary,
            min_gain_ratio: cli.min_gain / 100.0,
        },
        sweep,
    })
}

fn default_cli() -> Cli {
    Cli {
        price: 150_000.0,
        down_payment: 15.0,
        mortgage_rate: 3.0,
        years: vec![10.0, 30.0],
        inflation: 2.0,
        gross_return: 5.0,
        tax_rate: 26.0,
        initial_capital: None,
        monthly_contribution: 0.0,
        initial_allocation: CliAllocation::Invest,
        monthly_allocation: CliAllocation::Invest,
        salary: 30_000.0,
        min_gain: 10.0,
        sweep_start: 2.0,
        sweep_end: 7.0,
        sweep_step: 0.25,
    }
}

fn inputs_from_payload(payload: ScenarioPayload) -> Result<ReportInputs, ApiError> {
    let mut cli = default_cli();

    if let Some(v) = payload.price {
        cli.price = v;
    }
    if let Some(v) = payload.down_payment {
        cli.down_payment = v;
    }
    if let Some(v) = payload.mortgage_rate {
        cli.mortgage_rate = v;
    }
    if let Some(v) = payload.horizons {
        cli.years = v.into_years()?;
    }
    if let Some(v) = payload.inflation {
        cli.inflation = v;
    }
    if let Some(v) = payload.gross_return {
        cli.gross_return = v;
    }
    if let Some(v) = payload.tax_rate {
        cli.tax_rate = v;
    }
    if let Some(v) = payload.initial_capital {
        cli.initial_capital = Some(v);
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.invest_initial {
        cli.initial_allocation = v.into();
    }
    if let Some(v) = payload.invest_monthly {
        cli.monthly_allocation = v.into();
    }
    if let Some(v) = payload.salary {
        cli.salary = v;
    }
    if let Some(v) = payload.min_gain {
        cli.min_gain = v;
    }
    if let Some(v) = payload.sweep_start {
        cli.sweep_start = v;
    }
    if let Some(v) = payload.sweep_end {
        cli.sweep_end = v;
    }
    if let Some(v) = payload.sweep_step {
        cli.sweep_step = v;
    }

    build_inputs(cli)
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<ReportInputs, ApiError> {
    let payload = serde_json::from_str::<ScenarioPayload>(json)?;
    inputs_from_payload(payload)
}

fn build_report(inputs: &ReportInputs) -> ReportResponse {
    let scenario = &inputs.scenario;
    ReportResponse {
        price: scenario.price,
        principal: scenario.principal(),
        initial_capital: scenario.initial_capital,
        initial_allocation: scenario.initial_allocation,
        monthly_allocation: scenario.monthly_allocation,
        horizons: compare_horizons(scenario, &inputs.horizons, &inputs.comparison),
        sweep: return_sweep(scenario, &inputs.horizons, &inputs.sweep),
        timeline: gain_timeline(scenario, &inputs.horizons),
    }
}

fn build_schedule(inputs: &ReportInputs) -> ScheduleResponse {
    let terms = inputs.scenario.mortgage();
    let schedule = amortization_schedule(&terms, &inputs.scenario.investment());
    ScheduleResponse {
        years: terms.years,
        principal: terms.principal,
        payment: monthly_payment(terms.principal, terms.annual_rate, terms.years),
        payoff_month: schedule.payoff_month,
        rows: schedule.rows,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cash_or_mortgage=info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Parses command line flags, prints the JSON report to stdout.
pub fn run_cli<I, T>(args: I) -> Result<(), ApiError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    init_tracing();
    let cli = Cli::parse_from(args);
    let inputs = build_inputs(cli)?;
    tracing::debug!(horizons = ?inputs.horizons, "building report");
    let report = build_report(&inputs);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    init_tracing();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/report", get(report_get_handler).post(report_post_handler))
        .route(
            "/api/schedule",
            get(schedule_get_handler).post(schedule_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("cash-or-mortgage HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/report");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn report_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    report_handler_impl(payload)
}

async fn report_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    report_handler_impl(payload)
}

fn report_handler_impl(payload: ScenarioPayload) -> Response {
    tracing::debug!(?payload, "report request");
    match inputs_from_payload(payload) {
        Ok(inputs) => json_response(StatusCode::OK, build_report(&inputs)),
        Err(err) => {
            tracing::debug!(%err, "rejected report request");
            err.into_response()
        }
    }
}

async fn schedule_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    schedule_handler_impl(payload)
}

async fn schedule_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    schedule_handler_impl(payload)
}

fn schedule_handler_impl(payload: ScenarioPayload) -> Response {
    tracing::debug!(?payload, "schedule request");
    match inputs_from_payload(payload) {
        Ok(inputs) => json_response(StatusCode::OK, build_schedule(&inputs)),
        Err(err) => {
            tracing::debug!(%err, "rejected schedule request");
            err.into_response()
        }
    }
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Verdict;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli()
    }

    #[test]
    fn clap_defaults_match_api_defaults() {
        let parsed = Cli::parse_from(["cash_or_mortgage"]);
        let defaults = default_cli();
        assert_approx(parsed.price, defaults.price);
        assert_approx(parsed.down_payment, defaults.down_payment);
        assert_eq!(parsed.years, defaults.years);
        assert_eq!(parsed.initial_capital, None);
        assert_eq!(parsed.initial_allocation, CliAllocation::Invest);
        assert_approx(parsed.sweep_step, defaults.sweep_step);
    }

    #[test]
    fn clap_parses_comma_separated_horizons_and_allocations() {
        let parsed = Cli::parse_from([
            "cash_or_mortgage",
            "--years",
            "15,20,25",
            "--monthly-allocation",
            "save",
        ]);
        assert_eq!(parsed.years, vec![15.0, 20.0, 25.0]);
        assert_eq!(parsed.monthly_allocation, CliAllocation::Save);
    }

    #[test]
    fn build_inputs_converts_percentages_and_defaults_capital_to_principal() {
        let inputs = build_inputs(sample_cli()).expect("valid inputs");
        let scenario = inputs.scenario;
        assert_approx(scenario.down_payment_ratio, 0.15);
        assert_approx(scenario.annual_rate, 0.03);
        assert_approx(scenario.tax_rate, 0.26);
        assert_approx(scenario.gross_return_rate, 0.05);
        assert_approx(scenario.inflation_rate, 0.02);
        assert_approx(scenario.initial_capital, 127_500.0);
        assert_approx(scenario.years, 10.0);
        assert_eq!(inputs.horizons, vec![10.0, 30.0]);
        assert_approx(inputs.comparison.min_gain_ratio, 0.10);
        assert_eq!(inputs.sweep.rates().len(), 21);
    }

    #[test]
    fn build_inputs_keeps_explicit_initial_capital() {
        let mut cli = sample_cli();
        cli.initial_capital = Some(0.0);
        let inputs = build_inputs(cli).expect("valid inputs");
        assert_approx(inputs.scenario.initial_capital, 0.0);
    }

    #[test]
    fn build_inputs_rejects_out_of_range_down_payment() {
        let mut cli = sample_cli();
        cli.down_payment = 120.0;
        let err = build_inputs(cli).expect_err("must reject down payment above 100%");
        assert!(err.to_string().contains("--down-payment"));
    }

    #[test]
    fn build_inputs_rejects_full_tax_rate() {
        let mut cli = sample_cli();
        cli.tax_rate = 100.0;
        let err = build_inputs(cli).expect_err("must reject 100% tax");
        assert!(err.to_string().contains("--tax-rate"));
    }

    #[test]
    fn build_inputs_rejects_empty_or_non_positive_horizons() {
        let mut cli = sample_cli();
        cli.years = Vec::new();
        let err = build_inputs(cli).expect_err("must reject missing horizons");
        assert!(err.to_string().contains("--years"));

        let mut cli = sample_cli();
        cli.years = vec![10.0, 0.0];
        let err = build_inputs(cli).expect_err("must reject zero horizon");
        assert!(err.to_string().contains("--years"));
    }

    #[test]
    fn build_inputs_rejects_too_many_horizons() {
        let mut cli = sample_cli();
        cli.years = (1..=MAX_HORIZONS + 1).map(|y| y as f64).collect();
        let err = build_inputs(cli).expect_err("must reject long horizon list");
        assert!(err.to_string().contains("--years"));

        let mut cli = sample_cli();
        cli.years = (1..=MAX_HORIZONS).map(|y| y as f64).collect();
        assert!(build_inputs(cli).is_ok());
    }

    #[test]
    fn build_inputs_rejects_oversized_sweeps() {
        let err = inputs_from_json(r#"{"sweepStep": 1e-300}"#).expect_err("must reject tiny step");
        assert!(err.to_string().contains("--sweep-step"));

        let err = inputs_from_json(r#"{"sweepStep": 0.001}"#).expect_err("must reject 5001 points");
        assert!(err.to_string().contains("--sweep-step"));

        let fine = inputs_from_json(r#"{"sweepStep": 0.01}"#).expect("501 points fit");
        assert_eq!(fine.sweep.rates().len(), 501);
    }

    #[test]
    fn build_inputs_rejects_non_finite_values() {
        let mut cli = sample_cli();
        cli.gross_return = f64::NAN;
        let err = build_inputs(cli).expect_err("must reject NaN");
        assert!(err.to_string().contains("--gross-return"));
    }

    #[test]
    fn build_inputs_rejects_negative_capital() {
        let mut cli = sample_cli();
        cli.initial_capital = Some(-1.0);
        let err = build_inputs(cli).expect_err("must reject negative capital");
        assert!(err.to_string().contains("--initial-capital"));
    }

    #[test]
    fn inputs_from_json_parses_web_keys() {
        let json = r#"{
          "price": 200000,
          "downPayment": 20,
          "mortgageRate": 5,
          "horizons": [30, 15],
          "inflation": 2,
          "grossReturn": 5,
          "taxRate": 20,
          "initialCapital": 40000,
          "monthlyContribution": 100,
          "investMonthly": false,
          "salary": 0,
          "minGain": 0
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");
        let scenario = inputs.scenario;
        assert_approx(scenario.price, 200_000.0);
        assert_approx(scenario.down_payment_ratio, 0.2);
        assert_approx(scenario.annual_rate, 0.05);
        assert_approx(scenario.years, 30.0);
        assert_approx(scenario.initial_capital, 40_000.0);
        assert_eq!(scenario.initial_allocation, Allocation::Invested);
        assert_eq!(scenario.monthly_allocation, Allocation::Saved);
        assert_eq!(inputs.horizons, vec![30.0, 15.0]);
        assert_approx(inputs.comparison.annual_salary, 0.0);
    }

    #[test]
    fn inputs_from_json_accepts_scalar_and_csv_horizons() {
        let single = inputs_from_json(r#"{"horizons": 25}"#).expect("number should parse");
        assert_eq!(single.horizons, vec![25.0]);

        let csv = inputs_from_json(r#"{"horizons": "10, 20,30"}"#).expect("csv should parse");
        assert_eq!(csv.horizons, vec![10.0, 20.0, 30.0]);

        let err = inputs_from_json(r#"{"horizons": "10,abc"}"#).expect_err("must reject text");
        assert!(err.to_string().contains("--years"));
    }

    #[test]
    fn inputs_from_json_reports_malformed_payload() {
        let err = inputs_from_json(r#"{"price": "lots"}"#).expect_err("must reject bad type");
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[test]
    fn report_response_serialization_contains_expected_fields() {
        let mut cli = sample_cli();
        cli.years = vec![5.0];
        let inputs = build_inputs(cli).expect("valid inputs");
        let report = build_report(&inputs);
        assert_eq!(report.horizons.len(), 1);
        assert_eq!(report.timeline.len(), 5);
        assert_eq!(report.sweep.len(), 21);

        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(json.contains("\"horizons\""));
        assert!(json.contains("\"breakEvenGrossReturn\""));
        assert!(json.contains("\"breakEvenBracketed\""));
        assert!(json.contains("\"payoffYears\""));
        assert!(json.contains("\"gainReal\""));
        assert!(json.contains("\"fvNominal\""));
        assert!(json.contains("\"affordability\""));
        assert!(json.contains("\"initialAllocation\":\"invested\""));
    }

    #[test]
    fn report_matches_reference_scenario() {
        let json = r#"{
          "price": 200000,
          "downPayment": 20,
          "mortgageRate": 5,
          "horizons": 30,
          "inflation": 2,
          "grossReturn": 5,
          "taxRate": 20,
          "initialCapital": 40000,
          "monthlyContribution": 100,
          "minGain": 0
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");
        let report = build_report(&inputs);
        let horizon = &report.horizons[0];
        assert!((horizon.scenario.gain_real - -36890.19100736438).abs() <= 1e-4);
        assert!((horizon.break_even_gross_return - 0.06372442977267745).abs() <= 1e-5);
        assert_eq!(horizon.affordability.verdict, Verdict::PayCash);
    }

    #[test]
    fn schedule_response_follows_first_horizon() {
        let json = r#"{
          "price": 200000,
          "downPayment": 20,
          "mortgageRate": 5,
          "horizons": [30, 10],
          "grossReturn": 5,
          "taxRate": 20,
          "initialCapital": 10000,
          "monthlyContribution": 100
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");
        let schedule = build_schedule(&inputs);
        assert_eq!(schedule.rows.len(), 360);
        assert_eq!(schedule.payoff_month, Some(266));
        assert!((schedule.payment - 858.9145968194237).abs() <= 1e-5);

        let json = serde_json::to_string(&schedule).expect("schedule should serialize");
        assert!(json.contains("\"payoffMonth\":266"));
        assert!(json.contains("\"paidPrincipal\""));
    }

    #[test]
    fn api_error_renders_as_bad_request() {
        let response = ApiError::invalid("--price", "must be >= 0").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }
}
