use super::types::{
    Allocation, AmortizationRow, AmortizationSchedule, InvestmentPlan, MortgageCosts,
    MortgageTerms, ScenarioParameters, ScenarioResult,
};

/// Invested and merely-saved money, tracked side by side.
#[derive(Debug, Clone, Copy)]
struct Holdings {
    invested: f64,
    saved: f64,
}

impl Holdings {
    fn seeded(plan: &InvestmentPlan) -> Self {
        match plan.initial_allocation {
            Allocation::Invested => Self {
                invested: plan.initial,
                saved: 0.0,
            },
            Allocation::Saved => Self {
                invested: 0.0,
                saved: plan.initial,
            },
        }
    }

    // Compound first, then contribute: a deposit made in month m starts
    // earning in month m + 1.
    fn advance_month(&mut self, plan: &InvestmentPlan, monthly_return: f64) {
        self.invested *= 1.0 + monthly_return;
        match plan.monthly_allocation {
            Allocation::Invested => self.invested += plan.monthly,
            Allocation::Saved => self.saved += plan.monthly,
        }
    }

    fn total(self) -> f64 {
        self.invested + self.saved
    }
}

pub fn months_in(years: f64) -> u32 {
    (years * 12.0).round().max(0.0) as u32
}

pub fn monthly_payment(principal: f64, annual_rate: f64, years: f64) -> f64 {
    if principal == 0.0 {
        return 0.0;
    }
    let monthly_rate = annual_rate / 12.0;
    let total_months = years * 12.0;
    if monthly_rate == 0.0 {
        return principal / total_months;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-total_months))
}

pub fn investment_future_value(plan: &InvestmentPlan, years: f64) -> f64 {
    let monthly_return = plan.net_monthly_return();
    let mut holdings = Holdings::seeded(plan);
    for _ in 0..months_in(years) {
        holdings.advance_month(plan, monthly_return);
    }
    holdings.total()
}

/// Nominal and inflation-discounted cost of a fully amortised loan.
///
/// Real interest is the month-by-month sum of each payment discounted at the
/// monthly inflation rate, less the principal.
pub fn mortgage_costs(terms: &MortgageTerms, inflation: f64) -> MortgageCosts {
    let total_months = terms.years * 12.0;
    let monthly_inflation = inflation / 12.0;
    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.years);
    let total_paid = payment * total_months;
    let interest_nominal = total_paid - terms.principal;

    let periods = total_months.floor().max(0.0) as u32;
    let mut present_value = 0.0;
    for month in 1..=periods {
        present_value += payment / (1.0 + monthly_inflation).powf(f64::from(month));
    }

    MortgageCosts {
        payment,
        total_paid,
        interest_nominal,
        interest_real: present_value - terms.principal,
    }
}

pub fn evaluate_scenario(params: &ScenarioParameters) -> ScenarioResult {
    let principal = params.principal();
    let plan = params.investment();
    let fv_nominal = investment_future_value(&plan, params.years);
    let costs = mortgage_costs(&params.mortgage(), params.inflation_rate);
    let fv_real = fv_nominal / (1.0 + params.inflation_rate).powf(params.years);

    let mut total_contributions = 0.0;
    if plan.initial_allocation.is_invested() {
        total_contributions += params.initial_capital;
    }
    if plan.monthly_allocation.is_invested() {
        total_contributions += params.monthly_contribution * params.years * 12.0;
    }

    ScenarioResult {
        principal,
        initial_capital: params.initial_capital,
        payment: costs.payment,
        fv_nominal,
        fv_real,
        interest_nominal: costs.interest_nominal,
        interest_real: costs.interest_real,
        gain_nominal: fv_nominal - total_contributions - costs.interest_nominal,
        gain_real: fv_real - total_contributions - costs.interest_real,
    }
}

/// Outstanding balance after `after_years` of regular payments, never negative.
pub fn mortgage_balance(terms: &MortgageTerms, after_years: f64) -> f64 {
    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.years);
    let monthly_rate = terms.annual_rate / 12.0;
    let elapsed = months_in(after_years);

    let balance = if monthly_rate == 0.0 {
        terms.principal - payment * f64::from(elapsed)
    } else {
        let growth = (1.0 + monthly_rate).powf(f64::from(elapsed));
        terms.principal * growth - payment * (growth - 1.0) / monthly_rate
    };
    balance.max(0.0)
}

pub fn amortization_schedule(terms: &MortgageTerms, plan: &InvestmentPlan) -> AmortizationSchedule {
    let payment = monthly_payment(terms.principal, terms.annual_rate, terms.years);
    let monthly_rate = terms.annual_rate / 12.0;
    let monthly_return = plan.net_monthly_return();
    let total_months = months_in(terms.years);

    let mut balance = terms.principal;
    let mut paid_principal = 0.0;
    let mut holdings = Holdings::seeded(plan);
    let mut payoff_month = None;
    let mut rows = Vec::with_capacity(total_months as usize);

    for month in 1..=total_months {
        let interest = balance * monthly_rate;
        let capital = payment - interest;
        balance = (balance - capital).max(0.0);
        paid_principal += capital;

        holdings.advance_month(plan, monthly_return);
        let available = holdings.total();
        if payoff_month.is_none() && available >= balance {
            payoff_month = Some(month);
        }

        rows.push(AmortizationRow {
            month,
            interest,
            capital,
            balance,
            paid_principal,
            available,
        });
    }

    AmortizationSchedule { rows, payoff_month }
}
