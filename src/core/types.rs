use serde::Serialize;

/// Where a cash flow goes: into the compounding portfolio or into a
/// non-growing savings pot.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Allocation {
    #[default]
    Invested,
    Saved,
}

impl Allocation {
    pub fn is_invested(self) -> bool {
        self == Allocation::Invested
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentPlan {
    pub initial: f64,
    pub monthly: f64,
    pub gross_return: f64,
    pub tax_rate: f64,
    pub initial_allocation: Allocation,
    pub monthly_allocation: Allocation,
}

impl InvestmentPlan {
    pub fn net_monthly_return(&self) -> f64 {
        self.gross_return * (1.0 - self.tax_rate) / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageTerms {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParameters {
    pub price: f64,
    pub down_payment_ratio: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub gross_return_rate: f64,
    pub tax_rate: f64,
    pub inflation_rate: f64,
    pub initial_capital: f64,
    pub monthly_contribution: f64,
    pub initial_allocation: Allocation,
    pub monthly_allocation: Allocation,
}

impl ScenarioParameters {
    pub fn principal(&self) -> f64 {
        self.price * (1.0 - self.down_payment_ratio)
    }

    pub fn mortgage(&self) -> MortgageTerms {
        MortgageTerms {
            principal: self.principal(),
            annual_rate: self.annual_rate,
            years: self.years,
        }
    }

    pub fn investment(&self) -> InvestmentPlan {
        InvestmentPlan {
            initial: self.initial_capital,
            monthly: self.monthly_contribution,
            gross_return: self.gross_return_rate,
            tax_rate: self.tax_rate,
            initial_allocation: self.initial_allocation,
            monthly_allocation: self.monthly_allocation,
        }
    }

    pub fn with_years(self, years: f64) -> Self {
        Self { years, ..self }
    }

    pub fn with_gross_return(self, gross_return_rate: f64) -> Self {
        Self {
            gross_return_rate,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageCosts {
    pub payment: f64,
    pub total_paid: f64,
    pub interest_nominal: f64,
    pub interest_real: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub principal: f64,
    pub initial_capital: f64,
    pub payment: f64,
    pub fv_nominal: f64,
    pub fv_real: f64,
    pub interest_nominal: f64,
    pub interest_real: f64,
    pub gain_nominal: f64,
    pub gain_real: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub interest: f64,
    pub capital: f64,
    pub balance: f64,
    pub paid_principal: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    /// First month whose accumulated funds cover the remaining balance.
    pub payoff_month: Option<u32>,
}
