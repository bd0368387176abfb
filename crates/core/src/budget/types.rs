//! Budget data types.

use std::collections::BTreeSet;

use cdc_budget_shared::types::{BudgetLineId, CostUnitId, decimal_from_f64};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// Returns `part / whole * 100`, or zero when `whole` is zero.
///
/// # Errors
///
/// Returns `BudgetError::AmountOverflow` if the result does not fit in a `Decimal`.
pub fn percent_of(part: Decimal, whole: Decimal) -> Result<Decimal, BudgetError> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(BudgetError::AmountOverflow {
            operation: "percentage",
        })
}

/// Lifts a checked `Decimal` operation into a `BudgetError`.
pub(crate) fn checked(
    operation: &'static str,
    result: Option<Decimal>,
) -> Result<Decimal, BudgetError> {
    result.ok_or(BudgetError::AmountOverflow { operation })
}

/// Sums `amounts`, failing instead of wrapping or panicking.
pub(crate) fn checked_sum(
    operation: &'static str,
    amounts: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, BudgetError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| {
            checked(operation, acc.checked_add(amount))
        })
}

/// Rejects negative amounts.
pub(crate) fn ensure_non_negative(field: &'static str, amount: Decimal) -> Result<(), BudgetError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BudgetError::NegativeAmount { field, amount });
    }
    Ok(())
}

/// Converts a float from the data-fetch layer into a non-negative amount.
///
/// # Errors
///
/// Returns `BudgetError::NonFiniteAmount` for NaN or infinity and
/// `BudgetError::NegativeAmount` for negative values.
pub fn amount_from_f64(field: &'static str, value: f64) -> Result<Decimal, BudgetError> {
    let amount = decimal_from_f64(value).ok_or(BudgetError::NonFiniteAmount { field })?;
    ensure_non_negative(field, amount)?;
    Ok(amount)
}

/// The calendar month at which an assessment is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEvaluationPoint")]
pub struct EvaluationPoint {
    month: u32,
    year: i32,
}

impl EvaluationPoint {
    /// Creates an evaluation point.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidMonth` if `month` is outside 1..=12.
    pub fn new(month: u32, year: i32) -> Result<Self, BudgetError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidMonth(month));
        }
        Ok(Self { month, year })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// The current UTC month.
    #[must_use]
    pub fn today() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// Month, 1..=12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }
}

#[derive(Deserialize)]
struct RawEvaluationPoint {
    month: u32,
    year: i32,
}

impl TryFrom<RawEvaluationPoint> for EvaluationPoint {
    type Error = BudgetError;

    fn try_from(raw: RawEvaluationPoint) -> Result<Self, Self::Error> {
        Self::new(raw.month, raw.year)
    }
}

/// One month of a budget line's phasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPhasing {
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Amount allocated to the month; `None` when the import left it blank.
    pub allocated: Option<Decimal>,
    /// Cumulative actual expenditure for the month.
    pub expenditure: Decimal,
}

impl MonthlyPhasing {
    /// Creates a phasing entry.
    #[must_use]
    pub fn new(month: u32, allocated: Option<Decimal>, expenditure: Decimal) -> Self {
        Self {
            month,
            allocated,
            expenditure,
        }
    }

    /// Allocated amount, treating a blank allocation as zero.
    #[must_use]
    pub fn allocated_or_zero(&self) -> Decimal {
        self.allocated.unwrap_or(Decimal::ZERO)
    }

    /// Allocated minus expenditure. Negative means the month is overrun.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::AmountOverflow` if the difference does not fit.
    pub fn remaining(&self) -> Result<Decimal, BudgetError> {
        checked(
            "monthly remaining",
            self.allocated_or_zero().checked_sub(self.expenditure),
        )
    }

    /// Expenditure as a percentage of the allocation; zero when nothing is allocated.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::AmountOverflow` if the percentage does not fit.
    pub fn utilization_percent(&self) -> Result<Decimal, BudgetError> {
        percent_of(self.expenditure, self.allocated_or_zero())
    }
}

/// A budget line phased across the months of its year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Budget line ID.
    pub id: BudgetLineId,
    /// Cost unit the line is booked against.
    pub cost_unit_id: CostUnitId,
    /// Budget year.
    pub year: i32,
    /// Total budgeted amount for the year.
    pub total_budgeted_amount: Option<Decimal>,
    /// Monthly phasing entries. Gaps are allowed.
    #[serde(default)]
    pub monthly_phasing: Vec<MonthlyPhasing>,
}

impl BudgetLine {
    /// Checks the line's own fields and returns its total budgeted amount.
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` for a missing or negative total, negative
    /// phasing amounts, or invalid or duplicate months.
    pub fn validate(&self) -> Result<Decimal, BudgetError> {
        let total = self
            .total_budgeted_amount
            .ok_or(BudgetError::MissingTotalBudget(self.id))?;
        ensure_non_negative("total_budgeted_amount", total)?;

        let mut seen = BTreeSet::new();
        for phasing in &self.monthly_phasing {
            if !(1..=12).contains(&phasing.month) {
                return Err(BudgetError::InvalidMonth(phasing.month));
            }
            if !seen.insert(phasing.month) {
                return Err(BudgetError::DuplicateMonth(phasing.month));
            }
            if let Some(allocated) = phasing.allocated {
                ensure_non_negative("allocated", allocated)?;
            }
            ensure_non_negative("expenditure", phasing.expenditure)?;
        }

        Ok(total)
    }

    /// The phasing entry for `point`, matched on both month and year.
    #[must_use]
    pub fn phasing_for(&self, point: EvaluationPoint) -> Option<&MonthlyPhasing> {
        if self.year != point.year() {
            return None;
        }
        self.monthly_phasing
            .iter()
            .find(|p| p.month == point.month())
    }
}

/// Outcome of comparing a candidate amount with the remaining budget.
///
/// Exactly one applies to every assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImpactClassification {
    /// The candidate fits both the yearly and the monthly budget.
    WithinBudget {
        /// Yearly budget left once the candidate is approved.
        post_approval_remaining: Decimal,
    },
    /// The candidate fits the year but not the current month.
    MonthlyBudgetExceeded {
        /// Amount by which the month would be overrun.
        overrun: Decimal,
    },
    /// The candidate exceeds the yearly available budget.
    TotalBudgetExceeded {
        /// Amount by which the year would be overrun.
        overrun: Decimal,
    },
}

impl ImpactClassification {
    /// Returns true for `WithinBudget`.
    #[must_use]
    pub fn is_within_budget(&self) -> bool {
        matches!(self, Self::WithinBudget { .. })
    }

    /// The overrun amount, if any budget is exceeded.
    #[must_use]
    pub fn overrun(&self) -> Option<Decimal> {
        match self {
            Self::WithinBudget { .. } => None,
            Self::MonthlyBudgetExceeded { overrun } | Self::TotalBudgetExceeded { overrun } => {
                Some(*overrun)
            }
        }
    }

    /// Returns the string representation of the outcome.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithinBudget { .. } => "within_budget",
            Self::MonthlyBudgetExceeded { .. } => "monthly_budget_exceeded",
            Self::TotalBudgetExceeded { .. } => "total_budget_exceeded",
        }
    }
}

/// Impact of a candidate amount on the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyImpact {
    /// Calendar month.
    pub month: u32,
    /// Allocation for the month.
    pub allocated: Decimal,
    /// Expenditure so far in the month.
    pub expenditure: Decimal,
    /// Allocation minus expenditure.
    pub remaining_budget: Decimal,
    /// Candidate as a percentage of the remaining monthly budget.
    pub impact_on_monthly_budget: Decimal,
    /// Remaining monthly budget after the candidate.
    pub projected_remaining: Decimal,
}

/// Result of assessing a candidate requisition or LPO amount against a budget line.
///
/// Percentages are unrounded and unclamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetImpactAssessment {
    /// Budget line assessed.
    pub budget_line_id: BudgetLineId,
    /// Amount about to be committed.
    pub candidate_amount: Decimal,
    /// Total budgeted amount for the year.
    pub total_budgeted_amount: Decimal,
    /// Sum of already approved or forwarded amounts.
    pub committed_amount: Decimal,
    /// Total minus committed.
    pub available_budget: Decimal,
    /// Candidate as a percentage of the total budget.
    pub impact_on_total_budget: Decimal,
    /// Current-month figures; `None` when the line has no entry for the month.
    pub current_month: Option<MonthlyImpact>,
    /// Outcome driving warning presentation.
    pub classification: ImpactClassification,
}
