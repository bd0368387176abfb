//! Budget impact assessment for candidate requisition and LPO amounts.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{
    BudgetImpactAssessment, BudgetLine, EvaluationPoint, ImpactClassification, MonthlyImpact,
    checked, checked_sum, ensure_non_negative, percent_of,
};

/// Stateless calculator for budget impact.
pub struct BudgetImpactCalculator;

impl BudgetImpactCalculator {
    /// Assess `candidate_amount` against `line` at `point`.
    ///
    /// `committed` holds the amounts of requisitions already approved or
    /// forwarded against the line.
    ///
    /// Classification, first match wins:
    /// 1. candidate > available yearly budget: `TotalBudgetExceeded`
    /// 2. candidate > current month's remaining budget: `MonthlyBudgetExceeded`
    /// 3. otherwise: `WithinBudget`
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` if the candidate or any committed amount is
    /// negative, if the line fails `BudgetLine::validate`, or if a total,
    /// difference or percentage does not fit in a `Decimal`.
    pub fn assess(
        line: &BudgetLine,
        candidate_amount: Decimal,
        committed: &[Decimal],
        point: EvaluationPoint,
    ) -> Result<BudgetImpactAssessment, BudgetError> {
        ensure_non_negative("candidate_amount", candidate_amount)?;
        for amount in committed {
            ensure_non_negative("committed_amount", *amount)?;
        }
        let total = line.validate()?;

        let committed_amount = checked_sum("committed total", committed.iter().copied())?;
        let available_budget = checked(
            "available budget",
            total.checked_sub(committed_amount),
        )?;
        let impact_on_total_budget = percent_of(candidate_amount, total)?;

        let current_month = match line.phasing_for(point) {
            Some(phasing) => {
                let remaining_budget = phasing.remaining()?;
                Some(MonthlyImpact {
                    month: phasing.month,
                    allocated: phasing.allocated_or_zero(),
                    expenditure: phasing.expenditure,
                    remaining_budget,
                    impact_on_monthly_budget: percent_of(candidate_amount, remaining_budget)?,
                    projected_remaining: checked(
                        "projected monthly remaining",
                        remaining_budget.checked_sub(candidate_amount),
                    )?,
                })
            }
            None => None,
        };

        let classification = if candidate_amount > available_budget {
            ImpactClassification::TotalBudgetExceeded {
                overrun: checked(
                    "total overrun",
                    candidate_amount.checked_sub(available_budget),
                )?,
            }
        } else if let Some(month) = &current_month
            && candidate_amount > month.remaining_budget
        {
            ImpactClassification::MonthlyBudgetExceeded {
                overrun: checked(
                    "monthly overrun",
                    candidate_amount.checked_sub(month.remaining_budget),
                )?,
            }
        } else {
            ImpactClassification::WithinBudget {
                post_approval_remaining: checked(
                    "post-approval remaining",
                    available_budget.checked_sub(candidate_amount),
                )?,
            }
        };

        tracing::debug!(
            budget_line_id = %line.id,
            candidate = %candidate_amount,
            available = %available_budget,
            has_current_month = current_month.is_some(),
            outcome = classification.as_str(),
            "assessed budget impact"
        );

        Ok(BudgetImpactAssessment {
            budget_line_id: line.id,
            candidate_amount,
            total_budgeted_amount: total,
            committed_amount,
            available_budget,
            impact_on_total_budget,
            current_month,
            classification,
        })
    }
}

/// Assess a candidate amount for the given calendar month.
///
/// # Errors
///
/// Returns `BudgetError::InvalidMonth` for a month outside 1..=12 and the
/// errors of `BudgetImpactCalculator::assess` otherwise.
pub fn assess_budget_impact(
    line: &BudgetLine,
    candidate_amount: Decimal,
    committed: &[Decimal],
    current_month: u32,
    current_year: i32,
) -> Result<BudgetImpactAssessment, BudgetError> {
    let point = EvaluationPoint::new(current_month, current_year)?;
    BudgetImpactCalculator::assess(line, candidate_amount, committed, point)
}
