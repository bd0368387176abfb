//! Monthly budget utilization report.
//!
//! One row per phased month, with alert tiers for the reporting views and,
//! for the current month, the utilization projected with a candidate amount.

use cdc_budget_shared::ReportingConfig;
use cdc_budget_shared::types::{BudgetLineId, Currency, Money, format_percent};
use chrono::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::types::{
    BudgetLine, EvaluationPoint, MonthlyPhasing, checked, checked_sum, ensure_non_negative,
    percent_of,
};

/// Alert tier attached to a utilization percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTier {
    /// Below every threshold.
    Normal,
    /// Above the warning threshold.
    Warning,
    /// Above the critical threshold.
    Critical,
    /// Projected spend above the overrun threshold.
    Overrun,
}

impl AlertTier {
    /// Tier for recorded utilization.
    #[must_use]
    pub fn for_utilization(percent: Decimal, config: &ReportingConfig) -> Self {
        if percent > config.utilization_critical_percent {
            Self::Critical
        } else if percent > config.utilization_warning_percent {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Tier for projected utilization.
    #[must_use]
    pub fn for_projection(percent: Decimal, config: &ReportingConfig) -> Self {
        if percent > config.projected_overrun_percent {
            Self::Overrun
        } else if percent > config.projected_warning_percent {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Utilization figures for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUtilizationRow {
    /// Calendar month.
    pub month: u32,
    /// Allocation; `None` when blank.
    pub allocated: Option<Decimal>,
    /// Expenditure so far.
    pub expenditure: Decimal,
    /// Allocation minus expenditure.
    pub remaining: Decimal,
    /// Expenditure over allocation, in percent.
    pub utilization_percent: Decimal,
    /// Tier of `utilization_percent`.
    pub tier: AlertTier,
    /// Whether this row is the evaluation month.
    pub is_current_month: bool,
    /// Utilization including the candidate amount, current month only.
    pub projected_utilization_percent: Option<Decimal>,
    /// Tier of the projection.
    pub projected_tier: Option<AlertTier>,
}

impl MonthlyUtilizationRow {
    /// English month name, e.g. `March`.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("Unknown", |m| m.name())
    }

    /// Single display line for tables and PDFs.
    #[must_use]
    pub fn display_line(&self, currency: Currency) -> String {
        let allocated = self
            .allocated
            .map_or_else(|| "N/A".to_string(), |a| Money::new(a, currency).format());
        let projected = self
            .projected_utilization_percent
            .map_or_else(|| "-".to_string(), format_percent);
        format!(
            "{} | {} | {} | {} | {} | {}",
            self.month_name(),
            allocated,
            Money::new(self.expenditure, currency).format(),
            Money::new(self.remaining, currency).format(),
            format_percent(self.utilization_percent),
            projected,
        )
    }
}

/// Month-by-month utilization of one budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUtilizationReport {
    /// Budget line reported on.
    pub budget_line_id: BudgetLineId,
    /// Budget year.
    pub year: i32,
    /// Currency for display.
    pub currency: Currency,
    /// Rows in month order.
    pub rows: Vec<MonthlyUtilizationRow>,
    /// Sum of allocations.
    pub total_allocated: Decimal,
    /// Sum of expenditure.
    pub total_expenditure: Decimal,
    /// Total expenditure over total allocation, in percent.
    pub overall_utilization_percent: Decimal,
}

impl MonthlyUtilizationReport {
    /// Builds the report for `line` as seen at `point`.
    ///
    /// When `candidate_amount` is given, the current month's row carries the
    /// utilization projected with that amount added.
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` for a negative candidate, an invalid line, or
    /// amounts whose totals or percentages overflow.
    pub fn build(
        line: &BudgetLine,
        candidate_amount: Option<Decimal>,
        point: EvaluationPoint,
        config: &ReportingConfig,
    ) -> Result<Self, BudgetError> {
        if let Some(candidate) = candidate_amount {
            ensure_non_negative("candidate_amount", candidate)?;
        }
        line.validate()?;

        let mut phasing: Vec<_> = line.monthly_phasing.iter().collect();
        phasing.sort_by_key(|p| p.month);

        let mut rows = Vec::with_capacity(phasing.len());
        for p in phasing {
            let utilization_percent = p.utilization_percent()?;
            let is_current_month = line.year == point.year() && p.month == point.month();
            let projected_utilization_percent = match candidate_amount {
                Some(candidate) if is_current_month => {
                    let projected = checked(
                        "projected expenditure",
                        p.expenditure.checked_add(candidate),
                    )?;
                    Some(percent_of(projected, p.allocated_or_zero())?)
                }
                _ => None,
            };

            rows.push(MonthlyUtilizationRow {
                month: p.month,
                allocated: p.allocated,
                expenditure: p.expenditure,
                remaining: p.remaining()?,
                utilization_percent,
                tier: AlertTier::for_utilization(utilization_percent, config),
                is_current_month,
                projected_utilization_percent,
                projected_tier: projected_utilization_percent
                    .map(|pct| AlertTier::for_projection(pct, config)),
            });
        }

        let total_allocated = checked_sum(
            "total allocated",
            line.monthly_phasing
                .iter()
                .map(MonthlyPhasing::allocated_or_zero),
        )?;
        let total_expenditure = checked_sum(
            "total expenditure",
            line.monthly_phasing.iter().map(|p| p.expenditure),
        )?;

        Ok(Self {
            budget_line_id: line.id,
            year: line.year,
            currency: config.currency,
            rows,
            total_allocated,
            total_expenditure,
            overall_utilization_percent: percent_of(total_expenditure, total_allocated)?,
        })
    }

    /// Rows at or above `tier`.
    pub fn alerts(&self, tier: AlertTier) -> impl Iterator<Item = &MonthlyUtilizationRow> {
        self.rows.iter().filter(move |r| r.tier >= tier)
    }
}
