//! Budget lines, impact assessment, and utilization reporting.

pub mod error;
pub mod impact;
pub mod types;
pub mod utilization;


pub use error::BudgetError;
pub use impact::{BudgetImpactCalculator, assess_budget_impact};
pub use types::{
    BudgetImpactAssessment, BudgetLine, EvaluationPoint, ImpactClassification, MonthlyImpact,
    MonthlyPhasing, amount_from_f64, percent_of,
};
pub use utilization::{AlertTier, MonthlyUtilizationReport, MonthlyUtilizationRow};
