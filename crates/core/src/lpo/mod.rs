//! Local purchase order pricing.

pub mod error;
pub mod price;

pub use error::LpoError;
pub use price::{PriceComparison, lpo_amount};
