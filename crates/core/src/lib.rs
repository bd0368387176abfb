//! Core business logic for CDC Budget.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Callers fetch the data; this crate only validates and computes.
//!
//! # Modules
//!
//! - `access` - Roles, permissions, scopes and navigation filtering
//! - `budget` - Budget lines, impact assessment and monthly utilization
//! - `workflow` - Requisition and LPO status transitions
//! - `lpo` - LPO amounts and price comparison

pub mod access;
pub mod budget;
pub mod lpo;
pub mod workflow;
