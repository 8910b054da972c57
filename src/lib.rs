//! Timesheet Engine
//!
//! This crate computes worked hours from clock-in / clock-out records. Shifts
//! that cross midnight are split so each calendar day receives the hours
//! worked on it, and batches of entries are aggregated into per-user daily,
//! weekly and pay-period totals.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
