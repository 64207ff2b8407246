//! Off-grid solar system sizing, costing, and quotation engine.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod document;
pub mod finance;
pub mod io;
pub mod ledger;
pub mod pipeline;
/// Battery, solar, controller, and inverter calculators.
pub mod sizing;
