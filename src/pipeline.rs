//! Single-pass sizing pipeline: ledger + config + catalog in, complete
//! quote out. Re-run from scratch whenever any input changes; nothing is
//! cached between invocations.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::{ConfigError, FinanceConfig, SizingConfig};
use crate::finance::{CostBreakdown, FinancialResult, aggregate_cost, analyze_finances};
use crate::ledger::{LoadLedger, LoadSummary};
use crate::sizing::{SizingResult, select_inverter_watts, size_battery_bank, size_solar_array};

/// Complete engine output for one run: demand summary, component sizing,
/// itemized cost, and (when defined) the ROI analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemQuote {
    /// Aggregate load demand.
    pub summary: LoadSummary,
    /// Battery/solar/controller/inverter sizing.
    pub sizing: SizingResult,
    /// Itemized system cost.
    pub costs: CostBreakdown,
    /// ROI analysis. `None` exactly when the ledger sums to zero energy;
    /// payback is undefined without savings, and an empty audit is a
    /// degenerate case rather than an error.
    pub finance: Option<FinancialResult>,
}

/// Runs the full pipeline: summarize, size, cost, analyze.
///
/// Pure with respect to its inputs; identical inputs produce identical
/// output. An empty ledger yields all-zero sizing and no finance section.
///
/// # Errors
///
/// Returns a `ConfigError` for an unknown catalog key or a configuration
/// value that would place a zero in a denominator.
pub fn run_pipeline(
    ledger: &LoadLedger,
    sizing_cfg: &SizingConfig,
    finance_cfg: &FinanceConfig,
    catalog: &Catalog,
) -> Result<SystemQuote, ConfigError> {
    let summary = ledger.summarize();

    let panel = catalog.panel(&sizing_cfg.panel_model)?;
    let battery = catalog.battery(&sizing_cfg.battery_model)?;
    let inverter = catalog.inverter(&sizing_cfg.inverter_model)?;

    let bank = size_battery_bank(&summary, sizing_cfg, battery)?;
    let array = size_solar_array(&summary, sizing_cfg, panel)?;
    let inverter_watts = select_inverter_watts(&summary);

    let sizing = SizingResult {
        battery_capacity_ah: bank.capacity_ah,
        battery_count: bank.unit_count,
        required_solar_watts: array.required_watts,
        panel_count: array.panel_count,
        panel_count_legacy: array.panel_count_legacy,
        controller_amps: array.controller_amps,
        inverter_watts,
    };

    let costs = aggregate_cost(&sizing, panel, battery, inverter, finance_cfg.installation_fee);

    let finance = if summary.total_energy_wh > 0.0 {
        Some(analyze_finances(&summary, costs.total, finance_cfg)?)
    } else {
        None
    };

    Ok(SystemQuote {
        summary,
        sizing,
        costs,
        finance,
    })
}
