//! Cost aggregation and return-on-investment analysis.

use std::fmt;

use serde::Serialize;

use crate::catalog::{BatteryModel, InverterModel, PanelModel};
use crate::config::{ConfigError, FinanceConfig};
use crate::ledger::LoadSummary;
use crate::sizing::SizingResult;

/// Billing days per month assumed by the savings estimate.
const BILLING_DAYS_PER_MONTH: f64 = 30.0;

/// Itemized system cost.
///
/// Unit counts here are rounded up to whole purchasable units; the exact
/// fractional counts stay in [`SizingResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Whole batteries to purchase.
    pub battery_units: u64,
    /// Price per battery.
    pub battery_unit_price: f64,
    /// Battery line total.
    pub battery_cost: f64,
    /// Whole panels to purchase.
    pub panel_units: u64,
    /// Price per panel.
    pub panel_unit_price: f64,
    /// Panel line total.
    pub panel_cost: f64,
    /// Inverter price (one unit).
    pub inverter_cost: f64,
    /// Flat installation fee.
    pub installation_fee: f64,
    /// Sum of all lines.
    pub total: f64,
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Cost Breakdown ---")?;
        writeln!(
            f,
            "Batteries:      {:>2} × {:>12.0} = {:>12.0}",
            self.battery_units, self.battery_unit_price, self.battery_cost
        )?;
        writeln!(
            f,
            "Panels:         {:>2} × {:>12.0} = {:>12.0}",
            self.panel_units, self.panel_unit_price, self.panel_cost
        )?;
        writeln!(f, "Inverter:                         {:>12.0}", self.inverter_cost)?;
        writeln!(f, "Installation:                     {:>12.0}", self.installation_fee)?;
        write!(f, "TOTAL:                            {:>12.0}", self.total)
    }
}

/// Combines catalog unit prices with computed quantities.
///
/// Fractional unit counts are rounded up: a requirement of 2.2 batteries
/// is quoted as 3. Zero requirements cost zero for that line; the
/// inverter and installation fee are charged whenever a system is quoted
/// at all.
pub fn aggregate_cost(
    sizing: &SizingResult,
    panel: &PanelModel,
    battery: &BatteryModel,
    inverter: &InverterModel,
    installation_fee: f64,
) -> CostBreakdown {
    let battery_units = whole_units(sizing.battery_count);
    let panel_units = whole_units(sizing.panel_count);
    let battery_cost = battery_units as f64 * battery.price;
    let panel_cost = panel_units as f64 * panel.price;
    let total = battery_cost + panel_cost + inverter.price + installation_fee;

    CostBreakdown {
        battery_units,
        battery_unit_price: battery.price,
        battery_cost,
        panel_units,
        panel_unit_price: panel.price,
        panel_cost,
        inverter_cost: inverter.price,
        installation_fee,
        total,
    }
}

fn whole_units(fractional: f64) -> u64 {
    if fractional <= 0.0 {
        0
    } else {
        fractional.ceil() as u64
    }
}

/// Savings, payback, and return-on-investment figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialResult {
    /// Grid spend avoided per month.
    pub monthly_savings: f64,
    /// Grid spend avoided per year.
    pub annual_savings: f64,
    /// Savings over the assumed system lifespan.
    pub lifetime_savings: f64,
    /// Years until savings cover the system cost.
    pub payback_years: f64,
    /// Lifetime return on investment (%).
    pub roi_pct: f64,
}

impl fmt::Display for FinancialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Return on Investment ---")?;
        writeln!(f, "Monthly savings:  {:.0}", self.monthly_savings)?;
        writeln!(f, "Annual savings:   {:.0}", self.annual_savings)?;
        writeln!(f, "Lifetime savings: {:.0}", self.lifetime_savings)?;
        writeln!(f, "Payback period:   {:.1} years", self.payback_years)?;
        write!(f, "ROI:              {:.0}%", self.roi_pct)
    }
}

/// Derives savings, payback, and ROI from the system cost and the grid
/// tariff the system displaces.
///
/// `monthly = energy_kwh_per_day × 30 × tariff`, annual = monthly × 12,
/// lifetime = annual × lifespan, `payback = cost / annual`,
/// `roi = (lifetime − cost) / cost × 100`.
///
/// # Errors
///
/// Returns a `ConfigError` if `total_cost` is zero (ROI undefined) or the
/// annual savings are zero (payback undefined) — never a NaN or infinite
/// figure. Zero savings arise from a zero tariff or a zero-energy audit;
/// the pipeline skips this analysis for empty ledgers instead.
pub fn analyze_finances(
    summary: &LoadSummary,
    total_cost: f64,
    fin: &FinanceConfig,
) -> Result<FinancialResult, ConfigError> {
    if total_cost <= 0.0 {
        return Err(ConfigError {
            field: "total_cost".to_string(),
            message: format!("must be > 0 to compute payback and ROI, got {total_cost}"),
        });
    }

    let monthly_savings =
        (summary.total_energy_wh / 1000.0) * BILLING_DAYS_PER_MONTH * fin.tariff_per_kwh;
    let annual_savings = monthly_savings * 12.0;
    if annual_savings <= 0.0 {
        return Err(ConfigError {
            field: "finance.tariff_per_kwh".to_string(),
            message: "annual savings are zero, payback period is undefined".to_string(),
        });
    }

    let lifetime_savings = annual_savings * fin.system_lifespan_years;
    let payback_years = total_cost / annual_savings;
    let roi_pct = (lifetime_savings - total_cost) / total_cost * 100.0;

    Ok(FinancialResult {
        monthly_savings,
        annual_savings,
        lifetime_savings,
        payback_years,
        roi_pct,
    })
}
