//! Battery bank sizing from total daily energy demand.

use crate::catalog::BatteryModel;
use crate::config::{ConfigError, SizingConfig};
use crate::ledger::LoadSummary;

/// Battery bank requirement for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatterySizing {
    /// Required capacity (Ah) at the configured bank voltage.
    pub capacity_ah: f64,
    /// Batteries of the selected model needed (fractional, unrounded).
    pub unit_count: f64,
}

/// Sizes the battery bank:
///
/// `capacity_ah = (total_energy_wh × backup_hours)
///              / (voltage × dod/100 × derating/100)`
///
/// and `unit_count = capacity_ah / model.capacity_ah`.
///
/// A zero-energy summary yields a zero sizing. No rounding is applied;
/// display formatting and purchasable-unit rounding are the caller's
/// concern.
///
/// # Errors
///
/// Returns a `ConfigError` before any division if the bank voltage,
/// either percentage, or the model capacity is zero or negative. A
/// validated [`SizingConfig`] never trips these guards.
pub fn size_battery_bank(
    summary: &LoadSummary,
    cfg: &SizingConfig,
    model: &BatteryModel,
) -> Result<BatterySizing, ConfigError> {
    if cfg.battery_voltage <= 0.0 {
        return Err(zero_divisor("sizing.battery_voltage", cfg.battery_voltage));
    }
    if cfg.depth_of_discharge_pct <= 0.0 {
        return Err(zero_divisor(
            "sizing.depth_of_discharge_pct",
            cfg.depth_of_discharge_pct,
        ));
    }
    if cfg.temperature_derating_pct <= 0.0 {
        return Err(zero_divisor(
            "sizing.temperature_derating_pct",
            cfg.temperature_derating_pct,
        ));
    }
    if model.capacity_ah <= 0.0 {
        return Err(zero_divisor("battery.capacity_ah", model.capacity_ah));
    }

    let usable_fraction =
        (cfg.depth_of_discharge_pct / 100.0) * (cfg.temperature_derating_pct / 100.0);
    let capacity_ah =
        (summary.total_energy_wh * cfg.backup_hours) / (cfg.battery_voltage * usable_fraction);
    let unit_count = capacity_ah / model.capacity_ah;

    Ok(BatterySizing {
        capacity_ah,
        unit_count,
    })
}

fn zero_divisor(field: &str, value: f64) -> ConfigError {
    ConfigError {
        field: field.to_string(),
        message: format!("must be > 0 to divide by, got {value}"),
    }
}
