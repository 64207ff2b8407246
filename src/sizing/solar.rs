//! Solar array and charge controller sizing.

use crate::catalog::PanelModel;
use crate::config::{ConfigError, SizingConfig};
use crate::ledger::LoadSummary;

/// Charge controller safety margin over the array's rated output.
pub const CONTROLLER_SAFETY_MARGIN: f64 = 1.25;

/// Solar array requirement for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSizing {
    /// Required array capacity (W).
    pub required_watts: f64,
    /// Panels needed by the conventional `required / rated_watts`
    /// derivation (fractional, unrounded).
    pub panel_count: f64,
    /// Panels by the original planner's `required/vmp × voltage/vmp`
    /// derivation. Dimensionally odd but preserved so output can be
    /// compared against the original tool.
    pub panel_count_legacy: f64,
    /// Minimum controller current rating (A).
    pub controller_amps: f64,
}

/// Sizes the solar array and charge controller:
///
/// `required_watts = total_energy_wh / (sun_hours × efficiency/100)`,
/// `controller_amps = required_watts × 1.25 / battery_voltage`.
///
/// A zero-energy summary yields a zero sizing.
///
/// # Errors
///
/// Returns a `ConfigError` before any division if the sun hours,
/// efficiency, bank voltage, or either panel rating is zero or negative.
pub fn size_solar_array(
    summary: &LoadSummary,
    cfg: &SizingConfig,
    panel: &PanelModel,
) -> Result<SolarSizing, ConfigError> {
    if cfg.sun_hours_per_day <= 0.0 {
        return Err(zero_divisor("sizing.sun_hours_per_day", cfg.sun_hours_per_day));
    }
    if cfg.system_efficiency_pct <= 0.0 {
        return Err(zero_divisor(
            "sizing.system_efficiency_pct",
            cfg.system_efficiency_pct,
        ));
    }
    if cfg.battery_voltage <= 0.0 {
        return Err(zero_divisor("sizing.battery_voltage", cfg.battery_voltage));
    }
    if panel.rated_watts <= 0.0 {
        return Err(zero_divisor("panel.rated_watts", panel.rated_watts));
    }
    if panel.vmp_volts <= 0.0 {
        return Err(zero_divisor("panel.vmp_volts", panel.vmp_volts));
    }

    let required_watts =
        summary.total_energy_wh / (cfg.sun_hours_per_day * (cfg.system_efficiency_pct / 100.0));
    let panel_count = required_watts / panel.rated_watts;
    let panel_count_legacy =
        required_watts / panel.vmp_volts * (cfg.battery_voltage / panel.vmp_volts);
    let controller_amps = required_watts * CONTROLLER_SAFETY_MARGIN / cfg.battery_voltage;

    Ok(SolarSizing {
        required_watts,
        panel_count,
        panel_count_legacy,
        controller_amps,
    })
}

fn zero_divisor(field: &str, value: f64) -> ConfigError {
    ConfigError {
        field: field.to_string(),
        message: format!("must be > 0 to divide by, got {value}"),
    }
}
