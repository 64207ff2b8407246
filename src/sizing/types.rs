//! Combined sizing output record.

use std::fmt;

use serde::Serialize;

/// Full sizing figures for one pipeline run.
///
/// Unit counts are the exact fractional values from the formulas; rounding
/// to purchasable units happens in the cost aggregator, never here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizingResult {
    /// Required battery bank capacity (Ah) at the configured voltage.
    pub battery_capacity_ah: f64,
    /// Batteries of the selected model needed (fractional).
    pub battery_count: f64,
    /// Required solar array capacity (W).
    pub required_solar_watts: f64,
    /// Panels of the selected model needed (fractional),
    /// from the conventional `required / rated` derivation.
    pub panel_count: f64,
    /// Panel count from the original planner's `required/vmp × voltage/vmp`
    /// derivation, kept for comparison against its output.
    pub panel_count_legacy: f64,
    /// Minimum charge controller rating (A).
    pub controller_amps: f64,
    /// Minimum inverter rating (W).
    pub inverter_watts: f64,
}

impl SizingResult {
    /// All-zero result, the degenerate output for an empty load ledger.
    pub fn zero() -> Self {
        Self {
            battery_capacity_ah: 0.0,
            battery_count: 0.0,
            required_solar_watts: 0.0,
            panel_count: 0.0,
            panel_count_legacy: 0.0,
            controller_amps: 0.0,
            inverter_watts: 0.0,
        }
    }
}

impl fmt::Display for SizingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- System Sizing ---")?;
        writeln!(
            f,
            "Battery capacity:   {:.2} Ah ({:.1} units)",
            self.battery_capacity_ah, self.battery_count
        )?;
        writeln!(
            f,
            "Solar array:        {:.2} W ({:.1} panels)",
            self.required_solar_watts, self.panel_count
        )?;
        writeln!(f, "Charge controller:  {:.2} A", self.controller_amps)?;
        write!(f, "Inverter:           {:.2} W", self.inverter_watts)
    }
}
