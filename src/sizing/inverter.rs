//! Inverter rating selection from peak power demand.

use crate::ledger::LoadSummary;

/// Inverter safety margin over the aggregate power demand. Deliberately
/// larger than the controller's 25% margin: an undersized inverter trips
/// on every surge, while an undersized controller merely clips.
pub const INVERTER_SAFETY_MARGIN: f64 = 1.3;

/// Minimum inverter rating (W) for the audited load: `total_watts × 1.3`.
///
/// Zero demand yields zero; no error cases exist on this path.
pub fn select_inverter_watts(summary: &LoadSummary) -> f64 {
    summary.total_watts * INVERTER_SAFETY_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_30_pct_margin() {
        let summary = LoadSummary {
            total_watts: 150.0,
            total_energy_wh: 1500.0,
        };
        assert_eq!(select_inverter_watts(&summary), 195.0);
    }

    #[test]
    fn zero_demand_needs_zero_inverter() {
        let summary = LoadSummary {
            total_watts: 0.0,
            total_energy_wh: 0.0,
        };
        assert_eq!(select_inverter_watts(&summary), 0.0);
    }
}
