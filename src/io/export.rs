//! CSV export for the load audit and cost breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::config::SizingConfig;
use crate::finance::CostBreakdown;
use crate::ledger::LoadLedger;

/// Column header for the load audit CSV.
const LOADS_HEADER: &str = "appliance,unit_watts,quantity,total_watts,hours_per_day,wh_per_day";

/// Column header for the cost breakdown CSV.
const COSTS_HEADER: &str = "item,model,units,unit_price,line_total";

/// Exports the load audit to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_loads_csv(ledger: &LoadLedger, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_loads_csv(ledger, buf)
}

/// Writes the load audit as CSV to any writer: a header row, one row per
/// entry, and a TOTAL row. Deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_loads_csv(ledger: &LoadLedger, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(LOADS_HEADER.split(','))?;

    for e in ledger.entries() {
        wtr.write_record(&[
            e.name.clone(),
            format!("{:.1}", e.unit_watts),
            e.quantity.to_string(),
            format!("{:.1}", e.total_watts()),
            format!("{:.1}", e.hours_per_day),
            format!("{:.1}", e.daily_energy_wh()),
        ])?;
    }

    let summary = ledger.summarize();
    wtr.write_record(&[
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        format!("{:.1}", summary.total_watts),
        String::new(),
        format!("{:.1}", summary.total_energy_wh),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Exports the cost breakdown to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_costs_csv(
    costs: &CostBreakdown,
    sizing_cfg: &SizingConfig,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_costs_csv(costs, sizing_cfg, buf)
}

/// Writes the cost breakdown as CSV to any writer: one row per line item
/// and a TOTAL row.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_costs_csv(
    costs: &CostBreakdown,
    sizing_cfg: &SizingConfig,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(COSTS_HEADER.split(','))?;

    wtr.write_record(&[
        "batteries".to_string(),
        sizing_cfg.battery_model.clone(),
        costs.battery_units.to_string(),
        format!("{:.0}", costs.battery_unit_price),
        format!("{:.0}", costs.battery_cost),
    ])?;
    wtr.write_record(&[
        "panels".to_string(),
        sizing_cfg.panel_model.clone(),
        costs.panel_units.to_string(),
        format!("{:.0}", costs.panel_unit_price),
        format!("{:.0}", costs.panel_cost),
    ])?;
    wtr.write_record(&[
        "inverter".to_string(),
        sizing_cfg.inverter_model.clone(),
        "1".to_string(),
        format!("{:.0}", costs.inverter_cost),
        format!("{:.0}", costs.inverter_cost),
    ])?;
    wtr.write_record(&[
        "installation".to_string(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.0}", costs.installation_fee),
    ])?;
    wtr.write_record(&[
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.0}", costs.total),
    ])?;

    wtr.flush()?;
    Ok(())
}
