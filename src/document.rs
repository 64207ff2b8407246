//! Plaintext quotation document: branded header, client block, itemized
//! tables, ROI summary, and terms. The engine's numbers are formatted
//! here and nowhere else.

use std::fmt;

use crate::config::{ClientInfo, CompanyInfo, FinanceConfig, SizingConfig};
use crate::ledger::LoadLedger;
use crate::pipeline::SystemQuote;

/// Fixed terms printed at the foot of every quotation.
const TERMS: &str = "\
1. This quotation is valid for 14 days from the date above.
2. Prices include delivery and installation within the project location.
3. Payment: 70% on acceptance, 30% on commissioning.
4. Workmanship is guaranteed for 12 months; component warranties are the
   manufacturers' own.
5. Savings figures are estimates based on the stated tariff and usage.";

/// Quotation preconditions not met.
#[derive(Debug, Clone)]
pub struct DocumentError {
    /// Human-readable description of the missing precondition.
    pub message: String,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot generate quotation: {}", self.message)
    }
}

impl std::error::Error for DocumentError {}

/// Renders the full quotation document.
///
/// # Errors
///
/// Returns a `DocumentError` if the client name is blank or the ledger is
/// empty; a quotation without a client or a load list is meaningless.
pub fn render_quotation(
    company: &CompanyInfo,
    client: &ClientInfo,
    ledger: &LoadLedger,
    sizing_cfg: &SizingConfig,
    finance_cfg: &FinanceConfig,
    quote: &SystemQuote,
) -> Result<String, DocumentError> {
    if client.name.trim().is_empty() {
        return Err(DocumentError {
            message: "client name is required".to_string(),
        });
    }
    if ledger.is_empty() {
        return Err(DocumentError {
            message: "add at least one appliance to the load audit".to_string(),
        });
    }

    let mut out = String::new();
    let rule = "=".repeat(66);
    let cur = &finance_cfg.currency;

    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("{:^66}\n", company.name));
    out.push_str(&format!("{:^66}\n", company.motto));
    out.push_str(&format!("{:^66}\n", company.address));
    out.push_str(&format!(
        "{:^66}\n",
        format!("{} | {}", company.phone, company.email)
    ));
    out.push_str(&format!("{rule}\n\n"));
    out.push_str(&format!("{:^66}\n\n", "SOLAR SYSTEM QUOTATION"));

    out.push_str("CLIENT INFORMATION\n");
    out.push_str(&format!("  Name:      {}\n", client.name));
    out.push_str(&format!("  Address:   {}\n", client.address));
    out.push_str(&format!("  Phone:     {}\n", client.phone));
    out.push_str(&format!(
        "  Email:     {}\n",
        if client.email.trim().is_empty() {
            "Not provided"
        } else {
            &client.email
        }
    ));
    if !client.project_location.trim().is_empty() {
        out.push_str(&format!("  Location:  {}\n", client.project_location));
    }
    out.push_str(&format!("  Date:      {}\n\n", client.quote_date));

    out.push_str("LOAD AUDIT\n");
    out.push_str(&format!(
        "  {:<22} {:>8} {:>5} {:>9} {:>8} {:>9}\n",
        "Appliance", "Unit W", "Qty", "Total W", "Hrs/day", "Wh/day"
    ));
    for e in ledger.entries() {
        out.push_str(&format!(
            "  {:<22} {:>8.1} {:>5} {:>9.1} {:>8.1} {:>9.1}\n",
            e.name,
            e.unit_watts,
            e.quantity,
            e.total_watts(),
            e.hours_per_day,
            e.daily_energy_wh()
        ));
    }
    out.push_str(&format!(
        "  {:<22} {:>8} {:>5} {:>9.1} {:>8} {:>9.1}\n\n",
        "TOTAL", "", "", quote.summary.total_watts, "", quote.summary.total_energy_wh
    ));

    out.push_str("SYSTEM SIZING\n");
    let sizing_rows: &[(&str, String, &str)] = &[
        (
            "Total energy demand",
            format!("{:.1}", quote.summary.total_energy_wh),
            "Wh/day",
        ),
        ("Backup time", format!("{:.1}", sizing_cfg.backup_hours), "hours"),
        (
            "Battery bank voltage",
            format!("{:.0}", sizing_cfg.battery_voltage),
            "V",
        ),
        (
            "Depth of discharge",
            format!("{:.0}", sizing_cfg.depth_of_discharge_pct),
            "%",
        ),
        (
            "Temperature derating",
            format!("{:.0}", sizing_cfg.temperature_derating_pct),
            "%",
        ),
        (
            "Battery capacity",
            format!("{:.1}", quote.sizing.battery_capacity_ah),
            "Ah",
        ),
        (
            "Sun hours",
            format!("{:.1}", sizing_cfg.sun_hours_per_day),
            "hours/day",
        ),
        (
            "System efficiency",
            format!("{:.0}", sizing_cfg.system_efficiency_pct),
            "%",
        ),
        (
            "Required solar capacity",
            format!("{:.1}", quote.sizing.required_solar_watts),
            "W",
        ),
        (
            "Panels required",
            format!("{:.1}", quote.sizing.panel_count),
            "",
        ),
        (
            "Charge controller",
            format!("{:.1}", quote.sizing.controller_amps),
            "A",
        ),
        (
            "Inverter rating",
            format!("{:.1}", quote.sizing.inverter_watts),
            "W",
        ),
    ];
    for (label, value, unit) in sizing_rows {
        out.push_str(&format!("  {label:<26} {value:>10} {unit}\n"));
    }
    out.push('\n');

    out.push_str(&format!("COST BREAKDOWN ({cur})\n"));
    out.push_str(&format!(
        "  {:<14} {:<8} {:>5} {:>14} {:>14}\n",
        "Item", "Model", "Units", "Unit price", "Line total"
    ));
    let c = &quote.costs;
    out.push_str(&format!(
        "  {:<14} {:<8} {:>5} {:>14} {:>14}\n",
        "Batteries",
        sizing_cfg.battery_model,
        c.battery_units,
        format_currency(c.battery_unit_price),
        format_currency(c.battery_cost)
    ));
    out.push_str(&format!(
        "  {:<14} {:<8} {:>5} {:>14} {:>14}\n",
        "Solar panels",
        sizing_cfg.panel_model,
        c.panel_units,
        format_currency(c.panel_unit_price),
        format_currency(c.panel_cost)
    ));
    out.push_str(&format!(
        "  {:<14} {:<8} {:>5} {:>14} {:>14}\n",
        "Inverter",
        sizing_cfg.inverter_model,
        1,
        format_currency(c.inverter_cost),
        format_currency(c.inverter_cost)
    ));
    out.push_str(&format!(
        "  {:<14} {:<8} {:>5} {:>14} {:>14}\n",
        "Installation",
        "",
        "",
        "",
        format_currency(c.installation_fee)
    ));
    out.push_str(&format!(
        "  {:<14} {:<8} {:>5} {:>14} {:>14}\n\n",
        "TOTAL",
        "",
        "",
        "",
        format_currency(c.total)
    ));

    out.push_str("RETURN ON INVESTMENT\n");
    match &quote.finance {
        Some(fin) => {
            out.push_str(&format!(
                "  Monthly savings:    {cur} {}\n",
                format_currency(fin.monthly_savings)
            ));
            out.push_str(&format!(
                "  Annual savings:     {cur} {}\n",
                format_currency(fin.annual_savings)
            ));
            out.push_str(&format!(
                "  Lifetime savings:   {cur} {} over {:.0} years\n",
                format_currency(fin.lifetime_savings),
                finance_cfg.system_lifespan_years
            ));
            out.push_str(&format!(
                "  Payback period:     {:.1} years\n",
                fin.payback_years
            ));
            out.push_str(&format!("  Return:             {:.0}%\n\n", fin.roi_pct));
        }
        None => {
            out.push_str("  Not applicable for a zero-consumption audit.\n\n");
        }
    }

    out.push_str("TERMS AND CONDITIONS\n");
    out.push_str(TERMS);
    out.push('\n');

    Ok(out)
}

/// Formats a currency amount with thousands separators and no decimals.
fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
