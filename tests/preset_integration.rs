//! Integration tests over the built-in project presets: every preset must
//! validate, size, cost, and render a quotation end to end.

use solar_sizer::catalog::Catalog;
use solar_sizer::config::ProjectConfig;
use solar_sizer::document::render_quotation;
use solar_sizer::io::export::{write_costs_csv, write_loads_csv};
use solar_sizer::pipeline::run_pipeline;

#[test]
fn every_preset_quotes_end_to_end() {
    let catalog = Catalog::builtin();
    for name in ProjectConfig::PRESETS {
        let mut cfg = ProjectConfig::from_preset(name).expect("preset loads");
        assert!(cfg.validate().is_empty(), "preset \"{name}\" must validate");

        let ledger = cfg.ledger().expect("preset loads are valid entries");
        let quote = run_pipeline(&ledger, &cfg.sizing, &cfg.finance, &catalog)
            .unwrap_or_else(|e| panic!("preset \"{name}\" must size: {e}"));

        assert!(quote.summary.total_energy_wh > 0.0);
        assert!(quote.costs.total > 0.0);
        assert!(quote.finance.is_some(), "non-empty preset has an ROI");

        cfg.client.name = "Test Client".to_string();
        cfg.client.quote_date = "2026-08-23".to_string();
        let doc = render_quotation(
            &cfg.company,
            &cfg.client,
            &ledger,
            &cfg.sizing,
            &cfg.finance,
            &quote,
        )
        .unwrap_or_else(|e| panic!("preset \"{name}\" must render: {e}"));
        assert!(doc.contains("COST BREAKDOWN"));
        assert!(doc.contains("Test Client"));
    }
}

#[test]
fn presets_produce_distinct_systems() {
    let catalog = Catalog::builtin();
    let quote_for = |name: &str| {
        let cfg = ProjectConfig::from_preset(name).expect("preset loads");
        let ledger = cfg.ledger().expect("valid");
        run_pipeline(&ledger, &cfg.sizing, &cfg.finance, &catalog).expect("preset sizes")
    };

    let baseline = quote_for("baseline");
    let three_bedroom = quote_for("three_bedroom");
    let kiosk = quote_for("kiosk");

    assert!(three_bedroom.summary.total_energy_wh > baseline.summary.total_energy_wh);
    assert!(kiosk.summary.total_energy_wh < baseline.summary.total_energy_wh);
    assert!(three_bedroom.costs.total > kiosk.costs.total);
}

#[test]
fn preset_csv_exports_are_consistent() {
    let catalog = Catalog::builtin();
    let cfg = ProjectConfig::three_bedroom();
    let ledger = cfg.ledger().expect("valid");
    let quote = run_pipeline(&ledger, &cfg.sizing, &cfg.finance, &catalog).expect("valid");

    let mut loads_buf = Vec::new();
    write_loads_csv(&ledger, &mut loads_buf).expect("loads export succeeds");
    let loads = String::from_utf8(loads_buf).expect("valid UTF-8");
    // header + one row per entry + TOTAL
    assert_eq!(loads.lines().count(), ledger.len() + 2);

    let mut costs_buf = Vec::new();
    write_costs_csv(&quote.costs, &cfg.sizing, &mut costs_buf).expect("costs export succeeds");
    let costs = String::from_utf8(costs_buf).expect("valid UTF-8");
    assert!(costs.lines().any(|l| l.starts_with("TOTAL")));
    assert!(costs.contains(&cfg.sizing.battery_model));
}

#[test]
fn preset_roundtrips_through_toml() {
    // a preset serialized field-by-field into TOML parses back equivalently
    let cfg = ProjectConfig::kiosk();
    let toml = format!(
        r#"
[sizing]
backup_hours = {}
battery_voltage = {}
panel_model = "{}"
battery_model = "{}"
inverter_model = "{}"
"#,
        cfg.sizing.backup_hours,
        cfg.sizing.battery_voltage,
        cfg.sizing.panel_model,
        cfg.sizing.battery_model,
        cfg.sizing.inverter_model,
    );
    let parsed = ProjectConfig::from_toml_str(&toml).expect("generated TOML parses");
    assert_eq!(parsed.sizing.battery_voltage, cfg.sizing.battery_voltage);
    assert_eq!(parsed.sizing.panel_model, cfg.sizing.panel_model);
}
