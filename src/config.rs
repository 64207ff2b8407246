//! TOML-based project configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ledger::{LoadEntry, LoadLedger, ValidationError};

/// Top-level project configuration parsed from TOML.
///
/// All fields have defaults matching the baseline household. Load from
/// TOML with [`ProjectConfig::from_toml_file`] or use
/// [`ProjectConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Installer branding printed on quotations.
    #[serde(default)]
    pub company: CompanyInfo,
    /// Client metadata for the quotation header.
    #[serde(default)]
    pub client: ClientInfo,
    /// System sizing parameters.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Tariff, lifespan, and fee parameters for the ROI estimate.
    #[serde(default)]
    pub finance: FinanceConfig,
    /// Appliance load entries.
    #[serde(default)]
    pub loads: Vec<LoadEntry>,
}

/// Installer branding printed on quotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanyInfo {
    pub name: String,
    pub motto: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "Annur Tech".to_string(),
            motto: "Illuminating Innovation".to_string(),
            address: "No 6 Kolo Drive, Behind Zuma Barrack, Tafa LGA, Niger State, Nigeria"
                .to_string(),
            phone: "09051693000".to_string(),
            email: "albataskumyjr@gmail.com".to_string(),
        }
    }
}

/// Client metadata for the quotation header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Site or project location, if distinct from the client address.
    pub project_location: String,
    /// Quotation date as entered (e.g., `"2026-08-23"`).
    pub quote_date: String,
}

/// System sizing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Required autonomy (hours the battery bank must carry the load).
    pub backup_hours: f64,
    /// Battery bank voltage: 12, 24, or 48 V.
    pub battery_voltage: f64,
    /// Usable depth of discharge (%, in (0, 100]).
    pub depth_of_discharge_pct: f64,
    /// Capacity derating for ambient temperature (%, in (0, 100]).
    pub temperature_derating_pct: f64,
    /// Effective peak sun hours per day.
    pub sun_hours_per_day: f64,
    /// Whole-system efficiency (%, in (0, 100]).
    pub system_efficiency_pct: f64,
    /// Catalog key of the selected panel model.
    pub panel_model: String,
    /// Catalog key of the selected battery model.
    pub battery_model: String,
    /// Catalog key of the selected inverter model.
    pub inverter_model: String,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            backup_hours: 5.0,
            battery_voltage: 24.0,
            depth_of_discharge_pct: 80.0,
            temperature_derating_pct: 90.0,
            sun_hours_per_day: 5.0,
            system_efficiency_pct: 75.0,
            panel_model: "pv300".to_string(),
            battery_model: "ah200".to_string(),
            inverter_model: "inv2k".to_string(),
        }
    }
}

/// Tariff, lifespan, and fee parameters for the ROI estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Grid electricity tariff (currency per kWh).
    pub tariff_per_kwh: f64,
    /// Assumed system lifespan (years).
    pub system_lifespan_years: f64,
    /// Flat installation fee added to every quote (currency units).
    pub installation_fee: f64,
    /// Currency code printed on quotations.
    pub currency: String,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            tariff_per_kwh: 225.0,
            system_lifespan_years: 20.0,
            installation_fee: 150_000.0,
            currency: "NGN".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"sizing.battery_voltage"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Battery bank voltages the sizing formulas accept.
pub const SUPPORTED_BANK_VOLTAGES: &[f64] = &[12.0, 24.0, 48.0];

impl ProjectConfig {
    /// Returns the baseline preset: a modest household audit.
    pub fn baseline() -> Self {
        Self {
            company: CompanyInfo::default(),
            client: ClientInfo::default(),
            sizing: SizingConfig::default(),
            finance: FinanceConfig::default(),
            loads: vec![
                entry("Fridge", 150.0, 1, 10.0),
                entry("LED bulbs", 10.0, 8, 6.0),
                entry("Ceiling fan", 60.0, 2, 8.0),
                entry("TV", 80.0, 1, 5.0),
            ],
        }
    }

    /// Returns the three-bedroom preset: larger audit, 48 V bank,
    /// bigger panel and inverter selections.
    pub fn three_bedroom() -> Self {
        Self {
            sizing: SizingConfig {
                backup_hours: 8.0,
                battery_voltage: 48.0,
                panel_model: "pv550".to_string(),
                battery_model: "ah220".to_string(),
                inverter_model: "inv5k".to_string(),
                ..SizingConfig::default()
            },
            loads: vec![
                entry("Fridge", 200.0, 1, 12.0),
                entry("Freezer", 250.0, 1, 10.0),
                entry("LED bulbs", 10.0, 16, 6.0),
                entry("Ceiling fan", 60.0, 4, 10.0),
                entry("TV", 120.0, 2, 6.0),
                entry("Washing machine", 500.0, 1, 1.0),
                entry("Pumping machine", 750.0, 1, 0.5),
            ],
            ..Self::baseline()
        }
    }

    /// Returns the kiosk preset: tiny daytime-only load on a 12 V bank.
    pub fn kiosk() -> Self {
        Self {
            sizing: SizingConfig {
                backup_hours: 3.0,
                battery_voltage: 12.0,
                panel_model: "pv150".to_string(),
                battery_model: "ah100".to_string(),
                inverter_model: "inv1k".to_string(),
                ..SizingConfig::default()
            },
            loads: vec![
                entry("LED bulbs", 10.0, 3, 5.0),
                entry("Phone charging bank", 60.0, 1, 8.0),
                entry("Small fan", 45.0, 1, 6.0),
            ],
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "three_bedroom", "kiosk"];

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "three_bedroom" => Ok(Self::three_bedroom()),
            "kiosk" => Ok(Self::kiosk()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "project".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds a validated ledger from the configured load entries.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` among the entries.
    pub fn ledger(&self) -> Result<LoadLedger, ValidationError> {
        LoadLedger::from_entries(self.loads.iter().cloned())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Every value that later appears as a divisor is checked here, so the
    /// calculators never see a zero denominator from a validated config.
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.sizing;

        if !(s.backup_hours > 0.0 && s.backup_hours.is_finite()) {
            errors.push(ConfigError {
                field: "sizing.backup_hours".into(),
                message: "must be > 0".into(),
            });
        }
        if !SUPPORTED_BANK_VOLTAGES.contains(&s.battery_voltage) {
            errors.push(ConfigError {
                field: "sizing.battery_voltage".into(),
                message: format!("must be 12, 24, or 48, got {}", s.battery_voltage),
            });
        }
        for (field, value) in [
            ("sizing.depth_of_discharge_pct", s.depth_of_discharge_pct),
            ("sizing.temperature_derating_pct", s.temperature_derating_pct),
            ("sizing.system_efficiency_pct", s.system_efficiency_pct),
        ] {
            if !(value > 0.0 && value <= 100.0) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be in (0, 100], got {value}"),
                });
            }
        }
        if !(s.sun_hours_per_day > 0.0 && s.sun_hours_per_day <= 24.0) {
            errors.push(ConfigError {
                field: "sizing.sun_hours_per_day".into(),
                message: format!("must be in (0, 24], got {}", s.sun_hours_per_day),
            });
        }
        for (field, key) in [
            ("sizing.panel_model", &s.panel_model),
            ("sizing.battery_model", &s.battery_model),
            ("sizing.inverter_model", &s.inverter_model),
        ] {
            if key.trim().is_empty() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must name a catalog model".into(),
                });
            }
        }

        let f = &self.finance;
        if !(f.tariff_per_kwh >= 0.0 && f.tariff_per_kwh.is_finite()) {
            errors.push(ConfigError {
                field: "finance.tariff_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.system_lifespan_years < 1.0 {
            errors.push(ConfigError {
                field: "finance.system_lifespan_years".into(),
                message: "must be >= 1".into(),
            });
        }
        if f.installation_fee < 0.0 {
            errors.push(ConfigError {
                field: "finance.installation_fee".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}

fn entry(name: &str, unit_watts: f64, quantity: u32, hours_per_day: f64) -> LoadEntry {
    LoadEntry {
        name: name.to_string(),
        unit_watts,
        quantity,
        hours_per_day,
    }
}
