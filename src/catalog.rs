//! Static component catalog: panel, battery, and inverter reference data.
//!
//! Loaded once at startup (built-in table or TOML override) and looked up
//! by key; never mutated at runtime.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Solar panel reference record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelModel {
    /// Unit price (currency units).
    pub price: f64,
    /// Nameplate rating (W).
    pub rated_watts: f64,
    /// Voltage at maximum power point (V).
    pub vmp_volts: f64,
}

/// Deep-cycle battery reference record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatteryModel {
    /// Unit price (currency units).
    pub price: f64,
    /// Rated capacity (Ah).
    pub capacity_ah: f64,
    /// Nominal voltage (V).
    pub voltage: f64,
}

/// Inverter reference record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InverterModel {
    /// Unit price (currency units).
    pub price: f64,
    /// Continuous output rating (W).
    pub rated_watts: f64,
    /// Conversion efficiency (%).
    pub efficiency_pct: f64,
}

/// Immutable keyed tables of component models.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Panel models keyed by catalog id (e.g., `"pv300"`).
    #[serde(default)]
    pub panels: BTreeMap<String, PanelModel>,
    /// Battery models keyed by catalog id (e.g., `"ah200"`).
    #[serde(default)]
    pub batteries: BTreeMap<String, BatteryModel>,
    /// Inverter models keyed by catalog id (e.g., `"inv2k"`).
    #[serde(default)]
    pub inverters: BTreeMap<String, InverterModel>,
}

impl Catalog {
    /// Returns the built-in catalog.
    ///
    /// Panel wattages mirror the quick-pick list of the original planner
    /// (100–550 W); batteries are the common 12 V deep-cycle sizes.
    pub fn builtin() -> Self {
        let mut panels = BTreeMap::new();
        for (key, rated_watts, vmp_volts, price) in [
            ("pv100", 100.0, 18.0, 38_000.0),
            ("pv150", 150.0, 18.5, 52_000.0),
            ("pv250", 250.0, 30.5, 78_000.0),
            ("pv300", 300.0, 32.0, 92_000.0),
            ("pv350", 350.0, 38.0, 105_000.0),
            ("pv400", 400.0, 40.5, 118_000.0),
            ("pv500", 500.0, 42.0, 142_000.0),
            ("pv550", 550.0, 42.5, 155_000.0),
        ] {
            panels.insert(
                key.to_string(),
                PanelModel {
                    price,
                    rated_watts,
                    vmp_volts,
                },
            );
        }

        let mut batteries = BTreeMap::new();
        for (key, capacity_ah, voltage, price) in [
            ("ah100", 100.0, 12.0, 125_000.0),
            ("ah150", 150.0, 12.0, 180_000.0),
            ("ah200", 200.0, 12.0, 235_000.0),
            ("ah220", 220.0, 12.0, 260_000.0),
        ] {
            batteries.insert(
                key.to_string(),
                BatteryModel {
                    price,
                    capacity_ah,
                    voltage,
                },
            );
        }

        let mut inverters = BTreeMap::new();
        for (key, rated_watts, efficiency_pct, price) in [
            ("inv1k", 1_000.0, 90.0, 150_000.0),
            ("inv2k", 2_000.0, 92.0, 280_000.0),
            ("inv3k", 3_000.0, 93.0, 420_000.0),
            ("inv5k", 5_000.0, 94.0, 650_000.0),
        ] {
            inverters.insert(
                key.to_string(),
                InverterModel {
                    price,
                    rated_watts,
                    efficiency_pct,
                },
            );
        }

        Self {
            panels,
            batteries,
            inverters,
        }
    }

    /// Parses a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "catalog".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a catalog from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "catalog".to_string(),
            message: e.to_string(),
        })
    }

    /// Looks up a panel model by key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the available keys if absent.
    pub fn panel(&self, key: &str) -> Result<&PanelModel, ConfigError> {
        self.panels.get(key).ok_or_else(|| ConfigError {
            field: "sizing.panel_model".to_string(),
            message: unknown_key_message(key, self.panels.keys()),
        })
    }

    /// Looks up a battery model by key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the available keys if absent.
    pub fn battery(&self, key: &str) -> Result<&BatteryModel, ConfigError> {
        self.batteries.get(key).ok_or_else(|| ConfigError {
            field: "sizing.battery_model".to_string(),
            message: unknown_key_message(key, self.batteries.keys()),
        })
    }

    /// Looks up an inverter model by key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the available keys if absent.
    pub fn inverter(&self, key: &str) -> Result<&InverterModel, ConfigError> {
        self.inverters.get(key).ok_or_else(|| ConfigError {
            field: "sizing.inverter_model".to_string(),
            message: unknown_key_message(key, self.inverters.keys()),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn unknown_key_message<'a>(key: &str, available: impl Iterator<Item = &'a String>) -> String {
    let keys: Vec<&str> = available.map(String::as_str).collect();
    format!("unknown model \"{key}\", available: {}", keys.join(", "))
}
