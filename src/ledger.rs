//! Appliance load ledger: the ordered audit of loads driving every
//! downstream sizing calculation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One appliance line in the load audit.
///
/// Derived figures (`total_watts`, `daily_energy_wh`) are recomputed on
/// read rather than stored, so they can never go stale relative to the
/// entered fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadEntry {
    /// Appliance name as entered (e.g., `"Fridge"`).
    pub name: String,
    /// Power rating of a single unit (W).
    pub unit_watts: f64,
    /// Number of identical units (must be >= 1).
    pub quantity: u32,
    /// Daily usage (hours, 0.0 to 24.0).
    pub hours_per_day: f64,
}

impl LoadEntry {
    /// Combined power demand of all units (W).
    pub fn total_watts(&self) -> f64 {
        self.unit_watts * f64::from(self.quantity)
    }

    /// Daily energy consumption of all units (Wh).
    pub fn daily_energy_wh(&self) -> f64 {
        self.total_watts() * self.hours_per_day
    }
}

/// Aggregate power and energy demand over a whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Sum of per-entry total power (W).
    pub total_watts: f64,
    /// Sum of per-entry daily energy (Wh/day).
    pub total_energy_wh: f64,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total power demand: {:.1} W | Total energy demand: {:.1} Wh/day",
            self.total_watts, self.total_energy_wh
        )
    }
}

/// Rejected load entry with the offending field and constraint.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field name on the rejected entry (e.g., `"quantity"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid load entry: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered, append-only collection of load entries.
///
/// Entries are never edited in place; corrections are made by clearing
/// and re-adding. Each interactive session owns its own ledger instance.
#[derive(Debug, Clone, Default)]
pub struct LoadLedger {
    entries: Vec<LoadEntry>,
}

impl LoadLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger by validating and appending each entry in order.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn from_entries(entries: impl IntoIterator<Item = LoadEntry>) -> Result<Self, ValidationError> {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.add(entry)?;
        }
        Ok(ledger)
    }

    /// Validates and appends one entry.
    ///
    /// The original tool silently dropped invalid rows; here a malformed
    /// entry is rejected with a named error instead.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the name is blank, the quantity is
    /// zero, the wattage is negative or non-finite, or the usage hours
    /// fall outside 0–24.
    pub fn add(&mut self, entry: LoadEntry) -> Result<(), ValidationError> {
        if entry.name.trim().is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "must not be blank".into(),
            });
        }
        if entry.quantity < 1 {
            return Err(ValidationError {
                field: "quantity".into(),
                message: "must be >= 1".into(),
            });
        }
        if !entry.unit_watts.is_finite() || entry.unit_watts < 0.0 {
            return Err(ValidationError {
                field: "unit_watts".into(),
                message: format!("must be a finite value >= 0, got {}", entry.unit_watts),
            });
        }
        if !entry.hours_per_day.is_finite() || !(0.0..=24.0).contains(&entry.hours_per_day) {
            return Err(ValidationError {
                field: "hours_per_day".into(),
                message: format!("must be in [0, 24], got {}", entry.hours_per_day),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes every entry. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LoadEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds all entries into aggregate power and energy totals.
    ///
    /// An empty ledger yields `{0, 0}` rather than an error; every
    /// downstream calculator treats zero totals as a valid degenerate
    /// case. No rounding is applied here.
    pub fn summarize(&self) -> LoadSummary {
        let mut total_watts = 0.0;
        let mut total_energy_wh = 0.0;
        for entry in &self.entries {
            total_watts += entry.total_watts();
            total_energy_wh += entry.daily_energy_wh();
        }
        LoadSummary {
            total_watts,
            total_energy_wh,
        }
    }
}
