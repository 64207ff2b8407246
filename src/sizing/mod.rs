//! Pure sizing calculators: battery bank, solar array, charge controller,
//! and inverter. Same inputs always produce the same outputs; nothing here
//! performs I/O or retains state.

pub mod battery;
pub mod inverter;
pub mod solar;
pub mod types;

pub use battery::{BatterySizing, size_battery_bank};
pub use inverter::{INVERTER_SAFETY_MARGIN, select_inverter_watts};
pub use solar::{CONTROLLER_SAFETY_MARGIN, SolarSizing, size_solar_array};
pub use types::SizingResult;
