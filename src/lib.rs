// Calibration Map - piecewise-linear error correction from sparse calibration points

//! Calibration lookup table for measurement and motion systems.
//!
//! A [`CalibrationMap`] holds `(nominal, calibrated)` measurements as
//! per-point errors and answers two queries: the error at a nominal value
//! and the corrected position for it, interpolating linearly between the
//! nearest calibrated points. Queries outside the calibrated range fail
//! instead of extrapolating.
//!
//! ```
//! use calibration_map::CalibrationMap;
//!
//! let mut map = CalibrationMap::new();
//! map.add_point(0.0, 0.0);
//! map.add_point(10.0, 9.0);
//!
//! assert_eq!(map.error_value(10.0).unwrap(), 1.0);
//! assert!((map.corrected_position(5.0).unwrap() - 4.5).abs() < 1e-12);
//! ```

// Module declarations
pub mod calibration;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use calibration::CalibrationMap;
pub use config::{AppConfig, SummaryConfig};
pub use error::{CalibrationMapError, ErrorCode, ErrorKind};
