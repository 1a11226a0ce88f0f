// Calibration module - nominal/error lookup table and its reporting
//
// CalibrationMap stores one error value (nominal - calibrated) per nominal
// point and answers error and corrected-position queries, interpolating
// linearly between stored points. The summary submodule renders the table.

mod map;
mod nominal;
pub mod summary;

pub use map::CalibrationMap;
