// Error types for the calibration map
//
// Structured errors with stable numeric codes so callers can report and
// branch on failures without string matching.

mod calibration;

pub use calibration::{
    log_calibration_map_error, CalibrationMapError, CalibrationMapErrorCodes, ErrorKind,
};

/// Error codes for structured error reporting
///
/// Standard way to get error codes and messages from the crate's error
/// types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
