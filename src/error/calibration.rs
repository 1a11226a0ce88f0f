// Calibration map error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Calibration map error code constants
///
/// Single source of truth for the numeric codes carried by
/// [`CalibrationMapError`].
///
/// Error code range: 3001-3003
pub struct CalibrationMapErrorCodes {}

impl CalibrationMapErrorCodes {
    /// Nominal and calibrated sequences have different lengths
    pub const LENGTH_MISMATCH: i32 = 3001;

    /// Query issued against a map with no entries
    pub const EMPTY_MAP: i32 = 3002;

    /// Query nominal lies outside the calibrated range
    pub const OUT_OF_RANGE: i32 = 3003;
}

/// Broad category of a [`CalibrationMapError`]
///
/// Lets callers branch on the failure class without matching payloads,
/// e.g. clamping on `OutOfRange` while treating `InvalidArgument` as a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    EmptyState,
    OutOfRange,
}

/// Log a calibration map error with structured context
///
/// Emits the error code, the component and the human-readable message
/// alongside the caller-supplied context.
pub fn log_calibration_map_error(err: &CalibrationMapError, context: &str) {
    error!(
        "Calibration map error in {}: code={}, component=CalibrationMap, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration map errors
///
/// Every failure is a hard stop for the current operation; nothing is
/// retried internally and no partial state is left behind.
///
/// Error code range: 3001-3003
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationMapError {
    /// Bulk insertion received sequences of different lengths
    LengthMismatch { nominals: usize, calibrated: usize },

    /// The map holds no calibration points
    EmptyMap,

    /// The nominal value lies outside `[min, max]` of the stored keys
    OutOfRange { nominal: f64, min: f64, max: f64 },
}

impl CalibrationMapError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalibrationMapError::LengthMismatch { .. } => ErrorKind::InvalidArgument,
            CalibrationMapError::EmptyMap => ErrorKind::EmptyState,
            CalibrationMapError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

impl ErrorCode for CalibrationMapError {
    fn code(&self) -> i32 {
        match self {
            CalibrationMapError::LengthMismatch { .. } => {
                CalibrationMapErrorCodes::LENGTH_MISMATCH
            }
            CalibrationMapError::EmptyMap => CalibrationMapErrorCodes::EMPTY_MAP,
            CalibrationMapError::OutOfRange { .. } => CalibrationMapErrorCodes::OUT_OF_RANGE,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationMapError::LengthMismatch {
                nominals,
                calibrated,
            } => {
                format!(
                    "Nominal and calibrated sequences must have the same length (got {} and {})",
                    nominals, calibrated
                )
            }
            CalibrationMapError::EmptyMap => "Calibration map is empty".to_string(),
            CalibrationMapError::OutOfRange { nominal, min, max } => {
                format!(
                    "Nominal value {} outside of calibrated range [{}, {}]",
                    nominal, min, max
                )
            }
        }
    }
}

impl fmt::Display for CalibrationMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationMapError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationMapError {}
