// CalibrationMap - nominal -> error lookup with linear interpolation
//
// Each calibration point is stored as `error = nominal - calibrated`, keyed
// by nominal. Queries return the stored error for an exact key and a
// two-point linear interpolation between the bracketing keys otherwise.
// Values outside the calibrated range are rejected, never extrapolated.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

use log::{debug, trace};

use crate::calibration::nominal::Nominal;
use crate::calibration::summary;
use crate::config::SummaryConfig;
use crate::error::{log_calibration_map_error, CalibrationMapError};

/// Calibration lookup table keyed by nominal value
///
/// Owned exclusively by its caller and not internally synchronized; wrap it
/// in a `Mutex` if it must be shared between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationMap {
    /// Error (nominal - calibrated) per nominal, ascending by nominal
    error_by_nominal: BTreeMap<Nominal, f64>,
}

impl CalibrationMap {
    /// Create an empty calibration map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a calibration point
    ///
    /// Stores `nominal - calibrated` under `nominal`. An existing entry for
    /// the same nominal is overwritten.
    pub fn add_point(&mut self, nominal: f64, calibrated: f64) {
        let error = nominal - calibrated;
        if let Some(previous) = self.error_by_nominal.insert(Nominal::new(nominal), error) {
            debug!(
                "[CalibrationMap] Overwrote point at nominal {}: error {} -> {}",
                nominal, previous, error
            );
        } else {
            trace!(
                "[CalibrationMap] Added point at nominal {}: error {}",
                nominal,
                error
            );
        }
    }

    /// Add a sequence of calibration points
    ///
    /// `nominals[i]` pairs with `calibrated[i]`; points are added in
    /// sequence order so a repeated nominal keeps its last value.
    ///
    /// # Errors
    /// * `CalibrationMapError::LengthMismatch` - the slices differ in length.
    ///   The check runs before any insertion, so the map is left untouched.
    pub fn add_points(
        &mut self,
        nominals: &[f64],
        calibrated: &[f64],
    ) -> Result<(), CalibrationMapError> {
        if nominals.len() != calibrated.len() {
            let err = CalibrationMapError::LengthMismatch {
                nominals: nominals.len(),
                calibrated: calibrated.len(),
            };
            log_calibration_map_error(&err, "add_points");
            return Err(err);
        }

        for (&nominal, &calibrated) in nominals.iter().zip(calibrated) {
            self.add_point(nominal, calibrated);
        }
        debug!("[CalibrationMap] Added {} points", nominals.len());

        Ok(())
    }

    /// Replace the whole map with precomputed `(nominal, error)` pairs
    ///
    /// The values are error values, not calibrated values. Previous contents
    /// are discarded; an empty input leaves an empty map. If the input repeats
    /// a nominal, the last pair wins.
    pub fn set_map<I>(&mut self, errors: I)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.error_by_nominal = errors
            .into_iter()
            .map(|(nominal, error)| (Nominal::new(nominal), error))
            .collect();
        debug!(
            "[CalibrationMap] Replaced map with {} entries",
            self.error_by_nominal.len()
        );
    }

    /// Merge precomputed `(nominal, error)` pairs into the map
    ///
    /// Insert-if-absent: a nominal that is already stored keeps its existing
    /// error and the incoming value is skipped. This also applies between
    /// pairs of the same input, so the first occurrence of a new nominal wins.
    pub fn append_map<I>(&mut self, errors: I)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut inserted = 0usize;
        let mut skipped = 0usize;

        for (nominal, error) in errors {
            match self.error_by_nominal.entry(Nominal::new(nominal)) {
                Entry::Vacant(slot) => {
                    slot.insert(error);
                    inserted += 1;
                }
                Entry::Occupied(_) => skipped += 1,
            }
        }

        debug!(
            "[CalibrationMap] Appended {} entries, kept {} existing",
            inserted, skipped
        );
    }

    /// Error value at `nominal`
    ///
    /// Exact keys return the stored error unchanged. Between two keys the
    /// error is linearly interpolated from the nearest lower and upper keys.
    ///
    /// # Errors
    /// * `CalibrationMapError::EmptyMap` - no points stored
    /// * `CalibrationMapError::OutOfRange` - `nominal` is below the smallest
    ///   or above the largest stored key
    pub fn error_value(&self, nominal: f64) -> Result<f64, CalibrationMapError> {
        if self.error_by_nominal.is_empty() {
            return Err(CalibrationMapError::EmptyMap);
        }

        let key = Nominal::new(nominal);
        if let Some(&error) = self.error_by_nominal.get(&key) {
            return Ok(error);
        }

        // Exact matches were handled above, so both neighbors are strict.
        let upper = self
            .error_by_nominal
            .range((Excluded(key), Unbounded))
            .next();
        let lower = self
            .error_by_nominal
            .range((Unbounded, Excluded(key)))
            .next_back();

        // A NaN key sorts outside every finite key and cannot anchor a line.
        match (lower, upper) {
            (Some((x1, &y1)), Some((x2, &y2)))
                if !x1.value().is_nan() && !x2.value().is_nan() =>
            {
                let error = interpolate(nominal, x1.value(), y1, x2.value(), y2);
                trace!(
                    "[CalibrationMap] Interpolated error {} at nominal {} between {} and {}",
                    error,
                    nominal,
                    x1.value(),
                    x2.value()
                );
                Ok(error)
            }
            _ => {
                let (min, max) = self.range().unwrap_or((f64::NAN, f64::NAN));
                Err(CalibrationMapError::OutOfRange { nominal, min, max })
            }
        }
    }

    /// Corrected position for `nominal`: `nominal - error_value(nominal)`
    ///
    /// # Errors
    /// Same as [`CalibrationMap::error_value`].
    pub fn corrected_position(&self, nominal: f64) -> Result<f64, CalibrationMapError> {
        Ok(nominal - self.error_value(nominal)?)
    }

    /// Tab-separated summary with the default layout
    ///
    /// Header `Nominal`, `Calibrated`, `Error`, `Corrected` followed by one
    /// row per stored point in ascending order. An empty map yields the
    /// header only.
    pub fn map_summary(&self) -> Result<String, CalibrationMapError> {
        self.map_summary_with(&SummaryConfig::default())
    }

    /// Summary rendered with an explicit layout
    pub fn map_summary_with(
        &self,
        config: &SummaryConfig,
    ) -> Result<String, CalibrationMapError> {
        summary::render(self, config)
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.error_by_nominal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.error_by_nominal.is_empty()
    }

    /// Smallest and largest stored non-NaN nominal
    ///
    /// `None` when the map is empty or holds only NaN keys.
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut keys = self
            .error_by_nominal
            .keys()
            .map(|nominal| nominal.value())
            .filter(|value| !value.is_nan());
        let min = keys.next()?;
        let max = keys.next_back().unwrap_or(min);
        Some((min, max))
    }

    /// Stored error for an exact nominal, without interpolation
    pub fn stored_error(&self, nominal: f64) -> Option<f64> {
        self.error_by_nominal.get(&Nominal::new(nominal)).copied()
    }

    /// `(nominal, error)` pairs in ascending nominal order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.error_by_nominal
            .iter()
            .map(|(nominal, &error)| (nominal.value(), error))
    }
}

/// Builds a map from `(nominal, calibrated)` pairs, as repeated `add_point`
impl FromIterator<(f64, f64)> for CalibrationMap {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (nominal, calibrated) in iter {
            map.add_point(nominal, calibrated);
        }
        map
    }
}

impl fmt::Display for CalibrationMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.map_summary().map_err(|_| fmt::Error)?;
        f.write_str(&summary)
    }
}

/// Linear interpolation of y at `x` through `(x1, y1)` and `(x2, y2)`
///
/// Requires `x1 != x2`; callers pass two distinct map keys.
#[inline]
fn interpolate(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    debug_assert!(x1 != x2, "interpolation anchors must be distinct");
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}
