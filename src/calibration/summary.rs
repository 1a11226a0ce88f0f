// Summary rendering for the calibration map
//
// Produces the Nominal / Calibrated / Error / Corrected table. Error and
// corrected columns are re-queried through the public lookup path so the
// table always agrees with what callers would get from `error_value` and
// `corrected_position`.

use crate::calibration::CalibrationMap;
use crate::config::SummaryConfig;
use crate::error::CalibrationMapError;

const HEADER: [&str; 4] = ["Nominal", "Calibrated", "Error", "Corrected"];

/// Significant digits beyond which an f64 carries no further information
pub const MAX_PRECISION: usize = 17;

/// Render the summary table for `map`
///
/// One row per stored entry in ascending nominal order. An empty map yields
/// the header alone (or nothing if the header is disabled).
pub fn render(
    map: &CalibrationMap,
    config: &SummaryConfig,
) -> Result<String, CalibrationMapError> {
    let mut summary = String::new();

    if config.include_header {
        summary.push_str(&HEADER.join(&config.separator));
        summary.push('\n');
    }

    for (nominal, _) in map.iter() {
        let error = map.error_value(nominal)?;
        let corrected = map.corrected_position(nominal)?;
        let row = [nominal, nominal - error, error, corrected]
            .iter()
            .map(|value| format_general(*value, config.precision))
            .collect::<Vec<_>>();

        summary.push_str(&row.join(&config.separator));
        summary.push('\n');
    }

    Ok(summary)
}

/// Format a float in general notation with `precision` significant digits
///
/// `precision` is clamped to `1..=MAX_PRECISION`.
/// Fixed notation is used when the decimal exponent lies in
/// `[-4, precision)`, scientific notation otherwise. Trailing zeros are
/// dropped in both forms and the exponent carries a sign and at least two
/// digits (`1.5e+07`, `2e-05`).
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.clamp(1, MAX_PRECISION);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return scientific,
        },
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general_fixed() {
        assert_eq!(format_general(10.0, 6), "10");
        assert_eq!(format_general(-1.0, 6), "-1");
        assert_eq!(format_general(0.35, 6), "0.35");
        assert_eq!(format_general(4.5, 6), "4.5");
        assert_eq!(format_general(123456.0, 6), "123456");
        assert_eq!(format_general(0.0001, 6), "0.0001");
    }

    #[test]
    fn test_format_general_hides_representation_noise() {
        // 10.0 - 9.8 is not exactly 0.2 in binary
        assert_eq!(format_general(10.0 - 9.8, 6), "0.2");
        assert_eq!(format_general(0.1 + 0.2, 6), "0.3");
    }

    #[test]
    fn test_format_general_scientific() {
        assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
        assert_eq!(format_general(0.00002, 6), "2e-05");
        assert_eq!(format_general(-1.5e-7, 6), "-1.5e-07");
        assert_eq!(format_general(1e100, 6), "1e+100");
    }

    #[test]
    fn test_format_general_rounding_carries_into_exponent() {
        assert_eq!(format_general(999999.7, 6), "1e+06");
    }

    #[test]
    fn test_format_general_precision() {
        assert_eq!(format_general(1.23456789, 3), "1.23");
        assert_eq!(format_general(1.23456789, 0), "1");
        assert_eq!(format_general(1234.0, 2), "1.2e+03");
    }

    #[test]
    fn test_format_general_caps_precision() {
        assert_eq!(format_general(0.1, MAX_PRECISION), "0.10000000000000001");
        assert_eq!(format_general(0.1, 1000), "0.10000000000000001");
        assert_eq!(format_general(0.1, usize::MAX), "0.10000000000000001");
    }

    #[test]
    fn test_format_general_special_values() {
        assert_eq!(format_general(0.0, 6), "0");
        assert_eq!(format_general(-0.0, 6), "-0");
        assert_eq!(format_general(f64::NAN, 6), "nan");
        assert_eq!(format_general(f64::INFINITY, 6), "inf");
        assert_eq!(format_general(f64::NEG_INFINITY, 6), "-inf");
    }

    #[test]
    fn test_render_empty_map_is_header_only() {
        let map = CalibrationMap::new();
        let summary = render(&map, &SummaryConfig::default()).unwrap();
        assert_eq!(summary, "Nominal\tCalibrated\tError\tCorrected\n");
    }

    #[test]
    fn test_render_without_header() {
        let mut map = CalibrationMap::new();
        map.add_point(10.0, 9.5);
        let config = SummaryConfig {
            include_header: false,
            ..SummaryConfig::default()
        };
        let summary = render(&map, &config).unwrap();
        assert_eq!(summary, "10\t9.5\t0.5\t9.5\n");
    }

    #[test]
    fn test_render_custom_separator() {
        let mut map = CalibrationMap::new();
        map.add_point(1.0, 1.25);
        let config = SummaryConfig {
            separator: ",".to_string(),
            ..SummaryConfig::default()
        };
        let summary = render(&map, &config).unwrap();
        assert_eq!(
            summary,
            "Nominal,Calibrated,Error,Corrected\n1,1.25,-0.25,1.25\n"
        );
    }
}
