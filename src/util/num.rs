/// Reads a numeric literal, tolerating a bare trailing exponent marker.
///
/// The scanner admits literals like `1.5e` and `2e+` (an exponent marker with
/// no digits), so this parse accepts exactly what the scanner does: a literal
/// the standard parser rejects is retried with trailing sign and marker
/// characters stripped, which reads the longest usable prefix the way C's
/// `strtof` would.
///
/// ## Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the text is not a numeric literal even after stripping.
///
/// ## Example
/// ```
/// use formula::util::num::parse_number;
///
/// assert_eq!(parse_number("2.5e3"), Some(2500.0));
/// assert_eq!(parse_number(".5"), Some(0.5));
///
/// // Bare exponent markers read as if they were absent.
/// assert_eq!(parse_number("1.5e"), Some(1.5));
/// assert_eq!(parse_number("2e+"), Some(2.0));
///
/// assert_eq!(parse_number("brick"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    if let Ok(value) = text.parse() {
        return Some(value);
    }

    let trimmed = text.trim_end_matches(['+', '-']).trim_end_matches(['e', 'E']);
    trimmed.parse().ok()
}
/// Converts a comparison or logic outcome into the numeric truth convention.
///
/// ## Returns
/// - `1.0` for `true`.
/// - `0.0` for `false`.
#[must_use]
pub const fn truth_value(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}
/// Tests a number under the numeric truth convention.
///
/// Anything non-zero counts as true, NaN included.
///
/// ## Example
/// ```
/// use formula::util::num::is_true;
///
/// assert!(is_true(1.0));
/// assert!(is_true(-0.25));
/// assert!(!is_true(0.0));
/// ```
#[must_use]
pub fn is_true(value: f64) -> bool {
    value != 0.0
}
