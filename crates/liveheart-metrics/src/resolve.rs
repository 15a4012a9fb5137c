/// Resolve raw field text into a measurement value.
///
/// A comma is accepted as the decimal separator. Empty input, anything that
/// is not entirely a number, and non-finite values (`inf`, `NaN`) all resolve
/// to `None`. Never fails.
pub fn resolve(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
