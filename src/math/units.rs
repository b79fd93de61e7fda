/// Millimeters represented by one internal plan unit.
pub const MM_PER_UNIT: f64 = 10.0;

/// Converts a length in internal units to millimeters.
#[must_use]
pub fn to_display_units(units: f64) -> f64 {
    units * MM_PER_UNIT
}

/// Converts a length in millimeters to internal units.
#[must_use]
pub fn to_internal_units(mm: f64) -> f64 {
    mm / MM_PER_UNIT
}

/// Formats a length given in millimeters for display.
///
/// Lengths of a meter or more render as meters with two decimals (`"2.56m"`),
/// shorter ones as whole millimeters (`"950mm"`).
#[must_use]
pub fn format_length(mm: f64) -> String {
    if mm >= 1000.0 {
        format!("{:.2}m", mm / 1000.0)
    } else {
        format!("{}mm", mm.round())
    }
}
