//! # Game Mathematics
//!
//! Integer helpers shared by the carver and the visibility system.

/// Clamps `value` into `low..=high`.
///
/// When the range is empty `low` wins, which keeps the result inside the
/// border for maps that are barely big enough.
///
/// # Examples
///
/// ```
/// use dimlight::clamp_inside;
///
/// assert_eq!(clamp_inside(0, 1, 9), 1);
/// assert_eq!(clamp_inside(12, 1, 9), 9);
/// assert_eq!(clamp_inside(5, 1, 9), 5);
/// ```
pub fn clamp_inside(value: i32, low: i32, high: i32) -> i32 {
    value.min(high).max(low)
}

/// Whether the offset `(dx, dy)` lies within `radius`, compared squared.
pub fn within_radius(dx: i32, dy: i32, radius: i32) -> bool {
    dx * dx + dy * dy <= radius * radius
}
