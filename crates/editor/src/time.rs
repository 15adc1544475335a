/// Timeline time in integer microsecond ticks.
///
/// Media tooling exchanges `f64` seconds; clip endpoints are kept as integer
/// ticks so the tiling invariant can be checked by equality.
pub type Ticks = i64;

/// Ticks per second of the editor timeline.
pub const TICKS_PER_SECOND: i64 = 1_000_000;

/// Converts seconds into timeline ticks with nearest rounding.
///
/// Negative and non-finite inputs clamp to 0.
///
/// # Example
/// ```
/// use editor::time::ticks_from_seconds;
///
/// assert_eq!(ticks_from_seconds(4.0), 4_000_000);
/// assert_eq!(ticks_from_seconds(-1.0), 0);
/// ```
pub fn ticks_from_seconds(seconds: f64) -> Ticks {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * TICKS_PER_SECOND as f64).round() as Ticks
}

/// Converts timeline ticks into seconds.
///
/// # Example
/// ```
/// use editor::time::seconds_from_ticks;
///
/// assert_eq!(seconds_from_ticks(500_000), 0.5);
/// ```
pub fn seconds_from_ticks(ticks: Ticks) -> f64 {
    ticks as f64 / TICKS_PER_SECOND as f64
}
