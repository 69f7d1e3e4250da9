//! Elapsed-time labels.

use std::time::Duration;

/// Format as `mm:ss.cc` (minutes, seconds, centiseconds).
///
/// Minutes keep growing past 99 rather than wrapping.
///
/// ```
/// use std::time::Duration;
/// use emoji_pair::session::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(83_456)), "01:23.45");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let total_seconds = millis / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let centis = (millis % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
