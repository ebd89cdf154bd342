// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Human-readable timestamps for the timeline and properties panel.

/// Format seconds as `M:SS.cc`.
///
/// ```
/// use clickthru::util::time::format_timestamp;
/// assert_eq!(format_timestamp(0.0), "0:00.00");
/// assert_eq!(format_timestamp(65.25), "1:05.25");
/// ```
pub fn format_timestamp(secs: f64) -> String {
    let secs = secs.max(0.0);
    let centis = (secs * 100.0).round() as u64;
    let minutes = centis / 6000;
    let seconds = (centis / 100) % 60;
    let fraction = centis % 100;
    format!("{}:{:02}.{:02}", minutes, seconds, fraction)
}
