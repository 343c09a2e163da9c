//! Reporting math shared by the report and stats endpoints.

/// Percentage of registrations that produced an attendance, rounded to the
/// nearest integer. Zero when nothing was registered.
pub fn attendance_percentage(attended: i64, registered: i64) -> i64 {
    if registered == 0 {
        return 0;
    }
    ((attended as f64 / registered as f64) * 100.0).round() as i64
}

/// Mean rating rounded to two decimals. Zero when no feedback exists.
pub fn average_rating(rating_sum: i64, feedback_count: i64) -> f64 {
    if feedback_count == 0 {
        return 0.0;
    }
    let mean = rating_sum as f64 / feedback_count as f64;
    (mean * 100.0).round() / 100.0
}
