/// `m:ss` display for a media position; unknown positions read `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback position as a fraction of the duration, 0 when the duration is
/// not yet known.
pub fn progress_fraction(current: f64, duration: Option<f64>) -> f32 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 && current.is_finite() => {
            (current / d).clamp(0.0, 1.0) as f32
        }
        _ => 0.0,
    }
}
