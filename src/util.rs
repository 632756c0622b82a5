/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// Per-minute rate of `count` events over `elapsed_secs`; zero when no time passed.
pub fn per_minute(count: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        count as f64 * 60.0 / elapsed_secs
    } else {
        0.0
    }
}
