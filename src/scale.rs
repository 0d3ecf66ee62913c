pub const RATING_FLOOR: f64 = 30.0;
pub const RATING_CEILING: f64 = 99.0;
pub const RATING_SPAN: f64 = 69.0;

/// Maps a raw score onto the 30-99 scale:
/// `30 + raw * scale_factor * 69 * minutes_coefficient * league_weight`, clamped to
/// [30, 99] and rounded to one decimal.
pub fn final_rating(raw_score: f64, scale_factor: f64, minutes_coefficient: f64, league_weight: f64) -> f64 {
    let lifted = RATING_FLOOR + (raw_score * scale_factor * RATING_SPAN) * minutes_coefficient * league_weight;
    if !lifted.is_finite() {
        return RATING_FLOOR;
    }
    round1(lifted.clamp(RATING_FLOOR, RATING_CEILING))
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
