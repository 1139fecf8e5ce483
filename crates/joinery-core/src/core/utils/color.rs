/// The fixed color ramp used to visualize stability scores, from unstable
/// (red) through caution (yellow) to solid (green).
const HEAT_STOPS: [(f64, [u8; 3]); 6] = [
    (0.0, [208, 74, 62]),
    (0.2, [224, 138, 60]),
    (0.4, [230, 200, 75]),
    (0.6, [168, 208, 94]),
    (0.8, [110, 192, 106]),
    (1.0, [61, 166, 130]),
];

/// Maps a stability score in `[0, 1]` to an RGB color by piecewise-linear
/// interpolation across six fixed stops. Out-of-range inputs clamp to the
/// nearest stop.
pub fn heat_color(score: f64) -> [u8; 3] {
    let clamped = score.clamp(0.0, 1.0);
    for window in HEAT_STOPS.windows(2) {
        let (lo_pos, lo_color) = window[0];
        let (hi_pos, hi_color) = window[1];
        if clamped <= hi_pos {
            let t = (clamped - lo_pos) / (hi_pos - lo_pos);
            return [
                lerp_channel(lo_color[0], hi_color[0], t),
                lerp_channel(lo_color[1], hi_color[1], t),
                lerp_channel(lo_color[2], hi_color[2], t),
            ];
        }
    }
    HEAT_STOPS[HEAT_STOPS.len() - 1].1
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}
