//! Arithmetic on the circular 60-unit lane track.

pub const TRACK_UNITS: i32 = 60;
pub const HALF_TRACK: i32 = TRACK_UNITS / 2;

/// Normalizes a lane coordinate into `[0, TRACK_UNITS)`.
pub fn wrap(value: i32) -> i32 {
  ((value % TRACK_UNITS) + TRACK_UNITS) % TRACK_UNITS
}

/// Linear interpolation between two track coordinates along the shorter
/// arc. When the endpoints are more than half the track apart the larger
/// one is shifted down by a full turn first, so the path never sweeps the
/// long way around.
pub fn shortest_lerp(a: i32, b: i32, t: f32) -> f32 {
  let (mut a, mut b) = (a, b);
  if (a - b).abs() > HALF_TRACK {
    if a > b {
      a -= TRACK_UNITS;
    } else {
      b -= TRACK_UNITS;
    }
  }
  (1.0 - t) * a as f32 + t * b as f32
}
