use std::fmt;

use crate::time::Measure;

pub const DEFAULT_BEAT_DIVISIONS: u32 = 1920;

///! A time position quantized to the beat grid
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct BeatInfo {
  measure: i32,
  beat: i32,
}

impl BeatInfo {
  pub fn new(measure: i32, beat: i32) -> BeatInfo {
    BeatInfo { measure, beat }
  }

  pub fn get_measure(&self) -> i32 {
    self.measure
  }

  pub fn get_beat(&self) -> i32 {
    self.beat
  }
}

impl fmt::Debug for BeatInfo {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:04}:{:04}", self.measure, self.beat)
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Timing {
  beat_divisions: u32,
}

impl Timing {
  pub fn new(beat_divisions: u32) -> Timing {
    assert!(beat_divisions > 0);
    Timing { beat_divisions }
  }

  pub fn get_beat_divisions(&self) -> u32 {
    self.beat_divisions
  }

  /// Quantizes a measure position to the nearest beat division. A measure
  /// value just below a measure boundary normalizes to the next measure,
  /// so positions within rounding error of each other compare equal.
  pub fn beat_info(&self, measure: Measure) -> BeatInfo {
    let divisions = i64::from(self.beat_divisions);
    let total = (f64::from(measure) * divisions as f64).round() as i64;
    BeatInfo {
      measure: total.div_euclid(divisions) as i32,
      beat: total.rem_euclid(divisions) as i32,
    }
  }
}

impl Default for Timing {
  fn default() -> Timing {
    Timing::new(DEFAULT_BEAT_DIVISIONS)
  }
}
