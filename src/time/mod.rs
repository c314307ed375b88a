pub mod beat;

pub use self::beat::BeatInfo;
pub use self::beat::Timing;

pub type Measure = f32;
