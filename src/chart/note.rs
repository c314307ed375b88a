use uuid::Uuid;

use crate::chart::ring::TRACK_UNITS;
use crate::time::Measure;

/// Stable handle to a note inside a chart's collection. Chain links are
/// stored as handles so that chain navigation never aliases the chart's
/// owned storage.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NoteId(Uuid);

impl NoteId {
  pub fn new() -> NoteId {
    NoteId(Uuid::new_v4())
  }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NoteType {
  Touch,
  HoldStart,
  HoldJoint,
  HoldEnd,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Note {
  note_type: NoteType,
  measure: Measure,
  position: i32,
  size: i32,
  discrete_change: bool,
  prev_link: Option<NoteId>,
  next_link: Option<NoteId>,
}

impl Note {
  pub fn new(note_type: NoteType, measure: Measure, position: i32, size: i32) -> Note {
    assert!(position >= 0 && position < TRACK_UNITS);
    assert!(size >= 0 && size < TRACK_UNITS);
    Note {
      note_type,
      measure,
      position,
      size,
      discrete_change: false,
      prev_link: None,
      next_link: None,
    }
  }

  pub fn get_note_type(&self) -> NoteType {
    self.note_type
  }

  pub fn get_measure(&self) -> Measure {
    self.measure
  }

  pub fn get_position(&self) -> i32 {
    self.position
  }

  pub fn get_size(&self) -> i32 {
    self.size
  }

  pub fn is_discrete_change(&self) -> bool {
    self.discrete_change
  }

  pub fn set_discrete_change(&mut self, discrete_change: bool) {
    self.discrete_change = discrete_change;
  }

  pub fn get_prev_link(&self) -> Option<NoteId> {
    self.prev_link
  }

  pub fn set_prev_link(&mut self, link: Option<NoteId>) {
    self.prev_link = link;
  }

  pub fn get_next_link(&self) -> Option<NoteId> {
    self.next_link
  }

  pub fn set_next_link(&mut self, link: Option<NoteId>) {
    self.next_link = link;
  }
}
