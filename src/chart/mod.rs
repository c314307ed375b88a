pub mod note;
pub mod ring;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::time::{BeatInfo, Measure, Timing};

use self::note::{Note, NoteId};

/// A chart is shared between the editor, the renderer and baking; every
/// bulk mutation takes the lock for its whole duration.
pub type ChartLock = Arc<Mutex<Chart>>;

pub struct Chart {
  name: String,

  timing: Timing,

  notes: HashMap<NoteId, Note>,

  dirty: bool,
}

impl Chart {
  pub fn new<T>(name: T, timing: Timing) -> Chart
  where
    T: Into<String>,
  {
    Chart {
      name: name.into(),
      timing,
      notes: HashMap::new(),
      dirty: false,
    }
  }

  pub fn set_name<T>(&mut self, name: T)
  where
    T: Into<String>,
  {
    self.name = name.into();
  }

  pub fn get_name(&self) -> &str {
    self.name.as_str()
  }

  pub fn get_timing(&self) -> &Timing {
    &self.timing
  }

  pub fn beat_info_at(&self, measure: Measure) -> BeatInfo {
    self.timing.beat_info(measure)
  }

  pub fn num_notes(&self) -> usize {
    self.notes.len()
  }

  pub fn add_note(&mut self, note: Note) -> NoteId {
    let id = NoteId::new();
    self.insert_note(id, note);
    id
  }

  /// Inserts a note under a caller-supplied handle. Used when replaying
  /// an edit so that the reinserted notes keep their original handles.
  pub fn insert_note(&mut self, id: NoteId, note: Note) {
    self.notes.insert(id, note);
    self.dirty = true;
  }

  pub fn remove_note(&mut self, id: &NoteId) -> Option<Note> {
    let note = self.notes.remove(id);
    if note.is_some() {
      self.dirty = true;
    }
    note
  }

  pub fn note(&self, id: &NoteId) -> Option<&Note> {
    self.notes.get(id)
  }

  pub fn note_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
    self.notes.get_mut(id)
  }

  pub fn is_dirty(&self) -> bool {
    self.dirty
  }

  pub fn mark_saved(&mut self) {
    self.dirty = false;
  }

  /// Walks a hold gesture chain from `from` following `next_link`,
  /// including `from` itself. The walk is bounded by the collection size
  /// so a corrupt chain cannot loop forever.
  pub fn hold_path_forward(&self, from: NoteId) -> Vec<NoteId> {
    self.hold_path(from, |note| note.get_next_link())
  }

  /// Same as `hold_path_forward` but walks `prev_link` from the end.
  pub fn hold_path_backward(&self, from: NoteId) -> Vec<NoteId> {
    self.hold_path(from, |note| note.get_prev_link())
  }

  fn hold_path<F>(&self, from: NoteId, advance: F) -> Vec<NoteId>
  where
    F: Fn(&Note) -> Option<NoteId>,
  {
    let mut path = Vec::new();
    let mut current = Some(from);
    while let Some(id) = current {
      if path.len() > self.notes.len() {
        break;
      }
      path.push(id);
      current = self.notes.get(&id).and_then(&advance);
    }
    path
  }
}

#[cfg(test)]
mod test {

  use super::note::{Note, NoteType};
  use super::Chart;
  use crate::time::{BeatInfo, Timing};

  fn new_chart() -> Chart {
    Chart::new("untitled", Timing::default())
  }

  #[test]
  pub fn new() {
    let chart = new_chart();
    assert_eq!(chart.get_name(), "untitled");
    assert_eq!(chart.num_notes(), 0);
    assert!(!chart.is_dirty());
  }

  #[test]
  pub fn add_note_marks_dirty() {
    let mut chart = new_chart();
    let id = chart.add_note(Note::new(NoteType::Touch, 0.0, 10, 4));
    assert!(chart.is_dirty());
    assert_eq!(chart.num_notes(), 1);
    assert_eq!(chart.note(&id).map(|note| note.get_position()), Some(10));
  }

  #[test]
  pub fn remove_note() {
    let mut chart = new_chart();
    let id = chart.add_note(Note::new(NoteType::Touch, 0.0, 10, 4));
    chart.mark_saved();
    let removed = chart.remove_note(&id);
    assert_eq!(removed.map(|note| note.get_position()), Some(10));
    assert_eq!(chart.num_notes(), 0);
    assert!(chart.is_dirty());
  }

  #[test]
  pub fn beat_info_delegates_to_timing() {
    let chart = new_chart();
    assert_eq!(chart.beat_info_at(0.5), BeatInfo::new(0, 960));
  }

  #[test]
  pub fn hold_paths() {
    let mut chart = new_chart();
    let start = chart.add_note(Note::new(NoteType::HoldStart, 0.0, 0, 4));
    let joint = chart.add_note(Note::new(NoteType::HoldJoint, 1.0, 2, 4));
    let end = chart.add_note(Note::new(NoteType::HoldEnd, 2.0, 4, 4));
    chart.note_mut(&start).unwrap().set_next_link(Some(joint));
    chart.note_mut(&joint).unwrap().set_prev_link(Some(start));
    chart.note_mut(&joint).unwrap().set_next_link(Some(end));
    chart.note_mut(&end).unwrap().set_prev_link(Some(joint));

    assert_eq!(chart.hold_path_forward(start), vec![start, joint, end]);
    assert_eq!(chart.hold_path_backward(end), vec![end, joint, start]);
  }

  #[test]
  pub fn hold_path_bounded_on_cycle() {
    let mut chart = new_chart();
    let a = chart.add_note(Note::new(NoteType::HoldStart, 0.0, 0, 4));
    let b = chart.add_note(Note::new(NoteType::HoldJoint, 1.0, 2, 4));
    chart.note_mut(&a).unwrap().set_next_link(Some(b));
    chart.note_mut(&b).unwrap().set_next_link(Some(a));

    let path = chart.hold_path_forward(a);
    assert!(path.len() <= chart.num_notes() + 1);
  }
}
