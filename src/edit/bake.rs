//! Baking a hold gesture: synthesizing the joint notes between a hold's
//! start and end anchors and splicing them into the gesture chain as one
//! undoable edit.

use log::{debug, trace};

use crate::chart::note::{Note, NoteId, NoteType};
use crate::chart::ring;
use crate::chart::{Chart, ChartLock};
use crate::edit::{Operation, OperationManager};
use crate::time::{Measure, Timing};

/// Quantization granularity of the lerp strategy, in measures. Fixed and
/// independent of the hold's deltas.
const LERP_INTERVAL: f64 = 0.015_625; // 1/64

/// One planned joint, not yet materialized into the chart.
#[derive(Debug, Clone, PartialEq)]
struct JointSpec {
  measure: Measure,
  position: i32,
  size: i32,
  discrete_change: bool,
}

/// Time increment and per-step integer deltas for the step strategies.
struct StepPlan {
  interval: f64,
  position_step: i32,
  size_step: i32,
}

impl StepPlan {
  /// The faster-changing axis steps by 2 and the other by 1, a coarse
  /// approximation that only captures which axis changes faster. Only the
  /// 2:1 ratio is supported; callers wanting exact per-note steps use the
  /// asymmetric plan instead.
  fn symmetric(hold_length: f32, position_change: i32, size_change: i32) -> StepPlan {
    assert!(hold_length > 0.0);
    assert!(position_change != 0);
    let position_faster = position_change.abs() > size_change.abs();
    StepPlan {
      interval: f64::from(hold_length) / f64::from(position_change.abs()),
      position_step: if position_faster { 2 } else { 1 } * position_change.signum(),
      size_step: if position_faster { 1 } else { 2 } * size_change.signum(),
    }
  }

  /// One whole-number step per generated note on whichever axis changes.
  fn asymmetric(hold_length: f32, position_change: i32, size_change: i32) -> StepPlan {
    assert!(hold_length > 0.0);
    assert!(position_change != 0 || size_change != 0);
    let largest_change = position_change.abs().max(size_change.abs());
    StepPlan {
      interval: f64::from(hold_length) / f64::from(largest_change),
      position_step: position_change.signum(),
      size_step: size_change.signum(),
    }
  }
}

/// Driving loop shared by all strategies: advance from just after the
/// start anchor in `interval` increments, stopping at the end anchor.
fn plan_joints<F>(
  timing: &Timing,
  start_measure: Measure,
  end_measure: Measure,
  interval: f64,
  mut joint_at: F,
) -> Vec<JointSpec>
where
  F: FnMut(Measure) -> JointSpec,
{
  let end_beat = timing.beat_info(end_measure);
  let mut joints = Vec::new();
  let mut i = f64::from(start_measure) + interval;
  while i < f64::from(end_measure) {
    let measure = i as Measure;
    // repeated addition accumulates error; a candidate landing just short
    // of the end anchor would otherwise produce two segments on the same
    // beat
    if timing.beat_info(measure) == end_beat {
      break;
    }
    joints.push(joint_at(measure));
    i += interval;
  }
  joints
}

fn plan_step(start: &Note, end: &Note, plan: &StepPlan, timing: &Timing) -> Vec<JointSpec> {
  let mut position = start.get_position();
  let mut size = start.get_size();
  plan_joints(
    timing,
    start.get_measure(),
    end.get_measure(),
    plan.interval,
    |measure| {
      position += plan.position_step;
      size += plan.size_step;
      JointSpec {
        measure,
        position: ring::wrap(position),
        size: ring::wrap(size),
        discrete_change: true,
      }
    },
  )
}

fn plan_lerp(start: &Note, end: &Note, timing: &Timing) -> Vec<JointSpec> {
  let start_measure = start.get_measure();
  let end_measure = end.get_measure();

  // both edges of the hold travel their own shortest arc; the size is
  // recovered as the distance between them
  let leading_edge = (start.get_position(), end.get_position());
  let trailing_edge = (
    start.get_position() + start.get_size(),
    end.get_position() + end.get_size(),
  );

  plan_joints(timing, start_measure, end_measure, LERP_INTERVAL, |measure| {
    let t = (measure - start_measure) / (end_measure - start_measure);
    let position = ring::shortest_lerp(leading_edge.0, leading_edge.1, t).round() as i32;
    let size = ring::shortest_lerp(trailing_edge.0, trailing_edge.1, t).round() as i32 - position;
    JointSpec {
      measure,
      position: ring::wrap(position),
      size: ring::wrap(size),
      discrete_change: false,
    }
  })
}

/// Materializes the planned joints between `start` and `end`, in ascending
/// time order, keeping the gesture chain a single simple path after every
/// insertion. Returns the inserted notes in splice order.
fn splice(
  chart: &mut Chart,
  start: NoteId,
  end: NoteId,
  joints: &[JointSpec],
) -> Vec<(NoteId, Note)> {
  let mut last = start;
  let mut inserted = Vec::with_capacity(joints.len());

  for joint in joints {
    let id = NoteId::new();
    let mut note = Note::new(NoteType::HoldJoint, joint.measure, joint.position, joint.size);
    note.set_discrete_change(joint.discrete_change);
    note.set_prev_link(Some(last));
    note.set_next_link(Some(end));

    // the end anchor's back link is rewritten on every iteration; only
    // the final value, the last inserted joint, is the correct terminal
    // predecessor once the loop ends
    chart
      .note_mut(&last)
      .expect("hold chain note missing from chart")
      .set_next_link(Some(id));
    chart
      .note_mut(&end)
      .expect("hold end note missing from chart")
      .set_prev_link(Some(id));

    trace!(
      "joint at {}: position={} size={}",
      joint.measure,
      joint.position,
      joint.size
    );

    inserted.push((id, note.clone()));
    chart.insert_note(id, note);
    last = id;
  }

  inserted
}

/// One baked hold, recorded after the splice has been applied. Stores the
/// handles and note values needed to replay the splice exactly; the chart
/// keeps ownership of the notes themselves.
pub struct BakeHoldOperation {
  start: NoteId,
  end: NoteId,
  inserted: Vec<(NoteId, Note)>,
}

impl BakeHoldOperation {
  fn new(start: NoteId, end: NoteId, inserted: Vec<(NoteId, Note)>) -> BakeHoldOperation {
    BakeHoldOperation {
      start,
      end,
      inserted,
    }
  }

  pub fn num_inserted(&self) -> usize {
    self.inserted.len()
  }
}

impl Operation for BakeHoldOperation {
  fn name(&self) -> &str {
    "bake hold"
  }

  fn undo(&self, chart: &mut Chart) {
    for (id, _) in self.inserted.iter() {
      chart.remove_note(id);
    }
    chart
      .note_mut(&self.start)
      .expect("hold start note missing from chart")
      .set_next_link(Some(self.end));
    chart
      .note_mut(&self.end)
      .expect("hold end note missing from chart")
      .set_prev_link(Some(self.start));
  }

  fn redo(&self, chart: &mut Chart) {
    // literal replay of the splice: the stored notes carry the links they
    // had at creation time and each iteration fixes up the predecessor's
    // forward link, exactly as the original insertion did
    let mut last = self.start;
    for (id, note) in self.inserted.iter() {
      chart
        .note_mut(&last)
        .expect("hold chain note missing from chart")
        .set_next_link(Some(*id));
      chart
        .note_mut(&self.end)
        .expect("hold end note missing from chart")
        .set_prev_link(Some(*id));
      chart.insert_note(*id, note.clone());
      last = *id;
    }
  }
}

/// Generates and splices under exclusive access to the chart; the lock
/// drops before the operation is handed back for the undo stack.
fn bake<F>(chart: &ChartLock, start: NoteId, end: NoteId, plan: F) -> BakeHoldOperation
where
  F: FnOnce(&Note, &Note, &Timing) -> Vec<JointSpec>,
{
  let mut chart = chart.lock().expect("chart lock poisoned");

  let joints = {
    let start_note = chart.note(&start).expect("hold start note missing from chart");
    let end_note = chart.note(&end).expect("hold end note missing from chart");
    assert!(start_note.get_measure() < end_note.get_measure());
    plan(start_note, end_note, chart.get_timing())
  };

  let inserted = splice(&mut chart, start, end, &joints);
  BakeHoldOperation::new(start, end, inserted)
}

/// Bakes with 2:1 stepping, see `StepPlan::symmetric`.
pub fn bake_step_symmetric(
  chart: &ChartLock,
  start: NoteId,
  end: NoteId,
  hold_length: f32,
  position_change: i32,
  size_change: i32,
  operations: &mut OperationManager,
) {
  let plan = StepPlan::symmetric(hold_length, position_change, size_change);
  let operation = bake(chart, start, end, |start_note, end_note, timing| {
    plan_step(start_note, end_note, &plan, timing)
  });
  debug!(
    "bake symmetric: {} joints inserted",
    operation.num_inserted()
  );
  operations.push(Box::new(operation));
}

/// Bakes with unit stepping on whichever axis changes, see
/// `StepPlan::asymmetric`.
pub fn bake_step_asymmetric(
  chart: &ChartLock,
  start: NoteId,
  end: NoteId,
  hold_length: f32,
  position_change: i32,
  size_change: i32,
  operations: &mut OperationManager,
) {
  let plan = StepPlan::asymmetric(hold_length, position_change, size_change);
  let operation = bake(chart, start, end, |start_note, end_note, timing| {
    plan_step(start_note, end_note, &plan, timing)
  });
  debug!(
    "bake asymmetric: {} joints inserted",
    operation.num_inserted()
  );
  operations.push(Box::new(operation));
}

/// Bakes a joint every 1/64 measure, interpolating both hold edges along
/// their shortest arc around the track.
pub fn bake_lerp_round(
  chart: &ChartLock,
  start: NoteId,
  end: NoteId,
  operations: &mut OperationManager,
) {
  let operation = bake(chart, start, end, |start_note, end_note, timing| {
    plan_lerp(start_note, end_note, timing)
  });
  debug!("bake lerp: {} joints inserted", operation.num_inserted());
  operations.push(Box::new(operation));
}
