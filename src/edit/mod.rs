pub mod bake;

use log::debug;

use crate::chart::{Chart, ChartLock};

/// One reversible edit. Operations are recorded after their forward
/// effect has already been applied to the chart, so `redo` is only ever
/// called after a matching `undo`.
pub trait Operation {
  fn name(&self) -> &str;

  fn undo(&self, chart: &mut Chart);

  fn redo(&self, chart: &mut Chart);
}

pub struct OperationManager {
  undo_stack: Vec<Box<dyn Operation>>,
  redo_stack: Vec<Box<dyn Operation>>,
}

impl OperationManager {
  pub fn new() -> OperationManager {
    OperationManager {
      undo_stack: Vec::new(),
      redo_stack: Vec::new(),
    }
  }

  /// Registers an already-applied operation as the most recent edit.
  /// Anything on the redo stack is no longer reachable and is dropped.
  pub fn push(&mut self, operation: Box<dyn Operation>) {
    self.redo_stack.clear();
    self.undo_stack.push(operation);
  }

  pub fn can_undo(&self) -> bool {
    !self.undo_stack.is_empty()
  }

  pub fn can_redo(&self) -> bool {
    !self.redo_stack.is_empty()
  }

  pub fn undo(&mut self, chart: &ChartLock) -> bool {
    match self.undo_stack.pop() {
      Some(operation) => {
        {
          let mut chart = chart.lock().expect("chart lock poisoned");
          operation.undo(&mut chart);
        }
        debug!("undo: {}", operation.name());
        self.redo_stack.push(operation);
        true
      }
      None => false,
    }
  }

  pub fn redo(&mut self, chart: &ChartLock) -> bool {
    match self.redo_stack.pop() {
      Some(operation) => {
        {
          let mut chart = chart.lock().expect("chart lock poisoned");
          operation.redo(&mut chart);
        }
        debug!("redo: {}", operation.name());
        self.undo_stack.push(operation);
        true
      }
      None => false,
    }
  }
}

#[cfg(test)]
mod test {

  use std::sync::{Arc, Mutex};

  use super::{Operation, OperationManager};
  use crate::chart::{Chart, ChartLock};
  use crate::time::Timing;

  struct RenameOperation {
    before: String,
    after: String,
  }

  impl Operation for RenameOperation {
    fn name(&self) -> &str {
      "rename chart"
    }

    fn undo(&self, chart: &mut Chart) {
      chart.set_name(self.before.as_str());
    }

    fn redo(&self, chart: &mut Chart) {
      chart.set_name(self.after.as_str());
    }
  }

  fn rename(after: &str) -> Box<RenameOperation> {
    Box::new(RenameOperation {
      before: "untitled".to_string(),
      after: after.to_string(),
    })
  }

  fn new_chart() -> ChartLock {
    Arc::new(Mutex::new(Chart::new("renamed", Timing::default())))
  }

  #[test]
  pub fn new() {
    let manager = OperationManager::new();
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
  }

  #[test]
  pub fn undo_redo_cycle() {
    let chart = new_chart();
    let mut manager = OperationManager::new();
    manager.push(rename("renamed"));

    assert!(manager.undo(&chart));
    assert_eq!(chart.lock().unwrap().get_name(), "untitled");
    assert!(!manager.can_undo());
    assert!(manager.can_redo());

    assert!(manager.redo(&chart));
    assert_eq!(chart.lock().unwrap().get_name(), "renamed");
    assert!(manager.can_undo());
    assert!(!manager.can_redo());
  }

  #[test]
  pub fn undo_empty_stack() {
    let chart = new_chart();
    let mut manager = OperationManager::new();
    assert!(!manager.undo(&chart));
    assert!(!manager.redo(&chart));
  }

  #[test]
  pub fn push_clears_redo_stack() {
    let chart = new_chart();
    let mut manager = OperationManager::new();
    manager.push(rename("renamed"));
    manager.undo(&chart);
    assert!(manager.can_redo());

    manager.push(rename("renamed again"));
    assert!(!manager.can_redo());
  }
}
