//! Workout plan owned by a session
//!
//! Days are addressed by position. Adaptations go through `modifier` and the
//! result replaces the day at the same index.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::energy::EnergyLevel;
use crate::modifier::{self, ModifyError};
use crate::models::{WorkoutDay, WorkoutSuggestion};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
  #[error("No workout at position {index} (plan has {len})")]
  IndexOutOfRange { index: usize, len: usize },

  #[error(transparent)]
  Modify(#[from] ModifyError),
}

impl Serialize for ScheduleError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSchedule {
  days: Vec<WorkoutDay>,
  current: usize,
}

impl WorkoutSchedule {
  pub fn new(days: Vec<WorkoutDay>) -> Self {
    Self { days, current: 0 }
  }

  pub fn days(&self) -> &[WorkoutDay] {
    &self.days
  }

  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn current(&self) -> Option<&WorkoutDay> {
    self.days.get(self.current)
  }

  pub fn get(&self, index: usize) -> Result<&WorkoutDay, ScheduleError> {
    self.days.get(index).ok_or(ScheduleError::IndexOutOfRange {
      index,
      len: self.days.len(),
    })
  }

  /// Move the selection to `index`
  pub fn select(&mut self, index: usize) -> Result<&WorkoutDay, ScheduleError> {
    self.get(index)?;
    self.current = index;
    self.get(index)
  }

  /// Step forward, staying on the last day
  pub fn next(&mut self) -> Option<&WorkoutDay> {
    if self.current + 1 < self.days.len() {
      self.current += 1;
    }
    self.current()
  }

  /// Step back, staying on the first day
  pub fn previous(&mut self) -> Option<&WorkoutDay> {
    self.current = self.current.saturating_sub(1);
    self.current()
  }

  /// Adapt the day at `index` and commit the result in place
  pub fn adapt(
    &mut self,
    index: usize,
    level: EnergyLevel,
    suggestion: Option<&WorkoutSuggestion>,
  ) -> Result<&WorkoutDay, ScheduleError> {
    let day = self.get(index)?;
    let adapted = modifier::modify(day, level, suggestion)?;
    info!(index, %level, title = %adapted.title, "committed adapted workout");
    self.days[index] = adapted;
    self.get(index)
  }

  /// Adapt the currently selected day
  pub fn adapt_current(
    &mut self,
    level: EnergyLevel,
    suggestion: Option<&WorkoutSuggestion>,
  ) -> Result<&WorkoutDay, ScheduleError> {
    self.adapt(self.current, level, suggestion)
  }

  /// Put back the original plan at `index`. Returns `false` when the day was
  /// never adapted.
  pub fn restore(&mut self, index: usize) -> Result<bool, ScheduleError> {
    let day = self.get(index)?;
    match modifier::restore(day) {
      Ok(original) => {
        info!(index, title = %original.title, "restored original workout");
        self.days[index] = original;
        Ok(true)
      }
      Err(ModifyError::NothingToRestore) => Ok(false),
      Err(e) => Err(e.into()),
    }
  }

  pub fn restore_current(&mut self) -> Result<bool, ScheduleError> {
    self.restore(self.current)
  }
}
