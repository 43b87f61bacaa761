//! Journey progress tracker — fixed list of named stages advancing in
//! lockstep with the script.
//!
//! A tracker is created with all stages pending when a journey starts. The
//! script then walks it strictly forward: a stage goes in-progress, its
//! terminating action fires, it completes, the next goes in-progress. No
//! stage is skipped, revisited, added, or removed.

use serde::{Deserialize, Serialize};

/// Status of one journey stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// One named stage of a journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStep {
    pub label: String,
    pub status: StepStatus,
}

/// Fixed-size stage list for the active journey.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressTracker {
    steps: Vec<ProgressStep>,
}

impl ProgressTracker {
    /// Create a tracker with every stage pending.
    pub fn new(labels: &[&str]) -> Self {
        Self {
            steps: labels
                .iter()
                .map(|label| ProgressStep {
                    label: (*label).to_string(),
                    status: StepStatus::Pending,
                })
                .collect(),
        }
    }

    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Mark stage `index` in-progress. Valid only for a pending stage whose
    /// predecessors are all completed.
    pub fn start(&mut self, index: usize) -> Result<(), String> {
        let step = self
            .steps
            .get(index)
            .ok_or_else(|| format!("no stage at index {index}"))?;
        if step.status != StepStatus::Pending {
            return Err(format!(
                "stage {index} ({}) is {}, cannot start",
                step.label, step.status
            ));
        }
        if self.steps[..index]
            .iter()
            .any(|s| s.status != StepStatus::Completed)
        {
            return Err(format!(
                "cannot start stage {index} ({}) before earlier stages complete",
                step.label
            ));
        }
        self.steps[index].status = StepStatus::InProgress;
        Ok(())
    }

    /// Mark stage `index` completed. Valid only for the in-progress stage.
    pub fn complete(&mut self, index: usize) -> Result<(), String> {
        let step = self
            .steps
            .get(index)
            .ok_or_else(|| format!("no stage at index {index}"))?;
        if step.status != StepStatus::InProgress {
            return Err(format!(
                "stage {index} ({}) is {}, cannot complete",
                step.label, step.status
            ));
        }
        self.steps[index].status = StepStatus::Completed;
        Ok(())
    }

    pub fn status(&self, index: usize) -> Option<StepStatus> {
        self.steps.get(index).map(|s| s.status)
    }

    /// Index of the stage currently in progress, if any.
    pub fn current(&self) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.status == StepStatus::InProgress)
    }

    pub fn all_completed(&self) -> bool {
        !self.steps.is_empty()
            && self
                .steps
                .iter()
                .all(|s| s.status == StepStatus::Completed)
    }
}
