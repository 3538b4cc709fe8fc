use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::ValidationError;

/// Externally visible mode of the task/timer, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    /// No task exists
    Idle,
    /// A task exists and the timer is counting
    Running,
    /// A task exists, the timer is stopped, and the post-pause menu
    /// (Continue / Modify / Done / Delete) is visible
    Paused,
}

/// The single task record plus its timer.
///
/// At most one task is live at a time. The timer fields always exist
/// but are only meaningful while `has_active_task` is true. Invariant:
/// `show_after_pause_options` implies `!is_timer_running`. The flag is
/// tracked on its own rather than derived, since every transition sets
/// both flags together.
#[derive(Debug, Clone)]
pub struct TaskState {
    /// Internal ID, regenerated on each create (never displayed)
    pub id: Uuid,
    /// Display name; enforced non-empty at commit time, stored un-trimmed
    pub name: String,
    /// Optional free-text details
    pub details: String,
    /// Planned hours, kept as raw text (blank renders as "0")
    pub duration_hours: String,
    /// Planned minutes, kept as raw text (blank renders as "0")
    pub duration_minutes: String,
    /// True iff a task currently exists
    pub has_active_task: bool,
    /// Whole seconds accumulated while running
    pub elapsed_seconds: u64,
    pub is_timer_running: bool,
    /// True exactly when paused with the post-pause menu visible
    pub show_after_pause_options: bool,
    /// When the current task was created
    pub created_at: DateTime<Local>,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            details: String::new(),
            duration_hours: String::new(),
            duration_minutes: String::new(),
            has_active_task: false,
            elapsed_seconds: 0,
            is_timer_running: false,
            show_after_pause_options: false,
            created_at: Local::now(),
        }
    }
}

impl TaskState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the externally visible mode from the state flags
    pub fn mode(&self) -> TaskMode {
        if !self.has_active_task {
            TaskMode::Idle
        } else if self.is_timer_running {
            TaskMode::Running
        } else {
            TaskMode::Paused
        }
    }

    /// Commit a new task and start the timer fresh.
    ///
    /// Rejects a whitespace-only name without touching any state.
    /// Committing over an existing task replaces it and restarts the
    /// counter.
    pub fn create(
        &mut self,
        name: &str,
        details: &str,
        hours: &str,
        minutes: &str,
    ) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }

        self.id = Uuid::new_v4();
        self.name = name.to_string();
        self.details = details.to_string();
        self.duration_hours = hours.to_string();
        self.duration_minutes = minutes.to_string();
        self.has_active_task = true;
        self.elapsed_seconds = 0;
        self.is_timer_running = true;
        self.show_after_pause_options = false;
        self.created_at = Local::now();
        Ok(())
    }

    /// Overwrite the editable fields of the current task in place.
    ///
    /// Run state, elapsed seconds, id and created_at are untouched.
    /// Returns false (and changes nothing) when no task is active.
    pub fn modify(
        &mut self,
        name: &str,
        details: &str,
        hours: &str,
        minutes: &str,
    ) -> Result<bool, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        if !self.has_active_task {
            return Ok(false);
        }

        self.name = name.to_string();
        self.details = details.to_string();
        self.duration_hours = hours.to_string();
        self.duration_minutes = minutes.to_string();
        Ok(true)
    }

    /// Pause a running timer or resume a paused one.
    ///
    /// Pausing reveals the post-pause menu; resuming hides it.
    /// Returns false when no task is active.
    pub fn toggle_running(&mut self) -> bool {
        if !self.has_active_task {
            return false;
        }

        if self.is_timer_running {
            self.is_timer_running = false;
            self.show_after_pause_options = true;
        } else {
            self.is_timer_running = true;
            self.show_after_pause_options = false;
        }
        true
    }

    /// Resume from pause (the "Continue" action). No-op when no task
    /// is active or the timer is already running.
    pub fn resume(&mut self) -> bool {
        if !self.has_active_task || self.is_timer_running {
            return false;
        }

        self.is_timer_running = true;
        self.show_after_pause_options = false;
        true
    }

    /// Force Paused mode ahead of presenting the edit form.
    ///
    /// Task fields are not touched here; the edit itself commits via
    /// [`TaskState::modify`]. Returns true when the caller should show
    /// the form.
    pub fn request_modify(&mut self) -> bool {
        if !self.has_active_task {
            return false;
        }

        self.is_timer_running = false;
        self.show_after_pause_options = true;
        true
    }

    /// Finish the current task, resetting every field to its zero value.
    /// Returns false when there was nothing to finish.
    pub fn complete(&mut self) -> bool {
        self.clear()
    }

    /// Discard the current task. Same reset as [`TaskState::complete`];
    /// kept as a separate entry point so the two actions can diverge
    /// later (e.g. completion history).
    pub fn delete(&mut self) -> bool {
        self.clear()
    }

    fn clear(&mut self) -> bool {
        if !self.has_active_task {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Advance the counter by one second, iff a task exists and the
    /// timer is running. Safe to call on every external tick; while
    /// paused or idle it never mutates state. Returns whether the
    /// counter advanced.
    pub fn tick(&mut self) -> bool {
        if self.has_active_task && self.is_timer_running {
            self.elapsed_seconds += 1;
            true
        } else {
            false
        }
    }

    /// Elapsed time rendered for display, e.g. "1m 05s"
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Planned duration rendered for display, e.g. "Planned: 1 h 30 min".
    /// Blank duration fields read as zero so the label never looks broken.
    pub fn planned_label(&self) -> String {
        format!(
            "Planned: {} h {} min",
            blank_as_zero(&self.duration_hours),
            blank_as_zero(&self.duration_minutes)
        )
    }
}

/// Render a second count as "{m}m {ss}s", adding an hour part once the
/// count reaches an hour: "{h}h {mm}m {ss}s". No upper bound; large
/// counts simply produce a large hour figure.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, secs)
    } else {
        format!("{}m {:02}s", minutes, secs)
    }
}

/// Display rule for the raw duration text fields: blank means zero
fn blank_as_zero(raw: &str) -> &str {
    if raw.trim().is_empty() {
        "0"
    } else {
        raw
    }
}
