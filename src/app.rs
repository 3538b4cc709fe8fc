use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{TaskMode, TaskState};
use crate::error::ValidationError;
use crate::ticker::{self, Ticker};

/// Callback invoked with a state snapshot after each effective change
pub type Listener = Box<dyn FnMut(&TaskState) + Send>;

struct Shared {
    state: Mutex<TaskState>,
    listeners: Mutex<Vec<Listener>>,
}

/// Thread-safe owner of the single task/timer record.
///
/// Commands and ticks serialize on one mutex, so no operation ever
/// overlaps another. Handles are cheap clones over shared state: the
/// UI layer keeps one per screen while the ticker thread drives
/// another, and elapsed time keeps accruing across navigation for as
/// long as any handle lives.
///
/// The controller is a plain state holder with an explicit
/// subscribe/notify surface; re-rendering on notification is the
/// caller's business.
#[derive(Clone)]
pub struct TaskController {
    shared: Arc<Shared>,
    _ticker: Option<Arc<Ticker>>,
}

impl TaskController {
    /// Controller without a tick source. Embedders (and tests) drive
    /// [`TaskController::tick`] themselves, so no real time needs to
    /// pass to exercise the timer.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(TaskState::new()),
                listeners: Mutex::new(Vec::new()),
            }),
            _ticker: None,
        }
    }

    /// Production constructor: starts the owned one-second ticker.
    /// The ticker thread stops once every handle is dropped.
    pub fn spawn() -> Result<Self> {
        Self::with_interval(ticker::tick_duration())
    }

    /// Like [`TaskController::spawn`] with a custom tick interval
    pub fn with_interval(interval: Duration) -> Result<Self> {
        let controller = Self::new();
        let driven = controller.clone();
        let ticker = Ticker::spawn(interval, move || driven.tick())?;

        Ok(Self {
            shared: controller.shared,
            _ticker: Some(Arc::new(ticker)),
        })
    }

    /// Register a listener; it receives a snapshot after every
    /// state-changing command and every tick that advanced the counter
    pub fn subscribe<F>(&self, listener: F)
    where
        F: FnMut(&TaskState) + Send + 'static,
    {
        self.lock_listeners().push(Box::new(listener));
    }

    /// Cloned copy of the current state for rendering
    pub fn snapshot(&self) -> TaskState {
        self.lock_state().clone()
    }

    pub fn mode(&self) -> TaskMode {
        self.lock_state().mode()
    }

    /// Commit a new task; see [`TaskState::create`]
    pub fn create(
        &self,
        name: &str,
        details: &str,
        hours: &str,
        minutes: &str,
    ) -> Result<(), ValidationError> {
        let snapshot = {
            let mut state = self.lock_state();
            state.create(name, details, hours, minutes)?;
            state.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }

    /// Commit an edit of the current task; see [`TaskState::modify`]
    pub fn modify(
        &self,
        name: &str,
        details: &str,
        hours: &str,
        minutes: &str,
    ) -> Result<(), ValidationError> {
        let snapshot = {
            let mut state = self.lock_state();
            if !state.modify(name, details, hours, minutes)? {
                return Ok(());
            }
            state.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }

    /// Pause a running timer or resume a paused one
    pub fn toggle_running(&self) {
        self.apply(TaskState::toggle_running);
    }

    /// The "Continue" action: resume from pause
    pub fn resume(&self) {
        self.apply(TaskState::resume);
    }

    /// Force pause ahead of editing; true tells the caller to present
    /// the edit form
    pub fn request_modify(&self) -> bool {
        self.apply(TaskState::request_modify)
    }

    /// The "Done" action: finish and clear the task
    pub fn complete(&self) {
        self.apply(TaskState::complete);
    }

    /// The "Delete" action: discard and clear the task
    pub fn delete(&self) {
        self.apply(TaskState::delete);
    }

    /// Advance the timer by one second if it is running. O(1), no I/O.
    pub fn tick(&self) {
        self.apply(TaskState::tick);
    }

    /// Run a state transition and notify listeners iff it changed
    /// anything. Returns what the transition reported.
    fn apply(&self, op: fn(&mut TaskState) -> bool) -> bool {
        let snapshot = {
            let mut state = self.lock_state();
            if !op(&mut state) {
                return false;
            }
            state.clone()
        };
        self.notify(&snapshot);
        true
    }

    fn notify(&self, snapshot: &TaskState) {
        for listener in self.lock_listeners().iter_mut() {
            listener(snapshot);
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TaskState> {
        match self.shared.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<Listener>> {
        match self.shared.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for TaskController {
    fn default() -> Self {
        Self::new()
    }
}
