//! Core state for the Nexus study tracker: a login-gated, single-task
//! timer with pause/resume, a per-user profile survey store, and the
//! account/session flows around an external identity provider.
//!
//! The crate holds no UI. Screens call commands on [`TaskController`],
//! re-render from the snapshots it pushes to subscribers, and go
//! through [`persistence::ProfileSurveyStore`] and
//! [`auth::AccountManager`] for the survey and account flows.

pub mod app;
pub mod auth;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod ticker;

pub use app::TaskController;
pub use auth::{AccountManager, AuthUser, IdentityService};
pub use domain::{format_elapsed, ProfileSurveyData, Session, TaskMode, TaskState};
pub use error::{AuthError, ValidationError};
pub use persistence::{FileKvStore, KvStore, MemoryKvStore, ProfileSurveyStore};
