pub mod session;
pub mod survey;
pub mod task;

pub use session::Session;
pub use survey::ProfileSurveyData;
pub use task::{format_elapsed, TaskMode, TaskState};
