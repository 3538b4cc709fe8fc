pub mod files;
pub mod kv;
pub mod survey_store;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, read_bytes};
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use survey_store::{survey_key, ProfileSurveyStore, ANONYMOUS_USER};
