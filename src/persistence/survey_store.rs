use anyhow::{Context, Result};
use log::warn;

use super::kv::KvStore;
use crate::domain::ProfileSurveyData;

/// Storage key used when no user identity is available
pub const ANONYMOUS_USER: &str = "anonymous";

/// Storage key for a user's survey record
pub fn survey_key(user_id: Option<&str>) -> String {
    format!("profileSurvey.{}", user_id.unwrap_or(ANONYMOUS_USER))
}

/// Loads, validates, and saves one user's [`ProfileSurveyData`].
///
/// Mirrors the survey screen lifecycle: the record is read once when
/// the store is created, fields are edited freely through `data_mut`,
/// and the whole record is written back only on an explicit `save`.
/// Load and save are synchronous; `save` takes `&mut self`, so two
/// saves can never be in flight at once on the same store.
pub struct ProfileSurveyStore<S: KvStore> {
    store: S,
    key: String,
    data: ProfileSurveyData,
}

impl<S: KvStore> ProfileSurveyStore<S> {
    /// Open the store for a user (or the anonymous fallback) and load
    /// whatever record is already present
    pub fn new(store: S, user_id: Option<&str>) -> Self {
        let mut this = Self {
            store,
            key: survey_key(user_id),
            data: ProfileSurveyData::default(),
        };
        this.load();
        this
    }

    /// Re-read the stored record. A missing key keeps the current
    /// (all-empty on first load) record; a record that fails to decode
    /// is discarded the same way, with a warning in the log. Neither
    /// case surfaces an error.
    pub fn load(&mut self) {
        let Some(raw) = self.store.get(&self.key) else {
            return;
        };

        match serde_json::from_slice(&raw) {
            Ok(decoded) => self.data = decoded,
            Err(err) => warn!("Ignoring undecodable survey record under {}: {err}", self.key),
        }
    }

    /// Validate and persist the whole record, overwriting any prior
    /// value under the key. Nothing is written when validation fails;
    /// the error names the first failing question.
    pub fn save(&mut self) -> Result<()> {
        self.data.validate()?;

        let raw = serde_json::to_vec(&self.data).context("Failed to encode survey record")?;
        self.store
            .set(&self.key, &raw)
            .with_context(|| format!("Failed to write survey record under {}", self.key))?;
        Ok(())
    }

    pub fn data(&self) -> &ProfileSurveyData {
        &self.data
    }

    /// Field edits go through here; nothing is validated until `save`
    pub fn data_mut(&mut self) -> &mut ProfileSurveyData {
        &mut self.data
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::persistence::kv::MemoryKvStore;
    use pretty_assertions::assert_eq;

    fn valid_record() -> ProfileSurveyData {
        ProfileSurveyData {
            learning_duration: "2 hours after dinner".to_string(),
            high_demanded: "7".to_string(),
            usual_efficiency: "5".to_string(),
            energy_when_learning: "8".to_string(),
            profession: "engineer".to_string(),
        }
    }

    #[test]
    fn test_key_is_scoped_per_user() {
        assert_eq!(survey_key(Some("abc")), "profileSurvey.abc");
        assert_eq!(survey_key(None), "profileSurvey.anonymous");
    }

    #[test]
    fn test_load_missing_record_keeps_defaults() {
        let store = ProfileSurveyStore::new(MemoryKvStore::new(), Some("u1"));
        assert_eq!(store.data(), &ProfileSurveyData::default());
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let mut store = ProfileSurveyStore::new(MemoryKvStore::new(), Some("u1"));
        *store.data_mut() = valid_record();
        store.save().unwrap();

        // A fresh store over the same backing sees identical field values
        let ProfileSurveyStore { store: backing, .. } = store;
        let reloaded = ProfileSurveyStore::new(backing, Some("u1"));
        assert_eq!(reloaded.data(), &valid_record());
    }

    #[test]
    fn test_boundary_scale_values_roundtrip() {
        for value in 1..=10 {
            let mut store = ProfileSurveyStore::new(MemoryKvStore::new(), Some("u1"));
            let text = value.to_string();
            store.data_mut().high_demanded = text.clone();
            store.data_mut().usual_efficiency = text.clone();
            store.data_mut().energy_when_learning = text.clone();
            store.save().unwrap();

            let ProfileSurveyStore { store: backing, .. } = store;
            let reloaded = ProfileSurveyStore::new(backing, Some("u1"));
            assert_eq!(reloaded.data().high_demanded, text);
        }
    }

    #[test]
    fn test_invalid_save_writes_nothing() {
        let mut backing = MemoryKvStore::new();
        backing.set(&survey_key(Some("u1")), b"not json").unwrap();

        let mut store = ProfileSurveyStore::new(backing, Some("u1"));
        *store.data_mut() = valid_record();
        store.data_mut().high_demanded = "11".to_string();

        let err = store.save().unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(
            validation,
            &ValidationError::ScaleOutOfRange { question: 2 }
        );

        // The prior stored bytes are untouched
        let ProfileSurveyStore { store: backing, .. } = store;
        assert_eq!(
            backing.get(&survey_key(Some("u1"))).as_deref(),
            Some(b"not json".as_slice())
        );
    }

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        let mut backing = MemoryKvStore::new();
        backing
            .set(&survey_key(Some("u1")), b"{\"highDemanded\": 7}")
            .unwrap();

        let store = ProfileSurveyStore::new(backing, Some("u1"));
        assert_eq!(store.data(), &ProfileSurveyData::default());
    }

    #[test]
    fn test_save_overwrites_prior_record() {
        let mut store = ProfileSurveyStore::new(MemoryKvStore::new(), None);
        *store.data_mut() = valid_record();
        store.save().unwrap();

        store.data_mut().profession = "florist".to_string();
        store.save().unwrap();

        let ProfileSurveyStore { store: backing, .. } = store;
        let reloaded = ProfileSurveyStore::new(backing, None);
        assert_eq!(reloaded.data().profession, "florist");
    }

    #[test]
    fn test_users_do_not_share_records() {
        let mut backing = MemoryKvStore::new();
        {
            let mut store = ProfileSurveyStore::new(&mut backing, Some("u1"));
            *store.data_mut() = valid_record();
            store.save().unwrap();
        }

        let other = ProfileSurveyStore::new(&mut backing, Some("u2"));
        assert_eq!(other.data(), &ProfileSurveyData::default());
    }
}
