use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Answers to the five profile survey questions.
///
/// The three scale answers are semantically integers in 1-10 but stay
/// text so the editing layer can bind fields directly; nothing is
/// validated while typing. Serialized field names are camelCase to
/// stay compatible with records written by earlier app versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSurveyData {
    /// Question 1: preferred learning time window (free text)
    pub learning_duration: String,
    /// Question 2: self-rated demand level, 1-10
    pub high_demanded: String,
    /// Question 3: self-rated usual efficiency, 1-10
    pub usual_efficiency: String,
    /// Question 4: daily energy level when learning, 1-10
    pub energy_when_learning: String,
    /// Question 5: profession (free text)
    pub profession: String,
}

impl ProfileSurveyData {
    /// Check the three scale answers, in question order. The first
    /// failure wins; free-text answers are never validated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_scale(&self.high_demanded, 2)?;
        check_scale(&self.usual_efficiency, 3)?;
        check_scale(&self.energy_when_learning, 4)?;
        Ok(())
    }
}

/// A scale answer must parse as a base-10 integer in 1-10 after
/// trimming surrounding whitespace
fn check_scale(raw: &str, question: u8) -> Result<(), ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(n) if (1..=10).contains(&n) => Ok(()),
        _ => Err(ValidationError::ScaleOutOfRange { question }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(high: &str, efficiency: &str, energy: &str) -> ProfileSurveyData {
        ProfileSurveyData {
            learning_duration: "evenings".to_string(),
            high_demanded: high.to_string(),
            usual_efficiency: efficiency.to_string(),
            energy_when_learning: energy.to_string(),
            profession: "librarian".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_boundary_values() {
        assert!(filled("1", "10", "5").validate().is_ok());
        assert!(filled("10", "1", "10").validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_padded_numbers() {
        assert!(filled(" 5 ", "\t7", "9 ").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = filled("11", "5", "5").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 2 });

        let err = filled("5", "0", "5").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 3 });

        let err = filled("5", "5", "-3").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 4 });
    }

    #[test]
    fn test_validate_rejects_non_numeric() {
        let err = filled("", "5", "5").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 2 });

        let err = filled("5", "often", "5").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 3 });

        let err = filled("5", "5", "7.5").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 4 });
    }

    #[test]
    fn test_first_failing_question_wins() {
        let err = filled("99", "also bad", "0").validate().unwrap_err();
        assert_eq!(err, ValidationError::ScaleOutOfRange { question: 2 });
    }

    #[test]
    fn test_free_text_fields_are_unchecked() {
        let mut data = filled("5", "5", "5");
        data.learning_duration = String::new();
        data.profession = String::new();
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&filled("5", "6", "7")).unwrap();
        assert!(json.contains("\"learningDuration\""));
        assert!(json.contains("\"highDemanded\""));
        assert!(json.contains("\"usualEfficiency\""));
        assert!(json.contains("\"energyWhenLearning\""));
        assert!(json.contains("\"profession\""));
    }

    #[test]
    fn test_missing_fields_decode_as_defaults() {
        let partial: ProfileSurveyData =
            serde_json::from_str(r#"{"profession":"nurse"}"#).unwrap();
        assert_eq!(partial.profession, "nurse");
        assert_eq!(partial.high_demanded, "");
    }
}
