use chrono::{DateTime, Local};

/// Proof of a completed, verified sign-in.
///
/// Holding a `Session` is what "logged in" means; there is no shared
/// mutable flag anywhere. The top-level application holds at most one
/// of these (through `auth::AccountManager`) and drops it on sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Provider-reported display name, when the user set one
    pub display_name: Option<String>,
    pub authenticated_at: DateTime<Local>,
}

impl Session {
    pub fn new(user_id: String, email: String, display_name: Option<String>) -> Self {
        Self {
            user_id,
            email,
            display_name,
            authenticated_at: Local::now(),
        }
    }

    /// Name to greet the user with: the explicit display name when one
    /// is set, else the email local part, else "anonymous".
    pub fn username(&self) -> String {
        if let Some(name) = &self.display_name {
            if !name.trim().is_empty() {
                return name.clone();
            }
        }

        if let Some(prefix) = self.email.split('@').next() {
            if !prefix.is_empty() {
                return prefix.to_string();
            }
        }

        "anonymous".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_prefers_display_name() {
        let session = Session::new(
            "u1".to_string(),
            "ada@example.com".to_string(),
            Some("Ada".to_string()),
        );
        assert_eq!(session.username(), "Ada");
    }

    #[test]
    fn test_username_falls_back_to_email_prefix() {
        let blank_name = Session::new(
            "u1".to_string(),
            "ada@example.com".to_string(),
            Some("   ".to_string()),
        );
        assert_eq!(blank_name.username(), "ada");

        let no_name = Session::new("u1".to_string(), "grace@example.com".to_string(), None);
        assert_eq!(no_name.username(), "grace");
    }

    #[test]
    fn test_username_last_resort() {
        let session = Session::new("u1".to_string(), String::new(), None);
        assert_eq!(session.username(), "anonymous");
    }
}
