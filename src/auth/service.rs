use crate::error::AuthError;

/// A user record as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

/// Capability surface of the external identity provider.
///
/// This crate never talks to a real provider; the embedding app
/// supplies an implementation and tests use an in-memory fake. Every
/// method maps to one provider call, with no local policy attached;
/// policy (input checks, the verification gate, session bookkeeping)
/// lives in [`crate::auth::AccountManager`].
pub trait IdentityService {
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    fn send_verification_email(&self, user_id: &str) -> Result<(), AuthError>;

    /// Re-fetch the user so recent server-side changes (notably email
    /// verification) are visible
    fn reload_user(&self, user_id: &str) -> Result<AuthUser, AuthError>;

    fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;

    fn current_user(&self) -> Option<AuthUser>;
}
