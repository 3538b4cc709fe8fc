use log::warn;

use super::service::{AuthUser, IdentityService};
use crate::domain::Session;
use crate::error::{AuthError, ValidationError};

/// Minimum password length accepted at registration
const MIN_PASSWORD_CHARS: usize = 6;

/// Drives the sign-in, registration, and password-reset flows against
/// an [`IdentityService`] and holds the resulting [`Session`].
///
/// The session held here is the only notion of "logged in"; dropping
/// the manager (or calling `sign_out`) ends it. Nothing is persisted.
pub struct AccountManager {
    service: Box<dyn IdentityService>,
    session: Option<Session>,
}

impl AccountManager {
    pub fn new(service: Box<dyn IdentityService>) -> Self {
        Self {
            service,
            session: None,
        }
    }

    /// Sign in and establish a session.
    ///
    /// The user is reloaded after the provider accepts the credentials
    /// so a verification completed since the last fetch counts;
    /// unverified accounts are rejected without a session.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::EmptyCredentials.into());
        }

        let user = self.service.sign_in(email, password)?;
        let user = self.service.reload_user(&user.user_id)?;
        if !user.email_verified {
            return Err(AuthError::EmailNotVerified);
        }

        Ok(self.establish(user))
    }

    /// Create an account and send the verification email.
    ///
    /// Does not sign in: the user clicks the emailed link first, then
    /// finishes via [`AccountManager::confirm_registration`].
    pub fn register(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::EmptyCredentials.into());
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort.into());
        }

        let user = self.service.sign_up(email, password)?;
        self.service.send_verification_email(&user.user_id)?;
        Ok(())
    }

    /// Finish registration once the user reports having clicked the
    /// verification link. Still-unverified accounts get no session.
    pub fn confirm_registration(&mut self) -> Result<Session, AuthError> {
        let user = self.service.current_user().ok_or(AuthError::NoCurrentUser)?;
        let user = self.service.reload_user(&user.user_id)?;
        if !user.email_verified {
            return Err(AuthError::EmailNotVerified);
        }

        Ok(self.establish(user))
    }

    /// Send a password-reset email.
    ///
    /// The address is trimmed so a trailing space does not break it.
    /// With `sign_out_after` set (reset started from the account
    /// screen), the current session ends so the user re-authenticates
    /// with the new password.
    pub fn send_password_reset(
        &mut self,
        email: &str,
        sign_out_after: bool,
    ) -> Result<(), AuthError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }

        self.service.send_password_reset(trimmed)?;
        if sign_out_after {
            self.sign_out();
        }
        Ok(())
    }

    /// End the session. A provider-side failure is logged and the
    /// local session is dropped regardless.
    pub fn sign_out(&mut self) {
        if let Err(err) = self.service.sign_out() {
            warn!("Provider sign-out failed: {err}");
        }
        self.session = None;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    fn establish(&mut self, user: AuthUser) -> Session {
        let session = Session::new(user.user_id, user.email, user.display_name);
        self.session = Some(session.clone());
        session
    }
}
