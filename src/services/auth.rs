use std::str::FromStr;

use thiserror::Error;

use crate::models::profile::UserProfile;
use crate::validation::{self, FieldErrors};

/// Number of characters a verification code must have.
pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Default, Clone)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Clone)]
pub struct SignupDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub age: String,
    pub phone_number: String,
    pub graduation_status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraduationStatus {
    Undergraduate,
    Graduate,
    Postgraduate,
    Phd,
}

#[derive(Debug, Error)]
#[error("Unknown graduation status '{0}'")]
pub struct UnknownStatus(String);

impl FromStr for GraduationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "undergraduate" => Ok(GraduationStatus::Undergraduate),
            "graduate" => Ok(GraduationStatus::Graduate),
            "postgraduate" => Ok(GraduationStatus::Postgraduate),
            "phd" => Ok(GraduationStatus::Phd),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug)]
enum SessionState {
    LoggedOut,
    AwaitingVerification { pending: PendingSignup },
    LoggedIn { user: UserProfile },
}

#[derive(Debug, Clone)]
struct PendingSignup {
    full_name: String,
    email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Field-level problems with the submitted credentials.
    #[error("{0}")]
    Rejected(FieldErrors),

    /// `verify` was called without a signup in flight.
    #[error("No signup is awaiting verification")]
    NotAwaitingVerification,
}

/// Login state for one interactive session. Owns the user profile
/// while signed in; nothing survives the process.
#[derive(Debug)]
pub struct AuthSession {
    state: SessionState,
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn is_awaiting_verification(&self) -> bool {
        matches!(self.state, SessionState::AwaitingVerification { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::LoggedIn { user } => Some(user),
            _ => None,
        }
    }

    /// Email a pending signup's code was "sent" to.
    pub fn pending_email(&self) -> Option<&str> {
        match &self.state {
            SessionState::AwaitingVerification { pending } => Some(&pending.email),
            _ => None,
        }
    }

    /// Credential presence and shape are checked; nothing is verified
    /// against any backend.
    pub fn login(&mut self, draft: &LoginDraft) -> Result<(), AuthError> {
        let mut errors = FieldErrors::new();
        validation::check_email(&mut errors, "email", &draft.email);
        validation::check_password(&mut errors, "password", &draft.password);
        if !errors.is_empty() {
            return Err(AuthError::Rejected(errors));
        }
        let user = UserProfile {
            email: draft.email.trim().to_string(),
            ..UserProfile::default()
        };
        self.state = SessionState::LoggedIn { user };
        Ok(())
    }

    /// Step one of signup. On success the session waits for a code.
    pub fn signup(&mut self, draft: &SignupDraft) -> Result<(), AuthError> {
        let errors = validate_signup(draft);
        if !errors.is_empty() {
            return Err(AuthError::Rejected(errors));
        }
        self.state = SessionState::AwaitingVerification {
            pending: PendingSignup {
                full_name: draft.full_name.trim().to_string(),
                email: draft.email.trim().to_string(),
            },
        };
        Ok(())
    }

    /// Step two. Any code of the right length passes; there is no real
    /// verification to run it against.
    pub fn verify(&mut self, code: &str) -> Result<(), AuthError> {
        let SessionState::AwaitingVerification { pending } = &self.state else {
            return Err(AuthError::NotAwaitingVerification);
        };
        if code.trim().chars().count() != OTP_LENGTH {
            let mut errors = FieldErrors::new();
            errors.push("otp", "Please enter a valid 6-digit code");
            return Err(AuthError::Rejected(errors));
        }
        let user = UserProfile {
            name: pending.full_name.clone(),
            email: pending.email.clone(),
            ..UserProfile::default()
        };
        self.state = SessionState::LoggedIn { user };
        Ok(())
    }

    pub fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_signup(draft: &SignupDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.full_name.trim().is_empty() {
        errors.push("full_name", "Full name is required");
    }
    validation::check_email(&mut errors, "email", &draft.email);
    validation::check_password(&mut errors, "password", &draft.password);
    if draft.password != draft.confirm_password {
        errors.push("confirm_password", "Passwords do not match");
    }
    if draft.age.trim().is_empty() {
        errors.push("age", "Age is required");
    }
    if draft.phone_number.trim().is_empty() {
        errors.push("phone_number", "Phone number is required");
    }
    let status = draft.graduation_status.trim();
    if status.is_empty() {
        errors.push("graduation_status", "Graduation status is required");
    } else if status.parse::<GraduationStatus>().is_err() {
        errors.push(
            "graduation_status",
            "Graduation status must be undergraduate, graduate, postgraduate or phd",
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupDraft {
        SignupDraft {
            full_name: "Jane Smith".to_string(),
            email: "jane@university.edu".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            age: "21".to_string(),
            phone_number: "555-0100".to_string(),
            graduation_status: "undergraduate".to_string(),
        }
    }

    #[test]
    fn login_with_good_credentials_signs_in() {
        let mut session = AuthSession::new();
        let draft = LoginDraft {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        session.login(&draft).expect("accepted");
        assert!(session.is_logged_in());
        assert_eq!(session.user().map(|u| u.email.as_str()), Some("a@b.com"));
    }

    #[test]
    fn login_with_empty_credentials_stays_out_with_both_errors() {
        let mut session = AuthSession::new();
        let err = session.login(&LoginDraft::default()).unwrap_err();
        let AuthError::Rejected(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn login_checks_email_shape_and_password_length() {
        let mut session = AuthSession::new();
        let draft = LoginDraft {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let AuthError::Rejected(errors) = session.login(&draft).unwrap_err() else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn signup_then_six_character_code_creates_the_account() {
        let mut session = AuthSession::new();
        session.signup(&valid_signup()).expect("accepted");
        assert!(session.is_awaiting_verification());
        assert_eq!(session.pending_email(), Some("jane@university.edu"));

        session.verify("123456").expect("any six characters pass");
        assert!(session.is_logged_in());
        let user = session.user().expect("signed in");
        assert_eq!(user.name, "Jane Smith");
        assert_eq!(user.email, "jane@university.edu");
    }

    #[test]
    fn short_code_is_rejected_and_state_is_unchanged() {
        let mut session = AuthSession::new();
        session.signup(&valid_signup()).expect("accepted");

        let AuthError::Rejected(errors) = session.verify("12345").unwrap_err() else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("otp"), Some("Please enter a valid 6-digit code"));
        assert!(session.is_awaiting_verification());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn verify_without_a_pending_signup_is_an_error() {
        let mut session = AuthSession::new();
        assert!(matches!(
            session.verify("123456"),
            Err(AuthError::NotAwaitingVerification)
        ));
    }

    #[test]
    fn mismatched_passwords_are_reported() {
        let mut session = AuthSession::new();
        let mut draft = valid_signup();
        draft.confirm_password = "different".to_string();
        let AuthError::Rejected(errors) = session.signup(&draft).unwrap_err() else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert!(!session.is_awaiting_verification());
    }

    #[test]
    fn unknown_graduation_status_is_reported() {
        let mut session = AuthSession::new();
        let mut draft = valid_signup();
        draft.graduation_status = "dropout".to_string();
        let AuthError::Rejected(errors) = session.signup(&draft).unwrap_err() else {
            panic!("expected field errors");
        };
        assert!(errors.get("graduation_status").is_some());
    }

    #[test]
    fn logout_always_lands_logged_out() {
        let mut session = AuthSession::new();
        let draft = LoginDraft {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        session.login(&draft).expect("accepted");
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.user().is_none());

        // logging out twice is fine
        session.logout();
        assert!(!session.is_logged_in());
    }
}
