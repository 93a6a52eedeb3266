//! Login credential checks.
//!
//! The session layer only ever sees an already-accepted email. How that
//! email was accepted is behind `CredentialStore`, injected into the app
//! state at startup.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted { email: String, role: Role },
    Rejected { reason: String },
}

impl LoginOutcome {
    fn rejected(reason: &str) -> Self {
        LoginOutcome::Rejected {
            reason: reason.into(),
        }
    }
}

/// A capability that decides whether an email/password pair may log in.
pub trait CredentialStore: Send + Sync {
    fn verify_login(&self, email: &str, password: &str) -> LoginOutcome;
}

#[derive(Debug, Clone)]
pub struct StaticUser {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Fixed user table plus a passwordless allowlist.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    users: Vec<StaticUser>,
    passwordless_allowlist: Vec<String>,
}

impl StaticCredentialStore {
    pub fn new(users: Vec<StaticUser>, passwordless_allowlist: Vec<String>) -> Self {
        Self {
            users,
            passwordless_allowlist: passwordless_allowlist
                .into_iter()
                .map(|e| e.trim().to_lowercase())
                .collect(),
        }
    }

    /// The demo accounts shipped with the admin console.
    pub fn demo() -> Self {
        Self::new(
            vec![
                StaticUser {
                    email: "admin@gmail.com".into(),
                    password: "admin123".into(),
                    role: Some(Role::Admin),
                },
                StaticUser {
                    email: "staff@gmail.com".into(),
                    password: "staff123".into(),
                    role: Some(Role::Staff),
                },
            ],
            vec!["you@gmail.com".into(), "another@gmail.com".into()],
        )
    }

    /// Allowlisted addresses log in as staff without a password check.
    /// Kept as an explicit policy branch pending product review.
    fn passwordless_allowlist_policy(&self, email: &str) -> Option<LoginOutcome> {
        self.passwordless_allowlist
            .iter()
            .any(|allowed| allowed == email)
            .then(|| LoginOutcome::Accepted {
                email: email.to_string(),
                role: Role::Staff,
            })
    }
}

impl CredentialStore for StaticCredentialStore {
    fn verify_login(&self, email: &str, password: &str) -> LoginOutcome {
        let email = email.trim().to_lowercase();
        let password = password.trim();

        if !is_gmail(&email) {
            return LoginOutcome::rejected("Only Gmail (@gmail.com) addresses are allowed.");
        }

        if let Some(user) = self.users.iter().find(|u| u.email.to_lowercase() == email) {
            if user.password != password {
                return LoginOutcome::rejected("Wrong password.");
            }
            return LoginOutcome::Accepted {
                email,
                role: user.role.unwrap_or(Role::Admin),
            };
        }

        self.passwordless_allowlist_policy(&email)
            .unwrap_or_else(|| LoginOutcome::rejected("Email is not registered or allowed."))
    }
}

/// `local@gmail.com` with a non-empty local part free of whitespace and `@`.
pub fn is_gmail(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.contains('@')
        && !local.chars().any(char::is_whitespace)
        && domain.eq_ignore_ascii_case("gmail.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gmail() {
        assert!(is_gmail("user@gmail.com"));
        assert!(is_gmail("  User@GMAIL.com "));
        assert!(!is_gmail("user@yahoo.com"));
        assert!(!is_gmail("@gmail.com"));
        assert!(!is_gmail("a b@gmail.com"));
        assert!(!is_gmail("a@b@gmail.com"));
        assert!(!is_gmail("user@gmail.com.evil"));
    }

    #[test]
    fn test_known_user_correct_password() {
        let store = StaticCredentialStore::demo();
        assert_eq!(
            store.verify_login(" Admin@Gmail.com ", "admin123"),
            LoginOutcome::Accepted {
                email: "admin@gmail.com".into(),
                role: Role::Admin,
            }
        );
    }

    #[test]
    fn test_known_user_wrong_password() {
        let store = StaticCredentialStore::demo();
        assert_eq!(
            store.verify_login("staff@gmail.com", "nope"),
            LoginOutcome::Rejected {
                reason: "Wrong password.".into()
            }
        );
    }

    #[test]
    fn test_non_gmail_rejected() {
        let store = StaticCredentialStore::demo();
        let LoginOutcome::Rejected { reason } = store.verify_login("admin@example.com", "admin123")
        else {
            panic!("non-gmail address accepted");
        };
        assert!(reason.contains("Gmail"));
    }

    #[test]
    fn test_passwordless_allowlist_policy() {
        let store = StaticCredentialStore::demo();
        assert_eq!(
            store.verify_login("you@gmail.com", ""),
            LoginOutcome::Accepted {
                email: "you@gmail.com".into(),
                role: Role::Staff,
            }
        );
    }

    #[test]
    fn test_unknown_rejected() {
        let store = StaticCredentialStore::demo();
        assert!(matches!(
            store.verify_login("stranger@gmail.com", "x"),
            LoginOutcome::Rejected { .. }
        ));
    }

    #[test]
    fn test_role_defaults_to_admin() {
        let store = StaticCredentialStore::new(
            vec![StaticUser {
                email: "norole@gmail.com".into(),
                password: "pw".into(),
                role: None,
            }],
            vec![],
        );
        assert_eq!(
            store.verify_login("norole@gmail.com", "pw"),
            LoginOutcome::Accepted {
                email: "norole@gmail.com".into(),
                role: Role::Admin,
            }
        );
    }
}
