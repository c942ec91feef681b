use serde::{Deserialize, Serialize};

/// Account profile as returned by the backend.
///
/// Field names follow the Laravel wire format (snake_case). Timestamps are
/// kept as the raw strings the API sends; nothing in the client needs to do
/// date arithmetic on them. Unknown fields in the response are ignored and
/// missing optional fields deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl User {
    pub fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// Login input. Transient: passed to the API client and dropped, never
/// written to storage.
#[derive(Clone)]
pub struct Credential {
    pub identifier: String,
    pub secret: String,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

// Keep the secret out of logs and error chains.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_parses_with_missing_optional_fields() {
        let json = r#"{"id": 1, "name": "Ann", "email": "a@b.com"}"#;
        let user: User = serde_json::from_str(json).expect("minimal user should parse");
        assert_eq!(user.name, "Ann");
        assert!(user.email_verified_at.is_none());
        assert!(!user.is_email_verified());
    }

    #[test]
    fn user_ignores_unknown_fields() {
        let json = r#"{
            "id": 7,
            "name": "Bea",
            "email": "bea@pixstop.com.br",
            "email_verified_at": "2024-03-01T10:00:00.000000Z",
            "roles": ["admin"],
            "preferences": {"theme": "dark"}
        }"#;
        let user: User = serde_json::from_str(json).expect("extra fields should be ignored");
        assert!(user.is_email_verified());
    }

    #[test]
    fn credential_debug_redacts_secret() {
        let cred = Credential::new("a@b.com", "hunter2");
        let rendered = format!("{:?}", cred);
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
