use crate::client::ApiClient;
use crate::config::Config;
use anyhow::Result;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;
use serde::Deserialize;
use std::sync::atomic::{AtomicU32, Ordering};

static IDENTITY_SEQ: AtomicU32 = AtomicU32::new(0);

/// Password used for every fabricated account in a run
const TEST_PASSWORD: &str = "SecurePassword123!";

/// User record echoed back by the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Mutable session state threaded through the test cases: the API client,
/// the bearer credential and the identity created during signup.
pub struct SessionContext {
    pub client: ApiClient,
    pub base_url: String,
    pub user: Option<UserProfile>,
    auth_token: Option<String>,
}

impl SessionContext {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            base_url: config.base_url.clone(),
            user: None,
            auth_token: None,
        })
    }

    /// Hold a credential and attach it to subsequent requests
    pub fn authenticate(&mut self, token: String) {
        self.client.set_bearer(&token);
        self.auth_token = Some(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Stop sending the credential, handing it back for later restoration.
    /// Used by the access-control checks.
    pub fn detach_credential(&mut self) -> Option<String> {
        self.client.clear_bearer();
        self.auth_token.take()
    }

    /// Re-attach a previously detached credential. A no-op when none was held.
    pub fn restore_credential(&mut self, token: Option<String>) {
        if let Some(token) = token {
            self.authenticate(token);
        }
    }

    pub fn password(&self) -> &'static str {
        TEST_PASSWORD
    }

    /// Fabricate a realistic signup identity with a unique email
    pub fn fresh_identity(&self) -> (String, String) {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let name = format!("{} {}", first, last);

        // Timestamp plus a counter so two signups in the same second stay distinct
        let seq = IDENTITY_SEQ.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let nonce: u16 = rand::thread_rng().gen_range(100..1000);
        let email = format!(
            "{}.{}.{}{}{}@university.edu",
            mail_part(&first),
            mail_part(&last),
            stamp,
            seq,
            nonce
        );

        (name, email)
    }
}

/// Faker names can contain apostrophes or spaces; keep emails plain ascii
fn mail_part(name: &str) -> String {
    let part: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if part.is_empty() {
        "user".to_string()
    } else {
        part
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SessionContext {
        SessionContext::new(&Config::default()).unwrap()
    }

    #[test]
    fn detach_and_restore_roundtrip() {
        let mut ctx = context();
        ctx.authenticate("tok-123".to_string());
        assert!(ctx.client.has_bearer());

        let saved = ctx.detach_credential();
        assert_eq!(saved.as_deref(), Some("tok-123"));
        assert!(ctx.token().is_none());
        assert!(!ctx.client.has_bearer());

        ctx.restore_credential(saved);
        assert_eq!(ctx.token(), Some("tok-123"));
        assert!(ctx.client.has_bearer());
    }

    #[test]
    fn restore_without_credential_is_a_noop() {
        let mut ctx = context();
        let saved = ctx.detach_credential();
        assert!(saved.is_none());
        ctx.restore_credential(saved);
        assert!(ctx.token().is_none());
        assert!(!ctx.client.has_bearer());
    }

    #[test]
    fn fresh_identities_are_unique_and_plain() {
        let ctx = context();
        let (name, email) = ctx.fresh_identity();
        let (_, other) = ctx.fresh_identity();

        assert!(!name.trim().is_empty());
        assert!(email.ends_with("@university.edu"));
        let local = email.split('@').next().unwrap();
        assert!(local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.'));
        assert_ne!(email, other);
    }

    #[test]
    fn mail_part_strips_punctuation() {
        assert_eq!(mail_part("O'Brien"), "obrien");
        assert_eq!(mail_part("Mary Ann"), "maryann");
        assert_eq!(mail_part("'"), "user");
    }
}
