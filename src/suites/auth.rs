//! Authentication pipeline: signup, then login, then token verification.
//! Login and verify depend on state the earlier cases produce; when a
//! prerequisite is missing they are recorded as failed without being attempted.

use super::Suite;
use crate::runner::context::{SessionContext, UserProfile};
use crate::runner::state::HarnessState;
use async_trait::async_trait;
use serde_json::json;

const SIGNUP: &str = "POST /api/auth/signup";
const LOGIN: &str = "POST /api/auth/login";
const VERIFY: &str = "GET /api/auth/verify";

pub struct AuthSuite;

#[async_trait]
impl Suite for AuthSuite {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn title(&self) -> &'static str {
        "🔐 AUTHENTICATION TESTS"
    }

    async fn run(&self, ctx: &mut SessionContext, log: &mut HarnessState) {
        if !signup(ctx, log).await {
            log.fail_prerequisite(LOGIN, "signup did not complete");
            log.fail_prerequisite(VERIFY, "signup did not complete");
            return;
        }

        login(ctx, log).await;

        if ctx.token().is_none() {
            log.fail_prerequisite(VERIFY, "no auth token held");
            return;
        }
        verify(ctx, log).await;
    }
}

/// Register a fresh account and hold its credential
async fn signup(ctx: &mut SessionContext, log: &mut HarnessState) -> bool {
    let (name, email) = ctx.fresh_identity();
    let body = json!({
        "name": name,
        "email": email,
        "password": ctx.password(),
    });

    match ctx.client.post("/auth/signup", &body).await {
        Ok(resp) if resp.is_ok() => {
            let token = resp.str_field("token");
            let user = resp.field::<UserProfile>("user");
            match (token, user) {
                (Ok(token), Ok(user)) => {
                    ctx.authenticate(token);
                    log.pass(SIGNUP, format!("user created successfully: {}", user.name));
                    ctx.user = Some(user);
                    true
                }
                (Err(e), _) | (_, Err(e)) => {
                    log.fail(SIGNUP, e.to_string(), Some(resp.body));
                    false
                }
            }
        }
        Ok(resp) => {
            log.fail(
                SIGNUP,
                format!("signup failed: {}", resp.message()),
                Some(resp.body),
            );
            false
        }
        Err(e) => {
            log.fail(SIGNUP, e.to_string(), None);
            false
        }
    }
}

/// Log in with the credentials signup just created
async fn login(ctx: &mut SessionContext, log: &mut HarnessState) {
    let Some(email) = ctx.user.as_ref().map(|u| u.email.clone()) else {
        log.fail_prerequisite(LOGIN, "no user record from signup");
        return;
    };

    let body = json!({
        "email": email,
        "password": ctx.password(),
    });

    match ctx.client.post("/auth/login", &body).await {
        Ok(resp) if resp.is_ok() => {
            // Refresh the held credential when the backend issues a new one
            if let Ok(token) = resp.str_field("token") {
                ctx.authenticate(token);
            }
            match resp.field::<UserProfile>("user") {
                Ok(user) => {
                    log.pass(LOGIN, format!("login successful for: {}", user.name));
                }
                Err(e) => log.fail(LOGIN, e.to_string(), Some(resp.body)),
            }
        }
        Ok(resp) => {
            log.fail(
                LOGIN,
                format!("login failed: {}", resp.message()),
                Some(resp.body),
            );
        }
        Err(e) => log.fail(LOGIN, e.to_string(), None),
    }
}

/// Check the held token against the verify endpoint
async fn verify(ctx: &mut SessionContext, log: &mut HarnessState) {
    match ctx.client.get("/auth/verify").await {
        Ok(resp) if resp.is_ok() => match resp.field::<UserProfile>("user") {
            Ok(user) => log.pass(VERIFY, format!("token verified for user: {}", user.name)),
            Err(e) => log.fail(VERIFY, e.to_string(), Some(resp.body)),
        },
        Ok(resp) => {
            log.fail(
                VERIFY,
                format!("token verification failed: {}", resp.message()),
                Some(resp.body),
            );
        }
        Err(e) => log.fail(VERIFY, e.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::suites::Suite;

    // Nothing listens on port 1, so every request fails at the transport
    // layer and the pipeline short-circuit is observable offline
    fn unreachable_context() -> SessionContext {
        let config = Config {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
        };
        SessionContext::new(&config).unwrap()
    }

    #[tokio::test]
    async fn failed_signup_records_login_and_verify_as_not_attempted() {
        let mut ctx = unreachable_context();
        let mut log = HarnessState::new("auth-pipeline");

        AuthSuite.run(&mut ctx, &mut log).await;

        let records = log.records();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name, SIGNUP);
        assert!(!records[0].status.is_pass());

        assert_eq!(records[1].name, LOGIN);
        assert_eq!(
            records[1].message,
            "missing prerequisite: signup did not complete"
        );
        assert_eq!(records[2].name, VERIFY);
        assert_eq!(
            records[2].message,
            "missing prerequisite: signup did not complete"
        );

        assert!(ctx.token().is_none());
        assert!(ctx.user.is_none());
    }
}
