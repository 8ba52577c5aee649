//! Access-control checks: with the credential detached, every protected
//! endpoint must reject the request with 401. The whole category records one
//! aggregate result. The credential is restored afterwards; restoring is a
//! no-op when none was held.

use super::Suite;
use crate::runner::context::SessionContext;
use crate::runner::state::HarnessState;
use async_trait::async_trait;
use colored::Colorize;
use reqwest::StatusCode;
use serde_json::json;

const NAME: &str = "Unauthenticated access checks";

/// Endpoints that must require a credential
const PROTECTED_ENDPOINTS: [(&str, &str); 4] = [
    ("/auth/verify", "GET"),
    ("/user/purchases", "GET"),
    ("/user/requests", "GET"),
    ("/payments/checkout/session", "POST"),
];

pub struct AccessControlSuite;

#[async_trait]
impl Suite for AccessControlSuite {
    fn name(&self) -> &'static str {
        "access"
    }

    fn title(&self) -> &'static str {
        "🔒 SECURITY TESTS"
    }

    async fn run(&self, ctx: &mut SessionContext, log: &mut HarnessState) {
        let saved = ctx.detach_credential();

        let mut problems: Vec<String> = Vec::new();
        for (path, method) in PROTECTED_ENDPOINTS {
            let result = match method {
                "POST" => ctx.client.post(path, &json!({})).await,
                _ => ctx.client.get(path).await,
            };

            match result {
                Ok(resp) if resp.status == StatusCode::UNAUTHORIZED => {
                    println!(
                        "   {} {} correctly requires authentication",
                        "✅".to_string().green(),
                        path
                    );
                }
                Ok(resp) => {
                    println!(
                        "   {} {} should require authentication but returned {}",
                        "❌".to_string().red(),
                        path,
                        resp.status.as_u16()
                    );
                    problems.push(format!("{} returned {}", path, resp.status.as_u16()));
                }
                Err(e) => {
                    println!("   {} {} check failed: {}", "❌".to_string().red(), path, e);
                    problems.push(format!("{}: {}", path, e));
                }
            }
        }

        ctx.restore_credential(saved);

        if problems.is_empty() {
            log.pass(NAME, "authentication protection verified");
        } else {
            log.fail(NAME, problems.join("; "), None);
        }
    }
}
