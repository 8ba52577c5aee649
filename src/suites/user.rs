//! User data checks.

use super::Suite;
use crate::runner::context::SessionContext;
use crate::runner::state::HarnessState;
use async_trait::async_trait;
use serde_json::Value;

const PURCHASES: &str = "GET /api/user/purchases";

pub struct UserDataSuite;

#[async_trait]
impl Suite for UserDataSuite {
    fn name(&self) -> &'static str {
        "user"
    }

    fn title(&self) -> &'static str {
        "👤 USER DATA TESTS"
    }

    async fn run(&self, ctx: &mut SessionContext, log: &mut HarnessState) {
        if ctx.token().is_none() {
            log.fail_prerequisite(PURCHASES, "no auth token held");
            return;
        }

        match ctx.client.get("/user/purchases").await {
            Ok(resp) if resp.is_ok() => {
                let count = resp
                    .body
                    .get("purchases")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                log.pass(PURCHASES, format!("retrieved {} user purchases", count));
            }
            Ok(resp) => {
                log.fail(
                    PURCHASES,
                    format!("failed to get user purchases: {}", resp.message()),
                    Some(resp.body),
                );
            }
            Err(e) => log.fail(PURCHASES, e.to_string(), None),
        }
    }
}
