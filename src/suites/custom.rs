//! Custom project requests: submit one, then list the user's requests.

use super::Suite;
use crate::runner::context::SessionContext;
use crate::runner::state::HarnessState;
use async_trait::async_trait;
use serde_json::{json, Value};

const SUBMIT: &str = "POST /api/projects/custom-request";
const LIST: &str = "GET /api/user/requests";

pub struct CustomRequestSuite;

#[async_trait]
impl Suite for CustomRequestSuite {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn title(&self) -> &'static str {
        "🛠️ CUSTOM PROJECT TESTS"
    }

    async fn run(&self, ctx: &mut SessionContext, log: &mut HarnessState) {
        if ctx.token().is_none() {
            log.fail_prerequisite(SUBMIT, "no auth token held");
            log.fail_prerequisite(LIST, "no auth token held");
            return;
        }
        submit_request(ctx, log).await;
        list_requests(ctx, log).await;
    }
}

async fn submit_request(ctx: &mut SessionContext, log: &mut HarnessState) {
    let deadline = chrono::Utc::now() + chrono::Duration::days(30);
    let body = json!({
        "title": "Machine Learning Stock Prediction System",
        "category": "ai",
        "description": "Build a comprehensive ML system that analyzes stock market data \
            and provides predictions using various algorithms including LSTM, Random \
            Forest, and sentiment analysis from news data.",
        "technologies": ["Python", "TensorFlow", "Pandas", "NumPy", "Flask", "PostgreSQL"],
        "budget": 250,
        "deadline": deadline.to_rfc3339(),
    });

    match ctx.client.post("/projects/custom-request", &body).await {
        Ok(resp) if resp.is_ok() => {
            let title = resp
                .body
                .pointer("/request/title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)");
            log.pass(SUBMIT, format!("custom request submitted: {}", title));
        }
        Ok(resp) => {
            log.fail(
                SUBMIT,
                format!("failed to submit custom request: {}", resp.message()),
                Some(resp.body),
            );
        }
        Err(e) => log.fail(SUBMIT, e.to_string(), None),
    }
}

async fn list_requests(ctx: &mut SessionContext, log: &mut HarnessState) {
    match ctx.client.get("/user/requests").await {
        Ok(resp) if resp.is_ok() => {
            let count = resp
                .body
                .get("requests")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            log.pass(LIST, format!("retrieved {} user requests", count));
        }
        Ok(resp) => {
            log.fail(
                LIST,
                format!("failed to get user requests: {}", resp.message()),
                Some(resp.body),
            );
        }
        Err(e) => log.fail(LIST, e.to_string(), None),
    }
}
