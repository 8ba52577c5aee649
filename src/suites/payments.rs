//! Checkout pipeline: session creation, then a status poll that depends on
//! the session id the first case returned.

use super::Suite;
use crate::runner::context::SessionContext;
use crate::runner::state::HarnessState;
use async_trait::async_trait;
use serde_json::json;

const CREATE_SESSION: &str = "POST /api/payments/checkout/session";
const STATUS: &str = "GET /api/payments/checkout/status/:sessionId";

pub struct PaymentsSuite;

#[async_trait]
impl Suite for PaymentsSuite {
    fn name(&self) -> &'static str {
        "payments"
    }

    fn title(&self) -> &'static str {
        "💳 PAYMENT TESTS"
    }

    async fn run(&self, ctx: &mut SessionContext, log: &mut HarnessState) {
        if ctx.token().is_none() {
            log.fail_prerequisite(CREATE_SESSION, "no auth token held");
            log.fail_prerequisite(STATUS, "no checkout session id");
            return;
        }

        match create_session(ctx, log).await {
            Some(session_id) => payment_status(ctx, log, &session_id).await,
            None => log.fail_prerequisite(STATUS, "no checkout session id"),
        }
    }
}

/// Create a checkout session; returns the session id on success
async fn create_session(ctx: &mut SessionContext, log: &mut HarnessState) -> Option<String> {
    let body = json!({
        "amount": 89.99,
        "currency": "usd",
        "success_url": format!("{}/success", ctx.base_url),
        "cancel_url": format!("{}/cancel", ctx.base_url),
        "metadata": {
            "project_id": "1",
            "product_name": "E-Commerce Website with Admin Panel",
        },
    });

    match ctx.client.post("/payments/checkout/session", &body).await {
        Ok(resp) if resp.is_ok() => match resp.str_field("session_id") {
            Ok(session_id) => {
                log.pass(
                    CREATE_SESSION,
                    format!("checkout session created: {}", session_id),
                );
                Some(session_id)
            }
            Err(e) => {
                log.fail(CREATE_SESSION, e.to_string(), Some(resp.body));
                None
            }
        },
        Ok(resp) => {
            log.fail(
                CREATE_SESSION,
                format!("failed to create checkout session: {}", resp.message()),
                Some(resp.body),
            );
            None
        }
        Err(e) => {
            log.fail(CREATE_SESSION, e.to_string(), None);
            None
        }
    }
}

async fn payment_status(ctx: &mut SessionContext, log: &mut HarnessState, session_id: &str) {
    let path = format!("/payments/checkout/status/{}", session_id);
    match ctx.client.get(&path).await {
        Ok(resp) if resp.is_ok() => {
            let status = resp.str_field("status").unwrap_or_default();
            let payment_status = resp.str_field("payment_status").unwrap_or_default();
            log.pass(
                STATUS,
                format!("payment status retrieved: {}/{}", status, payment_status),
            );
        }
        Ok(resp) => {
            log.fail(
                STATUS,
                format!("failed to get payment status: {}", resp.message()),
                Some(resp.body),
            );
        }
        Err(e) => log.fail(STATUS, e.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::suites::Suite;

    fn unreachable_context() -> SessionContext {
        let config = Config {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
        };
        SessionContext::new(&config).unwrap()
    }

    #[tokio::test]
    async fn no_token_fails_both_cases_without_attempting_them() {
        let mut ctx = unreachable_context();
        let mut log = HarnessState::new("payments-pipeline");

        PaymentsSuite.run(&mut ctx, &mut log).await;

        let records = log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, CREATE_SESSION);
        assert_eq!(records[0].message, "missing prerequisite: no auth token held");
        assert_eq!(records[1].name, STATUS);
        assert_eq!(
            records[1].message,
            "missing prerequisite: no checkout session id"
        );
    }

    #[tokio::test]
    async fn failed_checkout_records_status_as_not_attempted() {
        let mut ctx = unreachable_context();
        ctx.authenticate("tok-123".to_string());
        let mut log = HarnessState::new("payments-pipeline");

        PaymentsSuite.run(&mut ctx, &mut log).await;

        let records = log.records();
        assert_eq!(records.len(), 2);

        // Checkout was attempted and failed at the transport layer
        assert_eq!(records[0].name, CREATE_SESSION);
        assert!(!records[0].status.is_pass());
        assert!(records[0].message.contains("request failed"));

        // The status poll was not attempted
        assert_eq!(records[1].name, STATUS);
        assert_eq!(
            records[1].message,
            "missing prerequisite: no checkout session id"
        );
    }
}
