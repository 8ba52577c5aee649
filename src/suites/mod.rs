pub mod access;
pub mod auth;
pub mod catalog;
pub mod custom;
pub mod payments;
pub mod user;

use crate::runner::context::SessionContext;
use crate::runner::state::HarnessState;
use async_trait::async_trait;

/// One category of sequential test cases. A suite records exactly one
/// outcome per case it declares and never returns an error; anything that
/// goes wrong becomes a failed record.
#[async_trait]
pub trait Suite {
    /// Short name used for category filtering and record tagging
    fn name(&self) -> &'static str;

    /// Banner printed when the category starts
    fn title(&self) -> &'static str;

    async fn run(&self, ctx: &mut SessionContext, log: &mut HarnessState);
}

/// All suites in their fixed execution order
pub fn all() -> Vec<Box<dyn Suite>> {
    vec![
        Box::new(auth::AuthSuite),
        Box::new(catalog::CatalogSuite),
        Box::new(payments::PaymentsSuite),
        Box::new(custom::CustomRequestSuite),
        Box::new(user::UserDataSuite),
        Box::new(access::AccessControlSuite),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suites_run_in_declared_order() {
        let names: Vec<&str> = all().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            ["auth", "catalog", "payments", "custom", "user", "access"]
        );
    }
}
