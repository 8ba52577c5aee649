use crate::runner::state::{CaseRecord, HarnessSummary};
use serde::{Deserialize, Serialize};

/// Test results for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub session_id: String,
    pub cases: Vec<CaseRecord>,
    pub summary: HarnessSummary,
    pub generated_at: String,
}
