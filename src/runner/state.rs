use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Outcome of a single test case
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed { error: String },
}

impl CaseStatus {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }
}

/// Recorded outcome of one test case. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub name: String,
    pub category: String,
    pub status: CaseStatus,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
    pub duration_ms: Option<u64>,
}

/// Aggregate counts for a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarnessSummary {
    pub session_id: String,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub total_duration_ms: Option<u64>,
}

impl HarnessSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            f64::from(self.passed) / f64::from(self.total) * 100.0
        }
    }
}

/// Session state for one harness run: the append-only result log plus the
/// category currently executing. Owned exclusively by the orchestrator.
#[derive(Debug)]
pub struct HarnessState {
    pub session_id: String,
    records: Vec<CaseRecord>,
    current_category: String,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    /// Start of the case currently executing. Execution is sequential, so a
    /// case runs from this mark until its record is appended.
    case_mark: Option<Instant>,
}

impl HarnessState {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            records: Vec::new(),
            current_category: String::new(),
            started_at: None,
            finished_at: None,
            case_mark: None,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.case_mark = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Instant::now());
    }

    /// Enter a category and print its banner
    pub fn begin_category(&mut self, name: &str, title: &str) {
        self.current_category = name.to_string();
        self.case_mark = Some(Instant::now());
        println!("\n{}", title.bold());
        println!("{}", "-".repeat(40));
    }

    /// Record a passing case
    pub fn pass(&mut self, name: &str, message: impl Into<String>) {
        self.record(name, CaseStatus::Passed, message.into(), None);
    }

    /// Record a failing case, optionally with the raw response payload
    pub fn fail(&mut self, name: &str, message: impl Into<String>, response_data: Option<Value>) {
        let message = message.into();
        self.record(
            name,
            CaseStatus::Failed {
                error: message.clone(),
            },
            message,
            response_data,
        );
    }

    /// Record a dependent case that could not be attempted
    pub fn fail_prerequisite(&mut self, name: &str, what: &str) {
        self.fail(name, format!("missing prerequisite: {}", what), None);
    }

    fn record(&mut self, name: &str, status: CaseStatus, message: String, response_data: Option<Value>) {
        let line = match &status {
            CaseStatus::Passed => format!("{}: {} - {}", "✅ PASS".green(), name, message),
            CaseStatus::Failed { .. } => format!("{}: {} - {}", "❌ FAIL".red(), name, message),
        };
        println!("{}", line);

        if let Some(ref data) = response_data {
            if !status.is_pass() {
                let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
                println!("   Response: {}", pretty);
            }
        }

        let duration_ms = self.case_mark.map(|mark| mark.elapsed().as_millis() as u64);
        self.records.push(CaseRecord {
            name: name.to_string(),
            category: self.current_category.clone(),
            status,
            message,
            timestamp: chrono::Local::now().to_rfc3339(),
            response_data,
            duration_ms,
        });
        self.case_mark = Some(Instant::now());
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn failed_records(&self) -> impl Iterator<Item = &CaseRecord> {
        self.records.iter().filter(|r| !r.status.is_pass())
    }

    /// True iff every recorded case passed
    pub fn all_passed(&self) -> bool {
        let summary = self.summary();
        summary.passed == summary.total
    }

    pub fn summary(&self) -> HarnessSummary {
        let (passed, failed) = self
            .records
            .iter()
            .fold((0, 0), |(p, f), record| match record.status {
                CaseStatus::Passed => (p + 1, f),
                CaseStatus::Failed { .. } => (p, f + 1),
            });

        let total_duration_ms = self.started_at.map(|start| {
            self.finished_at
                .unwrap_or_else(Instant::now)
                .duration_since(start)
                .as_millis() as u64
        });

        HarnessSummary {
            session_id: self.session_id.clone(),
            total: self.records.len() as u32,
            passed,
            failed,
            total_duration_ms,
        }
    }
}
