use super::types::TestResults;
use crate::runner::state::{CaseRecord, CaseStatus};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML report string from TestResults
pub fn generate_junit_xml(results: &TestResults) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let total = results.cases.len();
    let failures = results
        .cases
        .iter()
        .filter(|c| !c.status.is_pass())
        .count();
    let time_secs = results
        .summary
        .total_duration_ms
        .map_or(0.0, |ms| ms as f64 / 1000.0);

    // <testsuites>
    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "mart-tester-run"));
    suites_start.push_attribute(("tests", total.to_string().as_str()));
    suites_start.push_attribute(("failures", failures.to_string().as_str()));
    suites_start.push_attribute(("time", time_secs.to_string().as_str()));
    writer.write_event(Event::Start(suites_start))?;

    // Single <testsuite> for the run; cases already carry their category
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "default"));
    suite_start.push_attribute(("tests", total.to_string().as_str()));
    suite_start.push_attribute(("failures", failures.to_string().as_str()));
    suite_start.push_attribute(("id", results.session_id.as_str()));
    suite_start.push_attribute(("time", time_secs.to_string().as_str()));
    suite_start.push_attribute(("timestamp", results.generated_at.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for case in &results.cases {
        write_test_case(&mut writer, case)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    let xml = String::from_utf8(result)?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, case: &CaseRecord) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", case.name.as_str()));
    case_start.push_attribute(("classname", case.category.as_str()));
    let case_time = case.duration_ms.unwrap_or(0) as f64 / 1000.0;
    case_start.push_attribute(("time", case_time.to_string().as_str()));

    match &case.status {
        CaseStatus::Passed => {
            writer.write_event(Event::Empty(case_start))?;
        }
        CaseStatus::Failed { error } => {
            writer.write_event(Event::Start(case_start))?;

            let mut failure = BytesStart::new("failure");
            failure.push_attribute(("message", error.as_str()));
            writer.write_event(Event::Start(failure))?;
            writer.write_event(Event::Text(BytesText::new(&case.message)))?;
            writer.write_event(Event::End(BytesEnd::new("failure")))?;

            writer.write_event(Event::End(BytesEnd::new("testcase")))?;
        }
    }

    Ok(())
}

/// Write junit.xml into the output directory
pub fn write_report(results: &TestResults, output_dir: &Path) -> Result<()> {
    let xml = generate_junit_xml(results)?;
    let path = output_dir.join("junit.xml");
    std::fs::write(&path, xml)?;
    println!("JUnit report saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::state::HarnessSummary;

    fn record(name: &str, status: CaseStatus, message: &str) -> CaseRecord {
        CaseRecord {
            name: name.to_string(),
            category: "auth".to_string(),
            status,
            message: message.to_string(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            response_data: None,
            duration_ms: Some(250),
        }
    }

    fn results(cases: Vec<CaseRecord>) -> TestResults {
        let failed = cases.iter().filter(|c| !c.status.is_pass()).count() as u32;
        let total = cases.len() as u32;
        TestResults {
            session_id: "abc".to_string(),
            summary: HarnessSummary {
                session_id: "abc".to_string(),
                total,
                passed: total - failed,
                failed,
                total_duration_ms: Some(1500),
            },
            cases,
            generated_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn passing_cases_are_empty_elements() {
        let xml = generate_junit_xml(&results(vec![record(
            "POST /api/auth/signup",
            CaseStatus::Passed,
            "user created",
        )]))
        .unwrap();

        assert!(xml.contains(r#"tests="1""#));
        assert!(xml.contains(r#"failures="0""#));
        assert!(xml.contains(r#"name="POST /api/auth/signup""#));
        assert!(xml.contains(r#"time="0.25""#));
        assert!(!xml.contains("<failure"));
    }

    #[test]
    fn failed_cases_carry_failure_nodes() {
        let xml = generate_junit_xml(&results(vec![
            record("case a", CaseStatus::Passed, "ok"),
            record(
                "case b",
                CaseStatus::Failed {
                    error: "expected 404 but got 200".to_string(),
                },
                "expected 404 but got 200",
            ),
        ]))
        .unwrap();

        assert!(xml.contains(r#"tests="2""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"<failure message="expected 404 but got 200""#));
        assert!(xml.contains(r#"classname="auth""#));
    }

    #[test]
    fn suite_time_comes_from_summary() {
        let xml = generate_junit_xml(&results(vec![])).unwrap();
        assert!(xml.contains(r#"time="1.5""#));
    }
}
