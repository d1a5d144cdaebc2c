//! Verification reports.

use crate::scenario::Outcome;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Outcomes of every suite in a verification run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub suites: Vec<SuiteReport>,
}

#[derive(Debug, Serialize)]
pub struct SuiteReport {
    pub path: PathBuf,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.outcomes().count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes().filter(|o| !o.passed()).count()
    }

    fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.suites.iter().flat_map(|s| s.outcomes.iter())
    }

    /// Human-readable report, one line per case.
    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        for suite in &self.suites {
            writeln!(out, "{}", suite.path.display())?;
            for outcome in &suite.outcomes {
                let detail = outcome
                    .detail
                    .as_deref()
                    .map(|d| format!(" ({d})"))
                    .unwrap_or_default();
                if outcome.passed() {
                    writeln!(out, "  ✅ {}: {}{detail}", outcome.name, outcome.actual)?;
                } else {
                    writeln!(
                        out,
                        "  ❌ {}: expected {}, got {}{detail}",
                        outcome.name, outcome.expected, outcome.actual
                    )?;
                }
            }
        }

        let failed = self.failed();
        writeln!(
            out,
            "\nSummary: {} passed, {failed} failed",
            self.total() - failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Expect;

    fn outcome(name: &str, expected: Expect, actual: Expect) -> Outcome {
        Outcome {
            name: name.to_string(),
            expected,
            actual,
            detail: (actual == Expect::Deny).then(|| "teacher does not teach class classB".to_string()),
        }
    }

    fn sample() -> Report {
        Report {
            suites: vec![SuiteReport {
                path: PathBuf::from("scenarios/homework.toml"),
                outcomes: vec![
                    outcome("own class", Expect::Allow, Expect::Allow),
                    outcome("other class", Expect::Deny, Expect::Deny),
                    outcome("regression", Expect::Deny, Expect::Allow),
                ],
            }],
        }
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.total(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(Report::default().total(), 0);
    }

    #[test]
    fn test_write_text() {
        let mut out = Vec::new();
        sample().write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("scenarios/homework.toml\n"));
        assert!(text.contains("  ✅ own class: allow\n"));
        assert!(text.contains("  ✅ other class: deny (teacher does not teach class classB)\n"));
        assert!(text.contains("  ❌ regression: expected deny, got allow\n"));
        assert!(text.ends_with("Summary: 2 passed, 1 failed\n"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        let first = &json["suites"][0]["outcomes"][0];
        assert_eq!(first["name"], "own class");
        assert_eq!(first["expected"], "allow");
        assert_eq!(first["detail"], serde_json::Value::Null);
    }
}
