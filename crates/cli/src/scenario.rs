//! Rule verification scenarios.
//!
//! A suite is a TOML file of `[[case]]` tables. Each case names the rule it
//! exercises, the inputs, and whether the rule should allow or deny:
//!
//! ```toml
//! [[case]]
//! name = "Teacher creates homework for their own class"
//! rule = "class_scoped"
//! expect = "allow"
//! actor = { id = "teacher1", role = "teacher", class_ids = ["classA"] }
//! request = { method = "create", new = { classId = "classA", title = "HW1" } }
//! ```

use crate::error::{Error, Result};
use rules::{Actor, Decision, MessageDraft, Method, Payload, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A parsed scenario file.
#[derive(Debug, Deserialize)]
pub struct Suite {
    #[serde(default, rename = "case")]
    pub cases: Vec<Case>,
}

impl Suite {
    /// Load a suite from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| Error::Scenario {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a suite from a TOML string.
    pub fn parse(toml: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    pub fn run(&self) -> Vec<Outcome> {
        self.cases.iter().map(Case::run).collect()
    }
}

/// Expected or observed result of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expect {
    Allow,
    Deny,
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expect::Allow => "allow",
            Expect::Deny => "deny",
        })
    }
}

/// One scenario.
#[derive(Debug, Deserialize)]
pub struct Case {
    pub name: String,
    pub expect: Expect,
    #[serde(flatten)]
    pub check: Check,
}

/// The rule a case exercises, with its inputs.
#[derive(Debug, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Check {
    /// Homework, course and event writes.
    ClassScoped {
        actor: ActorClaims,
        request: WriteRequest,
    },
    Grade {
        actor: ActorClaims,
        request: WriteRequest,
    },
    Message {
        actor: ActorClaims,
        message: MessageDraft,
    },
    Profile {
        actor: ActorClaims,
        target_id: UserId,
        old: Payload,
        new: Payload,
    },
    Link {
        url: String,
    },
}

/// Session claims as they would arrive from the auth provider.
///
/// Roles stay raw strings so suites can exercise malformed claims.
#[derive(Debug, Default, Deserialize)]
pub struct ActorClaims {
    pub id: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub class_ids: Vec<String>,
}

impl ActorClaims {
    pub fn to_actor(&self) -> Actor {
        Actor::from_claims(
            self.id.as_deref(),
            self.role.as_deref(),
            self.class_ids.iter().cloned(),
        )
    }
}

/// A raw write: method plus whichever snapshots the request carried.
#[derive(Debug, Deserialize)]
pub struct WriteRequest {
    pub method: Method,
    pub old: Option<Payload>,
    pub new: Option<Payload>,
}

/// Result of running one case.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub name: String,
    pub expected: Expect,
    pub actual: Expect,
    /// Denial reason or link verdict.
    pub detail: Option<String>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

impl Case {
    pub fn run(&self) -> Outcome {
        let (actual, detail) = self.check.evaluate();
        tracing::debug!(case = %self.name, %actual, expected = %self.expect, "case evaluated");
        Outcome {
            name: self.name.clone(),
            expected: self.expect,
            actual,
            detail,
        }
    }
}

impl Check {
    fn evaluate(&self) -> (Expect, Option<String>) {
        let decision = match self {
            Check::ClassScoped { actor, request } => rules::evaluate_request(
                &actor.to_actor(),
                request.method,
                request.old.as_ref(),
                request.new.as_ref(),
            ),
            Check::Grade { actor, request } => rules::evaluate_grade_request(
                &actor.to_actor(),
                request.method,
                request.old.as_ref(),
                request.new.as_ref(),
            ),
            Check::Message { actor, message } => {
                rules::evaluate_message_create(&actor.to_actor(), message)
            }
            Check::Profile {
                actor,
                target_id,
                old,
                new,
            } => rules::evaluate_profile_update(&actor.to_actor(), target_id, old, new),
            Check::Link { url } => {
                let verdict = links::classify(url);
                let actual = if verdict.is_safe() {
                    Expect::Allow
                } else {
                    Expect::Deny
                };
                return (actual, Some(verdict.to_string()));
            }
        };

        match decision {
            Decision::Allow => (Expect::Allow, None),
            Decision::Deny { reason } => (Expect::Deny, Some(reason.to_string())),
        }
    }
}

/// All `*.toml` files directly under `dir`, sorted by name.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(toml: &str) -> Vec<Outcome> {
        Suite::parse(toml).unwrap().run()
    }

    fn assert_all_pass(name: &str, toml: &str) {
        let outcomes = run(toml);
        assert!(!outcomes.is_empty(), "{name} has no cases");
        for outcome in outcomes {
            assert!(
                outcome.passed(),
                "{name}: {} expected {}, got {} ({:?})",
                outcome.name,
                outcome.expected,
                outcome.actual,
                outcome.detail
            );
        }
    }

    #[test]
    fn test_discover_lists_toml_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), "").unwrap();
        std::fs::write(dir.path().join("a.toml"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("toml"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.toml")).unwrap();
        std::fs::write(dir.path().join("nested.toml").join("c.toml"), "").unwrap();

        let files = discover(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.toml"), dir.path().join("b.toml")]
        );
    }

    #[test]
    fn test_discover_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_class_scoped_case() {
        let outcomes = run(r#"
[[case]]
name = "move between owned classes"
rule = "class_scoped"
expect = "deny"
actor = { id = "teacher1", role = "teacher", class_ids = ["classA", "classB"] }
request = { method = "update", old = { classId = "classA" }, new = { classId = "classB" } }
"#);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].passed());
        assert_eq!(
            outcomes[0].detail.as_deref(),
            Some("record cannot be moved from class classA to class classB")
        );
    }

    #[test]
    fn test_failing_case_is_reported() {
        let outcomes = run(r#"
[[case]]
name = "wrong expectation"
rule = "class_scoped"
expect = "allow"
actor = { id = "student1", role = "student" }
request = { method = "create", new = { classId = "classA" } }
"#);
        assert!(!outcomes[0].passed());
        assert_eq!(outcomes[0].actual, Expect::Deny);
    }

    #[test]
    fn test_missing_snapshot_denies() {
        let outcomes = run(r#"
[[case]]
name = "delete without old"
rule = "grade"
expect = "deny"
actor = { id = "director1", role = "director" }
request = { method = "delete" }
"#);
        assert!(outcomes[0].passed());
        assert_eq!(
            outcomes[0].detail.as_deref(),
            Some("request is missing a record snapshot")
        );
    }

    #[test]
    fn test_malformed_actor_denies() {
        let outcomes = run(r#"
[[case]]
name = "no role"
rule = "message"
expect = "deny"
actor = { id = "u1" }
message = { senderId = "u1", receiverId = "u2" }

[[case]]
name = "no actor fields at all"
rule = "class_scoped"
expect = "deny"
actor = {}
request = { method = "create", new = { classId = "classA" } }
"#);
        assert!(outcomes.iter().all(Outcome::passed));
    }

    #[test]
    fn test_link_case_detail() {
        let outcomes = run(r#"
[[case]]
name = "javascript"
rule = "link"
expect = "deny"
url = "javascript:alert(1)"
"#);
        assert!(outcomes[0].passed());
        assert_eq!(outcomes[0].detail.as_deref(), Some("rejected scheme javascript:"));
    }

    #[test]
    fn test_unknown_rule_is_a_parse_error() {
        let err = Suite::parse(r#"
[[case]]
name = "x"
rule = "attendance"
expect = "allow"
"#)
        .unwrap_err();
        assert!(err.to_string().contains("attendance"));
    }

    #[test]
    fn test_bundled_suites_pass() {
        assert_all_pass("homework", include_str!("../../../scenarios/homework.toml"));
        assert_all_pass("grades", include_str!("../../../scenarios/grades.toml"));
        assert_all_pass("messages", include_str!("../../../scenarios/messages.toml"));
        assert_all_pass("profiles", include_str!("../../../scenarios/profiles.toml"));
        assert_all_pass("links", include_str!("../../../scenarios/links.toml"));
    }
}
