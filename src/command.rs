//! Command dispatch for triage sessions.
//!
//! Front ends (an interactive prompt, a script, an IPC bridge) turn user
//! input into a `Command` and hand it to [`dispatch`], which maps each
//! command onto one controller operation and returns a typed `Outcome`.
//! No text I/O happens here.
//!
//! # Text Syntax
//!
//! | Command | Example |
//! |---------|---------|
//! | `add <id> <severity> <name...>` | `add 101 3 Jane Doe` |
//! | `update <id> <severity>` | `update 101 5` |
//! | `serve` | |
//! | `compare` | |
//! | `history` / `pop` / `peek` | |
//! | `traverse <inorder\|preorder\|postorder>` | `traverse preorder` |
//! | `find <id>` / `remove <id>` | `find 101` |
//! | `status` | |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{TriageError, TriageResult};
use crate::models::{HistoryEntry, Patient, PatientId, Severity};
use crate::records::TraversalOrder;
use crate::triage::{OrderingComparison, ServedPatient, TriageController, TriageSnapshot};

/// An operation requested by a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params", rename_all = "snake_case")]
pub enum Command {
    /// Admit a patient.
    AddPatient {
        /// Patient ID.
        id: PatientId,
        /// Patient name.
        name: String,
        /// Raw severity (validated on dispatch).
        severity: i64,
    },
    /// Change a waiting patient's severity.
    UpdateSeverity {
        /// Patient ID.
        id: PatientId,
        /// Raw severity (validated on dispatch).
        severity: i64,
    },
    /// Serve the most urgent patient.
    ServeNext,
    /// Compare severity-first and FCFS orderings of the waiting set.
    CompareOrderings,
    /// List the service history, most recent first.
    ShowHistory,
    /// Remove the most recent history entry.
    PopHistory,
    /// Show the most recent history entry.
    PeekHistory,
    /// List records in a traversal order.
    Traverse {
        /// Visiting order.
        order: TraversalOrder,
    },
    /// Look up one record.
    FindPatient {
        /// Patient ID.
        id: PatientId,
    },
    /// Delete a record (withdrawing the patient if still waiting).
    RemoveRecord {
        /// Patient ID.
        id: PatientId,
    },
    /// Summary counts.
    Status,
}

/// What a dispatched command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    /// Patient admitted.
    Admitted(Patient),
    /// Severity changed.
    SeverityUpdated {
        /// Patient ID.
        id: PatientId,
        /// Severity before the update.
        previous: Severity,
        /// Severity after the update.
        current: Severity,
    },
    /// Patient served.
    Served(ServedPatient),
    /// Orderings of the waiting set.
    Comparison(OrderingComparison),
    /// History, most recent first.
    History(Vec<HistoryEntry>),
    /// Popped history entry (`None` when the history was empty).
    HistoryPopped(Option<HistoryEntry>),
    /// Top history entry (`None` when the history is empty).
    HistoryTop(Option<HistoryEntry>),
    /// Records in traversal order.
    Records {
        /// Order used.
        order: TraversalOrder,
        /// Records visited.
        patients: Vec<Patient>,
    },
    /// Found record.
    Found(Patient),
    /// Removed record.
    Removed(Patient),
    /// Summary counts.
    Status(TriageSnapshot),
}

/// Runs one command against a controller.
///
/// # Errors
/// Whatever the underlying controller operation reports. The controller is
/// unchanged on error.
pub fn dispatch(controller: &mut TriageController, command: Command) -> TriageResult<Outcome> {
    let outcome = match command {
        Command::AddPatient { id, name, severity } => {
            Outcome::Admitted(controller.add_patient(id, &name, severity)?)
        }
        Command::UpdateSeverity { id, severity } => {
            let previous = controller.update_severity(id, severity)?;
            let current = controller.find(id)?.severity;
            Outcome::SeverityUpdated {
                id,
                previous,
                current,
            }
        }
        Command::ServeNext => Outcome::Served(controller.serve_patient()?),
        Command::CompareOrderings => Outcome::Comparison(controller.compare_orderings()),
        Command::ShowHistory => {
            Outcome::History(controller.history().iter().cloned().collect())
        }
        Command::PopHistory => Outcome::HistoryPopped(controller.pop_history()),
        Command::PeekHistory => Outcome::HistoryTop(controller.peek_history().cloned()),
        Command::Traverse { order } => Outcome::Records {
            order,
            patients: controller.traverse(order).cloned().collect(),
        },
        Command::FindPatient { id } => Outcome::Found(controller.find(id)?.clone()),
        Command::RemoveRecord { id } => Outcome::Removed(controller.remove_record(id)?),
        Command::Status => Outcome::Status(controller.snapshot()),
    };
    Ok(outcome)
}

impl FromStr for Command {
    type Err = TriageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| TriageError::InvalidCommand("empty command".to_string()))?
            .to_ascii_lowercase();

        let command = match verb.as_str() {
            "add" => {
                let id = parse_id(words.next())?;
                let severity = parse_severity(words.next())?;
                let name = words.by_ref().collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(TriageError::InvalidCommand(
                        "usage: add <id> <severity> <name>".to_string(),
                    ));
                }
                Command::AddPatient { id, name, severity }
            }
            "update" => Command::UpdateSeverity {
                id: parse_id(words.next())?,
                severity: parse_severity(words.next())?,
            },
            "serve" => Command::ServeNext,
            "compare" => Command::CompareOrderings,
            "history" => Command::ShowHistory,
            "pop" => Command::PopHistory,
            "peek" => Command::PeekHistory,
            "traverse" => {
                let order = words.next().ok_or_else(|| {
                    TriageError::InvalidCommand(
                        "usage: traverse <inorder|preorder|postorder>".to_string(),
                    )
                })?;
                Command::Traverse {
                    order: order.parse()?,
                }
            }
            "inorder" | "preorder" | "postorder" => Command::Traverse {
                order: verb.parse()?,
            },
            "find" => Command::FindPatient {
                id: parse_id(words.next())?,
            },
            "remove" => Command::RemoveRecord {
                id: parse_id(words.next())?,
            },
            "status" => Command::Status,
            other => {
                return Err(TriageError::InvalidCommand(format!(
                    "unknown command '{other}'"
                )))
            }
        };

        if !matches!(command, Command::AddPatient { .. }) {
            if let Some(extra) = words.next() {
                return Err(TriageError::InvalidCommand(format!(
                    "unexpected argument '{extra}'"
                )));
            }
        }
        Ok(command)
    }
}

fn parse_id(word: Option<&str>) -> TriageResult<PatientId> {
    let word = word.ok_or_else(|| TriageError::InvalidCommand("missing patient id".to_string()))?;
    word.parse()
        .map_err(|_| TriageError::InvalidCommand(format!("invalid patient id '{word}'")))
}

fn parse_severity(word: Option<&str>) -> TriageResult<i64> {
    let word = word.ok_or_else(|| TriageError::InvalidCommand("missing severity".to_string()))?;
    word.parse()
        .map_err(|_| TriageError::InvalidCommand(format!("invalid severity '{word}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::triage::TriageConfig;

    fn controller() -> TriageController {
        TriageController::new(&TriageConfig::new(["Grey", "Yang"]).with_history_capacity(3))
            .unwrap()
    }

    fn run(controller: &mut TriageController, line: &str) -> TriageResult<Outcome> {
        dispatch(controller, line.parse()?)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "add 101 3 Jane Doe".parse::<Command>().unwrap(),
            Command::AddPatient {
                id: 101,
                name: "Jane Doe".to_string(),
                severity: 3
            }
        );
        assert_eq!(
            "UPDATE 7 5".parse::<Command>().unwrap(),
            Command::UpdateSeverity { id: 7, severity: 5 }
        );
        assert_eq!("serve".parse::<Command>().unwrap(), Command::ServeNext);
        assert_eq!(
            "traverse post".parse::<Command>().unwrap(),
            Command::Traverse {
                order: TraversalOrder::Postorder
            }
        );
        assert_eq!(
            "preorder".parse::<Command>().unwrap(),
            Command::Traverse {
                order: TraversalOrder::Preorder
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "fly", "add 1 3", "add x 3 Bob", "update 1", "serve now", "find"] {
            let err = bad.parse::<Command>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{bad}");
        }
    }

    #[test]
    fn test_session_flow() {
        let mut triage = controller();
        run(&mut triage, "add 101 3 Alice").unwrap();
        run(&mut triage, "add 102 5 Bob").unwrap();
        run(&mut triage, "add 103 3 Carol").unwrap();

        match run(&mut triage, "compare").unwrap() {
            Outcome::Comparison(cmp) => {
                assert_eq!(cmp.priority_ids(), vec![102, 101, 103]);
                assert_eq!(cmp.fcfs_ids(), vec![101, 102, 103]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        match run(&mut triage, "update 103 4").unwrap() {
            Outcome::SeverityUpdated { id, previous, current } => {
                assert_eq!(id, 103);
                assert_eq!(previous.value(), 3);
                assert_eq!(current.value(), 4);
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        let served: Vec<(PatientId, String)> = (0..3)
            .map(|_| match run(&mut triage, "serve").unwrap() {
                Outcome::Served(s) => (s.patient.id, s.doctor.name),
                other => panic!("unexpected outcome {other:?}"),
            })
            .collect();
        assert_eq!(
            served,
            vec![
                (102, "Grey".to_string()),
                (103, "Yang".to_string()),
                (101, "Grey".to_string())
            ]
        );

        match run(&mut triage, "history").unwrap() {
            Outcome::History(entries) => {
                let ids: Vec<PatientId> = entries.iter().map(|e| e.patient_id).collect();
                assert_eq!(ids, vec![101, 103, 102]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        match run(&mut triage, "inorder").unwrap() {
            Outcome::Records { patients, .. } => {
                let ids: Vec<PatientId> = patients.iter().map(|p| p.id).collect();
                assert_eq!(ids, vec![101, 102, 103]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_errors_pass_through() {
        let mut triage = controller();
        assert_eq!(
            run(&mut triage, "serve").unwrap_err(),
            TriageError::EmptyQueue
        );
        assert_eq!(
            run(&mut triage, "add 1 9 Zed").unwrap_err(),
            TriageError::InvalidSeverity(9)
        );
        assert_eq!(
            run(&mut triage, "find 1").unwrap_err(),
            TriageError::NotFound(1)
        );
        assert_eq!(run(&mut triage, "pop").unwrap(), Outcome::HistoryPopped(None));
    }

    #[test]
    fn test_history_pop_and_peek() {
        let mut triage = controller();
        run(&mut triage, "add 1 2 A").unwrap();
        run(&mut triage, "serve").unwrap();

        match run(&mut triage, "peek").unwrap() {
            Outcome::HistoryTop(Some(entry)) => assert_eq!(entry.patient_id, 1),
            other => panic!("unexpected outcome {other:?}"),
        }
        match run(&mut triage, "pop").unwrap() {
            Outcome::HistoryPopped(Some(entry)) => assert_eq!(entry.sequence, 1),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(run(&mut triage, "peek").unwrap(), Outcome::HistoryTop(None));
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = Command::UpdateSeverity { id: 4, severity: 2 };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["cmd"], "update_severity");
        assert_eq!(json["params"]["id"], 4);

        let back: Command =
            serde_json::from_str(r#"{"cmd":"traverse","params":{"order":"inorder"}}"#).unwrap();
        assert_eq!(
            back,
            Command::Traverse {
                order: TraversalOrder::Inorder
            }
        );
        let unit: Command = serde_json::from_str(r#"{"cmd":"serve_next"}"#).unwrap();
        assert_eq!(unit, Command::ServeNext);
    }
}
