//! Line-oriented command grammar for scripts and the interactive shell.
//!
//! Topic indices are 1-based here and 0-based in the engine API.
//!
//! ```text
//! add-topic                 edit <n>             draft-name <n> <text>
//! commit <n>                rename <n> <name>    rate <n> <-|~|+>
//! delete <n>                cancel               confirm <n>
//! apply                     submit <name>        reset
//! topics                    students             class
//! student <name>
//! ```

use std::fmt;

use thiserror::Error;

use crate::aggregate::{ClassPerformance, IndividualPerformance};
use crate::engine::{Engine, Removal};
use crate::error::{EngineError, ValidationError};
use crate::model::{Student, Topic};
use crate::rating::Rating;

/// A parsed command. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTopic,
    ToggleEdit(usize),
    DraftName(usize, String),
    CommitDraft(usize),
    Rename(usize, String),
    Rate(usize, Rating),
    ArmDelete(usize),
    CancelDelete,
    ConfirmDelete(usize),
    ApplyDeletion,
    Submit(String),
    Reset,
    Topics,
    Students,
    Class,
    Student(String),
}

impl Command {
    /// Whether the command only reads engine state.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::Topics | Command::Students | Command::Class | Command::Student(_)
        )
    }
}

/// A line that could not be parsed into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid topic number: {0:?} (topics are numbered from 1)")]
    InvalidIndex(String),

    #[error(transparent)]
    InvalidRating(#[from] ValidationError),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

    let command = match word {
        "add-topic" => Command::AddTopic,
        "edit" => Command::ToggleEdit(index_arg("edit", rest)?),
        "draft-name" => {
            let (index, text) = index_and_text("draft-name", rest)?;
            Command::DraftName(index, text)
        }
        "commit" => Command::CommitDraft(index_arg("commit", rest)?),
        "rename" => {
            let (index, name) = index_and_text("rename", rest)?;
            Command::Rename(index, name)
        }
        "rate" => {
            let mut args = rest.split_whitespace();
            let index = parse_index(args.next().ok_or(ParseError::MissingArgument {
                command: "rate",
                argument: "topic number",
            })?)?;
            let symbol = args.next().ok_or(ParseError::MissingArgument {
                command: "rate",
                argument: "rating",
            })?;
            Command::Rate(index, symbol.parse()?)
        }
        "delete" => Command::ArmDelete(index_arg("delete", rest)?),
        "cancel" => Command::CancelDelete,
        "confirm" => Command::ConfirmDelete(index_arg("confirm", rest)?),
        "apply" => Command::ApplyDeletion,
        // The raw remainder, so name validation sees stray whitespace.
        "submit" => Command::Submit(rest.to_string()),
        "reset" => Command::Reset,
        "topics" => Command::Topics,
        "students" => Command::Students,
        "class" => Command::Class,
        "student" => {
            let name = rest.trim();
            if name.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "student",
                    argument: "name",
                });
            }
            Command::Student(name.to_string())
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Parse a whole script, returning commands with their 1-based line numbers.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Command)>, (usize, ParseError)> {
    let mut commands = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line).map_err(|e| (i + 1, e))? {
            commands.push((i + 1, command));
        }
    }
    Ok(commands)
}

fn parse_index(raw: &str) -> Result<usize, ParseError> {
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| ParseError::InvalidIndex(raw.to_string()))
}

fn index_arg(command: &'static str, rest: &str) -> Result<usize, ParseError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            argument: "topic number",
        });
    }
    parse_index(raw)
}

fn index_and_text(command: &'static str, rest: &str) -> Result<(usize, String), ParseError> {
    let rest = rest.trim_start();
    let (raw, text) = rest.split_once(' ').unwrap_or((rest, ""));
    Ok((index_arg(command, raw)?, text.to_string()))
}

/// What a command did, or the data a query returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TopicAdded(String),
    EditToggled { topic: String, editing: bool },
    DraftNameSet { topic: String },
    TopicRenamed { from: String, to: String },
    RatingSet { topic: String, rating: Rating },
    DeleteArmed { topic: String },
    DeleteCancelled { was_armed: bool },
    DeleteAuthorized { topic: String },
    TopicRemoved(Removal),
    NothingToApply,
    StudentAdded(String),
    Reset,
    Topics(Vec<Topic>),
    Students(Vec<Student>),
    Class(ClassPerformance),
    Individual(IndividualPerformance),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TopicAdded(name) => write!(f, "Topic '{name}' added."),
            Outcome::EditToggled { topic, editing: true } => {
                write!(f, "Editing topic '{topic}'.")
            }
            Outcome::EditToggled { topic, editing: false } => {
                write!(f, "Stopped editing topic '{topic}'.")
            }
            Outcome::DraftNameSet { topic } => write!(f, "Rename buffer for '{topic}' updated."),
            Outcome::TopicRenamed { from, to } => write!(f, "Topic '{from}' renamed to '{to}'."),
            Outcome::RatingSet { topic, rating } => write!(f, "Rating for {topic}: {rating}"),
            Outcome::DeleteArmed { topic } => {
                write!(f, "Delete topic '{topic}'? Confirm or cancel.")
            }
            Outcome::DeleteCancelled { was_armed: true } => write!(f, "Deletion cancelled."),
            Outcome::DeleteCancelled { was_armed: false } => write!(f, "No deletion pending."),
            Outcome::DeleteAuthorized { topic } => write!(f, "Deletion of '{topic}' confirmed."),
            Outcome::TopicRemoved(removal) => {
                write!(f, "Topic '{}' has been removed.", removal.topic)
            }
            Outcome::NothingToApply => write!(f, "No deletion to apply."),
            Outcome::StudentAdded(name) => write!(f, "Student {name} added successfully!"),
            Outcome::Reset => write!(f, "All data has been reset."),
            Outcome::Topics(topics) => {
                for (i, topic) in topics.iter().enumerate() {
                    writeln!(f, "{}. {} [{}]", i + 1, topic.name(), topic.draft_rating())?;
                }
                Ok(())
            }
            Outcome::Students(students) => {
                for student in students {
                    writeln!(f, "{}", student.name())?;
                }
                Ok(())
            }
            Outcome::Class(ClassPerformance::NoData) => write!(f, "No students added yet."),
            Outcome::Class(ClassPerformance::Series(series)) => {
                for count in series {
                    writeln!(f, "{}: {}", count.topic, count.plus_count)?;
                }
                Ok(())
            }
            Outcome::Individual(perf) => {
                for point in &perf.series {
                    writeln!(f, "{}: {}", point.topic, point.rating)?;
                }
                Ok(())
            }
        }
    }
}

impl Engine {
    /// Run one command against the engine.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome, EngineError> {
        let outcome = match command {
            Command::AddTopic => Outcome::TopicAdded(self.add_topic()),
            Command::ToggleEdit(index) => {
                let editing = self.toggle_edit(*index)?;
                Outcome::EditToggled {
                    topic: self.topic_name(*index),
                    editing,
                }
            }
            Command::DraftName(index, text) => {
                self.set_draft_name(*index, text.clone())?;
                Outcome::DraftNameSet {
                    topic: self.topic_name(*index),
                }
            }
            Command::CommitDraft(index) => {
                let from = self.commit_draft_name(*index)?;
                Outcome::TopicRenamed {
                    from,
                    to: self.topic_name(*index),
                }
            }
            Command::Rename(index, name) => {
                let from = self.commit_edit(*index, name.clone())?;
                Outcome::TopicRenamed {
                    from,
                    to: name.clone(),
                }
            }
            Command::Rate(index, rating) => {
                self.set_draft_rating(*index, *rating)?;
                Outcome::RatingSet {
                    topic: self.topic_name(*index),
                    rating: *rating,
                }
            }
            Command::ArmDelete(index) => {
                self.arm_delete(*index)?;
                Outcome::DeleteArmed {
                    topic: self.topic_name(*index),
                }
            }
            Command::CancelDelete => Outcome::DeleteCancelled {
                was_armed: self.cancel_delete(),
            },
            Command::ConfirmDelete(index) => {
                self.confirm_delete(*index)?;
                Outcome::DeleteAuthorized {
                    topic: self.topic_name(*index),
                }
            }
            Command::ApplyDeletion => match self.apply_pending_deletion()? {
                Some(removal) => Outcome::TopicRemoved(removal),
                None => Outcome::NothingToApply,
            },
            Command::Submit(name) => Outcome::StudentAdded(self.submit(name)?.name().to_string()),
            Command::Reset => {
                self.reset();
                Outcome::Reset
            }
            Command::Topics => Outcome::Topics(self.list_topics().to_vec()),
            Command::Students => Outcome::Students(self.list_students().to_vec()),
            Command::Class => Outcome::Class(self.class_performance()),
            Command::Student(name) => Outcome::Individual(self.individual_performance(name)?),
        };
        Ok(outcome)
    }

    fn topic_name(&self, index: usize) -> String {
        self.registry()
            .get(index)
            .map(|t| t.name().to_string())
            .unwrap_or_default()
    }
}
