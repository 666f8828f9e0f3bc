//! TOML class session files.
//!
//! A session names a class, its starting topics, and students to submit in
//! order. Loading one replays the students through the normal submission
//! flow, so every name rule still applies.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::EdutrackConfig;
use crate::engine::Engine;
use crate::rating::Rating;
use crate::roster::StudentRoster;

/// A parsed class session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub class_name: String,
    pub topics: Vec<String>,
    pub students: Vec<SessionStudent>,
}

/// A student entry with its raw rating symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStudent {
    pub name: String,
    pub ratings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlSessionFile {
    class: TomlClassHeader,
    #[serde(default)]
    students: Vec<TomlStudent>,
}

#[derive(Debug, Deserialize)]
struct TomlClassHeader {
    #[serde(default = "default_class_name")]
    name: String,
    topics: Vec<String>,
}

fn default_class_name() -> String {
    "Edutrack".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    name: String,
    #[serde(default)]
    ratings: Vec<String>,
}

/// Parse a session file.
pub fn parse_session(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;

    parse_session_str(&content, path)
}

/// Parse session TOML text; `source_path` is only used in error messages.
pub fn parse_session_str(content: &str, source_path: &Path) -> Result<Session> {
    let parsed: TomlSessionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(Session {
        class_name: parsed.class.name,
        topics: parsed.class.topics,
        students: parsed
            .students
            .into_iter()
            .map(|s| SessionStudent {
                name: s.name,
                ratings: s.ratings,
            })
            .collect(),
    })
}

impl Session {
    /// Build an engine for this session: the session's topics replace the
    /// config's initial topics, then each student is staged and submitted.
    ///
    /// Missing trailing ratings stay `-`; extra ratings are ignored.
    pub fn build_engine(&self, config: &EdutrackConfig) -> Result<Engine> {
        let mut engine = Engine::from_config_with_topics(config, self.topics.iter().cloned())
            .with_context(|| format!("class '{}' cannot be created", self.class_name))?;

        for student in &self.students {
            for (index, symbol) in student.ratings.iter().take(self.topics.len()).enumerate() {
                let rating: Rating = symbol
                    .parse()
                    .with_context(|| format!("student '{}', topic {}", student.name, index + 1))?;
                engine.set_draft_rating(index, rating)?;
            }
            engine
                .submit(&student.name)
                .with_context(|| format!("student '{}' rejected", student.name))?;
        }

        tracing::info!(
            class = %self.class_name,
            topics = self.topics.len(),
            students = self.students.len(),
            "session loaded"
        );
        Ok(engine)
    }
}

/// A warning from session validation.
#[derive(Debug, Clone)]
pub struct SessionWarning {
    /// The student the warning is about, if any.
    pub student: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a session for problems before loading it.
pub fn validate_session(session: &Session, config: &EdutrackConfig) -> Vec<SessionWarning> {
    let mut warnings = Vec::new();

    if session.topics.is_empty() {
        warnings.push(SessionWarning {
            student: None,
            message: "class has no topics".into(),
        });
    }

    let mut seen_topics = HashSet::new();
    for topic in &session.topics {
        if topic.is_empty() {
            warnings.push(SessionWarning {
                student: None,
                message: "topic name is empty".into(),
            });
        } else if !seen_topics.insert(topic.as_str()) {
            warnings.push(SessionWarning {
                student: None,
                message: format!("duplicate topic name: {topic}"),
            });
        }
    }

    // Replay name validation against a scratch roster so duplicates are caught.
    let mut roster = StudentRoster::new(config.max_student_name_length);
    for student in &session.students {
        let names: Vec<String> = session.topics.clone();
        let drafts = vec![Rating::default(); names.len()];
        if let Err(e) = roster.submit(&student.name, names, &drafts) {
            warnings.push(SessionWarning {
                student: Some(student.name.clone()),
                message: e.to_string(),
            });
        }

        if student.ratings.len() != session.topics.len() {
            warnings.push(SessionWarning {
                student: Some(student.name.clone()),
                message: format!(
                    "{} rating(s) for {} topic(s)",
                    student.ratings.len(),
                    session.topics.len()
                ),
            });
        }

        for symbol in &student.ratings {
            if let Err(e) = symbol.parse::<Rating>() {
                warnings.push(SessionWarning {
                    student: Some(student.name.clone()),
                    message: e.to_string(),
                });
            }
        }
    }

    warnings
}
