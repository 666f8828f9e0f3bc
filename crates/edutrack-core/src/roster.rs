//! Student roster: name validation and immutable submission snapshots.

use crate::error::{EngineError, ValidationError};
use crate::model::Student;
use crate::rating::Rating;

/// Default upper bound on student name length, in characters.
pub const MAX_STUDENT_NAME_LENGTH: usize = 128;

#[derive(Debug, Clone)]
pub struct StudentRoster {
    students: Vec<Student>,
    max_name_length: usize,
}

impl Default for StudentRoster {
    fn default() -> Self {
        Self::new(MAX_STUDENT_NAME_LENGTH)
    }
}

impl StudentRoster {
    pub fn new(max_name_length: usize) -> Self {
        Self {
            students: Vec::new(),
            max_name_length,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&Student, EngineError> {
        self.students
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| EngineError::StudentNotFound(name.to_string()))
    }

    /// Check a candidate name against the roster. The first failing rule wins:
    /// empty, too long, surrounding whitespace, already taken.
    pub fn validate_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let len = name.chars().count();
        if len > self.max_name_length {
            return Err(ValidationError::NameTooLong {
                max: self.max_name_length,
                len,
            });
        }
        if name.trim() != name {
            return Err(ValidationError::WhitespaceName);
        }
        if self.students.iter().any(|s| s.name() == name) {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Validate `name` and append a snapshot of `topics` paired with the
    /// encoded `drafts`. Nothing is stored on failure.
    pub fn submit(
        &mut self,
        name: &str,
        topics: Vec<String>,
        drafts: &[Rating],
    ) -> Result<&Student, EngineError> {
        if let Err(e) = self.validate_name(name) {
            tracing::warn!(error = %e, "student rejected");
            return Err(e.into());
        }
        debug_assert_eq!(topics.len(), drafts.len());

        let ratings = drafts.iter().map(|r| r.score()).collect();
        self.students
            .push(Student::new(name.to_string(), topics, ratings));
        tracing::info!(student = %name, "student added");
        Ok(&self.students[self.students.len() - 1])
    }

    /// Drop the first pair for `topic` from every student. Returns how many
    /// students were affected.
    pub fn remove_topic(&mut self, topic: &str) -> usize {
        self.students
            .iter_mut()
            .map(|s| s.remove_topic(topic))
            .filter(|&removed| removed)
            .count()
    }

    pub fn clear(&mut self) {
        self.students.clear();
    }
}
