//! The engine facade: one mutable object holding the topic registry and
//! the student roster, exposing the command/query API the presentation
//! layer drives.
//!
//! Every command runs to completion before the next is issued. Queries
//! never mutate.

use crate::aggregate::{self, ClassPerformance, IndividualPerformance};
use crate::config::EdutrackConfig;
use crate::error::EngineError;
use crate::model::{DeletionState, Student, Topic};
use crate::rating::Rating;
use crate::registry::TopicRegistry;
use crate::roster::StudentRoster;

/// Result of applying an authorized topic deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Name of the removed topic.
    pub topic: String,
    /// Students that lost a `(topic, rating)` pair.
    pub students_affected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: TopicRegistry,
    roster: StudentRoster,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a class with the given topics and default settings.
    pub fn with_topics<I, S>(names: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            registry: TopicRegistry::with_topics(names)?,
            roster: StudentRoster::default(),
        })
    }

    pub fn from_config(config: &EdutrackConfig) -> Result<Self, EngineError> {
        Self::from_config_with_topics(config, config.initial_topics.iter().cloned())
    }

    /// Apply `config` but start from `topics` instead of its initial list.
    pub fn from_config_with_topics<I, S>(
        config: &EdutrackConfig,
        topics: I,
    ) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = TopicRegistry::with_topics(topics)?
            .with_topic_prefix(config.topic_prefix.clone())
            .with_strict_names(config.reject_empty_topic_names);
        Ok(Self {
            registry,
            roster: StudentRoster::new(config.max_student_name_length),
        })
    }

    pub fn registry(&self) -> &TopicRegistry {
        &self.registry
    }

    pub fn roster(&self) -> &StudentRoster {
        &self.roster
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Append a generated topic and return its name.
    pub fn add_topic(&mut self) -> String {
        self.registry.add_topic().name().to_string()
    }

    /// Enter or leave edit mode for a topic. Returns the new edit state.
    pub fn toggle_edit(&mut self, index: usize) -> Result<bool, EngineError> {
        self.registry.toggle_edit(index)
    }

    pub fn set_draft_name(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.registry.set_draft_name(index, text)
    }

    /// Rename a topic. Past students keep the name they were rated under.
    pub fn commit_edit(
        &mut self,
        index: usize,
        new_name: impl Into<String>,
    ) -> Result<String, EngineError> {
        self.registry.commit_edit(index, new_name)
    }

    pub fn commit_draft_name(&mut self, index: usize) -> Result<String, EngineError> {
        self.registry.commit_draft_name(index)
    }

    pub fn set_draft_rating(&mut self, index: usize, rating: Rating) -> Result<(), EngineError> {
        self.registry.set_draft_rating(index, rating)
    }

    pub fn arm_delete(&mut self, index: usize) -> Result<(), EngineError> {
        self.registry.arm_delete(index)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.registry.cancel_delete()
    }

    pub fn confirm_delete(&mut self, index: usize) -> Result<(), EngineError> {
        self.registry.confirm_delete(index)
    }

    /// Remove the authorized topic and cascade into every student record,
    /// dropping the first pair with the removed topic's name.
    pub fn apply_pending_deletion(&mut self) -> Result<Option<Removal>, EngineError> {
        let Some(removed) = self.registry.apply_pending_deletion()? else {
            return Ok(None);
        };
        let students_affected = self.roster.remove_topic(removed.name());
        tracing::info!(
            topic = %removed.name(),
            students_affected,
            "topic removed from student records"
        );
        Ok(Some(Removal {
            topic: removed.name().to_string(),
            students_affected,
        }))
    }

    /// Record a student with a snapshot of the current topics and draft
    /// ratings, then reset all drafts to `-`.
    pub fn submit(&mut self, name: &str) -> Result<&Student, EngineError> {
        let topics = self.registry.names();
        let drafts = self.registry.draft_ratings();
        let student = self.roster.submit(name, topics, &drafts)?;
        self.registry.reset_drafts();
        Ok(student)
    }

    /// Drop every student and reset draft ratings. Topics are kept.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.registry.reset_drafts();
        tracing::info!("all data reset");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn list_topics(&self) -> &[Topic] {
        self.registry.topics()
    }

    pub fn deletion_state(&self) -> DeletionState {
        self.registry.deletion_state()
    }

    pub fn list_students(&self) -> &[Student] {
        self.roster.students()
    }

    pub fn class_performance(&self) -> ClassPerformance {
        aggregate::class_performance(self.registry.topics(), self.roster.students())
    }

    pub fn individual_performance(
        &self,
        student: &str,
    ) -> Result<IndividualPerformance, EngineError> {
        let student = self.roster.get(student)?;
        Ok(aggregate::individual_performance(
            student,
            self.registry.topics(),
        ))
    }

    /// Individual series for every student, in roster order.
    pub fn all_individual_performance(&self) -> Vec<IndividualPerformance> {
        self.roster
            .students()
            .iter()
            .map(|s| aggregate::individual_performance(s, self.registry.topics()))
            .collect()
    }
}
