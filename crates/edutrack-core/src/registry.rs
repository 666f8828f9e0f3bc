//! Topic registry: ordered topics, draft ratings, edit mode, and the
//! two-phase delete workflow.
//!
//! The registry never touches student records. Cascading a deletion into
//! the roster is the engine's job; [`TopicRegistry::apply_pending_deletion`]
//! hands back the removed topic so the caller can do it.

use crate::error::{EngineError, ValidationError};
use crate::model::{DeletionState, Topic};
use crate::rating::Rating;

/// Default prefix for generated topic names.
pub const DEFAULT_TOPIC_PREFIX: &str = "Topic";

/// Name of the topic a fresh registry starts with.
pub const DEFAULT_TOPIC: &str = "Topic 1";

#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
    deletion: DeletionState,
    topic_prefix: String,
    reject_empty_names: bool,
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self {
            topics: vec![Topic::new(DEFAULT_TOPIC)],
            deletion: DeletionState::Idle,
            topic_prefix: DEFAULT_TOPIC_PREFIX.to_string(),
            reject_empty_names: false,
        }
    }
}

impl TopicRegistry {
    /// Build a registry from an initial list of topic names.
    pub fn with_topics<I, S>(names: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let topics: Vec<Topic> = names.into_iter().map(Topic::new).collect();
        if topics.is_empty() {
            return Err(EngineError::NoTopics);
        }
        Ok(Self {
            topics,
            ..Self::default()
        })
    }

    /// Prefix used by [`add_topic`](Self::add_topic) when naming new topics.
    pub fn with_topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.topic_prefix = prefix.into();
        self
    }

    /// Reject empty names in [`commit_edit`](Self::commit_edit).
    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.reject_empty_names = strict;
        self
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Topic, EngineError> {
        let len = self.topics.len();
        self.topics
            .get(index)
            .ok_or(EngineError::TopicNotFound { index, len })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Topic, EngineError> {
        let len = self.topics.len();
        self.topics
            .get_mut(index)
            .ok_or(EngineError::TopicNotFound { index, len })
    }

    /// Snapshot of the current topic names, in order.
    pub fn names(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.name.clone()).collect()
    }

    /// Draft ratings, index-aligned with [`topics`](Self::topics).
    pub fn draft_ratings(&self) -> Vec<Rating> {
        self.topics.iter().map(|t| t.draft).collect()
    }

    pub fn deletion_state(&self) -> DeletionState {
        self.deletion
    }

    /// Append a topic named after the current count, e.g. `"Topic 3"` when
    /// two topics exist. The generated name may repeat an existing one after
    /// deletions or renames.
    pub fn add_topic(&mut self) -> &Topic {
        let name = format!("{} {}", self.topic_prefix, self.topics.len() + 1);
        tracing::info!(topic = %name, "topic added");
        self.topics.push(Topic::new(name));
        &self.topics[self.topics.len() - 1]
    }

    /// Flip edit mode for a topic. Entering edit mode seeds the rename buffer
    /// with the current name; leaving it discards the buffer.
    ///
    /// Returns the new edit state.
    pub fn toggle_edit(&mut self, index: usize) -> Result<bool, EngineError> {
        let topic = self.get_mut(index)?;
        topic.draft_name = match topic.draft_name.take() {
            Some(_) => None,
            None => Some(topic.name.clone()),
        };
        Ok(topic.is_editing())
    }

    /// Replace the contents of the rename buffer. A topic not yet in edit
    /// mode enters it.
    pub fn set_draft_name(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.get_mut(index)?.draft_name = Some(text.into());
        Ok(())
    }

    /// Rename a topic and leave edit mode. Returns the previous name.
    ///
    /// Names are accepted as given unless strict names are enabled, in which
    /// case an empty name is rejected and the topic is left untouched.
    pub fn commit_edit(
        &mut self,
        index: usize,
        new_name: impl Into<String>,
    ) -> Result<String, EngineError> {
        let new_name = new_name.into();
        let strict = self.reject_empty_names;
        let topic = self.get_mut(index)?;
        if strict && new_name.is_empty() {
            return Err(ValidationError::EmptyTopicName.into());
        }
        topic.draft_name = None;
        let old = std::mem::replace(&mut topic.name, new_name);
        tracing::info!(from = %old, to = %topic.name, "topic renamed");
        Ok(old)
    }

    /// Commit whatever is in the rename buffer. Without a buffer the name is
    /// kept as is.
    pub fn commit_draft_name(&mut self, index: usize) -> Result<String, EngineError> {
        let topic = self.get(index)?;
        let new_name = topic
            .draft_name
            .clone()
            .unwrap_or_else(|| topic.name.clone());
        self.commit_edit(index, new_name)
    }

    pub fn set_draft_rating(&mut self, index: usize, rating: Rating) -> Result<(), EngineError> {
        self.get_mut(index)?.draft = rating;
        Ok(())
    }

    /// Reset every draft rating to `-`.
    pub fn reset_drafts(&mut self) {
        for topic in &mut self.topics {
            topic.draft = Rating::default();
        }
    }

    /// Request confirmation to delete a topic. Replaces any earlier arm or
    /// unapplied authorization.
    pub fn arm_delete(&mut self, index: usize) -> Result<(), EngineError> {
        self.get(index)?;
        if self.deletion != DeletionState::Idle {
            tracing::debug!(previous = ?self.deletion, "replacing pending deletion");
        }
        self.deletion = DeletionState::Armed(index);
        tracing::debug!(index, "deletion armed");
        Ok(())
    }

    /// Disarm a pending deletion. Returns whether anything was armed.
    /// An already authorized deletion is left in place.
    pub fn cancel_delete(&mut self) -> bool {
        if let DeletionState::Armed(index) = self.deletion {
            self.deletion = DeletionState::Idle;
            tracing::debug!(index, "deletion cancelled");
            true
        } else {
            false
        }
    }

    /// Authorize deletion of a topic. The removal itself happens in
    /// [`apply_pending_deletion`](Self::apply_pending_deletion).
    pub fn confirm_delete(&mut self, index: usize) -> Result<(), EngineError> {
        self.get(index)?;
        self.deletion = DeletionState::Authorized(index);
        tracing::debug!(index, "deletion authorized");
        Ok(())
    }

    /// Carry out an authorized deletion, returning the removed topic.
    ///
    /// Returns `Ok(None)` when nothing is authorized. The authorization is
    /// consumed even when the last-topic guard rejects the removal.
    pub fn apply_pending_deletion(&mut self) -> Result<Option<Topic>, EngineError> {
        let index = match self.deletion {
            DeletionState::Authorized(index) => index,
            _ => return Ok(None),
        };
        self.deletion = DeletionState::Idle;

        if self.topics.len() <= 1 {
            tracing::warn!("refusing to delete the last remaining topic");
            return Err(EngineError::LastTopic);
        }
        self.get(index)?;

        let removed = self.topics.remove(index);
        tracing::info!(topic = %removed.name, index, "topic removed");
        Ok(Some(removed))
    }
}
