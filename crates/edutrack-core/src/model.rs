//! Core data model types for edutrack.
//!
//! Topics are identified by position in the registry, not by a stable id.
//! Students hold independent snapshots of the topic names they were rated
//! against, so later renames never reach them.

use serde::{Deserialize, Serialize};

use crate::rating::Rating;

/// A named skill whose mastery is rated per student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub(crate) name: String,
    pub(crate) draft: Rating,
    /// In-progress rename buffer; `Some` while the topic is in edit mode.
    pub(crate) draft_name: Option<String>,
}

impl Topic {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            draft: Rating::default(),
            draft_name: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rating staged for the next student submission.
    pub fn draft_rating(&self) -> Rating {
        self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft_name.is_some()
    }

    pub fn draft_name(&self) -> Option<&str> {
        self.draft_name.as_deref()
    }
}

/// A submitted student record.
///
/// `topics` and `ratings` are index-aligned. The only mutation after
/// submission is the cascade that drops a deleted topic's pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    name: String,
    topics: Vec<String>,
    ratings: Vec<u8>,
}

impl Student {
    pub(crate) fn new(name: String, topics: Vec<String>, ratings: Vec<u8>) -> Self {
        debug_assert_eq!(topics.len(), ratings.len());
        Self {
            name,
            topics,
            ratings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn ratings(&self) -> &[u8] {
        &self.ratings
    }

    /// `(topic, rating)` pairs in submission order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.topics
            .iter()
            .map(String::as_str)
            .zip(self.ratings.iter().copied())
    }

    /// Drop the first pair whose topic is `topic`. Returns whether a pair
    /// was removed.
    pub(crate) fn remove_topic(&mut self, topic: &str) -> bool {
        match self.topics.iter().position(|t| t == topic) {
            Some(pos) => {
                self.topics.remove(pos);
                self.ratings.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Two-phase delete confirmation over the whole topic collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "lowercase")]
pub enum DeletionState {
    #[default]
    Idle,
    /// Confirmation requested for this topic.
    Armed(usize),
    /// Confirmed; removal happens on the next apply step.
    Authorized(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_topic_defaults() {
        let topic = Topic::new("Topic 1");
        assert_eq!(topic.name(), "Topic 1");
        assert_eq!(topic.draft_rating(), Rating::Minus);
        assert!(!topic.is_editing());
        assert!(topic.draft_name().is_none());
    }

    #[test]
    fn remove_topic_only_first_occurrence() {
        let mut student = Student::new(
            "Ada".into(),
            vec!["A".into(), "B".into(), "A".into()],
            vec![10, 5, 0],
        );
        assert!(student.remove_topic("A"));
        assert_eq!(student.topics(), ["B", "A"]);
        assert_eq!(student.ratings(), [5, 0]);
        assert!(!student.remove_topic("C"));
        assert_eq!(student.topics().len(), student.ratings().len());
    }

    #[test]
    fn deletion_state_serde() {
        let json = serde_json::to_string(&DeletionState::Armed(2)).unwrap();
        assert_eq!(json, r#"{"state":"armed","index":2}"#);
        let idle = serde_json::to_string(&DeletionState::Idle).unwrap();
        assert_eq!(idle, r#"{"state":"idle"}"#);
    }
}
