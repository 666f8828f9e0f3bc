//! Class-wide and per-student performance series.
//!
//! Both series are filtered against the registry's current topic names:
//! a student's pairs for deleted or renamed-away topics are ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Student, Topic};
use crate::rating::PLUS_SCORE;

/// Fixed radial scale of the individual performance chart.
pub const RADIAL_RANGE: [u8; 2] = [0, 10];

/// Number of `+` ratings recorded for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub plus_count: u32,
}

/// The class chart's data, or the absence of any students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "series", rename_all = "snake_case")]
pub enum ClassPerformance {
    /// The roster is empty.
    NoData,
    /// Counts per topic, highest first.
    Series(Vec<TopicCount>),
}

impl ClassPerformance {
    pub fn series(&self) -> Option<&[TopicCount]> {
        match self {
            ClassPerformance::NoData => None,
            ClassPerformance::Series(series) => Some(series),
        }
    }
}

/// One point of a student's radar series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: String,
    pub rating: u8,
}

/// A student's radar series with the scale it is drawn against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualPerformance {
    pub student: String,
    pub series: Vec<TopicScore>,
    pub radial_range: [u8; 2],
}

/// Count `+` ratings per current topic across all students.
///
/// Topics appear in registry order, then are stably sorted by count,
/// highest first. A topic name that occurs more than once in the registry
/// is reported once, at its first position.
pub fn class_performance(topics: &[Topic], students: &[Student]) -> ClassPerformance {
    if students.is_empty() {
        return ClassPerformance::NoData;
    }

    let mut counts: Vec<TopicCount> = Vec::with_capacity(topics.len());
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(topics.len());
    for topic in topics {
        slots.entry(topic.name()).or_insert_with(|| {
            counts.push(TopicCount {
                topic: topic.name().to_string(),
                plus_count: 0,
            });
            counts.len() - 1
        });
    }

    for student in students {
        for (topic, rating) in student.pairs() {
            if rating != PLUS_SCORE {
                continue;
            }
            if let Some(&slot) = slots.get(topic) {
                counts[slot].plus_count += 1;
            }
        }
    }

    counts.sort_by(|a, b| b.plus_count.cmp(&a.plus_count));
    ClassPerformance::Series(counts)
}

/// A student's `(topic, rating)` pairs limited to topics still in the
/// registry, in the student's own order.
pub fn individual_performance(student: &Student, topics: &[Topic]) -> IndividualPerformance {
    let series = student
        .pairs()
        .filter(|(topic, _)| topics.iter().any(|t| t.name() == *topic))
        .map(|(topic, rating)| TopicScore {
            topic: topic.to_string(),
            rating,
        })
        .collect();

    IndividualPerformance {
        student: student.name().to_string(),
        series,
        radial_range: RADIAL_RANGE,
    }
}
