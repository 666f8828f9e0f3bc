//! Session reports: a serializable snapshot of the engine with both chart
//! series, exported as JSON or Markdown.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{ClassPerformance, IndividualPerformance};
use crate::engine::Engine;
use crate::model::Student;
use crate::rating::Rating;

/// A complete session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub class_name: String,
    pub topics: Vec<TopicSummary>,
    pub students: Vec<Student>,
    pub class_performance: ClassPerformance,
    /// One series per student, in roster order.
    pub individual: Vec<IndividualPerformance>,
}

/// A topic as shown in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub name: String,
    pub draft_rating: Rating,
}

impl SessionReport {
    pub fn from_engine(engine: &Engine, class_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            class_name: class_name.into(),
            topics: engine
                .list_topics()
                .iter()
                .map(|t| TopicSummary {
                    name: t.name().to_string(),
                    draft_rating: t.draft_rating(),
                })
                .collect(),
            students: engine.list_students().to_vec(),
            class_performance: engine.class_performance(),
            individual: engine.all_individual_performance(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", self.class_name));

        md.push_str("## Class Performance\n\n");
        match &self.class_performance {
            ClassPerformance::NoData => md.push_str("No students added yet.\n"),
            ClassPerformance::Series(series) => {
                md.push_str("| Topic | Number of '+' Ratings |\n");
                md.push_str("|-------|----------------------:|\n");
                for count in series {
                    md.push_str(&format!("| {} | {} |\n", count.topic, count.plus_count));
                }
            }
        }

        for perf in &self.individual {
            md.push_str(&format!("\n## Performance for {}\n\n", perf.student));
            if perf.series.is_empty() {
                md.push_str("No ratings for current topics.\n");
                continue;
            }
            md.push_str(&format!(
                "| Topic | Rating ({}-{}) |\n",
                perf.radial_range[0], perf.radial_range[1]
            ));
            md.push_str("|-------|------:|\n");
            for point in &perf.series {
                md.push_str(&format!("| {} | {} |\n", point.topic, point.rating));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_engine() -> Engine {
        let mut engine = Engine::with_topics(["Topic 1", "Topic 2"]).unwrap();
        engine.set_draft_rating(0, Rating::Plus).unwrap();
        engine.submit("Ada").unwrap();
        engine
    }

    #[test]
    fn report_captures_engine() {
        let report = SessionReport::from_engine(&sample_engine(), "Period 3");
        assert_eq!(report.topics.len(), 2);
        assert_eq!(report.students.len(), 1);
        assert_eq!(report.individual.len(), 1);
        assert_eq!(report.individual[0].series[0].rating, 10);
        assert!(report.class_performance.series().is_some());
    }

    #[test]
    fn json_written_to_disk() {
        let report = SessionReport::from_engine(&sample_engine(), "Period 3");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");

        report.save_json(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["class_name"], "Period 3");
        assert_eq!(value["class_performance"]["status"], "series");
        assert_eq!(value["students"][0]["ratings"][0], 10);
    }

    #[test]
    fn markdown_output() {
        let md = SessionReport::from_engine(&sample_engine(), "Period 3").to_markdown();
        assert!(md.contains("# Period 3"));
        assert!(md.contains("| Topic 1 | 1 |"));
        assert!(md.contains("## Performance for Ada"));
    }

    #[test]
    fn markdown_without_students() {
        let md = SessionReport::from_engine(&Engine::new(), "Empty").to_markdown();
        assert!(md.contains("No students added yet."));
    }
}
