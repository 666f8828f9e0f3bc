//! Terminal tables for topics, students, and performance series.

use comfy_table::{Cell, CellAlignment, Table};

use edutrack_core::aggregate::{ClassPerformance, IndividualPerformance};
use edutrack_core::command::Outcome;
use edutrack_core::model::{DeletionState, Student, Topic};
use edutrack_core::report::SessionReport;

pub fn topics_table(topics: &[Topic], deletion: DeletionState) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Topic", "Rating", "State"]);

    for (i, topic) in topics.iter().enumerate() {
        let state = match deletion {
            DeletionState::Armed(index) if index == i => "delete? (confirm/cancel)".to_string(),
            DeletionState::Authorized(index) if index == i => "deleting".to_string(),
            _ => match topic.draft_name() {
                Some(draft) => format!("editing: {draft}"),
                None => String::new(),
            },
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(topic.name()),
            Cell::new(topic.draft_rating()).set_alignment(CellAlignment::Center),
            Cell::new(state),
        ]);
    }

    table
}

pub fn students_table(students: &[Student]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Student", "Topics", "Ratings"]);

    for student in students {
        let ratings: Vec<String> = student.ratings().iter().map(u8::to_string).collect();
        table.add_row(vec![
            Cell::new(student.name()),
            Cell::new(student.topics().join(", ")),
            Cell::new(ratings.join(", ")),
        ]);
    }

    table
}

/// The class chart's data, or the no-data notice.
pub fn class_performance(perf: &ClassPerformance) -> String {
    let ClassPerformance::Series(series) = perf else {
        return "No students added yet.".to_string();
    };

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Number of '+' Ratings"]);
    for count in series {
        table.add_row(vec![
            Cell::new(&count.topic),
            Cell::new(count.plus_count).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn individual_performance(perf: &IndividualPerformance) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Topic".to_string(),
        format!("Rating ({}-{})", perf.radial_range[0], perf.radial_range[1]),
    ]);
    for point in &perf.series {
        table.add_row(vec![
            Cell::new(&point.topic),
            Cell::new(point.rating).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Query outcomes as tables; everything else as its message.
pub fn outcome(outcome: &Outcome, deletion: DeletionState) -> String {
    match outcome {
        Outcome::Topics(topics) => topics_table(topics, deletion).to_string(),
        Outcome::Students(students) => students_table(students).to_string(),
        Outcome::Class(perf) => class_performance(perf),
        Outcome::Individual(perf) => format!(
            "Performance for {}\n{}",
            perf.student,
            individual_performance(perf)
        ),
        other => other.to_string(),
    }
}

pub fn print_report(report: &SessionReport) {
    println!("{}\n", report.class_name);
    println!("Class Performance");
    println!("{}", class_performance(&report.class_performance));

    for perf in &report.individual {
        println!("\nPerformance for {}", perf.student);
        println!("{}", individual_performance(perf));
    }
}
