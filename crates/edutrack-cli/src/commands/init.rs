//! The `edutrack init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("edutrack.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("sessions")?;
    write_if_missing(Path::new("sessions/example.toml"), EXAMPLE_SESSION)?;

    std::fs::create_dir_all("scripts")?;
    write_if_missing(Path::new("scripts/example.txt"), EXAMPLE_SCRIPT)?;

    println!("\nNext steps:");
    println!("  1. Edit sessions/example.toml with your topics and students");
    println!("  2. Run: edutrack validate --session sessions/example.toml");
    println!("  3. Run: edutrack run --session sessions/example.toml --script scripts/example.txt");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# edutrack configuration

initial_topics = ["Topic 1"]
topic_prefix = "Topic"
max_student_name_length = 128
reject_empty_topic_names = false
log_level = "info"
"#;

const EXAMPLE_SESSION: &str = r#"[class]
name = "Example Class"
topics = ["Fractions", "Decimals", "Percentages"]

[[students]]
name = "Ada"
ratings = ["+", "~", "-"]

[[students]]
name = "Grace"
ratings = ["+", "+", "~"]
"#;

const EXAMPLE_SCRIPT: &str = r#"# Rate a new student, then retire a topic.
rate 1 +
rate 3 ~
submit Linus
delete 2
confirm 2
class
"#;
