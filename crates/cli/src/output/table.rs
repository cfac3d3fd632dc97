//! Table formatting utilities

use anyhow::Result;
use circuit_fingerprint_domain::{TaskScore, ValidationReport};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, *};

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Create a simple table with headers and rows
    pub fn simple(headers: Vec<&str>, rows: Vec<Vec<String>>) -> Result<String> {
        let mut table = Self::new();
        table.set_header(headers);

        for row in rows {
            table.add_row(row);
        }

        Ok(table.to_string())
    }

    /// Create a key-value table
    pub fn key_value(items: Vec<(&str, String)>) -> Result<String> {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![key, &value]);
        }

        Ok(table.to_string())
    }

    /// Per-task score breakdown
    pub fn task_scores(tasks: &[&TaskScore]) -> Result<String> {
        let rows = tasks
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    format!("{:.4}", t.task_score),
                    format!("{:.4}", t.threshold_score),
                    format!("{:.4}", t.runtime_score),
                ]
            })
            .collect();
        Self::simple(vec!["Task", "Score", "Threshold", "Runtime"], rows)
    }

    /// Violations of a rejected submission
    pub fn violations(report: &ValidationReport) -> Result<String> {
        let rows = report
            .violations
            .iter()
            .map(|v| {
                vec![
                    v.kind.code().to_string(),
                    v.index.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string()),
                    v.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                    v.message.clone(),
                ]
            })
            .collect();
        Self::simple(vec!["Kind", "Record", "Id", "Message"], rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_fingerprint_domain::{TaskId, Violation, ViolationKind};

    #[test]
    fn test_key_value_table() {
        let items = vec![("Tasks", "3".to_string()), ("Missing predictions", "0".to_string())];
        let table = TableFormatter::key_value(items).unwrap();
        assert!(table.contains("Missing predictions"));
    }

    #[test]
    fn test_task_scores_table() {
        let task = TaskScore::from_components(TaskId::from("ghz_0007"), 0.5, 0.5);
        let table = TableFormatter::task_scores(&[&task]).unwrap();
        assert!(table.contains("ghz_0007"));
        assert!(table.contains("0.2500"));
    }

    #[test]
    fn test_violations_table() {
        let mut report = ValidationReport::new();
        report.push(
            Violation::new(ViolationKind::OffLadder, "id=A: predicted_threshold_min=3")
                .at(4)
                .for_id(Some(TaskId::from("A"))),
        );
        let table = TableFormatter::violations(&report).unwrap();
        assert!(table.contains("OFF_LADDER"));
        assert!(table.contains("predicted_threshold_min=3"));
    }
}
