//! Preparation summary and feature row tables

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::{column_values, ModelKind, ScaleMode};

/// Summary of one bulk preparation run
#[derive(Debug)]
pub struct PreparationSummary {
    pub model: ModelKind,
    pub mode: ScaleMode,
    pub rows: usize,
    pub raw_columns: usize,
    pub feature_columns: usize,
    pub scaled_columns: usize,
    pub missing_cells: usize,
    pub imputer: String,
    pub load_time: Duration,
    pub prepare_time: Duration,
    pub save_time: Duration,
}

impl PreparationSummary {
    pub fn new(model: ModelKind, mode: ScaleMode) -> Self {
        Self {
            model,
            mode,
            rows: 0,
            raw_columns: 0,
            feature_columns: 0,
            scaled_columns: 0,
            missing_cells: 0,
            imputer: String::new(),
            load_time: Duration::ZERO,
            prepare_time: Duration::ZERO,
            save_time: Duration::ZERO,
        }
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.prepare_time + self.save_time
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🎓 Model"), Cell::new(self.model.display_name())]);
        table.add_row(vec![Cell::new("📏 Scaling Mode"), Cell::new(self.mode)]);
        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![Cell::new("📥 Raw Columns"), Cell::new(self.raw_columns)]);
        table.add_row(vec![
            Cell::new("✅ Feature Columns"),
            Cell::new(self.feature_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![Cell::new("📐 Scaled Columns"), Cell::new(self.scaled_columns)]);
        table.add_row(vec![
            Cell::new("❓ Missing Cells"),
            Cell::new(self.missing_cells).fg(if self.missing_cells == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("🩹 Imputer"), Cell::new(&self.imputer)]);
        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);
        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Count null cells across every column of a frame
pub fn count_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}

/// Render the first row of a feature frame as a two-column table
pub fn feature_table(df: &DataFrame) -> crate::error::Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for name in df.get_column_names() {
        let value = column_values(df, name.as_str())?.first().copied().flatten();
        let cell = match value {
            Some(v) => Cell::new(format!("{:.6}", v)),
            None => Cell::new("null").fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(name.as_str()), cell]);
    }
    Ok(table)
}

/// Print the first row of a feature frame
pub fn display_features(df: &DataFrame, model: ModelKind) -> crate::error::Result<()> {
    println!();
    println!(
        "    {} {} {}",
        style("🧮").cyan(),
        style("FEATURE ROW").white().bold(),
        style(format!("({}, {} columns)", model.display_name(), df.width())).dim()
    );
    println!("    {}", style("─".repeat(50)).dim());
    for line in feature_table(df)?.to_string().lines() {
        println!("    {}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_missing() {
        let df = df! {
            "a" => [Some(1.0f64), None],
            "b" => [None::<f64>, None],
        }
        .unwrap();
        assert_eq!(count_missing(&df), 3);
    }

    #[test]
    fn test_feature_table_lists_every_column() {
        let df = df! {
            "gdp" => [0.25f64],
            "year" => [None::<f64>],
        }
        .unwrap();
        let rendered = feature_table(&df).unwrap().to_string();
        assert!(rendered.contains("gdp"));
        assert!(rendered.contains("0.250000"));
        assert!(rendered.contains("null"));
    }

    #[test]
    fn test_summary_table_shows_model() {
        let mut summary = PreparationSummary::new(ModelKind::NeuralNetwork, ScaleMode::Fit);
        summary.rows = 4424;
        summary.imputer = "zero fill".to_string();
        let rendered = summary.to_table().to_string();
        assert!(rendered.contains("Neural Network"));
        assert!(rendered.contains("4424"));
        assert!(rendered.contains("fit"));
    }
}
