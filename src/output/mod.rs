//
//  bitbucket-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `bbc` binary:
//!
//! - **Table format**: human-readable output for interactive terminal use
//! - **JSON format**: the API entities as pretty-printed JSON, for scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available output formats
//! - [`OutputWriter`]: entry point for writing formatted output
//! - [`TableOutput`]: entities rendered as a block of labelled fields
//! - [`TableRow`]: entities rendered as one row of a table

mod table;

pub use table::*;

use serde::Serialize;

/// Output format selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and fields.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Writes entities in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer; color follows terminal detection.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// The selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes one entity.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of entities as one table.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table => {
                if values.is_empty() {
                    println!("Nothing to show");
                    return Ok(());
                }
                values
                    .iter()
                    .fold(
                        TableBuilder::new().color(self.color).headers(T::headers()),
                        |table, value| table.row(value.row(self.color)),
                    )
                    .print();
            }
        }
        Ok(())
    }

    /// Writes raw text (diffs) unchanged in table mode, as a JSON string otherwise.
    pub fn write_text(&self, text: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(text)?),
            OutputFormat::Table => print!("{}", text),
        }
        Ok(())
    }

    /// Writes a success message.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Entities printed as a header followed by labelled fields.
pub trait TableOutput {
    /// Prints the entity.
    fn print_table(&self, color: bool);
}

/// Entities printed as one row of a list table.
pub trait TableRow {
    /// Column headers.
    fn headers() -> Vec<&'static str>;

    /// Cells of this entity's row, matching [`headers`](Self::headers).
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold header line followed by an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is on.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
