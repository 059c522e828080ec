//
//  cms-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! This module renders command results for the `cms` CLI in one of two
//! formats:
//!
//! - **Table format**: Human-readable output for interactive terminal use
//! - **JSON format**: Machine-readable JSON output for scripting and automation
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//! - [`content`]: Table rendering for projects, collections, entries and assets
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for types that can be rendered as a detail view
//! - [`TableRow`]: Trait for types that can be rendered as rows of a list
//!
//! ## Example
//!
//! ```rust,ignore
//! use cms_client::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&entry)?;
//! writer.write_success("Entry deleted");
//! ```

pub mod content;
pub mod json;
pub mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// Represents the available output formats for CLI output.
///
/// # Variants
///
/// * `Table` - Human-readable format, best for interactive terminal sessions
/// * `Json` - Machine-readable JSON format, ideal for piping to other tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table format with optional color support.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// A unified output writer that handles both output formats.
///
/// Data goes to stdout. Errors go to stderr so that JSON
/// output stays parseable.
///
/// # Notes
///
/// Color output is automatically detected based on terminal capabilities.
/// Colors are disabled when output is piped or redirected.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value as a detail view or JSON document.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a list as a table with one row per value, or as a JSON array.
    ///
    /// An empty list prints `empty_message` in table mode and `[]` in JSON
    /// mode.
    pub fn write_list<T: Serialize + TableRow>(
        &self,
        values: &[T],
        empty_message: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values),
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info(empty_message);
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
                Ok(())
            }
        }
    }

    /// Writes an arbitrary JSON value in both modes.
    pub fn write_value(&self, value: &serde_json::Value) -> anyhow::Result<()> {
        write_json(value)
    }

    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Writes a success message. Suppressed in JSON mode.
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

/// Trait for types rendered as a detail view in table mode.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Trait for types rendered as one row of a list table.
pub trait TableRow {
    /// Column headers, in the order of [`TableRow::row`].
    fn headers() -> &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a `key: value` line with a dimmed key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("  {:<14} {}", style(format!("{}:", key)).dim(), value);
    } else {
        println!("  {:<14} {}", format!("{}:", key), value);
    }
}

/// Prints an optional field, skipping it when absent.
pub fn print_opt_field(key: &str, value: Option<&str>, color: bool) {
    if let Some(value) = value {
        print_field(key, value, color);
    }
}
