//
//  gerrit-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Renders the JSON records returned by Gerrit for the terminal.
//!
//! | Format | Use |
//! |--------|-----|
//! | `table` | Human-readable tables (`comfy-table`) with `console` colors |
//! | `json` | Pretty-printed JSON for scripting |
//! | `yaml` | YAML for reading nested records |
//!
//! Tables take a column list. Arrays of records become one row per record;
//! a single record becomes a two-column field/value table. Records keyed by
//! name (`{"core": {...}}`, as returned by project and plugin listings)
//! get the key as first column.

mod json;
mod table;
mod yaml;

pub use json::*;
pub use table::*;
pub use yaml::*;

use std::str::FromStr;

use anyhow::bail;
use clap::ValueEnum;
use serde_json::Value;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => bail!("Unknown output format: {}", other),
        }
    }
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a value. `columns` select the table columns; they are ignored
    /// for JSON and YAML.
    pub fn write_value(&self, value: &Value, columns: &[&str]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Yaml => write_yaml(value),
            OutputFormat::Table => {
                match value {
                    Value::Array(_) | Value::Object(_) => {
                        println!("{}", value_table(value, columns, self.color))
                    }
                    other => println!("{}", cell_text(other)),
                }
                Ok(())
            }
        }
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Prints `key: value` with a dimmed key.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("markdown".parse::<OutputFormat>().is_err());
    }
}
