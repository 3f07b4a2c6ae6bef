//! CSV output format for mining results
//!
//! One row per pattern for spreadsheet analysis. Items are joined with `;`
//! inside the `itemset` column; a `;` or `\` inside an item name is written
//! as `\;` or `\\`, so the column splits back into the original names.

use crate::search::Pattern;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    rows: Vec<String>,
    include_support: bool,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new(include_support: bool) -> Self {
        Self {
            rows: Vec::new(),
            include_support,
        }
    }

    /// Generate CSV header row based on enabled flags
    fn header(&self) -> String {
        let mut headers = vec!["itemset", "utility", "occupancy"];

        if self.include_support {
            headers.push("support");
        }

        headers.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines, item separators)
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', ';']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Add a pattern to the output
    pub fn add_pattern(&mut self, pattern: &Pattern) {
        let names: Vec<String> = pattern
            .itemset()
            .iter()
            .map(|item| item.as_str().replace('\\', "\\\\").replace(';', "\\;"))
            .collect();
        let mut fields = vec![
            Self::escape_field(&names.join(";")),
            pattern.utility().to_string(),
            format!("{:.6}", pattern.occupancy()),
        ];

        if self.include_support {
            fields.push(pattern.support().to_string());
        }

        self.rows.push(fields.join(","));
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }

        output
    }
}
