use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use crate::execution::types::{Fill, OrderIntent};
use crate::execution::validation::OrderRejection;

const HEADER: &str = "timestamp,market,action,side,size,price,notional,yes_before,yes_after,cash_after,note";

/// Append-only CSV journal of fills and rejected orders
pub struct CsvLogger {
    log_path: String,
}

impl CsvLogger {
    pub fn new(log_path: String) -> Result<Self> {
        // Create CSV file with headers if it doesn't exist
        if !std::path::Path::new(&log_path).exists() {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .open(&log_path)
                .with_context(|| format!("Failed to create trade journal: {}", log_path))?;

            writeln!(file, "{}", HEADER)?;
        }

        Ok(Self { log_path })
    }

    pub fn log_fill(&self, fill: &Fill) -> Result<()> {
        let mut file = self.open()?;

        writeln!(
            file,
            "{},{},{},{},{:.1},{:.4},{:.2},{:.4},{:.4},{:.2},",
            fill.timestamp.to_rfc3339(),
            csv_field(&fill.market),
            fill.action,
            fill.side,
            fill.size,
            fill.price,
            fill.notional,
            fill.yes_before,
            fill.yes_after,
            fill.cash_after
        )?;

        Ok(())
    }

    /// Rejected orders keep the ticket columns; the reason goes in `note`.
    pub fn log_rejection(
        &self,
        intent: &OrderIntent,
        rejection: &OrderRejection,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut file = self.open()?;

        writeln!(
            file,
            "{},EVENT,{},{},{:.1},,,,,,{}",
            now.to_rfc3339(),
            intent.action,
            intent.side,
            intent.size,
            csv_field(&rejection.to_string())
        )?;

        Ok(())
    }

    fn open(&self) -> Result<std::fs::File> {
        OpenOptions::new()
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open trade journal: {}", self.log_path))
    }
}

/// Market titles are free text; quote them when needed.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
