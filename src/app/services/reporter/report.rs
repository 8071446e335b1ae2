//! Sorted report construction and rendering

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt::Write as _;
use std::io::Write;
use tracing::{debug, info_span};

use crate::app::services::aggregator::StationTable;
use crate::constants::REPORT_PRECISION;
use crate::{Error, Result};

/// Rendering used for the summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `{name=min/mean/max...}`
    #[default]
    Braced,
    /// `{"name":{"min":..,"mean":..,"max":..},...}`
    Json,
}

/// One station's line in the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub station: String,
    pub min: f32,
    pub mean: f64,
    pub max: f32,
}

/// Stations of a finished table in ascending name order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Build the report from a completed table, sorting stations by name
    pub fn from_table(table: &StationTable) -> Self {
        let _span = info_span!("report").entered();

        let mut entries: Vec<ReportEntry> = table
            .iter()
            .map(|(station, stats)| ReportEntry {
                station: station.to_string(),
                min: stats.min,
                mean: stats.mean(),
                max: stats.max,
            })
            .collect();

        entries.sort_unstable_by(|a, b| a.station.cmp(&b.station));
        debug!("Sorted {} stations for reporting", entries.len());

        Self { entries }
    }

    /// Entries in output order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// True when the report has no stations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the summary without the trailing newline
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Braced => Ok(self.render_braced()),
            ReportFormat::Json => self.render_json(),
        }
    }

    /// Write the summary followed by a newline
    pub fn write_to<W: Write>(&self, out: &mut W, format: ReportFormat) -> Result<()> {
        let rendered = self.render(format)?;
        writeln!(out, "{}", rendered)
            .and_then(|_| out.flush())
            .map_err(|e| Error::io("Failed to write summary", e))
    }

    fn render_braced(&self) -> String {
        let mut line = String::with_capacity(2 + self.entries.len() * 32);
        line.push('{');
        for entry in &self.entries {
            // Writing into a String cannot fail
            let _ = write!(
                line,
                "{}={:.prec$}/{:.prec$}/{:.prec$}",
                entry.station,
                entry.min,
                entry.mean,
                entry.max,
                prec = REPORT_PRECISION
            );
        }
        line.push('}');
        line
    }

    fn render_json(&self) -> Result<String> {
        let mut stations = Map::new();
        for entry in &self.entries {
            let mut values = Map::new();
            values.insert("min".to_string(), rounded_number(f64::from(entry.min)));
            values.insert("mean".to_string(), rounded_number(entry.mean));
            values.insert("max".to_string(), rounded_number(f64::from(entry.max)));
            stations.insert(entry.station.clone(), Value::Object(values));
        }

        serde_json::to_string(&Value::Object(stations))
            .map_err(|e| Error::io("Failed to serialise summary", e.into()))
    }
}

/// JSON number rounded exactly as the braced rendering rounds it
fn rounded_number(value: f64) -> Value {
    format!("{:.prec$}", value, prec = REPORT_PRECISION)
        .parse::<Number>()
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
