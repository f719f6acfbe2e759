//! Old→new mapping report.
//!
//! Pure read of state the passes already computed; the only logic here is
//! formatting. The structures are serialisable with `serde` so callers can
//! store or transfer them as JSON alongside the plain-text map file.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::collect::SheetComponents;
use crate::passes::ClassCounters;

/// One old→new pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub old: String,
    /// The designator the component actually carries after the run. Falls
    /// back to `old` when the final rename never took effect.
    pub new: String,
    /// Sheet membership; more than one entry for merged multi-part groups.
    pub sheets: Vec<String>,
}

/// Per-sheet group of mapping entries, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMapping {
    pub sheet: String,
    pub entries: Vec<MapEntry>,
}

/// Full result of a renumbering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    pub sheets: Vec<SheetMapping>,
    pub total_components: usize,
    pub class_count: usize,
}

impl RenameReport {
    pub(crate) fn from_document(document: &[SheetComponents], counters: &ClassCounters) -> Self {
        let sheets: Vec<SheetMapping> = document
            .iter()
            .map(|sheet| SheetMapping {
                sheet: sheet.sheet.name.clone(),
                entries: sheet
                    .components
                    .iter()
                    .map(|record| MapEntry {
                        old: record.old_designator.clone(),
                        new: record
                            .final_designator
                            .clone()
                            .unwrap_or_else(|| record.old_designator.clone()),
                        sheets: record.sheets.clone(),
                    })
                    .collect(),
            })
            .collect();

        let total_components = sheets.iter().map(|s| s.entries.len()).sum();
        let report = Self {
            sheets,
            total_components,
            class_count: counters.class_count(),
        };
        info!(
            "total components: {}, total component classes: {}",
            report.total_components, report.class_count
        );
        report
    }

    /// Plain-text map: `OLD -> NEW` lines, sheet groups separated by a
    /// blank line.
    pub fn to_map_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for sheet in &self.sheets {
            for entry in &sheet.entries {
                lines.push(format!("{} -> {}", entry.old, entry.new));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }

    /// Write the plain-text map file (UTF-8).
    pub fn write_map_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_map_text())?;
        info!("the part map file saved as {}", path.display());
        Ok(())
    }

    /// All entries across all sheets, in report order.
    pub fn entries(&self) -> impl Iterator<Item = &MapEntry> {
        self.sheets.iter().flat_map(|s| s.entries.iter())
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
