//! Component collection and multi-part merging.
//!
//! Collection turns the host's raw per-sheet enumeration into engine-local
//! [`ComponentRecord`]s. Merging then folds duplicate gate-instances of the
//! same logical part (seen on several sheets) into a single record that
//! carries the full sheet membership.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::adapter::{ComponentHandle, RawComponent, SheetInfo};
use crate::designator::class_prefix_or_fallback;

/// Engine-local record for one logical component.
///
/// The `temp_designator`/`final_designator` options encode the lifecycle
/// `Collected → [Merged] → TemporaryRenamed → FinalRenamed`: both `None`
/// after collection, `temp_designator` set once pass 1 has written the
/// temporary name, `final_designator` set once pass 2 has. A designator
/// stays `None` when the corresponding adapter write was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub handle: ComponentHandle,
    pub old_designator: String,
    /// Class prefix (`R`, `C`, `U`, ...), parsed from the old designator.
    pub class: String,
    /// First-gate position in host units.
    pub x: f64,
    pub y: f64,
    pub gate_count: u32,
    pub temp_designator: Option<String>,
    pub final_designator: Option<String>,
    /// Sheets this logical part appears on, in document-scan order.
    /// Size 1 unless the record is a merged multi-part group.
    pub sheets: Vec<String>,
}

impl ComponentRecord {
    fn from_raw(raw: RawComponent, sheet: &SheetInfo) -> Self {
        let (x, y) = match raw.positions.first() {
            Some(p) => (p.x, p.y),
            None => {
                warn!(
                    "component {} on sheet {} reports no gate positions, placing at origin",
                    raw.designator, sheet.name
                );
                (0.0, 0.0)
            }
        };
        Self {
            class: class_prefix_or_fallback(&raw.designator).to_owned(),
            handle: raw.handle,
            old_designator: raw.designator,
            x,
            y,
            gate_count: raw.gate_count.max(1),
            temp_designator: None,
            final_designator: None,
            sheets: vec![sheet.name.clone()],
        }
    }
}

/// One sheet's worth of collected records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetComponents {
    pub sheet: SheetInfo,
    pub components: Vec<ComponentRecord>,
}

/// Turn the host's raw enumeration of one sheet into engine records.
///
/// Read-only with respect to the host; no renames happen here.
pub fn collect_sheet(sheet: &SheetInfo, raw: Vec<RawComponent>) -> SheetComponents {
    let components = raw
        .into_iter()
        .map(|rc| ComponentRecord::from_raw(rc, sheet))
        .collect();
    SheetComponents {
        sheet: sheet.clone(),
        components,
    }
}

/// Folds multi-gate parts that span several sheets into one record.
///
/// Groups are keyed by the case-folded old designator. Two instances of
/// the same physical part that carry *different* labels on different
/// sheets cannot be connected here; each registers as its own group (with
/// its own warning) and the ambiguity is left for the operator.
#[derive(Debug, Default)]
pub struct MultiPartMerger {
    /// Case-folded old designator → (sheet position, component position)
    /// of the registered group record.
    groups: HashMap<String, (usize, usize)>,
}

impl MultiPartMerger {
    /// Merge the freshly collected sheet at `document[sheet_pos]`.
    ///
    /// Duplicate gate-instances of already-registered groups are dropped
    /// from the sheet; the surviving group record (on an earlier sheet)
    /// gains this sheet in its membership.
    pub fn merge_sheet(&mut self, document: &mut [SheetComponents], sheet_pos: usize) {
        let sheet_name = document[sheet_pos].sheet.name.clone();
        let incoming = std::mem::take(&mut document[sheet_pos].components);
        let mut kept: Vec<ComponentRecord> = Vec::with_capacity(incoming.len());

        for record in incoming {
            if record.gate_count > 1 {
                warn!(
                    "detected {} gates of {} on sheet {}",
                    record.gate_count, record.old_designator, sheet_name
                );
                let key = record.old_designator.to_uppercase();
                match self.groups.get(&key).copied() {
                    Some((si, ci)) => {
                        warn!(
                            "already collected {}, ignoring duplicate instance on sheet {}",
                            record.old_designator, sheet_name
                        );
                        let group = if si == sheet_pos {
                            &mut kept[ci]
                        } else {
                            &mut document[si].components[ci]
                        };
                        if !group.sheets.contains(&sheet_name) {
                            group.sheets.push(sheet_name.clone());
                        }
                        continue;
                    }
                    None => {
                        self.groups.insert(key, (sheet_pos, kept.len()));
                    }
                }
            }
            kept.push(record);
        }

        document[sheet_pos].components = kept;
    }

    /// Number of registered multi-part groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
