//! The two rename passes.
//!
//! Pass 1 moves every component into a temporary `sht<N><OLD>` namespace
//! that no final designator can ever land in, so pass 2 may hand out small
//! class-prefixed numbers without colliding with old designators that have
//! not been processed yet. This is the classic in-place permutation trick:
//! compute the target assignment, then apply it through a disjoint
//! intermediate namespace.

use log::error;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::adapter::{AdapterError, DocumentAdapter};
use crate::collect::{ComponentRecord, SheetComponents};

/// Positions closer than this along an axis are treated as tied.
pub const POSITION_TOLERANCE: f64 = 1.0;

/// Per-class next-sequence counters, shared across all sheets for one run.
///
/// Owned state threaded through pass 2 — deliberately not a global, and
/// deliberately not partitioned per sheet: a single total visitation order
/// is what guarantees gap-free, duplicate-free numbering.
#[derive(Debug, Default)]
pub struct ClassCounters {
    next: BTreeMap<String, u32>,
}

impl ClassCounters {
    /// Take the next sequence number for a class. Counters start at 1 and
    /// never repeat a value.
    pub fn take(&mut self, class: &str) -> u32 {
        let next = self.next.entry(class.to_owned()).or_insert(1);
        let number = *next;
        *next += 1;
        number
    }

    /// Number of distinct classes seen so far.
    pub fn class_count(&self) -> usize {
        self.next.len()
    }
}

/// Pass 1: write globally unique temporary designators for one sheet.
///
/// A rejection is logged with the offending designator and sheet and does
/// not abort the run; the component keeps its old designator and still
/// goes through pass 2 (a documented residual collision risk).
pub fn assign_temporaries<A: DocumentAdapter>(adapter: &mut A, sheet: &mut SheetComponents) {
    for record in &mut sheet.components {
        let temp = format!("sht{}{}", sheet.sheet.id, record.old_designator);
        match adapter.rename_component(record.handle, &temp) {
            Ok(()) => record.temp_designator = Some(temp),
            Err(err) => log_rename_failure(&err, record, &sheet.sheet.name),
        }
    }
}

fn cmp_left_right(a: &ComponentRecord, b: &ComponentRecord) -> Ordering {
    let dx = a.x - b.x;
    if dx > POSITION_TOLERANCE {
        Ordering::Greater
    } else if dx < -POSITION_TOLERANCE {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

fn cmp_top_bottom(a: &ComponentRecord, b: &ComponentRecord) -> Ordering {
    // Larger Y is nearer the top of the sheet and numbers first.
    let dy = a.y - b.y;
    if dy > POSITION_TOLERANCE {
        Ordering::Less
    } else if dy < -POSITION_TOLERANCE {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Numbering order for one sheet, as indices into `components`.
///
/// Two stable sorts run in sequence: a left-to-right pre-pass (ascending
/// X), then the dominant top-to-bottom pass (descending Y) over its
/// result. Ties within [`POSITION_TOLERANCE`] keep the relative order the
/// previous stage established. The two-level ordering matches the
/// reference output exactly and is kept as-is; whether the pre-pass is
/// intentional is an open product question, not something to simplify
/// away here.
pub fn spatial_order(components: &[ComponentRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..components.len()).collect();
    order.sort_by(|&a, &b| cmp_left_right(&components[a], &components[b]));
    order.sort_by(|&a, &b| cmp_top_bottom(&components[a], &components[b]));
    order
}

/// Pass 2: assign final class-sequential designators for one sheet.
///
/// Components are visited in [`spatial_order`]. The class counter is
/// consumed even when the host rejects the rename, so a failed write
/// leaves a gap rather than shifting every later component of that class.
pub fn assign_finals<A: DocumentAdapter>(
    adapter: &mut A,
    counters: &mut ClassCounters,
    sheet: &mut SheetComponents,
) {
    for index in spatial_order(&sheet.components) {
        let record = &mut sheet.components[index];
        let number = counters.take(&record.class);
        let designator = format!("{}{}", record.class, number);
        match adapter.rename_component(record.handle, &designator) {
            Ok(()) => record.final_designator = Some(designator),
            Err(err) => log_rename_failure(&err, record, &sheet.sheet.name),
        }
    }
}

fn log_rename_failure(err: &AdapterError, record: &ComponentRecord, sheet_name: &str) {
    error!(
        "rename of {} on sheet {} failed: {err}",
        record.old_designator, sheet_name
    );
}
