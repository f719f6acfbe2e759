//! Reference-designator renumbering for multi-sheet schematics.
//!
//! Given a document already split into named sheets, each holding placed
//! components with class-prefixed designators (`R12`, `C3`, `U5`, ...),
//! [`renumber_document`] recomputes a canonical, collision-free designator
//! for every logical component:
//!
//! * per-class numeric sequencing is preserved, with counters shared across
//!   the whole document (no per-sheet restarts);
//! * multi-gate parts that physically span several sheets are merged into
//!   one logical part and numbered exactly once;
//! * renaming happens in two passes through a disjoint temporary namespace
//!   so the order of writes can never collide with designators that have
//!   not been processed yet.
//!
//! The document host (geometry, persistence, rendering) stays behind the
//! [`DocumentAdapter`] trait; the engine holds it exclusively and drives it
//! synchronously — there is exactly one logical thread of control.
//!
//! Per-component problems (a rename the host rejects, an ambiguous
//! multi-gate merge) are logged and never halt the run; only failing to
//! enumerate the document at all is fatal, in which case no mapping is
//! produced.

pub mod adapter;
pub mod collect;
pub mod designator;
pub mod passes;
pub mod report;

use log::{debug, info};
use thiserror::Error;

pub use adapter::{
    AdapterError, ComponentHandle, DocumentAdapter, GatePosition, RawComponent, SheetInfo,
};
pub use collect::{ComponentRecord, SheetComponents};
pub use passes::{ClassCounters, POSITION_TOLERANCE};
pub use report::{MapEntry, RenameReport, SheetMapping};

/// Fatal errors of a renumbering run.
///
/// Recoverable per-component failures (rejected renames, merge
/// ambiguities) never surface here — they are logged and the run
/// continues.
#[derive(Debug, Error)]
pub enum RenumError {
    #[error("document access failed: {0}")]
    DocumentAccess(#[from] AdapterError),
}

/// Renumber every component of the document behind `adapter`.
///
/// Processes all sheets in document order: collect and merge, then the
/// temporary rename pass, then the spatial numbering pass. Returns the
/// old→new mapping report; the adapter has been driven to perform the
/// actual renames as a side effect.
///
/// The run is all-or-nothing in scope: invoking the engine on a sheet
/// subset cannot yield consistent global numbering, so the adapter must
/// expose the whole document.
pub fn renumber_document<A: DocumentAdapter>(adapter: &mut A) -> Result<RenameReport, RenumError> {
    let sheets = adapter.list_sheets()?;
    info!("document has {} sheets", sheets.len());

    // Collect and merge. Merging must see sheets in document-scan order so
    // a multi-gate group is owned by the first sheet it appears on.
    let mut document: Vec<SheetComponents> = Vec::with_capacity(sheets.len());
    let mut merger = collect::MultiPartMerger::default();
    for sheet in &sheets {
        let raw = adapter.list_components(sheet)?;
        debug!("sheet {} ({}): {} components", sheet.id, sheet.name, raw.len());
        document.push(collect::collect_sheet(sheet, raw));
        let sheet_pos = document.len() - 1;
        merger.merge_sheet(&mut document, sheet_pos);
    }

    // Pass 1: move everything into the sht<N> namespace.
    for sheet in &mut document {
        passes::assign_temporaries(adapter, sheet);
    }

    // Pass 2: final class-sequential designators, counters shared across
    // the whole document.
    let mut counters = ClassCounters::default();
    for sheet in &mut document {
        passes::assign_finals(adapter, &mut counters, sheet);
    }

    Ok(RenameReport::from_document(&document, &counters))
}
