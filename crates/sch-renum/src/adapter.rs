//! Adapter boundary to the document host.
//!
//! The host application owns geometry, persistence and rendering; the engine
//! only ever sees it through [`DocumentAdapter`]. Components are referred to
//! by opaque [`ComponentHandle`] tokens minted by the adapter — the engine
//! never inspects them and must not assume they stay valid beyond the
//! adapter session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque token for one component in the host document.
///
/// Only the adapter that minted a handle can interpret it. Handles are
/// `Copy` so records can carry them freely, but they expose no structure
/// beyond the raw value the adapter chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentHandle(u64);

impl ComponentHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// One sheet (page) of the document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    /// 1-based position in document order.
    pub id: usize,
    pub name: String,
}

/// Position of a single gate, in host units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatePosition {
    pub x: f64,
    pub y: f64,
}

/// A component as enumerated by the host, before the engine has parsed or
/// merged anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponent {
    pub handle: ComponentHandle,
    pub designator: String,
    /// Number of gates of the logical part; ≥ 1. Parts with more than one
    /// gate may be split across sheets.
    pub gate_count: u32,
    /// Gate positions as reported by the host. Only the first gate is
    /// positioned for renumbering purposes.
    pub positions: Vec<GatePosition>,
}

/// Errors surfaced by the document host.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The host cannot enumerate sheets or components at all. Fatal for the
    /// whole run.
    #[error("document access failed: {0}")]
    DocumentAccess(#[from] anyhow::Error),

    /// The host rejected a rename (reserved name, illegal character, ...).
    /// Recovered locally: the component is left at its prior state.
    #[error("rename to `{requested}` rejected by host: {reason}")]
    RenameRejected { requested: String, reason: String },
}

/// Capability interface the engine consumes.
///
/// All calls are synchronous and blocking; the engine holds the adapter
/// exclusively (`&mut`) for the duration of a run, so implementations need
/// no internal locking.
pub trait DocumentAdapter {
    /// Sheets in document order.
    fn list_sheets(&self) -> Result<Vec<SheetInfo>, AdapterError>;

    /// Components visible on a sheet, in the host's enumeration order.
    fn list_components(&self, sheet: &SheetInfo) -> Result<Vec<RawComponent>, AdapterError>;

    /// Rename one component. A multi-gate part renamed through any of its
    /// handles changes its designator on every sheet it appears on.
    fn rename_component(
        &mut self,
        handle: ComponentHandle,
        new_designator: &str,
    ) -> Result<(), AdapterError>;
}
