//! In-memory document host for engine tests.

use std::collections::HashMap;

use sch_renum::{
    AdapterError, ComponentHandle, DocumentAdapter, GatePosition, RawComponent, SheetInfo,
};

/// One rename attempt the engine made against the host.
#[derive(Debug, Clone)]
pub struct RenameAttempt {
    pub handle: ComponentHandle,
    pub requested: String,
    pub accepted: bool,
}

/// Mock document host: sheets, placed components, and a full log of every
/// rename the engine attempts.
#[derive(Debug, Default)]
pub struct MockDocument {
    sheets: Vec<SheetInfo>,
    /// Sheet id → components in host enumeration order.
    placed: HashMap<usize, Vec<RawComponent>>,
    /// Current designator of every part, by handle.
    names: HashMap<ComponentHandle, String>,
    pub attempts: Vec<RenameAttempt>,
    /// Reject every rename, as a host with all names reserved would.
    pub reject_renames: bool,
    /// Fail sheet/component enumeration entirely.
    pub fail_enumeration: bool,
    next_handle: u64,
}

impl MockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: &str) -> usize {
        let id = self.sheets.len() + 1;
        self.sheets.push(SheetInfo {
            id,
            name: name.to_owned(),
        });
        self.placed.insert(id, Vec::new());
        id
    }

    /// Place a new part on a sheet; returns its handle.
    pub fn place(
        &mut self,
        sheet_id: usize,
        designator: &str,
        gate_count: u32,
        x: f64,
        y: f64,
    ) -> ComponentHandle {
        self.next_handle += 1;
        let handle = ComponentHandle::new(self.next_handle);
        self.names.insert(handle, designator.to_owned());
        self.place_gate(sheet_id, handle, gate_count, x, y);
        handle
    }

    /// Make an existing part (another gate of it) visible on a further
    /// sheet, the way a split multi-gate part is enumerated per sheet.
    pub fn place_gate(
        &mut self,
        sheet_id: usize,
        handle: ComponentHandle,
        gate_count: u32,
        x: f64,
        y: f64,
    ) {
        let designator = self.names[&handle].clone();
        self.placed
            .get_mut(&sheet_id)
            .expect("sheet must exist")
            .push(RawComponent {
                handle,
                designator,
                gate_count,
                positions: vec![GatePosition { x, y }],
            });
    }

    pub fn name_of(&self, handle: ComponentHandle) -> &str {
        &self.names[&handle]
    }

    /// Rename attempts the engine made for one handle.
    pub fn attempts_for(&self, handle: ComponentHandle) -> Vec<&RenameAttempt> {
        self.attempts.iter().filter(|a| a.handle == handle).collect()
    }
}

impl DocumentAdapter for MockDocument {
    fn list_sheets(&self) -> Result<Vec<SheetInfo>, AdapterError> {
        if self.fail_enumeration {
            return Err(AdapterError::DocumentAccess(anyhow::anyhow!(
                "host application is gone"
            )));
        }
        Ok(self.sheets.clone())
    }

    fn list_components(&self, sheet: &SheetInfo) -> Result<Vec<RawComponent>, AdapterError> {
        if self.fail_enumeration {
            return Err(AdapterError::DocumentAccess(anyhow::anyhow!(
                "host application is gone"
            )));
        }
        let mut components = self.placed.get(&sheet.id).cloned().ok_or_else(|| {
            AdapterError::DocumentAccess(anyhow::anyhow!("no such sheet: {}", sheet.id))
        })?;
        // Report the designator the part currently carries, like a live host.
        for component in &mut components {
            component.designator = self.names[&component.handle].clone();
        }
        Ok(components)
    }

    fn rename_component(
        &mut self,
        handle: ComponentHandle,
        new_designator: &str,
    ) -> Result<(), AdapterError> {
        let accepted = !self.reject_renames;
        self.attempts.push(RenameAttempt {
            handle,
            requested: new_designator.to_owned(),
            accepted,
        });
        if !accepted {
            return Err(AdapterError::RenameRejected {
                requested: new_designator.to_owned(),
                reason: "name reserved by host".to_owned(),
            });
        }
        self.names.insert(handle, new_designator.to_owned());
        Ok(())
    }
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
