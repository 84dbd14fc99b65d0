use serde::ser::SerializeStruct;

use crate::kernel::LoopType;

use super::TrimCurveRecord;

/// Role of a trimming loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// inner boundary
    Hole,
    /// outer boundary
    Periphery,
    Other,
}

impl LoopKind {
    /// Orientation code written for closed boundaries, hole = 0 and periphery = 1
    pub fn orientation_code(&self) -> Option<u8> {
        match self {
            LoopKind::Hole => Some(0),
            LoopKind::Periphery => Some(1),
            LoopKind::Other => None,
        }
    }
}

/// A trimming loop and its curves in coedge order
#[derive(Debug, Clone, PartialEq)]
pub struct LoopRecord {
    pub(crate) loop_type: LoopType,
    pub(crate) curves: Vec<TrimCurveRecord>,
}

impl LoopRecord {
    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    pub fn kind(&self) -> LoopKind {
        self.loop_type.kind()
    }

    pub fn orientation_code(&self) -> Option<u8> {
        self.kind().orientation_code()
    }

    pub fn curves(&self) -> &[TrimCurveRecord] {
        &self.curves
    }
}

impl serde::Serialize for LoopRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("LoopRecord", 4)?;
        state.serialize_field("data", &self.curves)?;
        state.serialize_field("loop_type", &self.loop_type.code())?;
        match self.orientation_code() {
            Some(code) => state.serialize_field("sense", &code)?,
            None => state.skip_field("sense")?,
        }
        state.serialize_field("type", "container")?;
        state.end()
    }
}
