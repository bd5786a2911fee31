/// Device program handle

use std::fmt;

/// Opaque device handle of a program object
///
/// `ProgramId::NULL` (0) means "not allocated on the device".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProgramId(pub u32);

impl ProgramId {
    /// The "not allocated" sentinel
    pub const NULL: ProgramId = ProgramId(0);

    /// True when the handle does not refer to a device object
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program#{}", self.0)
    }
}
