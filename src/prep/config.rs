use crate::io::ReadConfig;
use std::fmt;

/// Policy for choosing the attachment atom of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// First heavy atom in file order carrying at least one hydrogen.
    #[default]
    FirstOccurrence,
}

impl SelectionMode {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::FirstOccurrence => "first-occurrence",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for [`build_instructions`](super::build_instructions).
#[derive(Debug, Clone, Default)]
pub struct PrepConfig {
    pub mode: SelectionMode,
    /// TOML text of a custom valence table; the embedded table when `None`.
    pub valences: Option<String>,
    pub read: ReadConfig,
}
