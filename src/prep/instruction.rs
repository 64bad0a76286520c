use super::config::PrepConfig;
use super::error::Error;
use super::library::Library;
use super::select::{resolve_atom_name, select_attachment_atom};
use crate::chem::ValenceTable;
use crate::io::{Format, StructureReader};
use log::{error, info, warn};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

/// One line of a serie file: grow `fragment` onto `scaffold_atom` through
/// `fragment_atom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Absolute path of the fragment file.
    pub fragment: PathBuf,
    pub scaffold_atom: String,
    pub fragment_atom: String,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}   {}  {}",
            self.fragment.display(),
            self.scaffold_atom,
            self.fragment_atom
        )
    }
}

/// Ordered instruction lines. Displays newline-joined without a trailing
/// newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSet {
    lines: Vec<Instruction>,
}

impl InstructionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.lines.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.lines.iter()
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a InstructionSet {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// A fragment left out of the instruction set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub instructions: InstructionSet,
    pub skipped: Vec<Skipped>,
}

/// Builds one instruction per fragment of `library`.
///
/// Failures on individual fragments are recorded in [`BuildReport::skipped`]
/// and logged: problems with the fragment itself ([`Error::is_per_fragment`])
/// as warnings, anything else as errors. Only an invalid custom valence table
/// aborts.
pub fn build_instructions(
    library: &Library,
    scaffold_atom: &str,
    config: &PrepConfig,
) -> Result<BuildReport, Error> {
    build_instructions_with(library, scaffold_atom, config, |_| {})
}

/// [`build_instructions`] that calls `on_fragment` before each fragment is read.
pub fn build_instructions_with(
    library: &Library,
    scaffold_atom: &str,
    config: &PrepConfig,
    mut on_fragment: impl FnMut(&Path),
) -> Result<BuildReport, Error> {
    let table = ValenceTable::load(config.valences.as_deref())?;
    let mut report = BuildReport::default();

    for path in &library.files {
        on_fragment(path);
        match build_instruction(path, library.format, scaffold_atom, config, &table) {
            Ok(instruction) => {
                info!("{instruction}");
                report.instructions.push(instruction);
            }
            Err(e) => {
                if e.is_per_fragment() {
                    warn!("Skipping {}: {e}", path.display());
                } else {
                    error!("Skipping {}: {e}", path.display());
                }
                report.skipped.push(Skipped {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Reads one fragment and pairs its attachment atom with `scaffold_atom`.
pub fn build_instruction(
    path: &Path,
    format: Format,
    scaffold_atom: &str,
    config: &PrepConfig,
    table: &ValenceTable,
) -> Result<Instruction, Error> {
    let file = File::open(path).map_err(crate::io::Error::from)?;
    let system = StructureReader::new(BufReader::new(file), format)
        .config(config.read)
        .read()?;

    let index = select_attachment_atom(&system, config.mode, table)?;
    let fragment_atom = resolve_atom_name(&system, index)?.to_string();

    Ok(Instruction {
        fragment: absolute_path(path)?,
        scaffold_atom: scaffold_atom.to_string(),
        fragment_atom,
    })
}

/// Absolute form of `path` with `.` and `..` resolved lexically; symlinks
/// are left alone.
fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
