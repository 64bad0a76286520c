use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

const TOP: &str = "   ╔══════════════════════════════════════════════════════════════╗";
const RULE: &str = "   ╟──────────────────────────────────────────────────────────────╢";
const BOTTOM: &str = "   ╚══════════════════════════════════════════════════════════════╝";
const INNER_WIDTH: usize = 62;

/// Writes one framed row; `lead` is the text between the left border and the
/// wrapped body, and continuation rows are indented to match.
fn rows(out: &mut impl Write, lead: &str, text: &str) {
    let pad = " ".repeat(lead.chars().count());
    let width = INNER_WIDTH - 3 - lead.chars().count();
    for (i, line) in wrap(text, width).iter().enumerate() {
        let prefix = if i == 0 { lead } else { pad.as_str() };
        let _ = writeln!(out, "   ║  {prefix}{line:<width$} ║");
    }
}

pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "{TOP}");
    rows(&mut stderr, "", "✗ Error");
    let _ = writeln!(stderr, "{RULE}");
    rows(&mut stderr, "", &err.to_string());

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "{RULE}");
        rows(&mut stderr, "", "Caused by:");
        rows(&mut stderr, "  ", &cause.to_string());
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "{RULE}");
        rows(&mut stderr, "", "Hints:");
        for hint in &hints {
            rows(&mut stderr, "  • ", hint);
        }
    }

    let _ = writeln!(stderr, "{BOTTOM}");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    typed: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<frag_prep::PrepError>() {
                collector.collect_prep_hints(e);
            } else if let Some(e) = cause.downcast_ref::<frag_prep::io::Error>() {
                collector.collect_structure_hints(e);
            } else if let Some(e) = cause.downcast_ref::<frag_prep::ValenceError>() {
                collector.collect_valence_hints(e);
            }
            if collector.typed {
                break;
            }
        }

        if !collector.typed {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn collect_prep_hints(&mut self, err: &frag_prep::PrepError) {
        use frag_prep::PrepError;

        self.typed = true;

        match err {
            PrepError::LibraryNotFound(_) => {
                self.add("Check the --lib-path spelling");
                self.add("Omit --lib-path to use the bundled global library");
            }

            PrepError::NotADirectory(_) => {
                self.add("--lib-path must point at a directory of fragment files");
            }

            PrepError::EmptyLibrary(_) => {
                self.add("The library needs at least one .pdb, .ent or .mol2 file");
                self.add("Hidden files and serie_file_*.conf are ignored");
            }

            PrepError::UnrecognizedFile(_) => {
                self.add("Supported fragment formats: pdb, ent, mol2");
                self.add("Move other files out of the library directory");
            }

            PrepError::MixedFormats { expected, .. } => {
                self.add(format!("Keep only {expected} files in one library"));
                self.add("Split PDB and MOL2 fragments into separate directories");
            }

            PrepError::NoAttachmentAtom { .. } => {
                self.add("Every heavy atom of the fragment is saturated");
                self.add("Check CONECT records or add explicit hydrogens");
            }

            PrepError::AtomIndexOutOfRange { .. } => {
                self.add("The fragment file may be truncated");
            }

            PrepError::Template { source, .. } => {
                self.add("Omit --template to use the bundled global template");
                self.collect_std_io_hints(source);
            }

            PrepError::Output { source, .. } => {
                self.add("Choose a writable location with -o/--out");
                self.collect_std_io_hints(source);
            }

            PrepError::Valence(e) => self.collect_valence_hints(e),

            PrepError::Structure(e) => self.collect_structure_hints(e),

            PrepError::Io(source) => self.collect_std_io_hints(source),
        }
    }

    fn collect_structure_hints(&mut self, err: &frag_prep::io::Error) {
        use frag_prep::io::{Error as IoError, Format};

        self.typed = true;

        match err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {line} in {format} format"
                ));
                match format {
                    Format::Pdb => {
                        self.add("PDB: Check ATOM/HETATM record formatting (columns 1-80)");
                        self.add("PDB: CONECT records must reference existing serials");
                    }
                    Format::Mol2 => {
                        self.add("MOL2: Verify @<TRIPOS>ATOM and @<TRIPOS>BOND sections");
                        self.add("MOL2: Check column alignment in atom records");
                    }
                }
            }

            IoError::UnknownFormat(_) => {
                self.add("Use a .pdb, .ent or .mol2 extension");
            }

            IoError::EmptyStructure { .. } => {
                self.add("The file holds no ATOM/HETATM records");
            }

            IoError::AtomIndexOutOfRange { .. } => {
                self.add("The atom index exceeds the atoms in the file");
            }
        }
    }

    fn collect_valence_hints(&mut self, err: &frag_prep::ValenceError) {
        use frag_prep::ValenceError;

        self.typed = true;

        match err {
            ValenceError::Parse(_) => {
                self.add("Valence table has invalid TOML syntax");
                self.add("Expected entries like [elements.N] valences = [3]");
            }
            ValenceError::UnknownElement(symbol) => {
                self.add(format!("'{symbol}' is not an element symbol"));
                self.add("Symbols are case-sensitive: Cl, not CL");
            }
            ValenceError::EmptyValences(_) => {
                self.add("Every element entry needs at least one valence");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure it exists");
            }
            ErrorKind::PermissionDenied => {
                self.add("Permission denied");
                self.add("Check file permissions with `ls -la`");
            }
            ErrorKind::IsADirectory => {
                self.add("Expected a file but found a directory");
            }
            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
        } else if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
