use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use frag_prep::{SelectionMode, default_library_dir};

#[derive(Parser)]
#[command(
    name = "fprep",
    about = "Prepare fragment-growing instruction files from fragment libraries",
    version,
    author,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    /// Scaffold (core) structure the fragments are grown onto
    #[arg(value_name = "SCAFFOLD")]
    pub scaffold: PathBuf,

    /// Atom name of the scaffold heavy atom used as growing point
    #[arg(value_name = "HEAVY_ATOM")]
    pub heavy_atom: String,

    #[command(flatten)]
    pub library: LibraryOptions,

    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Library")]
pub struct LibraryOptions {
    /// Directory holding the fragment PDB/MOL2 files [default: the bundled
    /// Libraries/global, next to the executable or in the build tree]
    #[arg(
        short,
        long = "lib-path",
        alias = "lib_path",
        value_name = "DIR",
        default_value_os_t = default_library_dir(),
        hide_default_value = true
    )]
    pub lib_path: PathBuf,

    /// Criterion used to pick the fragment atom bonded to the scaffold
    #[arg(short, long, value_name = "MODE", default_value = "first-occurrence")]
    pub mode: Mode,

    /// Custom valence table (TOML) for implicit hydrogen counting
    #[arg(long, value_name = "FILE")]
    pub valences: Option<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Global Library")]
pub struct GlobalOptions {
    /// Render the global-library configuration instead of per-fragment lines
    #[arg(long = "global-lib", alias = "global_lib")]
    pub global_lib: bool,

    /// Template for --global-lib ($ATOM and $PATH are substituted)
    #[arg(long, value_name = "FILE", requires = "global_lib")]
    pub template: Option<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// Instruction file (default: <LIB>/serie_file_<SCAFFOLD stem>.conf)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Suppress banner, progress and summary tables (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum Mode {
    /// First heavy atom in file order carrying at least one hydrogen
    #[default]
    FirstOccurrence,
}

impl From<Mode> for SelectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::FirstOccurrence => SelectionMode::FirstOccurrence,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_bundled_library() {
        let cli = Cli::try_parse_from(["fprep", "core.pdb", "C7"]).unwrap();
        assert_eq!(cli.scaffold, PathBuf::from("core.pdb"));
        assert_eq!(cli.heavy_atom, "C7");
        assert_eq!(cli.library.lib_path, default_library_dir());
        assert!(matches!(cli.library.mode, Mode::FirstOccurrence));
        assert!(!cli.global.global_lib);
        assert!(cli.output.out.is_none());
    }

    #[test]
    fn mode_values_match_library_names() {
        for mode in Mode::value_variants() {
            let value = mode.to_possible_value().unwrap();
            assert_eq!(value.get_name(), SelectionMode::from(*mode).name());
        }
    }

    #[test]
    fn accepts_underscore_aliases() {
        let cli = Cli::try_parse_from([
            "fprep",
            "core.pdb",
            "C7",
            "--lib_path",
            "frags",
            "--global_lib",
            "-o",
            "out.conf",
        ])
        .unwrap();
        assert_eq!(cli.library.lib_path, PathBuf::from("frags"));
        assert!(cli.global.global_lib);
        assert_eq!(cli.output.out, Some(PathBuf::from("out.conf")));
    }

    #[test]
    fn rejects_unknown_mode_and_orphan_template() {
        assert!(Cli::try_parse_from(["fprep", "core.pdb", "C7", "-m", "random"]).is_err());
        assert!(Cli::try_parse_from(["fprep", "core.pdb", "C7", "--template", "t.conf"]).is_err());
    }
}
