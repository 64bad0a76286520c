use anyhow::{Context, Result};

use frag_prep::{
    Library, build_instructions_with, check_scaffold, default_output_path, write_output,
};

use crate::cli::Cli;
use crate::config::build_prep_config;
use crate::display::{
    Context as DisplayContext, Progress, print_fragment_results, print_library_info,
    print_run_summary,
};

const TOTAL_STEPS: u8 = 3;

pub fn run_series(cli: Cli, ctx: DisplayContext) -> Result<()> {
    let config = build_prep_config(&cli.library)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Validating fragment library");
    let scaffold_found = check_scaffold(&cli.scaffold, &cli.heavy_atom);
    let library = Library::open(&cli.library.lib_path).with_context(|| {
        format!(
            "Invalid fragment library: {}",
            cli.library.lib_path.display()
        )
    })?;
    progress.complete_step(
        "Validating fragment library",
        &[
            format!("{} {} fragments", library.len(), library.format),
            scaffold_substep(scaffold_found, &cli.heavy_atom),
        ],
    );

    if ctx.interactive {
        print_library_info(&library);
    }

    progress.step("Selecting attachment atoms");
    let report = build_instructions_with(&library, &cli.heavy_atom, &config, |path| {
        if let Some(name) = path.file_name() {
            progress.detail(&format!("Reading {}", name.to_string_lossy()));
        }
    })
    .context("Failed to build instructions")?;
    progress.complete_step(
        "Selecting attachment atoms",
        &[
            format!("Mode: {}", config.mode),
            format!(
                "{} built, {} skipped",
                report.instructions.len(),
                report.skipped.len()
            ),
        ],
    );

    if ctx.interactive {
        print_fragment_results(&report);
    }

    progress.step("Writing serie file");
    let output = cli
        .output
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&library.root, &cli.scaffold));
    write_output(&output, &report.instructions.to_string())
        .context("Failed to write serie file")?;
    progress.complete_step("Writing serie file", &[output.display().to_string()]);

    if ctx.interactive {
        print_run_summary(&[
            ("Scaffold", cli.scaffold.display().to_string()),
            ("Heavy atom", cli.heavy_atom.clone()),
            ("Instructions", report.instructions.len().to_string()),
            ("Output", output.display().to_string()),
        ]);
    }

    progress.finish();

    Ok(())
}

pub(super) fn scaffold_substep(found: Option<bool>, heavy_atom: &str) -> String {
    match found {
        Some(true) => format!("Scaffold atom {heavy_atom} present"),
        Some(false) => format!("Scaffold atom {heavy_atom} not found"),
        None => "Scaffold not inspected".to_string(),
    }
}
