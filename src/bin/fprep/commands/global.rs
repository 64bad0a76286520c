use anyhow::{Context, Result};

use frag_prep::{check_scaffold, default_output_path, load_template, render_global, write_output};

use super::series::scaffold_substep;
use crate::cli::Cli;
use crate::display::{Context as DisplayContext, Progress, print_run_summary};

const TOTAL_STEPS: u8 = 2;

pub fn run_global(cli: Cli, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Rendering global template");
    let scaffold_found = check_scaffold(&cli.scaffold, &cli.heavy_atom);
    let template = load_template(cli.global.template.as_deref())
        .context("Failed to load global-library template")?;
    let text = render_global(&template, &cli.heavy_atom, &cli.library.lib_path);
    let source = cli
        .global
        .template
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled template".to_string());
    progress.complete_step(
        "Rendering global template",
        &[
            format!("Template: {source}"),
            scaffold_substep(scaffold_found, &cli.heavy_atom),
        ],
    );

    progress.step("Writing serie file");
    let output = cli
        .output
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.library.lib_path, &cli.scaffold));
    write_output(&output, &text).context("Failed to write serie file")?;
    progress.complete_step("Writing serie file", &[output.display().to_string()]);

    if ctx.interactive {
        print_run_summary(&[
            ("Heavy atom", cli.heavy_atom.clone()),
            ("Library", cli.library.lib_path.display().to_string()),
            ("Output", output.display().to_string()),
        ]);
    }

    progress.finish();

    Ok(())
}
