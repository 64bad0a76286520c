use anyhow::Result;

use frag_prep::PrepConfig;

use crate::cli::LibraryOptions;
use crate::io::read_text;

pub fn build_prep_config(opts: &LibraryOptions) -> Result<PrepConfig> {
    let valences = opts
        .valences
        .as_deref()
        .map(|path| read_text(path, "valence table"))
        .transpose()?;

    Ok(PrepConfig {
        mode: opts.mode.into(),
        valences,
        ..PrepConfig::default()
    })
}
