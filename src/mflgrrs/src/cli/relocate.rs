// mflgrrs/src/cli/relocate.rs

use crate::cli::load_project;
use crate::config::ProjectConfig;
use anyhow::Context;
use std::path::Path;

/// Copy a simulation to `new_ws`, keeping the layout of its grids.
pub fn relocate_project(
    file: &Path,
    model_ws: &Path,
    new_ws: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let mut lgr = load_project(file, model_ws, config, &config.load_options())?;
    println!("✓ Loaded {}", lgr);

    if let Some(warning) = lgr.change_model_ws(Some(new_ws))? {
        eprintln!("Warning: {}", warning);
    }
    if let Some(warning) = lgr
        .write_input()
        .context(format!("Error writing model to {}", lgr.model_ws().display()))?
    {
        eprintln!("Warning: {}", warning);
    }
    println!("✓ Wrote {}", lgr.namefile_path().display());
    Ok(())
}
