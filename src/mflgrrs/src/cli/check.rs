// mflgrrs/src/cli/check.rs

use crate::cli::load_project;
use crate::config::ProjectConfig;
use mflgrrs_lgr::{LoadOptions, SolverModel};
use std::path::Path;

/// Load every grid of the simulation with input checks enabled.
///
/// With `strict`, invalid name-file entries fail the check instead of being
/// skipped.
pub fn check_project(
    file: &Path,
    model_ws: &Path,
    config: &ProjectConfig,
    strict: bool,
) -> anyhow::Result<()> {
    let options = LoadOptions {
        check: true,
        forgive: !strict,
        ..config.load_options()
    };
    let lgr = load_project(file, model_ws, config, &options)?;

    println!("✓ Loaded {}", lgr);
    println!("  ✓ Parent {}", lgr.parent().model_ws().join(lgr.parent().namefile()).display());
    for (idx, (child, data)) in lgr.iter_children().enumerate() {
        println!(
            "  ✓ Child {} {} ({} parent layers)",
            idx + 1,
            child.model_ws().join(child.namefile()).display(),
            data.nlayers()
        );
    }
    Ok(())
}
