// mflgrrs/src/cli/mod.rs

pub mod check;
pub mod info;
pub mod relocate;
pub mod write;

pub use check::check_project;
pub use info::info_project;
pub use relocate::relocate_project;
pub use write::write_project;

use crate::config::ProjectConfig;
use crate::LgrProject;
use anyhow::Context;
use mflgrrs_lgr::workspace::split_namefile;
use mflgrrs_lgr::LoadOptions;
use std::path::Path;

/// Load the control file `file`, resolved against `model_ws`, and apply the
/// project settings to it.
pub fn load_project(
    file: &Path,
    model_ws: &Path,
    config: &ProjectConfig,
    options: &LoadOptions,
) -> anyhow::Result<LgrProject> {
    let (control_ws, control_name) = split_namefile(model_ws, &file.to_string_lossy());
    let lgr = LgrProject::load(&control_name, &control_ws, options).context(format!(
        "Error loading LGR control file {}",
        control_ws.join(&control_name).display()
    ))?;
    Ok(config.apply(lgr))
}
