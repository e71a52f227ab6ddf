// mflgrrs/src/cli/write.rs

use crate::cli::load_project;
use crate::config::ProjectConfig;
use std::path::Path;

/// Rewrite the control file in normalized form, or print it with `to_stdout`.
pub fn write_project(
    file: &Path,
    model_ws: &Path,
    config: &ProjectConfig,
    to_stdout: bool,
) -> anyhow::Result<()> {
    let lgr = load_project(file, model_ws, config, &config.load_options())?;
    if to_stdout {
        print!("{}", lgr.control_file()?);
    } else {
        let path = lgr.write_name_file()?;
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}
