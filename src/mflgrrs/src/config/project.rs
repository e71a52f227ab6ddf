// mflgrrs/src/config/project.rs

use crate::constants::DEFAULT_CONFIG_NAME;
use anyhow::Context;
use mflgrrs_lgr::{LoadOptions, ModflowLgr, SolverModel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project settings parsed from mflgr-config.yml
///
/// Every field is optional; command-line values take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Name used for the control file when writing (`<modelname>.<namefile_ext>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    modelname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_ws: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exe_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namefile_ext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_path: Option<PathBuf>,
    /// File types to load from each name file, e.g. `[bas6, lpf]`
    #[serde(skip_serializing_if = "Option::is_none")]
    load_only: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forgive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<bool>,
    verbose: bool,
}

impl ProjectConfig {
    /// Read `explicit` if given, otherwise `<search_dir>/mflgr-config.yml` when it
    /// exists, otherwise fall back to defaults.
    pub fn discover(explicit: Option<&Path>, search_dir: &Path) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::try_from(path),
            None => {
                let candidate = search_dir.join(DEFAULT_CONFIG_NAME);
                if candidate.is_file() {
                    log::info!("using project configuration {}", candidate.display());
                    Self::try_from(candidate.as_path())
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn model_ws(&self) -> Option<&Path> {
        self.model_ws.as_deref()
    }

    pub fn load_options(&self) -> LoadOptions {
        let defaults = LoadOptions::default();
        LoadOptions {
            load_only: self.load_only.clone(),
            forgive: self.forgive.unwrap_or(defaults.forgive),
            check: self.check.unwrap_or(defaults.check),
            verbose: self.verbose,
        }
    }

    /// Apply the naming and output settings to a loaded simulation.
    pub fn apply<M: SolverModel>(&self, mut lgr: ModflowLgr<M>) -> ModflowLgr<M> {
        if let Some(modelname) = &self.modelname {
            lgr = lgr.with_modelname(modelname.as_str());
        }
        if let Some(exe_name) = &self.exe_name {
            lgr = lgr.with_exe_name(exe_name.as_str());
        }
        if let Some(namefile_ext) = &self.namefile_ext {
            lgr = lgr.with_namefile_ext(namefile_ext.as_str());
        }
        if let Some(external_path) = &self.external_path {
            lgr = lgr.with_external_path(external_path.as_path());
        }
        lgr
    }
}

impl TryFrom<&Path> for ProjectConfig {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs_err::read_to_string(path)
            .context(format!("Error reading {} to string.", path.display()))?;

        serde_saphyr::from_str::<ProjectConfig>(&content)
            .context(format!("Error parsing YAML file: {}", path.display()))
    }
}

impl TryFrom<&PathBuf> for ProjectConfig {
    type Error = anyhow::Error;

    fn try_from(path: &PathBuf) -> anyhow::Result<Self> {
        Self::try_from(path.as_path())
    }
}
