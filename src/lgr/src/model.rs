// mflgrrs-lgr/src/model.rs

use crate::error::LgrError;
use std::path::Path;

/// The grid solver model behind each parent and child of an LGR simulation.
///
/// The LGR layer only needs to load a model from its name file, write its
/// input deck and move it to another workspace; everything else about the
/// model is up to the implementation.
pub trait SolverModel: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a model from `namefile` inside `model_ws`.
    fn load(namefile: &str, model_ws: &Path, options: &LoadOptions) -> Result<Self, Self::Error>;

    /// Write the full input deck of the model into its workspace.
    fn write_input(&self) -> Result<(), Self::Error>;

    /// Retarget the model to `new_ws`.
    fn change_model_ws(&mut self, new_ws: &Path) -> Result<(), Self::Error>;

    fn model_ws(&self) -> &Path;

    /// File name (no directory) of the model's name file.
    fn namefile(&self) -> String;
}

/// Options handed unchanged to [`SolverModel::load`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Only load these file types (e.g. `["bas6", "lpf"]`). `None` loads everything.
    pub load_only: Option<Vec<String>>,
    /// Skip packages that fail to load instead of aborting.
    pub forgive: bool,
    /// Check model input for common errors.
    pub check: bool,
    pub verbose: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            load_only: None,
            forgive: true,
            check: true,
            verbose: false,
        }
    }
}

pub(crate) fn model_error<E>(namefile: impl Into<String>, source: E) -> LgrError
where
    E: std::error::Error + Send + Sync + 'static,
{
    LgrError::Model {
        namefile: namefile.into(),
        source: Box::new(source),
    }
}
