// mflgrrs-lgr/tests/common/mod.rs

use mflgrrs_lgr::{LoadOptions, SolverModel};
use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};

thread_local! {
    static EVENTS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn record(event: String) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Events recorded by every `RecordingModel` on the current test thread.
pub fn take_events() -> Vec<String> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

#[derive(Debug)]
pub struct RecordingError(pub String);

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RecordingError {}

/// Solver model test double that records every call and touches no files.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingModel {
    pub namefile: String,
    pub model_ws: PathBuf,
    pub forgive: bool,
    pub load_only: Option<Vec<String>>,
}

impl RecordingModel {
    pub fn new(namefile: &str, model_ws: impl Into<PathBuf>) -> Self {
        Self {
            namefile: namefile.to_string(),
            model_ws: model_ws.into(),
            forgive: true,
            load_only: None,
        }
    }
}

impl SolverModel for RecordingModel {
    type Error = RecordingError;

    fn load(namefile: &str, model_ws: &Path, options: &LoadOptions) -> Result<Self, Self::Error> {
        if namefile.starts_with("missing") {
            return Err(RecordingError(format!("{} not found", namefile)));
        }
        record(format!("load {}", namefile));
        Ok(Self {
            namefile: namefile.to_string(),
            model_ws: model_ws.to_path_buf(),
            forgive: options.forgive,
            load_only: options.load_only.clone(),
        })
    }

    fn write_input(&self) -> Result<(), Self::Error> {
        record(format!("write {}", self.namefile));
        Ok(())
    }

    fn change_model_ws(&mut self, new_ws: &Path) -> Result<(), Self::Error> {
        record(format!("move {} {}", self.namefile, new_ws.display()));
        self.model_ws = new_ws.to_path_buf();
        Ok(())
    }

    fn model_ws(&self) -> &Path {
        &self.model_ws
    }

    fn namefile(&self) -> String {
        self.namefile.clone()
    }
}
