// mflgrrs/src/lib.rs

pub mod cli;
pub mod config;
pub mod constants;

use mflgrrs_lgr::{ModflowLgr, NameFileModel};

pub use config::ProjectConfig;

/// An LGR simulation whose grids are tracked through their name files.
pub type LgrProject = ModflowLgr<NameFileModel>;
