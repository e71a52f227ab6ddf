// mflgrrs-lgr/src/lib.rs

//! Reading and writing MODFLOW-LGR control files.
//!
//! An LGR simulation couples one parent grid with one or more refined child
//! grids. The control file lists the name file of every grid together with
//! the coupling parameters of each child; the grids themselves are handled
//! by a [`SolverModel`] implementation.

pub mod child;
pub mod error;
pub mod lgr;
pub mod model;
pub mod namefile;
mod reader;
pub mod workspace;
pub mod writer;

pub use child::{LgrChild, LgrChildBuilder, LgrChildBuilderError, Ncppl};
pub use error::{LgrError, Result, WorkspaceError};
pub use lgr::ModflowLgr;
pub use model::{LoadOptions, SolverModel};
pub use namefile::{NameFileEntry, NameFileError, NameFileModel};
pub use writer::ControlFile;
