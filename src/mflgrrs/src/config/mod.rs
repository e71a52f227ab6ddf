// mflgrrs/src/config/mod.rs

pub mod project;

pub use project::ProjectConfig;
