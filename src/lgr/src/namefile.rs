// mflgrrs-lgr/src/namefile.rs

//! A [`SolverModel`] that only knows the model's name file.
//!
//! The name file lists the input packages of a MODFLOW model, one
//! `FTYPE NUNIT FNAME [STATUS]` entry per line. Package files are carried
//! along verbatim when the model is written to a new workspace.

use crate::model::{LoadOptions, SolverModel};
use crate::workspace;
use log::{debug, warn};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid name file entry at line {line_no}: {line:?}")]
    InvalidEntry { line_no: usize, line: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFileEntry {
    pub ftype: String,
    pub unit: i32,
    pub fname: String,
    pub status: Option<String>,
}

impl NameFileEntry {
    pub fn new(ftype: impl Into<String>, unit: i32, fname: impl Into<String>) -> Self {
        Self {
            ftype: ftype.into(),
            unit,
            fname: fname.into(),
            status: None,
        }
    }

    fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let ftype = tokens.next()?.to_string();
        let unit = tokens.next()?.parse().ok()?;
        let fname = tokens.next()?.to_string();
        let status = tokens.next().map(str::to_string);
        Some(Self {
            ftype,
            unit,
            fname,
            status,
        })
    }
}

impl fmt::Display for NameFileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14} {:>5}  {}", self.ftype, self.unit, self.fname)?;
        if let Some(status) = &self.status {
            write!(f, " {}", status)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NameFileModel {
    namefile: String,
    model_ws: PathBuf,
    /// Directory the package files currently live in.
    source_ws: PathBuf,
    heading: Vec<String>,
    entries: Vec<NameFileEntry>,
}

impl NameFileModel {
    pub fn new(namefile: impl Into<String>, model_ws: impl Into<PathBuf>) -> Self {
        let model_ws = model_ws.into();
        Self {
            namefile: namefile.into(),
            source_ws: model_ws.clone(),
            model_ws,
            heading: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: NameFileEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[NameFileEntry] {
        &self.entries
    }

    pub fn heading(&self) -> &[String] {
        &self.heading
    }

    fn keep_entry(entry: &NameFileEntry, load_only: Option<&[String]>) -> bool {
        match load_only {
            None => true,
            Some(ftypes) => {
                entry.ftype.eq_ignore_ascii_case("list")
                    || ftypes.iter().any(|ftype| ftype.eq_ignore_ascii_case(&entry.ftype))
            }
        }
    }

    fn same_dir(a: &Path, b: &Path) -> std::io::Result<bool> {
        Ok(workspace::absolute(a)? == workspace::absolute(b)?)
    }
}

impl SolverModel for NameFileModel {
    type Error = NameFileError;

    fn load(namefile: &str, model_ws: &Path, options: &LoadOptions) -> Result<Self, Self::Error> {
        let path = model_ws.join(namefile);
        let content = fs_err::read_to_string(&path)?;
        let mut model = Self::new(namefile, model_ws);
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                model.heading.push(comment.trim().to_string());
                continue;
            }
            match NameFileEntry::parse(trimmed) {
                Some(entry) => {
                    if Self::keep_entry(&entry, options.load_only.as_deref()) {
                        model.entries.push(entry);
                    } else {
                        debug!("{}: skipping {} (not in load_only)", namefile, entry.ftype);
                    }
                }
                None if options.forgive => {
                    warn!(
                        "{}: skipping invalid entry at line {}: {:?}",
                        path.display(),
                        idx + 1,
                        line
                    );
                }
                None => {
                    return Err(NameFileError::InvalidEntry {
                        line_no: idx + 1,
                        line: line.to_string(),
                    })
                }
            }
        }
        if options.check {
            for entry in &model.entries {
                let package = model_ws.join(&entry.fname);
                if !package.exists() && entry.status.as_deref() != Some("REPLACE") {
                    warn!(
                        "{}: {} file {} does not exist",
                        namefile,
                        entry.ftype,
                        package.display()
                    );
                }
            }
        }
        Ok(model)
    }

    fn write_input(&self) -> Result<(), Self::Error> {
        fs_err::create_dir_all(&self.model_ws)?;
        if !Self::same_dir(&self.source_ws, &self.model_ws)? {
            for entry in &self.entries {
                let source = self.source_ws.join(&entry.fname);
                if !source.is_file() {
                    continue;
                }
                let target = self.model_ws.join(&entry.fname);
                if let Some(dir) = target.parent() {
                    fs_err::create_dir_all(dir)?;
                }
                fs_err::copy(&source, &target)?;
                debug!("copied {} to {}", source.display(), target.display());
            }
        }
        let mut file = fs_err::File::create(self.model_ws.join(&self.namefile))?;
        for line in &self.heading {
            writeln!(file, "# {}", line)?;
        }
        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }
        Ok(())
    }

    fn change_model_ws(&mut self, new_ws: &Path) -> Result<(), Self::Error> {
        workspace::ensure_dir(new_ws)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NAMEFILE: &str = "# parent model\nLIST 2 parent.list\nBAS6 1 parent.bas\n\nLPF 11 parent.lpf\nDATA(BINARY) 51 parent.hds REPLACE\n";

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs_err::write(dir.path().join("parent.nam"), NAMEFILE).unwrap();
        fs_err::write(dir.path().join("parent.bas"), "bas").unwrap();
        fs_err::write(dir.path().join("parent.lpf"), "lpf").unwrap();
        dir
    }

    #[test]
    fn test_load_entries() {
        let dir = setup();
        let model =
            NameFileModel::load("parent.nam", dir.path(), &LoadOptions::default()).unwrap();
        assert_eq!(model.heading(), &["parent model".to_string()]);
        assert_eq!(model.entries().len(), 4);
        assert_eq!(model.entries()[1], NameFileEntry::new("BAS6", 1, "parent.bas"));
        assert_eq!(model.entries()[3].status.as_deref(), Some("REPLACE"));
    }

    #[test]
    fn test_load_only_keeps_list() {
        let dir = setup();
        let options = LoadOptions {
            load_only: Some(vec!["lpf".to_string()]),
            ..LoadOptions::default()
        };
        let model = NameFileModel::load("parent.nam", dir.path(), &options).unwrap();
        let ftypes: Vec<&str> = model.entries().iter().map(|e| e.ftype.as_str()).collect();
        assert_eq!(ftypes, vec!["LIST", "LPF"]);
    }

    #[test]
    fn test_forgive_controls_invalid_entries() {
        let dir = setup();
        fs_err::write(dir.path().join("bad.nam"), "LIST 2 bad.list\nBAS6 one bad.bas\n").unwrap();

        let model = NameFileModel::load("bad.nam", dir.path(), &LoadOptions::default()).unwrap();
        assert_eq!(model.entries().len(), 1);

        let strict = LoadOptions {
            forgive: false,
            ..LoadOptions::default()
        };
        let err = NameFileModel::load("bad.nam", dir.path(), &strict).unwrap_err();
        assert!(matches!(err, NameFileError::InvalidEntry { line_no: 2, .. }));
    }

    #[test]
    fn test_write_copies_packages_to_new_workspace() {
        let dir = setup();
        let mut model =
            NameFileModel::load("parent.nam", dir.path(), &LoadOptions::default()).unwrap();
        let new_ws = dir.path().join("moved");
        model.change_model_ws(&new_ws).unwrap();
        assert!(new_ws.is_dir());
        model.write_input().unwrap();

        assert_eq!(fs_err::read_to_string(new_ws.join("parent.lpf")).unwrap(), "lpf");
        let reloaded =
            NameFileModel::load("parent.nam", &new_ws, &LoadOptions::default()).unwrap();
        assert_eq!(reloaded.entries(), model.entries());
    }
}
