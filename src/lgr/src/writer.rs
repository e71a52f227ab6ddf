// mflgrrs-lgr/src/writer.rs

use crate::child::LgrChild;
use crate::lgr::ModflowLgr;
use crate::model::SolverModel;
use crate::workspace;
use std::fmt;
use std::io;
use std::path::Path;

const LINE_WIDTH: usize = 80;

/// Text of the LGR control file for a configuration.
///
/// Name-file entries are resolved relative to the LGR workspace when the view
/// is created, so rendering itself cannot fail.
pub struct ControlFile<'a, M: SolverModel> {
    lgr: &'a ModflowLgr<M>,
    parent_entry: String,
    child_entries: Vec<String>,
}

impl<'a, M: SolverModel> ControlFile<'a, M> {
    pub fn new(lgr: &'a ModflowLgr<M>) -> io::Result<Self> {
        let root = workspace::absolute(lgr.model_ws())?;
        let parent_entry = Self::namefile_entry(&root, lgr.parent())?;
        let child_entries = lgr
            .children()
            .iter()
            .map(|child| Self::namefile_entry(&root, child))
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Self {
            lgr,
            parent_entry,
            child_entries,
        })
    }

    fn namefile_entry(root: &Path, model: &M) -> io::Result<String> {
        let rel = workspace::relative_to(&workspace::absolute(model.model_ws())?, root);
        if rel == Path::new(".") {
            Ok(model.namefile())
        } else {
            Ok(rel.join(model.namefile()).display().to_string())
        }
    }

    fn write_child(
        f: &mut fmt::Formatter<'_>,
        entry: &str,
        child: &LgrChild,
    ) -> fmt::Result {
        writeln!(f, "{}    # dataset 6 - CHILD NAMEFILE", entry)?;
        writeln!(f, "CHILDONLY  # dataset 7 - GRIDSTATUS")?;
        writeln!(
            f,
            "{} {} {} {}  # dataset 8 - ISHFLG IBFLG IUCBHSV IUCBFSV",
            child.ishflg(),
            child.ibflg(),
            child.iucbhsv(),
            child.iucbfsv()
        )?;
        writeln!(
            f,
            "{} {}  # dataset 9 - MXLGRITER IOUTLGR",
            child.mxlgriter(),
            child.ioutlgr()
        )?;
        writeln!(
            f,
            "{} {}  # dataset 10 - RELAXH RELAXF",
            child.relaxh(),
            child.relaxf()
        )?;
        writeln!(
            f,
            "{} {}  # dataset 11 - HCLOSELGR FCLOSELGR",
            child.hcloselgr(),
            child.fcloselgr()
        )?;
        let [l, r, c] = child.begin_one_based();
        writeln!(f, "{} {} {}  # dataset 12 - NPLBEG NPRBEG NPCBEG", l, r, c)?;
        let [l, r, c] = child.end_one_based();
        writeln!(f, "{} {} {}  # dataset 13 - NPLEND NPREND NPCEND", l, r, c)?;
        writeln!(f, "{}  # dataset 14 - NCPP", child.ncpp())?;
        let ncppl: Vec<String> = child.ncppl().iter().map(|n| n.to_string()).collect();
        writeln!(f, "{}  # dataset 15 - NCPPL", ncppl.join(" "))
    }
}

/// Pad `line` to the control-file width and append an inline comment.
pub(crate) fn padline(line: &str, comment: &str) -> String {
    format!("{:width$}  # {}", line, comment, width = LINE_WIDTH)
}

impl<M: SolverModel> fmt::Display for ControlFile<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lgr.heading().is_empty() {
            writeln!(
                f,
                "# MODFLOW-LGR control file written by mflgrrs {}",
                env!("CARGO_PKG_VERSION")
            )?;
        } else {
            for line in self.lgr.heading().lines() {
                writeln!(f, "# {}", line)?;
            }
        }
        writeln!(f, "{}", padline("LGR", "data set 1"))?;
        writeln!(
            f,
            "{}",
            padline(&self.lgr.ngrids().to_string(), "dataset 2 - NGRIDS")
        )?;
        writeln!(f, "{}    # dataset 3 - PARENT NAMEFILE", self.parent_entry)?;
        writeln!(f, "PARENTONLY  # dataset 4 - GRIDSTATUS")?;
        writeln!(
            f,
            "{} {}  # data set 5 - IUPBHSV, IUPBFSV",
            self.lgr.iupbhsv(),
            self.lgr.iupbfsv()
        )?;
        for (entry, child) in self.child_entries.iter().zip(self.lgr.children_data()) {
            Self::write_child(f, entry, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padline_width() {
        let line = padline("LGR", "data set 1");
        assert_eq!(line.len(), LINE_WIDTH + "  # data set 1".len());
        assert!(line.starts_with("LGR "));
        assert!(line.ends_with("  # data set 1"));
    }

    #[test]
    fn test_padline_keeps_long_lines() {
        let long = "x".repeat(90);
        assert_eq!(padline(&long, "c"), format!("{}  # c", long));
    }
}
