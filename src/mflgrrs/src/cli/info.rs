// mflgrrs/src/cli/info.rs

use crate::cli::load_project;
use crate::config::ProjectConfig;
use crate::LgrProject;
use mflgrrs_lgr::{LgrChild, SolverModel};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct GridSummary<'a> {
    pub namefile: String,
    pub model_ws: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupling: Option<&'a LgrChild>,
}

#[derive(Debug, Serialize)]
pub struct ProjectSummary<'a> {
    pub modelname: String,
    pub control_file: PathBuf,
    pub heading: String,
    pub ngrids: usize,
    pub grids: Vec<GridSummary<'a>>,
}

impl<'a> ProjectSummary<'a> {
    pub fn new(lgr: &'a LgrProject) -> Self {
        let mut grids = vec![GridSummary {
            namefile: lgr.parent().namefile(),
            model_ws: lgr.parent().model_ws().to_path_buf(),
            coupling: None,
        }];
        for (child, data) in lgr.iter_children() {
            grids.push(GridSummary {
                namefile: child.namefile(),
                model_ws: child.model_ws().to_path_buf(),
                coupling: Some(data),
            });
        }
        Self {
            modelname: lgr.modelname().to_string(),
            control_file: lgr.namefile_path(),
            heading: lgr.heading().to_string(),
            ngrids: lgr.ngrids(),
            grids,
        }
    }
}

/// Human readable listing, indices shown one-based as in the control file.
impl fmt::Display for ProjectSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} grids)",
            self.control_file.display(),
            self.ngrids
        )?;
        for (idx, grid) in self.grids.iter().enumerate() {
            let path = grid.model_ws.join(&grid.namefile);
            match grid.coupling {
                None => writeln!(f, "  parent  {}", path.display())?,
                Some(data) => {
                    let [lb, rb, cb] = data.begin_one_based();
                    let [le, re, ce] = data.end_one_based();
                    writeln!(f, "  child {} {}", idx, path.display())?;
                    writeln!(
                        f,
                        "    layers {}-{} rows {}-{} columns {}-{}",
                        lb, le, rb, re, cb, ce
                    )?;
                    writeln!(
                        f,
                        "    ncpp {} ncppl {:?} mxlgriter {} relax {}/{} close {}/{}",
                        data.ncpp(),
                        data.ncppl(),
                        data.mxlgriter(),
                        data.relaxh(),
                        data.relaxf(),
                        data.hcloselgr(),
                        data.fcloselgr(),
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Print the grids of a simulation and their coupling parameters.
pub fn info_project(
    file: &Path,
    model_ws: &Path,
    config: &ProjectConfig,
    json: bool,
) -> anyhow::Result<()> {
    let lgr = load_project(file, model_ws, config, &config.load_options())?;
    let summary = ProjectSummary::new(&lgr);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mflgrrs_lgr::NameFileModel;

    fn project() -> LgrProject {
        let data = LgrChild::builder()
            .nplbeg(0)
            .nprbeg(4)
            .npcbeg(2)
            .nplend(1)
            .nprend(8)
            .npcend(6)
            .ncpp(3)
            .ncppl(vec![3u32, 2])
            .build()
            .unwrap();
        LgrProject::new(
            NameFileModel::new("parent.nam", "runs"),
            vec![(NameFileModel::new("child.nam", "runs/child"), data)],
        )
        .with_modelname("refined")
    }

    #[test]
    fn test_summary_lists_parent_then_children() {
        let lgr = project();
        let summary = ProjectSummary::new(&lgr);
        assert_eq!(summary.ngrids, 2);
        assert_eq!(summary.modelname, "refined");
        assert!(summary.grids[0].coupling.is_none());
        assert_eq!(summary.grids[1].namefile, "child.nam");
        assert_eq!(summary.grids[1].coupling.map(LgrChild::ncpp), Some(3));
    }

    #[test]
    fn test_text_uses_one_based_indices() {
        let lgr = project();
        let text = ProjectSummary::new(&lgr).to_string();
        assert!(text.contains("(2 grids)"));
        assert!(text.lines().nth(1).unwrap().starts_with("  parent  "));
        assert!(text.contains("layers 1-2 rows 5-9 columns 3-7"));
        assert!(text.contains("ncppl [3, 2]"));
    }

    #[test]
    fn test_json_omits_parent_coupling() {
        let lgr = project();
        let value = serde_json::to_value(ProjectSummary::new(&lgr)).unwrap();
        let grids = value["grids"].as_array().unwrap();
        assert!(grids[0].get("coupling").is_none());
        assert_eq!(grids[1]["coupling"]["ncppl"], serde_json::json!([3, 2]));
        assert_eq!(grids[1]["coupling"]["nprbeg"], 4);
    }
}
