// mflgrrs/tests/cli_tests.rs

use mflgrrs::cli::{check_project, info_project, load_project, relocate_project, write_project};
use mflgrrs::constants::DEFAULT_CONFIG_NAME;
use mflgrrs::ProjectConfig;
use mflgrrs_lgr::{LoadOptions, NameFileModel, SolverModel};
use std::path::Path;
use tempfile::TempDir;

const CONTROL_FILE: &str = "\
# refined test model
LGR
2
parent.nam
PARENTONLY
0 0
child/child.nam
CHILDONLY
1 59 0 0
20 1
0.4 0.4
5.0e-3 5.0e-2
1 3 3
2 8 8
3
3 3
";

fn create_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs_err::create_dir_all(root.join("child")).unwrap();
    fs_err::write(
        root.join("parent.nam"),
        "LIST 2 parent.list\nBAS6 1 parent.bas\nLPF 11 parent.lpf\n",
    )
    .unwrap();
    fs_err::write(root.join("parent.bas"), "parent bas").unwrap();
    fs_err::write(root.join("parent.lpf"), "parent lpf").unwrap();
    fs_err::write(
        root.join("child/child.nam"),
        "LIST 2 child.list\nBAS6 1 child.bas\n",
    )
    .unwrap();
    fs_err::write(root.join("child/child.bas"), "child bas").unwrap();
    fs_err::write(root.join("lgr.lgr"), CONTROL_FILE).unwrap();
    dir
}

fn names(lgr: &mflgrrs::LgrProject) -> Vec<String> {
    std::iter::once(lgr.parent())
        .chain(lgr.children())
        .map(NameFileModel::namefile)
        .collect()
}

#[test]
fn test_load_project_resolves_grids() {
    let dir = create_project();
    let config = ProjectConfig::default();
    let lgr = load_project(
        Path::new("lgr.lgr"),
        dir.path(),
        &config,
        &LoadOptions::default(),
    )
    .unwrap();

    assert_eq!(lgr.ngrids(), 2);
    assert_eq!(lgr.modelname(), "lgr");
    assert_eq!(names(&lgr), vec!["parent.nam", "child.nam"]);
    assert_eq!(lgr.children()[0].model_ws(), dir.path().join("child"));
    assert_eq!(lgr.children()[0].entries().len(), 2);
}

#[test]
fn test_relocate_copies_every_grid() {
    let dir = create_project();
    let new_ws = dir.path().join("relocated");
    let config = ProjectConfig::default();

    relocate_project(Path::new("lgr.lgr"), dir.path(), &new_ws, &config).unwrap();

    assert!(new_ws.join("lgr.lgr").is_file());
    assert_eq!(
        fs_err::read_to_string(new_ws.join("parent.lpf")).unwrap(),
        "parent lpf"
    );
    assert_eq!(
        fs_err::read_to_string(new_ws.join("child/child.bas")).unwrap(),
        "child bas"
    );

    let original = load_project(
        Path::new("lgr.lgr"),
        dir.path(),
        &config,
        &LoadOptions::default(),
    )
    .unwrap();
    let moved = load_project(Path::new("lgr.lgr"), &new_ws, &config, &LoadOptions::default())
        .unwrap();
    assert_eq!(moved.children_data(), original.children_data());
    assert_eq!(moved.heading(), original.heading());
    assert_eq!(names(&moved), names(&original));
    assert_eq!(moved.children()[0].model_ws(), new_ws.join("child"));
}

#[test]
fn test_config_renames_written_control_file() {
    let dir = create_project();
    fs_err::write(
        dir.path().join(DEFAULT_CONFIG_NAME),
        "modelname: refined\nnamefile_ext: ctl\n",
    )
    .unwrap();
    let config = ProjectConfig::discover(None, dir.path()).unwrap();

    write_project(Path::new("lgr.lgr"), dir.path(), &config, false).unwrap();

    let written = dir.path().join("refined.ctl");
    assert!(written.is_file());
    let reloaded = load_project(
        Path::new("refined.ctl"),
        dir.path(),
        &config,
        &LoadOptions::default(),
    )
    .unwrap();
    assert_eq!(reloaded.ngrids(), 2);
    assert_eq!(reloaded.children_data()[0].ncppl(), &[3, 3]);
}

#[test]
fn test_check_strict_rejects_invalid_entries() {
    let dir = create_project();
    let config = ProjectConfig::default();
    check_project(Path::new("lgr.lgr"), dir.path(), &config, true).unwrap();

    fs_err::write(
        dir.path().join("child/child.nam"),
        "LIST 2 child.list\nBAS6 x child.bas\n",
    )
    .unwrap();
    check_project(Path::new("lgr.lgr"), dir.path(), &config, false).unwrap();
    let err = check_project(Path::new("lgr.lgr"), dir.path(), &config, true).unwrap_err();
    assert!(format!("{:#}", err).contains("child.nam"));
}

#[test]
fn test_info_and_missing_control_file() {
    let dir = create_project();
    let config = ProjectConfig::default();
    info_project(Path::new("lgr.lgr"), dir.path(), &config, true).unwrap();
    info_project(Path::new("lgr.lgr"), dir.path(), &config, false).unwrap();

    let err = info_project(Path::new("absent.lgr"), dir.path(), &config, false).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.lgr"));
}
