// mflgrrs-lgr/src/lgr.rs

use crate::child::{LgrChild, LgrChildBuilder};
use crate::error::{LgrError, Result, WorkspaceError};
use crate::model::{model_error, LoadOptions, SolverModel};
use crate::reader::ControlFileReader;
use crate::workspace;
use crate::writer::ControlFile;
use log::{info, log, warn, Level};
use std::fmt;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODELNAME: &str = "modflowlgrtest";
pub const DEFAULT_NAMEFILE_EXT: &str = "lgr";
pub const DEFAULT_EXE_NAME: &str = "mflgr.exe";
/// First unit number handed out for external array files.
pub const FIRST_EXTERNAL_UNIT: u32 = 2000;

/// Per-grid messages go out at info level when verbose, debug otherwise.
fn log_level(verbose: bool) -> Level {
    if verbose {
        Level::Info
    } else {
        Level::Debug
    }
}

/// A MODFLOW-LGR simulation: one parent model and its refined children.
///
/// `children` and `children_data` are index-aligned; children can only be
/// added together with their coupling parameters.
#[derive(Debug)]
pub struct ModflowLgr<M: SolverModel> {
    modelname: String,
    namefile_ext: String,
    model_ws: PathBuf,
    heading: String,
    version: String,
    exe_name: String,
    external_path: Option<PathBuf>,
    verbose: bool,
    iupbhsv: i32,
    iupbfsv: i32,
    parent: M,
    children: Vec<M>,
    children_data: Vec<LgrChild>,
    next_ext_unit: u32,
}

impl<M: SolverModel> ModflowLgr<M> {
    pub fn new<I>(parent: M, children: I) -> Self
    where
        I: IntoIterator<Item = (M, LgrChild)>,
    {
        let (children, children_data) = children.into_iter().unzip();
        Self {
            modelname: DEFAULT_MODELNAME.to_string(),
            namefile_ext: DEFAULT_NAMEFILE_EXT.to_string(),
            model_ws: PathBuf::from("."),
            heading: String::new(),
            version: "mflgr".to_string(),
            exe_name: DEFAULT_EXE_NAME.to_string(),
            external_path: None,
            verbose: false,
            iupbhsv: 0,
            iupbfsv: 0,
            parent,
            children,
            children_data,
            next_ext_unit: FIRST_EXTERNAL_UNIT,
        }
    }

    pub fn with_modelname(mut self, modelname: impl Into<String>) -> Self {
        self.modelname = modelname.into();
        self
    }
    pub fn with_namefile_ext(mut self, namefile_ext: impl Into<String>) -> Self {
        self.namefile_ext = namefile_ext.into();
        self
    }
    pub fn with_model_ws(mut self, model_ws: impl Into<PathBuf>) -> Self {
        self.model_ws = model_ws.into();
        self
    }
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }
    pub fn with_exe_name(mut self, exe_name: impl Into<String>) -> Self {
        self.exe_name = exe_name.into();
        self
    }
    /// Directory for external array files, relative to the model workspace.
    /// It is created by [`ModflowLgr::write_input`].
    pub fn with_external_path(mut self, external_path: impl Into<PathBuf>) -> Self {
        self.external_path = Some(external_path.into());
        self
    }
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn add_child(&mut self, child: M, data: LgrChild) {
        self.children.push(child);
        self.children_data.push(data);
    }

    pub fn modelname(&self) -> &str {
        &self.modelname
    }
    pub fn namefile_ext(&self) -> &str {
        &self.namefile_ext
    }
    pub fn model_ws(&self) -> &Path {
        &self.model_ws
    }
    pub fn heading(&self) -> &str {
        &self.heading
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn exe_name(&self) -> &str {
        &self.exe_name
    }
    pub fn external_path(&self) -> Option<&Path> {
        self.external_path.as_deref()
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
    pub fn iupbhsv(&self) -> i32 {
        self.iupbhsv
    }
    pub fn iupbfsv(&self) -> i32 {
        self.iupbfsv
    }
    pub fn parent(&self) -> &M {
        &self.parent
    }
    pub fn parent_mut(&mut self) -> &mut M {
        &mut self.parent
    }
    pub fn children(&self) -> &[M] {
        &self.children
    }
    pub fn children_mut(&mut self) -> &mut [M] {
        &mut self.children
    }
    pub fn children_data(&self) -> &[LgrChild] {
        &self.children_data
    }

    /// Iterate over each child model with its coupling parameters.
    pub fn iter_children(&self) -> impl Iterator<Item = (&M, &LgrChild)> {
        self.children.iter().zip(self.children_data.iter())
    }

    /// Parent plus children.
    pub fn ngrids(&self) -> usize {
        1 + self.children.len()
    }

    pub fn namefile(&self) -> String {
        format!("{}.{}", self.modelname, self.namefile_ext)
    }

    pub fn namefile_path(&self) -> PathBuf {
        self.model_ws.join(self.namefile())
    }

    /// Unit number the next external array file would get.
    pub fn next_ext_unit(&self) -> u32 {
        self.next_ext_unit
    }

    pub fn allocate_ext_unit(&mut self) -> u32 {
        let unit = self.next_ext_unit;
        self.next_ext_unit += 1;
        unit
    }

    pub fn control_file(&self) -> std::io::Result<ControlFile<'_, M>> {
        ControlFile::new(self)
    }

    /// Write the LGR control file to `<model_ws>/<modelname>.<ext>`.
    pub fn write_name_file(&self) -> Result<PathBuf> {
        let contents = self.control_file()?.to_string();
        fs_err::create_dir_all(&self.model_ws)?;
        let path = self.namefile_path();
        let mut file = fs_err::File::create(&path)?;
        file.write_all(contents.as_bytes())?;
        info!("wrote LGR control file {}", path.display());
        Ok(path)
    }

    /// Write the control file, then the input of the parent and of every
    /// child in order.
    ///
    /// Failing to create the external path is not fatal: the path is
    /// dropped and the error returned.
    pub fn write_input(&mut self) -> Result<Option<WorkspaceError>> {
        let warning = self.ensure_external_path();
        self.write_name_file()?;
        let level = log_level(self.verbose);
        log!(level, "writing parent model {}", self.parent.namefile());
        self.parent
            .write_input()
            .map_err(|e| model_error(self.parent.namefile(), e))?;
        for child in &self.children {
            log!(level, "writing child model {}", child.namefile());
            child
                .write_input()
                .map_err(|e| model_error(child.namefile(), e))?;
        }
        Ok(warning)
    }

    fn ensure_external_path(&mut self) -> Option<WorkspaceError> {
        let full_path = self.model_ws.join(self.external_path.as_ref()?);
        match workspace::ensure_dir(&full_path) {
            Ok(true) => {
                log!(log_level(self.verbose), "created external_path {}", full_path.display());
                None
            }
            Ok(false) => {
                info!("external_path {} already exists", full_path.display());
                None
            }
            Err(source) => {
                let err = WorkspaceError {
                    path: full_path,
                    fallback: self.model_ws.clone(),
                    source,
                };
                warn!("{}", err);
                self.external_path = None;
                Some(err)
            }
        }
    }

    /// Move the simulation to `new_ws` (the current directory when `None`).
    ///
    /// Parent and children keep their location relative to the LGR
    /// workspace. When `new_ws` cannot be created the current directory is
    /// used instead and the error is returned.
    pub fn change_model_ws(&mut self, new_ws: Option<&Path>) -> Result<Option<WorkspaceError>> {
        let cwd = std::env::current_dir()?;
        let mut new_ws = new_ws.map_or_else(|| cwd.clone(), Path::to_path_buf);
        let mut warning = None;
        if !new_ws.exists() {
            info!("creating model workspace {}", new_ws.display());
            if let Err(source) = fs_err::create_dir_all(&new_ws) {
                let err = WorkspaceError {
                    path: new_ws,
                    fallback: cwd.clone(),
                    source,
                };
                warn!("{}", err);
                new_ws = cwd;
                warning = Some(err);
            }
        }

        let old_ws = workspace::absolute(&self.model_ws)?;
        info!("changing model workspace to {}", new_ws.display());
        self.model_ws = new_ws.clone();

        let level = log_level(self.verbose);
        let parent_ws = workspace::rebase(self.parent.model_ws(), &old_ws, &new_ws)?;
        log!(level, "moving parent model to {}", parent_ws.display());
        self.parent
            .change_model_ws(&parent_ws)
            .map_err(|e| model_error(self.parent.namefile(), e))?;
        for child in self.children.iter_mut() {
            let child_ws = workspace::rebase(child.model_ws(), &old_ws, &new_ws)?;
            log!(level, "moving child model {} to {}", child.namefile(), child_ws.display());
            child
                .change_model_ws(&child_ws)
                .map_err(|e| model_error(child.namefile(), e))?;
        }
        Ok(warning)
    }

    /// Load an LGR control file `f` located in `model_ws`, together with the
    /// parent and child models it references.
    pub fn load<P, Q>(f: P, model_ws: Q, options: &LoadOptions) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let f = f.as_ref();
        let model_ws = model_ws.as_ref();
        let file = fs_err::File::open(model_ws.join(f))?;
        let modelname = f
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_MODELNAME.to_string());
        let mut lgr = Self::load_from_reader(BufReader::new(file), &modelname, model_ws, options)?;
        if let Some(ext) = f.extension() {
            lgr.namefile_ext = ext.to_string_lossy().into_owned();
        }
        Ok(lgr)
    }

    /// Load an LGR control file from `reader`. Name-file entries are
    /// resolved against `model_ws`.
    pub fn load_from_reader<R: BufRead>(
        reader: R,
        modelname: &str,
        model_ws: &Path,
        options: &LoadOptions,
    ) -> Result<Self> {
        let level = log_level(options.verbose);
        let mut reader = ControlFileReader::new(reader);

        let heading = reader.read_heading()?;

        reader.next_record(1)?.expect_marker("LGR", &heading)?;

        let [ngrids] = reader.next_record(2)?.values::<usize, 1>("NGRIDS (1 integer)")?;
        let nchildren = ngrids.checked_sub(1).ok_or(LgrError::Parse {
            dataset: 2,
            expected: "NGRIDS >= 1".to_string(),
            line: ngrids.to_string(),
        })?;
        log!(level, "loading LGR model {} with {} grids", modelname, ngrids);

        let record = reader.next_record(3)?;
        let (parent_ws, parent_name) =
            workspace::split_namefile(model_ws, record.path("parent NAMEFILE")?);

        reader
            .next_record(4)?
            .expect_marker("PARENTONLY", &heading)?;

        let [iupbhsv, iupbfsv] = reader
            .next_record(5)?
            .values::<i32, 2>("IUPBHSV and IUPBFSV (2 integers)")?;
        if i64::from(iupbhsv) + i64::from(iupbfsv) > 0 {
            return Err(LgrError::UnsupportedConfiguration { iupbhsv, iupbfsv });
        }

        log!(level, "loading parent model {}", parent_name);
        let parent = M::load(&parent_name, &parent_ws, options)
            .map_err(|e| model_error(parent_name.clone(), e))?;

        let mut children = Vec::new();
        for index in 0..nchildren {
            let record = reader.next_record(6)?;
            let (child_ws, child_name) =
                workspace::split_namefile(model_ws, record.path("child NAMEFILE")?);

            reader
                .next_record(7)?
                .expect_marker("CHILDONLY", &heading)?;

            let [ishflg, ibflg, iucbhsv, iucbfsv] = reader
                .next_record(8)?
                .values::<i32, 4>("ISHFLG IBFLG IUCBHSV IUCBFSV (4 integers)")?;
            let record = reader.next_record(9)?;
            let expected_iter = "MXLGRITER IOUTLGR (2 integers, MXLGRITER >= 0)";
            let [mxlgriter, ioutlgr] = record.values::<i32, 2>(expected_iter)?;
            let mxlgriter =
                u32::try_from(mxlgriter).map_err(|_| record.parse_error(expected_iter))?;
            let [relaxh, relaxf] = reader
                .next_record(10)?
                .values::<f64, 2>("RELAXH RELAXF (2 reals)")?;
            let [hcloselgr, fcloselgr] = reader
                .next_record(11)?
                .values::<f64, 2>("HCLOSELGR FCLOSELGR (2 reals)")?;
            let [nplbeg, nprbeg, npcbeg] = reader
                .next_record(12)?
                .zero_based_triple("NPLBEG NPRBEG NPCBEG (3 one-based integers)")?;
            let record = reader.next_record(13)?;
            let expected_end = "NPLEND NPREND NPCEND (3 one-based integers, NPLEND >= NPLBEG)";
            let [nplend, nprend, npcend] = record.zero_based_triple(expected_end)?;
            if nplend < nplbeg {
                return Err(record.parse_error(expected_end));
            }
            let [ncpp] = reader.next_record(14)?.values::<u32, 1>("NCPP (1 integer)")?;
            let nlayers = nplend - nplbeg + 1;
            let ncppl = reader
                .next_record(15)?
                .value_list::<u32>(nlayers, &format!("NCPPL ({} integers)", nlayers))?;

            let data = LgrChildBuilder::default()
                .ishflg(ishflg)
                .ibflg(ibflg)
                .iucbhsv(iucbhsv)
                .iucbfsv(iucbfsv)
                .mxlgriter(mxlgriter)
                .ioutlgr(ioutlgr)
                .relaxh(relaxh)
                .relaxf(relaxf)
                .hcloselgr(hcloselgr)
                .fcloselgr(fcloselgr)
                .nplbeg(nplbeg)
                .nprbeg(nprbeg)
                .npcbeg(npcbeg)
                .nplend(nplend)
                .nprend(nprend)
                .npcend(npcend)
                .ncpp(ncpp)
                .ncppl(ncppl)
                .build()
                .map_err(|source| LgrError::Child { index, source })?;

            log!(level, "loading child model {}", child_name);
            let child = M::load(&child_name, &child_ws, options)
                .map_err(|e| model_error(child_name.clone(), e))?;
            children.push((child, data));
        }

        let mut lgr = Self::new(parent, children)
            .with_modelname(modelname)
            .with_model_ws(model_ws)
            .with_heading(heading)
            .with_verbose(options.verbose);
        lgr.iupbhsv = iupbhsv;
        lgr.iupbfsv = iupbfsv;
        Ok(lgr)
    }
}

impl<M: SolverModel> fmt::Display for ModflowLgr<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MODFLOW-LGR model with {} grids", self.ngrids())
    }
}
