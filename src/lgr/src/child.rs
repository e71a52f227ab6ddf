// mflgrrs-lgr/src/child.rs

use derive_builder::Builder;
use serde::Serialize;

/// Number of child layers in each refined parent layer.
///
/// Accepts a single value or a sequence; a single value is stored as a one
/// element sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ncppl(Vec<u32>);

impl Ncppl {
    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl From<u32> for Ncppl {
    fn from(value: u32) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<u32>> for Ncppl {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}

impl From<&[u32]> for Ncppl {
    fn from(values: &[u32]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Ncppl {
    fn from(values: [u32; N]) -> Self {
        Self(values.to_vec())
    }
}

/// Coupling parameters between the parent grid and one child grid
/// (datasets 8 to 15 of the control file).
///
/// Layer, row and column indices are zero-based here; the control file
/// stores them one-based.
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct LgrChild {
    ishflg: i32,
    ibflg: i32,
    iucbhsv: i32,
    iucbfsv: i32,
    mxlgriter: u32,
    ioutlgr: i32,
    relaxh: f64,
    relaxf: f64,
    hcloselgr: f64,
    fcloselgr: f64,
    nplbeg: usize,
    nprbeg: usize,
    npcbeg: usize,
    nplend: usize,
    nprend: usize,
    npcend: usize,
    ncpp: u32,
    #[builder(setter(custom))]
    ncppl: Vec<u32>,
}

impl Default for LgrChild {
    fn default() -> Self {
        Self {
            ishflg: 1,
            ibflg: 59,
            iucbhsv: 0,
            iucbfsv: 0,
            mxlgriter: 20,
            ioutlgr: 1,
            relaxh: 0.4,
            relaxf: 0.4,
            hcloselgr: 5e-3,
            fcloselgr: 5e-2,
            nplbeg: 0,
            nprbeg: 0,
            npcbeg: 0,
            nplend: 0,
            nprend: 1,
            npcend: 1,
            ncpp: 2,
            ncppl: vec![1],
        }
    }
}

impl LgrChildBuilder {
    pub fn ncppl<V: Into<Ncppl>>(&mut self, ncppl: V) -> &mut Self {
        self.ncppl = Some(ncppl.into().into_inner());
        self
    }

    fn validate(&self) -> Result<(), String> {
        let defaults = LgrChild::default();
        let nplbeg = self.nplbeg.unwrap_or(defaults.nplbeg);
        let nplend = self.nplend.unwrap_or(defaults.nplend);
        if nplend < nplbeg {
            return Err(format!(
                "nplend ({}) must not be smaller than nplbeg ({})",
                nplend, nplbeg
            ));
        }
        let expected = nplend - nplbeg + 1;
        let actual = self.ncppl.as_ref().map_or(defaults.ncppl.len(), Vec::len);
        if actual != expected {
            return Err(format!(
                "ncppl has {} values but parent layers {} to {} require {}",
                actual, nplbeg, nplend, expected
            ));
        }
        Ok(())
    }
}

impl LgrChild {
    pub fn builder() -> LgrChildBuilder {
        LgrChildBuilder::default()
    }
    pub fn ishflg(&self) -> i32 {
        self.ishflg
    }
    pub fn ibflg(&self) -> i32 {
        self.ibflg
    }
    pub fn iucbhsv(&self) -> i32 {
        self.iucbhsv
    }
    pub fn iucbfsv(&self) -> i32 {
        self.iucbfsv
    }
    pub fn mxlgriter(&self) -> u32 {
        self.mxlgriter
    }
    pub fn ioutlgr(&self) -> i32 {
        self.ioutlgr
    }
    pub fn relaxh(&self) -> f64 {
        self.relaxh
    }
    pub fn relaxf(&self) -> f64 {
        self.relaxf
    }
    pub fn hcloselgr(&self) -> f64 {
        self.hcloselgr
    }
    pub fn fcloselgr(&self) -> f64 {
        self.fcloselgr
    }
    pub fn nplbeg(&self) -> usize {
        self.nplbeg
    }
    pub fn nprbeg(&self) -> usize {
        self.nprbeg
    }
    pub fn npcbeg(&self) -> usize {
        self.npcbeg
    }
    pub fn nplend(&self) -> usize {
        self.nplend
    }
    pub fn nprend(&self) -> usize {
        self.nprend
    }
    pub fn npcend(&self) -> usize {
        self.npcend
    }
    pub fn ncpp(&self) -> u32 {
        self.ncpp
    }
    pub fn ncppl(&self) -> &[u32] {
        &self.ncppl
    }

    /// Zero-based (layer, row, column) of the first parent cell covered by the child.
    pub fn begin(&self) -> [usize; 3] {
        [self.nplbeg, self.nprbeg, self.npcbeg]
    }

    /// Zero-based (layer, row, column) of the last parent cell covered by the child.
    pub fn end(&self) -> [usize; 3] {
        [self.nplend, self.nprend, self.npcend]
    }

    /// Begin indices as written in dataset 12.
    pub fn begin_one_based(&self) -> [usize; 3] {
        self.begin().map(|idx| idx + 1)
    }

    /// End indices as written in dataset 13.
    pub fn end_one_based(&self) -> [usize; 3] {
        self.end().map(|idx| idx + 1)
    }

    /// Number of parent layers refined by the child.
    pub fn nlayers(&self) -> usize {
        self.nplend - self.nplbeg + 1
    }
}
