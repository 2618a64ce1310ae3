use thiserror::Error;

use crate::linear_algebra::matrix::MatrixError;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum PlacementError {
    #[error("network has no nodes")]
    EmptyNetwork,
    #[error("{matrix} matrix is {row}x{col}, expected a square matrix")]
    NonSquare{matrix:&'static str,row:usize,col:usize},
    #[error("latency matrix is {latency:?} but capacity matrix is {capacity:?}")]
    DimensionMismatch{latency:(usize,usize),capacity:(usize,usize)},
    #[error("cloud index {cloud} is out of range for a {nodes} node network")]
    CloudOutOfRange{cloud:usize,nodes:usize},
    #[error("{matrix}[{row}][{col}] = {value} is not a finite non-negative number")]
    InvalidEntry{matrix:&'static str,row:usize,col:usize,value:f64},
    #[error("threshold {name} = {value} must be a finite non-negative number")]
    NegativeThreshold{name:&'static str,value:f64},
    #[error("alpha = {0} must lie in [0,1]")]
    AlphaOutOfRange(f64),
    #[error("heuristic {0} ranks candidates by degree and needs a topology")]
    MissingTopology(&'static str),
    #[error("topology node {node} does not exist in a {nodes} node network")]
    TopologyNodeOutOfRange{node:usize,nodes:usize},
    #[error("no fog available to serve node {node}, the cloud anchor was never placed")]
    EmptyFogSet{node:usize},
    #[error("MIP solver failed: {0}")]
    Solver(String),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl PlacementError {
    // true for the fail-fast family raised before any iteration
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::EmptyFogSet { .. } | Self::Solver(_))
    }
}
