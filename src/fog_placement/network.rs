use rand::Rng;

use crate::dsa::graph::UnDirectedGraph;
use crate::linear_algebra::matrix::Matrix;

use super::error::PlacementError;

type Result<T> = std::result::Result<T,PlacementError>;

// diagonal cells, local processing delay and unconstrained local bandwidth
pub const SELF_LATENCY:f64 = 5.0*0.025;
pub const SELF_CAPACITY:f64 = 1_000_000.0;

// borrowed matrices are never written during a solve
#[derive(Clone,Copy,Debug)]
pub struct NetworkModel<'a> {
    latency:&'a Matrix,
    capacity:&'a Matrix,
    cloud:usize,
}

impl<'a> NetworkModel<'a> {
    pub fn new(latency:&'a Matrix,capacity:&'a Matrix,cloud:usize) -> Result<Self> {
        check_cells("latency", latency)?;
        check_cells("capacity", capacity)?;
        if latency.dimension() != capacity.dimension() {
            return Err(PlacementError::DimensionMismatch {
                latency: latency.dimension(),
                capacity: capacity.dimension()
            })
        }
        let (nodes,_) = latency.dimension();
        if nodes == 0 {
            return Err(PlacementError::EmptyNetwork)
        }
        if cloud >= nodes {
            return Err(PlacementError::CloudOutOfRange { cloud, nodes })
        }
        Ok(Self {latency,capacity,cloud})
    }
    pub fn len(&self) -> usize {
        self.latency.dimension().0
    }
    pub fn cloud(&self) -> usize {
        self.cloud
    }
    pub fn latency_matrix(&self) -> &'a Matrix {
        self.latency
    }
    pub fn capacity_matrix(&self) -> &'a Matrix {
        self.capacity
    }
    pub fn latency(&self,from:usize,to:usize) -> f64 {
        self.latency.at(from, to)
    }
    pub fn capacity(&self,from:usize,to:usize) -> f64 {
        self.capacity.at(from, to)
    }
    pub fn latency_to_cloud(&self,node:usize) -> f64 {
        self.latency(node, self.cloud)
    }
    pub fn capacity_to_cloud(&self,node:usize) -> f64 {
        self.capacity(node, self.cloud)
    }
    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.len()
    }
    pub fn check_topology(&self,topology:&UnDirectedGraph) -> Result<()> {
        match topology.max_node() {
            Some(node) if node >= self.len() => {
                Err(PlacementError::TopologyNodeOutOfRange { node, nodes: self.len() })
            },
            _ => Ok(())
        }
    }

    pub fn apply_self_cells(latency:&mut Matrix,capacity:&mut Matrix) -> Result<()> {
        latency.fill_diagonal(SELF_LATENCY)?;
        capacity.fill_diagonal(SELF_CAPACITY)?;
        Ok(())
    }

    // solvers never draw the cloud themselves
    pub fn draw_cloud<R:Rng>(n:usize,rng:&mut R) -> Result<usize> {
        if n == 0 {
            return Err(PlacementError::EmptyNetwork)
        }
        Ok(rng.random_range(0..n))
    }
}

fn check_cells(name:&'static str,matrix:&Matrix) -> Result<()> {
    let (row,col) = matrix.dimension();
    if row != col {
        return Err(PlacementError::NonSquare { matrix: name, row, col })
    }
    for (row,values) in matrix.rows().enumerate() {
        if let Some((col,value)) = values.iter().copied().enumerate().find(|(_,v)| !v.is_finite() || *v < 0.0) {
            return Err(PlacementError::InvalidEntry { matrix: name, row, col, value })
        }
    }
    Ok(())
}
