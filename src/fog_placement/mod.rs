// fog node placement over a static network snapshot
// greedy heuristics grow a fog set from the cloud until every node meets the SLA,
// the exact baseline solves the same structure as a binary program

pub mod assignment;
pub mod error;
pub mod exact;
pub mod fog_set;
pub mod heuristic;
pub mod network;
pub mod ranking;
pub mod sla;
pub mod summary;

pub use assignment::{Assignment, AssignmentRule, GreatestCapacity, NearestLatency};
pub use error::PlacementError;
pub use exact::{ExactBaseline, ExactReport};
pub use fog_set::FogSet;
pub use heuristic::{GreedyPlacement, Heuristic, PlacementReport, Termination};
pub use network::NetworkModel;
pub use ranking::{CandidatePool, CandidateRanking, ConnectivityRanking, EccentricityRanking, LinkMetric};
pub use sla::{ApplicationProfile, ScaledSla, ServiceLevel, Sla};
pub use summary::{FogSlot, SolveResult};

use crate::dsa::graph::UnDirectedGraph;
use crate::linear_algebra::matrix::Matrix;

pub fn place(heuristic:Heuristic,latency:&Matrix,capacity:&Matrix,sla:&Sla,cloud:usize,topology:Option<&UnDirectedGraph>) -> Result<SolveResult,PlacementError> {
    let network = NetworkModel::new(latency, capacity, cloud)?;
    heuristic.place(&network, sla, topology)
}

pub fn solve_optimal(latency:&Matrix,capacity:&Matrix,sla:&Sla,cloud:usize,alpha:f64) -> Result<SolveResult,PlacementError> {
    let network = NetworkModel::new(latency, capacity, cloud)?;
    ExactBaseline::new(alpha)?.solve(&network, sla)
}
