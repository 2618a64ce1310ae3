use tracing::{debug, error, info, warn};

use crate::dsa::bitset::BitSet;
use crate::dsa::graph::UnDirectedGraph;

use super::assignment::{Assignment, AssignmentRule, GreatestCapacity, NearestLatency};
use super::error::PlacementError;
use super::fog_set::FogSet;
use super::network::NetworkModel;
use super::ranking::{CandidateRanking, ConnectivityRanking, EccentricityRanking};
use super::sla::{ScaledSla, Sla};
use super::summary::{SolveResult, summarize_assignment};

type Result<T> = std::result::Result<T,PlacementError>;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Termination {
    AllSatisfied,
    // best effort, some nodes stay outside the SLA
    PoolExhausted,
}

#[derive(Clone,Debug,PartialEq)]
pub struct PlacementReport {
    pub result:SolveResult,
    pub fogs:FogSet,
    pub assignment:Assignment,
    pub satisfaction:BitSet,
    // promotion order, cloud excluded
    pub promotions:Vec<usize>,
    pub termination:Termination,
}

impl PlacementReport {
    pub fn is_feasible(&self) -> bool {
        self.satisfaction.all()
    }
    pub fn unsatisfied(&self) -> impl Iterator<Item = usize> + '_ {
        self.satisfaction.iter().enumerate().filter_map(|(node,ok)| (!ok).then_some(node))
    }
}

// fogs are judged on their link to the cloud, other nodes on the link to their server
pub fn satisfaction(network:&NetworkModel<'_>,sla:&ScaledSla,fogs:&FogSet,assignment:&Assignment) -> Result<BitSet> {
    network.nodes().map(|node| {
        if fogs.contains(node) {
            return Ok(sla.cloud().admits(network.latency_to_cloud(node), network.capacity_to_cloud(node)))
        }
        let Some(fog) = assignment.server_of(node) else {
            error!(node, "satisfaction check found a node without a serving fog");
            return Err(PlacementError::EmptyFogSet { node })
        };
        Ok(sla.edge().admits(network.latency(node, fog), network.capacity(node, fog)))
    }).collect()
}

// R picks who gets promoted, A who serves whom
#[derive(Clone,Copy,Debug)]
pub struct GreedyPlacement<R,A> {
    ranking:R,
    rule:A,
}

impl<R:CandidateRanking,A:AssignmentRule> GreedyPlacement<R,A> {
    pub fn new(ranking:R,rule:A) -> Self {
        Self {ranking,rule}
    }
    pub fn name(&self) -> String {
        format!("{}/{}",self.ranking.name(),self.rule.name())
    }
    pub fn place(&self,network:&NetworkModel<'_>,sla:&Sla) -> Result<SolveResult> {
        Ok(self.place_with_report(network, sla)?.result)
    }
    pub fn place_with_report(&self,network:&NetworkModel<'_>,sla:&Sla) -> Result<PlacementReport> {
        let sla = sla.scaled()?;
        let mut fogs = FogSet::anchored(network.len(), network.cloud());
        let mut assignment = Assignment::build(&self.rule, network, &fogs)?;
        let mut pool = self.ranking.initial_pool(network, &sla);
        let mut promotions = Vec::with_capacity(pool.len());
        debug!(heuristic = %self.name(), nodes = network.len(), cloud = network.cloud(), candidates = pool.len(), "starting greedy placement");

        let (satisfied,termination) = loop {
            let satisfied = satisfaction(network, &sla, &fogs, &assignment)?;
            if satisfied.all() {
                break (satisfied,Termination::AllSatisfied);
            }
            // the pool only shrinks, so this exit is always reached eventually
            let Some(node) = self.ranking.select(network, &pool) else {
                warn!(heuristic = %self.name(), unsatisfied = satisfied.len() - satisfied.count_ones(), "candidate pool exhausted before every node met the SLA");
                break (satisfied,Termination::PoolExhausted);
            };
            let score = pool.remove(node);
            fogs.promote(node);
            promotions.push(node);
            debug!(node, ?score, remaining = pool.len(), "promoted fog");
            self.ranking.after_promotion(network, &mut pool, &fogs);
            assignment = Assignment::build(&self.rule, network, &fogs)?;
        };

        fogs.pin_cloud();
        let result = summarize_assignment(network, &fogs, &assignment);
        info!(heuristic = %self.name(), ?termination, fog_count = result.fog_count, mean_latency = result.mean_latency, "greedy placement finished");
        Ok(PlacementReport {
            result,
            fogs,
            assignment,
            satisfaction:satisfied,
            promotions,
            termination,
        })
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum Heuristic {
    ConnectivityLatency,
    ConnectivityCapacity,
    EccentricityLatency,
    EccentricityCapacity,
}

impl Heuristic {
    pub const ALL:[Heuristic;4] = [
        Heuristic::EccentricityLatency,
        Heuristic::EccentricityCapacity,
        Heuristic::ConnectivityLatency,
        Heuristic::ConnectivityCapacity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Heuristic::ConnectivityLatency => "connectivity-latency",
            Heuristic::ConnectivityCapacity => "connectivity-capacity",
            Heuristic::EccentricityLatency => "eccentricity-latency",
            Heuristic::EccentricityCapacity => "eccentricity-capacity",
        }
    }
    pub fn needs_topology(&self) -> bool {
        matches!(self, Heuristic::ConnectivityLatency | Heuristic::ConnectivityCapacity)
    }
    pub fn place(&self,network:&NetworkModel<'_>,sla:&Sla,topology:Option<&UnDirectedGraph>) -> Result<SolveResult> {
        Ok(self.place_with_report(network, sla, topology)?.result)
    }
    // topology is only read by the connectivity variants
    pub fn place_with_report(&self,network:&NetworkModel<'_>,sla:&Sla,topology:Option<&UnDirectedGraph>) -> Result<PlacementReport> {
        match self {
            Heuristic::EccentricityLatency => {
                GreedyPlacement::new(EccentricityRanking::latency(), NearestLatency).place_with_report(network, sla)
            },
            Heuristic::EccentricityCapacity => {
                GreedyPlacement::new(EccentricityRanking::capacity(), GreatestCapacity).place_with_report(network, sla)
            },
            Heuristic::ConnectivityLatency => {
                let ranking = self.connectivity(network, topology)?;
                GreedyPlacement::new(ranking, NearestLatency).place_with_report(network, sla)
            },
            Heuristic::ConnectivityCapacity => {
                let ranking = self.connectivity(network, topology)?;
                GreedyPlacement::new(ranking, GreatestCapacity).place_with_report(network, sla)
            },
        }
    }
    fn connectivity<'g>(&self,network:&NetworkModel<'_>,topology:Option<&'g UnDirectedGraph>) -> Result<ConnectivityRanking<'g>> {
        let topology = topology.ok_or(PlacementError::MissingTopology(self.label()))?;
        network.check_topology(topology)?;
        Ok(ConnectivityRanking::new(topology))
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.label())
    }
}
