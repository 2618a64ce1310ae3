use crate::dsa::graph::UnDirectedGraph;

use super::fog_set::FogSet;
use super::network::NetworkModel;
use super::sla::ScaledSla;

// sorted by node, so every selection breaks ties towards the lowest index
#[derive(Clone,Debug,Default,PartialEq)]
pub struct CandidatePool {
    entries:Vec<(usize,f64)>,
}

impl CandidatePool {
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn contains(&self,node:usize) -> bool {
        self.position(node).is_some()
    }
    pub fn score(&self,node:usize) -> Option<f64> {
        self.position(node).map(|i| self.entries[i].1)
    }
    pub fn iter(&self) -> impl Iterator<Item = (usize,f64)> + '_ {
        self.entries.iter().copied()
    }
    pub fn remove(&mut self,node:usize) -> Option<f64> {
        self.position(node).map(|i| self.entries.remove(i).1)
    }
    // first entry whose key is strictly better than every earlier one
    fn best_by<F:Fn(&(usize,f64),&(usize,f64)) -> bool>(&self,better:F) -> Option<usize> {
        let mut best:Option<&(usize,f64)> = None;
        for entry in &self.entries {
            match best {
                Some(current) if !better(entry,current) => {},
                _ => best = Some(entry)
            }
        }
        best.map(|(node,_)| *node)
    }
    fn position(&self,node:usize) -> Option<usize> {
        self.entries.binary_search_by_key(&node, |(n,_)| *n).ok()
    }
    fn rescore<F:Fn(usize) -> f64>(&mut self,score:F) {
        for (node,key) in self.entries.iter_mut() {
            *key = score(*node);
        }
    }
}

impl FromIterator<(usize,f64)> for CandidatePool {
    fn from_iter<T: IntoIterator<Item = (usize,f64)>>(iter: T) -> Self {
        let mut entries:Vec<(usize,f64)> = iter.into_iter().collect();
        entries.sort_by_key(|(node,_)| *node);
        entries.dedup_by_key(|(node,_)| *node);
        Self {entries}
    }
}

pub trait CandidateRanking {
    fn name(&self) -> &'static str;
    fn initial_pool(&self,network:&NetworkModel<'_>,sla:&ScaledSla) -> CandidatePool;
    fn select(&self,network:&NetworkModel<'_>,pool:&CandidatePool) -> Option<usize>;
    fn after_promotion(&self,_network:&NetworkModel<'_>,_pool:&mut CandidatePool,_fogs:&FogSet) {}
}

// equal degrees go to the node farther from the cloud
#[derive(Clone,Copy,Debug)]
pub struct ConnectivityRanking<'g> {
    topology:&'g UnDirectedGraph,
}

impl<'g> ConnectivityRanking<'g> {
    pub fn new(topology:&'g UnDirectedGraph) -> Self {
        Self {topology}
    }
}

impl CandidateRanking for ConnectivityRanking<'_> {
    fn name(&self) -> &'static str {
        "connectivity"
    }
    fn initial_pool(&self,network:&NetworkModel<'_>,_sla:&ScaledSla) -> CandidatePool {
        network.nodes()
            .filter(|node| *node != network.cloud())
            // nodes missing from the graph have no links
            .map(|node| (node,self.topology.degree(node).unwrap_or(0) as f64))
            .collect()
    }
    fn select(&self,network:&NetworkModel<'_>,pool:&CandidatePool) -> Option<usize> {
        pool.best_by(|(node,degree),(best,best_degree)| {
            degree > best_degree
                || (degree == best_degree && network.latency_to_cloud(*node) > network.latency_to_cloud(*best))
        })
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum LinkMetric {
    Latency,
    Capacity,
}

impl LinkMetric {
    fn value(&self,network:&NetworkModel<'_>,from:usize,to:usize) -> f64 {
        match self {
            LinkMetric::Latency => network.latency(from, to),
            LinkMetric::Capacity => network.capacity(from, to),
        }
    }
}

// latency promotes the largest sum over current fogs, capacity the smallest
#[derive(Clone,Copy,Debug)]
pub struct EccentricityRanking {
    metric:LinkMetric,
}

impl EccentricityRanking {
    pub fn latency() -> Self {
        Self {metric:LinkMetric::Latency}
    }
    pub fn capacity() -> Self {
        Self {metric:LinkMetric::Capacity}
    }
    pub fn metric(&self) -> LinkMetric {
        self.metric
    }
    fn eligible(&self,network:&NetworkModel<'_>,sla:&ScaledSla,node:usize) -> bool {
        match self.metric {
            LinkMetric::Latency => network.latency_to_cloud(node) < sla.cloud().max_latency,
            LinkMetric::Capacity => network.capacity_to_cloud(node) > sla.cloud().min_capacity,
        }
    }
}

impl CandidateRanking for EccentricityRanking {
    fn name(&self) -> &'static str {
        match self.metric {
            LinkMetric::Latency => "eccentricity-latency",
            LinkMetric::Capacity => "eccentricity-capacity",
        }
    }
    fn initial_pool(&self,network:&NetworkModel<'_>,sla:&ScaledSla) -> CandidatePool {
        network.nodes()
            .filter(|node| *node != network.cloud() && self.eligible(network, sla, *node))
            .map(|node| (node,self.metric.value(network, node, network.cloud())))
            .collect()
    }
    fn select(&self,_network:&NetworkModel<'_>,pool:&CandidatePool) -> Option<usize> {
        match self.metric {
            LinkMetric::Latency => pool.best_by(|(_,score),(_,best)| score > best),
            LinkMetric::Capacity => pool.best_by(|(_,score),(_,best)| score < best),
        }
    }
    fn after_promotion(&self,network:&NetworkModel<'_>,pool:&mut CandidatePool,fogs:&FogSet) {
        let metric = self.metric;
        pool.rescore(|node| fogs.iter().map(|fog| metric.value(network, node, fog)).sum());
    }
}
