use std::fmt::Display;

use super::assignment::Assignment;
use super::fog_set::FogSet;
use super::network::NetworkModel;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum FogSlot {
    Idle,
    Fog,
    Cloud,
}

impl FogSlot {
    pub fn is_fog(&self) -> bool {
        !matches!(self, FogSlot::Idle)
    }
    pub fn as_u8(&self) -> u8 {
        match self {
            FogSlot::Idle => 0,
            FogSlot::Fog => 1,
            FogSlot::Cloud => 2,
        }
    }
}

#[derive(Clone,Debug,PartialEq)]
pub struct SolveResult {
    // objective - 1 on the exact path, may be fractional or negative there
    pub fog_count:f64,
    pub membership:Vec<FogSlot>,
    pub mean_latency:f64,
}

impl SolveResult {
    pub fn membership_codes(&self) -> Vec<u8> {
        self.membership.iter().map(FogSlot::as_u8).collect()
    }
    // cloud included
    pub fn fog_members(&self) -> usize {
        self.membership.iter().filter(|slot| slot.is_fog()).count()
    }
    pub fn fogs(&self) -> impl Iterator<Item = usize> + '_ {
        self.membership.iter().enumerate().filter(|(_,slot)| slot.is_fog()).map(|(i,_)| i)
    }
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"fogs={} mean_latency={} membership={:?}",self.fog_count,self.mean_latency,self.membership_codes())
    }
}

pub(crate) fn membership(fogs:impl Fn(usize) -> bool,len:usize,cloud:usize) -> Vec<FogSlot> {
    (0..len).map(|node| {
        if node == cloud {
            FogSlot::Cloud
        } else if fogs(node) {
            FogSlot::Fog
        } else {
            FogSlot::Idle
        }
    }).collect()
}

// heuristics divide by N
pub fn mean_latency_per_node(network:&NetworkModel<'_>,assignment:&Assignment) -> f64 {
    let total:f64 = assignment.edges().map(|(node,fog)| network.latency(node, fog)).sum();
    total/network.len() as f64
}

// exact path divides by the served cell count
pub fn mean_latency_per_served_edge<I:IntoIterator<Item = (usize,usize)>>(network:&NetworkModel<'_>,served:I) -> Option<f64> {
    let (total,count) = served.into_iter()
        .fold((0.0,0usize), |(total,count),(node,fog)| (total + network.latency(node, fog),count + 1));
    (count > 0).then(|| total/count as f64)
}

pub fn summarize_assignment(network:&NetworkModel<'_>,fogs:&FogSet,assignment:&Assignment) -> SolveResult {
    let mut fogs = fogs.clone();
    fogs.pin_cloud();
    SolveResult {
        fog_count:fogs.count().saturating_sub(1) as f64,
        membership:membership(|node| fogs.contains(node), network.len(), network.cloud()),
        mean_latency:mean_latency_per_node(network, assignment),
    }
}
