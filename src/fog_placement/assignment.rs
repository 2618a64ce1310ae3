use tracing::error;

use super::error::PlacementError;
use super::fog_set::FogSet;
use super::network::NetworkModel;

type Result<T> = std::result::Result<T,PlacementError>;

pub trait AssignmentRule {
    fn name(&self) -> &'static str;
    // lowest index wins ties, None only for an empty fog set
    fn serving_fog(&self,network:&NetworkModel<'_>,node:usize,fogs:&FogSet) -> Option<usize>;
}

#[derive(Clone,Copy,Debug,Default)]
pub struct NearestLatency;

#[derive(Clone,Copy,Debug,Default)]
pub struct GreatestCapacity;

impl AssignmentRule for NearestLatency {
    fn name(&self) -> &'static str {
        "nearest-latency"
    }
    fn serving_fog(&self,network:&NetworkModel<'_>,node:usize,fogs:&FogSet) -> Option<usize> {
        // strict comparison keeps the first minimizer in index order
        fogs.iter().fold(None, |best:Option<(usize,f64)>,fog| {
            let latency = network.latency(node, fog);
            match best {
                Some((_,best_latency)) if best_latency <= latency => best,
                _ => Some((fog,latency))
            }
        }).map(|(fog,_)| fog)
    }
}

impl AssignmentRule for GreatestCapacity {
    fn name(&self) -> &'static str {
        "greatest-capacity"
    }
    fn serving_fog(&self,network:&NetworkModel<'_>,node:usize,fogs:&FogSet) -> Option<usize> {
        fogs.iter().fold(None, |best:Option<(usize,f64)>,fog| {
            let capacity = network.capacity(node, fog);
            match best {
                Some((_,best_capacity)) if best_capacity >= capacity => best,
                _ => Some((fog,capacity))
            }
        }).map(|(fog,_)| fog)
    }
}

// servers[i] = j is the single 1 in row i of y
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Assignment {
    servers:Vec<usize>,
}

impl Assignment {
    pub fn build<A:AssignmentRule + ?Sized>(rule:&A,network:&NetworkModel<'_>,fogs:&FogSet) -> Result<Self> {
        let mut servers = Vec::with_capacity(network.len());
        for node in network.nodes() {
            let Some(fog) = rule.serving_fog(network, node, fogs) else {
                error!(node, rule = rule.name(), "assignment lookup found an empty fog set");
                return Err(PlacementError::EmptyFogSet { node })
            };
            servers.push(fog);
        }
        Ok(Self {servers})
    }
    pub fn len(&self) -> usize {
        self.servers.len()
    }
    pub fn server_of(&self,node:usize) -> Option<usize> {
        self.servers.get(node).copied()
    }
    pub fn servers(&self) -> &[usize] {
        &self.servers
    }
    pub fn edges(&self) -> impl Iterator<Item = (usize,usize)> + '_ {
        self.servers.iter().copied().enumerate()
    }
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        let n = self.servers.len();
        self.servers.iter().map(|server| {
            let mut row = vec![false;n];
            row[*server] = true;
            row
        }).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use crate::linear_algebra::matrix::Matrix;

    use super::*;

    #[test]
    fn test_nearest_latency_ties_take_lowest_index() {
        let latency = Matrix::from_rows(&[
            [0.1,0.5,0.5,0.2],
            [0.5,0.1,0.5,0.5],
            [0.3,0.3,0.1,0.3],
            [0.2,0.9,0.4,0.1],
        ]).unwrap();
        let capacity = Matrix::filled(4, 4, 10.0);
        let network = NetworkModel::new(&latency, &capacity, 3).unwrap();
        let mut fogs = FogSet::anchored(4, 3);
        fogs.promote(1);
        fogs.promote(2);
        let assignment = Assignment::build(&NearestLatency, &network, &fogs).unwrap();
        // node 2 sees 0.3 to fogs 1 and 3, keeps its own 0.1
        assert_eq!(assignment.servers(),&[3,1,2,3]);
        fogs.promote(0);
        let assignment = Assignment::build(&NearestLatency, &network, &fogs).unwrap();
        assert_eq!(assignment.servers(),&[0,1,2,3]);
    }
    #[test]
    fn test_greatest_capacity_ties_take_lowest_index() {
        let latency = Matrix::filled(3, 3, 0.1);
        let capacity = Matrix::from_rows(&[
            [100.0,5.0,5.0],
            [7.0,100.0,7.0],
            [3.0,9.0,100.0],
        ]).unwrap();
        let network = NetworkModel::new(&latency, &capacity, 2).unwrap();
        let mut fogs = FogSet::anchored(3, 2);
        let assignment = Assignment::build(&GreatestCapacity, &network, &fogs).unwrap();
        assert_eq!(assignment.servers(),&[2,2,2]);
        fogs.promote(1);
        let assignment = Assignment::build(&GreatestCapacity, &network, &fogs).unwrap();
        // node 0 sees 5.0 to both fogs
        assert_eq!(assignment.servers(),&[1,1,2]);
    }
    #[test]
    fn test_one_server_per_row() {
        let mut rng = rand::rng();
        let n:usize = rng.random_range(2..40);
        let latency = Matrix::rand(n, n, 0.0, 1.0, &mut rng);
        let capacity = Matrix::rand(n, n, 0.0, 50.0, &mut rng);
        let cloud = rng.random_range(0..n);
        let network = NetworkModel::new(&latency, &capacity, cloud).unwrap();
        let mut fogs = FogSet::anchored(n, cloud);
        for _ in 0..n/3 {
            fogs.promote(rng.random_range(0..n));
        }
        for assignment in [
            Assignment::build(&NearestLatency, &network, &fogs).unwrap(),
            Assignment::build(&GreatestCapacity, &network, &fogs).unwrap(),
        ] {
            for (node,row) in assignment.to_matrix().iter().enumerate() {
                assert_eq!(row.iter().filter(|b| **b).count(),1,"row {node}");
                assert!(fogs.contains(assignment.server_of(node).unwrap()));
            }
        }
    }
}
