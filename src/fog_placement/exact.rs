use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, constraint,
    default_solver, variable,
};
use tracing::{debug, info, warn};

use super::error::PlacementError;
use super::network::NetworkModel;
use super::sla::Sla;
use super::summary::{SolveResult, mean_latency_per_served_edge, membership};

type Result<T> = std::result::Result<T,PlacementError>;

// x[i]: node i hosts a fog, y[i][j]: node i is served by node j
// minimise sum x*(1-alpha)/N + sum y*alpha*latency/(maxLatency*N)
// service edges are bound by capacity only, L_max is not a constraint
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct ExactBaseline {
    alpha:f64,
}

#[derive(Clone,Debug,PartialEq)]
pub struct ExactReport {
    pub result:SolveResult,
    // None when infeasible
    pub objective:Option<f64>,
    pub served:Vec<(usize,usize)>,
}

impl ExactReport {
    pub fn is_feasible(&self) -> bool {
        self.objective.is_some()
    }
}

impl ExactBaseline {
    pub fn new(alpha:f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PlacementError::AlphaOutOfRange(alpha))
        }
        Ok(Self {alpha})
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
    pub fn solve(&self,network:&NetworkModel<'_>,sla:&Sla) -> Result<SolveResult> {
        Ok(self.solve_with_report(network, sla)?.result)
    }

    pub fn solve_with_report(&self,network:&NetworkModel<'_>,sla:&Sla) -> Result<ExactReport> {
        let scaled = sla.scaled()?;
        let n = network.len();
        let cloud = network.cloud();
        let nodes = n as f64;
        let alpha = self.alpha;
        let max_latency = network.latency_matrix().max_element().unwrap_or(0.0);
        // an all-zero latency matrix has nothing to normalize, the latency term vanishes
        let latency_weight = if max_latency > 0.0 {alpha/(max_latency*nodes)} else {0.0};
        let fog_weight = (1.0 - alpha)/nodes;

        let mut vars = ProblemVariables::new();
        let x:Vec<Variable> = (0..n).map(|_| vars.add(variable().binary())).collect();
        let y:Vec<Vec<Variable>> = (0..n)
            .map(|_| (0..n).map(|_| vars.add(variable().binary())).collect())
            .collect();

        let fog_term:Expression = x.iter().map(|x_i| fog_weight*(*x_i)).sum();
        let latency_term:Expression = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i,j)))
            .map(|(i,j)| latency_weight*network.latency(i, j)*y[i][j])
            .sum();
        let objective = fog_term + latency_term;

        let mut model = vars.minimise(objective).using(default_solver);
        let c_min = scaled.edge().min_capacity;
        let l_cloud = scaled.cloud().max_latency;
        let c_cloud = scaled.cloud().min_capacity;
        for i in 0..n {
            let served_once:Expression = y[i].iter().copied().sum();
            for j in 0..n {
                model.add_constraint(constraint!(y[i][j] <= x[j]));
                model.add_constraint(constraint!(c_min*y[i][j] <= network.capacity(i, j)));
            }
            model.add_constraint(constraint!(served_once == 1.0));
            model.add_constraint(constraint!(x[i] == y[i][i]));
            model.add_constraint(constraint!(network.latency(cloud, i)*x[i] <= l_cloud));
            model.add_constraint(constraint!(c_cloud*x[i] <= network.capacity(cloud, i)));
        }
        model.add_constraint(constraint!(x[cloud] == 1.0));
        debug!(nodes = n, variables = n*n + n, alpha, "solving placement MIP");

        let solution = match model.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => {
                warn!(alpha, "placement MIP is infeasible, reporting the cloud tier latency bound");
                return Ok(self.fallback(network, l_cloud))
            },
            Err(err) => return Err(PlacementError::Solver(err.to_string())),
        };

        let is_set = |var:Variable| solution.value(var) > 0.5;
        let mut objective_value = 0.0;
        let mut served = Vec::with_capacity(n);
        for i in 0..n {
            if is_set(x[i]) {
                objective_value += fog_weight;
            }
            for j in 0..n {
                if is_set(y[i][j]) {
                    objective_value += latency_weight*network.latency(i, j);
                    served.push((i,j));
                }
            }
        }
        let mean_latency = match mean_latency_per_served_edge(network, served.iter().copied()) {
            Some(mean) => mean,
            None => {
                warn!(alpha, "placement MIP selected no service edge, reporting the cloud tier latency bound");
                l_cloud
            }
        };
        let result = SolveResult {
            fog_count:objective_value - 1.0,
            membership:membership(|node| is_set(x[node]), n, cloud),
            mean_latency,
        };
        info!(alpha, objective = objective_value, fog_count = result.fog_count, mean_latency, "placement MIP solved");
        Ok(ExactReport {result,objective:Some(objective_value),served})
    }

    // what a solve without a usable solution reads back as: zero objective,
    // only the cloud marked, cloud tier bound as latency
    fn fallback(&self,network:&NetworkModel<'_>,l_cloud:f64) -> ExactReport {
        ExactReport {
            result:SolveResult {
                fog_count:-1.0,
                membership:membership(|_| false, network.len(), network.cloud()),
                mean_latency:l_cloud,
            },
            objective:None,
            served:vec![],
        }
    }

    // evenly spaced alphas over [0,1], a single point is alpha 0
    pub fn sweep(network:&NetworkModel<'_>,sla:&Sla,points:usize) -> Result<Vec<(f64,SolveResult)>> {
        linspace(points).into_iter().map(|alpha| {
            let result = Self::new(alpha)?.solve(network, sla)?;
            Ok((alpha,result))
        }).collect()
    }
}

fn linspace(points:usize) -> Vec<f64> {
    match points {
        0 => vec![],
        1 => vec![0.0],
        _ => (0..points).map(|k| k as f64/(points - 1) as f64).collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::fog_placement::heuristic::Heuristic;
    use crate::fog_placement::network::SELF_LATENCY;
    use crate::fog_placement::summary::FogSlot;
    use crate::dsa::graph::UnDirectedGraph;
    use crate::linear_algebra::matrix::Matrix;

    use super::*;

    const SLA:Sla = Sla::new(20.0, 4.0, 100.0, 5.0);

    fn with_self_cells(mut latency:Matrix,mut capacity:Matrix) -> (Matrix,Matrix) {
        NetworkModel::apply_self_cells(&mut latency, &mut capacity).unwrap();
        (latency,capacity)
    }

    fn hub(cross_capacity:f64,hub_to_cloud:f64) -> (Matrix,Matrix) {
        let mut latency = Matrix::filled(4, 4, 0.1);
        let mut capacity = Matrix::filled(4, 4, cross_capacity);
        for node in 0..4 {
            latency.set(node, 1, 0.05).unwrap();
            latency.set(1, node, 0.05).unwrap();
            capacity.set(node, 1, 10.0).unwrap();
            capacity.set(1, node, 10.0).unwrap();
        }
        capacity.set(0, 1, hub_to_cloud).unwrap();
        capacity.set(1, 0, hub_to_cloud).unwrap();
        with_self_cells(latency, capacity)
    }

    #[test]
    fn test_alpha_range() {
        assert!(ExactBaseline::new(0.0).is_ok());
        assert!(ExactBaseline::new(1.0).is_ok());
        assert_eq!(ExactBaseline::new(1.5).unwrap_err(),PlacementError::AlphaOutOfRange(1.5));
        assert!(ExactBaseline::new(f64::NAN).is_err());
    }
    #[test]
    fn test_uniform_ring_lower_bounds_heuristics() {
        let (latency,capacity) = with_self_cells(Matrix::filled(4, 4, 0.1), Matrix::filled(4, 4, 10.0));
        let network = NetworkModel::new(&latency, &capacity, 0).unwrap();
        let report = ExactBaseline::new(0.0).unwrap().solve_with_report(&network, &SLA).unwrap();
        assert!(report.is_feasible());
        // objective is 1/N for the lone cloud, read back as a fog count
        assert!((report.result.fog_count - (0.25 - 1.0)).abs() < 1e-6);
        assert_eq!(report.result.membership,vec![FogSlot::Cloud,FogSlot::Idle,FogSlot::Idle,FogSlot::Idle]);
        assert_eq!(report.served.len(),4);
        assert!((report.result.mean_latency - (SELF_LATENCY + 0.3)/4.0).abs() < 1e-9);
        let topology = UnDirectedGraph::ring(4);
        for heuristic in Heuristic::ALL {
            let greedy = heuristic.place(&network, &SLA, Some(&topology)).unwrap();
            assert!(report.result.fog_count <= greedy.fog_count);
            assert!(report.result.fog_members() - 1 <= greedy.fog_members() - 1);
        }
    }
    #[test]
    fn test_capacity_forces_the_hub() {
        let (latency,capacity) = hub(2.0, 10.0);
        let network = NetworkModel::new(&latency, &capacity, 0).unwrap();
        let report = ExactBaseline::new(0.0).unwrap().solve_with_report(&network, &SLA).unwrap();
        assert_eq!(report.result.membership,vec![FogSlot::Cloud,FogSlot::Fog,FogSlot::Idle,FogSlot::Idle]);
        assert!((report.result.fog_count - (0.5 - 1.0)).abs() < 1e-6);
        let mut served = report.served.clone();
        served.sort();
        assert_eq!(served,vec![(0,0),(1,1),(2,1),(3,1)]);
        let expected = (2.0*SELF_LATENCY + 0.05 + 0.05)/4.0;
        assert!((report.result.mean_latency - expected).abs() < 1e-9);
    }
    #[test]
    fn test_latency_weight_adds_fogs() {
        // every link can carry traffic, only latency argues for the hub
        let (latency,capacity) = hub(10.0, 10.0);
        let network = NetworkModel::new(&latency, &capacity, 0).unwrap();
        let by_latency = ExactBaseline::new(1.0).unwrap().solve(&network, &SLA).unwrap();
        assert_eq!(by_latency.fogs().collect::<Vec<_>>(),vec![0,1]);
        assert!((by_latency.mean_latency - (2.0*SELF_LATENCY + 0.1)/4.0).abs() < 1e-9);
        // 0.35 total over max latency 0.125 times 4 nodes
        assert!((by_latency.fog_count - (0.7 - 1.0)).abs() < 1e-6);
        let by_count = ExactBaseline::new(0.0).unwrap().solve(&network, &SLA).unwrap();
        assert_eq!(by_count.fog_members(),1);
    }
    #[test]
    fn test_edge_latency_bound_is_not_enforced() {
        // every cross link is four times the scaled L_max, capacity alone decides
        let (latency,capacity) = with_self_cells(Matrix::filled(4, 4, 1.0), Matrix::filled(4, 4, 10.0));
        let network = NetworkModel::new(&latency, &capacity, 0).unwrap();
        let report = ExactBaseline::new(0.0).unwrap().solve_with_report(&network, &SLA).unwrap();
        assert!(report.is_feasible());
        assert_eq!(report.result.membership_codes(),vec![2,0,0,0]);
        assert!((report.result.fog_count - (0.25 - 1.0)).abs() < 1e-6);
        assert!((report.result.mean_latency - (SELF_LATENCY + 3.0)/4.0).abs() < 1e-9);
        let l_max = SLA.scaled().unwrap().edge().max_latency;
        let slow = report.served.iter().filter(|(node,fog)| network.latency(*node, *fog) >= l_max).count();
        assert_eq!(slow,3);
    }
    #[test]
    fn test_infeasible_falls_back() {
        // nobody but the cloud may host, and nobody can reach the cloud
        let (latency,capacity) = hub(2.0, 2.0);
        let network = NetworkModel::new(&latency, &capacity, 0).unwrap();
        let report = ExactBaseline::new(0.5).unwrap().solve_with_report(&network, &SLA).unwrap();
        assert!(!report.is_feasible());
        assert!(report.served.is_empty());
        assert_eq!(report.result.mean_latency,SLA.scaled().unwrap().cloud().max_latency);
        assert_eq!(report.result.fog_count,-1.0);
        assert_eq!(report.result.membership_codes(),vec![2,0,0,0]);
    }
    #[test]
    fn test_sweep() {
        assert_eq!(linspace(0),Vec::<f64>::new());
        assert_eq!(linspace(1),vec![0.0]);
        assert_eq!(linspace(3),vec![0.0,0.5,1.0]);
        let (latency,capacity) = hub(10.0, 10.0);
        let network = NetworkModel::new(&latency, &capacity, 0).unwrap();
        let curve = ExactBaseline::sweep(&network, &SLA, 3).unwrap();
        assert_eq!(curve.iter().map(|(alpha,_)| *alpha).collect::<Vec<_>>(),vec![0.0,0.5,1.0]);
        for (_,result) in &curve {
            assert_eq!(result.membership[0],FogSlot::Cloud);
        }
        let err = ExactBaseline::sweep(&network, &Sla::new(1.0, -2.0, 1.0, 1.0), 2).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
