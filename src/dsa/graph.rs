use std::borrow::Borrow;

type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;
type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<usize>>;

// undirected simple graph over usize node ids
// self loops are stored once and count once towards degree
#[derive(Clone,Debug)]
pub struct UnDirectedGraph {
    edges_len:usize,
    adjacency_list:HashMap<usize,HashSet<usize>>
}

impl Default for UnDirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl UnDirectedGraph {
    pub fn edges_len(&self) -> usize {
        self.edges_len
    }
    pub fn nodes_len(&self) -> usize {
        self.adjacency_list.len()
    }
    pub fn is_empty(&self) -> bool {
        if self.nodes_len() == 0 {
            debug_assert!(self.edges_len() == 0);
            return true;
        }
        false
    }
    pub fn new() -> Self {
        Self {
            edges_len:0,
            adjacency_list:HashMap::with_hasher(
                nohash::BuildNoHashHasher::default()
            )
        }
    }
    pub fn with_capacity(capacity:usize) -> Self {
        Self {
            edges_len:0,
            adjacency_list:HashMap::with_capacity_and_hasher(
                capacity,
                nohash::BuildNoHashHasher::default())
        }
    }
    // only push node, not adding edges
    pub fn push_node<B:Borrow<usize>>(&mut self,node:B) {
        let node = node.borrow();
        if self.adjacency_list.contains_key(node) {
            return;
        }
        self.adjacency_list.insert(*node,HashSet::with_hasher(nohash::BuildNoHashHasher::default()));
    }
    pub fn push_edge<B:Borrow<(usize,usize)>>(&mut self,edge:B) {
        let (node1,node2) = *edge.borrow();
        self.push_node(node1);
        self.push_node(node2);
        // insert() returns false when the neighbour is already registered
        let mut is_new_edge = false;
        if let Some(adj_nodes) = self.adjacency_list.get_mut(&node1) {
            is_new_edge |= adj_nodes.insert(node2);
        }
        if let Some(adj_nodes) = self.adjacency_list.get_mut(&node2) {
            is_new_edge |= adj_nodes.insert(node1);
        }
        if is_new_edge {
            self.edges_len += 1;
        }
    }
    // None if the node was never pushed
    pub fn degree(&self,node:usize) -> Option<usize> {
        self.adjacency_list.get(&node).map(|adj| adj.len())
    }
    // iteration order is unspecified
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.adjacency_list.keys().copied()
    }
    pub fn max_node(&self) -> Option<usize> {
        self.nodes().max()
    }
    // a cycle 0-1-...-(n-1)-0
    pub fn ring(n:usize) -> Self {
        let mut graph = Self::with_capacity(n);
        for node in 0..n {
            graph.push_node(node);
        }
        if n > 1 {
            for node in 0..n {
                graph.push_edge((node,(node + 1) % n));
            }
        }
        graph
    }
    pub fn shrink_to_fit(&mut self) {
        self.adjacency_list.shrink_to_fit();
        for v in self.adjacency_list.values_mut() {
            v.shrink_to_fit();
        }
    }
}

impl<T:AsRef<[(usize,usize)]>> From<T> for UnDirectedGraph {
    fn from(value: T) -> Self {
        let size_estimation = value.as_ref().len();
        let mut new_graph = Self::with_capacity(size_estimation);
        for edge in value.as_ref() {
            new_graph.push_edge(edge);
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

impl<B:Borrow<(usize,usize)>> FromIterator<B> for UnDirectedGraph {
    fn from_iter<T: IntoIterator<Item = B>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size_estimation = match iter.size_hint() {
            (_,Some(n)) => {n},
            (n,None) => {n}
        };
        let mut new_graph = Self::with_capacity(size_estimation);
        for b in iter {
            new_graph.push_edge(b.borrow());
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}
