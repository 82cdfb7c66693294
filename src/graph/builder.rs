//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. Graphs are directed by
//! default; undirected graphs store both arcs of every edge.

use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The label for this node
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps label -> node ID
    label_to_id: FxHashMap<String, u32>,
    /// Node storage, in insertion order
    nodes: Vec<BuilderNode>,
    /// Whether edges are directed arcs
    directed: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty undirected graph builder
    pub fn new() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
            directed: false,
        }
    }

    /// Create a new empty directed graph builder
    pub fn directed() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
            directed: true,
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
            directed: false,
        }
    }

    /// Whether this builder produces a directed graph
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Get or create a node for the given label, returning its ID
    ///
    /// IDs are assigned in first-seen order, which fixes the node
    /// enumeration order of the finished graph.
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    /// Undirected builders store the reverse arc as well.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if !self.directed {
            if let Some(node) = self.nodes.get_mut(to as usize) {
                *node.edges.entry(from).or_insert(0.0) += weight;
            }
        }
    }

    /// Build from a labeled edge list
    ///
    /// Convenience for tests and dataset glue; nodes are created in the
    /// order their labels first appear.
    pub fn from_edges<'a>(
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
        directed: bool,
    ) -> Self {
        let mut builder = if directed {
            Self::directed()
        } else {
            Self::new()
        };
        for (from, to) in edges {
            let from = builder.get_or_create_node(from);
            let to = builder.get_or_create_node(to);
            builder.increment_edge(from, to, 1.0);
        }
        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by label
    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    /// Get the label for a node ID
    pub fn get_label(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.label.as_str())
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("alpha");
        let id_b = builder.get_or_create_node("beta");
        let id_c = builder.get_or_create_node("alpha"); // duplicate

        assert_eq!(id_a, id_c); // Same label should get same ID
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_edge_incrementing_undirected() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("alpha");
        let id_b = builder.get_or_create_node("beta");

        builder.increment_edge(id_a, id_b, 1.0);
        builder.increment_edge(id_a, id_b, 1.0);

        // Should have weight 2.0 in both directions
        assert_eq!(builder.get_node(id_a).unwrap().edges.get(&id_b), Some(&2.0));
        assert_eq!(builder.get_node(id_b).unwrap().edges.get(&id_a), Some(&2.0));
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let mut builder = GraphBuilder::directed();

        let id_a = builder.get_or_create_node("alpha");
        let id_b = builder.get_or_create_node("beta");

        builder.increment_edge(id_a, id_b, 1.0);

        assert_eq!(builder.get_node(id_a).unwrap().edges.get(&id_b), Some(&1.0));
        assert!(builder.get_node(id_b).unwrap().edges.is_empty());
    }

    #[test]
    fn test_from_edges_assigns_ids_in_first_seen_order() {
        let builder = GraphBuilder::from_edges([("x", "y"), ("y", "z")], true);

        assert_eq!(builder.get_node_id("x"), Some(0));
        assert_eq!(builder.get_node_id("y"), Some(1));
        assert_eq!(builder.get_node_id("z"), Some(2));
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        let id_a = builder.get_or_create_node("solo");

        builder.increment_edge(id_a, id_a, 1.0);

        // No self-loop should be created
        let node = builder.get_node(id_a).unwrap();
        assert!(node.edges.is_empty());
    }
}
