//! Graph description builder
//!
//! Declares nodes, nested clusters and directed edges in declaration order.
//! Nothing is validated here beyond handle ownership checks at emission
//! time; the graph is a plain description handed to the DOT writer.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, trace};

use super::{Edge, NodeKind};

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(0);

/// Handle to a declared node
///
/// Handles carry the id of the graph that issued them, so a handle leaking
/// from one diagram into another is detected instead of silently pointing at
/// an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    graph: u32,
    index: u32,
}

impl NodeId {
    /// Position of the node in declaration order
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.index)
    }
}

/// Handle to a declared cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId {
    graph: u32,
    index: u32,
}

impl ClusterId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Graphviz only draws subgraphs whose name starts with "cluster"
        write!(f, "cluster_{}", self.index)
    }
}

/// Something placed directly inside a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Node(NodeId),
    Cluster(ClusterId),
}

/// A declared node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Display label, may contain `\n` line breaks
    pub label: String,
    /// Innermost enclosing cluster
    pub cluster: Option<ClusterId>,
}

/// A declared cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterData {
    pub id: ClusterId,
    pub name: String,
    pub parent: Option<ClusterId>,
    /// Nesting depth, 0 for top-level clusters
    pub depth: usize,
    /// Direct members in declaration order
    pub members: Vec<Member>,
}

/// A declared edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub from: NodeId,
    pub to: NodeId,
    pub attrs: Edge,
}

/// Graph description for one diagram
///
/// ```rust
/// use archviz::core::{Edge, Graph, NodeKind};
///
/// let mut g = Graph::new();
/// let user = g.node(NodeKind::Client, "Doctor");
/// let db = g.cluster("Backend", |g| g.node(NodeKind::Postgres, "PostgreSQL"));
/// # let _ = db;
/// let api = g.node(NodeKind::Server, "REST API");
/// g.edge_with(user, api, Edge::labeled("Access"));
///
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.cluster_count(), 1);
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Debug)]
pub struct Graph {
    id: u32,
    nodes: Vec<NodeData>,
    clusters: Vec<ClusterData>,
    edges: Vec<EdgeData>,
    root: Vec<Member>,
    scope: Vec<ClusterId>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            clusters: Vec::new(),
            edges: Vec::new(),
            root: Vec::new(),
            scope: Vec::new(),
        }
    }

    /// Declare a node in the current scope
    pub fn node(&mut self, kind: NodeKind, label: impl Into<String>) -> NodeId {
        let id = NodeId {
            graph: self.id,
            index: self.nodes.len() as u32,
        };
        let label = label.into();
        let cluster = self.current_cluster();
        trace!(node = %id, %kind, label = %label.escape_debug(), "Declaring node");

        self.nodes.push(NodeData {
            id,
            kind,
            label,
            cluster,
        });
        self.push_member(Member::Node(id));
        id
    }

    /// Declare a cluster; everything declared inside `declare` is nested in it
    ///
    /// Returns whatever the closure returns, typically the handles of the
    /// nodes declared inside.
    pub fn cluster<R>(
        &mut self,
        name: impl Into<String>,
        declare: impl FnOnce(&mut Graph) -> R,
    ) -> R {
        let id = self.open_cluster(name.into());
        let result = declare(self);
        self.close_cluster(id);
        result
    }

    fn open_cluster(&mut self, name: String) -> ClusterId {
        let id = ClusterId {
            graph: self.id,
            index: self.clusters.len() as u32,
        };
        let parent = self.current_cluster();
        let depth = self.scope.len();
        trace!(cluster = %id, name = %name, depth, "Opening cluster");

        self.clusters.push(ClusterData {
            id,
            name,
            parent,
            depth,
            members: Vec::new(),
        });
        self.push_member(Member::Cluster(id));
        self.scope.push(id);
        id
    }

    fn close_cluster(&mut self, id: ClusterId) {
        let closed = self.scope.pop();
        debug_assert_eq!(closed, Some(id), "clusters must close in LIFO order");
        if let Some(cluster) = self.clusters.get(id.index()) {
            debug!(
                cluster = %cluster.name,
                members = cluster.members.len(),
                "Closed cluster"
            );
        }
    }

    fn push_member(&mut self, member: Member) {
        match self.scope.last() {
            Some(parent) => self.clusters[parent.index()].members.push(member),
            None => self.root.push(member),
        }
    }

    /// Innermost open cluster, if any
    pub fn current_cluster(&self) -> Option<ClusterId> {
        self.scope.last().copied()
    }

    /// Declare a plain directed edge
    pub fn edge(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.edge_with(from, to, Edge::new())
    }

    /// Declare an edge with label and style
    pub fn edge_with(&mut self, from: NodeId, to: NodeId, attrs: Edge) -> &mut Self {
        trace!(%from, %to, label = ?attrs.label, style = %attrs.style, "Declaring edge");
        self.edges.push(EdgeData { from, to, attrs });
        self
    }

    /// Declare an undirected connector between two nodes
    pub fn link(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.edge_with(a, b, Edge::new().undirected())
    }

    /// Declare one edge from `from` to each of `targets`, in order
    pub fn fan_out(&mut self, from: NodeId, targets: &[NodeId], attrs: Edge) -> &mut Self {
        for &to in targets {
            self.edge_with(from, to, attrs.clone());
        }
        self
    }

    /// Declare one edge from each of `sources` to `to`, in order
    pub fn fan_in(&mut self, sources: &[NodeId], to: NodeId, attrs: Edge) -> &mut Self {
        for &from in sources {
            self.edge_with(from, to, attrs.clone());
        }
        self
    }

    /// Declare edges along a path: `a -> b -> c`
    pub fn chain(&mut self, path: &[NodeId], attrs: Edge) -> &mut Self {
        for pair in path.windows(2) {
            self.edge_with(pair[0], pair[1], attrs.clone());
        }
        self
    }

    /// Returns true if `id` was issued by this graph
    pub fn owns(&self, id: NodeId) -> bool {
        id.graph == self.id && id.index() < self.nodes.len()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&NodeData> {
        if id.graph != self.id {
            return None;
        }
        self.nodes.get(id.index())
    }

    pub fn get_cluster(&self, id: ClusterId) -> Option<&ClusterData> {
        if id.graph != self.id {
            return None;
        }
        self.clusters.get(id.index())
    }

    /// Cluster that directly contains `id`
    pub fn cluster_of(&self, id: NodeId) -> Option<&ClusterData> {
        self.get_node(id)
            .and_then(|node| node.cluster)
            .and_then(|cluster| self.get_cluster(cluster))
    }

    /// Find a node by its exact label
    pub fn find_node(&self, label: &str) -> Option<&NodeData> {
        self.nodes.iter().find(|node| node.label == label)
    }

    /// Find a cluster by its name
    pub fn find_cluster(&self, name: &str) -> Option<&ClusterData> {
        self.clusters.iter().find(|cluster| cluster.name == name)
    }

    /// Targets of edges leaving `id`, in declaration order
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| e.to)
            .collect()
    }

    /// Members declared outside any cluster
    pub fn root_members(&self) -> &[Member] {
        &self.root
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.edges.iter()
    }

    pub fn clusters(&self) -> impl Iterator<Item = &ClusterData> {
        self.clusters.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }
}
