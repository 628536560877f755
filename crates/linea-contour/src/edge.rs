use std::collections::HashMap;

use linea_core::{Cell, HalfPoint, LatticePoint};

pub type EdgeId = usize;

/// Unit boundary segment between the foreground cell `pixel` and a background
/// neighbour. Identity is the full triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src: LatticePoint,
    pub dst: LatticePoint,
    pub pixel: Cell,
}

impl Edge {
    pub fn midpoint(&self) -> HalfPoint {
        self.src.midpoint(self.dst)
    }
}

/// All boundary edges of one layer plus the lattice-point incidence index.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: Vec<Edge>,
    ids: HashMap<Edge, EdgeId>,
    incident: HashMap<LatticePoint, Vec<EdgeId>>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut set = Self::new();
        for e in edges {
            set.push(e);
        }
        set
    }

    /// Inserts `edge` and indexes it under both endpoints. Re-inserting an
    /// equal edge returns the id it already has.
    pub fn push(&mut self, edge: Edge) -> EdgeId {
        if let Some(&id) = self.ids.get(&edge) {
            return id;
        }

        let id = self.edges.len();
        self.edges.push(edge);
        self.ids.insert(edge, id);
        self.incident.entry(edge.src).or_default().push(id);
        if edge.dst != edge.src {
            self.incident.entry(edge.dst).or_default().push(id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn id_of(&self, edge: &Edge) -> Option<EdgeId> {
        self.ids.get(edge).copied()
    }

    /// Ids of every edge with `point` as `src` or `dst`, in insertion order.
    pub fn incident(&self, point: LatticePoint) -> &[EdgeId] {
        self.incident.get(&point).map_or(&[], Vec::as_slice)
    }
}
