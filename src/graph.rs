use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertex id to position. Every vertex of the graph being drawn needs exactly one entry.
pub type Layout = HashMap<String, Point>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vertex {
    pub id: String,
    pub style: Option<String>,
    pub position: Option<Point>,
    pub label: Option<String>,
}

impl Vertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub style: Option<String>,
}

impl Edge {
    fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Simple undirected graph. Vertices keep their declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex, or replaces the attributes of an existing one in place.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        match self.vertices.iter_mut().find(|v| v.id == vertex.id) {
            Some(existing) => *existing = vertex,
            None => self.vertices.push(vertex),
        }
    }

    /// Returns false when an endpoint is undeclared or the pair is already joined.
    pub fn add_edge(&mut self, from: &str, to: &str, style: Option<String>) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if self.edges.iter().any(|e| e.joins(from, to)) {
            return false;
        }
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            style,
        });
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vertices.iter().any(|v| v.id == id)
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges.iter().any(|e| e.joins(a, b))
    }

    pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges.iter().filter_map(move |e| {
            if e.from == id {
                Some(e.to.as_str())
            } else if e.to == id {
                Some(e.from.as_str())
            } else {
                None
            }
        })
    }

    pub fn degree(&self, id: &str) -> usize {
        self.neighbors(id).count()
    }
}
