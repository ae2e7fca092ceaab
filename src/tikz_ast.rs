use crate::graph::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub width: String,
    pub styles: Vec<StyleDef>,
    pub nodes: Vec<NodeStmt>,
    pub annotations: Vec<Annotation>,
    pub edges: Vec<EdgeStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleDef {
    pub name: String,
    pub options: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeStmt {
    pub id: String,
    pub style: String,
    pub at: Point,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStmt {
    pub from: String,
    pub to: String,
    pub style: String,
}

/// A label-only node drawn with inline options; never part of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: u64,
    pub slot: Slot,
    pub options: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Title,
    UpperLeft,
    UpperRight,
    LowerRight,
    LowerLeft,
}

impl Slot {
    pub const ORDER: [Slot; 5] = [
        Slot::Title,
        Slot::UpperLeft,
        Slot::UpperRight,
        Slot::LowerRight,
        Slot::LowerLeft,
    ];

    /// Fixed position relative to the [-1, 1] drawing square.
    pub fn position(self) -> Point {
        match self {
            Slot::Title => Point::new(0.0, 1.35),
            Slot::UpperLeft => Point::new(-1.0, 1.35),
            Slot::UpperRight => Point::new(1.0, 1.35),
            Slot::LowerRight => Point::new(1.0, -1.15),
            Slot::LowerLeft => Point::new(-1.0, -1.15),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::Title => "title",
            Slot::UpperLeft => "upper-left",
            Slot::UpperRight => "upper-right",
            Slot::LowerRight => "lower-right",
            Slot::LowerLeft => "lower-left",
        }
    }
}

impl Picture {
    pub fn node_refs(&self) -> impl Iterator<Item = &str> {
        let nodes = self.nodes.iter().map(|n| n.id.as_str());
        let ends = self
            .edges
            .iter()
            .flat_map(|e| [e.from.as_str(), e.to.as_str()]);
        nodes.chain(ends)
    }

    /// Every free-text field that ends up in the rendered markup.
    pub fn free_text(&self) -> impl Iterator<Item = &str> {
        let styles = self
            .styles
            .iter()
            .flat_map(|s| [s.name.as_str(), s.options.as_str()]);
        let nodes = self
            .nodes
            .iter()
            .flat_map(|n| [n.style.as_str(), n.label.as_str()]);
        let annotations = self
            .annotations
            .iter()
            .flat_map(|a| [a.options.as_str(), a.text.as_str()]);
        let edges = self.edges.iter().map(|e| e.style.as_str());
        std::iter::once(self.width.as_str())
            .chain(styles)
            .chain(nodes)
            .chain(annotations)
            .chain(edges)
    }
}
