use crate::error::{Error, Result};
use crate::graph::{Graph, Layout};
use crate::layout::LayoutAlgorithm;
use crate::tikz_ast::*;

pub const VERTEX_STYLE: &str = "vertex";
pub const EDGE_STYLE: &str = "edge";
pub const VERTEX_OPTIONS: &str =
    "draw=black,fill=black!0,shape=circle,text=black,inner sep=0pt,minimum size=4pt";
pub const EDGE_OPTIONS: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct CellOptions {
    /// Physical width handed to `\resizebox`.
    pub width: String,
    pub layout: LayoutAlgorithm,
}

impl Default for CellOptions {
    fn default() -> Self {
        Self {
            width: "1in".to_string(),
            layout: LayoutAlgorithm::default(),
        }
    }
}

/// Labels default to the vertex id, and purely numeric labels are emptied.
pub fn emit(graph: &Graph, layout: &Layout, options: &CellOptions) -> Result<Picture> {
    let nodes = graph
        .vertices()
        .iter()
        .map(|v| {
            let at = *layout
                .get(&v.id)
                .ok_or_else(|| Error::MissingPosition { id: v.id.clone() })?;
            let label = v.label.as_deref().unwrap_or(&v.id);
            Ok(NodeStmt {
                id: v.id.clone(),
                style: v.style.clone().unwrap_or_else(|| VERTEX_STYLE.to_string()),
                at,
                label: scrub_index_label(label),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let edges = graph
        .edges()
        .iter()
        .map(|e| EdgeStmt {
            from: e.from.clone(),
            to: e.to.clone(),
            style: e.style.clone().unwrap_or_else(|| EDGE_STYLE.to_string()),
        })
        .collect();

    Ok(Picture {
        width: options.width.clone(),
        styles: vec![
            StyleDef {
                name: VERTEX_STYLE.to_string(),
                options: VERTEX_OPTIONS.to_string(),
            },
            StyleDef {
                name: EDGE_STYLE.to_string(),
                options: EDGE_OPTIONS.to_string(),
            },
        ],
        nodes,
        annotations: Vec::new(),
        edges,
    })
}

fn scrub_index_label(label: &str) -> String {
    if is_index(label) {
        String::new()
    } else {
        label.to_string()
    }
}

fn is_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn strip_index_placeholders(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..=open]);
        rest = &rest[open + 1..];
        if let Some(close) = rest.find('}') {
            if is_index(&rest[..close]) {
                rest = &rest[close..];
            }
        }
    }
    out.push_str(rest);
    out
}
