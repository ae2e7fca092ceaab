pub mod annotate;
pub mod emitter;
pub mod error;
pub mod graph;
pub mod graph6;
pub mod layout;
pub mod normalize;
pub mod output;
pub mod table;
pub mod tikz_ast;
pub mod tikz_parser;
pub mod tikz_renderer;

pub use annotate::CellLabels;
pub use emitter::CellOptions;
pub use error::{Error, Result};

pub fn render_cell(graph6: &str, labels: &CellLabels, options: &CellOptions) -> Result<String> {
    let graph = graph6::decode(graph6)?;
    let layout = layout::compute(&graph, options.layout);
    let mut picture = emitter::emit(&graph, &layout, options)?;
    annotate::annotate(&mut picture, labels)?;
    Ok(tikz_renderer::render(&picture))
}

/// Re-emits a diagram with its own normalized coordinates and styles.
pub fn relayout(markup: &str, labels: &CellLabels, options: &CellOptions) -> Result<String> {
    let graph = tikz_parser::parse_diagram(markup).graph;
    let layout = layout::from_coordinates(&graph)
        .unwrap_or_else(|| layout::compute(&graph, options.layout));
    let mut picture = emitter::emit(&graph, &layout, options)?;
    annotate::annotate(&mut picture, labels)?;
    Ok(tikz_renderer::render(&picture))
}

/// Adds labels to markup loaded from elsewhere, after emptying its index
/// placeholders.
pub fn annotate_markup(markup: &str, labels: &CellLabels) -> Result<String> {
    let cleaned = emitter::strip_index_placeholders(markup.trim());
    annotate::annotate_markup(&cleaned, labels)
}
