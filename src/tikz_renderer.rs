use std::fmt::Write;

use crate::tikz_ast::*;

pub const SCOPE_OPEN: &str = "\\begin{scope}[-]";
pub const PICTURE_CLOSE: &str = "\\end{tikzpicture}}";

const NODE_INDENT: &str = "      ";
const EDGE_INDENT: &str = "        ";
const CLOSE_INDENT: &str = "    ";

pub fn render(picture: &Picture) -> String {
    let mut out = String::new();
    let styles = picture
        .styles
        .iter()
        .map(|s| format!("{}/.style={{{}}}", s.name, s.options))
        .collect::<Vec<_>>()
        .join(",");

    let _ = write!(out, "\\resizebox{{{}}}{{!}}{{\\begin{{tikzpicture}}", picture.width);
    if !styles.is_empty() {
        let _ = write!(out, "[{styles}]");
    }
    out.push('\n');

    for node in &picture.nodes {
        let _ = writeln!(
            out,
            "{NODE_INDENT}\\node [style={}] ({}) at ({}, {}) {{{}}};",
            node.style,
            node.id,
            fmt_num(node.at.x),
            fmt_num(node.at.y),
            node.label
        );
    }
    for annotation in &picture.annotations {
        out.push_str(&annotation_statement(annotation));
    }

    let _ = writeln!(out, "{NODE_INDENT}{SCOPE_OPEN}");
    for edge in &picture.edges {
        let _ = writeln!(
            out,
            "{EDGE_INDENT}\\draw [style={}] ({}) to ({});",
            edge.style, edge.from, edge.to
        );
    }
    let _ = writeln!(out, "{NODE_INDENT}\\end{{scope}}");
    let _ = write!(out, "{CLOSE_INDENT}{PICTURE_CLOSE}");
    out
}

pub fn annotation_statement(annotation: &Annotation) -> String {
    let at = annotation.slot.position();
    let text = match annotation.slot {
        Slot::Title => format!("\\textbf{{{}}}", annotation.text),
        _ => annotation.text.clone(),
    };
    format!(
        "{NODE_INDENT}\\draw\n{EDGE_INDENT}({},{}) node[{}] ({}) {{{}}};\n",
        fmt_decimal(at.x),
        fmt_decimal(at.y),
        annotation.options,
        annotation.id,
        text
    )
}

/// At most four decimals, trailing zeros trimmed, no negative zero.
pub fn fmt_num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn fmt_decimal(v: f64) -> String {
    let s = fmt_num(v);
    if s.contains('.') { s } else { format!("{s}.0") }
}
