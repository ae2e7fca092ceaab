use tracing::debug;
use winnow::ascii::digit1;
use winnow::combinator::delimited;
use winnow::prelude::*;

use crate::error::{Error, Result};
use crate::tikz_ast::*;
use crate::tikz_renderer::{PICTURE_CLOSE, SCOPE_OPEN, annotation_statement};

pub const ANNOTATION_OPTIONS: &str =
    "shape=circle,text=black,inner sep=0pt,minimum size=4pt,fill opacity=0,text opacity=1";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellLabels {
    pub title: Option<String>,
    pub upper_left: Option<String>,
    pub upper_right: Option<String>,
    pub lower_right: Option<String>,
    pub lower_left: Option<String>,
}

impl CellLabels {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        let label = match slot {
            Slot::Title => &self.title,
            Slot::UpperLeft => &self.upper_left,
            Slot::UpperRight => &self.upper_right,
            Slot::LowerRight => &self.lower_right,
            Slot::LowerLeft => &self.lower_left,
        };
        label.as_deref()
    }
}

/// One more than the largest `(<digits>)` reference the rendered picture
/// would contain, or 0.
pub fn next_id(picture: &Picture) -> Result<u64> {
    let refs = picture.node_refs().filter(|id| is_numeric(id));
    let embedded = picture.free_text().flat_map(scan_numeric_ids);
    let highest = picture.annotations.iter().map(|a| a.id).max();
    allocate(refs.chain(embedded), highest)
}

/// Empty text inserts nothing.
pub fn inject(picture: &mut Picture, slot: Slot, text: &str) -> Result<Option<u64>> {
    if text.is_empty() {
        return Ok(None);
    }
    let id = next_id(picture)?;
    debug!(id, slot = slot.name(), "annotation allocated");
    picture.annotations.push(Annotation {
        id,
        slot,
        options: ANNOTATION_OPTIONS.to_string(),
        text: text.to_string(),
    });
    Ok(Some(id))
}

pub fn annotate(picture: &mut Picture, labels: &CellLabels) -> Result<()> {
    for slot in Slot::ORDER {
        if let Some(text) = labels.get(slot) {
            inject(picture, slot, text)?;
        }
    }
    Ok(())
}

/// Text-level injection into already rendered markup.
///
/// The statement goes right before the line opening the edge scope, and the
/// result ends at the line closing the picture wrapper.
pub fn inject_markup(markup: &str, slot: Slot, text: &str) -> Result<String> {
    if text.is_empty() {
        return Ok(markup.to_string());
    }
    let lines: Vec<&str> = markup.split('\n').collect();
    let scope = lines
        .iter()
        .position(|l| l.contains(SCOPE_OPEN))
        .ok_or(Error::MissingAnchor { marker: SCOPE_OPEN })?;
    let close = lines
        .iter()
        .position(|l| l.contains(PICTURE_CLOSE))
        .ok_or(Error::MissingAnchor {
            marker: PICTURE_CLOSE,
        })?;
    if close < scope {
        return Err(Error::MisplacedAnchor {
            scope: SCOPE_OPEN,
            close: PICTURE_CLOSE,
        });
    }

    let id = allocate(scan_numeric_ids(markup), None)?;
    debug!(id, slot = slot.name(), "annotation allocated in markup");
    let statement = annotation_statement(&Annotation {
        id,
        slot,
        options: ANNOTATION_OPTIONS.to_string(),
        text: text.to_string(),
    });

    let mut out = String::with_capacity(markup.len() + statement.len());
    for (i, line) in lines.iter().enumerate().take(close + 1) {
        if i == scope {
            out.push_str(&statement);
        }
        out.push_str(line);
        if i != close {
            out.push('\n');
        }
    }
    Ok(out)
}

pub fn annotate_markup(markup: &str, labels: &CellLabels) -> Result<String> {
    let mut out = markup.to_string();
    for slot in Slot::ORDER {
        if let Some(text) = labels.get(slot) {
            out = inject_markup(&out, slot, text)?;
        }
    }
    Ok(out)
}

fn allocate<'a>(ids: impl Iterator<Item = &'a str>, mut highest: Option<u64>) -> Result<u64> {
    for digits in ids {
        let id = digits.parse::<u64>().map_err(|_| Error::IdOutOfRange {
            id: digits.to_string(),
        })?;
        highest = highest.max(Some(id));
    }
    match highest {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or_else(|| Error::IdOutOfRange {
            id: max.to_string(),
        }),
    }
}

fn is_numeric(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

fn scan_numeric_ids(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('(').filter_map(|(i, _)| {
        let mut input = &text[i..];
        node_ref(&mut input).ok()
    })
}

fn node_ref<'i>(input: &mut &'i str) -> winnow::Result<&'i str> {
    delimited('(', digit1, ')').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{CellOptions, emit};
    use crate::graph::{Graph, Layout, Point, Vertex};
    use crate::tikz_renderer::render;
    use pretty_assertions::assert_eq;

    // vertices 3, 5 and 7 in a path
    fn picture() -> Picture {
        let mut g = Graph::new();
        let mut layout = Layout::new();
        for (i, id) in ["3", "5", "7"].into_iter().enumerate() {
            g.add_vertex(Vertex::new(id));
            layout.insert(id.to_string(), Point::new(i as f64, 0.0));
        }
        g.add_edge("3", "5", None);
        g.add_edge("5", "7", None);
        emit(&g, &layout, &CellOptions::default()).unwrap()
    }

    #[test]
    fn next_id_follows_highest_reference() {
        assert_eq!(next_id(&picture()).unwrap(), 8);
    }

    #[test]
    fn next_id_without_numeric_ids_is_zero() {
        let mut p = picture();
        p.nodes.clear();
        p.edges.clear();
        assert_eq!(next_id(&p).unwrap(), 0);
    }

    #[test]
    fn sequential_injections_allocate_consecutive_ids() {
        let mut p = picture();
        assert_eq!(inject(&mut p, Slot::UpperLeft, "a").unwrap(), Some(8));
        assert_eq!(inject(&mut p, Slot::LowerRight, "b").unwrap(), Some(9));
        let ids: Vec<u64> = p.annotations.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![8, 9]);
    }

    #[test]
    fn empty_label_is_skipped() {
        let mut p = picture();
        assert_eq!(inject(&mut p, Slot::Title, "").unwrap(), None);
        assert!(p.annotations.is_empty());
    }

    #[test]
    fn annotate_follows_slot_order() {
        let mut p = picture();
        let labels = CellLabels {
            title: Some("P3".into()),
            upper_left: Some("ul".into()),
            upper_right: None,
            lower_right: Some("lr".into()),
            lower_left: Some("ll".into()),
        };
        annotate(&mut p, &labels).unwrap();
        let order: Vec<(Slot, u64)> = p.annotations.iter().map(|a| (a.slot, a.id)).collect();
        assert_eq!(
            order,
            vec![
                (Slot::Title, 8),
                (Slot::UpperLeft, 9),
                (Slot::LowerRight, 10),
                (Slot::LowerLeft, 11)
            ]
        );
    }

    #[test]
    fn scan_ignores_coordinates_and_words() {
        let ids: Vec<&str> = scan_numeric_ids("(0.5, 1) (12) (a) (3)x ((4))").collect();
        assert_eq!(ids, vec!["12", "3", "4"]);
    }

    #[test]
    fn markup_injection_matches_structured_injection() {
        let mut p = picture();
        let text = render(&p);
        let injected = inject_markup(&text, Slot::UpperRight, "deg").unwrap();
        inject(&mut p, Slot::UpperRight, "deg").unwrap();
        assert_eq!(injected, render(&p));
    }

    #[test]
    fn markup_injection_is_sequential() {
        let text = render(&picture());
        let labels = CellLabels {
            title: Some("T".into()),
            lower_left: Some("L".into()),
            ..CellLabels::default()
        };
        let out = annotate_markup(&text, &labels).unwrap();
        assert!(out.contains("(8) {\\textbf{T}}"));
        assert!(out.contains("(9) {L}"));
    }

    #[test]
    fn markup_injection_drops_trailing_text() {
        let text = format!("{}\n% trailing comment", render(&picture()));
        let out = inject_markup(&text, Slot::Title, "T").unwrap();
        assert!(out.ends_with(PICTURE_CLOSE));
    }

    #[test]
    fn markup_without_scope_is_rejected() {
        let err = inject_markup("\\node (1) at (0, 0) {};", Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::MissingAnchor { marker } if marker == SCOPE_OPEN));
    }

    #[test]
    fn markup_without_closing_wrapper_is_rejected() {
        let text = format!("{SCOPE_OPEN}\n\\end{{scope}}\n\\end{{tikzpicture}}");
        let err = inject_markup(&text, Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::MissingAnchor { marker } if marker == PICTURE_CLOSE));
    }

    fn single_vertex(id: &str) -> Picture {
        let mut g = Graph::new();
        g.add_vertex(Vertex::new(id));
        let layout = Layout::from([(id.to_string(), Point::new(0.0, 0.0))]);
        emit(&g, &layout, &CellOptions::default()).unwrap()
    }

    #[test]
    fn highest_possible_id_leaves_no_room() {
        let mut p = single_vertex("18446744073709551615");
        let err = inject(&mut p, Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::IdOutOfRange { ref id } if id == "18446744073709551615"));
        assert!(p.annotations.is_empty());

        let err = inject_markup(&render(&p), Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::IdOutOfRange { .. }));
    }

    #[test]
    fn id_wider_than_u64_is_rejected() {
        let mut p = single_vertex("99999999999999999999999");
        let err = inject(&mut p, Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::IdOutOfRange { ref id } if id == "99999999999999999999999"));

        let err = inject_markup(&render(&p), Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::IdOutOfRange { .. }));
    }

    #[test]
    fn numeric_reference_in_label_counts_in_both_paths() {
        let mut p = picture();
        p.nodes[0].label = "deg (12)".into();
        let text = render(&p);
        let injected = inject_markup(&text, Slot::LowerLeft, "n").unwrap();
        assert_eq!(inject(&mut p, Slot::LowerLeft, "n").unwrap(), Some(13));
        assert_eq!(injected, render(&p));
    }

    #[test]
    fn closing_wrapper_before_scope_is_rejected() {
        let text = "\\resizebox{1in}{!}{\\begin{tikzpicture}\n    \\end{tikzpicture}}\n      \\begin{scope}[-]\n";
        let err = inject_markup(text, Slot::Title, "T").unwrap_err();
        assert!(matches!(err, Error::MisplacedAnchor { .. }), "got {err:?}");
    }
}
