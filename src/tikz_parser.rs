use tracing::debug;
use winnow::ascii::{digit1, multispace0, multispace1};
use winnow::combinator::{alt, delimited};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::graph::{Graph, Layout, Point, Vertex};
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDiagram {
    pub graph: Graph,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Vertex(Vertex),
    Edge {
        style: String,
        from: String,
        to: String,
    },
}

/// Never fails: a document without recognizable vertices gives an empty graph.
pub fn parse_diagram(input: &str) -> ParsedDiagram {
    let mut graph = Graph::new();
    let mut pending_edges = Vec::new();

    let mut rest = input;
    while let Some(start) = rest.find('\\') {
        rest = &rest[start..];
        let mut attempt = rest;
        match statement(&mut attempt) {
            Ok(Statement::Vertex(v)) => graph.add_vertex(v),
            Ok(Statement::Edge { style, from, to }) => pending_edges.push((style, from, to)),
            Err(_) => {
                rest = &rest[1..];
                continue;
            }
        }
        rest = attempt;
    }

    for (style, from, to) in pending_edges {
        if !graph.add_edge(&from, &to, Some(style)) {
            debug!(%from, %to, "dropping edge with undeclared endpoint or duplicate pair");
        }
    }

    let raw: Layout = graph
        .vertices()
        .iter()
        .filter_map(|v| Some((v.id.clone(), v.position?)))
        .collect();

    ParsedDiagram {
        layout: normalize(&raw),
        graph,
    }
}

fn statement(input: &mut &str) -> winnow::Result<Statement> {
    alt((vertex_statement, edge_statement)).parse_next(input)
}

fn vertex_statement(input: &mut &str) -> winnow::Result<Statement> {
    "\\node".parse_next(input)?;
    multispace1.parse_next(input)?;
    let style = style_option.parse_next(input)?;
    multispace0.parse_next(input)?;
    let id = delimited('(', digit1, ')').parse_next(input)?;
    multispace1.parse_next(input)?;
    "at".parse_next(input)?;
    multispace0.parse_next(input)?;
    let position = coordinate.parse_next(input)?;
    multispace0.parse_next(input)?;
    let label = delimited('{', take_while(0.., |c: char| !matches!(c, '{' | '}' | '\n')), '}')
        .parse_next(input)?;
    multispace0.parse_next(input)?;
    ';'.parse_next(input)?;

    Ok(Statement::Vertex(Vertex {
        id: id.to_string(),
        style: Some(style),
        position: Some(position),
        label: (!label.is_empty()).then(|| label.to_string()),
    }))
}

fn edge_statement(input: &mut &str) -> winnow::Result<Statement> {
    "\\draw".parse_next(input)?;
    multispace0.parse_next(input)?;
    let style = style_option.parse_next(input)?;
    multispace0.parse_next(input)?;
    let from = node_name.parse_next(input)?;
    multispace1.parse_next(input)?;
    "to".parse_next(input)?;
    multispace1.parse_next(input)?;
    let to = node_name.parse_next(input)?;
    multispace0.parse_next(input)?;
    ';'.parse_next(input)?;

    Ok(Statement::Edge {
        style,
        from: from.to_string(),
        to: to.to_string(),
    })
}

fn style_option(input: &mut &str) -> winnow::Result<String> {
    "[".parse_next(input)?;
    multispace0.parse_next(input)?;
    "style=".parse_next(input)?;
    let style = take_while(1.., |c: char| c != ']' && c != '\n').parse_next(input)?;
    "]".parse_next(input)?;
    Ok(style.trim().to_string())
}

fn node_name<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    delimited(
        '(',
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_'),
        ')',
    )
    .parse_next(input)
}

fn coordinate(input: &mut &str) -> winnow::Result<Point> {
    '('.parse_next(input)?;
    multispace0.parse_next(input)?;
    let x = number.parse_next(input)?;
    multispace0.parse_next(input)?;
    ','.parse_next(input)?;
    multispace0.parse_next(input)?;
    let y = number.parse_next(input)?;
    multispace0.parse_next(input)?;
    ')'.parse_next(input)?;
    Ok(Point::new(x, y))
}

fn number(input: &mut &str) -> winnow::Result<f64> {
    take_while(1.., |c: char| c == '-' || c == '.' || c.is_ascii_digit())
        .try_map(str::parse::<f64>)
        .verify(|v: &f64| v.is_finite())
        .parse_next(input)
}
