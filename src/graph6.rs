//! Decoder for the graph6 format (McKay), the compact one-line graph encoding
//! used in the record source.

use crate::graph::{Graph, Vertex};

const HEADER: &str = ">>graph6<<";
const BIAS: u8 = 63;
const LONG: u8 = 126;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Graph6Error {
    #[error("empty graph6 string")]
    Empty,
    #[error("byte {byte:#04x} at offset {offset} is outside the graph6 alphabet")]
    InvalidByte { byte: u8, offset: usize },
    #[error("sparse6 and digraph6 strings are not supported")]
    UnsupportedVariant,
    #[error("truncated vertex count")]
    TruncatedSize,
    #[error("expected {expected} data bytes for {vertices} vertices, found {found}")]
    DataLength {
        vertices: usize,
        expected: usize,
        found: usize,
    },
}

pub fn decode(input: &str) -> Result<Graph, Graph6Error> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix(HEADER).unwrap_or(trimmed);
    let bytes = body.as_bytes();

    if bytes.is_empty() {
        return Err(Graph6Error::Empty);
    }
    if bytes[0] == b':' || bytes[0] == b'&' {
        return Err(Graph6Error::UnsupportedVariant);
    }
    if let Some((offset, &byte)) = bytes
        .iter()
        .enumerate()
        .find(|&(_, &b)| !(BIAS..=LONG).contains(&b))
    {
        return Err(Graph6Error::InvalidByte { byte, offset });
    }

    let (n, data) = vertex_count(bytes)?;
    let bit_count = n as u128 * n.saturating_sub(1) as u128 / 2;
    let expected = usize::try_from(bit_count.div_ceil(6)).unwrap_or(usize::MAX);
    if data.len() != expected {
        return Err(Graph6Error::DataLength {
            vertices: n,
            expected,
            found: data.len(),
        });
    }

    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_vertex(Vertex::new(i.to_string()));
    }

    let mut bits = data
        .iter()
        .flat_map(|&b| (0..6).rev().map(move |shift| ((b - BIAS) >> shift) & 1 == 1));
    for j in 1..n {
        for i in 0..j {
            if bits.next() == Some(true) {
                graph.add_edge(&i.to_string(), &j.to_string(), None);
            }
        }
    }
    Ok(graph)
}

fn vertex_count(bytes: &[u8]) -> Result<(usize, &[u8]), Graph6Error> {
    if bytes[0] != LONG {
        return Ok(((bytes[0] - BIAS) as usize, &bytes[1..]));
    }
    let (width, start) = if bytes.get(1) == Some(&LONG) { (6, 2) } else { (3, 1) };
    let digits = bytes
        .get(start..start + width)
        .ok_or(Graph6Error::TruncatedSize)?;
    let n = digits
        .iter()
        .fold(0usize, |acc, &b| (acc << 6) | (b - BIAS) as usize);
    Ok((n, &bytes[start + width..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edge_pairs(g: &Graph) -> Vec<(String, String)> {
        g.edges()
            .iter()
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect()
    }

    #[test]
    fn decode_empty_graph_on_zero_vertices() {
        let g = decode("?").unwrap();
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn decode_single_vertex() {
        let g = decode("@").unwrap();
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn decode_single_edge() {
        let g = decode("A_").unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(edge_pairs(&g), vec![("0".into(), "1".into())]);
    }

    #[test]
    fn decode_triangle() {
        let g = decode("Bw").unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn decode_path_on_three_vertices() {
        let g = decode("Bg").unwrap();
        assert_eq!(
            edge_pairs(&g),
            vec![("0".into(), "1".into()), ("1".into(), "2".into())]
        );
    }

    #[test]
    fn decode_complete_graph_k4() {
        let g = decode("C~").unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn decode_accepts_header_and_trailing_newline() {
        let g = decode(">>graph6<<Bw\n").unwrap();
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn decode_long_vertex_count() {
        // 63 vertices, no edges: ~ then 18-bit count, then 326 zero bytes.
        let mut s = String::from("~??~");
        s.push_str(&"?".repeat((63 * 62 / 2usize).div_ceil(6)));
        let g = decode(&s).unwrap();
        assert_eq!(g.vertex_count(), 63);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn decode_rejects_empty() {
        assert_eq!(decode("  ").unwrap_err(), Graph6Error::Empty);
    }

    #[test]
    fn decode_rejects_bytes_outside_alphabet() {
        assert_eq!(
            decode("B!").unwrap_err(),
            Graph6Error::InvalidByte { byte: b'!', offset: 1 }
        );
    }

    #[test]
    fn decode_rejects_short_data() {
        assert_eq!(
            decode("A").unwrap_err(),
            Graph6Error::DataLength {
                vertices: 2,
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn decode_rejects_sparse6() {
        assert_eq!(decode(":Fa@x^").unwrap_err(), Graph6Error::UnsupportedVariant);
    }

    #[test]
    fn decode_rejects_truncated_long_size() {
        assert_eq!(decode("~?").unwrap_err(), Graph6Error::TruncatedSize);
    }
}
