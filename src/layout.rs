use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::graph::{Graph, Layout, Point};
use crate::normalize::normalize;

const MIN_DISTANCE: f64 = 0.01;
const INITIAL_TEMPERATURE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutAlgorithm {
    /// Fruchterman-Reingold, seeded from the circular placement so results are reproducible.
    Spring { iterations: usize },
    Circular,
}

impl Default for LayoutAlgorithm {
    fn default() -> Self {
        LayoutAlgorithm::Spring { iterations: 50 }
    }
}

/// Places every vertex of `graph` inside [-1, 1] x [-1, 1], centred on the origin.
pub fn compute(graph: &Graph, algorithm: LayoutAlgorithm) -> Layout {
    let n = graph.vertex_count();
    if n == 0 {
        return Layout::new();
    }
    if n == 1 {
        let id = graph.vertices()[0].id.clone();
        return Layout::from([(id, Point::new(0.0, 0.0))]);
    }

    let mut positions = circular(n);
    if let LayoutAlgorithm::Spring { iterations } = algorithm {
        let index: HashMap<&str, usize> = graph
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.as_str(), i))
            .collect();
        let edges: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .filter_map(|e| Some((*index.get(e.from.as_str())?, *index.get(e.to.as_str())?)))
            .filter(|(a, b)| a != b)
            .collect();
        spring(&mut positions, &edges, iterations);
    }
    rescale(&mut positions);

    graph
        .vertices()
        .iter()
        .zip(positions)
        .map(|(v, p)| (v.id.clone(), p))
        .collect()
}

/// `None` unless every vertex carries a position.
pub fn from_coordinates(graph: &Graph) -> Option<Layout> {
    let raw = graph
        .vertices()
        .iter()
        .map(|v| v.position.map(|p| (v.id.clone(), p)))
        .collect::<Option<Layout>>()?;
    Some(normalize(&raw))
}

fn circular(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            Point::new(theta.cos(), theta.sin())
        })
        .collect()
}

fn spring(positions: &mut [Point], edges: &[(usize, usize)], iterations: usize) {
    let n = positions.len();
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = INITIAL_TEMPERATURE;
    let cooling = INITIAL_TEMPERATURE / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut disp = vec![Point::new(0.0, 0.0); n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let force = k * k / dist;
                disp[i].x += dx / dist * force;
                disp[i].y += dy / dist * force;
            }
        }

        for &(a, b) in edges {
            let dx = positions[a].x - positions[b].x;
            let dy = positions[a].y - positions[b].y;
            let dist = dx.hypot(dy).max(MIN_DISTANCE);
            let force = dist * dist / k;
            disp[a].x -= dx / dist * force;
            disp[a].y -= dy / dist * force;
            disp[b].x += dx / dist * force;
            disp[b].y += dy / dist * force;
        }

        for (p, d) in positions.iter_mut().zip(&disp) {
            let len = d.x.hypot(d.y).max(MIN_DISTANCE);
            let step = len.min(temperature);
            p.x += d.x / len * step;
            p.y += d.y / len * step;
        }
        temperature -= cooling;
    }
}

fn rescale(positions: &mut [Point]) {
    let n = positions.len() as f64;
    let cx = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = positions.iter().map(|p| p.y).sum::<f64>() / n;
    for p in positions.iter_mut() {
        p.x -= cx;
        p.y -= cy;
    }
    let lim = positions
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    if lim > 0.0 {
        for p in positions.iter_mut() {
            p.x /= lim;
            p.y /= lim;
        }
    }
}
