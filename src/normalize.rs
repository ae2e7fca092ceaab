use crate::graph::{Layout, Point};

/// An axis whose values are all equal is left as it is.
pub fn normalize(layout: &Layout) -> Layout {
    let (min_x, max_x) = bounds(layout.values().map(|p| p.x));
    let (min_y, max_y) = bounds(layout.values().map(|p| p.y));

    layout
        .iter()
        .map(|(id, p)| {
            let x = rescale(p.x, min_x, max_x);
            let y = rescale(p.y, min_y, max_y);
            (id.clone(), Point::new(x, y))
        })
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() { (min, max) } else { (0.0, 1.0) }
}

fn rescale(v: f64, min: f64, max: f64) -> f64 {
    if max == min { v } else { (v - min) / (max - min) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout(points: &[(&str, f64, f64)]) -> Layout {
        points
            .iter()
            .map(|&(id, x, y)| (id.to_string(), Point::new(x, y)))
            .collect()
    }

    #[test]
    fn empty_layout_stays_empty() {
        assert!(normalize(&Layout::new()).is_empty());
    }

    #[test]
    fn axes_are_rescaled_independently() {
        let out = normalize(&layout(&[("0", -2.0, 10.0), ("1", 2.0, 30.0), ("2", 0.0, 20.0)]));
        assert_eq!(out["0"], Point::new(0.0, 0.0));
        assert_eq!(out["1"], Point::new(1.0, 1.0));
        assert_eq!(out["2"], Point::new(0.5, 0.5));
    }

    #[test]
    fn constant_axis_is_left_untouched() {
        let out = normalize(&layout(&[("0", 5.0, 1.0), ("1", 5.0, 3.0), ("2", 5.0, 2.0)]));
        for p in out.values() {
            assert_eq!(p.x, 5.0);
        }
        assert_eq!(out["0"].y, 0.0);
        assert_eq!(out["1"].y, 1.0);
        assert_eq!(out["2"].y, 0.5);
    }

    #[test]
    fn single_point_is_unchanged() {
        let out = normalize(&layout(&[("7", 3.5, -4.0)]));
        assert_eq!(out["7"], Point::new(3.5, -4.0));
    }

    #[test]
    fn output_within_unit_range() {
        let out = normalize(&layout(&[
            ("a", 0.13, -7.0),
            ("b", 99.0, 3.25),
            ("c", -42.0, 0.0),
            ("d", 12.5, 100.0),
        ]));
        for p in out.values() {
            assert!((0.0..=1.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((0.0..=1.0).contains(&p.y), "y out of range: {}", p.y);
        }
    }
}
