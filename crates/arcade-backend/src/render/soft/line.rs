//! Clipped Bresenham lines.
//!
//! The pixel at major-axis step `i` is offset on the minor axis by
//! `round_half_up(i * rise / run)`, which is what the incremental Bresenham
//! walk produces. Having it in closed form lets the walk start at the clip
//! edge instead of the segment's first endpoint, so the cost is bounded by the
//! clip rectangle no matter how far away the endpoints are.

use crate::coords::Rect;

/// Pixels of the line `p0..=p1` that fall inside `clip`, merged into
/// one-pixel-thick runs along the major axis.
pub(crate) fn spans(p0: (i32, i32), p1: (i32, i32), clip: Rect) -> Vec<Rect> {
    let mut out = Vec::new();
    if clip.is_empty() {
        return out;
    }

    let (dx, dy) = (i64::from(p1.0) - i64::from(p0.0), i64::from(p1.1) - i64::from(p0.1));
    let x_major = dx.abs() >= dy.abs();
    let (x_lo, x_hi) = (i64::from(clip.x), i64::from(clip.right()) - 1);
    let (y_lo, y_hi) = (i64::from(clip.y), i64::from(clip.bottom()) - 1);

    // (major, minor) view of the segment and the clip.
    let (a0, b0, da, db, (a_lo, a_hi), (b_lo, b_hi)) = if x_major {
        (i64::from(p0.0), i64::from(p0.1), dx, dy, (x_lo, x_hi), (y_lo, y_hi))
    } else {
        (i64::from(p0.1), i64::from(p0.0), dy, dx, (y_lo, y_hi), (x_lo, x_hi))
    };
    let (run, rise) = (da.abs(), db.abs());
    let (sa, sb) = (da.signum(), db.signum());

    let minor = |i: i64| -> i64 {
        if run == 0 {
            return 0;
        }
        let (i, rise, run) = (i128::from(i), i128::from(rise), i128::from(run));
        ((2 * i * rise + run) / (2 * run)) as i64
    };

    // Steps whose major coordinate is inside the clip.
    let (first, last) = if sa >= 0 { (a_lo - a0, a_hi - a0) } else { (a0 - a_hi, a0 - a_lo) };
    let (mut first, mut last) = (first.max(0), last.min(run));
    if first > last {
        return out;
    }

    // Minor offsets inside the clip. `minor` never decreases, so the matching
    // steps form one contiguous range.
    let (m_lo, m_hi) = if sb >= 0 { (b_lo - b0, b_hi - b0) } else { (b0 - b_hi, b0 - b_lo) };
    first = partition_point(first, last + 1, |i| minor(i) < m_lo);
    last = partition_point(first, last + 1, |i| minor(i) <= m_hi) - 1;

    let mut i = first;
    while i <= last {
        let m = minor(i);
        let mut j = i;
        while j < last && minor(j + 1) == m {
            j += 1;
        }

        let lo = (a0 + sa * i).min(a0 + sa * j) as i32;
        let len = (j - i + 1) as i32;
        let b = (b0 + sb * m) as i32;
        out.push(if x_major { Rect::new(lo, b, len, 1) } else { Rect::new(b, lo, 1, len) });
        i = j + 1;
    }
    out
}

/// First `i` in `lo..hi` for which `pred` is false; `hi` if there is none.
/// `pred` must be true for a prefix of the range and false afterwards.
fn partition_point(mut lo: i64, mut hi: i64, pred: impl Fn(i64) -> bool) -> i64 {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::{Duration, Instant};

    use super::*;

    fn pixels(spans: &[Rect]) -> BTreeSet<(i32, i32)> {
        let mut out = BTreeSet::new();
        for s in spans {
            for y in s.y..s.bottom() {
                for x in s.x..s.right() {
                    assert!(out.insert((x, y)), "pixel ({x}, {y}) emitted twice");
                }
            }
        }
        out
    }

    #[test]
    fn endpoints_are_included() {
        let lit = pixels(&spans((1, 1), (6, 4), Rect::new(0, 0, 8, 8)));
        assert!(lit.contains(&(1, 1)));
        assert!(lit.contains(&(6, 4)));
        assert_eq!(lit.len(), 6);
    }

    #[test]
    fn horizontal_line_is_one_span() {
        let s = spans((7, 0), (0, 0), Rect::new(0, 0, 8, 1));
        assert_eq!(s, vec![Rect::new(0, 0, 8, 1)]);
    }

    #[test]
    fn steep_line_walks_rows() {
        let lit = pixels(&spans((2, 0), (3, 5), Rect::new(0, 0, 8, 8)));
        assert_eq!(lit.len(), 6);
        for y in 0..=5 {
            assert_eq!(lit.iter().filter(|p| p.1 == y).count(), 1);
        }
    }

    #[test]
    fn degenerate_line_is_single_pixel() {
        assert_eq!(spans((1, 1), (1, 1), Rect::new(0, 0, 3, 3)), vec![Rect::new(1, 1, 1, 1)]);
        assert!(spans((5, 5), (5, 5), Rect::new(0, 0, 3, 3)).is_empty());
    }

    #[test]
    fn clipping_keeps_exactly_the_visible_pixels() {
        let wide = Rect::new(-100, -100, 300, 300);
        let window = Rect::new(3, 2, 5, 4);
        for &(p0, p1) in &[
            ((-20, -7), (40, 19)),
            ((40, 19), (-20, -7)),
            ((9, -30), (1, 50)),
            ((-3, 4), (12, 4)),
            ((0, 13), (13, 0)),
        ] {
            let expected: BTreeSet<_> = pixels(&spans(p0, p1, wide))
                .into_iter()
                .filter(|&(x, y)| window.contains(x, y))
                .collect();
            assert_eq!(pixels(&spans(p0, p1, window)), expected, "{p0:?} -> {p1:?}");
        }
    }

    #[test]
    fn extreme_endpoints_finish_promptly() {
        let clip = Rect::new(0, 0, 4, 4);
        let started = Instant::now();

        let diagonal = pixels(&spans((i32::MIN, i32::MIN), (i32::MAX, i32::MAX), clip));
        let across = pixels(&spans((i32::MIN, 1), (i32::MAX, 1), clip));
        let missing = spans((i32::MIN, i32::MAX), (i32::MAX, i32::MAX), clip);

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(diagonal, BTreeSet::from([(0, 0), (1, 1), (2, 2), (3, 3)]));
        assert_eq!(across, BTreeSet::from([(0, 1), (1, 1), (2, 1), (3, 1)]));
        assert!(missing.is_empty());
    }

    #[test]
    fn empty_clip_yields_nothing() {
        assert!(spans((0, 0), (3, 3), Rect::new(0, 0, 0, 4)).is_empty());
    }
}
