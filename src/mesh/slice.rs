//! Triangle/triangle slicing.
//!
//! A triangle `p` is cut against a cutter `q`. Coplanar cutters clip `p` with
//! the lines through each of `q`'s three edges in turn; non-coplanar cutters
//! clip `p` with the line where the two planes meet. Either way a single cut is
//! one of three shapes, tried in this order:
//!
//! - the line runs along one of `p`'s edges: no cut;
//! - the line passes through one vertex and across the opposite edge: 2 pieces;
//! - the line crosses two edges strictly inside them: 3 pieces fanned from the
//!   vertex those two edges do not share.
//!
//! Fragments keep the winding of the source triangle.

use crate::errors::CsgError;
use crate::mesh::line::{Line, LineIntersection, line_intersection};
use crate::mesh::plane::plane_intersection;
use crate::mesh::triangle::Triangle;
use crate::mesh::vector::Vector;
use crate::rational_types::Rational;
use tracing::{debug, warn};

/// Result of cutting one triangle.
#[derive(Debug, Clone, PartialEq)]
pub enum Cut {
    /// No real cut: keep the source triangle whole.
    Unchanged,
    /// The source triangle is replaced by these fragments.
    Pieces(Vec<Triangle>),
}

fn intersect_edges(p: &Triangle, line: &Line) -> [LineIntersection; 3] {
    [0, 1, 2].map(|i| line_intersection(&p.edge(i), line))
}

/// The cut enters at the end of edge `i` and leaves at the start of edge
/// `i + 2`, i.e. it runs exactly along edge `i + 1`.
fn runs_along_edge(hits: &[LineIntersection; 3]) -> bool {
    (0..3).any(|i| {
        let j = (i + 2) % 3;
        hits[i].at_end_of_first() && hits[j].at_start_of_first()
    })
}

fn distinct_crossings(hits: &[LineIntersection; 3]) -> usize {
    let mut points: Vec<&Vector> = Vec::with_capacity(3);
    for hit in hits.iter().filter(|h| h.crosses_first()) {
        if let Some(point) = &hit.point {
            if !points.contains(&point) {
                points.push(point);
            }
        }
    }
    points.len()
}

fn keep_valid(candidates: Vec<Triangle>) -> Cut {
    let pieces: Vec<Triangle> = candidates.into_iter().filter(Triangle::is_valid).collect();
    if pieces.is_empty() { Cut::Unchanged } else { Cut::Pieces(pieces) }
}

/// Split `p` along a cutting line, given the line's intersection with each of
/// `p`'s edges (`hits[i]` is edge `i` against the line, edge first).
pub fn cut_triangle_by_line(p: &Triangle, hits: &[LineIntersection; 3]) -> Cut {
    if runs_along_edge(hits) {
        return Cut::Unchanged;
    }

    // Grazing a single vertex (or not touching at all) does not divide the area.
    if distinct_crossings(hits) < 2 {
        return Cut::Unchanged;
    }

    // Through vertex j and across the opposite edge k.
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        if hits[i].at_end_of_first() && hits[j].at_start_of_first() && hits[k].strictly_inside_first() {
            if let Some(extra) = &hits[k].point {
                return keep_valid(vec![
                    Triangle::new(p.point(j).clone(), p.point(k).clone(), extra.clone()),
                    Triangle::new(extra.clone(), p.point(i).clone(), p.point(j).clone()),
                ]);
            }
        }
    }

    // Across edges i and i + 1, which share vertex i + 1.
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        if hits[i].strictly_inside_first() && hits[j].strictly_inside_first() {
            if let (Some(x), Some(y)) = (&hits[i].point, &hits[j].point) {
                return keep_valid(vec![
                    Triangle::new(x.clone(), p.point(j).clone(), y.clone()),
                    Triangle::new(p.point(i).clone(), x.clone(), y.clone()),
                    Triangle::new(p.point(i).clone(), y.clone(), p.point(k).clone()),
                ]);
            }
        }
    }

    if cfg!(debug_assertions) {
        panic!("cut of {p} matched no case");
    }
    warn!(triangle = %p, "cut matched no case, keeping source triangle");
    Cut::Unchanged
}

/// Cut `p` by the infinite line through the coplanar edge `q_edge`.
pub fn slice_triangle_by_edge(p: &Triangle, q_edge: &Line) -> Cut {
    let hits = intersect_edges(p, q_edge);
    if !hits.iter().any(LineIntersection::crosses_first) {
        return Cut::Unchanged;
    }
    cut_triangle_by_line(p, &hits)
}

/// Cut `p` by each edge line of the coplanar triangle `q` in sequence.
///
/// `p` is left alone when it does not overlap `q` or lies entirely inside it;
/// in the latter case the opposite slicing pass cuts `q` instead.
pub fn slice_triangle_coplanar(p: &Triangle, q: &Triangle) -> Result<Cut, CsgError> {
    if !p.overlaps(q)? || q.contains(p)? {
        return Ok(Cut::Unchanged);
    }

    let mut fragments = vec![p.clone()];
    for i in 0..3 {
        let q_edge = q.edge(i);
        let mut next = Vec::with_capacity(fragments.len() + 2);
        for fragment in fragments {
            match slice_triangle_by_edge(&fragment, &q_edge) {
                Cut::Unchanged => next.push(fragment),
                Cut::Pieces(pieces) => next.extend(pieces),
            }
        }
        fragments = next;
    }
    Ok(Cut::Pieces(fragments))
}

/// Parameter range `(lo, hi)` along the cutting line covered by a triangle,
/// taken from the points where its edges cross the line.
fn chord(hits: &[LineIntersection; 3]) -> Option<(&Rational, &Rational)> {
    let mut params = hits.iter().filter(|h| h.crosses_first()).map(|h| &h.t[1]);
    let first = params.next()?;
    Some(params.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}

/// Cut `p` by the line where its plane meets the plane of the non-parallel `q`,
/// provided the stretch of that line inside `q` overlaps the stretch inside `p`
/// over more than a single point.
pub fn slice_triangle_noncoplanar(p: &Triangle, q: &Triangle) -> Result<Cut, CsgError> {
    let cut_line = plane_intersection(p.plane(), q.plane())?;

    let q_hits = intersect_edges(q, &cut_line);
    if runs_along_edge(&q_hits) {
        return Ok(Cut::Unchanged);
    }
    let p_hits = intersect_edges(p, &cut_line);

    let (Some((q_lo, q_hi)), Some((p_lo, p_hi))) = (chord(&q_hits), chord(&p_hits)) else {
        return Ok(Cut::Unchanged);
    };
    if q_lo.max(p_lo) >= q_hi.min(p_hi) {
        return Ok(Cut::Unchanged);
    }
    Ok(cut_triangle_by_line(p, &p_hits))
}

/// Fragments of `p` after cutting it by `q`; `[p]` when `q` does not cut it.
///
/// # Errors
/// [`CsgError::DegenerateTriangle`] if either triangle is degenerate.
pub fn slice_triangle(p: &Triangle, q: &Triangle) -> Result<Vec<Triangle>, CsgError> {
    if !p.is_valid() || !q.is_valid() {
        return Err(CsgError::DegenerateTriangle);
    }
    let cut = if p.parallel_to(q) {
        if p.coplanar_with(q) { slice_triangle_coplanar(p, q)? } else { Cut::Unchanged }
    } else {
        slice_triangle_noncoplanar(p, q)?
    };
    Ok(match cut {
        Cut::Unchanged => vec![p.clone()],
        Cut::Pieces(pieces) => pieces,
    })
}

/// Slice every triangle of `a` by every triangle of `b`.
///
/// Each source triangle starts as a one-element fragment list; every cutter in
/// `b` is applied to every fragment produced so far.
pub fn slice_triangles(a: &[Triangle], b: &[Triangle]) -> Result<Vec<Triangle>, CsgError> {
    let mut result = Vec::with_capacity(a.len());
    for source in a {
        let mut fragments = vec![source.clone()];
        for cutter in b {
            let mut next = Vec::with_capacity(fragments.len());
            for fragment in &fragments {
                next.extend(slice_triangle(fragment, cutter)?);
            }
            fragments = next;
        }
        result.extend(fragments);
    }
    debug!(sources = a.len(), cutters = b.len(), fragments = result.len(), "sliced triangle list");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational_types::integer;

    fn tri(a: (i64, i64, i64), b: (i64, i64, i64), c: (i64, i64, i64)) -> Triangle {
        Triangle::new(
            Vector::point_i64(a.0, a.1, a.2),
            Vector::point_i64(b.0, b.1, b.2),
            Vector::point_i64(c.0, c.1, c.2),
        )
    }

    fn normal_z_sum(pieces: &[Triangle]) -> Rational {
        pieces.iter().fold(integer(0), |total, t| total + t.normal().z())
    }

    /// Vertical triangle spanning the plane x = 1 around z = 0.
    fn wall() -> Triangle {
        tri((1, -1, -1), (1, 3, -1), (1, 1, 2))
    }

    #[test]
    fn two_edge_cut_on_leading_edges() {
        let p = tri((0, 0, 0), (2, 0, 0), (0, 2, 0));
        let pieces = slice_triangle(&p, &wall()).unwrap();
        assert_eq!(pieces.len(), 3);
        assert!(pieces.iter().all(|t| t.is_valid() && t.normal().z() > &integer(0)));
        assert_eq!(normal_z_sum(&pieces), integer(4));
        assert!(pieces.iter().any(|t| t.points().contains(&Vector::point_i64(1, 0, 0))));
        assert!(pieces.iter().any(|t| t.points().contains(&Vector::point_i64(1, 1, 0))));
    }

    #[test]
    fn two_edge_cut_on_trailing_edges_keeps_winding() {
        // Same triangle, vertices rotated so the cut lands on edges 1 and 2.
        let p = tri((0, 2, 0), (0, 0, 0), (2, 0, 0));
        let pieces = slice_triangle(&p, &wall()).unwrap();
        assert_eq!(pieces.len(), 3);
        assert!(pieces.iter().all(|t| t.normal().z() > &integer(0)));
        assert_eq!(normal_z_sum(&pieces), integer(4));
    }

    #[test]
    fn two_edge_cut_wrapping_from_last_edge_to_first() {
        // Cut lands on edges 2 and 0, fanned from vertex 2.
        let p = tri((2, 0, 0), (0, 2, 0), (0, 0, 0));
        let pieces = slice_triangle(&p, &wall()).unwrap();
        assert_eq!(pieces.len(), 3);
        assert!(pieces.iter().all(|t| t.is_valid() && t.normal().z() > &integer(0)));
        assert_eq!(normal_z_sum(&pieces), p.normal().z().clone());
    }

    #[test]
    fn cutter_whose_line_misses_p_inside_q_does_not_cut() {
        // The plane line x = 1, z = 0 crosses both triangles, but at y in [10, 12]
        // for q and y in [0, 3] for p.
        let p = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let q = tri((1, 10, -1), (1, 12, -1), (1, 11, 2));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p]);
    }

    #[test]
    fn chords_meeting_at_one_point_do_not_cut() {
        let p = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let q = tri((1, 3, 0), (1, 7, -2), (1, 7, 2));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p]);
    }

    #[test]
    fn vertex_and_opposite_edge_cut() {
        let p = tri((0, 0, 0), (2, 0, 0), (1, 2, 0));
        let pieces = slice_triangle(&p, &wall()).unwrap();
        assert_eq!(pieces.len(), 2);
        assert!(pieces.iter().all(|t| t.normal().z() == &integer(2)));
    }

    #[test]
    fn far_cutter_leaves_triangle_unchanged() {
        let p = tri((0, 0, 0), (2, 0, 0), (0, 2, 0));
        let q = tri((5, -1, -1), (5, 3, -1), (5, 1, 2));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p]);
    }

    #[test]
    fn cutter_touching_only_a_vertex_does_not_cut() {
        let p = tri((0, 0, 0), (2, 0, 0), (0, 2, 0));
        let q = tri((2, -1, -1), (2, 3, -1), (2, 1, 2));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p]);
    }

    #[test]
    fn cut_along_an_edge_is_no_cut() {
        let p = tri((0, 0, 0), (2, 0, 0), (0, 2, 0));
        let q = tri((0, -1, -1), (0, 3, -1), (0, 1, 2));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p]);
    }

    #[test]
    fn parallel_offset_triangle_is_ignored() {
        let p = tri((0, 0, 0), (2, 0, 0), (0, 2, 0));
        let q = tri((0, 0, 1), (2, 0, 1), (0, 2, 1));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p]);
    }

    #[test]
    fn coplanar_container_leaves_triangle_unchanged() {
        let p = tri((1, 1, 0), (2, 1, 0), (1, 2, 0));
        let q = tri((0, 0, 0), (6, 0, 0), (0, 6, 0));
        assert_eq!(slice_triangle(&p, &q).unwrap(), vec![p.clone()]);
        assert_eq!(slice_triangle(&p, &p).unwrap(), vec![p]);
    }

    #[test]
    fn coplanar_partial_overlap_is_cut() {
        let p = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let q = tri((1, -1, 0), (5, -1, 0), (1, 3, 0));
        let pieces = slice_triangle(&p, &q).unwrap();
        assert!(pieces.len() > 1);
        assert!(pieces.iter().all(|t| t.normal().z() > &integer(0)));
        assert_eq!(normal_z_sum(&pieces), p.normal().z().clone());
    }

    #[test]
    fn degenerate_input_is_rejected() {
        let p = tri((0, 0, 0), (1, 1, 1), (2, 2, 2));
        let q = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        assert_eq!(slice_triangle(&p, &q), Err(CsgError::DegenerateTriangle));
        assert_eq!(slice_triangle(&q, &p), Err(CsgError::DegenerateTriangle));
    }

    #[test]
    fn mesh_slicing_applies_every_cutter() {
        let p = tri((0, 0, 0), (4, 0, 0), (0, 4, 0));
        let cutters = [tri((1, -1, -1), (1, 9, -1), (1, 4, 2)), tri((-1, 1, -1), (9, 1, -1), (4, 1, 2))];
        let fragments = slice_triangles(&[p.clone()], &cutters).unwrap();
        assert!(fragments.len() > 3);
        assert_eq!(normal_z_sum(&fragments), p.normal().z().clone());
    }
}
