use linea_core::{Error, Grid};
use log::debug;

use crate::build::build_edges;
use crate::contour::Contour;
use crate::edge::{EdgeId, EdgeSet};

const VACANT: usize = usize::MAX;

/// Unconsumed edge ids with O(1) removal.
///
/// `slot[id]` is the position of `id` in `remaining`, or `VACANT` once the
/// edge has been consumed. [`EdgePool::pop`] always hands out the last
/// remaining id, so tracing order is deterministic.
#[derive(Debug, Clone)]
pub struct EdgePool {
    remaining: Vec<EdgeId>,
    slot: Vec<usize>,
}

impl EdgePool {
    pub fn full(len: usize) -> Self {
        Self {
            remaining: (0..len).collect(),
            slot: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: EdgeId) -> bool {
        self.slot.get(id).is_some_and(|&s| s != VACANT)
    }

    /// Returns `false` if `id` was already consumed.
    pub fn remove(&mut self, id: EdgeId) -> bool {
        if !self.contains(id) {
            return false;
        }

        let pos = self.slot[id];
        self.remaining.swap_remove(pos);
        if let Some(&moved) = self.remaining.get(pos) {
            self.slot[moved] = pos;
        }
        self.slot[id] = VACANT;
        true
    }

    pub fn pop(&mut self) -> Option<EdgeId> {
        let id = *self.remaining.last()?;
        self.remove(id);
        Some(id)
    }
}

/// The edge that follows `id` along its boundary.
///
/// Out-edges at the end point of `id` are looked up regardless of whether
/// they were consumed. Where two leave the same point (a saddle, two
/// foreground cells meeting at one corner) the one owned by the same pixel
/// as `id` wins. Successors therefore form a fixed permutation of the edge
/// set and every loop is one of its cycles.
fn successor(set: &EdgeSet, id: EdgeId, out: &mut Vec<EdgeId>) -> Result<EdgeId, Error> {
    let arriving = set.edge(id);
    let point = arriving.dst;

    out.clear();
    out.extend(
        set.incident(point)
            .iter()
            .copied()
            .filter(|&c| set.edge(c).src == point),
    );
    if out.len() > 1 {
        out.retain(|&c| set.edge(c).pixel == arriving.pixel);
    }

    match out.as_slice() {
        &[next] => Ok(next),
        other => Err(Error::AmbiguousJunction {
            point,
            candidates: other.len(),
        }),
    }
}

/// Assembles every edge of `set` into closed loops. Outer boundaries and
/// holes come out alike; see [`Contour::is_hole`].
///
/// A loop is closed when the walk returns to its first edge, not merely to
/// its first point, so the start edge only rotates a loop and never changes
/// how many loops there are or which edges they hold.
///
/// At a saddle the walk turns around the corner of the foreground pixel it
/// is following. Foreground cells touching only diagonally trace as separate
/// loops. Background cells touching only diagonally are joined: two such
/// holes come out as one hole loop that visits the shared corner twice, and
/// a hole touching the outside diagonally becomes part of the outer loop.
/// Such loops are closed but not simple.
///
/// A point with zero or several continuations, or a continuation already
/// used by another loop, means the edge set is not a boundary of a padded
/// grid and [`Error::AmbiguousJunction`] is returned.
pub fn trace_contours(set: &EdgeSet) -> Result<Vec<Contour>, Error> {
    let mut pool = EdgePool::full(set.len());
    let mut contours = Vec::new();
    let mut out: Vec<EdgeId> = Vec::with_capacity(4);

    while let Some(first) = pool.pop() {
        let start = set.edge(first).src;
        let mut contour = Contour::starting_with(set.edge(first));
        let mut current = first;

        loop {
            let next = successor(set, current, &mut out)?;
            if next == first {
                break;
            }
            if !pool.remove(next) {
                return Err(Error::AmbiguousJunction {
                    point: set.edge(current).dst,
                    candidates: 0,
                });
            }
            contour.push(set.edge(next));
            current = next;
        }

        contour.close();
        debug!(
            "traced contour of {} edges from ({}, {})",
            contour.num_edges(),
            start.x,
            start.y
        );
        contours.push(contour);
    }

    debug!(
        "traced {} contours from {} edges",
        contours.len(),
        set.len()
    );
    Ok(contours)
}

/// [`build_edges`] followed by [`trace_contours`].
pub fn contours(grid: &Grid) -> Result<Vec<Contour>, Error> {
    trace_contours(&build_edges(grid))
}
