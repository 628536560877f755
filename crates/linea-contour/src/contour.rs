use linea_core::{Bounds, Cell, HalfPoint, LatticePoint, Polyline2f};

use crate::edge::Edge;

/// Closed boundary loop as three parallel sequences, one entry per traversed
/// edge plus the repeated first entry.
///
/// - `corners`: edge start points, the true polygon vertices.
/// - `midpoints`: edge midpoints, a smoother alternative vertex set.
/// - `pixels`: the foreground cell owning each edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    pub corners: Vec<LatticePoint>,
    pub midpoints: Vec<HalfPoint>,
    pub pixels: Vec<Cell>,
}

impl Contour {
    pub(crate) fn starting_with(edge: &Edge) -> Self {
        let mut c = Self::default();
        c.push(edge);
        c
    }

    pub(crate) fn push(&mut self, edge: &Edge) {
        self.corners.push(edge.src);
        self.midpoints.push(edge.midpoint());
        self.pixels.push(edge.pixel);
    }

    pub(crate) fn close(&mut self) {
        if let (Some(&c), Some(&m), Some(&p)) = (
            self.corners.first(),
            self.midpoints.first(),
            self.pixels.first(),
        ) {
            self.corners.push(c);
            self.midpoints.push(m);
            self.pixels.push(p);
        }
    }

    /// Sequence length, i.e. edges + 1 for a closed loop.
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.corners.len().saturating_sub(1)
    }

    pub fn is_closed(&self) -> bool {
        self.corners.len() >= 2
            && self.corners.len() == self.midpoints.len()
            && self.corners.len() == self.pixels.len()
            && self.corners.first() == self.corners.last()
            && self.midpoints.first() == self.midpoints.last()
            && self.pixels.first() == self.pixels.last()
    }

    /// Bounding box of the owner pixels, used for minimum-feature filtering.
    pub fn pixel_bounds(&self) -> Option<Bounds> {
        Bounds::of_cells(&self.pixels)
    }

    /// Bounding box of the lattice corners, one wider than the pixel box.
    pub fn corner_bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.corners)
    }

    /// Twice the signed shoelace area of `corners`.
    ///
    /// Boundaries of foreground regions come out negative, hole boundaries
    /// positive.
    pub fn signed_area2(&self) -> i64 {
        self.corners
            .windows(2)
            .map(|w| {
                let (p, q) = (w[0], w[1]);
                p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64
            })
            .sum()
    }

    pub fn is_hole(&self) -> bool {
        self.signed_area2() > 0
    }

    /// Closed corner sequence with collinear runs collapsed to their end
    /// points.
    pub fn vertices(&self) -> Vec<LatticePoint> {
        let ring = match self.corners.split_last() {
            Some((_, ring)) if ring.len() >= 3 => ring,
            _ => return self.corners.clone(),
        };

        let n = ring.len();
        let mut out: Vec<LatticePoint> = (0..n)
            .filter(|&i| {
                let prev = ring[(i + n - 1) % n];
                let cur = ring[i];
                let next = ring[(i + 1) % n];
                step(prev, cur) != step(cur, next)
            })
            .map(|i| ring[i])
            .collect();

        match out.first() {
            Some(&first) => out.push(first),
            None => return self.corners.clone(),
        }
        out
    }

    pub fn corner_polyline(&self) -> Polyline2f {
        Polyline2f {
            points: self.corners.iter().map(|p| p.to_point2f()).collect(),
        }
    }

    pub fn midpoint_polyline(&self) -> Polyline2f {
        Polyline2f {
            points: self.midpoints.iter().map(|p| p.to_point2f()).collect(),
        }
    }
}

#[inline]
fn step(a: LatticePoint, b: LatticePoint) -> (i32, i32) {
    ((b.x - a.x).signum(), (b.y - a.y).signum())
}

#[cfg(test)]
mod tests {
    use linea_core::{Bounds, Cell, LatticePoint, Point2f};

    use super::Contour;
    use crate::edge::Edge;

    fn unit_square() -> Contour {
        let pts = [(0, 0), (0, 1), (1, 1), (1, 0)];
        let mut c = Contour::default();
        for i in 0..4 {
            let (s, d) = (pts[i], pts[(i + 1) % 4]);
            c.push(&Edge {
                src: LatticePoint::new(s.0, s.1),
                dst: LatticePoint::new(d.0, d.1),
                pixel: Cell::new(0, 0),
            });
        }
        c.close();
        c
    }

    #[test]
    fn close_repeats_first_entries() {
        let c = unit_square();
        assert_eq!(c.len(), 5);
        assert_eq!(c.num_edges(), 4);
        assert!(c.is_closed());
        assert!(!Contour::default().is_closed());
    }

    #[test]
    fn foreground_cell_winding_is_negative() {
        let c = unit_square();
        assert_eq!(c.signed_area2(), -2);
        assert!(!c.is_hole());
    }

    #[test]
    fn corner_box_extends_pixel_box() {
        let c = unit_square();
        assert_eq!(
            c.pixel_bounds(),
            Some(Bounds { min_x: 0, min_y: 0, max_x: 0, max_y: 0 })
        );
        assert_eq!(
            c.corner_bounds(),
            Some(Bounds { min_x: 0, min_y: 0, max_x: 1, max_y: 1 })
        );
        assert_eq!(Contour::default().corner_bounds(), None);
    }

    #[test]
    fn vertices_of_square_are_its_corners() {
        let c = unit_square();
        assert_eq!(c.vertices(), c.corners);
    }

    #[test]
    fn polylines_convert_at_output_boundary() {
        let c = unit_square();
        let mids = c.midpoint_polyline();

        assert_eq!(mids.points.len(), 5);
        assert_eq!(mids.points[0], Point2f { x: 0.0, y: 0.5 });
        assert_eq!(c.corner_polyline().points[2], Point2f { x: 1.0, y: 1.0 });
    }
}
