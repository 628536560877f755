use linea_core::{Cell, Error, Image};

use crate::fill::InteriorSet;

/// Chamfer distance-to-boundary values over an interior's bounding box.
///
/// Storage carries a one-cell margin of zeros on every side, so the value
/// of any cell outside the interior reads as `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    min_x: i32,
    min_y: i32,
    values: Image<u32>,
}

impl DistanceMap {
    fn local(&self, cell: Cell) -> Option<(usize, usize)> {
        let lx = usize::try_from(cell.x - self.min_x + 1).ok()?;
        let ly = usize::try_from(cell.y - self.min_y + 1).ok()?;
        Some((lx, ly))
    }

    /// Distance at `cell`; `0` for anything outside the interior.
    pub fn get(&self, cell: Cell) -> u32 {
        self.local(cell)
            .and_then(|(x, y)| self.values.get(x, y))
            .copied()
            .unwrap_or(0)
    }

    fn set(&mut self, cell: Cell, v: u32) {
        if let Some((x, y)) = self.local(cell)
            && let Some(slot) = self.values.get_mut(x, y)
        {
            *slot = v;
        }
    }

    pub fn max(&self) -> u32 {
        self.values.data().iter().copied().max().unwrap_or(0)
    }

    /// Local raster including the zero margin.
    pub fn values(&self) -> &Image<u32> {
        &self.values
    }
}

/// Two-pass chamfer (grassfire) transform under the Manhattan metric.
///
/// Forward pass in increasing `(x, y)` order sets each interior cell to
/// `1 + min(west, north)`; the backward pass in reverse order lowers it to
/// `1 + min(east, south)` where that is smaller. Cells outside the interior
/// count as distance 0.
pub fn chamfer_distance(interior: &InteriorSet) -> Result<DistanceMap, Error> {
    let b = interior.bounds().ok_or(Error::EmptyInput {
        stage: "chamfer_distance",
    })?;
    let width = (b.extent_x() + 3) as usize;
    let height = (b.extent_y() + 3) as usize;

    let mut map = DistanceMap {
        min_x: b.min_x,
        min_y: b.min_y,
        values: Image::new_fill(width, height, 0u32),
    };

    for &c in interior.iter() {
        let west = map.get(Cell::new(c.x - 1, c.y));
        let north = map.get(Cell::new(c.x, c.y - 1));
        map.set(c, 1 + west.min(north));
    }

    for &c in interior.iter().rev() {
        let east = map.get(Cell::new(c.x + 1, c.y));
        let south = map.get(Cell::new(c.x, c.y + 1));
        let v = map.get(c).min(1 + east.min(south));
        map.set(c, v);
    }

    Ok(map)
}
