use std::collections::HashSet;

use linea_core::Cell;
use linea_interior::InteriorSet;

/// Cells already spoken for by an alignment mark, accumulated across the
/// layers of one stack.
///
/// A region gets marks only if none of its cells were claimed before, so a
/// region sitting on top of an already-marked one reuses those marks.
#[derive(Debug, Clone, Default)]
pub struct AlignmentRegistry {
    used: HashSet<Cell>,
}

impl AlignmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs `interior` and returns `true` when it shares no cell with
    /// anything claimed so far. On overlap nothing changes.
    pub fn claim(&mut self, interior: &InteriorSet) -> bool {
        if interior.iter().any(|c| self.used.contains(c)) {
            return false;
        }
        self.used.extend(interior.iter().copied());
        true
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use linea_core::Cell;
    use linea_interior::InteriorSet;

    use super::AlignmentRegistry;

    fn row(y: i32, xs: std::ops::Range<i32>) -> InteriorSet {
        xs.map(|x| Cell::new(x, y)).collect()
    }

    #[test]
    fn disjoint_sets_are_claimed() {
        let mut reg = AlignmentRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.claim(&row(0, 0..3)));
        assert!(reg.claim(&row(1, 0..3)));
        assert_eq!(reg.len(), 6);
    }

    #[test]
    fn overlap_is_refused_without_side_effects() {
        let mut reg = AlignmentRegistry::new();
        assert!(reg.claim(&row(0, 0..3)));
        assert!(!reg.claim(&row(0, 2..6)));
        assert_eq!(reg.len(), 3);

        assert!(reg.claim(&row(0, 3..6)));
        assert_eq!(reg.len(), 6);
    }
}
