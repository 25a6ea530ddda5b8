//! Lazily evaluated per-vertex sequences.
//!
//! Algorithms that consume per-vertex data are written against the
//! [`Series`] trait, so they accept either a materialized `Vec` produced
//! by an earlier pass or a grid-backed adapter that computes each value
//! on demand. The adapters borrow nothing and allocate nothing; cloning
//! one copies two scalars.

use glam::Vec3;

use crate::geometry::Face;
use crate::grid::Grid;

/// A fixed-length, indexable sequence of per-vertex values.
pub trait Series {
    type Item;

    /// Number of elements, always the grid's vertex count for adapters.
    fn len(&self) -> usize;

    /// Value at a vertex id. Panics on out-of-range ids in debug builds,
    /// like slice indexing.
    fn get(&self, index: usize) -> Self::Item;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates values in vertex-id order.
    fn iter(&self) -> SeriesIter<'_, Self>
    where
        Self: Sized,
    {
        SeriesIter {
            series: self,
            index: 0,
        }
    }

    /// Materializes the sequence, paying the evaluation cost once.
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        self.iter().collect()
    }
}

impl<T: Clone> Series for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T: Clone> Series for &[T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> T {
        self[index].clone()
    }
}

/// Iterator over any sized [`Series`].
pub struct SeriesIter<'a, S: Series> {
    series: &'a S,
    index: usize,
}

impl<S: Series> Iterator for SeriesIter<'_, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.index < self.series.len() {
            let value = self.series.get(self.index);
            self.index += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.series.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<S: Series> ExactSizeIterator for SeriesIter<'_, S> {}

macro_rules! grid_series {
    ($(#[$doc:meta])* $name:ident, $item:ty, $method:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            grid: Grid,
        }

        impl $name {
            pub(crate) fn new(grid: Grid) -> Self {
                Self { grid }
            }
        }

        impl Series for $name {
            type Item = $item;

            fn len(&self) -> usize {
                self.grid.vertex_count()
            }

            fn get(&self, index: usize) -> $item {
                debug_assert!(index < self.len());
                self.grid.$method(index)
            }
        }
    };
}

grid_series!(
    /// Vertex positions, evaluated on demand.
    VertexPositions,
    Vec3,
    vertex_position
);
grid_series!(
    /// Vertex surface normals, evaluated on demand.
    VertexNormals,
    Vec3,
    vertex_normal
);
grid_series!(
    /// Dual-cell areas, evaluated on demand.
    VertexDualAreas,
    f32,
    vertex_dual_area
);
grid_series!(
    /// Vertex faces, evaluated on demand.
    VertexFaces,
    Face,
    vertex_face
);

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_areas<S: Series<Item = f32>>(areas: &S) -> f64 {
        areas.iter().map(|a| a as f64).sum()
    }

    #[test]
    fn test_adapter_matches_direct_queries() {
        let grid = Grid::new(2.0, 6).unwrap();
        let positions = grid.vertex_positions();
        assert_eq!(positions.len(), grid.vertex_count());
        for v in 0..grid.vertex_count() {
            assert_eq!(positions.get(v), grid.vertex_position(v));
        }
    }

    #[test]
    fn test_vec_and_adapter_interchangeable() {
        // The same generic algorithm accepts a lazy adapter and a
        // materialized Vec and produces identical results.
        let grid = Grid::new(1.0, 5).unwrap();
        let lazy = grid.vertex_dual_areas();
        let materialized = lazy.to_vec();

        let from_lazy = sum_areas(&lazy);
        let from_vec = sum_areas(&materialized);
        assert_eq!(from_lazy, from_vec);
        assert!(from_lazy > 0.0);
    }

    #[test]
    fn test_iter_length_and_order() {
        let grid = Grid::new(1.0, 3).unwrap();
        let faces = grid.vertex_faces();
        let collected: Vec<Face> = faces.iter().collect();
        assert_eq!(collected.len(), 54);
        assert_eq!(collected[0], grid.vertex_face(0));
        assert_eq!(collected[53], grid.vertex_face(53));
        assert_eq!(faces.iter().len(), 54);
    }

    #[test]
    fn test_slice_series() {
        let values = [1.0f32, 2.0, 3.0];
        let series: &[f32] = &values;
        assert_eq!(Series::len(&series), 3);
        assert_eq!(Series::get(&series, 1), 2.0);
        assert!(!Series::is_empty(&series));
    }
}
