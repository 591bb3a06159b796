//! Reservoir connectivity.
//!
//! A well draws from every site connected to it through orthogonal steps over
//! the same oil depth. The size of that component is the volume the reservoir
//! holds, and every well in it shares the same pressure.

use crate::field::Field;
use std::collections::BTreeSet;

impl Field {
    /// In-bounds orthogonal neighbours in the order north, west, east, south.
    pub fn neighbors(&self, site: usize) -> impl Iterator<Item = usize> {
        assert!(
            self.contains(site),
            "site {site} outside {}x{} field",
            self.height,
            self.width
        );
        let (y, x) = (site / self.width, site % self.width);
        let width = self.width;
        [
            (y > 0).then(|| site - width),
            (x > 0).then(|| site - 1),
            (x + 1 < width).then(|| site + 1),
            (y + 1 < self.height).then(|| site + width),
        ]
        .into_iter()
        .flatten()
    }

    /// Sites of the reservoir a well at `site` would draw from.
    ///
    /// Dry sites have no reservoir and return an empty set.
    pub fn reservoir(&self, site: usize) -> BTreeSet<usize> {
        let depth = self.oil[site];
        let mut sites = BTreeSet::new();
        if depth == 0 {
            return sites;
        }

        let mut visited = vec![false; self.len()];
        let mut frontier = vec![site];
        visited[site] = true;

        while let Some(cur) = frontier.pop() {
            if self.oil[cur] != depth {
                continue;
            }
            sites.insert(cur);
            for nbr in self.neighbors(cur) {
                if !visited[nbr] {
                    visited[nbr] = true;
                    frontier.push(nbr);
                }
            }
        }
        sites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with_oil(height: usize, width: usize, oil: Vec<u32>) -> Field {
        let n = height * width;
        Field::from_grids(height, width, vec![50; n], vec![10; n], oil, vec![100; n])
            .expect("valid test field")
    }

    fn set(sites: &[usize]) -> BTreeSet<usize> {
        sites.iter().copied().collect()
    }

    #[test]
    fn test_neighbors_order_and_count() {
        let field = field_with_oil(3, 3, vec![0; 9]);
        assert_eq!(field.neighbors(4).collect::<Vec<_>>(), vec![1, 3, 5, 7]);
        assert_eq!(field.neighbors(0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(field.neighbors(2).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(field.neighbors(6).collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(field.neighbors(8).collect::<Vec<_>>(), vec![5, 7]);
        for edge in [1, 3, 5, 7] {
            assert_eq!(field.neighbors(edge).count(), 3, "edge site {edge}");
        }
        assert_eq!(field.neighbors(1).collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(field.neighbors(7).collect::<Vec<_>>(), vec![4, 6, 8]);
    }

    #[test]
    fn test_neighbors_wide_field() {
        let field = field_with_oil(24, 80, vec![0; 24 * 80]);
        assert_eq!(field.neighbors(120).collect::<Vec<_>>(), vec![40, 119, 121, 200]);
    }

    #[test]
    #[should_panic]
    fn test_neighbors_out_of_bounds_panics() {
        let field = field_with_oil(3, 3, vec![0; 9]);
        let _ = field.neighbors(9).count();
    }

    #[test]
    fn test_dry_field_has_no_reservoirs() {
        let field = field_with_oil(3, 3, vec![0; 9]);
        for site in 0..9 {
            assert!(field.reservoir(site).is_empty());
        }
    }

    #[test]
    fn test_cross_reservoir() {
        let field = field_with_oil(3, 3, vec![0, 1, 0, 1, 1, 1, 0, 1, 0]);
        let cross = set(&[1, 3, 4, 5, 7]);
        for site in [1, 3, 4, 5, 7] {
            assert_eq!(field.reservoir(site), cross, "site {site}");
        }
        for site in [0, 2, 6, 8] {
            assert!(field.reservoir(site).is_empty(), "site {site}");
        }
    }

    #[test]
    fn test_layered_reservoirs() {
        let field = field_with_oil(3, 3, vec![1, 1, 1, 2, 1, 2, 3, 3, 3]);
        assert_eq!(field.reservoir(3), set(&[3]));
        assert_eq!(field.reservoir(5), set(&[5]));
        assert_eq!(field.reservoir(0), set(&[0, 1, 2, 4]));
        assert_eq!(field.reservoir(4), set(&[0, 1, 2, 4]));
        assert_eq!(field.reservoir(6), set(&[6, 7, 8]));
    }

    #[test]
    fn test_reservoir_on_wide_field() {
        let mut oil = vec![0; 24 * 80];
        for site in [118, 119, 120, 121, 122, 40, 200] {
            oil[site] = 6;
        }
        // Same depth but not connected.
        oil[300] = 6;
        let field = field_with_oil(24, 80, oil);
        assert_eq!(field.reservoir(120), set(&[40, 118, 119, 120, 121, 122, 200]));
        assert_eq!(field.reservoir(300), set(&[300]));
    }
}
