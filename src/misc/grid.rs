use itertools::iproduct;

/// Linear index of the control point at (u, v) in a v-fastest grid
pub fn grid_index(u: usize, v: usize, count_v: usize) -> usize {
    v + count_v * u
}

/// (u, v) indices of a linear index in a v-fastest grid
pub fn grid_coordinates(index: usize, count_v: usize) -> (usize, usize) {
    (index / count_v, index % count_v)
}

/// Flatten rows of a grid (`grid[u][v]`) into v-fastest order
pub fn flatten_grid<T: Clone>(grid: &[Vec<T>]) -> Vec<T> {
    grid.iter().flat_map(|row| row.iter().cloned()).collect()
}

/// Reshape a v-fastest sequence into rows (`grid[u][v]`)
/// Returns `None` if the length does not match `count_u * count_v`
pub fn unflatten_grid<T: Clone>(flat: &[T], count_u: usize, count_v: usize) -> Option<Vec<Vec<T>>> {
    if flat.len() != count_u * count_v {
        return None;
    }
    let mut grid = vec![Vec::with_capacity(count_v); count_u];
    iproduct!(0..count_u, 0..count_v).for_each(|(u, v)| {
        grid[u].push(flat[grid_index(u, v, count_v)].clone());
    });
    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_bijective() {
        let (count_u, count_v) = (4, 3);
        let mut seen = vec![false; count_u * count_v];
        iproduct!(0..count_u, 0..count_v).for_each(|(u, v)| {
            let idx = grid_index(u, v, count_v);
            assert!(!seen[idx]);
            seen[idx] = true;
            assert_eq!(grid_coordinates(idx, count_v), (u, v));
        });
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn grid_round_trip() {
        let grid = vec![vec![0, 1, 2], vec![3, 4, 5]];
        let flat = flatten_grid(&grid);
        assert_eq!(flat, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(unflatten_grid(&flat, 2, 3), Some(grid));
        assert_eq!(unflatten_grid(&flat, 4, 2), None);
    }
}
