//! Toroidal index arithmetic.

use anyhow::{Result, bail};

/// Cell coordinates `(column, row)`.
pub type Pos = (usize, usize);

/// Fixed `width x height` grid whose edges wrap around.
///
/// Cells are stored row-major, so `(i, j)` lives at `j * width + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    width: usize,
    height: usize,
}

impl Lattice {
    /// Create a lattice, rejecting zero-sized dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("lattice must be at least 1x1, but is {width}x{height}");
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn n_cells(&self) -> usize {
        self.width * self.height
    }

    pub fn index(&self, (i, j): Pos) -> usize {
        debug_assert!(i < self.width && j < self.height);
        j * self.width + i
    }

    pub fn pos(&self, idx: usize) -> Pos {
        (idx % self.width, idx / self.width)
    }

    pub fn north_of(&self, (i, j): Pos) -> Pos {
        (i, (j + self.height - 1) % self.height)
    }

    pub fn south_of(&self, (i, j): Pos) -> Pos {
        (i, (j + 1) % self.height)
    }

    pub fn east_of(&self, (i, j): Pos) -> Pos {
        ((i + 1) % self.width, j)
    }

    pub fn west_of(&self, (i, j): Pos) -> Pos {
        ((i + self.width - 1) % self.width, j)
    }

    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Pos {
        match dir {
            Direction::North => self.north_of(pos),
            Direction::East => self.east_of(pos),
            Direction::South => self.south_of(pos),
            Direction::West => self.west_of(pos),
        }
    }
}

/// One of the four cardinal neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Map a uniform draw in `[0, 1)` onto four equal quartiles,
    /// in the order north, east, south, west.
    pub fn from_unit(u: f64) -> Self {
        let quartile = (u * 4.0) as usize;
        Self::ALL[quartile.min(3)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sized_lattice() {
        assert!(Lattice::new(0, 3).is_err());
        assert!(Lattice::new(3, 0).is_err());
        assert!(Lattice::new(1, 1).is_ok());
    }

    #[test]
    fn wraps_at_edges() {
        let lat = Lattice::new(4, 3).unwrap();
        assert_eq!(lat.north_of((2, 0)), (2, 2));
        assert_eq!(lat.south_of((2, 2)), (2, 0));
        assert_eq!(lat.east_of((3, 1)), (0, 1));
        assert_eq!(lat.west_of((0, 1)), (3, 1));
    }

    #[test]
    fn opposite_moves_cancel() {
        let lat = Lattice::new(5, 2).unwrap();
        for idx in 0..lat.n_cells() {
            let pos = lat.pos(idx);
            assert_eq!(lat.index(pos), idx);
            assert_eq!(lat.east_of(lat.west_of(pos)), pos);
            assert_eq!(lat.west_of(lat.east_of(pos)), pos);
            assert_eq!(lat.north_of(lat.south_of(pos)), pos);
            assert_eq!(lat.south_of(lat.north_of(pos)), pos);
        }
    }

    #[test]
    fn single_cell_is_its_own_neighbor() {
        let lat = Lattice::new(1, 1).unwrap();
        for dir in Direction::ALL {
            assert_eq!(lat.neighbor((0, 0), dir), (0, 0));
        }
    }

    #[test]
    fn quartile_boundaries() {
        assert_eq!(Direction::from_unit(0.0), Direction::North);
        assert_eq!(Direction::from_unit(0.249), Direction::North);
        assert_eq!(Direction::from_unit(0.25), Direction::East);
        assert_eq!(Direction::from_unit(0.5), Direction::South);
        assert_eq!(Direction::from_unit(0.75), Direction::West);
        assert_eq!(Direction::from_unit(0.999), Direction::West);
    }
}
