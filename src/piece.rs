use rand::prelude::*;
use std::fmt;

/// The seven tetromino kinds. Each carries a distinct color id that ends up
/// in the board cells when the piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn random(rng: &mut ThreadRng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    // 0 is reserved for an empty board cell
    pub const fn color_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    // the four occupied cells of the unrotated matrix, and its width/height
    const fn base(self) -> ([(i32, i32); 4], (i32, i32)) {
        match self {
            PieceKind::I => ([(0, 0), (1, 0), (2, 0), (3, 0)], (4, 1)),
            PieceKind::L => ([(0, 0), (0, 1), (1, 1), (2, 1)], (3, 2)),
            PieceKind::J => ([(2, 0), (0, 1), (1, 1), (2, 1)], (3, 2)),
            PieceKind::O => ([(0, 0), (1, 0), (0, 1), (1, 1)], (2, 2)),
            PieceKind::S => ([(1, 0), (2, 0), (0, 1), (1, 1)], (3, 2)),
            PieceKind::T => ([(1, 0), (0, 1), (1, 1), (2, 1)], (3, 2)),
            PieceKind::Z => ([(0, 0), (1, 0), (1, 1), (2, 1)], (3, 2)),
        }
    }

    /// Occupied cells for the given quarter-turn count, relative to the
    /// piece's bounding box. A clockwise turn of a w*h matrix maps (x, y)
    /// to (h-1-y, x) in an h*w matrix, which stays correct for the
    /// rectangular I piece where a plain square transpose would not.
    pub fn cells(self, rotation: u8) -> [(i32, i32); 4] {
        let (base, (w, h)) = self.base();
        let mut out = [(0, 0); 4];
        for (i, &(x, y)) in base.iter().enumerate() {
            out[i] = match rotation % 4 {
                0 => (x, y),
                1 => (h - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (y, w - 1 - x),
            };
        }
        out
    }

    // width, height of the bounding box at the given rotation
    pub const fn dim(self, rotation: u8) -> (i32, i32) {
        let (_, (w, h)) = self.base();
        if rotation % 2 == 0 { (w, h) } else { (h, w) }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        };
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cells: [(i32, i32); 4]) -> [(i32, i32); 4] {
        cells.sort();
        cells
    }

    #[test]
    fn every_rotation_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let cells = sorted(kind.cells(r));
                for pair in cells.windows(2) {
                    assert_ne!(pair[0], pair[1], "{kind} r{r} duplicates a cell");
                }
            }
        }
    }

    #[test]
    fn horizontal_i_twice_rotated_matches_original_cells() {
        let start = sorted(PieceKind::I.cells(0));
        assert_eq!(sorted(PieceKind::I.cells(2)), start);
    }

    #[test]
    fn i_piece_swaps_dimensions_on_rotation() {
        assert_eq!(PieceKind::I.dim(0), (4, 1));
        assert_eq!(PieceKind::I.dim(1), (1, 4));
        assert_eq!(sorted(PieceKind::I.cells(1)), [(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let start = sorted(PieceKind::O.cells(0));
        assert_eq!(sorted(PieceKind::O.cells(1)), start);
    }

    #[test]
    fn cells_stay_inside_bounding_box() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let (w, h) = kind.dim(r);
                for (x, y) in kind.cells(r) {
                    assert!(x >= 0 && x < w, "{kind} r{r}: x {x} outside width {w}");
                    assert!(y >= 0 && y < h, "{kind} r{r}: y {y} outside height {h}");
                }
            }
        }
    }

    #[test]
    fn color_ids_are_distinct_and_nonzero() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let id = kind.color_id() as usize;
            assert!(id >= 1 && id <= 7);
            assert!(!seen[id]);
            seen[id] = true;
        }
    }
}
