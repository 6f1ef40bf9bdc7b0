//! Active falling piece: shape matrix plus board-relative position

use crate::board::BOARD_WIDTH;
use crate::tetromino::{ShapeMatrix, TetrominoKind};

/// An active falling piece.
///
/// (x, y) is the board position of the matrix's top-left cell. y may be
/// negative while the piece sits partially above the visible board.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub matrix: ShapeMatrix,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece of the given kind at the spawn position: horizontally
    /// centered, top row at y = 0.
    pub fn spawn(kind: TetrominoKind) -> Self {
        let matrix = kind.base_matrix();
        let x = ((BOARD_WIDTH - matrix[0].len()) / 2) as i32;
        Self { kind, matrix, x, y: 0 }
    }

    /// Width of the current bounding box in cells
    pub fn width(&self) -> usize {
        self.matrix[0].len()
    }

    /// Height of the current bounding box in cells
    pub fn height(&self) -> usize {
        self.matrix.len()
    }

    /// A copy of this piece shifted by (dx, dy). The receiver is untouched,
    /// so a collision test on the result costs nothing to back out of.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            matrix: self.matrix.clone(),
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// A copy of this piece with its matrix rotated 90 degrees clockwise.
    /// (x, y) still names the top-left corner of the (now transposed)
    /// bounding box; the caller decides where to kick it.
    pub fn rotated_cw(&self) -> Self {
        Self {
            kind: self.kind,
            matrix: rotate_cw(&self.matrix),
            x: self.x,
            y: self.y,
        }
    }

    /// Absolute board coordinates (row, col) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix.iter().enumerate().flat_map(move |(r, row)| {
            row.iter().enumerate().filter_map(move |(c, &occupied)| {
                occupied.then_some((self.y + r as i32, self.x + c as i32))
            })
        })
    }
}

/// Rotate a shape matrix 90 degrees clockwise about its own bounding box:
/// an h x w matrix becomes w x h with out[c][h-1-r] = in[r][c].
pub fn rotate_cw(matrix: &ShapeMatrix) -> ShapeMatrix {
    let h = matrix.len();
    let w = matrix[0].len();
    let mut rotated = vec![vec![false; h]; w];
    for (r, row) in matrix.iter().enumerate() {
        for (c, &occupied) in row.iter().enumerate() {
            rotated[c][h - 1 - r] = occupied;
        }
    }
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_centered() {
        // floor((10 - width) / 2)
        assert_eq!(Piece::spawn(TetrominoKind::I).x, 3);
        assert_eq!(Piece::spawn(TetrominoKind::O).x, 4);
        assert_eq!(Piece::spawn(TetrominoKind::T).x, 3);
        assert_eq!(Piece::spawn(TetrominoKind::I).y, 0);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let piece = Piece::spawn(TetrominoKind::I);
        assert_eq!((piece.height(), piece.width()), (1, 4));
        let rotated = piece.rotated_cw();
        assert_eq!((rotated.height(), rotated.width()), (4, 1));
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in TetrominoKind::all() {
            let original = kind.base_matrix();
            let mut matrix = original.clone();
            for _ in 0..4 {
                matrix = rotate_cw(&matrix);
            }
            assert_eq!(matrix, original, "{:?} must return to base after 4 turns", kind);
        }
    }

    #[test]
    fn test_o_rotation_is_shape_noop() {
        let original = TetrominoKind::O.base_matrix();
        assert_eq!(rotate_cw(&original), original);
    }

    #[test]
    fn test_rotate_t_once() {
        // .X.         X.
        // XXX   ->    XX
        //             X.
        let rotated = rotate_cw(&TetrominoKind::T.base_matrix());
        assert_eq!(
            rotated,
            vec![
                vec![true, false],
                vec![true, true],
                vec![true, false],
            ]
        );
    }

    #[test]
    fn test_translated_leaves_original_alone() {
        let piece = Piece::spawn(TetrominoKind::S);
        let moved = piece.translated(-1, 2);
        assert_eq!(moved.x, piece.x - 1);
        assert_eq!(moved.y, piece.y + 2);
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, 0);
        assert_eq!(moved.matrix, piece.matrix);
    }

    #[test]
    fn test_cells_are_absolute() {
        let mut piece = Piece::spawn(TetrominoKind::O);
        piece.x = 2;
        piece.y = -1;
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(-1, 2), (-1, 3), (0, 2), (0, 3)]);
    }
}
