//! Tetromino definitions: the seven kinds, their colors and base shapes

use ratatui::style::Color;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I, // long bar
    O, // square
    T, // T-shape
    S, // S-shape
    Z, // Z-shape
    J, // J-shape
    L, // L-shape
}

/// A shape matrix: the piece's occupied cells in its minimal bounding box.
/// Rotation produces a fresh matrix with swapped dimensions, so the box is
/// not square and the orientation count is emergent.
pub type ShapeMatrix = Vec<Vec<bool>>;

impl TetrominoKind {
    /// Get the display color for this kind
    pub fn color(&self) -> Color {
        match self {
            TetrominoKind::I => Color::Rgb(0x67, 0xe8, 0xf9),
            TetrominoKind::O => Color::Rgb(0xfd, 0xe0, 0x47),
            TetrominoKind::T => Color::Rgb(0xc0, 0x84, 0xfc),
            TetrominoKind::S => Color::Rgb(0x86, 0xef, 0xac),
            TetrominoKind::Z => Color::Rgb(0xfd, 0xa4, 0xaf),
            TetrominoKind::J => Color::Rgb(0x93, 0xc5, 0xfd),
            TetrominoKind::L => Color::Rgb(0xfd, 0xba, 0x74),
        }
    }

    /// All kinds, in catalog order (used for uniform random selection)
    pub fn all() -> [TetrominoKind; 7] {
        [
            TetrominoKind::I,
            TetrominoKind::O,
            TetrominoKind::T,
            TetrominoKind::S,
            TetrominoKind::Z,
            TetrominoKind::J,
            TetrominoKind::L,
        ]
    }

    /// The base (spawn-orientation) shape matrix for this kind.
    /// I is a single 1x4 row; O is 2x2; the rest are 2x3.
    pub fn base_matrix(&self) -> ShapeMatrix {
        match self {
            TetrominoKind::I => vec![vec![true, true, true, true]],
            TetrominoKind::O => vec![vec![true, true], vec![true, true]],
            TetrominoKind::T => vec![vec![false, true, false], vec![true, true, true]],
            TetrominoKind::S => vec![vec![false, true, true], vec![true, true, false]],
            TetrominoKind::Z => vec![vec![true, true, false], vec![false, true, true]],
            TetrominoKind::J => vec![vec![true, false, false], vec![true, true, true]],
            TetrominoKind::L => vec![vec![false, false, true], vec![true, true, true]],
        }
    }
}
