use std::fmt;

use crate::core::types::{Side, BOARD_LEN, BOARD_WIDTH};

/// Board engine boundary.
///
/// The episode controller and game loop only ever talk to this trait, so the
/// backing engine (array scan, bitboard, native library) is swappable. All
/// cell indices are row-major in `0..64`.
pub trait BoardCapability {
    /// Back to the standard 4-disc starting position, Black to move.
    fn reset(&mut self);
    /// Cell values in row-major order: +1 black, -1 white, 0 empty.
    fn as_cells(&self) -> [i8; BOARD_LEN];
    /// Legal placement indices for the side to move.
    fn legal_moves(&self) -> Vec<usize>;
    fn is_legal(&self, idx: usize) -> bool;
    /// Place a disc for the side to move, flipping captured discs and handing
    /// the turn over. Returns the number of discs flipped.
    fn play(&mut self, idx: usize) -> Result<usize, IllegalPlacement>;
    /// Hand the turn over without placing a disc. Only meaningful when the
    /// side to move has no legal placement.
    fn pass_turn(&mut self);
    /// (black, white) disc counts.
    fn counts(&self) -> (u8, u8);
    fn black_to_move(&self) -> bool;

    fn side_to_move(&self) -> Side {
        if self.black_to_move() {
            Side::Black
        } else {
            Side::White
        }
    }

    fn is_full(&self) -> bool {
        let (black, white) = self.counts();
        black as usize + white as usize == BOARD_LEN
    }
}

/// Placement on a cell that is occupied or captures nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalPlacement(pub usize);

impl fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "illegal placement at cell {}", self.0)
    }
}

impl std::error::Error for IllegalPlacement {}

/// Index offsets of the 8 scan directions on a row-major 8x8 grid.
const DIRS: [isize; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Column drift per step for a direction, used to reject row wrap-around.
fn col_step(dir: isize) -> isize {
    match dir {
        -9 | -1 | 7 => -1,
        -7 | 1 | 9 => 1,
        _ => 0,
    }
}

/// Plain array board with directional scan legality and flipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayBoard {
    cells: [i8; BOARD_LEN],
    black_to_move: bool,
}

impl Default for ArrayBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayBoard {
    pub fn new() -> Self {
        let mut cells = [0i8; BOARD_LEN];
        // central four discs
        cells[27] = -1;
        cells[28] = 1;
        cells[35] = 1;
        cells[36] = -1;
        ArrayBoard {
            cells,
            black_to_move: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(cells: [i8; BOARD_LEN], black_to_move: bool) -> Self {
        ArrayBoard {
            cells,
            black_to_move,
        }
    }

    /// Opponent discs captured from `idx` along `dir`, empty when the
    /// direction does not end on an own disc.
    fn captures_along(&self, idx: usize, dir: isize, me: i8) -> Vec<usize> {
        let mut taken = Vec::new();
        let mut col = (idx % BOARD_WIDTH) as isize;
        let mut x = idx as isize + dir;
        loop {
            col += col_step(dir);
            if x < 0 || x >= BOARD_LEN as isize || col < 0 || col >= BOARD_WIDTH as isize {
                return Vec::new();
            }
            let s = self.cells[x as usize];
            if s == -me {
                taken.push(x as usize);
            } else if s == me {
                return taken;
            } else {
                return Vec::new();
            }
            x += dir;
        }
    }

    fn me(&self) -> i8 {
        self.side_to_move().sign()
    }
}

impl BoardCapability for ArrayBoard {
    fn reset(&mut self) {
        *self = ArrayBoard::new();
    }

    fn as_cells(&self) -> [i8; BOARD_LEN] {
        self.cells
    }

    fn legal_moves(&self) -> Vec<usize> {
        (0..BOARD_LEN).filter(|&i| self.is_legal(i)).collect()
    }

    fn is_legal(&self, idx: usize) -> bool {
        if idx >= BOARD_LEN || self.cells[idx] != 0 {
            return false;
        }
        let me = self.me();
        DIRS.iter()
            .any(|&d| !self.captures_along(idx, d, me).is_empty())
    }

    fn play(&mut self, idx: usize) -> Result<usize, IllegalPlacement> {
        if !self.is_legal(idx) {
            return Err(IllegalPlacement(idx));
        }
        let me = self.me();
        let mut flipped = 0;
        for d in DIRS {
            let taken = self.captures_along(idx, d, me);
            flipped += taken.len();
            for i in taken {
                self.cells[i] = me;
            }
        }
        self.cells[idx] = me;
        self.black_to_move = !self.black_to_move;
        Ok(flipped)
    }

    fn pass_turn(&mut self) {
        self.black_to_move = !self.black_to_move;
    }

    fn counts(&self) -> (u8, u8) {
        let mut black = 0u8;
        let mut white = 0u8;
        for &c in &self.cells {
            if c == 1 {
                black += 1;
            } else if c == -1 {
                white += 1;
            }
        }
        (black, white)
    }

    fn black_to_move(&self) -> bool {
        self.black_to_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position() {
        let board = ArrayBoard::new();
        assert_eq!(board.counts(), (2, 2));
        assert!(board.black_to_move());
        let cells = board.as_cells();
        assert_eq!(cells[27], -1);
        assert_eq!(cells[28], 1);
        assert_eq!(cells[35], 1);
        assert_eq!(cells[36], -1);
    }

    #[test]
    fn initial_legal_moves() {
        let board = ArrayBoard::new();
        assert_eq!(board.legal_moves(), vec![19, 26, 37, 44]);
    }

    #[test]
    fn play_flips_and_hands_turn_over() {
        let mut board = ArrayBoard::new();
        // row 2 col 3, flanking the white disc at 27
        let flipped = board.play(19).unwrap();
        assert_eq!(flipped, 1);
        assert_eq!(board.as_cells()[19], 1);
        assert_eq!(board.as_cells()[27], 1);
        assert_eq!(board.counts(), (4, 1));
        assert_eq!(board.side_to_move(), Side::White);
    }

    #[test]
    fn illegal_play_leaves_board_unchanged() {
        let mut board = ArrayBoard::new();
        let before = board.clone();
        assert_eq!(board.play(0), Err(IllegalPlacement(0)));
        assert_eq!(board.play(27), Err(IllegalPlacement(27)));
        assert_eq!(board.play(99), Err(IllegalPlacement(99)));
        assert_eq!(board, before);
    }

    #[test]
    fn scan_does_not_wrap_rows() {
        // white at row 1 col 0, black at row 1 col 1. Linearly 7 -> 8 -> 9
        // looks like a capture but crosses the row edge.
        let mut cells = [0i8; BOARD_LEN];
        cells[8] = -1;
        cells[9] = 1;
        let board = ArrayBoard::from_parts(cells, true);
        assert!(!board.is_legal(7));
    }

    #[test]
    fn pass_turn_flips_side_only() {
        let mut board = ArrayBoard::new();
        board.pass_turn();
        assert_eq!(board.side_to_move(), Side::White);
        assert_eq!(board.counts(), (2, 2));
    }

    #[test]
    fn reset_restores_start() {
        let mut board = ArrayBoard::new();
        board.play(19).unwrap();
        board.reset();
        assert_eq!(board, ArrayBoard::new());
    }

    #[test]
    fn full_board_detection() {
        let cells = [1i8; BOARD_LEN];
        let board = ArrayBoard::from_parts(cells, true);
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
    }
}
