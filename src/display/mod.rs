use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::stdout;

use crate::core::{BoardCapability, BOARD_LEN, BOARD_WIDTH};

/// Terminal column of the first cell's leftmost character.
pub const BOARD_ORIGIN_X: u16 = 4;
/// Terminal row of the first board rank.
pub const BOARD_ORIGIN_Y: u16 = 3;
/// Character cells per board cell; click-to-index arithmetic divides by these.
pub const CELL_W: u16 = 4;
pub const CELL_H: u16 = 1;

pub struct DisplayState {
    pub cursor: usize,
    pub highlights: Vec<usize>,
    pub status: Option<String>,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            cursor: 27,
            highlights: Vec::new(),
            status: None,
            show_cursor: false,
        }
    }
}

fn glyph(value: i8) -> &'static str {
    match value {
        1 => "●",
        -1 => "○",
        _ => "·",
    }
}

/// Full-screen board render for the interactive terminal. Row geometry is
/// tied to BOARD_ORIGIN/CELL constants; keep them in sync with the layout.
pub fn render_board(board: &dyn BoardCapability, state: &DisplayState) {
    let mut out = stdout();

    let _ = execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    );

    print!("=== Reversi ===\r\n");
    match &state.status {
        Some(msg) => print!("{}\r\n", msg.clone().bold().yellow()),
        None => print!("\r\n"),
    }

    // column labels, one per CELL_W characters
    print!("    ");
    for c in 0..BOARD_WIDTH {
        print!("  {} ", (b'a' + c as u8) as char);
    }
    print!("\r\n");

    let cells = board.as_cells();
    for r in 0..BOARD_WIDTH {
        print!("{:2} |", r + 1);
        for c in 0..BOARD_WIDTH {
            let idx = r * BOARD_WIDTH + c;
            let is_cursor = state.show_cursor && state.cursor == idx;
            let is_highlight = state.highlights.contains(&idx);
            let (prefix, suffix) = if is_cursor {
                ("[", "]")
            } else if is_highlight {
                ("(", ")")
            } else {
                (" ", " ")
            };
            let text = format!("{} {}{}", prefix, glyph(cells[idx]), suffix);
            if is_cursor {
                print!("{}", text.yellow());
            } else if is_highlight {
                print!("{}", text.green());
            } else {
                print!("{}", text);
            }
        }
        print!("|\r\n");
    }

    let (black, white) = board.counts();
    print!("\r\n● {}  ○ {}   {} to move\r\n", black, white, board.side_to_move());
}

/// Plain line-oriented dump used by the environment's `render`; no terminal
/// control sequences, safe outside raw mode.
pub fn render_plain(board: &dyn BoardCapability) {
    let cells = board.as_cells();
    for r in 0..BOARD_WIDTH {
        let row: Vec<&str> = (0..BOARD_WIDTH)
            .map(|c| glyph(cells[r * BOARD_WIDTH + c]))
            .collect();
        println!("{}", row.join(" "));
    }
    println!();
}

/// Map a terminal coordinate to a board index; `None` outside the grid.
pub fn cell_at(column: u16, row: u16) -> Option<usize> {
    let col = (column.checked_sub(BOARD_ORIGIN_X)? / CELL_W) as usize;
    let rank = (row.checked_sub(BOARD_ORIGIN_Y)? / CELL_H) as usize;
    let idx = rank * BOARD_WIDTH + col;
    if col < BOARD_WIDTH && rank < BOARD_WIDTH && idx < BOARD_LEN {
        Some(idx)
    } else {
        None
    }
}
