pub mod board;
pub mod types;

pub use board::{ArrayBoard, BoardCapability, IllegalPlacement};
pub use types::{GameOutcome, Side, BOARD_LEN, BOARD_WIDTH, PASS_ACTION};
