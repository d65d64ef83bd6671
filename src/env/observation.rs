use crate::core::{BoardCapability, BOARD_LEN};

pub const OBS_LEN: usize = BOARD_LEN + 1;

/// 64 cell values in row-major order followed by the side-to-move sign
/// (+1 Black, -1 White). Every element is in {-1, 0, 1}.
pub type Observation = [i8; OBS_LEN];

/// Flatten the board into the fixed-width vector fed to learning code.
/// A pure read; re-derivable at any point without episode history.
pub fn encode(board: &dyn BoardCapability) -> Observation {
    let mut obs = [0i8; OBS_LEN];
    obs[..BOARD_LEN].copy_from_slice(&board.as_cells());
    obs[BOARD_LEN] = board.side_to_move().sign();
    obs
}
