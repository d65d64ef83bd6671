use crate::core::BoardCapability;

/// Supplies one move for the side currently to move.
///
/// Implementations must return [`PASS_ACTION`](crate::core::PASS_ACTION) or a
/// member of the board's current legal-move set, and never mutate the board.
/// `None` means the source gives up the game (interactive quit).
pub trait ActionSource {
    fn next_action(&mut self, board: &dyn BoardCapability) -> Option<usize>;
    fn name(&self) -> &str;

    /// Interactive sources block on external input; the game loop skips its
    /// autoplay delay for them.
    fn is_interactive(&self) -> bool {
        false
    }
}
