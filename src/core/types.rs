use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const BOARD_WIDTH: usize = 8;
pub const BOARD_LEN: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Action index meaning "no placement this ply".
pub const PASS_ACTION: usize = BOARD_LEN;

/// Disc colour / player identity. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Default for Side {
    fn default() -> Self {
        Side::Black
    }
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Cell value for this side as stored on the board and in observations.
    pub fn sign(self) -> i8 {
        match self {
            Side::Black => 1,
            Side::White => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

/// Final score of a finished episode. Reward is from Black's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub black: u8,
    pub white: u8,
    pub reward: i32,
}

impl GameOutcome {
    pub fn from_counts(black: u8, white: u8) -> Self {
        let reward = match black.cmp(&white) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        };
        GameOutcome {
            black,
            white,
            reward,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.reward {
            1 => Some(Side::Black),
            -1 => Some(Side::White),
            _ => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.winner() {
            Some(side) => write!(f, "{} wins {}-{}", side, self.black, self.white),
            None => write!(f, "Draw {}-{}", self.black, self.white),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_reward_follows_counts() {
        assert_eq!(GameOutcome::from_counts(40, 24).reward, 1);
        assert_eq!(GameOutcome::from_counts(10, 54).reward, -1);
        assert_eq!(GameOutcome::from_counts(32, 32).reward, 0);
    }

    #[test]
    fn outcome_winner() {
        assert_eq!(GameOutcome::from_counts(40, 24).winner(), Some(Side::Black));
        assert_eq!(GameOutcome::from_counts(24, 40).winner(), Some(Side::White));
        assert_eq!(GameOutcome::from_counts(32, 32).winner(), None);
    }

    #[test]
    fn side_signs() {
        assert_eq!(Side::Black.sign(), 1);
        assert_eq!(Side::White.sign(), -1);
        assert_eq!(Side::Black.opponent(), Side::White);
    }
}
