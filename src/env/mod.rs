pub mod observation;

use std::fmt;

use crate::core::{ArrayBoard, BoardCapability, GameOutcome, PASS_ACTION};
use crate::display;
use crate::player::{ActionSource, RandomSource};

pub use observation::{encode, Observation, OBS_LEN};

/// Recoverable `step` failures. None of these mutate the board or the
/// episode state; the caller may retry with a different action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// Action tendered after the episode already terminated.
    EpisodeOver,
    /// Non-pass action outside the legal-move set while legal moves exist.
    IllegalMove(usize),
    /// Pass tendered while the side to move still has a legal placement.
    PrematurePass,
    /// The opponent source returned an action outside its legal-move set.
    RogueSource(usize),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StepError::EpisodeOver => write!(f, "episode already terminated"),
            StepError::IllegalMove(a) => write!(f, "action {} is not a legal move", a),
            StepError::PrematurePass => write!(f, "pass tendered while legal moves exist"),
            StepError::RogueSource(a) => {
                write!(f, "opponent source produced illegal action {}", a)
            }
        }
    }
}

impl std::error::Error for StepError {}

/// One transition result, gymnasium-shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub observation: Observation,
    pub reward: i32,
    pub terminated: bool,
    pub truncated: bool,
}

/// Episode controller: drives one agent ply plus one scripted opponent reply
/// per `step`, tracks consecutive passes, and pays out the terminal reward.
///
/// The agent plays Black. The opponent reply comes from an [`ActionSource`],
/// uniform random by default.
pub struct ReversiEnv {
    board: Box<dyn BoardCapability>,
    opponent: Box<dyn ActionSource>,
    pass_streak: u8,
    terminated: bool,
    outcome: Option<GameOutcome>,
}

impl Default for ReversiEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ReversiEnv {
    pub fn new() -> Self {
        Self::with_opponent(Box::new(RandomSource::new("opponent")))
    }

    /// Deterministic opponent for reproducible episodes.
    pub fn seeded(seed: u64) -> Self {
        Self::with_opponent(Box::new(RandomSource::seeded("opponent", seed)))
    }

    pub fn with_opponent(opponent: Box<dyn ActionSource>) -> Self {
        Self::with_board_and_opponent(Box::new(ArrayBoard::new()), opponent)
    }

    /// Plug in a different board engine behind the capability boundary.
    pub fn with_board_and_opponent(
        board: Box<dyn BoardCapability>,
        opponent: Box<dyn ActionSource>,
    ) -> Self {
        ReversiEnv {
            board,
            opponent,
            pass_streak: 0,
            terminated: false,
            outcome: None,
        }
    }

    /// Start a fresh episode and return the initial observation.
    pub fn reset(&mut self) -> Observation {
        self.board.reset();
        self.pass_streak = 0;
        self.terminated = false;
        self.outcome = None;
        encode(self.board.as_ref())
    }

    /// Advance one agent ply (and the scripted reply).
    ///
    /// The agent's action must be a legal placement, or `PASS_ACTION` when no
    /// placement is legal; anything else is rejected with the board left
    /// untouched.
    pub fn step(&mut self, action: usize) -> Result<Step, StepError> {
        if self.terminated {
            return Err(StepError::EpisodeOver);
        }
        if self.board.is_full() {
            return Ok(self.finish());
        }

        // agent ply
        let legal = self.board.legal_moves();
        if legal.is_empty() {
            // forced pass, whatever was tendered
            self.board.pass_turn();
            self.pass_streak += 1;
        } else if action == PASS_ACTION {
            return Err(StepError::PrematurePass);
        } else if legal.contains(&action) {
            self.board
                .play(action)
                .map_err(|_| StepError::IllegalMove(action))?;
            self.pass_streak = 0;
        } else {
            return Err(StepError::IllegalMove(action));
        }

        // scripted reply
        let reply_legal = self.board.legal_moves();
        if reply_legal.is_empty() {
            self.board.pass_turn();
            self.pass_streak += 1;
        } else {
            let reply = self
                .opponent
                .next_action(self.board.as_ref())
                .unwrap_or(PASS_ACTION);
            if !reply_legal.contains(&reply) {
                return Err(StepError::RogueSource(reply));
            }
            self.board
                .play(reply)
                .map_err(|_| StepError::RogueSource(reply))?;
            self.pass_streak = 0;
        }

        if self.board.is_full() || self.pass_streak >= 2 {
            return Ok(self.finish());
        }
        Ok(Step {
            observation: encode(self.board.as_ref()),
            reward: 0,
            terminated: false,
            truncated: false,
        })
    }

    fn finish(&mut self) -> Step {
        self.terminated = true;
        let (black, white) = self.board.counts();
        let outcome = GameOutcome::from_counts(black, white);
        self.outcome = Some(outcome);
        Step {
            observation: encode(self.board.as_ref()),
            reward: outcome.reward,
            terminated: true,
            truncated: false,
        }
    }

    /// Final score, present once the episode has terminated.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn terminated(&self) -> bool {
        self.terminated
    }

    pub fn board(&self) -> &dyn BoardCapability {
        self.board.as_ref()
    }

    pub fn render(&self) {
        display::render_plain(self.board.as_ref());
    }

    #[cfg(test)]
    fn pass_streak(&self) -> u8 {
        self.pass_streak
    }
}
