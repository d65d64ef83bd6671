use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};

use crate::core::{ArrayBoard, BoardCapability, GameOutcome, Side, PASS_ACTION};
use crate::display::{self, DisplayState};
use crate::player::ActionSource;

/// Two-player loop: one [`ActionSource`] per side, asked once per ply.
///
/// Unlike [`ReversiEnv`](crate::env::ReversiEnv) there is no scripted reply
/// baked into a transition; pass handling and termination are identical.
pub struct Game {
    board: Box<dyn BoardCapability>,
    pass_streak: u8,
    plies: usize,
    finished: Arc<AtomicBool>,
    /// Pause between autonomous plies so the board is watchable; zero skips
    /// the pause (and its q-interrupt poll) entirely.
    pub autoplay_delay: Duration,
    pub show_board: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_board(Box::new(ArrayBoard::new()))
    }

    pub fn with_board(board: Box<dyn BoardCapability>) -> Self {
        Game {
            board,
            pass_streak: 0,
            plies: 0,
            finished: Arc::new(AtomicBool::new(false)),
            autoplay_delay: Duration::from_millis(400),
            show_board: true,
        }
    }

    /// Raised at termination; hand it to interactive sources so their wait
    /// loop cannot outlive the game.
    pub fn finished_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.finished)
    }

    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Run to termination. `None` when a source gives up (interactive quit)
    /// or the user interrupts an autonomous game.
    pub fn play(
        &mut self,
        black: &mut dyn ActionSource,
        white: &mut dyn ActionSource,
    ) -> Option<GameOutcome> {
        self.board.reset();
        self.pass_streak = 0;
        self.plies = 0;
        self.finished.store(false, Ordering::Relaxed);

        loop {
            let side = self.board.side_to_move();
            let legal = self.board.legal_moves();
            let source: &mut dyn ActionSource = if side == Side::Black {
                &mut *black
            } else {
                &mut *white
            };

            if !source.is_interactive() {
                self.render_turn(source.name(), side, &legal);
                if self.autoplay_pause() {
                    self.finished.store(true, Ordering::Relaxed);
                    return None;
                }
            }

            let action = match source.next_action(self.board.as_ref()) {
                Some(action) => action,
                None => {
                    self.finished.store(true, Ordering::Relaxed);
                    return None;
                }
            };

            if action == PASS_ACTION {
                if !legal.is_empty() {
                    // source broke its contract; ask again
                    continue;
                }
                self.board.pass_turn();
                self.pass_streak += 1;
            } else if legal.contains(&action) {
                if self.board.play(action).is_err() {
                    continue;
                }
                self.pass_streak = 0;
            } else {
                continue;
            }
            self.plies += 1;

            if self.board.is_full() || self.pass_streak >= 2 {
                self.finished.store(true, Ordering::Relaxed);
                let (b, w) = self.board.counts();
                let outcome = GameOutcome::from_counts(b, w);
                self.render_final(&outcome);
                return Some(outcome);
            }
        }
    }

    fn render_turn(&self, name: &str, side: Side, legal: &[usize]) {
        if !self.show_board {
            return;
        }
        let state = DisplayState {
            highlights: legal.to_vec(),
            status: Some(if legal.is_empty() {
                format!("{} ({}) has to pass", name, side)
            } else {
                format!("{} ({}) to move", name, side)
            }),
            ..DisplayState::default()
        };
        display::render_board(self.board.as_ref(), &state);
    }

    fn render_final(&self, outcome: &GameOutcome) {
        if !self.show_board {
            return;
        }
        let state = DisplayState {
            status: Some(format!("Game over: {}", outcome)),
            ..DisplayState::default()
        };
        display::render_board(self.board.as_ref(), &state);
    }

    /// Sleep between autonomous plies, watching for a q keypress.
    /// Returns true when the user interrupts.
    fn autoplay_pause(&self) -> bool {
        if self.autoplay_delay.is_zero() {
            return false;
        }
        if event::poll(self.autoplay_delay).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.code == KeyCode::Char('q') {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RandomSource;
    use std::time::Duration;

    fn headless() -> Game {
        let mut game = Game::new();
        game.show_board = false;
        game.autoplay_delay = Duration::ZERO;
        game
    }

    #[test]
    fn random_game_runs_to_completion() {
        let mut game = headless();
        let mut black = RandomSource::seeded("black", 1);
        let mut white = RandomSource::seeded("white", 2);
        let outcome = game.play(&mut black, &mut white).unwrap();
        let total = outcome.black as usize + outcome.white as usize;
        assert!(total <= 64);
        assert_eq!(outcome, GameOutcome::from_counts(outcome.black, outcome.white));
        assert!(game.finished_flag().load(Ordering::Relaxed));
        assert!(game.plies() >= 4);
    }

    #[test]
    fn resigning_source_aborts_the_game() {
        struct Resigner;
        impl ActionSource for Resigner {
            fn next_action(&mut self, _board: &dyn BoardCapability) -> Option<usize> {
                None
            }
            fn name(&self) -> &str {
                "resigner"
            }
        }

        let mut game = headless();
        let mut black = Resigner;
        let mut white = RandomSource::seeded("white", 2);
        assert_eq!(game.play(&mut black, &mut white), None);
        assert!(game.finished_flag().load(Ordering::Relaxed));
    }

    #[test]
    fn outcomes_are_reproducible_with_seeds() {
        let run = || {
            let mut game = headless();
            let mut black = RandomSource::seeded("black", 10);
            let mut white = RandomSource::seeded("white", 20);
            game.play(&mut black, &mut white).unwrap()
        };
        assert_eq!(run(), run());
    }
}
