use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::core::{BoardCapability, BOARD_LEN, BOARD_WIDTH, PASS_ACTION};
use crate::display::{self, DisplayState};
use crate::player::{ActionMailbox, ActionSource};

/// Sleep per iteration of the interactive wait, spent inside the event poll
/// so a pending click is delivered promptly.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Interactive source: waits until the mailbox holds a legal cell index.
///
/// The wait is a cooperative poll loop. Each iteration pumps the terminal
/// event queue (clicks and keys become mailbox posts), then drains the
/// mailbox, then re-checks the shared finished flag so the wait can never
/// outlive the game.
pub struct MailboxSource {
    name: String,
    mailbox: ActionMailbox,
    finished: Arc<AtomicBool>,
}

impl MailboxSource {
    pub fn new(name: &str, mailbox: ActionMailbox, finished: Arc<AtomicBool>) -> Self {
        MailboxSource {
            name: name.to_string(),
            mailbox,
            finished,
        }
    }

    /// Translate one terminal event into mailbox/cursor updates.
    /// Returns true when the user quits.
    fn pump_event(&self, ev: Event, state: &mut DisplayState, can_move: bool) -> bool {
        match ev {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('p') => self.mailbox.post(PASS_ACTION),
                KeyCode::Up => {
                    if state.cursor >= BOARD_WIDTH {
                        state.cursor -= BOARD_WIDTH;
                    }
                }
                KeyCode::Down => {
                    if state.cursor < BOARD_LEN - BOARD_WIDTH {
                        state.cursor += BOARD_WIDTH;
                    }
                }
                KeyCode::Left => {
                    if state.cursor % BOARD_WIDTH > 0 {
                        state.cursor -= 1;
                    }
                }
                KeyCode::Right => {
                    if state.cursor % BOARD_WIDTH < BOARD_WIDTH - 1 {
                        state.cursor += 1;
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if can_move {
                        self.mailbox.post(state.cursor);
                    } else {
                        self.mailbox.post(PASS_ACTION);
                    }
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => match display::cell_at(column, row) {
                Some(idx) => {
                    state.cursor = idx;
                    self.mailbox.post(idx);
                }
                // off-board click is a pass request when stuck, else ignored
                None if !can_move => self.mailbox.post(PASS_ACTION),
                None => {}
            },
            _ => {}
        }
        false
    }
}

impl ActionSource for MailboxSource {
    fn next_action(&mut self, board: &dyn BoardCapability) -> Option<usize> {
        let legal = board.legal_moves();
        let can_move = !legal.is_empty();

        let mut state = DisplayState {
            highlights: legal.clone(),
            show_cursor: true,
            status: Some(if can_move {
                format!("{}: your move ({})", self.name, board.side_to_move())
            } else {
                format!("{}: no legal move, [p] to pass", self.name)
            }),
            ..DisplayState::default()
        };
        if let Some(&first) = legal.first() {
            state.cursor = first;
        }

        loop {
            if self.finished.load(Ordering::Relaxed) {
                return Some(PASS_ACTION);
            }

            display::render_board(board, &state);
            print!("[click/arrows+enter]: place | [p]: pass | [q]: quit\r\n");

            if event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if self.pump_event(ev, &mut state, can_move) {
                        return None;
                    }
                }
            }

            if let Some(action) = self.mailbox.try_take() {
                if action == PASS_ACTION && !can_move {
                    return Some(action);
                }
                if legal.contains(&action) {
                    return Some(action);
                }
                // stray click on an illegal cell: keep waiting
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
