use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode};
use crossterm::{execute, terminal};

use reversi_env::core::Side;
use reversi_env::game::Game;
use reversi_env::player::{ActionMailbox, MailboxSource, RandomSource};
use reversi_env::selfplay::{run_selfplay, save_stats};

fn main() -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        EnableMouseCapture
    )?;

    let res = run();

    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run() -> anyhow::Result<()> {
    print!("=== Reversi ===\r\n");
    print!("\r\nSelect mode:\r\n");
    print!("1. Watch (random vs random)\r\n");
    print!("2. Play as Black\r\n");
    print!("3. Play as White\r\n");
    print!("4. Self-play batch\r\n");
    print!("q. Quit\r\n");

    match key_choice(&['1', '2', '3', '4'])? {
        None => Ok(()),
        Some('1') => watch(),
        Some('2') => play_human(Side::Black),
        Some('3') => play_human(Side::White),
        Some('4') => selfplay_batch(),
        Some(_) => unreachable!(),
    }
}

fn watch() -> anyhow::Result<()> {
    let mut game = Game::new();
    let mut black = RandomSource::new("Black bot");
    let mut white = RandomSource::new("White bot");
    finish_up(game.play(&mut black, &mut white))
}

fn play_human(side: Side) -> anyhow::Result<()> {
    let mut game = Game::new();
    let mailbox = ActionMailbox::new();
    let mut human = MailboxSource::new("You", mailbox, game.finished_flag());
    let mut bot = RandomSource::new("Bot");

    let outcome = match side {
        Side::Black => game.play(&mut human, &mut bot),
        Side::White => game.play(&mut bot, &mut human),
    };
    finish_up(outcome)
}

fn selfplay_batch() -> anyhow::Result<()> {
    print!("\r\nHow many games?\r\n");
    print!("1. 10\r\n");
    print!("2. 100\r\n");
    print!("3. 500\r\n");

    let num_games = match key_choice(&['1', '2', '3'])? {
        None => return Ok(()),
        Some('1') => 10,
        Some('2') => 100,
        _ => 500,
    };

    let stats = run_selfplay(num_games, None)?;
    let path = save_stats(&stats)?;
    print!("\r\n{}\r\n", stats.summary());
    print!("saved to {}\r\n", path.display());
    print!("press any key\r\n");
    wait_any_key()
}

fn finish_up(outcome: Option<reversi_env::core::GameOutcome>) -> anyhow::Result<()> {
    match outcome {
        Some(_) => {
            // final board is already on screen with the result line
            print!("press any key\r\n");
            wait_any_key()
        }
        None => {
            print!("game aborted\r\n");
            Ok(())
        }
    }
}

/// Block until one of `accepted` (or q) is pressed.
fn key_choice(accepted: &[char]) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(None),
                    KeyCode::Char(c) if accepted.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

fn wait_any_key() -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}
