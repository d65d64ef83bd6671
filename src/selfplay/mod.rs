use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::Side;
use crate::game::Game;
use crate::player::RandomSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub winner: Option<Side>,
    pub black: u8,
    pub white: u8,
    pub plies: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub avg_plies: f64,
    pub avg_time_ms: f64,
    pub episodes: Vec<EpisodeRecord>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: EpisodeRecord) {
        self.total_games += 1;
        match record.winner {
            Some(Side::Black) => self.black_wins += 1,
            Some(Side::White) => self.white_wins += 1,
            None => self.draws += 1,
        }
        self.episodes.push(record);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.episodes.is_empty() {
            return;
        }
        let total_plies: usize = self.episodes.iter().map(|e| e.plies).sum();
        let total_time: u128 = self.episodes.iter().map(|e| e.time_ms).sum();
        self.avg_plies = total_plies as f64 / self.episodes.len() as f64;
        self.avg_time_ms = total_time as f64 / self.episodes.len() as f64;
    }

    pub fn summary(&self) -> String {
        format!(
            "{} games | Black {} / White {} / Draw {} | avg {:.1} plies",
            self.total_games, self.black_wins, self.white_wins, self.draws, self.avg_plies
        )
    }
}

/// Run a batch of fully-autonomous episodes. With `base_seed` set, game `i`
/// uses seeds derived from `base_seed + i` and the batch is reproducible.
pub fn run_selfplay(num_games: usize, base_seed: Option<u64>) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();

    for i in 0..num_games {
        let (mut black, mut white) = match base_seed {
            Some(seed) => (
                RandomSource::seeded("Black", seed + 2 * i as u64),
                RandomSource::seeded("White", seed + 2 * i as u64 + 1),
            ),
            None => (RandomSource::new("Black"), RandomSource::new("White")),
        };

        let mut game = Game::new();
        game.show_board = false;
        game.autoplay_delay = Duration::ZERO;

        let start = Instant::now();
        let outcome = game
            .play(&mut black, &mut white)
            .context("autonomous game aborted unexpectedly")?;

        stats.add_record(EpisodeRecord {
            winner: outcome.winner(),
            black: outcome.black,
            white: outcome.white,
            plies: game.plies(),
            time_ms: start.elapsed().as_millis(),
        });

        print!("game {}/{}: {}\r\n", i + 1, num_games, outcome);
    }

    Ok(stats)
}

/// Write the stats next to the binary as `selfplay_<timestamp>.json`.
pub fn save_stats(stats: &SelfPlayStats) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!(
        "selfplay_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    let json = serde_json::to_string_pretty(stats).context("failed to serialize stats")?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_accumulate_and_average() {
        let mut stats = SelfPlayStats::new();
        stats.add_record(EpisodeRecord {
            winner: Some(Side::Black),
            black: 40,
            white: 24,
            plies: 60,
            time_ms: 4,
        });
        stats.add_record(EpisodeRecord {
            winner: None,
            black: 32,
            white: 32,
            plies: 58,
            time_ms: 2,
        });
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.black_wins, 1);
        assert_eq!(stats.draws, 1);
        assert!((stats.avg_plies - 59.0).abs() < f64::EPSILON);
    }

    #[test]
    fn seeded_batch_is_reproducible() {
        let a = run_selfplay(3, Some(100)).unwrap();
        let b = run_selfplay(3, Some(100)).unwrap();
        assert_eq!(a.total_games, 3);
        assert_eq!(a.black_wins, b.black_wins);
        assert_eq!(a.avg_plies, b.avg_plies);
        for (x, y) in a.episodes.iter().zip(&b.episodes) {
            assert_eq!((x.black, x.white, x.plies), (y.black, y.white, y.plies));
        }
    }

    #[test]
    fn stats_round_trip_through_json() {
        let mut stats = SelfPlayStats::new();
        stats.add_record(EpisodeRecord {
            winner: Some(Side::White),
            black: 20,
            white: 44,
            plies: 61,
            time_ms: 3,
        });
        let json = serde_json::to_string(&stats).unwrap();
        let back: SelfPlayStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_games, 1);
        assert_eq!(back.white_wins, 1);
        assert_eq!(back.episodes[0].white, 44);
    }
}
