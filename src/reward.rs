//! Reward pipeline
//!
//! A new high score is handed to a [`RewardPipeline`] on a one-shot worker
//! (a thread natively, a local task in the browser). The outcome comes
//! back over a channel as a [`RewardNotice`] that the host polls and shows.
//! Nothing here ever touches simulation state.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::highscores::{HighScores, MAX_HIGH_SCORES, now_ms};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("reward rejected: {0}")]
    Rejected(String),
    #[error("reward service unavailable: {0}")]
    Unavailable(String),
}

/// What a successful reward run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardReceipt {
    pub score: u64,
    /// Leaderboard rank (1-indexed), `None` when outside the top five
    pub rank: Option<usize>,
}

/// Handles a newly set high score
pub trait RewardPipeline: Send + Sync {
    fn on_new_high_score(&self, score: u64) -> Result<RewardReceipt, RewardError>;
}

/// Result of one dispatch, delivered to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardNotice {
    pub score: u64,
    pub outcome: Result<RewardReceipt, RewardError>,
}

impl RewardNotice {
    /// Text for the host's notification area
    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(RewardReceipt {
                rank: Some(rank), ..
            }) => format!(
                "New High Score: {}\nLeaderboard Rank: #{}\nYou made the TOP {}!",
                self.score, rank, MAX_HIGH_SCORES
            ),
            Ok(RewardReceipt { rank: None, .. }) => format!(
                "New High Score: {}\n(Score didn't qualify for top {} leaderboard)",
                self.score, MAX_HIGH_SCORES
            ),
            Err(_) => format!(
                "New High Score: {}\nRewards processing encountered issues. Please try again later.",
                self.score
            ),
        }
    }
}

/// Fires pipeline runs and collects their notices
pub struct RewardDispatcher {
    pipeline: Arc<dyn RewardPipeline>,
    tx: Sender<RewardNotice>,
    rx: Receiver<RewardNotice>,
    dispatched: usize,
}

impl RewardDispatcher {
    pub fn new(pipeline: Arc<dyn RewardPipeline>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            pipeline,
            tx,
            rx,
            dispatched: 0,
        }
    }

    /// Hand `score` to the pipeline without waiting for it
    pub fn dispatch(&mut self, score: u64) {
        self.dispatched += 1;
        log::info!("Dispatching reward for high score {}", score);
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        let job = move || {
            let outcome = pipeline.on_new_high_score(score);
            match &outcome {
                Ok(receipt) => log::info!("Reward processed: {:?}", receipt),
                Err(e) => log::warn!("Reward failed: {}", e),
            }
            // Host may already be gone
            let _ = tx.send(RewardNotice { score, outcome });
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(e) = std::thread::Builder::new()
                .name("reward-worker".into())
                .spawn(job)
            {
                log::warn!("Could not start reward worker: {}", e);
                let _ = self.tx.send(RewardNotice {
                    score,
                    outcome: Err(RewardError::Unavailable(e.to_string())),
                });
            }
        }

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move { job() });
    }

    /// Total dispatches so far
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Notices that have arrived since the last call
    pub fn drain_notices(&self) -> Vec<RewardNotice> {
        self.rx.try_iter().collect()
    }

    /// Block until the next notice arrives (headless runner, tests)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait_notice(&self, timeout: std::time::Duration) -> Option<RewardNotice> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Ranks high scores on the local top-5 leaderboard
pub struct LocalLeaderboardRewards {
    board: Mutex<HighScores>,
    persist: bool,
}

impl LocalLeaderboardRewards {
    /// Leaderboard loaded from storage and saved back on every entry
    pub fn persistent() -> Self {
        Self {
            board: Mutex::new(HighScores::load().unwrap_or_else(|e| {
                log::warn!("Leaderboard unreadable, starting empty: {}", e);
                HighScores::new()
            })),
            persist: true,
        }
    }

    /// Leaderboard that lives only in memory
    pub fn in_memory(board: HighScores) -> Self {
        Self {
            board: Mutex::new(board),
            persist: false,
        }
    }

    /// Copy of the current entries
    pub fn snapshot(&self) -> HighScores {
        self.board
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }
}

impl RewardPipeline for LocalLeaderboardRewards {
    fn on_new_high_score(&self, score: u64) -> Result<RewardReceipt, RewardError> {
        if score == 0 {
            return Err(RewardError::Rejected("zero score".to_string()));
        }
        let mut board = self
            .board
            .lock()
            .map_err(|_| RewardError::Unavailable("leaderboard lock poisoned".to_string()))?;
        let rank = board.add_score(score, now_ms());
        if rank.is_some() && self.persist {
            match board.save() {
                Ok(()) => log::info!("Leaderboard saved ({} entries)", board.entries.len()),
                Err(e) => log::warn!("Leaderboard write skipped: {}", e),
            }
        }
        Ok(RewardReceipt { score, rank })
    }
}
