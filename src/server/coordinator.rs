//! Per-table session coordinator.
//!
//! The coordinator owns the rules engine behind one lock and serializes all
//! action delivery: connections enqueue `(seat, action)` into a bounded
//! queue, a single task applies each action and answers through a oneshot.
//! After every successful apply the blinded snapshot is fanned out per seat
//! through `watch` channels, so a slow client only ever misses intermediate
//! snapshots, never the newest one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch, Mutex, Notify};
use tracing::{debug, info};

use crate::domain::scoring::ScoreDefinition;
use crate::domain::{blinded_for_seat, BlindedGameState, GameState, Seat, SEATS};
use crate::errors::domain::DomainError;
use crate::journal::{Action, Journal};

#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Empty disables the password check.
    pub server_password: String,
    pub scoring: ScoreDefinition,
    pub handshake_timeout: Duration,
    pub action_queue_depth: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            server_password: String::new(),
            scoring: ScoreDefinition::standard(),
            handshake_timeout: Duration::from_secs(10),
            action_queue_depth: 32,
        }
    }
}

/// An action waiting in the coordinator queue.
pub(crate) struct SeatAction {
    pub seat: Seat,
    pub action: Action,
    pub reply: oneshot::Sender<Result<(), DomainError>>,
}

struct ClientSlot {
    secret: String,
    seat: Seat,
    state_tx: watch::Sender<Option<BlindedGameState>>,
    kill: Arc<Notify>,
}

struct TableInner {
    game: GameState,
    journal: Journal,
    /// Client id per seat, in login order.
    seat_order: Vec<String>,
    clients: HashMap<String, ClientSlot>,
}

impl TableInner {
    fn broadcast(&self) {
        for slot in self.clients.values() {
            let state = blinded_for_seat(&self.game, slot.seat);
            // watch keeps only the newest value: a slow client drops stale
            // snapshots, which are idempotent.
            slot.state_tx.send_replace(Some(state));
        }
    }
}

/// Everything a freshly authenticated connection needs.
pub struct LoginAccept {
    pub seat: Seat,
    pub state_rx: watch::Receiver<Option<BlindedGameState>>,
    pub kill: Arc<Notify>,
}

pub struct Table {
    config: TableConfig,
    inner: Mutex<TableInner>,
    actions_tx: mpsc::Sender<SeatAction>,
    quit_tx: watch::Sender<bool>,
}

impl Table {
    /// Create a table with a freshly generated server seed and start its
    /// coordinator task.
    pub fn new(config: TableConfig) -> Result<Arc<Self>, DomainError> {
        let mut game = GameState::new(false, config.scoring);
        game.generate_server_seed()?;

        let (actions_tx, actions_rx) = mpsc::channel(config.action_queue_depth);
        let (quit_tx, _) = watch::channel(false);
        let table = Arc::new(Self {
            config,
            inner: Mutex::new(TableInner {
                game,
                journal: Journal::new(),
                seat_order: Vec::new(),
                clients: HashMap::new(),
            }),
            actions_tx,
            quit_tx,
        });
        tokio::spawn(run_action_loop(table.clone(), actions_rx));
        Ok(table)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub(crate) fn actions_tx(&self) -> mpsc::Sender<SeatAction> {
        self.actions_tx.clone()
    }

    pub fn subscribe_quit(&self) -> watch::Receiver<bool> {
        self.quit_tx.subscribe()
    }

    /// Stop the coordinator and kick every connection.
    pub async fn shutdown(&self) {
        self.quit_tx.send_replace(true);
        let inner = self.inner.lock().await;
        for slot in inner.clients.values() {
            slot.kill.notify_waiters();
        }
    }

    /// Authenticate a connection and (re)bind its endpoint.
    ///
    /// The first three distinct client ids receive seats 0, 1, 2; a known id
    /// with the matching secret reclaims its seat and the previous endpoint
    /// is told to close. Error values are wire codes.
    pub async fn login(
        &self,
        client_id: &str,
        client_secret: &str,
        server_password: &str,
    ) -> Result<LoginAccept, (u16, &'static str)> {
        if !self.config.server_password.is_empty() && server_password != self.config.server_password
        {
            return Err((401, "unauthorized"));
        }

        let mut inner = self.inner.lock().await;
        let seat = match inner.clients.get(client_id) {
            Some(slot) => {
                if slot.secret != client_secret {
                    return Err((401, "unauthorized"));
                }
                debug!(client_id, "returning client replaces its endpoint");
                // notify_one stores a permit, so the old connection folds
                // even if it is not parked on the kill right now.
                slot.kill.notify_one();
                slot.seat
            }
            None => {
                if inner.seat_order.len() >= SEATS {
                    return Err((403, "too many users"));
                }
                let seat = inner.seat_order.len() as Seat;
                inner.seat_order.push(client_id.to_string());
                seat
            }
        };

        let initial = blinded_for_seat(&inner.game, seat);
        let (state_tx, state_rx) = watch::channel(Some(initial));
        let kill = Arc::new(Notify::new());
        inner.clients.insert(
            client_id.to_string(),
            ClientSlot {
                secret: client_secret.to_string(),
                seat,
                state_tx,
                kill: kill.clone(),
            },
        );
        info!(client_id, seat, "client logged in");
        Ok(LoginAccept {
            seat,
            state_rx,
            kill,
        })
    }

    /// Apply one action under the table lock; on success record it in the
    /// journal and fan out fresh blinded snapshots.
    pub async fn apply(&self, seat: Seat, action: &Action) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        let result = action.apply(&mut inner.game, Some(seat));
        match &result {
            Ok(()) => {
                inner.journal.record(Some(seat), action.clone());
                debug!(seat, kind = action.kind(), "applied action");
                inner.broadcast();
            }
            Err(err) => {
                debug!(seat, kind = action.kind(), %err, "rejected action");
            }
        }
        result
    }

    /// Snapshot of the engine (it is a plain value, safe to deep-copy).
    pub async fn game(&self) -> GameState {
        self.inner.lock().await.game.clone()
    }

    /// Copy of the action journal recorded so far.
    pub async fn journal(&self) -> Journal {
        self.inner.lock().await.journal.clone()
    }

    pub async fn server_seed(&self) -> Option<Vec<u8>> {
        self.inner.lock().await.game.server_seed().map(<[u8]>::to_vec)
    }
}

async fn run_action_loop(table: Arc<Table>, mut actions_rx: mpsc::Receiver<SeatAction>) {
    let mut quit = table.subscribe_quit();
    loop {
        tokio::select! {
            _ = quit.changed() => {
                if *quit.borrow() {
                    debug!("coordinator quitting");
                    break;
                }
            }
            next = actions_rx.recv() => {
                let Some(SeatAction { seat, action, reply }) = next else {
                    break;
                };
                let result = table.apply(seat, &action).await;
                // The connection may be gone already; that is fine.
                let _ = reply.send(result);
            }
        }
    }
}
