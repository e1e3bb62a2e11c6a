//! Per-connection protocol driver: handshake, reader loop, writer task.
//!
//! The server opens with a Ping the client must answer before logging in.
//! After LoginOk, the reader forwards actions into the coordinator queue and
//! the writer interleaves request replies with one-shot state snapshots.

use std::sync::Arc;

use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, watch, Notify};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::coordinator::{SeatAction, Table};
use crate::domain::{BlindedGameState, Seat};
use crate::proto::{read_frame, write_frame, Message, ProtoError, CORRELATION_NONE};

/// Replies a connection may queue before the writer falls behind.
const REPLY_QUEUE_DEPTH: usize = 16;

/// Accept connections for `table` until it quits.
pub async fn serve(table: Arc<Table>, listener: TcpListener) -> std::io::Result<()> {
    let mut quit = table.subscribe_quit();
    info!(addr = ?listener.local_addr().ok(), "table listening");
    loop {
        tokio::select! {
            _ = quit.changed() => {
                if *quit.borrow() {
                    break;
                }
            }
            accepted = listener.accept() => {
                let (stream, addr) = accepted?;
                debug!(%addr, "accepted connection");
                let table = table.clone();
                tokio::spawn(async move {
                    if let Err(err) = handle_connection(table, stream).await {
                        debug!(%addr, %err, "connection ended");
                    }
                });
            }
        }
    }
    Ok(())
}

/// Drive one client connection to completion.
pub async fn handle_connection(table: Arc<Table>, stream: TcpStream) -> Result<(), ProtoError> {
    let (mut reader, mut writer) = stream.into_split();
    let handshake_timeout = table.config().handshake_timeout;

    // Server pings first; anything but a prompt Pong is a violation.
    write_frame(&mut writer, &Message::Ping, 1).await?;
    let (pong_id, pong) = timeout(handshake_timeout, read_frame(&mut reader))
        .await
        .map_err(|_| ProtoError::Closed)??;
    if pong_id != 1 || pong != Message::Pong {
        write_frame(
            &mut writer,
            &Message::error(400, "expected pong"),
            CORRELATION_NONE,
        )
        .await?;
        return Err(ProtoError::ProtocolViolation);
    }

    let (login_id, login) = timeout(handshake_timeout, read_frame(&mut reader))
        .await
        .map_err(|_| ProtoError::Closed)??;
    let Message::LoginRequest {
        server_password,
        client_id,
        client_secret,
    } = login
    else {
        write_frame(
            &mut writer,
            &Message::error(400, "expected login request"),
            CORRELATION_NONE,
        )
        .await?;
        return Err(ProtoError::ProtocolViolation);
    };

    let accept = match table
        .login(&client_id, &client_secret, &server_password)
        .await
    {
        Ok(accept) => accept,
        Err((code, reason)) => {
            write_frame(&mut writer, &Message::error(code, reason), login_id).await?;
            return Ok(());
        }
    };
    write_frame(&mut writer, &Message::LoginOk, login_id).await?;

    let (reply_tx, reply_rx) = mpsc::channel::<(u32, Message)>(REPLY_QUEUE_DEPTH);
    let writer_task = tokio::spawn(run_writer(
        writer,
        accept.seat,
        accept.state_rx,
        reply_rx,
        accept.kill.clone(),
    ));

    let result = run_reader(&table, accept.seat, &mut reader, &reply_tx, &accept.kill).await;

    // Dropping our reply sender drains and stops the writer.
    drop(reply_tx);
    let _ = writer_task.await;
    result
}

/// Writer half: request replies interleaved with one-shot state pushes.
/// The `watch` receiver hands over only the newest snapshot, older
/// undelivered ones are dropped by construction.
async fn run_writer(
    mut writer: OwnedWriteHalf,
    seat: Seat,
    mut state_rx: watch::Receiver<Option<BlindedGameState>>,
    mut reply_rx: mpsc::Receiver<(u32, Message)>,
    kill: Arc<Notify>,
) {
    // Deliver the snapshot bound at login before waiting for changes.
    let initial = state_rx.borrow_and_update().clone();
    if let Some(game_state) = initial {
        if let Err(err) = push_state(&mut writer, seat, game_state).await {
            debug!(seat, %err, "failed to push initial state");
            return;
        }
    }

    loop {
        tokio::select! {
            _ = kill.notified() => {
                debug!(seat, "writer told to close");
                break;
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    // Endpoint replaced by a reconnect.
                    break;
                }
                let latest = state_rx.borrow_and_update().clone();
                if let Some(game_state) = latest {
                    if let Err(err) = push_state(&mut writer, seat, game_state).await {
                        warn!(seat, %err, "failed to push state");
                        break;
                    }
                }
            }
            reply = reply_rx.recv() => {
                let Some((correlation_id, message)) = reply else {
                    break;
                };
                if let Err(err) = write_frame(&mut writer, &message, correlation_id).await {
                    warn!(seat, %err, "failed to write reply");
                    break;
                }
            }
        }
    }
}

async fn push_state(
    writer: &mut OwnedWriteHalf,
    seat: Seat,
    game_state: BlindedGameState,
) -> Result<(), ProtoError> {
    write_frame(
        writer,
        &Message::State {
            player_index: seat,
            game_state,
        },
        CORRELATION_NONE,
    )
    .await
}

/// Reader half: decode frames, answer pings, forward actions in order.
async fn run_reader(
    table: &Arc<Table>,
    seat: Seat,
    reader: &mut OwnedReadHalf,
    reply_tx: &mpsc::Sender<(u32, Message)>,
    kill: &Arc<Notify>,
) -> Result<(), ProtoError> {
    let actions_tx = table.actions_tx();
    loop {
        let (correlation_id, message) = tokio::select! {
            _ = kill.notified() => return Ok(()),
            frame = read_frame(reader) => match frame {
                Ok(frame) => frame,
                Err(ProtoError::Closed) => return Ok(()),
                Err(err) => {
                    // Tell the client what broke, then drop the connection.
                    let code = match err {
                        ProtoError::UnknownMessageType(_) => 500,
                        _ => 400,
                    };
                    let _ = reply_tx
                        .send((CORRELATION_NONE, Message::error(code, err.to_string())))
                        .await;
                    return Err(err);
                }
            },
        };

        let reply = match message {
            Message::Ping => Some(Message::Pong),
            Message::Action { action } => {
                let (result_tx, result_rx) = oneshot::channel();
                let queued = actions_tx.try_send(SeatAction {
                    seat,
                    action,
                    reply: result_tx,
                });
                match queued {
                    Err(_) => Some(Message::error(503, "too many pipelined requests")),
                    Ok(()) => match result_rx.await {
                        Ok(Ok(())) => Some(Message::Ack),
                        Ok(Err(err)) => Some(Message::error(400, err.to_string())),
                        Err(_) => Some(Message::error(500, "failed to process action")),
                    },
                }
            }
            Message::Pong | Message::Ack => Some(Message::error(400, "stray message")),
            _ => Some(Message::error(500, "not implemented")),
        };

        if let Some(reply) = reply {
            if correlation_id == CORRELATION_NONE {
                debug!(seat, "discarding reply to one-shot message");
            } else if reply_tx.send((correlation_id, reply)).await.is_err() {
                return Ok(());
            }
        }
    }
}
