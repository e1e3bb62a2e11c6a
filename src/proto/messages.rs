//! Typed messages of the table protocol.
//!
//! Each frame carries a message-type code and a JSON payload. Correlation id
//! 0 marks a one-shot message; a nonzero id pairs a request with its reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BlindedGameState, Seat};
use crate::journal::Action;

pub const CORRELATION_NONE: u32 = 0;
pub const MAX_PAYLOAD_SIZE: usize = 65535;

pub const MSG_PING: u16 = 0x0000;
pub const MSG_PONG: u16 = 0x0001;
pub const MSG_ACTION: u16 = 0x0002;
pub const MSG_STATE: u16 = 0x0004;
pub const MSG_ERROR: u16 = 0x0005;
pub const MSG_LOGIN_REQUEST: u16 = 0x0006;
pub const MSG_LOGIN_OK: u16 = 0x0007;
pub const MSG_ACK: u16 = 0x0008;

/// Protocol-layer failures. These close the offending connection; the rules
/// engine is never involved.
#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("protocol violation")]
    ProtocolViolation,
    #[error("wrong protocol version")]
    WrongVersion,
    #[error("message too long")]
    MessageTooLong,
    #[error("unknown message type {0:#06x}")]
    UnknownMessageType(u16),
    #[error("connection closed")]
    Closed,
    #[error("too many pipelined requests")]
    Pipelining,
    #[error("no reply context")]
    NoReplyContext,
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Ping,
    Pong,
    Action {
        action: Action,
    },
    State {
        player_index: Seat,
        game_state: BlindedGameState,
    },
    Error {
        code: u16,
        message: String,
    },
    LoginRequest {
        server_password: String,
        client_id: String,
        client_secret: String,
    },
    LoginOk,
    Ack,
}

#[derive(Serialize, Deserialize)]
struct ActionPayload {
    action: Action,
}

#[derive(Serialize, Deserialize)]
struct StatePayload {
    #[serde(rename = "playerIndex")]
    player_index: Seat,
    #[serde(rename = "gameState")]
    game_state: BlindedGameState,
}

#[derive(Serialize, Deserialize)]
struct ErrorPayload {
    code: u16,
    message: String,
}

#[derive(Serialize, Deserialize)]
struct LoginRequestPayload {
    #[serde(rename = "serverPassword")]
    server_password: String,
    #[serde(rename = "clientId")]
    client_id: String,
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

#[derive(Serialize, Deserialize)]
struct EmptyPayload {}

impl Message {
    pub fn type_code(&self) -> u16 {
        match self {
            Message::Ping => MSG_PING,
            Message::Pong => MSG_PONG,
            Message::Action { .. } => MSG_ACTION,
            Message::State { .. } => MSG_STATE,
            Message::Error { .. } => MSG_ERROR,
            Message::LoginRequest { .. } => MSG_LOGIN_REQUEST,
            Message::LoginOk => MSG_LOGIN_OK,
            Message::Ack => MSG_ACK,
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Message::Error {
            code,
            message: message.into(),
        }
    }

    pub fn encode_payload(&self) -> Result<Vec<u8>, ProtoError> {
        let bytes = match self {
            Message::Ping | Message::Pong | Message::LoginOk | Message::Ack => {
                serde_json::to_vec(&EmptyPayload {})?
            }
            Message::Action { action } => serde_json::to_vec(&ActionPayload {
                action: action.clone(),
            })?,
            Message::State {
                player_index,
                game_state,
            } => serde_json::to_vec(&StatePayload {
                player_index: *player_index,
                game_state: game_state.clone(),
            })?,
            Message::Error { code, message } => serde_json::to_vec(&ErrorPayload {
                code: *code,
                message: message.clone(),
            })?,
            Message::LoginRequest {
                server_password,
                client_id,
                client_secret,
            } => serde_json::to_vec(&LoginRequestPayload {
                server_password: server_password.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            })?,
        };
        if bytes.len() > MAX_PAYLOAD_SIZE {
            return Err(ProtoError::MessageTooLong);
        }
        Ok(bytes)
    }

    pub fn decode(type_code: u16, payload: &[u8]) -> Result<Self, ProtoError> {
        let msg = match type_code {
            MSG_PING => Message::Ping,
            MSG_PONG => Message::Pong,
            MSG_ACTION => {
                let p: ActionPayload = serde_json::from_slice(payload)?;
                Message::Action { action: p.action }
            }
            MSG_STATE => {
                let p: StatePayload = serde_json::from_slice(payload)?;
                Message::State {
                    player_index: p.player_index,
                    game_state: p.game_state,
                }
            }
            MSG_ERROR => {
                let p: ErrorPayload = serde_json::from_slice(payload)?;
                Message::Error {
                    code: p.code,
                    message: p.message,
                }
            }
            MSG_LOGIN_REQUEST => {
                let p: LoginRequestPayload = serde_json::from_slice(payload)?;
                Message::LoginRequest {
                    server_password: p.server_password,
                    client_id: p.client_id,
                    client_secret: p.client_secret,
                }
            }
            MSG_LOGIN_OK => Message::LoginOk,
            MSG_ACK => Message::Ack,
            other => return Err(ProtoError::UnknownMessageType(other)),
        };
        Ok(msg)
    }
}
