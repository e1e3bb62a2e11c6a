//! Stream codec for the framed message bus.
//!
//! Frame layout, all integers little-endian:
//!
//! ```text
//! magic: u16 = 0x2342 | version: u8 = 0 | type: u16 | correlation: u32 | len: u16 | payload
//! ```
//!
//! Payloads are JSON and capped at 65535 bytes.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::messages::{Message, ProtoError, MAX_PAYLOAD_SIZE};

pub const FRAME_MAGIC: u16 = 0x2342;
pub const PROTOCOL_VERSION: u8 = 0;

const HEADER_LEN: usize = 11;

/// Write one framed message with the given correlation id.
pub async fn write_frame<W>(
    writer: &mut W,
    message: &Message,
    correlation_id: u32,
) -> Result<(), ProtoError>
where
    W: AsyncWrite + Unpin,
{
    let payload = message.encode_payload()?;

    let mut header = [0u8; HEADER_LEN];
    header[0..2].copy_from_slice(&FRAME_MAGIC.to_le_bytes());
    header[2] = PROTOCOL_VERSION;
    header[3..5].copy_from_slice(&message.type_code().to_le_bytes());
    header[5..9].copy_from_slice(&correlation_id.to_le_bytes());
    header[9..11].copy_from_slice(&(payload.len() as u16).to_le_bytes());

    writer.write_all(&header).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed message, returning its correlation id.
///
/// A clean EOF at a frame boundary maps to [`ProtoError::Closed`]; any
/// malformed header closes the stream with the specific violation.
pub async fn read_frame<R>(reader: &mut R) -> Result<(u32, Message), ProtoError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; HEADER_LEN];
    if let Err(err) = reader.read_exact(&mut header).await {
        return Err(match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ProtoError::Closed,
            _ => ProtoError::Io(err),
        });
    }

    let magic = u16::from_le_bytes([header[0], header[1]]);
    if magic != FRAME_MAGIC {
        return Err(ProtoError::ProtocolViolation);
    }
    if header[2] != PROTOCOL_VERSION {
        return Err(ProtoError::WrongVersion);
    }
    let type_code = u16::from_le_bytes([header[3], header[4]]);
    let correlation_id = u32::from_le_bytes([header[5], header[6], header[7], header[8]]);
    let len = u16::from_le_bytes([header[9], header[10]]) as usize;
    if len > MAX_PAYLOAD_SIZE {
        return Err(ProtoError::MessageTooLong);
    }

    let mut payload = vec![0u8; len];
    if let Err(err) = reader.read_exact(&mut payload).await {
        return Err(match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ProtoError::Closed,
            _ => ProtoError::Io(err),
        });
    }

    let message = Message::decode(type_code, &payload)?;
    Ok((correlation_id, message))
}
