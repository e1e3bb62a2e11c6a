//! Framed wire protocol: message types and the stream codec.

pub mod frame;
pub mod messages;

pub use frame::{read_frame, write_frame};
pub use messages::{Message, ProtoError, CORRELATION_NONE, MAX_PAYLOAD_SIZE};
