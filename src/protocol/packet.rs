//! RCON packet framing
//!
//! Pure framing: this module knows nothing about authentication or
//! whitelist semantics.
//!
//! # Wire format
//!
//! ```text
//! +0   length      (i32 LE) = 4 + 4 + len(body) + 2
//! +4   request_id  (i32 LE)
//! +8   type        (i32 LE)
//! +12  body        (UTF-8, len(body) bytes)
//! +..  0x00 0x00
//! ```

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout_at};

use crate::constants::packet_type;
use crate::constants::request_id;
use crate::constants::wire::{
    HEADER_AND_TERMINATOR, LENGTH_PREFIX, MAX_PACKET_LENGTH, MIN_PACKET_LENGTH, TERMINATOR,
};

/// Errors produced while reading or writing a frame
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Nothing arrived before the deadline
    #[error("timed out waiting for packet")]
    TimedOut,

    /// The peer closed or stalled before the declared length was delivered
    #[error("truncated packet: declared {declared} bytes, received {received}")]
    Truncated { declared: usize, received: usize },

    /// The length prefix is outside the legal range
    #[error("invalid packet length {0}")]
    InvalidLength(i32),

    /// Underlying socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// True when the frame itself is malformed (as opposed to a socket problem)
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::InvalidLength(_))
    }
}

/// One framed unit of the RCON protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub request_id: i32,
    pub packet_type: i32,
    pub body: String,
}

impl Packet {
    pub fn new(request_id: i32, packet_type: i32, body: impl Into<String>) -> Self {
        Self {
            request_id,
            packet_type,
            body: body.into(),
        }
    }

    /// Login packet carrying the password
    #[must_use]
    pub fn auth(password: &str) -> Self {
        Self::new(request_id::AUTH, packet_type::AUTH, password)
    }

    /// Command packet for the single command of a session
    #[must_use]
    pub fn command(text: &str) -> Self {
        Self::new(request_id::COMMAND, packet_type::EXEC_COMMAND, text)
    }

    /// Encode this packet into its wire form
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self.request_id, self.packet_type, &self.body)
    }
}

/// Build a frame for `(request_id, packet_type, body)`
///
/// # Examples
/// ```
/// use rcon_whitelist::protocol::encode;
///
/// let frame = encode(1, 3, "pw");
/// assert_eq!(&frame[..4], &12i32.to_le_bytes());
/// assert_eq!(&frame[frame.len() - 2..], &[0, 0]);
/// ```
#[must_use]
pub fn encode(request_id: i32, packet_type: i32, body: &str) -> Vec<u8> {
    let body = body.as_bytes();
    let length = HEADER_AND_TERMINATOR + body.len();

    let mut frame = Vec::with_capacity(LENGTH_PREFIX + length);
    frame.extend_from_slice(&(length as i32).to_le_bytes());
    frame.extend_from_slice(&request_id.to_le_bytes());
    frame.extend_from_slice(&packet_type.to_le_bytes());
    frame.extend_from_slice(body);
    frame.extend_from_slice(&TERMINATOR);
    frame
}

/// Write a packet and flush it
pub async fn write_packet<W>(writer: &mut W, packet: &Packet) -> Result<(), CodecError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&packet.to_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Validate a length prefix and convert it to a byte count
fn checked_length(raw: i32) -> Result<usize, CodecError> {
    usize::try_from(raw)
        .ok()
        .filter(|len| (MIN_PACKET_LENGTH..=MAX_PACKET_LENGTH).contains(len))
        .ok_or(CodecError::InvalidLength(raw))
}

/// Split the `length` bytes following the prefix into a packet
fn split_payload(payload: &[u8]) -> Packet {
    let request_id = i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let packet_type = i32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
    // Trailing two bytes are the terminator; body is decoded lossily
    let body = String::from_utf8_lossy(&payload[8..payload.len() - 2]).into_owned();

    Packet {
        request_id,
        packet_type,
        body,
    }
}

/// Decode one complete frame held in memory (length prefix included)
///
/// The slice must contain exactly one frame.
pub fn decode_frame(frame: &[u8]) -> Result<Packet, CodecError> {
    if frame.len() < LENGTH_PREFIX {
        return Err(CodecError::Truncated {
            declared: LENGTH_PREFIX,
            received: frame.len(),
        });
    }

    let raw = i32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]);
    let declared = checked_length(raw)?;
    let payload = &frame[LENGTH_PREFIX..];

    if payload.len() != declared {
        return Err(CodecError::Truncated {
            declared,
            received: payload.len(),
        });
    }

    Ok(split_payload(payload))
}

/// Read one packet from `reader` with no deadline
pub async fn decode<R>(reader: &mut R) -> Result<Packet, CodecError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; LENGTH_PREFIX];
    read_fully(reader, &mut prefix, None).await?;

    let declared = checked_length(i32::from_le_bytes(prefix))?;
    let mut payload = vec![0u8; declared];
    read_fully(reader, &mut payload, None).await?;

    Ok(split_payload(&payload))
}

/// Read one packet from `reader`, bounded by `timeout`
///
/// A deadline that expires before the first byte of the length prefix is
/// [`CodecError::TimedOut`]. A deadline that expires once the frame has
/// started arriving is [`CodecError::Truncated`]: the peer sent fewer bytes
/// than it declared. A `timeout` too large to represent as an instant
/// means no deadline.
pub async fn decode_within<R>(reader: &mut R, timeout: Duration) -> Result<Packet, CodecError>
where
    R: AsyncRead + Unpin,
{
    let deadline = Instant::now().checked_add(timeout);

    let mut prefix = [0u8; LENGTH_PREFIX];
    read_fully(reader, &mut prefix, deadline).await?;

    let declared = checked_length(i32::from_le_bytes(prefix))?;
    let mut payload = vec![0u8; declared];
    read_fully(reader, &mut payload, deadline)
        .await
        .map_err(|e| match e {
            // The prefix already arrived, so a stall here is a short frame
            CodecError::TimedOut => CodecError::Truncated {
                declared,
                received: 0,
            },
            other => other,
        })?;

    Ok(split_payload(&payload))
}

/// Fill `buf` completely, tracking how much arrived so short reads can be reported
async fn read_fully<R>(
    reader: &mut R,
    buf: &mut [u8],
    deadline: Option<Instant>,
) -> Result<(), CodecError>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;

    while filled < buf.len() {
        let read = match deadline {
            Some(deadline) => match timeout_at(deadline, reader.read(&mut buf[filled..])).await {
                Ok(result) => result?,
                Err(_) if filled == 0 => return Err(CodecError::TimedOut),
                Err(_) => {
                    return Err(CodecError::Truncated {
                        declared: buf.len(),
                        received: filled,
                    });
                }
            },
            None => reader.read(&mut buf[filled..]).await?,
        };

        if read == 0 {
            return Err(CodecError::Truncated {
                declared: buf.len(),
                received: filled,
            });
        }
        filled += read;
    }

    Ok(())
}
