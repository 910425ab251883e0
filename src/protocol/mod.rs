//! RCON protocol handling module
//!
//! This module contains the packet codec and the response classifier used
//! by the session and whitelist layers.

mod packet;
mod response;

pub use packet::{CodecError, Packet, decode, decode_frame, decode_within, encode, write_packet};
pub use response::{
    FORMAT_PREFIX, ResponseClass, classify, is_error_response, is_list_response, parse_whitelist,
    strip_formatting,
};
