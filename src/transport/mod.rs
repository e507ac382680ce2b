//! Transport layer: wire-format details the gateway imposes (the channel
//! configuration pair-list shape, query-string encoding, receipt headers).

mod channels;
mod messages;

pub use channels::{
    decode_channel_json, decode_channel_list_json, decode_validation_error_json,
    encode_channel_json,
};
pub use messages::{
    HEADER_AO_GUID, HEADER_AO_ID, HEADER_AO_TOKEN, decode_ao_list_json, encode_ao_query,
    find_header,
};
