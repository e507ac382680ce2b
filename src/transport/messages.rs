use crate::domain::AoMessage;

use super::channels::TransportError;

/// Response headers carrying the receipt for a send-AO call.
pub const HEADER_AO_ID: &str = "X-Nuntium-Id";
pub const HEADER_AO_GUID: &str = "X-Nuntium-Guid";
pub const HEADER_AO_TOKEN: &str = "X-Nuntium-Token";

/// Encode an AO message as query-string pairs, in a fixed field order so the
/// resulting URL is deterministic. Extra fields follow the known ones.
pub fn encode_ao_query(message: &AoMessage) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    push_field(&mut params, "from", message.from.as_deref());
    push_field(&mut params, "to", message.to.as_deref());
    push_field(&mut params, "subject", message.subject.as_deref());
    push_field(&mut params, "body", message.body.as_deref());
    push_field(&mut params, "token", message.token.as_deref());

    for (name, value) in &message.extra {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        params.push((name.clone(), rendered));
    }

    params
}

fn push_field(params: &mut Vec<(String, String)>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((name.to_owned(), value.to_owned()));
    }
}

pub fn decode_ao_list_json(json: &str) -> Result<Vec<AoMessage>, TransportError> {
    Ok(serde_json::from_str(json)?)
}

/// Case-insensitive header lookup, per HTTP semantics. Returns the first match.
pub fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
