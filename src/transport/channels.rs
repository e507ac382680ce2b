use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Channel, Direction};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// The gateway's channel shape: identical to [`Channel`] except that
/// `configuration` is an ordered list of `{name, value}` pairs instead of a
/// mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChannelWire {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<i64>,
    #[serde(default)]
    configuration: Vec<ConfigurationPair>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigurationPair {
    name: String,
    value: String,
}

impl ChannelWire {
    fn into_domain(self) -> Channel {
        // Last pair wins when the gateway repeats a name.
        let configuration = self
            .configuration
            .into_iter()
            .map(|pair| (pair.name, pair.value))
            .collect::<BTreeMap<_, _>>();

        Channel {
            name: self.name,
            kind: self.kind,
            protocol: self.protocol,
            direction: self.direction,
            enabled: self.enabled,
            priority: self.priority,
            configuration,
            extra: self.extra,
        }
    }

    fn from_domain(channel: &Channel) -> Self {
        let configuration = channel
            .configuration
            .iter()
            .map(|(name, value)| ConfigurationPair {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        Self {
            name: channel.name.clone(),
            kind: channel.kind.clone(),
            protocol: channel.protocol.clone(),
            direction: channel.direction,
            enabled: channel.enabled,
            priority: channel.priority,
            configuration,
            extra: channel.extra.clone(),
        }
    }
}

/// Serialize a channel into the gateway's wire shape. The input is only
/// borrowed; its `configuration` mapping stays a mapping.
pub fn encode_channel_json(channel: &Channel) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&ChannelWire::from_domain(channel))?)
}

pub fn decode_channel_json(json: &str) -> Result<Channel, TransportError> {
    let wire: ChannelWire = serde_json::from_str(json)?;
    Ok(wire.into_domain())
}

pub fn decode_channel_list_json(json: &str) -> Result<Vec<Channel>, TransportError> {
    let wire: Vec<ChannelWire> = serde_json::from_str(json)?;
    Ok(wire.into_iter().map(ChannelWire::into_domain).collect())
}

#[derive(Debug, Clone, Deserialize)]
struct ValidationErrorWire {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    properties: Vec<BTreeMap<String, String>>,
}

/// Decode the structured validation body the gateway returns for a rejected
/// channel create/update: `{"summary": "...", "properties": [{field: message}]}`.
///
/// Returns `None` when the body has some other shape, so the caller can fall
/// back to a plain HTTP-status error.
pub fn decode_validation_error_json(json: &str) -> Option<(String, BTreeMap<String, String>)> {
    let wire: ValidationErrorWire = serde_json::from_str(json).ok()?;
    let summary = wire.summary?;
    let properties = wire
        .properties
        .into_iter()
        .flat_map(BTreeMap::into_iter)
        .collect();
    Some((summary, properties))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_turns_pair_list_into_mapping() {
        let json = r#"{"name":"A","configuration":[{"name":"foo","value":"bar"}]}"#;
        let channel = decode_channel_json(json).unwrap();
        assert_eq!(channel.name, "A");
        assert_eq!(
            channel.configuration.get("foo").map(String::as_str),
            Some("bar")
        );
    }

    #[test]
    fn decode_keeps_last_value_for_duplicate_names() {
        let json = r#"{"name":"A","configuration":[
            {"name":"foo","value":"first"},
            {"name":"foo","value":"second"}
        ]}"#;
        let channel = decode_channel_json(json).unwrap();
        assert_eq!(channel.configuration.len(), 1);
        assert_eq!(
            channel.configuration.get("foo").map(String::as_str),
            Some("second")
        );
    }

    #[test]
    fn decode_yields_empty_mapping_for_absent_or_empty_configuration() {
        let channel = decode_channel_json(r#"{"name":"A"}"#).unwrap();
        assert!(channel.configuration.is_empty());

        let channel = decode_channel_json(r#"{"name":"A","configuration":[]}"#).unwrap();
        assert!(channel.configuration.is_empty());
    }

    #[test]
    fn decode_preserves_unmodeled_fields() {
        let json = r#"{"name":"A","configuration":[],"address":"sms://1"}"#;
        let channel = decode_channel_json(json).unwrap();
        assert_eq!(
            channel.extra.get("address").and_then(|v| v.as_str()),
            Some("sms://1")
        );
    }

    #[test]
    fn encode_turns_mapping_into_pair_list() {
        let mut channel = Channel::new("foo", "qst_server", "sms");
        channel
            .configuration
            .insert("password".to_owned(), "secret".to_owned());
        channel
            .configuration
            .insert("host".to_owned(), "example.com".to_owned());

        let json = encode_channel_json(&channel).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["configuration"],
            serde_json::json!([
                {"name": "host", "value": "example.com"},
                {"name": "password", "value": "secret"}
            ])
        );
    }

    #[test]
    fn encode_then_decode_recovers_the_configuration_mapping() {
        let mut channel = Channel::new("foo", "qst_server", "sms");
        channel.direction = Some(Direction::Bidirectional);
        channel.enabled = Some(true);
        channel.priority = Some(20);
        channel
            .configuration
            .insert("port".to_owned(), "4550".to_owned());
        channel
            .configuration
            .insert("password".to_owned(), "secret".to_owned());

        let json = encode_channel_json(&channel).unwrap();
        let roundtripped = decode_channel_json(&json).unwrap();
        assert_eq!(roundtripped, channel);
    }

    #[test]
    fn encode_does_not_touch_the_input() {
        let mut channel = Channel::new("foo", "qst_server", "sms");
        channel
            .configuration
            .insert("password".to_owned(), "secret".to_owned());
        let before = channel.clone();

        encode_channel_json(&channel).unwrap();
        assert_eq!(channel, before);
    }

    #[test]
    fn decode_channel_list_reshapes_every_element() {
        let json = r#"[
            {"name":"A","configuration":[{"name":"k","value":"1"}]},
            {"name":"B","configuration":[]}
        ]"#;
        let channels = decode_channel_list_json(json).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(
            channels[0].configuration.get("k").map(String::as_str),
            Some("1")
        );
        assert!(channels[1].configuration.is_empty());
    }

    #[test]
    fn decode_validation_error_flattens_properties() {
        let json = r#"{"summary":"invalid","properties":[{"kind":"unknown kind"},{"name":"taken"}]}"#;
        let (summary, properties) = decode_validation_error_json(json).unwrap();
        assert_eq!(summary, "invalid");
        assert_eq!(properties.get("kind").map(String::as_str), Some("unknown kind"));
        assert_eq!(properties.get("name").map(String::as_str), Some("taken"));
    }

    #[test]
    fn decode_validation_error_rejects_other_shapes() {
        assert!(decode_validation_error_json("").is_none());
        assert!(decode_validation_error_json("<html>oops</html>").is_none());
        assert!(decode_validation_error_json(r#"{"error":"nope"}"#).is_none());
    }
}
