//! Domain layer: the shapes callers work with (no I/O).

mod channel;
mod message;
mod reference;

pub use channel::{Channel, Direction};
pub use message::{AoMessage, SendAo, SendAoReceipt};
pub use reference::{Carrier, Country, CustomAttributes};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_new_fills_required_fields() {
        let channel = Channel::new("foo", "qst_server", "sms");
        assert_eq!(channel.name, "foo");
        assert_eq!(channel.kind.as_deref(), Some("qst_server"));
        assert_eq!(channel.protocol.as_deref(), Some("sms"));
        assert!(channel.configuration.is_empty());
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Direction::Bidirectional).unwrap(),
            r#""bidirectional""#
        );
        assert_eq!(
            serde_json::to_string(&Direction::Outbound).unwrap(),
            r#""outbound""#
        );
    }

    #[test]
    fn direction_accepts_legacy_spellings() {
        let d: Direction = serde_json::from_str(r#""incoming""#).unwrap();
        assert_eq!(d, Direction::Inbound);
        let d: Direction = serde_json::from_str(r#""outgoing""#).unwrap();
        assert_eq!(d, Direction::Outbound);
    }

    #[test]
    fn ao_message_skips_absent_fields_when_serialized() {
        let message = AoMessage {
            to: Some("sms://5551234".to_owned()),
            body: Some("hi".to_owned()),
            ..AoMessage::default()
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"to":"sms://5551234","body":"hi"}"#);
    }

    #[test]
    fn ao_message_keeps_unknown_fields_in_extra() {
        let json = r#"{"from":"sms://1","to":"sms://2","state":"delivered"}"#;
        let message: AoMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.from.as_deref(), Some("sms://1"));
        assert_eq!(
            message.extra.get("state").and_then(|v| v.as_str()),
            Some("delivered")
        );
    }

    #[test]
    fn country_tolerates_missing_iso3() {
        let country: Country = serde_json::from_str(r#"{"name":"Argentina","iso2":"ar"}"#).unwrap();
        assert_eq!(country.name, "Argentina");
        assert_eq!(country.iso2, "ar");
        assert_eq!(country.iso3, None);
    }
}
