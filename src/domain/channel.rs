use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Message flow direction of a channel.
pub enum Direction {
    /// Messages flow from the outside world into the application.
    #[serde(alias = "incoming")]
    Inbound,
    /// Messages flow from the application out to recipients.
    #[serde(alias = "outgoing")]
    Outbound,
    /// Both directions.
    Bidirectional,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// A messaging channel managed by the gateway, e.g. an SMS modem or an HTTP
/// connection to a carrier.
///
/// Invariant: `configuration` is always the name → value mapping form in memory.
/// The gateway's wire format uses an ordered list of `{name, value}` pairs; the
/// transport layer converts between the two on every read and write, so callers
/// never see the pair form and the mapping they pass in is never modified.
///
/// Fields the gateway returns that this type does not model are preserved in
/// `extra` and sent back verbatim on update.
pub struct Channel {
    /// Unique channel name within the application.
    pub name: String,
    /// Channel driver, e.g. `"qst_server"` or `"clickatell"`.
    pub kind: Option<String>,
    /// Transport protocol, e.g. `"sms"`.
    pub protocol: Option<String>,
    pub direction: Option<Direction>,
    pub enabled: Option<bool>,
    /// Routing priority; lower values are preferred.
    pub priority: Option<i64>,
    /// Driver-specific options, keyed by option name.
    pub configuration: BTreeMap<String, String>,
    /// Gateway fields not modeled above.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Channel {
    /// Create a channel with the three fields the gateway requires on create.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind.into()),
            protocol: Some(protocol.into()),
            ..Self::default()
        }
    }
}
