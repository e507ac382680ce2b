use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// An application-originated (AO) message: sent from the application, through
/// the gateway, to an end recipient.
///
/// Addresses are protocol-qualified URIs such as `sms://5551234`. The same
/// shape is returned by [`crate::NuntiumClient::get_ao`] for delivery lookups,
/// where the gateway may add fields (state, guid, timestamps) that land in
/// `extra`.
pub struct AoMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Correlation token; assign one to group sends, or let the gateway pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AoMessage {
    /// Create a message with the usual four fields filled in.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            subject: Some(subject.into()),
            body: Some(body.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A send-AO request: one message or a batch.
///
/// The two forms hit different gateway endpoints and return different receipt
/// detail, see [`SendAoReceipt`].
pub enum SendAo {
    Single(AoMessage),
    Batch(Vec<AoMessage>),
}

impl SendAo {
    pub fn single(message: AoMessage) -> Self {
        Self::Single(message)
    }

    pub fn batch(messages: Vec<AoMessage>) -> Self {
        Self::Batch(messages)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Receipt for a send-AO call, read from the gateway's response headers.
///
/// A single send yields `id`, `guid` and `token`; a batch send yields only
/// `token` (there is no single id/guid to report). Any header the gateway
/// omits is `None`.
pub struct SendAoReceipt {
    pub id: Option<String>,
    pub guid: Option<String>,
    pub token: Option<String>,
}
