use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// A country known to the gateway. Immutable reference data.
pub struct Country {
    pub name: String,
    pub iso2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// A carrier known to the gateway. Immutable reference data; the country
/// association rides in `extra` in whatever shape the gateway uses.
pub struct Carrier {
    pub guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Per-address custom attributes, keyed externally by an address URI such as
/// `sms://5551234`. Values are arbitrary JSON.
pub type CustomAttributes = BTreeMap<String, serde_json::Value>;
