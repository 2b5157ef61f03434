use serde::{Deserialize, Serialize};

/// A named numeric measurement stream, mapped to the opaque WebID the
/// historian uses to address it.
///
/// The logical name doubles as the column name in a
/// [`SeriesTable`](crate::table::SeriesTable); the WebID travels on the wire
/// and is meaningless outside the historian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Stable logical name, e.g. `ACTUAL_CELOX_O2`.
    pub name: String,
    /// Opaque historian identifier carried in the `webid` query parameter.
    pub web_id: String,
}

impl Channel {
    /// Build a channel from a logical name and its WebID.
    pub fn new(name: impl Into<String>, web_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            web_id: web_id.into(),
        }
    }
}

/// The plant parameter set requested from the historian when no explicit
/// channel table is configured.
#[must_use]
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel::new("ACTUAL_CELOX_O2", "F1DPks1GmbqBeUOtVf2Q0ZCeloxA"),
        Channel::new("ACTUAL_BATH_TEMP", "F1DPks1GmbqBeUOtVf2Q0ZBathTA"),
    ]
}
