use serde::Deserialize;

use crate::normalization;

/// A submitted group or member name.
#[derive(Debug, Deserialize)]
pub struct NameForm {
    #[serde(deserialize_with = "normalization::deserialize")]
    pub name: String,
}

/// A submitted date and slot. The slot is optional when adding.
#[derive(Debug, Deserialize)]
pub struct AvailabilityForm {
    pub date: String,
    #[serde(default)]
    pub slot: Option<String>,
}
