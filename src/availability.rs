use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::Date;

use crate::errors::PlannerError;

/// A window of the day someone can be available in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Slot {
    #[serde(rename = "am")]
    Morning,
    #[serde(rename = "pm")]
    Afternoon,
    #[serde(rename = "l8")]
    Late,
    #[serde(rename = "allday")]
    AllDay,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Morning, Slot::Afternoon, Slot::Late, Slot::AllDay];

    /// The value used in storage and forms.
    pub fn value(self) -> &'static str {
        match self {
            Slot::Morning => "am",
            Slot::Afternoon => "pm",
            Slot::Late => "l8",
            Slot::AllDay => "allday",
        }
    }

    /// The label shown to people.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Morning => "AM",
            Slot::Afternoon => "PM",
            Slot::Late => "L8",
            Slot::AllDay => "ALLDAY",
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::AllDay
    }
}

impl FromStr for Slot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .iter()
            .copied()
            .find(|slot| slot.value() == s)
            .ok_or_else(|| PlannerError::InvalidSlot(s.to_owned()))
    }
}

/// One date and slot a member is available for.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Availability {
    #[serde(serialize_with = "serialize_date", deserialize_with = "deserialize_date")]
    pub date: Date,
    pub slot: Slot,
}

impl Availability {
    pub fn new(date: Date, slot: Slot) -> Self {
        Availability { date, slot }
    }

    /// Parses the raw form fields. A missing slot means all day.
    pub fn parse(date: &str, slot: Option<&str>) -> Result<Self, PlannerError> {
        let date = parse_date(date)?;
        let slot = match slot {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => Slot::default(),
        };

        Ok(Availability { date, slot })
    }
}

/// Formats as an abbreviated month, day, and slot label, e.g. `Jul 5 PM`.
impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.date.month().to_string();

        write!(
            f,
            "{} {} {}",
            &month[..3],
            self.date.day(),
            self.slot.label()
        )
    }
}

/// Parses a date in `YYYY-MM-DD` form, as sent by `<input type="date">`.
pub fn parse_date(raw: &str) -> Result<Date, PlannerError> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| PlannerError::InvalidDate(raw.to_owned()))
}

/// Formats a date in `YYYY-MM-DD` form.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(D::Error::custom)
}
