use std::fmt;

use serde::Serialize;

use crate::errors::PlannerError;

/// Identifies a group. Derived from the group's display name, or taken
/// verbatim from a join link.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derives a slug from a display name: lowercased, with each run of
    /// whitespace replaced by a single hyphen.
    ///
    /// ```
    /// use planner::slug::Slug;
    /// assert_eq!(Slug::from_name("Friday  Night Crew").as_str(), "friday-night-crew");
    /// ```
    pub fn from_name(name: &str) -> Self {
        let lowercased = name.to_lowercase();
        let words: Vec<&str> = lowercased.split_whitespace().collect();

        Slug(words.join("-"))
    }

    /// Takes a slug from a (percent-encoded) path segment.
    pub fn from_segment(segment: &str) -> Result<Self, PlannerError> {
        let decoded = urlencoding::decode(segment)
            .map_err(|_| PlannerError::InvalidSlug(segment.to_owned()))?;

        if decoded.is_empty() {
            return Err(PlannerError::InvalidSlug(segment.to_owned()));
        }

        Ok(Slug(decoded.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rebuilds a display name from the slug by turning hyphens into
    /// spaces and capitalizing each word. Words are runs of alphanumerics
    /// and underscores. This is lossy: "McAllister Fans" comes back as
    /// "Mcallister Fans".
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.0.len());
        let mut at_word_start = true;

        for c in self.0.chars() {
            let c = if c == '-' { ' ' } else { c };

            if c.is_alphanumeric() || c == '_' {
                if at_word_start {
                    name.extend(c.to_uppercase());
                } else {
                    name.push(c);
                }
                at_word_start = false;
            } else {
                name.push(c);
                at_word_start = true;
            }
        }

        name
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
