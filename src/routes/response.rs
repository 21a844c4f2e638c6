use serde::Serialize;

use crate::member::Roster;
use crate::slug::Slug;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Created {
        slug: &'a Slug,
        name: &'a str,
        link: &'a str,
    },
    Group {
        slug: &'a Slug,
        name: &'a str,
        members: &'a Roster,
    },
    Healthz {
        revision: Option<&'a str>,
        timestamp: Option<&'a str>,
        version: &'a str,
    },
}
