use serde::Serialize;
use warp::reject;

use crate::errors::PlannerError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: PlannerError,
}

impl Rejection {
    pub fn new(context: Context, error: PlannerError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

/// The operation that failed.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    AddAvailability { group: String },
    ApiCreateGroup { name: String },
    ApiGroup { group: String },
    CreateGroup { name: String },
    Group { group: String },
    Join { group: String },
    RemoveAvailability { group: String },
}

impl Context {
    pub fn add_availability(group: String) -> Context {
        Context::AddAvailability { group }
    }

    pub fn api_create_group(name: String) -> Context {
        Context::ApiCreateGroup { name }
    }

    pub fn api_group(group: String) -> Context {
        Context::ApiGroup { group }
    }

    pub fn create_group(name: String) -> Context {
        Context::CreateGroup { name }
    }

    pub fn group(group: String) -> Context {
        Context::Group { group }
    }

    pub fn join(group: String) -> Context {
        Context::Join { group }
    }

    pub fn remove_availability(group: String) -> Context {
        Context::RemoveAvailability { group }
    }

    /// Whether the failed request expects JSON rather than a page.
    pub fn is_api(&self) -> bool {
        matches!(self, Context::ApiCreateGroup { .. } | Context::ApiGroup { .. })
    }
}
