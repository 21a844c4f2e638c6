use url::{ParseError, Url};

use crate::slug::Slug;

/// Convenience wrapper for URL generation functions.
#[derive(Clone, Debug)]
pub struct Urls {
    /// Public origin, including trailing slash.
    base: Url,
}

impl Urls {
    /// Creates a new instance. A trailing slash is added to `base` if
    /// it's missing, so links stay under any path prefix it has.
    pub fn new(base: impl AsRef<str>) -> Result<Self, ParseError> {
        let mut base = Url::parse(base.as_ref())?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Urls { base })
    }

    /// The link to share with people invited to a group.
    pub fn join_link(&self, slug: &Slug) -> Result<Url, ParseError> {
        self.base
            .join(&format!("join/{}", urlencoding::encode(slug.as_str())))
    }

    /// The path of a group's join page, as seen by browsers.
    pub fn join_path(&self, slug: &Slug) -> Result<String, ParseError> {
        Ok(self.join_link(slug)?.path().to_owned())
    }
}
