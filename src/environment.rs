use std::sync::Arc;

use log::Logger;

use crate::group_store::GroupStore;
use crate::store::Store;
use crate::urls::Urls;

/// Everything a route handler needs.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub groups: GroupStore,
    pub urls: Arc<Urls>,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, store: Arc<dyn Store>, urls: Arc<Urls>) -> Self {
        Self {
            logger,
            groups: GroupStore::new(store),
            urls,
        }
    }
}
