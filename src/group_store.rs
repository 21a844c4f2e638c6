use std::sync::Arc;

use crate::errors::StoreError;
use crate::member::Roster;
use crate::slug::Slug;
use crate::store::Store;

/// Reads and writes whole groups on top of a key-value store.
#[derive(Clone)]
pub struct GroupStore {
    store: Arc<dyn Store>,
}

/// The key a group's members are saved under.
pub fn members_key(slug: &Slug) -> String {
    format!("group-members-{}", slug)
}

/// The key a group's display name is saved under.
pub fn name_key(slug: &Slug) -> String {
    format!("group-name-{}", slug)
}

impl GroupStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        GroupStore { store }
    }

    /// Loads the members of the group. Returns `None` if nobody has
    /// joined yet.
    pub async fn load(&self, slug: &Slug) -> Result<Option<Roster>, StoreError> {
        let key = members_key(slug);

        let raw = self.store.get(&key).await?;

        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt { key, source }),
            None => Ok(None),
        }
    }

    /// Loads the members of the group, treating a group nobody has
    /// joined as empty.
    pub async fn load_or_default(&self, slug: &Slug) -> Result<Roster, StoreError> {
        Ok(self.load(slug).await?.unwrap_or_default())
    }

    /// Replaces every saved member of the group with `roster`.
    pub async fn save(&self, slug: &Slug, roster: &Roster) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(roster).map_err(|source| StoreError::Serialize { source })?;

        self.store.put(&members_key(slug), raw).await
    }

    /// The name the group was created with, or one rebuilt from the
    /// slug if it wasn't recorded.
    pub async fn display_name(&self, slug: &Slug) -> Result<String, StoreError> {
        let key = name_key(slug);

        let raw = self.store.get(&key).await?;

        match raw {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { key, source })
            }
            None => Ok(slug.display_name()),
        }
    }

    /// Records the name the group was created with, unless one was
    /// recorded already.
    pub async fn remember_display_name(&self, slug: &Slug, name: &str) -> Result<(), StoreError> {
        let key = name_key(slug);

        if self.store.get(&key).await?.is_some() {
            return Ok(());
        }

        let raw = serde_json::to_string(name).map_err(|source| StoreError::Serialize { source })?;

        self.store.put(&key, raw).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::date;

    use super::GroupStore;
    use crate::availability::{Availability, Slot};
    use crate::errors::StoreError;
    use crate::member::Roster;
    use crate::slug::Slug;
    use crate::store::{MemoryStore, Store};

    fn make_groups() -> (Arc<MemoryStore>, GroupStore) {
        let store = Arc::new(MemoryStore::new());

        (store.clone(), GroupStore::new(store))
    }

    #[tokio::test]
    async fn unknown_groups_have_no_record() {
        let (_, groups) = make_groups();
        let slug = Slug::from_name("Nobody Here");

        assert_eq!(groups.load(&slug).await.unwrap(), None);
        assert!(groups.load_or_default(&slug).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_records_are_reported() {
        let store = Arc::new(MemoryStore::with_entries(vec![(
            "group-members-broken",
            "{not json",
        )]));
        let groups = GroupStore::new(store);

        let result = groups.load(&Slug::from_name("broken")).await;

        match result {
            Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, "group-members-broken"),
            other => panic!("expected a corrupt record, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn records_of_the_wrong_shape_are_corrupt() {
        let store = Arc::new(MemoryStore::with_entries(vec![(
            "group-members-odd",
            r#"{"name":"Alex"}"#,
        )]));
        let groups = GroupStore::new(store);

        assert!(matches!(
            groups.load(&Slug::from_name("odd")).await,
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn saving_and_loading_preserves_order() {
        let (store, groups) = make_groups();
        let slug = Slug::from_name("Friday Night Crew");

        let mut roster = Roster::default();
        let alex = roster.join("Alex");
        roster.join("Sam");
        let member = roster.get_mut(alex).unwrap();
        member.add(Availability::new(date!(2024 - 07 - 06), Slot::AllDay));
        member.add(Availability::new(date!(2024 - 07 - 05), Slot::Afternoon));

        groups.save(&slug, &roster).await.unwrap();

        assert_eq!(groups.load(&slug).await.unwrap(), Some(roster));
        assert_eq!(
            store.peek("group-members-friday-night-crew").as_deref(),
            Some(
                r#"[{"name":"Alex","availability":[{"date":"2024-07-06","slot":"allday"},{"date":"2024-07-05","slot":"pm"}]},{"name":"Sam","availability":[]}]"#
            )
        );
    }

    #[tokio::test]
    async fn display_names_fall_back_to_the_slug() {
        let (_, groups) = make_groups();
        let slug = Slug::from_name("book club");

        assert_eq!(groups.display_name(&slug).await.unwrap(), "Book Club");
    }

    #[tokio::test]
    async fn first_recorded_display_name_wins() {
        let (store, groups) = make_groups();
        let slug = Slug::from_name("McAllister Fans");

        groups.remember_display_name(&slug, "McAllister Fans").await.unwrap();
        groups.remember_display_name(&slug, "MCALLISTER FANS").await.unwrap();

        assert_eq!(groups.display_name(&slug).await.unwrap(), "McAllister Fans");
        assert_eq!(store.get("group-members-mcallister-fans").await.unwrap(), None);
    }
}
