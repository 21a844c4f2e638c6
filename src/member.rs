use serde::{Deserialize, Serialize};

use crate::availability::Availability;

/// Someone who joined a group.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Member {
    /// The name given when joining. Not unique.
    pub name: String,

    /// The dates and slots this member is available for, in the order
    /// they were added.
    #[serde(default)]
    pub availability: Vec<Availability>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            availability: Vec::new(),
        }
    }

    /// Appends `entry` unless the same date and slot are already
    /// present. Returns whether anything changed.
    pub fn add(&mut self, entry: Availability) -> bool {
        if self.availability.contains(&entry) {
            return false;
        }

        self.availability.push(entry);
        true
    }

    /// Removes the first entry equal to `entry`, if any. Returns whether
    /// anything changed.
    pub fn remove(&mut self, entry: &Availability) -> bool {
        match self.availability.iter().position(|a| a == entry) {
            Some(index) => {
                self.availability.remove(index);
                true
            }
            None => false,
        }
    }

    /// The availability as shown in the roster, e.g. `Jul 5 PM, Jul 6
    /// AM`, or `None` if there isn't any.
    pub fn summary(&self) -> Option<String> {
        if self.availability.is_empty() {
            return None;
        }

        let entries: Vec<String> = self.availability.iter().map(ToString::to_string).collect();

        Some(entries.join(", "))
    }
}

/// Everyone in a group, in the order they joined.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    /// Appends a new member with no availability and returns their
    /// position.
    pub fn join(&mut self, name: impl Into<String>) -> usize {
        self.members.push(Member::new(name));

        self.members.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&Member> {
        self.members.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Member> {
        self.members.get_mut(position)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
