use crate::availability::Availability;
use crate::errors::PlannerError;
use crate::member::{Member, Roster};

/// Where a visitor stands with respect to one group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Session {
    NotJoined,

    /// Joined as the member at the given position in the roster.
    Joined { member: usize },
}

/// Something a visitor did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    JoinSubmitted { name: String },
    AvailabilityAdded(Availability),
    AvailabilityRemoved(Availability),
}

/// What applying an event did to the roster.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Joined,
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl Outcome {
    /// Whether the roster has to be saved.
    pub fn changed(self) -> bool {
        match self {
            Outcome::Joined | Outcome::Added | Outcome::Removed => true,
            Outcome::AlreadyPresent | Outcome::NotPresent => false,
        }
    }
}

impl Session {
    /// Restores a session from the member position a client sent back.
    /// Anything that doesn't name a current member means the visitor
    /// hasn't joined.
    pub fn resume(member: Option<&str>, roster: &Roster) -> Self {
        member
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|&position| position < roster.len())
            .map_or(Session::NotJoined, |member| Session::Joined { member })
    }

    /// The member this session acts as, if joined.
    pub fn member<'a>(&self, roster: &'a Roster) -> Option<&'a Member> {
        match *self {
            Session::Joined { member } => roster.get(member),
            Session::NotJoined => None,
        }
    }

    /// Applies `event` to `roster` and returns the next session.
    /// Joining is allowed from any state and always adds a new member;
    /// availability changes require having joined.
    pub fn apply(self, roster: &mut Roster, event: Event) -> Result<(Session, Outcome), PlannerError> {
        match event {
            Event::JoinSubmitted { name } => {
                if name.trim().is_empty() {
                    return Err(PlannerError::BlankName);
                }

                let member = roster.join(name);

                Ok((Session::Joined { member }, Outcome::Joined))
            }
            Event::AvailabilityAdded(entry) => {
                let member = self.member_mut(roster)?;
                let outcome = if member.add(entry) {
                    Outcome::Added
                } else {
                    Outcome::AlreadyPresent
                };

                Ok((self, outcome))
            }
            Event::AvailabilityRemoved(entry) => {
                let member = self.member_mut(roster)?;
                let outcome = if member.remove(&entry) {
                    Outcome::Removed
                } else {
                    Outcome::NotPresent
                };

                Ok((self, outcome))
            }
        }
    }

    fn member_mut<'a>(&self, roster: &'a mut Roster) -> Result<&'a mut Member, PlannerError> {
        match *self {
            Session::Joined { member } => roster.get_mut(member).ok_or(PlannerError::NotJoined),
            Session::NotJoined => Err(PlannerError::NotJoined),
        }
    }
}
