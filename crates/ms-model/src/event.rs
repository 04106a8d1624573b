//! Event kinds and gated events.

use std::fmt;

use ms_core::{DwellingId, EntityId, PersonId};

/// Every transition the models can execute.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum EventKind {
    Birth,
    Death,
    Birthday,
    Marriage,
    Divorce,
    LeaveParentalHousehold,
    FindJob,
    QuitJob,
    Construction,
    Demolition,
    Renovation,
    Pricing,
}

impl EventKind {
    pub const ALL: [EventKind; 12] = [
        EventKind::Birth,
        EventKind::Death,
        EventKind::Birthday,
        EventKind::Marriage,
        EventKind::Divorce,
        EventKind::LeaveParentalHousehold,
        EventKind::FindJob,
        EventKind::QuitJob,
        EventKind::Construction,
        EventKind::Demolition,
        EventKind::Renovation,
        EventKind::Pricing,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tag of the keyed random sub-stream used for this event's draws.
    #[inline]
    pub fn stream(self) -> u64 {
        self as u64 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Birth                  => "birth",
            EventKind::Death                  => "death",
            EventKind::Birthday               => "birthday",
            EventKind::Marriage               => "marriage",
            EventKind::Divorce                => "divorce",
            EventKind::LeaveParentalHousehold => "leave_parental_household",
            EventKind::FindJob                => "find_job",
            EventKind::QuitJob                => "quit_job",
            EventKind::Construction           => "construction",
            EventKind::Demolition             => "demolition",
            EventKind::Renovation             => "renovation",
            EventKind::Pricing                => "pricing",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event about to happen to one existing entity.
///
/// Construction has no variant: its subject does not exist until the event
/// executes, so there is nothing to gate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Event {
    /// The subject is the mother.
    Birth(PersonId),
    Death(PersonId),
    Birthday(PersonId),
    Marriage(PersonId),
    Divorce(PersonId),
    LeaveParentalHousehold(PersonId),
    FindJob(PersonId),
    QuitJob(PersonId),
    Demolition(DwellingId),
    Renovation(DwellingId),
    Pricing(DwellingId),
}

impl Event {
    pub fn kind(self) -> EventKind {
        match self {
            Event::Birth(_)                  => EventKind::Birth,
            Event::Death(_)                  => EventKind::Death,
            Event::Birthday(_)               => EventKind::Birthday,
            Event::Marriage(_)               => EventKind::Marriage,
            Event::Divorce(_)                => EventKind::Divorce,
            Event::LeaveParentalHousehold(_) => EventKind::LeaveParentalHousehold,
            Event::FindJob(_)                => EventKind::FindJob,
            Event::QuitJob(_)                => EventKind::QuitJob,
            Event::Demolition(_)             => EventKind::Demolition,
            Event::Renovation(_)             => EventKind::Renovation,
            Event::Pricing(_)                => EventKind::Pricing,
        }
    }

    /// Raw id of the subject (person or dwelling, depending on the kind).
    pub fn subject(self) -> u32 {
        match self {
            Event::Birth(p)
            | Event::Death(p)
            | Event::Birthday(p)
            | Event::Marriage(p)
            | Event::Divorce(p)
            | Event::LeaveParentalHousehold(p)
            | Event::FindJob(p)
            | Event::QuitJob(p) => p.raw(),
            Event::Demolition(d) | Event::Renovation(d) | Event::Pricing(d) => d.raw(),
        }
    }

    /// Kinds that may not follow this one for the same subject in one year.
    pub(crate) fn conflicts(self) -> &'static [EventKind] {
        match self {
            Event::Marriage(_) => &[EventKind::Marriage, EventKind::Divorce],
            Event::Divorce(_) => &[EventKind::Divorce, EventKind::Marriage],
            Event::FindJob(_) | Event::QuitJob(_) => &[EventKind::FindJob, EventKind::QuitJob],
            Event::Demolition(_) => &[EventKind::Demolition],
            Event::Renovation(_) => &[EventKind::Renovation, EventKind::Demolition],
            Event::Pricing(_) => &[EventKind::Pricing, EventKind::Demolition],
            Event::Birth(_) => &[EventKind::Birth],
            Event::Death(_) => &[EventKind::Death],
            Event::Birthday(_) => &[EventKind::Birthday],
            Event::LeaveParentalHousehold(_) => &[EventKind::LeaveParentalHousehold],
        }
    }
}
