//! Categorical attributes shared by the registry and every model crate.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[inline]
    pub fn opposite(self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    White,
    Black,
    Hispanic,
    Other,
}

impl Race {
    pub const ALL: [Race; 4] = [Race::White, Race::Black, Race::Hispanic, Race::Other];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Position of a person within their household.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Single,
    Married,
    Child,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    /// Not in the labour force (toddlers, retirees).
    #[default]
    None,
    Employed,
    Unemployed,
    Student,
}

/// Structural category of a dwelling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DwellingType {
    SingleFamilyDetached,
    SingleFamilyAttached,
    MultiFamilySmall,
    MultiFamilyLarge,
    MobileHome,
}

impl DwellingType {
    pub const ALL: [DwellingType; 5] = [
        DwellingType::SingleFamilyDetached,
        DwellingType::SingleFamilyAttached,
        DwellingType::MultiFamilySmall,
        DwellingType::MultiFamilyLarge,
        DwellingType::MobileHome,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label, used for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            DwellingType::SingleFamilyDetached => "SFD",
            DwellingType::SingleFamilyAttached => "SFA",
            DwellingType::MultiFamilySmall     => "MF234",
            DwellingType::MultiFamilyLarge     => "MF5plus",
            DwellingType::MobileHome           => "MH",
        }
    }
}

impl fmt::Display for DwellingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
