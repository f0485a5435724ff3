//! Closed option lists offered by the user forms.
//!
//! Wire labels are the Spanish labels shown in the dashboard; unknown
//! labels fail deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dashboard access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Viewer,
    User,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Viewer, Self::User, Self::Admin];

    pub fn label(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }
}

/// Per-user grant over user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    Create,
    Read,
    Update,
    Delete,
}

impl Permission {
    pub const ALL: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffType {
    #[serde(rename = "Docente")]
    Teacher,
    #[serde(rename = "Administrativo")]
    Administrative,
    #[serde(rename = "Directivo")]
    Management,
}

impl StaffType {
    pub const ALL: [Self; 3] = [Self::Teacher, Self::Administrative, Self::Management];

    pub fn label(self) -> &'static str {
        match self {
            Self::Teacher => "Docente",
            Self::Administrative => "Administrativo",
            Self::Management => "Directivo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Matemáticas")]
    Mathematics,
    #[serde(rename = "Lenguaje")]
    Language,
    #[serde(rename = "Ciencias")]
    Science,
    #[serde(rename = "Historia")]
    History,
    #[serde(rename = "Administración")]
    Administration,
}

impl Department {
    pub const ALL: [Self; 5] = [
        Self::Mathematics,
        Self::Language,
        Self::Science,
        Self::History,
        Self::Administration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mathematics => "Matemáticas",
            Self::Language => "Lenguaje",
            Self::Science => "Ciencias",
            Self::History => "Historia",
            Self::Administration => "Administración",
        }
    }
}

/// Employment regime of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "Planta")]
    Permanent,
    #[serde(rename = "Contrata")]
    FixedTerm,
    #[serde(rename = "Honorarios")]
    Fees,
}

impl ContractType {
    pub const ALL: [Self; 3] = [Self::Permanent, Self::FixedTerm, Self::Fees];

    pub fn label(self) -> &'static str {
        match self {
            Self::Permanent => "Planta",
            Self::FixedTerm => "Contrata",
            Self::Fees => "Honorarios",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Matemáticas")]
    Mathematics,
    #[serde(rename = "Lenguaje")]
    Language,
    #[serde(rename = "Ciencias")]
    Science,
    #[serde(rename = "Historia")]
    History,
    #[serde(rename = "Inglés")]
    English,
    #[serde(rename = "Educación Física")]
    PhysicalEducation,
}

impl Subject {
    pub const ALL: [Self; 6] = [
        Self::Mathematics,
        Self::Language,
        Self::Science,
        Self::History,
        Self::English,
        Self::PhysicalEducation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mathematics => "Matemáticas",
            Self::Language => "Lenguaje",
            Self::Science => "Ciencias",
            Self::History => "Historia",
            Self::English => "Inglés",
            Self::PhysicalEducation => "Educación Física",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_label!(Role, Permission, StaffType, Department, ContractType, Subject);
