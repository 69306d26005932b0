use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Failure raised by entity operations. Raised before any field is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl DomainError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Identifier wrapper for registered animals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimalId(pub String);

/// Identifier wrapper for submitted adoption applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for platform accounts (adopters, shelters, admins).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Species accepted on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
        }
    }
}

impl FromStr for Species {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "dog" | "cachorro" => Ok(Self::Dog),
            "cat" | "gato" => Ok(Self::Cat),
            _ => Err(DomainError::argument(format!(
                "species must be Dog or Cat, got '{value}'"
            ))),
        }
    }
}

/// Size category ("porte") of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "small" | "pequeno" => Ok(Self::Small),
            "medium" | "médio" | "medio" => Ok(Self::Medium),
            "large" | "grande" => Ok(Self::Large),
            _ => Err(DomainError::argument(format!(
                "size must be Small, Medium or Large, got '{value}'"
            ))),
        }
    }
}

/// Availability of an animal. `Other` carries free-form statuses set by shelters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalStatus {
    Available,
    InProcess,
    Adopted,
    Other(String),
}

impl AnimalStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Available => "Available",
            Self::InProcess => "InProcess",
            Self::Adopted => "Adopted",
            Self::Other(label) => label,
        }
    }

    /// Equality for search: free-form labels compare case-insensitively.
    pub fn same_as(&self, other: &AnimalStatus) -> bool {
        match (self, other) {
            (Self::Other(left), Self::Other(right)) => left.to_lowercase() == right.to_lowercase(),
            _ => self == other,
        }
    }
}

impl FromStr for AnimalStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if is_blank(value) {
            return Err(DomainError::argument("status must not be blank"));
        }

        let label = value.trim();
        let status = match label.to_lowercase().as_str() {
            "available" | "disponível" | "disponivel" => Self::Available,
            "inprocess" | "in process" | "in_process" | "em processo" => Self::InProcess,
            "adopted" | "adotado" => Self::Adopted,
            _ => Self::Other(label.to_string()),
        };
        Ok(status)
    }
}

/// Review workflow status of an adoption application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Received,
    UnderReview,
    PreApproved,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::UnderReview => "UnderReview",
            Self::PreApproved => "PreApproved",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Account type chosen at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Adopter,
    Organization,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adopter => "Adopter",
            Self::Organization => "Organization",
            Self::Admin => "Admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "adopter" | "adotante" => Ok(Self::Adopter),
            "organization" | "ong" => Ok(Self::Organization),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::argument(format!(
                "role must be Adopter, Organization or Admin, got '{value}'"
            ))),
        }
    }
}

/// Review state of a shelter ("ONG") account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganizationStatus {
    Pending,
    Verified,
    Rejected,
}

impl OrganizationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_via_label!(Species, Size, AnimalStatus, ApplicationStatus, Role, OrganizationStatus);
