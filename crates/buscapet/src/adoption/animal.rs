use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{is_blank, AnimalId, AnimalStatus, DomainError, Size, Species, UserId};

/// An animal listed for adoption by a shelter.
///
/// Deserialization runs the same checks as [`Animal::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnimalRecord")]
pub struct Animal {
    id: Option<AnimalId>,
    name: String,
    species: Species,
    size: Size,
    age_months: u32,
    shelter_id: UserId,
    status: AnimalStatus,
    vaccinated: bool,
    neutered: bool,
}

/// Stored shape of an [`Animal`], validated on the way in.
#[derive(Deserialize)]
struct AnimalRecord {
    #[serde(default)]
    id: Option<AnimalId>,
    name: String,
    species: Species,
    size: Size,
    age_months: u32,
    shelter_id: UserId,
    status: AnimalStatus,
    #[serde(default)]
    vaccinated: bool,
    #[serde(default)]
    neutered: bool,
}

impl TryFrom<AnimalRecord> for Animal {
    type Error = DomainError;

    fn try_from(record: AnimalRecord) -> Result<Self, Self::Error> {
        if is_blank(&record.name) {
            return Err(DomainError::argument("animal name is required"));
        }
        if is_blank(&record.shelter_id.0) {
            return Err(DomainError::argument("shelter id is required"));
        }
        let status = match record.status {
            AnimalStatus::Other(label) => label.parse()?,
            known => known,
        };

        Ok(Self {
            id: record.id,
            name: record.name.trim().to_string(),
            species: record.species,
            size: record.size,
            age_months: record.age_months,
            shelter_id: record.shelter_id,
            status,
            vaccinated: record.vaccinated,
            neutered: record.neutered,
        })
    }
}

impl Animal {
    /// Register a new animal. Starts `Available`, not vaccinated, not neutered.
    pub fn new(
        name: &str,
        species: Species,
        size: Size,
        age_months: i32,
        shelter_id: UserId,
    ) -> Result<Self, DomainError> {
        if is_blank(name) {
            return Err(DomainError::argument("animal name is required"));
        }
        let age_months = u32::try_from(age_months)
            .map_err(|_| DomainError::argument("age must not be negative"))?;

        Ok(Self {
            id: None,
            name: name.trim().to_string(),
            species,
            size,
            age_months,
            shelter_id,
            status: AnimalStatus::Available,
            vaccinated: false,
            neutered: false,
        })
    }

    /// Same as [`Animal::new`] but parses species and size from raw labels.
    pub fn from_labels(
        name: &str,
        species: &str,
        size: &str,
        age_months: i32,
        shelter_id: UserId,
    ) -> Result<Self, DomainError> {
        Self::new(name, species.parse()?, size.parse()?, age_months, shelter_id)
    }

    pub fn assign_id(&mut self, id: AnimalId) {
        self.id = Some(id);
    }

    pub fn can_be_adopted(&self) -> bool {
        self.status == AnimalStatus::Available
    }

    pub fn mark_adopted(&mut self) -> Result<(), DomainError> {
        if !self.can_be_adopted() {
            return Err(DomainError::state(format!(
                "animal is not available for adoption (status {})",
                self.status
            )));
        }
        self.status = AnimalStatus::Adopted;
        debug!(animal = %self.name, status = %self.status, "animal adopted");
        Ok(())
    }

    /// Overwrite the status with any non-blank label; known labels map to their variant.
    pub fn update_status(&mut self, new_status: &str) -> Result<(), DomainError> {
        let status: AnimalStatus = new_status.parse()?;
        debug!(animal = %self.name, from = %self.status, to = %status, "animal status updated");
        self.status = status;
        Ok(())
    }

    pub fn set_vaccinated(&mut self, vaccinated: bool) {
        self.vaccinated = vaccinated;
    }

    pub fn set_neutered(&mut self, neutered: bool) {
        self.neutered = neutered;
    }

    pub fn id(&self) -> Option<&AnimalId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn age_months(&self) -> u32 {
        self.age_months
    }

    pub fn shelter_id(&self) -> &UserId {
        &self.shelter_id
    }

    pub fn status(&self) -> &AnimalStatus {
        &self.status
    }

    pub fn is_vaccinated(&self) -> bool {
        self.vaccinated
    }

    pub fn is_neutered(&self) -> bool {
        self.neutered
    }
}
