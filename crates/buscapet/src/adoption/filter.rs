use serde::{Deserialize, Serialize};

use super::animal::Animal;
use super::domain::{AnimalStatus, DomainError, Size, Species};

/// Search predicate over animals. Every unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredFilter")]
pub struct AnimalFilter {
    species: Option<Species>,
    size: Option<Size>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    vaccinated: Option<bool>,
    neutered: Option<bool>,
    status: Option<AnimalStatus>,
}

#[derive(Deserialize)]
struct StoredFilter {
    #[serde(default)]
    species: Option<Species>,
    #[serde(default)]
    size: Option<Size>,
    #[serde(default)]
    min_age: Option<u32>,
    #[serde(default)]
    max_age: Option<u32>,
    #[serde(default)]
    vaccinated: Option<bool>,
    #[serde(default)]
    neutered: Option<bool>,
    #[serde(default)]
    status: Option<AnimalStatus>,
}

impl TryFrom<StoredFilter> for AnimalFilter {
    type Error = DomainError;

    fn try_from(stored: StoredFilter) -> Result<Self, Self::Error> {
        if let (Some(min), Some(max)) = (stored.min_age, stored.max_age) {
            if min > max {
                return Err(DomainError::argument(format!(
                    "minimum age {min} is greater than maximum age {max}"
                )));
            }
        }
        let status = match stored.status {
            Some(AnimalStatus::Other(label)) => Some(label.parse()?),
            other => other,
        };

        Ok(Self {
            species: stored.species,
            size: stored.size,
            min_age: stored.min_age,
            max_age: stored.max_age,
            vaccinated: stored.vaccinated,
            neutered: stored.neutered,
            status,
        })
    }
}

impl AnimalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_species(&mut self, species: Option<Species>) {
        self.species = species;
    }

    pub fn set_size(&mut self, size: Option<Size>) {
        self.size = size;
    }

    /// Constrain age in months. Bounds must be non-negative and `min <= max` when both are set.
    pub fn set_age_range(&mut self, min: Option<i32>, max: Option<i32>) -> Result<(), DomainError> {
        let min = min
            .map(|value| {
                u32::try_from(value)
                    .map_err(|_| DomainError::argument("minimum age must not be negative"))
            })
            .transpose()?;
        let max = max
            .map(|value| {
                u32::try_from(value)
                    .map_err(|_| DomainError::argument("maximum age must not be negative"))
            })
            .transpose()?;

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(DomainError::argument(format!(
                    "minimum age {min} is greater than maximum age {max}"
                )));
            }
        }

        self.min_age = min;
        self.max_age = max;
        Ok(())
    }

    pub fn set_vaccinated(&mut self, vaccinated: Option<bool>) {
        self.vaccinated = vaccinated;
    }

    pub fn set_neutered(&mut self, neutered: Option<bool>) {
        self.neutered = neutered;
    }

    pub fn set_status(&mut self, status: Option<AnimalStatus>) {
        self.status = status;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, animal: &Animal) -> bool {
        if self.species.is_some_and(|species| animal.species() != species) {
            return false;
        }
        if self.size.is_some_and(|size| animal.size() != size) {
            return false;
        }
        if self.min_age.is_some_and(|min| animal.age_months() < min) {
            return false;
        }
        if self.max_age.is_some_and(|max| animal.age_months() > max) {
            return false;
        }
        if self
            .vaccinated
            .is_some_and(|vaccinated| animal.is_vaccinated() != vaccinated)
        {
            return false;
        }
        if self
            .neutered
            .is_some_and(|neutered| animal.is_neutered() != neutered)
        {
            return false;
        }
        if let Some(status) = &self.status {
            if !animal.status().same_as(status) {
                return false;
            }
        }
        true
    }

    /// Number of active constraints; the age range counts once.
    pub fn active_filter_count(&self) -> usize {
        [
            self.species.is_some(),
            self.size.is_some(),
            self.min_age.is_some() || self.max_age.is_some(),
            self.vaccinated.is_some(),
            self.neutered.is_some(),
            self.status.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Matching animals, in input order.
    pub fn select<'a>(&self, animals: &'a [Animal]) -> Vec<&'a Animal> {
        animals.iter().filter(|animal| self.matches(animal)).collect()
    }

    pub fn species(&self) -> Option<Species> {
        self.species
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn min_age(&self) -> Option<u32> {
        self.min_age
    }

    pub fn max_age(&self) -> Option<u32> {
        self.max_age
    }

    pub fn vaccinated(&self) -> Option<bool> {
        self.vaccinated
    }

    pub fn neutered(&self) -> Option<bool> {
        self.neutered
    }

    pub fn status(&self) -> Option<&AnimalStatus> {
        self.status.as_ref()
    }
}

/// Raw search parameters as received from an outer layer (query string, CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub species: Option<String>,
    pub size: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub vaccinated: Option<bool>,
    pub neutered: Option<bool>,
    pub status: Option<String>,
}

impl TryFrom<FilterQuery> for AnimalFilter {
    type Error = DomainError;

    fn try_from(query: FilterQuery) -> Result<Self, Self::Error> {
        let mut filter = AnimalFilter::new();
        filter.set_species(query.species.as_deref().map(str::parse).transpose()?);
        filter.set_size(query.size.as_deref().map(str::parse).transpose()?);
        filter.set_age_range(query.min_age, query.max_age)?;
        filter.set_vaccinated(query.vaccinated);
        filter.set_neutered(query.neutered);
        filter.set_status(query.status.as_deref().map(str::parse).transpose()?);
        Ok(filter)
    }
}
