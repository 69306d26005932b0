use buscapet::adoption::{Animal, AnimalFilter, FilterQuery};
use buscapet::config::AppConfig;
use buscapet::error::AppError;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::catalog::seed_catalog;
use crate::infra::in_memory_service;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Species label (Dog/Cat, Cachorro/Gato)
    #[arg(long)]
    pub(crate) species: Option<String>,
    /// Size label (Small/Medium/Large, Pequeno/Médio/Grande)
    #[arg(long)]
    pub(crate) size: Option<String>,
    /// Minimum age in months (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) min_age: Option<i32>,
    /// Maximum age in months (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) max_age: Option<i32>,
    /// Only animals with this vaccination flag
    #[arg(long)]
    pub(crate) vaccinated: Option<bool>,
    /// Only animals with this neutered flag
    #[arg(long)]
    pub(crate) neutered: Option<bool>,
    /// Availability status (Available, InProcess, Adopted, or any shelter label)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Emit matches as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    fn query(&self) -> FilterQuery {
        FilterQuery {
            species: self.species.clone(),
            size: self.size.clone(),
            min_age: self.min_age,
            max_age: self.max_age,
            vaccinated: self.vaccinated,
            neutered: self.neutered,
            status: self.status.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnimalRow<'a> {
    name: &'a str,
    species: &'static str,
    size: &'static str,
    age_months: u32,
    status: &'a str,
    vaccinated: bool,
    neutered: bool,
}

impl<'a> From<&'a Animal> for AnimalRow<'a> {
    fn from(animal: &'a Animal) -> Self {
        Self {
            name: animal.name(),
            species: animal.species().label(),
            size: animal.size().label(),
            age_months: animal.age_months(),
            status: animal.status().label(),
            vaccinated: animal.is_vaccinated(),
            neutered: animal.is_neutered(),
        }
    }
}

pub(crate) fn run_search(config: &AppConfig, args: SearchArgs) -> Result<(), AppError> {
    let filter = AnimalFilter::try_from(args.query())?;

    let service = in_memory_service(config.policy);
    seed_catalog(&service)?;
    let matches = service.search(&filter)?;
    info!(
        active_filters = filter.active_filter_count(),
        matches = matches.len(),
        "catalog searched"
    );

    let rows: Vec<AnimalRow<'_>> = matches.iter().map(AnimalRow::from).collect();
    if args.json {
        let rendered = serde_json::to_string_pretty(&rows)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "{} match(es) with {} active filter(s)",
        rows.len(),
        filter.active_filter_count()
    );
    for row in &rows {
        println!(
            "- {:<8} {:<4} {:<7} {:>3} months  {:<10} vaccinated={} neutered={}",
            row.name,
            row.species,
            row.size,
            row.age_months,
            row.status,
            row.vaccinated,
            row.neutered
        );
    }
    Ok(())
}
