use serde::{Deserialize, Serialize};

use super::account::MIN_SECRET_LENGTH;

/// Deployment-level dials applied by the adoption service on top of the entity rules.
///
/// The pre-approval threshold is an entity rule and is not tunable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionPolicy {
    pub min_secret_length: usize,
}

impl Default for AdoptionPolicy {
    fn default() -> Self {
        Self {
            min_secret_length: MIN_SECRET_LENGTH,
        }
    }
}
