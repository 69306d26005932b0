/// Boundary between account state and how secrets are stored and compared.
///
/// Production deployments plug a one-way hash in here; the account only ever sees the
/// digest it was handed at registration.
pub trait CredentialHasher: Send + Sync {
    fn digest(&self, secret: &str) -> String;
    fn verify(&self, secret: &str, stored: &str) -> bool;
}

/// Keeps secrets verbatim and compares them exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextCredentials;

impl CredentialHasher for PlaintextCredentials {
    fn digest(&self, secret: &str) -> String {
        secret.to_string()
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        secret == stored
    }
}
