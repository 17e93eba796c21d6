// schemagate-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaGateError {
    // --- ERREURS DU DOMAINE (Chargement de schéma, cycle de vie) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}
