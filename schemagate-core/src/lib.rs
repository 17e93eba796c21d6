// schemagate-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrats: SchemaSource, DocumentStore, Executor, ServerPlugin...
pub mod ports;

// 2. Domain (Cœur du métier)
// Schéma, documents, abonnements, configuration serveur.
// Ne dépend que des Ports.
pub mod domain;

// 3. Infrastructure (Adapters)
// Sources de schéma (static, gateway), cache LRU, chargement YAML.
pub mod infrastructure;

// 4. Application (Use Cases)
// Hôte serveur: cycle de vie, wiring depuis la configuration.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::SchemaGateError;
