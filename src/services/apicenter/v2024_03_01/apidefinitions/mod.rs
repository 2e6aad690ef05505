//! API Center API definitions.

mod client;
mod constants;
mod id_definition;
mod id_version;
mod models;
mod predicates;

pub use client::{ApiDefinitionsClient, CreateOrUpdateOperationOptions, ListOperationOptions};
pub use constants::{ApiSpecExportResultFormat, ApiSpecImportSourceFormat};
pub use id_definition::DefinitionId;
pub use id_version::VersionId;
pub use models::{
    ApiDefinition, ApiDefinitionProperties, ApiDefinitionPropertiesSpecification, ApiSpecExportResult,
    ApiSpecImportRequest, ApiSpecImportRequestSpecification,
};
pub use predicates::ApiDefinitionOperationPredicate;
