//! Resource provider registrations.

mod client;
mod id_subscriptionprovider;
mod models;
mod predicates;

pub use client::{GetOperationOptions, ListOperationOptions, ProvidersClient};
pub use id_subscriptionprovider::SubscriptionProviderId;
pub use models::{Provider, ProviderResourceType};
pub use predicates::ProviderOperationPredicate;
