use chrono::Utc;
use std::env;

const DEFAULT_LOCATION: &str = "westeurope";
const DEFAULT_LOCATION_ALT: &str = "eastus2";
const DEFAULT_LOCATION_ALT2: &str = "westus2";

/// Regions a test may deploy into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub primary: String,
    pub secondary: String,
    pub ternary: String,
}

impl Locations {
    /// `ARM_TEST_LOCATION`, `ARM_TEST_LOCATION_ALT` and `ARM_TEST_LOCATION_ALT2`,
    /// falling back to fixed regions when unset
    pub fn from_env() -> Self {
        let read = |key: &str, default: &str| {
            env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            primary: read("ARM_TEST_LOCATION", DEFAULT_LOCATION),
            secondary: read("ARM_TEST_LOCATION_ALT", DEFAULT_LOCATION_ALT),
            ternary: read("ARM_TEST_LOCATION_ALT2", DEFAULT_LOCATION_ALT2),
        }
    }
}

impl Default for Locations {
    fn default() -> Self {
        Self {
            primary: DEFAULT_LOCATION.to_string(),
            secondary: DEFAULT_LOCATION_ALT.to_string(),
            ternary: DEFAULT_LOCATION_ALT2.to_string(),
        }
    }
}

/// Per-test naming data, so parallel runs don't collide
#[derive(Debug, Clone)]
pub struct TestData {
    /// e.g. `azurerm_storage_account`
    pub resource_type: String,
    pub resource_label: String,
    /// `{resource_type}.{resource_label}`, the address in Terraform state
    pub resource_name: String,
    pub random_integer: i64,
    /// Five lowercase alphanumerics, for names that reject dashes
    pub random_string: String,
    pub locations: Locations,
}

impl TestData {
    pub fn build(resource_type: &str, resource_label: &str) -> Self {
        Self::with_locations(resource_type, resource_label, Locations::from_env())
    }

    pub fn with_locations(resource_type: &str, resource_label: &str, locations: Locations) -> Self {
        let entropy = uuid::Uuid::new_v4().simple().to_string();

        Self {
            resource_type: resource_type.to_string(),
            resource_label: resource_label.to_string(),
            resource_name: format!("{resource_type}.{resource_label}"),
            random_integer: random_time_int(&entropy),
            random_string: entropy.chars().take(5).collect(),
            locations,
        }
    }
}

/// The current UTC time as `yyMMddHHmmss`, followed by two digits hashed
/// from the first bytes of `entropy` (a random UUID in [`TestData`])
fn random_time_int(entropy: &str) -> i64 {
    let stamp = Utc::now().format("%y%m%d%H%M%S").to_string();
    let suffix = entropy
        .bytes()
        .take(4)
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)))
        % 100;
    format!("{stamp}{suffix:02}").parse().unwrap_or_default()
}
