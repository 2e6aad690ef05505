use super::Provider;

/// Client-side filter for listed providers; unset fields match anything
#[derive(Debug, Clone, Default)]
pub struct ProviderOperationPredicate {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub registration_policy: Option<String>,
    pub registration_state: Option<String>,
}

impl ProviderOperationPredicate {
    pub fn matches(&self, input: &Provider) -> bool {
        if self.id.is_some() && self.id != input.id {
            return false;
        }

        if self.namespace.is_some() && self.namespace != input.namespace {
            return false;
        }

        if self.registration_policy.is_some() && self.registration_policy != input.registration_policy {
            return false;
        }

        if self.registration_state.is_some() && self.registration_state != input.registration_state {
            return false;
        }

        true
    }
}
