use super::ResourceGroup;

/// Client-side filter for listed resource groups; unset fields match anything
#[derive(Debug, Clone, Default)]
pub struct ResourceGroupOperationPredicate {
    pub id: Option<String>,
    pub location: Option<String>,
    pub managed_by: Option<String>,
    pub name: Option<String>,
    pub type_: Option<String>,
}

impl ResourceGroupOperationPredicate {
    pub fn matches(&self, input: &ResourceGroup) -> bool {
        if self.id.is_some() && self.id != input.id {
            return false;
        }

        if let Some(location) = &self.location {
            if *location != input.location {
                return false;
            }
        }

        if self.managed_by.is_some() && self.managed_by != input.managed_by {
            return false;
        }

        if self.name.is_some() && self.name != input.name {
            return false;
        }

        if self.type_.is_some() && self.type_ != input.type_ {
            return false;
        }

        true
    }
}
