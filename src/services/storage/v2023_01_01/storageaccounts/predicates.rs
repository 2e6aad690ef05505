use super::{Kind, StorageAccount};

/// Client-side filter for listed storage accounts; unset fields match anything
#[derive(Debug, Clone, Default)]
pub struct StorageAccountOperationPredicate {
    pub id: Option<String>,
    pub kind: Option<Kind>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub type_: Option<String>,
}

impl StorageAccountOperationPredicate {
    pub fn matches(&self, input: &StorageAccount) -> bool {
        if self.id.is_some() && self.id != input.id {
            return false;
        }

        if self.kind.is_some() && self.kind != input.kind {
            return false;
        }

        if let Some(location) = &self.location {
            if *location != input.location {
                return false;
            }
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
