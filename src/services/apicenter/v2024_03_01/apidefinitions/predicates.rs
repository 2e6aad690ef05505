use super::ApiDefinition;

/// Client-side filter for listed API definitions; unset fields match anything
#[derive(Debug, Clone, Default)]
pub struct ApiDefinitionOperationPredicate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub type_: Option<String>,
}

impl ApiDefinitionOperationPredicate {
    pub fn matches(&self, input: &ApiDefinition) -> bool {
        if self.id.is_some() && self.id != input.id {
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
