use super::ManagementLockObject;

#[derive(Debug, Clone, Default)]
pub struct ManagementLockObjectOperationPredicate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub type_: Option<String>,
}

impl ManagementLockObjectOperationPredicate {
    pub fn matches(&self, input: &ManagementLockObject) -> bool {
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
