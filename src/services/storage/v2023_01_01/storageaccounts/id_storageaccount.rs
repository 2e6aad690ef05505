use crate::resourceids::{
    resource_id_traits, ParseResult, ResourceGroupId, ResourceId, ResourceIdError, Segment,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageAccountId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub storage_account_name: String,
}

impl StorageAccountId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        storage_account_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            storage_account_name: storage_account_name.into(),
        }
    }

    pub fn resource_group(&self) -> ResourceGroupId {
        ResourceGroupId::new(&self.subscription_id, &self.resource_group_name)
    }
}

impl ResourceId for StorageAccountId {
    const ID_TYPE: &'static str = "Storage Account";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftStorage", "Microsoft.Storage"),
            Segment::static_segment("staticStorageAccounts", "storageAccounts"),
            Segment::user_specified("storageAccountName", "storageAccountName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            subscription_id: result.required("subscriptionId")?,
            resource_group_name: result.required("resourceGroupName")?,
            storage_account_name: result.required("storageAccountName")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Subscription", self.subscription_id.as_str()),
            ("Resource Group Name", self.resource_group_name.as_str()),
            ("Storage Account Name", self.storage_account_name.as_str()),
        ]
    }
}

resource_id_traits!(StorageAccountId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let id = StorageAccountId::new("sub1", "rg1", "acct1");
        let formatted = id.to_string();
        assert_eq!(
            formatted,
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/acct1"
        );
        assert_eq!(formatted.parse::<StorageAccountId>().unwrap(), id);
        assert_eq!(id.resource_group(), ResourceGroupId::new("sub1", "rg1"));
    }

    #[test]
    fn test_wrong_resource_type() {
        let err = StorageAccountId::parse(
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Storage/blobServices/acct1",
        )
        .unwrap_err();
        assert_eq!(err.segment(), Some("staticStorageAccounts"));
    }
}
