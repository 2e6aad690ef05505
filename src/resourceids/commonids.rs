//! IDs shared across services.

use super::{resource_id_traits, ParseResult, ResourceId, ResourceIdError, Segment};

/// `/subscriptions/{subscriptionId}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    pub subscription_id: String,
}

impl SubscriptionId {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
        }
    }
}

impl ResourceId for SubscriptionId {
    const ID_TYPE: &'static str = "Subscription";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            subscription_id: result.required("subscriptionId")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![("Subscription", self.subscription_id.as_str())]
    }
}

resource_id_traits!(SubscriptionId);

/// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceGroupId {
    pub subscription_id: String,
    pub resource_group_name: String,
}

impl ResourceGroupId {
    pub fn new(subscription_id: impl Into<String>, resource_group_name: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
        }
    }

    pub fn subscription(&self) -> SubscriptionId {
        SubscriptionId::new(&self.subscription_id)
    }
}

impl ResourceId for ResourceGroupId {
    const ID_TYPE: &'static str = "Resource Group";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            subscription_id: result.required("subscriptionId")?,
            resource_group_name: result.required("resourceGroupName")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Subscription", self.subscription_id.as_str()),
            ("Resource Group Name", self.resource_group_name.as_str()),
        ]
    }
}

resource_id_traits!(ResourceGroupId);

/// Any resource ID used as the parent of an extension resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId {
    pub scope: String,
}

impl ScopeId {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl ResourceId for ScopeId {
    const ID_TYPE: &'static str = "Scope";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[Segment::scope("scope")];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            scope: result.required("scope")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![("Scope", self.scope.as_str())]
    }
}

resource_id_traits!(ScopeId);

impl From<SubscriptionId> for ScopeId {
    fn from(id: SubscriptionId) -> Self {
        Self::new(id.id())
    }
}

impl From<ResourceGroupId> for ScopeId {
    fn from(id: ResourceGroupId) -> Self {
        Self::new(id.id())
    }
}
