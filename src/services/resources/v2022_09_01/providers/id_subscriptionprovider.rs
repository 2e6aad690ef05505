use crate::resourceids::{
    resource_id_traits, ParseResult, ResourceId, ResourceIdError, Segment, SubscriptionId,
};

/// A resource provider namespace as seen from one subscription
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionProviderId {
    pub subscription_id: String,
    pub provider_name: String,
}

impl SubscriptionProviderId {
    pub fn new(subscription_id: impl Into<String>, provider_name: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            provider_name: provider_name.into(),
        }
    }

    pub fn subscription(&self) -> SubscriptionId {
        SubscriptionId::new(&self.subscription_id)
    }
}

impl ResourceId for SubscriptionProviderId {
    const ID_TYPE: &'static str = "Subscription Provider";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::user_specified("providerName", "providerName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            subscription_id: result.required("subscriptionId")?,
            provider_name: result.required("providerName")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Subscription", self.subscription_id.as_str()),
            ("Provider Name", self.provider_name.as_str()),
        ]
    }
}

resource_id_traits!(SubscriptionProviderId);
