use crate::resourceids::{resource_id_traits, ParseResult, ResourceId, ResourceIdError, Segment};

/// An API version in an API Center workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub service_name: String,
    pub workspace_name: String,
    pub api_name: String,
    pub version_name: String,
}

impl VersionId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        service_name: impl Into<String>,
        workspace_name: impl Into<String>,
        api_name: impl Into<String>,
        version_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            service_name: service_name.into(),
            workspace_name: workspace_name.into(),
            api_name: api_name.into(),
            version_name: version_name.into(),
        }
    }
}

impl ResourceId for VersionId {
    const ID_TYPE: &'static str = "Version";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftApiCenter", "Microsoft.ApiCenter"),
            Segment::static_segment("staticServices", "services"),
            Segment::user_specified("serviceName", "serviceName"),
            Segment::static_segment("staticWorkspaces", "workspaces"),
            Segment::user_specified("workspaceName", "workspaceName"),
            Segment::static_segment("staticApis", "apis"),
            Segment::user_specified("apiName", "apiName"),
            Segment::static_segment("staticVersions", "versions"),
            Segment::user_specified("versionName", "versionName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            subscription_id: result.required("subscriptionId")?,
            resource_group_name: result.required("resourceGroupName")?,
            service_name: result.required("serviceName")?,
            workspace_name: result.required("workspaceName")?,
            api_name: result.required("apiName")?,
            version_name: result.required("versionName")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Subscription", self.subscription_id.as_str()),
            ("Resource Group Name", self.resource_group_name.as_str()),
            ("Service Name", self.service_name.as_str()),
            ("Workspace Name", self.workspace_name.as_str()),
            ("Api Name", self.api_name.as_str()),
            ("Version Name", self.version_name.as_str()),
        ]
    }
}

resource_id_traits!(VersionId);
