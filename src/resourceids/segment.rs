//! Segments making up a resource ID template.

/// What a segment of a resource ID holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A fixed literal such as `subscriptions` or `storageAccounts`
    Static,
    /// A fixed provider namespace such as `Microsoft.Storage`
    ResourceProvider,
    SubscriptionId,
    ResourceGroup,
    UserSpecified,
    /// A variable-length parent resource ID; only valid as the first segment
    Scope,
}

/// One named segment of a resource ID template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub name: &'static str,
    pub kind: SegmentKind,
    pub fixed_value: Option<&'static str>,
    pub example_value: &'static str,
}

impl Segment {
    pub const fn static_segment(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Static,
            fixed_value: Some(value),
            example_value: value,
        }
    }

    pub const fn resource_provider(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::ResourceProvider,
            fixed_value: Some(value),
            example_value: value,
        }
    }

    pub const fn subscription_id(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::SubscriptionId,
            fixed_value: None,
            example_value: "12345678-1234-9876-4563-123456789012",
        }
    }

    pub const fn resource_group(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::ResourceGroup,
            fixed_value: None,
            example_value: "example-resource-group",
        }
    }

    pub const fn user_specified(name: &'static str, example_value: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::UserSpecified,
            fixed_value: None,
            example_value,
        }
    }

    pub const fn scope(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Scope,
            fixed_value: None,
            example_value: "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/some-resource-group",
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed_value.is_some()
    }

    /// Whether `value` matches this fixed segment
    pub(crate) fn matches(&self, value: &str, insensitively: bool) -> bool {
        match self.fixed_value {
            Some(expected) if insensitively => expected.eq_ignore_ascii_case(value),
            Some(expected) => expected == value,
            None => true,
        }
    }
}
