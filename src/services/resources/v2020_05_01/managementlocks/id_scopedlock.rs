use crate::resourceids::{resource_id_traits, ParseResult, ResourceId, ResourceIdError, ScopeId, Segment};

/// A management lock applied at an arbitrary scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedLockId {
    pub scope: String,
    pub lock_name: String,
}

impl ScopedLockId {
    pub fn new(scope: impl Into<String>, lock_name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            lock_name: lock_name.into(),
        }
    }

    pub fn parent_scope(&self) -> ScopeId {
        ScopeId::new(&self.scope)
    }
}

impl ResourceId for ScopedLockId {
    const ID_TYPE: &'static str = "Scoped Lock";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::scope("scope"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftAuthorization", "Microsoft.Authorization"),
            Segment::static_segment("staticLocks", "locks"),
            Segment::user_specified("lockName", "lockName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError> {
        Ok(Self {
            scope: result.required("scope")?,
            lock_name: result.required("lockName")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![("Scope", self.scope.as_str()), ("Lock Name", self.lock_name.as_str())]
    }
}

resource_id_traits!(ScopedLockId);
