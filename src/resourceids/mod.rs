//! Typed Azure resource IDs.
//!
//! Every ID type pairs a struct of user-specified values with an ordered
//! [`Segment`] template. Parsing, formatting and validation are driven by the
//! template through the generic [`Parser`].

pub mod commonids;
mod parser;
mod registry;
mod segment;

pub use commonids::{ResourceGroupId, ScopeId, SubscriptionId};
pub use parser::{ParseResult, Parser};
pub use registry::IdRegistry;
pub use segment::{Segment, SegmentKind};

use thiserror::Error;

/// Why a string couldn't be parsed as a resource ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdError {
    #[error("parsing {id_type}: cannot parse an empty string")]
    Empty { id_type: &'static str },

    #[error("parsing {id_type} {input:?}: {reason}")]
    Malformed {
        id_type: &'static str,
        input: String,
        reason: &'static str,
    },

    #[error("parsing {id_type} {input:?}: the segment '{segment}' was not specified")]
    SegmentNotSpecified {
        id_type: &'static str,
        segment: String,
        input: String,
    },

    #[error("parsing {id_type} {input:?}: expected the segment '{segment}' to be {expected:?} but got {actual:?}")]
    UnexpectedSegment {
        id_type: &'static str,
        segment: &'static str,
        expected: &'static str,
        actual: String,
        input: String,
    },

    #[error("parsing {id_type} {input:?}: unexpected trailing segments {remainder:?}")]
    TooManySegments {
        id_type: &'static str,
        input: String,
        remainder: String,
    },

    #[error("unknown resource ID type {0:?}")]
    UnknownIdType(String),
}

impl ResourceIdError {
    /// The template segment the error is about, if any
    pub fn segment(&self) -> Option<&str> {
        match self {
            Self::SegmentNotSpecified { segment, .. } => Some(segment),
            Self::UnexpectedSegment { segment, .. } => Some(segment),
            _ => None,
        }
    }
}

/// Shared behaviour of every typed resource ID
pub trait ResourceId: Sized {
    /// Type name used in errors, `describe` and the registry
    const ID_TYPE: &'static str;

    /// The ordered segment template
    fn segments() -> &'static [Segment];

    fn from_parse_result(result: &ParseResult) -> Result<Self, ResourceIdError>;

    /// Labelled values of the non-fixed segments, in template order
    fn values(&self) -> Vec<(&'static str, &str)>;

    fn parser() -> Parser {
        Parser::new(Self::ID_TYPE, Self::segments())
    }

    /// Parse with case-sensitive fixed segments
    fn parse(input: &str) -> Result<Self, ResourceIdError> {
        Self::from_parse_result(&Self::parser().parse(input, false)?)
    }

    /// Parse accepting any casing of the fixed segments
    fn parse_insensitively(input: &str) -> Result<Self, ResourceIdError> {
        Self::from_parse_result(&Self::parser().parse(input, true)?)
    }

    fn validate(input: &str) -> Result<(), ResourceIdError> {
        Self::parse(input).map(|_| ())
    }

    /// The canonical ID string
    fn id(&self) -> String {
        let values: Vec<&str> = self.values().into_iter().map(|(_, value)| value).collect();
        Self::parser().format_values(&values)
    }

    /// Human readable form, e.g. `Storage Account (Subscription: "s" / ...)`
    fn describe(&self) -> String {
        let parts: Vec<String> = self
            .values()
            .into_iter()
            .map(|(label, value)| format!("{}: {:?}", label, value))
            .collect();
        format!("{} ({})", Self::ID_TYPE, parts.join(" / "))
    }
}

/// `Display` and `FromStr` for an ID type in terms of [`ResourceId`]
macro_rules! resource_id_traits {
    ($name:ident) => {
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::resourceids::ResourceId::id(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::resourceids::ResourceIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::resourceids::ResourceId>::parse(s)
            }
        }
    };
}
pub(crate) use resource_id_traits;
