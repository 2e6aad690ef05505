//! Explicit registry of resource ID parsers, used to parse and recase
//! arbitrary ID strings.

use super::segment::SegmentKind;
use super::{ParseResult, Parser, ResourceGroupId, ResourceId, ResourceIdError, SubscriptionId};
use std::collections::BTreeMap;

/// Keys recased when no registered parser matches an input
const WELL_KNOWN_KEYS: &[&str] = &["subscriptions", "resourceGroups", "providers"];

#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    parsers: BTreeMap<&'static str, Parser>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every ID type this crate ships
    pub fn with_known_ids() -> Self {
        let mut registry = Self::new();
        registry.register::<SubscriptionId>();
        registry.register::<ResourceGroupId>();
        crate::services::register_ids(&mut registry);
        registry
    }

    pub fn register<T: ResourceId>(&mut self) -> &mut Self {
        self.parsers.insert(T::ID_TYPE, T::parser());
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parsers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Look up a parser by type name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Parser> {
        self.parsers
            .iter()
            .find(|(id_type, _)| id_type.eq_ignore_ascii_case(name))
            .map(|(_, parser)| parser)
    }

    pub fn parse_as(
        &self,
        name: &str,
        input: &str,
        insensitively: bool,
    ) -> Result<ParseResult, ResourceIdError> {
        let parser = self
            .get(name)
            .ok_or_else(|| ResourceIdError::UnknownIdType(name.to_string()))?;
        parser.parse(input, insensitively)
    }

    /// The registered type whose template matches `input` with the most
    /// segments, along with its parse result
    pub fn best_match(&self, input: &str) -> Option<(&Parser, ParseResult)> {
        self.parsers
            .values()
            .filter_map(|parser| parser.parse(input, true).ok().map(|result| (parser, result)))
            .max_by_key(|(parser, _)| parser.segments().len())
    }

    /// Rewrite the fixed segments of `input` in canonical casing. A scope
    /// value is recased on its own, as an ID in its own right.
    pub fn recase(&self, input: &str) -> String {
        let Some((parser, mut result)) = self.best_match(input) else {
            return recase_well_known_keys(input);
        };

        for segment in parser.segments().iter().filter(|s| s.kind == SegmentKind::Scope) {
            if let Some(scope) = result.get(segment.name) {
                let recased = self.recase(scope);
                result.insert(segment.name, recased);
            }
        }
        parser.format(&result)
    }
}

fn recase_well_known_keys(input: &str) -> String {
    let mut expect_value = false;
    input
        .split('/')
        .map(|component| {
            if component.is_empty() {
                return component;
            }
            if !expect_value {
                if let Some(key) = WELL_KNOWN_KEYS
                    .iter()
                    .copied()
                    .find(|key| key.eq_ignore_ascii_case(component))
                {
                    expect_value = true;
                    return key;
                }
            }
            expect_value = false;
            component
        })
        .collect::<Vec<_>>()
        .join("/")
}
