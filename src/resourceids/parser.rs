//! Generic parser turning a resource ID string into named segment values.

use super::segment::{Segment, SegmentKind};
use super::ResourceIdError;
use std::collections::{BTreeMap, HashMap};

/// Named segment values extracted from a resource ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub id_type: &'static str,
    pub raw_input: String,
    parsed: HashMap<&'static str, String>,
}

impl ParseResult {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.parsed.get(key).map(String::as_str)
    }

    /// The value of a segment the caller can't do without
    pub fn required(&self, key: &'static str) -> Result<String, ResourceIdError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ResourceIdError::SegmentNotSpecified {
                id_type: self.id_type,
                segment: key.to_string(),
                input: self.raw_input.clone(),
            })
    }

    pub(crate) fn insert(&mut self, key: &'static str, value: String) {
        self.parsed.insert(key, value);
    }

    /// All parsed segments, sorted by name
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.parsed
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Parser for one resource ID template
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    id_type: &'static str,
    segments: &'static [Segment],
}

impl Parser {
    pub const fn new(id_type: &'static str, segments: &'static [Segment]) -> Self {
        Self { id_type, segments }
    }

    pub fn id_type(&self) -> &'static str {
        self.id_type
    }

    pub fn segments(&self) -> &'static [Segment] {
        self.segments
    }

    /// Parse `input` against the template. With `insensitively`, fixed
    /// segments match in any casing and come back in canonical casing.
    pub fn parse(&self, input: &str, insensitively: bool) -> Result<ParseResult, ResourceIdError> {
        if input.is_empty() {
            return Err(ResourceIdError::Empty {
                id_type: self.id_type,
            });
        }

        let Some(trimmed) = input.strip_prefix('/') else {
            return Err(self.malformed(input, "a resource ID must start with '/'"));
        };

        let components: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        if components.iter().any(|c| c.is_empty()) {
            return Err(self.malformed(input, "the resource ID contains an empty segment"));
        }

        let mut parsed = HashMap::new();
        let mut template = self.segments;
        let mut position = 0;

        if let Some(first) = template.first().filter(|s| s.kind == SegmentKind::Scope) {
            let end = match self.scope_end(&components, insensitively) {
                Some(end) => end,
                None => {
                    return Err(self
                        .suffix_mismatch(&components, insensitively, input)
                        .unwrap_or_else(|| self.not_specified(first.name, input)))
                }
            };
            parsed.insert(first.name, format!("/{}", components[..end].join("/")));
            position = end;
            template = &template[1..];
        }

        for segment in template {
            let Some(value) = components.get(position) else {
                return Err(self.not_specified(segment.name, input));
            };

            match segment.fixed_value {
                Some(expected) => {
                    if !segment.matches(value, insensitively) {
                        return Err(ResourceIdError::UnexpectedSegment {
                            id_type: self.id_type,
                            segment: segment.name,
                            expected,
                            actual: value.to_string(),
                            input: input.to_string(),
                        });
                    }
                    parsed.insert(segment.name, expected.to_string());
                }
                None => {
                    parsed.insert(segment.name, value.to_string());
                }
            }
            position += 1;
        }

        if position < components.len() {
            return Err(ResourceIdError::TooManySegments {
                id_type: self.id_type,
                input: input.to_string(),
                remainder: components[position..].join("/"),
            });
        }

        Ok(ParseResult {
            id_type: self.id_type,
            raw_input: input.to_string(),
            parsed,
        })
    }

    /// Where a leading scope segment ends: the last position at which the
    /// fixed segments following the scope line up.
    fn scope_end(&self, components: &[&str], insensitively: bool) -> Option<usize> {
        let suffix = &self.segments[1..];
        if suffix.is_empty() {
            return (!components.is_empty()).then_some(components.len());
        }

        let fixed: Vec<&Segment> = suffix.iter().take_while(|s| s.is_fixed()).collect();
        let lines_up = |start: usize, count: usize| {
            fixed.iter().take(count).enumerate().all(|(i, segment)| {
                components
                    .get(start + i)
                    .is_some_and(|c| segment.matches(c, insensitively))
            })
        };

        (1..components.len())
            .rev()
            .find(|&start| lines_up(start, fixed.len()))
            .or_else(|| (1..components.len()).rev().find(|&start| lines_up(start, 1)))
    }

    /// When the scope can't be found, the first fixed segment after it that
    /// fails to match, assuming the rest of the ID has the template's length
    fn suffix_mismatch(&self, components: &[&str], insensitively: bool, input: &str) -> Option<ResourceIdError> {
        let suffix = &self.segments[1..];
        let start = components.len().checked_sub(suffix.len()).filter(|&start| start > 0)?;

        suffix
            .iter()
            .zip(&components[start..])
            .find_map(|(segment, value)| match segment.fixed_value {
                Some(expected) if !segment.matches(value, insensitively) => Some(ResourceIdError::UnexpectedSegment {
                    id_type: self.id_type,
                    segment: segment.name,
                    expected,
                    actual: value.to_string(),
                    input: input.to_string(),
                }),
                _ => None,
            })
    }

    /// Rebuild the canonical ID from a parse result
    pub fn format(&self, result: &ParseResult) -> String {
        let mut out = String::new();
        for segment in self.segments {
            let value = match segment.fixed_value {
                Some(fixed) => fixed,
                None => result.get(segment.name).unwrap_or_default(),
            };
            push_segment(&mut out, segment.kind, value);
        }
        out
    }

    /// Build an ID from the values of the non-fixed segments, in template order
    pub fn format_values(&self, values: &[&str]) -> String {
        let mut values = values.iter();
        let mut out = String::new();
        for segment in self.segments {
            let value = match segment.fixed_value {
                Some(fixed) => fixed,
                None => values.next().copied().unwrap_or_default(),
            };
            push_segment(&mut out, segment.kind, value);
        }
        out
    }

    /// An example ID built from each segment's example value
    pub fn example_id(&self) -> String {
        let values: Vec<&str> = self
            .segments
            .iter()
            .filter(|s| !s.is_fixed())
            .map(|s| s.example_value)
            .collect();
        self.format_values(&values)
    }

    fn malformed(&self, input: &str, reason: &'static str) -> ResourceIdError {
        ResourceIdError::Malformed {
            id_type: self.id_type,
            input: input.to_string(),
            reason,
        }
    }

    fn not_specified(&self, segment: &str, input: &str) -> ResourceIdError {
        ResourceIdError::SegmentNotSpecified {
            id_type: self.id_type,
            segment: segment.to_string(),
            input: input.to_string(),
        }
    }
}

fn push_segment(out: &mut String, kind: SegmentKind, value: &str) {
    let value = if kind == SegmentKind::Scope {
        value.trim_matches('/')
    } else {
        value
    };
    out.push('/');
    out.push_str(value);
}
