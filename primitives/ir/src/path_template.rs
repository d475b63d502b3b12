//! Path templates.
//!
//! `"/accounts/{account_id}/orders"` parses into
//! `[Literal("/accounts"), Param { account_id: string }, Literal("orders")]`.
//! Empty segments are dropped and only the first retained segment carries the
//! leading `/`.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{IrError, Result};

const DEFAULT_PARAM_TYPE: &str = "string";

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathPart {
    /// A literal segment.
    Literal(String),
    /// A named parameter with its declared Go type.
    Param {
        /// Parameter name, the key into the params mapping.
        name: String,
        /// Declared Go type (`string` when omitted).
        go_type: String,
    },
}

impl PathPart {
    /// Whether this part is a parameter.
    pub fn is_param(&self) -> bool { matches!(self, PathPart::Param { .. }) }
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate {
    raw: String,
    parts: Vec<PathPart>,
}

impl PathTemplate {
    /// Parse a template.
    ///
    /// A template whose first segment is a parameter gets a leading literal `/`
    /// so that the joined path stays rooted.
    ///
    /// # Examples
    /// ```
    /// use metagen_ir::{PathPart, PathTemplate};
    /// let template = PathTemplate::parse("/products/{product_id}/book").unwrap();
    /// assert_eq!(template.parts()[0], PathPart::Literal("/products".into()));
    /// assert!(template.parts()[1].is_param());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let token = Regex::new(r"^\{([A-Za-z_][A-Za-z0-9_]*)(?::([^{}:\s]+))?\}$")?;
        let mut parts = Vec::new();

        for (i, segment) in raw.split('/').filter(|s| !s.is_empty()).enumerate() {
            if segment.contains('{') || segment.contains('}') {
                let captures = token.captures(segment).ok_or_else(|| IrError::PathTemplate {
                    template: raw.to_string(),
                    reason: format!("segment `{segment}` is not a `{{name}}` or `{{name:type}}` token"),
                })?;
                if i == 0 {
                    parts.push(PathPart::Literal("/".to_string()));
                }
                parts.push(PathPart::Param {
                    name: captures[1].to_string(),
                    go_type: captures
                        .get(2)
                        .map_or_else(|| DEFAULT_PARAM_TYPE.to_string(), |m| m.as_str().to_string()),
                });
            } else if i == 0 {
                parts.push(PathPart::Literal(format!("/{segment}")));
            } else {
                parts.push(PathPart::Literal(segment.to_string()));
            }
        }

        Ok(Self { raw: raw.to_string(), parts })
    }

    /// The template as written.
    pub fn raw(&self) -> &str { &self.raw }

    /// Parsed segments in template order.
    pub fn parts(&self) -> &[PathPart] { &self.parts }

    /// Parameters as `(name, go_type)` pairs in template order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().filter_map(|part| match part {
            PathPart::Param { name, go_type } => Some((name.as_str(), go_type.as_str())),
            PathPart::Literal(_) => None,
        })
    }

    /// Whether the template has at least one parameter.
    pub fn has_params(&self) -> bool { self.parts.iter().any(PathPart::is_param) }

    /// Resolve the template against `params` the way the emitted builder does:
    /// missing parameters are empty and Go's `path.Join` drops empty elements and
    /// cleans the result.
    pub fn resolve(&self, params: &BTreeMap<String, String>) -> String {
        let elements: Vec<&str> = self
            .parts
            .iter()
            .map(|part| match part {
                PathPart::Literal(lit) => lit.as_str(),
                PathPart::Param { name, .. } => params.get(name).map_or("", String::as_str),
            })
            .filter(|e| !e.is_empty())
            .collect();
        if elements.is_empty() {
            return String::new();
        }
        clean(&elements.join("/"))
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.raw) }
}

/// Lexical cleaning equivalent to Go's `path.Clean`.
fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();
    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|last| *last != "..") {
                    stack.pop();
                } else if !rooted {
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }
    let joined = stack.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_account_orders() {
        let template = PathTemplate::parse("/accounts/{account_id}/orders").expect("valid");
        assert_eq!(
            template.parts(),
            &[
                PathPart::Literal("/accounts".to_string()),
                PathPart::Param { name: "account_id".to_string(), go_type: "string".to_string() },
                PathPart::Literal("orders".to_string()),
            ]
        );
        assert_eq!(template.resolve(&params(&[("account_id", "123")])), "/accounts/123/orders");
    }

    #[test]
    fn test_parse_typed_param_and_empty_segments() {
        let template = PathTemplate::parse("//products//{granularity:Granularity}/").expect("valid");
        assert_eq!(
            template.parts(),
            &[
                PathPart::Literal("/products".to_string()),
                PathPart::Param {
                    name: "granularity".to_string(),
                    go_type: "Granularity".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_leading_param_stays_rooted() {
        let template = PathTemplate::parse("{id}/fills").expect("valid");
        assert_eq!(template.parts()[0], PathPart::Literal("/".to_string()));
        assert_eq!(template.resolve(&params(&[("id", "7")])), "/7/fills");
    }

    #[test]
    fn test_missing_param_is_dropped() {
        let template = PathTemplate::parse("/accounts/{account_id}/orders").expect("valid");
        assert_eq!(template.resolve(&BTreeMap::new()), "/accounts/orders");
    }

    #[test]
    fn test_malformed_tokens() {
        for bad in ["/accounts/{account_id", "/a/{}/b", "/a/x{id}", "/a/{id:}/b", "/a/{1id}"] {
            assert!(
                matches!(PathTemplate::parse(bad), Err(IrError::PathTemplate { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("/a/./b/../c"), "/a/c");
        assert_eq!(clean("/.."), "/");
        assert_eq!(clean("a/../.."), "..");
    }
}
