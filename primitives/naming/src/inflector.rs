//! Case conversion with acronym preservation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plural::pluralize;
use crate::{NamingError, Result};

/// Acronyms recognised when no configuration overrides them.
pub const DEFAULT_ACRONYMS: &[&str] = &[
    "ACH", "API", "CSRF", "CSV", "DB", "FIAT", "FOK", "GTC", "GTT", "HMAC", "HTTP", "ID", "IOC",
    "JSON", "OpenSSL", "SEPA", "STP", "SWIFT", "UK", "URL",
];

/// Immutable naming configuration handed to an [`Inflector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectorConfig {
    /// Tokens rendered in this exact spelling wherever they appear.
    pub acronyms: Vec<String>,
}

impl Default for InflectorConfig {
    fn default() -> Self { Self { acronyms: DEFAULT_ACRONYMS.iter().map(|a| a.to_string()).collect() } }
}

impl InflectorConfig {
    /// Build a configuration from an explicit acronym list.
    pub fn with_acronyms<I, S>(acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { acronyms: acronyms.into_iter().map(Into::into).collect() }
    }
}

/// Converts schema identifiers into Go names.
///
/// Identifiers are split into tokens on `.`, `-`, `_`, `/` and spaces. A token
/// that matches a configured acronym (ignoring case) is replaced by the
/// acronym's configured spelling; every other token keeps its interior casing.
///
/// # Examples
/// ```
/// use naming::{Inflector, InflectorConfig};
/// let inflector = Inflector::new(&InflectorConfig::default());
/// assert_eq!(inflector.pascal("product_id").unwrap(), "ProductID");
/// assert_eq!(inflector.camel("id_json_tag").unwrap(), "IDJSONTag");
/// assert_eq!(inflector.snake("ProductID").unwrap(), "product_id");
/// ```
#[derive(Debug, Clone)]
pub struct Inflector {
    acronyms: BTreeMap<String, String>,
}

impl Default for Inflector {
    fn default() -> Self { Self::new(&InflectorConfig::default()) }
}

impl Inflector {
    /// Create an inflector from `config`.
    pub fn new(config: &InflectorConfig) -> Self {
        let acronyms = config
            .acronyms
            .iter()
            .filter(|a| !a.trim().is_empty())
            .map(|a| (a.to_lowercase(), a.clone()))
            .collect();
        Self { acronyms }
    }

    /// Configured spelling of `token` when it is an acronym.
    pub fn acronym(&self, token: &str) -> Option<&str> {
        self.acronyms.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Upper camel case: `payment_method` -> `PaymentMethod`.
    pub fn pascal(&self, ident: &str) -> Result<String> {
        let tokens = tokenize(non_empty(ident)?);
        if tokens.is_empty() {
            return Ok(ident.to_string());
        }
        Ok(tokens.iter().map(|t| self.upper_token(t)).collect())
    }

    /// Lower camel case: `payment_method` -> `paymentMethod`, `id` -> `ID`.
    pub fn camel(&self, ident: &str) -> Result<String> {
        let tokens = tokenize(non_empty(ident)?);
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(ident.to_string());
        };
        let mut out = match self.acronym(first) {
            Some(acronym) => acronym.to_string(),
            None => lower_first(first),
        };
        for token in rest {
            out.push_str(&self.upper_token(token));
        }
        Ok(out)
    }

    /// Snake case used for `bson`/`sql` struct tags: `ProductID` -> `product_id`.
    pub fn snake(&self, ident: &str) -> Result<String> {
        let tokens = tokenize(non_empty(ident)?);
        if tokens.is_empty() {
            return Ok(ident.to_string());
        }
        let words: Vec<String> = tokens.iter().flat_map(|t| split_humps(t)).collect();
        Ok(words.join("_"))
    }

    /// Pluralize the last word of `ident`, leaving the rest untouched.
    pub fn plural(&self, ident: &str) -> Result<String> { Ok(pluralize(non_empty(ident)?)) }

    fn upper_token(&self, token: &str) -> String {
        match self.acronym(token) {
            Some(acronym) => acronym.to_string(),
            None => upper_first(token),
        }
    }
}

fn non_empty(ident: &str) -> Result<&str> {
    if ident.trim().is_empty() {
        Err(NamingError::EmptyIdentifier)
    } else {
        Ok(ident.trim())
    }
}

fn tokenize(ident: &str) -> Vec<&str> {
    ident.split(['.', '-', '_', '/', ' ']).filter(|t| !t.is_empty()).collect()
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Split a camel-cased token into lower-case words; runs of capitals stay together
/// until the capital that starts the next word (`IDTag` -> `id`, `tag`).
fn split_humps(token: &str) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
