//! IR Validation
//!
//! Validates the built IR for name collisions. Every namespace becomes one Go
//! package, so model types, enum types, enum constants and the identifiers derived
//! from endpoints share one scope and must not clash.

use std::collections::{HashMap, HashSet};

use ir::{Field, GenerationIr, Namespace};
use tracing::debug;

use crate::{Result, ValidationError};

/// IR Validator
pub struct IrValidator;

impl Default for IrValidator {
    fn default() -> Self { Self::new() }
}

impl IrValidator {
    /// Create a new IR validator
    pub fn new() -> Self { Self }
}

impl IrValidator {
    /// Validate the IR and return every collision found
    pub fn validate(&self, ir: &GenerationIr) -> Vec<String> {
        let mut errors = Vec::new();
        for ns in ir.namespaces() {
            self.validate_namespace(ns, &mut errors);
        }
        errors
    }

    /// Validate the IR, folding collisions into a single error.
    pub fn check(&self, ir: &GenerationIr) -> Result<()> {
        let errors = self.validate(ir);
        if errors.is_empty() {
            debug!(namespaces = ir.len(), "IR validated");
            Ok(())
        } else {
            Err(ValidationError::NameCollision(errors))
        }
    }

    fn validate_namespace(&self, ns: &Namespace, errors: &mut Vec<String>) {
        let mut scope = PackageScope::new(&ns.api);

        // 1) Unique enum roots
        {
            let mut seen = HashSet::new();
            for (_, ep) in ns.endpoints() {
                if !seen.insert(ep.enum_root.as_str()) {
                    errors.push(format!("{}: duplicate enum root `{}`", ns.api, ep.enum_root));
                }
            }
        }

        // 2) Package-level identifiers
        for doc in &ns.documents {
            scope.declare(&doc.model_name, format!("model `{}`", doc.model_name), errors);
            for ep in &doc.endpoints {
                let origin = format!("endpoint `{}`", ep.enum_root);
                scope.declare(&ep.path_const(), origin.clone(), errors);
                scope.declare(&ep.path_fn(), origin.clone(), errors);
                scope.declare(&ep.ratelimiter_const(), origin.clone(), errors);
                if ep.has_params() {
                    scope.declare(&ep.options_type(), origin, errors);
                }
            }
        }
        for e in &ns.enums {
            let origin = format!("enum `{}`", e.identifier);
            scope.declare(&e.type_name, origin.clone(), errors);
            if let Some(plural) = &e.plural {
                scope.declare(&plural.type_name, origin.clone(), errors);
            }
            for value in &e.values {
                scope.declare(&value.const_name, format!("{origin} value `{}`", value.identifier), errors);
            }
        }

        // 3) Client methods
        {
            let mut seen = HashSet::new();
            for (_, ep) in ns.endpoints() {
                if !seen.insert(ep.name.as_str()) {
                    errors.push(format!("{}: duplicate client method `{}`", ns.api, ep.name));
                }
            }
        }

        // 4) Members within each field list
        for doc in &ns.documents {
            check_members(&ns.api, &doc.model_name, &doc.fields, errors);
            for ep in &doc.endpoints {
                let params: Vec<Field> = ep.params().cloned().collect();
                check_members(&ns.api, &ep.options_type(), &params, errors);
            }
        }
    }
}

/// Top-level identifiers of one generated Go package.
struct PackageScope<'a> {
    api: &'a str,
    declared: HashMap<String, String>,
}

impl<'a> PackageScope<'a> {
    fn new(api: &'a str) -> Self { Self { api, declared: HashMap::new() } }

    fn declare(&mut self, name: &str, origin: String, errors: &mut Vec<String>) {
        if let Some(previous) = self.declared.get(name) {
            errors.push(format!(
                "{}: identifier `{}` generated by both {} and {}",
                self.api, name, previous, origin
            ));
        } else {
            self.declared.insert(name.to_string(), origin);
        }
    }
}

fn check_members(api: &str, owner: &str, fields: &[Field], errors: &mut Vec<String>) {
    let mut identifiers = HashSet::new();
    let mut members = HashSet::new();
    let mut tags = HashSet::new();
    for field in fields {
        if !identifiers.insert(field.identifier.as_str()) {
            errors.push(format!("{api}: `{owner}` declares field `{}` twice", field.identifier));
        } else if !members.insert(field.member_name.as_str()) {
            errors.push(format!(
                "{api}: `{owner}` member `{}` is generated by more than one field",
                field.member_name
            ));
        } else if !tags.insert(field.tag_const.as_str()) {
            errors.push(format!(
                "{api}: `{owner}` tag constant `{}` is generated by more than one field",
                field.tag_const
            ));
        }
    }
}
