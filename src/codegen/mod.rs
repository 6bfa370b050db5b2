//! Collected build configuration.
//!
//! [`BuildConfiguration`] is the directive sink used by the CLI. It folds
//! the emitted directives into the shape the build backend consumes:
//!
//! - build flags are a sorted set, so duplicates collapse
//! - defines are keyed by name; a later define replaces an earlier one
//! - project options are a sorted map; list values are appended to
//! - statements keep their emission order
//!
//! The raw directive log is kept as well and feeds the fingerprint.

mod render;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::core::directive::{Directive, DirectiveSink, Expression, OptionValue};
use crate::util::hash::Fingerprint;

/// Output of the directive emission, ready to be rendered.
#[derive(Debug, Clone, Default)]
pub struct BuildConfiguration {
    log: Vec<Directive>,
    statements: Vec<Expression>,
    build_flags: BTreeSet<String>,
    defines: BTreeMap<String, Option<Expression>>,
    options: BTreeMap<String, OptionValue>,
}

impl BuildConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every directive received, in order.
    pub fn directives(&self) -> &[Directive] {
        &self.log
    }

    pub fn statements(&self) -> &[Expression] {
        &self.statements
    }

    pub fn build_flags(&self) -> impl Iterator<Item = &str> {
        self.build_flags.iter().map(String::as_str)
    }

    pub fn defines(&self) -> &BTreeMap<String, Option<Expression>> {
        &self.defines
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    /// SHA-256 over the ordered directive log.
    ///
    /// Two runs with identical input produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        self.hasher().finish()
    }

    /// First 16 hex characters of [`fingerprint`](Self::fingerprint).
    pub fn short_fingerprint(&self) -> String {
        self.hasher().finish_short()
    }

    fn hasher(&self) -> Fingerprint {
        let mut fp = Fingerprint::new();
        for d in &self.log {
            fp.update_str(d.kind()).update_str(&d.to_string());
        }
        fp
    }

    fn set_option(&mut self, key: String, value: OptionValue) {
        match self.options.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => match (entry.get_mut(), value) {
                (OptionValue::List(existing), OptionValue::List(items)) => existing.extend(items),
                (old, value) => {
                    if *old != value {
                        debug!(old = %old, new = %value, "replacing project option");
                    }
                    *old = value;
                }
            },
        }
    }
}

impl DirectiveSink for BuildConfiguration {
    fn add(&mut self, directive: Directive) {
        match &directive {
            Directive::Statement { expression } => self.statements.push(expression.clone()),
            Directive::BuildFlag { flag } => {
                self.build_flags.insert(flag.clone());
            }
            Directive::Define { name, value } => {
                self.defines.insert(name.clone(), value.clone());
            }
            Directive::PlatformioOption { key, value } => {
                self.set_option(key.clone(), value.clone());
            }
        }
        self.log.push(directive);
    }
}
