//! Token Substitution Engine
//!
//! Applies an ordered [`RuleSet`] to a [`CanonicalTemplate`] for one module.
//!
//! Each rule is a literal, case-sensitive, global replacement performed in
//! rule-set order. Text written by a replacement is sealed: later rules never
//! see it, so a replacement value that happens to contain another rule's
//! placeholder is left alone.
//!
//! Ordering is checked once, when the rule set is built: a rule whose
//! placeholder occurs inside a later rule's placeholder would corrupt that
//! longer token before it is matched (`primary` before `btn-outline-primary`),
//! so such a rule set is rejected with [`RuleSetError::Conflict`].

use std::fmt;

use thiserror::Error;

use crate::domain::entities::{CanonicalTemplate, ModuleDescriptor};

/// Fields available to [`Replacement::Pattern`]
pub const PATTERN_FIELDS: [&str; 5] = ["key", "title", "icon", "color", "description"];

/// Where a rule is allowed to match
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleScope {
    /// Anywhere in the document
    Document,
    /// Only inside the named template region
    Region(String),
}

impl RuleScope {
    fn applies_to(&self, region: Option<&str>) -> bool {
        match self {
            RuleScope::Document => true,
            RuleScope::Region(name) => region == Some(name.as_str()),
        }
    }

    fn overlaps(&self, other: &RuleScope) -> bool {
        match (self, other) {
            (RuleScope::Region(a), RuleScope::Region(b)) => a == b,
            _ => true,
        }
    }

    fn is_narrower_than(&self, other: &RuleScope) -> bool {
        matches!((self, other), (RuleScope::Region(_), RuleScope::Document))
    }
}

impl fmt::Display for RuleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleScope::Document => write!(f, "document"),
            RuleScope::Region(name) => write!(f, "region '{}'", name),
        }
    }
}

/// How the output string of a rule is derived from a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    Key,
    Title,
    Icon,
    /// The bare color token (`info`)
    Color,
    /// A color class built on a stem: `ColorClass("bg")` → `bg-info`
    ColorClass(String),
    Description,
    /// Literal text with `{field}` interpolation (see [`PATTERN_FIELDS`])
    Pattern(String),
}

impl Replacement {
    /// Build a pattern replacement, refusing unknown `{field}` names
    pub fn pattern(pattern: impl Into<String>) -> Result<Self, RuleSetError> {
        let pattern = pattern.into();
        for field in pattern_fields(&pattern) {
            if !PATTERN_FIELDS.contains(&field) {
                return Err(RuleSetError::UnknownPatternField {
                    pattern: pattern.clone(),
                    field: field.to_string(),
                });
            }
        }
        Ok(Replacement::Pattern(pattern))
    }

    pub fn resolve(&self, d: &ModuleDescriptor) -> String {
        match self {
            Replacement::Key => d.key.clone(),
            Replacement::Title => d.title.clone(),
            Replacement::Icon => d.icon_token.clone(),
            Replacement::Color => d.color_token.clone(),
            Replacement::ColorClass(stem) => format!("{}-{}", stem, d.color_token),
            Replacement::Description => d.description.clone(),
            Replacement::Pattern(p) => interpolate(p, d),
        }
    }
}

fn field_value<'a>(field: &str, d: &'a ModuleDescriptor) -> Option<&'a str> {
    match field {
        "key" => Some(&d.key),
        "title" => Some(&d.title),
        "icon" => Some(&d.icon_token),
        "color" => Some(&d.color_token),
        "description" => Some(&d.description),
        _ => None,
    }
}

/// `{name}` occurrences in a pattern
fn pattern_fields(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split('{').skip(1).filter_map(|s| s.split_once('}')).map(|(name, _)| name)
}

fn interpolate(pattern: &str, d: &ModuleDescriptor) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.split_once('}').and_then(|(name, tail)| Some((field_value(name, d)?, tail))) {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// One find/replace instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub placeholder: String,
    pub replacement: Replacement,
    pub scope: RuleScope,
}

impl SubstitutionRule {
    pub fn new(placeholder: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            placeholder: placeholder.into(),
            replacement,
            scope: RuleScope::Document,
        }
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.scope = RuleScope::Region(region.into());
        self
    }
}

/// Rule sets that cannot be applied safely
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error(
        "rule '{earlier}' (#{earlier_index}) would corrupt '{later}' (#{later_index}) in {scope}; \
         apply the longer placeholder first"
    )]
    Conflict {
        earlier: String,
        earlier_index: usize,
        later: String,
        later_index: usize,
        scope: RuleScope,
    },

    #[error("rule #{index} has an empty placeholder")]
    EmptyPlaceholder { index: usize },

    #[error("pattern '{pattern}' uses unknown field '{{{field}}}'")]
    UnknownPatternField { pattern: String, field: String },

    #[error("template source color is empty; class rules would match every '<stem>-' class")]
    EmptySourceColor,

    #[error("template source color '{color}' is not in the palette ({palette})")]
    UnknownSourceColor { color: String, palette: String },
}

/// Rules validated for specificity order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    /// Accept rules in the given order, rejecting unsafe orderings
    pub fn new(rules: Vec<SubstitutionRule>) -> Result<Self, RuleSetError> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.placeholder.is_empty() {
                return Err(RuleSetError::EmptyPlaceholder { index });
            }
        }

        for (i, earlier) in rules.iter().enumerate() {
            for (j, later) in rules.iter().enumerate().skip(i + 1) {
                if !earlier.scope.overlaps(&later.scope)
                    || !later.placeholder.contains(earlier.placeholder.as_str())
                {
                    continue;
                }
                // Same token is fine when the earlier rule handles a region
                // and the later one the rest of the document.
                if earlier.placeholder == later.placeholder
                    && earlier.scope.is_narrower_than(&later.scope)
                {
                    continue;
                }
                let scope = if earlier.scope == RuleScope::Document {
                    later.scope.clone()
                } else {
                    earlier.scope.clone()
                };
                return Err(RuleSetError::Conflict {
                    earlier: earlier.placeholder.clone(),
                    earlier_index: i,
                    later: later.placeholder.clone(),
                    later_index: j,
                    scope,
                });
            }
        }

        Ok(Self { rules })
    }

    /// Sort rules longest placeholder first (region rules before document
    /// rules on ties), then validate
    pub fn by_specificity(mut rules: Vec<SubstitutionRule>) -> Result<Self, RuleSetError> {
        rules.sort_by(|a, b| {
            b.placeholder.len().cmp(&a.placeholder.len()).then_with(|| {
                let rank = |s: &RuleScope| matches!(s, RuleScope::Document) as u8;
                rank(&a.scope).cmp(&rank(&b.scope))
            })
        });
        Self::new(rules)
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Region names referenced by rules
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|r| match &r.scope {
            RuleScope::Region(name) => Some(name.as_str()),
            RuleScope::Document => None,
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Outcome of rendering one template for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    /// `(placeholder, occurrences)` per rule, in rule order
    pub matches: Vec<(String, usize)>,
}

impl Substitution {
    /// Placeholders of rules that replaced nothing
    pub fn unmatched(&self) -> Vec<String> {
        self.matches
            .iter()
            .filter(|(_, n)| *n == 0)
            .map(|(p, _)| p.clone())
            .collect()
    }
}

struct Piece<'r> {
    text: String,
    region: Option<&'r str>,
    sealed: bool,
}

/// Render `template` for `descriptor`
pub fn apply(
    template: &CanonicalTemplate,
    rules: &RuleSet,
    descriptor: &ModuleDescriptor,
) -> Substitution {
    let mut pieces: Vec<Piece<'_>> = template
        .segments()
        .iter()
        .map(|s| Piece {
            text: s.text.clone(),
            region: s.region.as_deref(),
            sealed: false,
        })
        .collect();
    let mut matches = Vec::with_capacity(rules.len());

    for rule in rules.rules() {
        let replacement = rule.replacement.resolve(descriptor);
        let mut count = 0;
        let mut next = Vec::with_capacity(pieces.len());

        for piece in pieces {
            if piece.sealed
                || !rule.scope.applies_to(piece.region)
                || !piece.text.contains(rule.placeholder.as_str())
            {
                next.push(piece);
                continue;
            }
            let mut parts = piece.text.split(rule.placeholder.as_str());
            if let Some(first) = parts.next() {
                push_open(&mut next, first, piece.region);
            }
            for part in parts {
                count += 1;
                next.push(Piece {
                    text: replacement.clone(),
                    region: piece.region,
                    sealed: true,
                });
                push_open(&mut next, part, piece.region);
            }
        }

        pieces = next;
        matches.push((rule.placeholder.clone(), count));
    }

    Substitution {
        text: pieces.into_iter().map(|p| p.text).collect(),
        matches,
    }
}

fn push_open<'r>(out: &mut Vec<Piece<'r>>, text: &str, region: Option<&'r str>) {
    if !text.is_empty() {
        out.push(Piece {
            text: text.to_string(),
            region,
            sealed: false,
        });
    }
}

#[cfg(test)]
mod tests;
