//! Per-tag defaults for the markup engine.
//!
//! Everything here is data so a project can tune it from `.locscanrc.json`
//! under the `tagPolicy` key.

use serde::{Deserialize, Serialize};

/// Whether a node's scope attribute was written on the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMatch {
    Explicit,
    Inherited,
    Any,
}

/// How many eligible, non-empty attributes an element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMatch {
    One,
    Many,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeAction {
    /// Emit the element, minus the scope attribute, as one record.
    WholeElement,
    /// Emit one record per eligible attribute.
    PerAttribute,
    Skip,
}

/// One row of the attribute decision table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRule {
    pub scope: ScopeMatch,
    pub count: CountMatch,
    pub action: AttributeAction,
}

impl AttributeRule {
    fn matches(&self, explicit: bool, count: usize) -> bool {
        let scope = match self.scope {
            ScopeMatch::Explicit => explicit,
            ScopeMatch::Inherited => !explicit,
            ScopeMatch::Any => true,
        };
        let count = match self.count {
            CountMatch::One => count == 1,
            CountMatch::Many => count > 1,
            CountMatch::Any => true,
        };
        scope && count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagPolicy {
    /// Tags translatable when no scope attribute applies.
    pub default_on: Vec<String>,
    /// Void tags whose attributes can be extracted.
    pub attribute_bearing: Vec<String>,
    /// Attribute names eligible on attribute-bearing tags.
    pub attributes: Vec<String>,
    /// Inline tags a container may delegate its extraction to.
    pub delegate_tags: Vec<String>,
    /// How many levels below a container the delegation search looks.
    /// `1` means direct children; `0` disables delegation.
    pub delegate_depth: usize,
    /// Decision table for attribute-bearing tags; the first matching row wins.
    pub attribute_rules: Vec<AttributeRule>,
    /// Tags whose content is never text (`script`, `style`).
    pub opaque_tags: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self {
            default_on: strings(&["h1", "h2", "h3", "h4", "h5", "h6", "h7", "p", "li"]),
            attribute_bearing: strings(&["img", "area", "input"]),
            attributes: strings(&["alt", "title"]),
            delegate_tags: strings(&["a"]),
            delegate_depth: 1,
            attribute_rules: vec![
                AttributeRule {
                    scope: ScopeMatch::Explicit,
                    count: CountMatch::One,
                    action: AttributeAction::WholeElement,
                },
                AttributeRule {
                    scope: ScopeMatch::Any,
                    count: CountMatch::Any,
                    action: AttributeAction::PerAttribute,
                },
            ],
            opaque_tags: strings(&["script", "style"]),
        }
    }
}

fn contains(list: &[String], tag: &str) -> bool {
    list.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

impl TagPolicy {
    pub fn is_default_on(&self, tag: &str) -> bool {
        contains(&self.default_on, tag)
    }

    pub fn is_attribute_bearing(&self, tag: &str) -> bool {
        contains(&self.attribute_bearing, tag)
    }

    pub fn is_eligible_attribute(&self, name: &str) -> bool {
        contains(&self.attributes, name)
    }

    pub fn is_delegate_tag(&self, tag: &str) -> bool {
        contains(&self.delegate_tags, tag)
    }

    pub fn is_opaque(&self, tag: &str) -> bool {
        contains(&self.opaque_tags, tag)
    }

    /// Look up the action for an attribute-bearing element.
    ///
    /// Falls back to [`AttributeAction::PerAttribute`] when no row matches.
    pub fn attribute_action(&self, explicit: bool, count: usize) -> AttributeAction {
        if count == 0 {
            return AttributeAction::Skip;
        }
        self.attribute_rules
            .iter()
            .find(|rule| rule.matches(explicit, count))
            .map_or(AttributeAction::PerAttribute, |rule| rule.action)
    }
}
