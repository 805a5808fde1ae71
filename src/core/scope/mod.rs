//! Scope resolution for markup trees.
//!
//! A single top-down pass assigns every node a [`ScopeState`] from the scope
//! attribute (`lang` by default). A second pass over the resolved states finds
//! containers that delegate their extraction to exactly one explicitly marked
//! inline descendant. The extraction walk only reads the resulting
//! [`ScopeMap`]; the tree itself is never modified.

pub mod policy;

use tracing::debug;

use crate::core::parsers::markup::{Document, NodeId, is_void_tag};

pub use policy::{AttributeAction, AttributeRule, CountMatch, ScopeMatch, TagPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// No marker on the node or an enclosing excluded node; the tag default
    /// decides.
    Inherit,
    /// The node carries a non-empty scope attribute.
    ForceOn,
    /// The node carries an empty scope attribute, or inherits one.
    ForceOff,
}

/// Resolved scope decisions, indexed by node id.
#[derive(Debug, Clone)]
pub struct ScopeMap {
    states: Vec<ScopeState>,
    /// Container -> the descendant it delegates to.
    delegates: Vec<Option<NodeId>>,
    /// Descendant -> the container that delegated to it.
    delegated_from: Vec<Option<NodeId>>,
}

impl ScopeMap {
    pub fn state(&self, id: NodeId) -> ScopeState {
        self.states[id]
    }

    pub fn delegate_of(&self, id: NodeId) -> Option<NodeId> {
        self.delegates[id]
    }

    pub fn delegated_from(&self, id: NodeId) -> Option<NodeId> {
        self.delegated_from[id]
    }

    /// A container whose extraction moved to a delegate.
    pub fn is_suppressed(&self, id: NodeId) -> bool {
        self.delegates[id].is_some()
    }

    /// Whether an element's text content is a translation unit of its own.
    ///
    /// Void and opaque elements never are; otherwise `ForceOn` wins,
    /// `ForceOff` loses and `Inherit` falls back to the tag default.
    pub fn is_translatable(&self, document: &Document, policy: &TagPolicy, id: NodeId) -> bool {
        let Some(element) = document.element(id) else {
            return false;
        };
        if is_void_tag(&element.name) || policy.is_opaque(&element.name) {
            return false;
        }
        match self.states[id] {
            ScopeState::ForceOn => true,
            ScopeState::ForceOff => false,
            ScopeState::Inherit => policy.is_default_on(&element.name),
        }
    }
}

fn own_state(document: &Document, id: NodeId, scope_attribute: &str) -> Option<ScopeState> {
    let attr = document.element(id)?.attr(scope_attribute)?;
    match attr.value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(ScopeState::ForceOn),
        _ => Some(ScopeState::ForceOff),
    }
}

/// Compute the scope state of every node, then the delegations.
pub fn resolve_scopes(document: &Document, scope_attribute: &str, policy: &TagPolicy) -> ScopeMap {
    let mut states: Vec<ScopeState> = Vec::with_capacity(document.len());

    // Ids are in document order, so a parent is always resolved first.
    for id in document.ids() {
        let state = own_state(document, id, scope_attribute).unwrap_or_else(|| {
            match document.node(id).parent.map(|parent| states[parent]) {
                Some(ScopeState::ForceOff) => ScopeState::ForceOff,
                _ => ScopeState::Inherit,
            }
        });
        states.push(state);
    }

    let mut map = ScopeMap {
        states,
        delegates: vec![None; document.len()],
        delegated_from: vec![None; document.len()],
    };

    if policy.delegate_depth == 0 {
        return map;
    }

    for id in document.ids() {
        if map.states[id] != ScopeState::Inherit || !map.is_translatable(document, policy, id) {
            continue;
        }
        if let Some(target) = single_delegate(document, &map.states, policy, id) {
            debug!(
                container = id,
                delegate = target,
                line = document.node(id).line,
                "container delegates extraction"
            );
            map.delegates[id] = Some(target);
            map.delegated_from[target] = Some(id);
        }
    }

    map
}

/// The only `ForceOn` delegate-tag element within `delegate_depth` levels of
/// `container`, or `None` when there are zero or several.
fn single_delegate(
    document: &Document,
    states: &[ScopeState],
    policy: &TagPolicy,
    container: NodeId,
) -> Option<NodeId> {
    let mut found = None;
    let mut level: Vec<NodeId> = document.node(container).children.clone();

    for _ in 0..policy.delegate_depth {
        let mut next = Vec::new();
        for id in level {
            let Some(element) = document.element(id) else {
                continue;
            };
            if states[id] == ScopeState::ForceOn
                && policy.is_delegate_tag(&element.name)
                && found.replace(id).is_some()
            {
                return None;
            }
            next.extend_from_slice(&document.node(id).children);
        }
        if next.is_empty() {
            break;
        }
        level = next;
    }

    found
}
