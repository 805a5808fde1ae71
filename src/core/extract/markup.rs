//! Markup engine: translatable text and attributes of HTML-like pages.
//!
//! The page is parsed into a tree, scopes are resolved once, and a single
//! pre-order walk emits records:
//! - a translatable element yields one `TextNode` with its own text, leaving
//!   out nested units, excluded subtrees and raw-text content;
//! - an explicitly marked element with markup but no text of its own yields
//!   its content as one `WholeElement`;
//! - an attribute-bearing void element yields `Attribute` or `WholeElement`
//!   records as the policy's decision table says;
//! - embedded server-side code yields its double-quoted string literals.

use tracing::debug;

use crate::core::data::{ExtractionRecord, ParseError, RecordKind, SourceLocation};
use crate::core::escape::{EscapeSyntax, decode_escapes};
use crate::core::extract::table::leading_comments;
use crate::core::parsers::literal::{RawToken, tokenize};
use crate::core::parsers::markup::{
    Document, Element, NodeData, NodeId, is_void_tag, parse_document,
};
use crate::core::scope::{AttributeAction, ScopeMap, ScopeState, TagPolicy, resolve_scopes};
use crate::core::utils::{LineIndex, collapse_whitespace, is_only_server_code};

/// Extract with the default [`TagPolicy`].
pub fn extract_markup(
    file_path: &str,
    file_text: &str,
    scope_attribute: &str,
) -> Result<Vec<ExtractionRecord>, ParseError> {
    extract_markup_with_policy(file_path, file_text, scope_attribute, &TagPolicy::default())
}

pub fn extract_markup_with_policy(
    file_path: &str,
    file_text: &str,
    scope_attribute: &str,
    policy: &TagPolicy,
) -> Result<Vec<ExtractionRecord>, ParseError> {
    let document = parse_document(file_path, file_text)?;
    let scopes = resolve_scopes(&document, scope_attribute, policy);

    let walker = MarkupWalker {
        file_path,
        scope_attribute,
        document: &document,
        scopes: &scopes,
        policy,
    };
    let mut records = Vec::new();
    let mut id = 0;
    while id < document.len() {
        id = walker.visit(id, &mut records)?;
    }

    debug!(file = file_path, count = records.len(), "extracted markup");
    Ok(records)
}

struct MarkupWalker<'a> {
    file_path: &'a str,
    scope_attribute: &'a str,
    document: &'a Document,
    scopes: &'a ScopeMap,
    policy: &'a TagPolicy,
}

impl MarkupWalker<'_> {
    /// Emit the records of node `id`; returns the next id to visit.
    fn visit(
        &self,
        id: NodeId,
        records: &mut Vec<ExtractionRecord>,
    ) -> Result<NodeId, ParseError> {
        let next = id + 1;
        if self.scopes.state(id) == ScopeState::ForceOff {
            return Ok(next);
        }
        let element = match &self.document.node(id).data {
            NodeData::Element(element) => element,
            NodeData::ServerCode(code) => {
                self.server_strings(id, code, records)?;
                return Ok(next);
            }
            NodeData::Text(_) | NodeData::Comment(_) => return Ok(next),
        };

        if self.policy.is_attribute_bearing(&element.name) {
            self.attribute_records(id, element, records);
            return Ok(next);
        }

        if !self.scopes.is_translatable(self.document, self.policy, id)
            || self.scopes.is_suppressed(id)
        {
            return Ok(next);
        }

        let mut text = String::new();
        self.collect_text(id, &mut text);
        let value = collapse_whitespace(&text);
        if !value.is_empty() {
            records.push(
                ExtractionRecord::unkeyed(RecordKind::TextNode, value, self.location(id))
                    .with_hint(self.hint(id)),
            );
            return Ok(next);
        }

        if self.is_markup_unit(id) {
            let markup = self.document.inner_markup(id, self.scope_attribute);
            let markup = collapse_whitespace(&markup);
            records.push(
                ExtractionRecord::unkeyed(RecordKind::WholeElement, markup, self.location(id))
                    .with_hint(self.hint(id)),
            );
            return Ok(self.document.subtree_end(id));
        }
        Ok(next)
    }

    /// Text of `id`'s subtree, skipping every descendant that is not part
    /// of this unit. Skipped parts leave a space so words stay apart.
    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in &self.document.node(id).children {
            match &self.document.node(child).data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Comment(_) => {}
                NodeData::ServerCode(_) => out.push(' '),
                NodeData::Element(element) => {
                    if self.is_own_unit(child, element) {
                        out.push(' ');
                    } else {
                        self.collect_text(child, out);
                    }
                }
            }
        }
    }

    fn is_own_unit(&self, id: NodeId, element: &Element) -> bool {
        is_void_tag(&element.name)
            || self.policy.is_opaque(&element.name)
            || self.scopes.state(id) == ScopeState::ForceOff
            || self.scopes.is_translatable(self.document, self.policy, id)
    }

    /// An explicitly marked element whose content is markup only: it holds
    /// at least one element and no excluded or translatable descendant.
    fn is_markup_unit(&self, id: NodeId) -> bool {
        if self.scopes.state(id) != ScopeState::ForceOn {
            return false;
        }
        let descendants = id + 1..self.document.subtree_end(id);
        let mut has_element = false;
        for descendant in descendants {
            if self.document.element(descendant).is_none() {
                continue;
            }
            if self.scopes.state(descendant) == ScopeState::ForceOff
                || self.scopes.is_translatable(self.document, self.policy, descendant)
            {
                return false;
            }
            has_element = true;
        }
        has_element
    }

    fn attribute_records(
        &self,
        id: NodeId,
        element: &Element,
        records: &mut Vec<ExtractionRecord>,
    ) {
        let eligible: Vec<(&str, &str)> = element
            .attrs
            .iter()
            .filter(|attr| self.policy.is_eligible_attribute(&attr.name))
            .filter_map(|attr| {
                let value = attr.value.as_deref()?.trim();
                (!value.is_empty() && !is_only_server_code(value))
                    .then_some((attr.name.as_str(), value))
            })
            .collect();

        let explicit = self.scopes.state(id) == ScopeState::ForceOn;
        let hint = self.hint(id);

        match self.policy.attribute_action(explicit, eligible.len()) {
            AttributeAction::WholeElement => records.push(
                ExtractionRecord::unkeyed(
                    RecordKind::WholeElement,
                    element.to_markup_without(self.scope_attribute),
                    self.location(id),
                )
                .with_hint(hint),
            ),
            AttributeAction::PerAttribute => {
                for (name, value) in eligible {
                    let structural = format!("{} attribute of {}", name, element.name);
                    let hint = match &hint {
                        Some(comment) => format!("{}\n{}", comment, structural),
                        None => structural,
                    };
                    records.push(
                        ExtractionRecord::unkeyed(
                            RecordKind::Attribute(name.to_string()),
                            value,
                            self.location(id),
                        )
                        .with_hint(Some(hint)),
                    );
                }
            }
            AttributeAction::Skip => {
                debug!(
                    file = self.file_path,
                    line = self.document.node(id).line,
                    tag = element.name.as_str(),
                    "no attributes extracted"
                );
            }
        }
    }

    /// Double-quoted literals of a `<? ... ?>` block. Lines and offsets of
    /// lexical errors are reported against the whole file.
    fn server_strings(
        &self,
        id: NodeId,
        code: &str,
        records: &mut Vec<ExtractionRecord>,
    ) -> Result<(), ParseError> {
        let node = self.document.node(id);
        let body_offset = node.offset + "<?".len();
        let lines = LineIndex::new(code);
        let lexemes = tokenize(self.file_path, code, &lines).map_err(|mut err| {
            err.offset += body_offset;
            err.line += node.line - 1;
            err
        })?;

        for (index, lexeme) in lexemes.iter().enumerate() {
            if lexeme.token != RawToken::DoubleQuoted {
                continue;
            }
            let value = decode_escapes(lexeme.string_body(code), EscapeSyntax::CFamily);
            if value.trim().is_empty() {
                continue;
            }
            // Comments above the statement the literal sits on.
            let line_start = lexemes[..index]
                .iter()
                .rposition(|l| l.line != lexeme.line)
                .map_or(0, |p| p + 1);
            let comments = leading_comments(&lexemes, line_start, code);
            let hint = (!comments.is_empty()).then(|| comments.join("\n"));
            records.push(
                ExtractionRecord::unkeyed(
                    RecordKind::ServerString,
                    value,
                    SourceLocation::new(self.file_path, node.line + lexeme.line - 1),
                )
                .with_hint(hint),
            );
        }
        Ok(())
    }

    /// The comment right before the node; a delegate falls back to the
    /// comment of the container it took over from.
    fn hint(&self, id: NodeId) -> Option<String> {
        let comment = |id: NodeId| {
            self.document
                .preceding_comment(id)
                .map(collapse_whitespace)
                .filter(|c| !c.is_empty())
        };
        comment(id).or_else(|| self.scopes.delegated_from(id).and_then(comment))
    }

    fn location(&self, id: NodeId) -> SourceLocation {
        SourceLocation::new(self.file_path, self.document.node(id).line)
    }
}
