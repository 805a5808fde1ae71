//! Markup tokenizer and tree builder.
//!
//! `TagTokenizer` is a small, tolerant tag/attribute tokenizer for HTML-like
//! resources, including pages with embedded server-side code (`<?php ... ?>`).
//! Server-side blocks are kept as opaque nodes; XML declarations and
//! `<!DOCTYPE>` are dropped.
//! Text is returned raw: entities such as `&copy;` are not decoded, so the
//! extracted text can be placed back into the same resource.
//!
//! `parse_document` feeds the token stream into an arena `Document` whose node
//! ids are assigned in document (pre-order) order.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::{LexError, ParseError, StructureError};
use crate::core::utils::LineIndex;

/// Elements that never have content.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose end tag may be left out; the tree builder closes them
/// implicitly instead of reporting a structure error.
pub const OPTIONAL_END_TAGS: &[&str] = &[
    "li", "p", "dt", "dd", "option", "optgroup", "tr", "td", "th", "thead", "tbody", "tfoot",
    "colgroup", "rt", "rp", "html", "head", "body",
];

/// Elements that end an open sibling of the same name (`<li>a<li>b`).
const SELF_TERMINATING_TAGS: &[&str] = &["li", "dt", "dd", "option", "tr", "td", "th"];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

static TAG_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9:._-]*").unwrap());

pub fn is_void_tag(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

/// An attribute as written; `value` is `None` for bare attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    OpenTag {
        name: String,
        attrs: Vec<Attribute>,
        self_closing: bool,
    },
    CloseTag {
        name: String,
    },
    Text(String),
    Comment(String),
    /// Body of a `<? ... ?>` block, without the delimiters.
    ServerCode(String),
}

/// A token with the byte offset and line where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: MarkupToken,
    pub offset: usize,
    pub line: usize,
}

/// The generic tokenizer primitive the markup engine is built on.
///
/// `Ok(None)` marks the end of input.
pub trait MarkupTokenizer {
    fn next_token(&mut self) -> Result<Option<PositionedToken>, ParseError>;
}

pub struct TagTokenizer<'a> {
    file_path: &'a str,
    source: &'a str,
    lines: LineIndex,
    pos: usize,
    /// Set after `<script>`/`<style>`: content is raw text until this end tag.
    raw_text_until: Option<String>,
}

impl<'a> TagTokenizer<'a> {
    pub fn new(file_path: &'a str, source: &'a str) -> Self {
        Self {
            file_path,
            source,
            lines: LineIndex::new(source),
            pos: 0,
            raw_text_until: None,
        }
    }

    fn error(&self, offset: usize, cause: LexError) -> ParseError {
        ParseError::new(self.file_path, offset, self.lines.line_of(offset), cause)
    }

    fn emit(&mut self, token: MarkupToken, start: usize, end: usize) -> Option<PositionedToken> {
        self.pos = end;
        Some(PositionedToken {
            token,
            offset: start,
            line: self.lines.line_of(start),
        })
    }

    /// Whether a `<` at `offset` starts markup rather than literal text.
    fn starts_markup(&self, offset: usize) -> bool {
        let rest = &self.source[offset + 1..];
        rest.starts_with(['!', '?', '/']) || rest.starts_with(|c: char| c.is_ascii_alphabetic())
    }

    fn raw_text(&mut self, tag: String) -> Option<PositionedToken> {
        let start = self.pos;
        let closing = format!("</{}", tag);
        let end = self.source[start..]
            .to_ascii_lowercase()
            .find(&closing)
            .map_or(self.source.len(), |i| start + i);
        let text = self.source[start..end].to_string();
        self.emit(MarkupToken::Text(text), start, end)
    }

    fn text(&mut self) -> Option<PositionedToken> {
        let start = self.pos;
        let mut end = self.source.len();
        let mut search = start;
        while let Some(i) = self.source[search..].find('<') {
            let candidate = search + i;
            if candidate > start && self.starts_markup(candidate) {
                end = candidate;
                break;
            }
            search = candidate + 1;
        }
        let text = self.source[start..end].to_string();
        self.emit(MarkupToken::Text(text), start, end)
    }

    fn comment(&mut self) -> Result<Option<PositionedToken>, ParseError> {
        let start = self.pos;
        let body_start = start + "<!--".len();
        let close = self.source[body_start..]
            .find("-->")
            .ok_or_else(|| self.error(start, LexError::UnterminatedComment))?;
        let content = self.source[body_start..body_start + close].to_string();
        Ok(self.emit(MarkupToken::Comment(content), start, body_start + close + 3))
    }

    fn server_code(&mut self) -> Result<Option<PositionedToken>, ParseError> {
        let start = self.pos;
        let body_start = start + "<?".len();
        let close = self.source[body_start..]
            .find("?>")
            .ok_or_else(|| self.error(start, LexError::UnterminatedInstruction))?;
        let body = &self.source[body_start..body_start + close];
        let end = body_start + close + "?>".len();
        if is_xml_declaration(body) {
            self.pos = end;
            return Ok(None);
        }
        let body = body.to_string();
        Ok(self.emit(MarkupToken::ServerCode(body), start, end))
    }

    /// Skip `<!DOCTYPE ...>`; it carries no localizable text.
    fn skip_until(&mut self, terminator: &str, cause: LexError) -> Result<(), ParseError> {
        let start = self.pos;
        let close = self.source[start + 2..]
            .find(terminator)
            .ok_or_else(|| self.error(start, cause))?;
        self.pos = start + 2 + close + terminator.len();
        Ok(())
    }

    /// Offset of the `>` ending the tag starting at `self.pos`, ignoring any
    /// `>` inside quoted attribute values.
    fn tag_end(&self) -> Result<usize, ParseError> {
        let mut quote: Option<char> = None;
        for (i, c) in self.source[self.pos..].char_indices() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => return Ok(self.pos + i),
                (None, _) => {}
            }
        }
        Err(self.error(self.pos, LexError::UnterminatedTag))
    }

    fn close_tag(&mut self) -> Result<Option<PositionedToken>, ParseError> {
        let start = self.pos;
        let end = self.tag_end()?;
        let name = self.source[start + 2..end].trim().to_ascii_lowercase();
        Ok(self.emit(MarkupToken::CloseTag { name }, start, end + 1))
    }

    fn open_tag(&mut self) -> Result<Option<PositionedToken>, ParseError> {
        let start = self.pos;
        let end = self.tag_end()?;
        let inner = &self.source[start + 1..end];
        let name_len = TAG_NAME_REGEX.find(inner).map_or(0, |m| m.end());
        let name = inner[..name_len].to_ascii_lowercase();
        let body = &inner[name_len..];
        let self_closing = body.trim_end().ends_with('/');

        let attrs = ATTRIBUTE_REGEX
            .captures_iter(body)
            .filter_map(|caps| {
                let attr_name = caps.get(1)?.as_str().to_ascii_lowercase();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str().to_string());
                Some(Attribute {
                    name: attr_name,
                    value,
                })
            })
            .collect();

        if !self_closing && RAW_TEXT_TAGS.contains(&name.as_str()) {
            self.raw_text_until = Some(name.clone());
        }

        Ok(self.emit(
            MarkupToken::OpenTag {
                name,
                attrs,
                self_closing,
            },
            start,
            end + 1,
        ))
    }
}

impl MarkupTokenizer for TagTokenizer<'_> {
    fn next_token(&mut self) -> Result<Option<PositionedToken>, ParseError> {
        loop {
            if self.pos >= self.source.len() {
                return Ok(None);
            }
            if let Some(tag) = self.raw_text_until.take() {
                let closing = format!("</{}", tag);
                let at_close = self.source[self.pos..]
                    .get(..closing.len())
                    .is_some_and(|s| s.eq_ignore_ascii_case(&closing));
                if !at_close {
                    return Ok(self.raw_text(tag));
                }
            }

            let rest = &self.source[self.pos..];
            if rest.starts_with("<!--") {
                return self.comment();
            }
            if rest.starts_with("<?") {
                match self.server_code()? {
                    Some(token) => return Ok(Some(token)),
                    None => continue,
                }
            }
            if rest.starts_with("<!") {
                self.skip_until(">", LexError::UnterminatedTag)?;
                continue;
            }
            if rest.starts_with("</") {
                return self.close_tag();
            }
            if rest.starts_with('<') && self.starts_markup(self.pos) {
                return self.open_tag();
            }
            return Ok(self.text());
        }
    }
}

fn is_xml_declaration(body: &str) -> bool {
    body.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("xml"))
        && body[3..].starts_with(|c: char| c.is_whitespace())
}

// ============================================================
// Document tree
// ============================================================

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Re-serialize the start tag, leaving out `omit` (the scope attribute).
    pub fn to_markup_without(&self, omit: &str) -> String {
        let mut out = format!("<{}", self.name);
        for attr in self.attrs.iter().filter(|a| a.name != omit) {
            match &attr.value {
                Some(value) if value.contains('"') => {
                    out.push_str(&format!(" {}='{}'", attr.name, value))
                }
                Some(value) => out.push_str(&format!(" {}=\"{}\"", attr.name, value)),
                None => out.push_str(&format!(" {}", attr.name)),
            }
        }
        out.push_str(if self.self_closing { " />" } else { ">" });
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(Element),
    Text(String),
    Comment(String),
    ServerCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub offset: usize,
    pub line: usize,
}

impl Node {
    pub fn element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True for comments and whitespace-only text.
    fn is_trivia(&self) -> bool {
        match &self.data {
            NodeData::Text(text) => text.trim().is_empty(),
            NodeData::Comment(_) => true,
            NodeData::Element(_) | NodeData::ServerCode(_) => false,
        }
    }
}

/// Arena tree; a node's id is its position in document order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes[id].element()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of all nodes in document order.
    pub fn ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    fn siblings_of(&self, id: NodeId) -> &[NodeId] {
        match self.nodes[id].parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        }
    }

    /// The comment directly before `id` among its siblings, skipping
    /// whitespace-only text.
    pub fn preceding_comment(&self, id: NodeId) -> Option<&str> {
        let siblings = self.siblings_of(id);
        let position = siblings.iter().position(|&s| s == id)?;
        siblings[..position]
            .iter()
            .rev()
            .map(|&s| &self.nodes[s])
            .take_while(|n| n.is_trivia())
            .find_map(|n| match &n.data {
                NodeData::Comment(text) => Some(text.as_str()),
                _ => None,
            })
    }

    /// One past the last id in `id`'s subtree; the subtree is `id..end`.
    pub fn subtree_end(&self, id: NodeId) -> NodeId {
        let mut last = id;
        while let Some(&child) = self.nodes[last].children.last() {
            last = child;
        }
        last + 1
    }

    /// Markup between `id`'s start and end tags, re-serialized with `omit`
    /// (the scope attribute) left out.
    pub fn inner_markup(&self, id: NodeId, omit: &str) -> String {
        let mut out = String::new();
        for &child in &self.nodes[id].children {
            self.write_markup(child, omit, &mut out);
        }
        out
    }

    fn write_markup(&self, id: NodeId, omit: &str, out: &mut String) {
        match &self.nodes[id].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::ServerCode(code) => {
                out.push_str("<?");
                out.push_str(code);
                out.push_str("?>");
            }
            NodeData::Element(element) => {
                out.push_str(&element.to_markup_without(omit));
                if element.self_closing || is_void_tag(&element.name) {
                    return;
                }
                for &child in &self.nodes[id].children {
                    self.write_markup(child, omit, out);
                }
                out.push_str(&format!("</{}>", element.name));
            }
        }
    }

    fn push(
        &mut self,
        data: NodeData,
        parent: Option<NodeId>,
        offset: usize,
        line: usize,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
            offset,
            line,
        });
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }
}

/// Build a document from a token stream.
///
/// The builder is lenient where HTML is (void elements, optional end tags)
/// and strict otherwise: a closing tag with no open element, or one that
/// would skip over an element requiring an end tag, fails the file.
pub fn build_document<T: MarkupTokenizer>(
    file_path: &str,
    tokenizer: &mut T,
) -> Result<Document, ParseError> {
    let mut document = Document::default();
    let mut open: Vec<NodeId> = Vec::new();

    while let Some(PositionedToken {
        token,
        offset,
        line,
    }) = tokenizer.next_token()?
    {
        match token {
            MarkupToken::OpenTag {
                name,
                attrs,
                self_closing,
            } => {
                if SELF_TERMINATING_TAGS.contains(&name.as_str())
                    && open
                        .last()
                        .and_then(|&top| document.element(top))
                        .is_some_and(|top| top.name == name)
                {
                    open.pop();
                }
                let leaf = self_closing || is_void_tag(&name);
                let element = Element {
                    name,
                    attrs,
                    self_closing,
                };
                let id = document.push(
                    NodeData::Element(element),
                    open.last().copied(),
                    offset,
                    line,
                );
                if !leaf {
                    open.push(id);
                }
            }
            MarkupToken::CloseTag { name } => {
                if is_void_tag(&name) {
                    continue;
                }
                close_element(&document, &mut open, &name)
                    .map_err(|e| ParseError::new(file_path, offset, line, e))?;
            }
            MarkupToken::Text(text) => {
                document.push(NodeData::Text(text), open.last().copied(), offset, line);
            }
            MarkupToken::Comment(text) => {
                document.push(NodeData::Comment(text), open.last().copied(), offset, line);
            }
            MarkupToken::ServerCode(code) => {
                document.push(NodeData::ServerCode(code), open.last().copied(), offset, line);
            }
        }
    }

    if let Some(&unclosed) = open.iter().rev().find(|&&id| !has_optional_end(&document, id)) {
        let node = document.node(unclosed);
        let name = node.element().map(|e| e.name.clone()).unwrap_or_default();
        return Err(ParseError::new(
            file_path,
            node.offset,
            node.line,
            StructureError::Unclosed(name),
        ));
    }

    Ok(document)
}

/// Tokenize and build a document with the default `TagTokenizer`.
pub fn parse_document(file_path: &str, source: &str) -> Result<Document, ParseError> {
    let mut tokenizer = TagTokenizer::new(file_path, source);
    build_document(file_path, &mut tokenizer)
}

fn has_optional_end(document: &Document, id: NodeId) -> bool {
    document
        .element(id)
        .is_some_and(|e| OPTIONAL_END_TAGS.contains(&e.name.as_str()))
}

fn close_element(
    document: &Document,
    open: &mut Vec<NodeId>,
    name: &str,
) -> Result<(), StructureError> {
    let Some(depth) = open
        .iter()
        .rposition(|&id| document.element(id).is_some_and(|e| e.name == name))
    else {
        return Err(StructureError::UnexpectedClose(format!("</{}>", name)));
    };

    if let Some(&blocking) = open[depth + 1..]
        .iter()
        .rev()
        .find(|&&id| !has_optional_end(document, id))
    {
        let expected = document
            .element(blocking)
            .map(|e| format!("</{}>", e.name))
            .unwrap_or_default();
        return Err(StructureError::MismatchedClose {
            expected,
            found: format!("</{}>", name),
        });
    }

    open.truncate(depth);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::ParseErrorKind;
    use pretty_assertions::assert_eq;

    fn tokens(source: &str) -> Vec<MarkupToken> {
        let mut tokenizer = TagTokenizer::new("t.html", source);
        let mut out = Vec::new();
        while let Some(token) = tokenizer.next_token().unwrap() {
            out.push(token.token);
        }
        out
    }

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    #[test]
    fn test_tokenize_tags_text_and_comments() {
        assert_eq!(
            tokens(r#"<!-- note --><P Lang="en">Hi &amp; bye</p>"#),
            vec![
                MarkupToken::Comment(" note ".into()),
                MarkupToken::OpenTag {
                    name: "p".into(),
                    attrs: vec![attr("lang", "en")],
                    self_closing: false,
                },
                MarkupToken::Text("Hi &amp; bye".into()),
                MarkupToken::CloseTag { name: "p".into() },
            ]
        );
    }

    #[test]
    fn test_tokenize_attribute_forms() {
        assert_eq!(
            tokens(r#"<img lang="" src='x.png' alt="<? echo $t; ?>" width=10 hidden />"#),
            vec![MarkupToken::OpenTag {
                name: "img".into(),
                attrs: vec![
                    attr("lang", ""),
                    attr("src", "x.png"),
                    attr("alt", "<? echo $t; ?>"),
                    attr("width", "10"),
                    Attribute {
                        name: "hidden".into(),
                        value: None
                    },
                ],
                self_closing: true,
            }]
        );
    }

    #[test]
    fn test_doctype_and_xml_declaration_are_skipped() {
        assert_eq!(
            tokens("<?xml version=\"1.0\"?><!DOCTYPE html>x"),
            vec![MarkupToken::Text("x".into())]
        );
    }

    #[test]
    fn test_server_code_is_one_token() {
        assert_eq!(
            tokens("<?php $a = '<b>'; ?>x<?= $b ?>"),
            vec![
                MarkupToken::ServerCode("php $a = '<b>'; ".into()),
                MarkupToken::Text("x".into()),
                MarkupToken::ServerCode("= $b ".into()),
            ]
        );
    }

    #[test]
    fn test_lone_less_than_is_text() {
        assert_eq!(tokens("a < b"), vec![MarkupToken::Text("a < b".into())]);
    }

    #[test]
    fn test_script_content_is_raw_text() {
        assert_eq!(
            tokens("<script>if (a<b) {}</script>"),
            vec![
                MarkupToken::OpenTag {
                    name: "script".into(),
                    attrs: vec![],
                    self_closing: false,
                },
                MarkupToken::Text("if (a<b) {}".into()),
                MarkupToken::CloseTag {
                    name: "script".into()
                },
            ]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let mut tokenizer = TagTokenizer::new("t.html", "<p>a</p>\n<!-- open");
        let mut result = Ok(None);
        for _ in 0..5 {
            result = tokenizer.next_token();
            if result.is_err() {
                break;
            }
        }
        let err = result.unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lex(LexError::UnterminatedComment));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unterminated_tag() {
        let err = parse_document("t.html", "<div class=\"a>").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lex(LexError::UnterminatedTag));
    }

    #[test]
    fn test_unterminated_instruction() {
        let err = parse_document("t.php", "<p>x</p><?php echo 1;").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Lex(LexError::UnterminatedInstruction)
        );
    }

    #[test]
    fn test_document_structure_and_order() {
        let doc = parse_document("t.html", "<ul><li>a<li>b</ul><img src=x>").unwrap();
        assert_eq!(doc.roots(), &[0, 5]);
        assert_eq!(doc.node(0).children, vec![1, 3]);
        assert_eq!(doc.node(1).children, vec![2]);
        assert_eq!(doc.node(3).children, vec![4]);
        assert_eq!(doc.element(5).map(|e| e.name.as_str()), Some("img"));
        assert!(doc.node(5).children.is_empty());
    }

    #[test]
    fn test_paragraph_may_wrap_blocks() {
        let doc = parse_document("t.html", "<p lang=\"\"><ul><li>x</li></ul></p>").unwrap();
        assert_eq!(doc.node(0).children, vec![1]);
        assert_eq!(doc.node(1).parent, Some(0));
    }

    #[test]
    fn test_stray_close_tag() {
        let err = parse_document("t.html", "<p>x</p>\n</div>").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Structure(StructureError::UnexpectedClose("</div>".into()))
        );
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_mismatched_close_tag() {
        let err = parse_document("t.html", "<div><span>x</div>").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Structure(StructureError::MismatchedClose {
                expected: "</span>".into(),
                found: "</div>".into(),
            })
        );
    }

    #[test]
    fn test_unclosed_element() {
        let err = parse_document("t.html", "<div>\n<p>text").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Structure(StructureError::Unclosed("div".into()))
        );
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_preceding_comment() {
        let doc =
            parse_document("t.html", "<!-- a -->\n  <p>x</p><!-- b --> text <p>y</p>").unwrap();
        let paragraphs: Vec<NodeId> = doc
            .ids()
            .filter(|&id| doc.element(id).is_some_and(|e| e.name == "p"))
            .collect();
        assert_eq!(doc.preceding_comment(paragraphs[0]), Some(" a "));
        assert_eq!(doc.preceding_comment(paragraphs[1]), None);
    }

    #[test]
    fn test_subtree_and_inner_markup() {
        let source = r#"<p><span lang="en">a <b>b</b><br><img src="x" /><!-- c --><?= $d ?></span></p><i>e</i>"#;
        let doc = parse_document("t.html", source).unwrap();
        assert_eq!(doc.subtree_end(0), 9);
        assert_eq!(doc.subtree_end(3), 5);
        assert_eq!(
            doc.inner_markup(0, "lang"),
            r#"<span>a <b>b</b><br><img src="x" /><!-- c --><?= $d ?></span>"#
        );
    }

    #[test]
    fn test_to_markup_without() {
        let element = Element {
            name: "img".into(),
            attrs: vec![attr("lang", "en"), attr("src", "x.png"), attr("alt", "say \"hi\"")],
            self_closing: true,
        };
        assert_eq!(
            element.to_markup_without("lang"),
            r#"<img src="x.png" alt='say "hi"' />"#
        );
    }
}
