//! A small CSS selector engine covering what the controllers query with:
//! type, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`, `[attr^=value]`,
//! compound selectors, descendant and child combinators and comma lists.

use shared::{domain::NodeId, error::FxError};

/// Read access a tree needs to offer for matching.
pub trait ElementView {
    fn tag(&self, node: NodeId) -> &str;
    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    /// Left to right. The combinator of the first compound is unused.
    pub parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatch {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

impl SelectorList {
    /// Commas split the list only at the top level; a comma inside a quoted
    /// attribute value belongs to that value.
    pub fn parse(raw: &str) -> Result<Self, FxError> {
        let mut cursor = Cursor {
            source: raw,
            chars: raw.chars().collect(),
            pos: 0,
        };
        let mut selectors = vec![parse_complex(&mut cursor)?];
        while cursor.peek() == Some(',') {
            cursor.bump();
            selectors.push(parse_complex(&mut cursor)?);
        }
        Ok(Self { selectors })
    }

    pub fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|selector| matches_at(view, selector, selector.parts.len() - 1, node))
    }
}

fn matches_at<V: ElementView + ?Sized>(
    view: &V,
    selector: &ComplexSelector,
    index: usize,
    node: NodeId,
) -> bool {
    let (combinator, compound) = &selector.parts[index];
    if !compound.matches(view, node) {
        return false;
    }
    if index == 0 {
        return true;
    }

    match combinator {
        Combinator::Child => view
            .parent_of(node)
            .is_some_and(|parent| matches_at(view, selector, index - 1, parent)),
        Combinator::Descendant => {
            let mut ancestor = view.parent_of(node);
            while let Some(current) = ancestor {
                if matches_at(view, selector, index - 1, current) {
                    return true;
                }
                ancestor = view.parent_of(current);
            }
            false
        }
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && !view.tag(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if view.attr(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| view.has_class(node, class)) {
            return false;
        }
        self.attributes.iter().all(|attribute| match attribute {
            AttributeMatch::Exists(name) => view.attr(node, name).is_some(),
            AttributeMatch::Equals(name, value) => {
                view.attr(node, name).as_deref() == Some(value.as_str())
            }
            AttributeMatch::Prefix(name, prefix) => view
                .attr(node, name)
                .is_some_and(|actual| !prefix.is_empty() && actual.starts_with(prefix.as_str())),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

struct Cursor<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> Result<String, FxError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn error(&self, reason: &str) -> FxError {
        FxError::invalid_selector(self.source, format!("{reason} at offset {}", self.pos))
    }
}

fn parse_complex(cursor: &mut Cursor<'_>) -> Result<ComplexSelector, FxError> {
    let mut parts = Vec::new();
    let mut combinator = Combinator::Descendant;

    cursor.skip_whitespace();
    loop {
        let compound = parse_compound(cursor)?;
        if compound.is_empty() {
            return Err(cursor.error("expected selector"));
        }
        parts.push((combinator, compound));

        let had_space = cursor.skip_whitespace();
        match cursor.peek() {
            None | Some(',') => break,
            Some('>') => {
                cursor.bump();
                cursor.skip_whitespace();
                combinator = Combinator::Child;
            }
            Some(_) if had_space => combinator = Combinator::Descendant,
            Some(_) => return Err(cursor.error("unexpected character")),
        }
    }

    Ok(ComplexSelector { parts })
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Result<Compound, FxError> {
    let mut compound = Compound::default();

    match cursor.peek() {
        Some('*') => {
            cursor.bump();
            compound.tag = Some("*".into());
        }
        Some(c) if is_ident_char(c) => compound.tag = Some(cursor.ident()?.to_ascii_lowercase()),
        _ => {}
    }

    loop {
        match cursor.peek() {
            Some('#') => {
                cursor.bump();
                compound.id = Some(cursor.ident()?);
            }
            Some('.') => {
                cursor.bump();
                compound.classes.push(cursor.ident()?);
            }
            Some('[') => {
                cursor.bump();
                compound.attributes.push(parse_attribute(cursor)?);
            }
            _ => break,
        }
    }

    Ok(compound)
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<AttributeMatch, FxError> {
    cursor.skip_whitespace();
    let name = cursor.ident()?;
    cursor.skip_whitespace();

    let prefix = match cursor.bump() {
        Some(']') => return Ok(AttributeMatch::Exists(name)),
        Some('=') => false,
        Some('^') if cursor.bump() == Some('=') => true,
        _ => return Err(cursor.error("unsupported attribute operator")),
    };

    cursor.skip_whitespace();
    let value = match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.bump();
            let mut value = String::new();
            loop {
                match cursor.bump() {
                    Some(c) if c == quote => break,
                    Some(c) => value.push(c),
                    None => return Err(cursor.error("unterminated string")),
                }
            }
            value
        }
        _ => cursor.ident()?,
    };
    cursor.skip_whitespace();
    if cursor.bump() != Some(']') {
        return Err(cursor.error("expected ']'"));
    }

    Ok(if prefix {
        AttributeMatch::Prefix(name, value)
    } else {
        AttributeMatch::Equals(name, value)
    })
}
