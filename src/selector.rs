//! The selector subset used to address page elements.
//!
//! Supported: type selectors, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! `[attr^=value]`, the descendant, child (`>`) and next-sibling (`+`)
//! combinators, and comma-separated groups.

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrTest {
    Present,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttrFilter {
    pub(crate) name: String,
    pub(crate) test: AttrTest,
}

/// One run of simple selectors with no combinator in between, e.g.
/// `input.error[name]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrFilter>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    /// The id of a bare `#id` compound.
    pub(crate) fn bare_id(&self) -> Option<&str> {
        if self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty() {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relation {
    Descendant,
    Child,
    NextSibling,
}

/// Compounds in source order; `relations[i]` links `compounds[i]` to
/// `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComplexSelector {
    pub(crate) compounds: Vec<Compound>,
    pub(crate) relations: Vec<Relation>,
}

impl ComplexSelector {
    pub(crate) fn subject(&self) -> Option<&Compound> {
        self.compounds.last()
    }
}

pub(crate) fn parse_selector_list(source: &str) -> Result<Vec<ComplexSelector>> {
    let unsupported = || Error::UnsupportedSelector(source.to_string());
    let mut scanner = Scanner {
        chars: source.chars().collect(),
        pos: 0,
    };

    let mut list = Vec::new();
    loop {
        list.push(scanner.complex().ok_or_else(unsupported)?);
        match scanner.bump() {
            None => return Ok(list),
            Some(',') => {}
            Some(_) => return Err(unsupported()),
        }
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Returns whether anything was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }

    /// Parses up to (not including) a `,` or the end of input.
    fn complex(&mut self) -> Option<ComplexSelector> {
        self.skip_ws();
        let mut selector = ComplexSelector {
            compounds: vec![self.compound()?],
            relations: Vec::new(),
        };

        loop {
            let spaced = self.skip_ws();
            let relation = match self.peek() {
                None | Some(',') => return Some(selector),
                Some('>') => {
                    self.pos += 1;
                    Relation::Child
                }
                Some('+') => {
                    self.pos += 1;
                    Relation::NextSibling
                }
                Some(_) if spaced => Relation::Descendant,
                Some(_) => return None,
            };
            self.skip_ws();
            selector.relations.push(relation);
            selector.compounds.push(self.compound()?);
        }
    }

    fn compound(&mut self) -> Option<Compound> {
        let mut compound = Compound {
            tag: self.ident().map(|tag| tag.to_ascii_lowercase()),
            ..Compound::default()
        };

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.ident()?;
                    if compound.id.replace(id).is_some() {
                        return None;
                    }
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attr_filter()?);
                }
                _ => break,
            }
        }

        (!compound.is_empty()).then_some(compound)
    }

    fn attr_filter(&mut self) -> Option<AttrFilter> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        let prefix = match self.bump()? {
            ']' => {
                return Some(AttrFilter {
                    name,
                    test: AttrTest::Present,
                });
            }
            '=' => false,
            '^' if self.bump()? == '=' => true,
            _ => return None,
        };

        self.skip_ws();
        let value = self.attr_value()?;
        self.skip_ws();
        if self.bump()? != ']' {
            return None;
        }

        let test = if prefix {
            AttrTest::Prefix(value)
        } else {
            AttrTest::Equals(value)
        };
        Some(AttrFilter { name, test })
    }

    fn attr_value(&mut self) -> Option<String> {
        let quote = self.peek()?;
        if quote != '"' && quote != '\'' {
            return self.ident();
        }
        self.pos += 1;
        let start = self.pos;
        while self.peek()? != quote {
            self.pos += 1;
        }
        let value = self.chars[start..self.pos].iter().collect();
        self.pos += 1;
        Some(value)
    }
}
