//! Markup parsing for server-rendered pages. Scripts are kept as inert text.

use super::*;

pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut cursor = Cursor { src: html, pos: 0 };
    let mut tree = TreeBuilder::new();

    while !cursor.at_end() {
        if cursor.eat("<!--") {
            cursor
                .skip_past("-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
        } else if cursor.looking_at("</") {
            let name = cursor.end_tag()?;
            tree.close(&name);
        } else if cursor.looking_at("<!") {
            cursor.declaration()?;
        } else if cursor.at_start_tag() {
            let tag = cursor.start_tag()?;
            let Some(node) = tree.open(&tag) else {
                continue;
            };
            if is_raw_text_tag(&tag.name) && !tag.self_closing {
                let body = cursor.raw_text(&tag.name)?;
                tree.raw_text(node, &tag.name, body);
            }
        } else {
            tree.text(cursor.text());
        }
    }

    let mut dom = tree.dom;
    dom.initialize_form_control_values()?;
    Ok(dom)
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "title" | "textarea")
}

struct StartTag {
    name: String,
    attrs: HashMap<String, String>,
    self_closing: bool,
}

struct TreeBuilder {
    dom: Dom,
    /// Open elements, innermost last. The document root is never popped.
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        let dom = Dom::new();
        let stack = vec![dom.root];
        Self { dom, stack }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.dom.root)
    }

    /// Innermost open element (root excluded) accepted by `pick`.
    fn find_open(&self, pick: impl Fn(&str) -> bool) -> Option<usize> {
        (1..self.stack.len()).rev().find(|&depth| {
            self.dom
                .tag_name(self.stack[depth])
                .is_some_and(|tag| pick(tag))
        })
    }

    /// Returns `None` when the start tag is dropped.
    fn open(&mut self, tag: &StartTag) -> Option<NodeId> {
        if let Some((closes, stops)) = implied_close(&tag.name) {
            let nearest =
                self.find_open(|open| open == closes || stops.iter().any(|stop| *stop == open));
            if let Some(depth) = nearest.filter(|&depth| self.dom.is_tag(self.stack[depth], closes))
            {
                self.stack.truncate(depth);
            }
        }

        // Forms do not nest; the inner start tag is dropped and its
        // content joins the open form.
        if tag.name == "form" && self.find_open(|open| open == "form").is_some() {
            return None;
        }

        let node = self
            .dom
            .create_element(self.current(), tag.name.clone(), tag.attrs.clone());
        if !tag.self_closing && !is_void_tag(&tag.name) && !is_raw_text_tag(&tag.name) {
            self.stack.push(node);
        }
        Some(node)
    }

    /// Stray end tags with no matching open element are dropped.
    fn close(&mut self, name: &str) {
        if let Some(depth) = self.find_open(|open| open == name) {
            self.stack.truncate(depth);
        }
    }

    fn text(&mut self, raw: &str) {
        let text = decode_entities(raw);
        if !text.is_empty() {
            self.dom.create_text(self.current(), text);
        }
    }

    fn raw_text(&mut self, node: NodeId, tag: &str, body: &str) {
        let body = match tag {
            "title" | "textarea" => decode_entities(body),
            _ => body.to_string(),
        };
        if !body.is_empty() {
            self.dom.create_text(node, body);
        }
    }
}

/// For a start tag that ends an open element implicitly: the element it
/// closes and the elements that shield an outer one from being closed.
fn implied_close(tag: &str) -> Option<(&'static str, &'static [&'static str])> {
    match tag {
        "li" => Some(("li", &["ol", "ul", "menu"])),
        "option" | "optgroup" => Some(("option", &["optgroup", "select", "datalist"])),
        "address" | "article" | "aside" | "blockquote" | "div" | "dl" | "fieldset" | "footer"
        | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "main" | "nav"
        | "ol" | "p" | "pre" | "section" | "table" | "ul" => {
            Some(("p", &["form", "li", "td", "th", "button"]))
        }
        _ => None,
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_byte(b: u8) -> bool {
    is_name_byte(b) || matches!(b, b':' | b'@' | b'.')
}

/// Byte cursor over the markup. Every stop lands on an ASCII byte, so the
/// slices it hands out are always on char boundaries.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        self.src.get(self.pos..).unwrap_or_default()
    }

    fn since(&self, start: usize) -> &'a str {
        self.src.get(start..self.pos).unwrap_or_default()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn looking_at(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        let found = self.looking_at(prefix);
        if found {
            self.pos += prefix.len();
        }
        found
    }

    fn skip_past(&mut self, needle: &str) -> Option<()> {
        let at = self.rest().find(needle)?;
        self.pos += at + needle.len();
        Some(())
    }

    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        self.since(start)
    }

    fn skip_ws(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    fn at_start_tag(&self) -> bool {
        let bytes = self.rest().as_bytes();
        bytes.first() == Some(&b'<') && bytes.get(1).is_some_and(u8::is_ascii_alphabetic)
    }

    /// A `<` that does not open markup is literal text.
    fn text(&mut self) -> &'a str {
        let start = self.pos;
        self.pos += 1;
        self.take_while(|b| b != b'<');
        self.since(start)
    }

    /// Runs up to whitespace, `>` or `/>`.
    fn unquoted(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'>' || self.looking_at("/>") {
                break;
            }
            self.pos += 1;
        }
        self.since(start)
    }

    fn start_tag(&mut self) -> Result<StartTag> {
        self.pos += 1;
        let mut tag = StartTag {
            name: self.take_while(is_name_byte).to_ascii_lowercase(),
            attrs: HashMap::new(),
            self_closing: false,
        };

        loop {
            self.skip_ws();
            if self.eat(">") {
                return Ok(tag);
            }
            if self.eat("/>") {
                tag.self_closing = true;
                return Ok(tag);
            }
            match self.peek() {
                None => {
                    return Err(Error::HtmlParse(format!(
                        "unclosed start tag <{}>",
                        tag.name
                    )));
                }
                Some(b) if !is_attr_name_byte(b) => {
                    self.unquoted();
                }
                Some(_) => {
                    let name = self.take_while(is_attr_name_byte).to_ascii_lowercase();
                    self.skip_ws();
                    let value = if self.eat("=") {
                        self.skip_ws();
                        self.attr_value()?
                    } else {
                        String::new()
                    };
                    tag.attrs.entry(name).or_insert(value);
                }
            }
        }
    }

    fn attr_value(&mut self) -> Result<String> {
        match self.peek() {
            None => Err(Error::HtmlParse("missing attribute value".into())),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value = self.take_while(|b| b != quote);
                if !self.eat(if quote == b'"' { "\"" } else { "'" }) {
                    return Err(Error::HtmlParse("unclosed quoted attribute value".into()));
                }
                Ok(decode_entities(value))
            }
            Some(_) => Ok(decode_entities(self.unquoted())),
        }
    }

    fn end_tag(&mut self) -> Result<String> {
        self.pos += 2;
        self.skip_ws();
        let name = self.take_while(is_name_byte).to_ascii_lowercase();
        self.skip_past(">")
            .ok_or_else(|| Error::HtmlParse("unclosed end tag".into()))?;
        Ok(name)
    }

    /// `<!DOCTYPE ...>` and friends; a `>` inside quotes does not end them.
    fn declaration(&mut self) -> Result<()> {
        self.pos += 2;
        let mut quote = None;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match quote {
                Some(open) if b == open => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if b == b'>' => return Ok(()),
                None => {}
            }
        }
        Err(Error::HtmlParse("unclosed declaration tag".into()))
    }

    /// Body of a raw text element up to its end tag, matched without
    /// regard to case. The end tag is consumed.
    fn raw_text(&mut self, tag: &str) -> Result<&'a str> {
        let start = self.pos;
        loop {
            let Some(at) = self.rest().find("</") else {
                return Err(Error::HtmlParse(format!("unclosed <{tag}>")));
            };
            self.pos += at;
            if self.closes(tag) {
                let body = self.since(start);
                self.end_tag()?;
                return Ok(body);
            }
            self.pos += 2;
        }
    }

    fn closes(&self, tag: &str) -> bool {
        let after_slash = self.rest().get(2..).unwrap_or_default();
        let name = after_slash.trim_start_matches(|ch: char| ch.is_ascii_whitespace());
        name.get(..tag.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(tag))
            && name
                .as_bytes()
                .get(tag.len())
                .is_none_or(|b| !b.is_ascii_alphanumeric())
    }
}

/// Decodes numeric references and the named references common in blog
/// markup. A reference that does not decode is kept as written.
fn decode_entities(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];
        let len = rest
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '#'))
            .unwrap_or(rest.len());
        match entity_char(&rest[..len]) {
            Some(ch) => {
                out.push(ch);
                rest = &rest[len..];
                rest = rest.strip_prefix(';').unwrap_or(rest);
            }
            None => out.push('&'),
        }
    }
    out.push_str(rest);
    out
}

fn entity_char(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "middot" => '\u{b7}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "times" => '\u{d7}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "trade" => '\u{2122}',
        "larr" => '\u{2190}',
        "rarr" => '\u{2192}',
        "euro" => '\u{20ac}',
        "pound" => '\u{a3}',
        _ => return None,
    };
    Some(ch)
}
