//! An in-memory page runtime for tests of server-rendered pages, with
//! client-side required-field validation ([`form_guard`]) and the blog
//! layout behaviours ([`page_chrome`]).

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;

mod core_dom_utils;
mod core_impl;
pub mod form_guard;
pub mod page_chrome;
mod page_api;
mod runtime_state;
mod selector;

pub(crate) use core_dom_utils::*;
pub use form_guard::{FieldState, ValidationReport};
pub use page_api::Page;
pub use page_chrome::{ChromeBindings, ChromeOptions};
pub(crate) use runtime_state::*;
pub use runtime_state::{FormSubmission, PendingTimer, SubmitOutcome};
pub(crate) use selector::*;

pub type Result<T> = std::result::Result<T, Error>;

/// Misuse of the page harness. Incomplete user input is never an error;
/// FormGuard renders it inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The page markup could not be parsed.
    HtmlParse(String),
    /// A runtime operation was given an invalid node, value or setting.
    Runtime(String),
    /// Nothing on the page matches the selector.
    SelectorNotFound(String),
    /// The selector uses syntax outside the supported subset.
    UnsupportedSelector(String),
    /// The selected element cannot take the requested action.
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(reason) => write!(f, "cannot parse page markup: {reason}"),
            Self::Runtime(reason) => f.write_str(reason),
            Self::SelectorNotFound(selector) => write!(f, "no element matches `{selector}`"),
            Self::UnsupportedSelector(selector) => {
                write!(f, "`{selector}` is not a supported selector")
            }
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(f, "`{selector}` is a {actual}, expected {expected}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "`{selector}`: expected {expected}, found {actual}\n  near: {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

/// Index of a node in the [`Dom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

/// An element. Attribute names are stored lower-cased; `value` and
/// `checked` hold the live control state, which starts from the markup and
/// then diverges from the attributes as the user interacts.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
    pub(crate) checked: bool,
}

impl Element {
    pub(crate) fn new(tag_name: String, attrs: HashMap<String, String>) -> Self {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        Self {
            tag_name,
            attrs,
            value,
            checked,
        }
    }

    pub(crate) fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

/// Arena-backed document tree. Nodes are never freed; detached nodes simply
/// lose their parent link.
#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    /// Elements by `id`, each list in document order.
    pub(crate) id_index: HashMap<String, Vec<NodeId>>,
}

#[cfg(test)]
mod tests;
