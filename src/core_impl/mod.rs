use super::*;

mod dom;
pub(crate) mod form_controls;
pub(crate) mod html;
mod runtime;
