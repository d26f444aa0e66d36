use super::html::is_void_tag;
use super::*;

mod attributes;
mod control_values;
mod query;
mod style_props;
mod text;
mod tree;
