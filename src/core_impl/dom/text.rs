use super::*;

impl Dom {
    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.push_text(node_id, &mut out);
        out
    }

    fn push_text(&self, node_id: NodeId, out: &mut String) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            if let NodeType::Text(text) = &self.nodes[node_id.0].node_type {
                out.push_str(text);
            }
            for child in self.children(node_id) {
                self.push_text(*child, out);
            }
        })
    }

    /// Replaces every child of `node_id` with a single text node, or with
    /// nothing for an empty `value`.
    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime("text target is not an element".into()));
        }
        let removed = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in &removed {
            self.nodes[child.0].parent = None;
        }
        if removed.iter().any(|child| self.subtree_has_id(*child)) {
            self.reindex_ids();
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        Ok(())
    }

    /// Markup for `node_id` with attributes sorted by name, used in
    /// assertion messages.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.push_markup(node_id, false, &mut out);
        out
    }

    fn push_markup(&self, node_id: NodeId, raw_text: bool, out: &mut String) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            let element = match &self.nodes[node_id.0].node_type {
                NodeType::Text(text) if raw_text => return out.push_str(text),
                NodeType::Text(text) => return out.push_str(&escape_markup(text, false)),
                NodeType::Document => None,
                NodeType::Element(element) => Some(element),
            };

            if let Some(element) = element {
                let mut attrs = element.attrs.iter().collect::<Vec<_>>();
                attrs.sort();
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in attrs {
                    out.push_str(&format!(" {name}=\"{}\"", escape_markup(value, true)));
                }
                out.push('>');
                if is_void_tag(&element.tag_name) {
                    return;
                }
            }

            let raw_children =
                element.is_some_and(|element| matches!(element.tag_name.as_str(), "script" | "style"));
            for child in self.children(node_id) {
                self.push_markup(*child, raw_children, out);
            }
            if let Some(element) = element {
                out.push_str(&format!("</{}>", element.tag_name));
            }
        })
    }
}
