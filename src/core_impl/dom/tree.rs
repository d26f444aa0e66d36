use super::*;

impl Dom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                node_type: NodeType::Document,
            }],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn push_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let node_id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(node_id);
        }
        node_id
    }

    /// Appends a parsed element under `parent`. Parsing runs in document
    /// order, so indexing the new id at the end keeps each list ordered.
    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let id_attr = attrs.get("id").filter(|id| !id.is_empty()).cloned();
        let node_id = self.push_node(Some(parent), NodeType::Element(Element::new(tag_name, attrs)));
        if let Some(id_attr) = id_attr {
            self.id_index.entry(id_attr).or_default().push(node_id);
        }
        node_id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element::new(tag_name.to_ascii_lowercase(), HashMap::new());
        self.push_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.push_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        Some(self.element(node_id)?.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        match self.nodes.get(node_id.0) {
            Some(node) => &node.children[..],
            None => &[],
        }
    }

    /// `node_id` followed by its ancestors, nearest first.
    pub(crate) fn ancestors_inclusive(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> {
        std::iter::successors(Some(node_id), |node| self.parent(*node))
    }

    pub(crate) fn is_connected(&self, node_id: NodeId) -> bool {
        self.ancestors_inclusive(node_id).any(|node| node == self.root)
    }

    pub(crate) fn can_have_children(&self, node_id: NodeId) -> bool {
        match self.nodes.get(node_id.0).map(|node| &node.node_type) {
            Some(NodeType::Document) => true,
            Some(NodeType::Element(element)) => !is_void_tag(&element.tag_name),
            Some(NodeType::Text(_)) | None => false,
        }
    }

    pub(crate) fn element_sibling(&self, node_id: NodeId, forward: bool) -> Option<NodeId> {
        let siblings = self.children(self.parent(node_id)?);
        let pos = siblings.iter().position(|sibling| *sibling == node_id)?;
        let is_element = |sibling: &&NodeId| self.element(**sibling).is_some();
        if forward {
            siblings[pos + 1..].iter().find(is_element).copied()
        } else {
            siblings[..pos].iter().rev().find(is_element).copied()
        }
    }

    pub(crate) fn nearest_ancestor_tagged(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        self.ancestors_inclusive(node_id)
            .skip(1)
            .find(|node| self.is_tag(*node, tag))
    }

    /// Elements under `node_id` in document order, `node_id` itself included
    /// when it is an element.
    pub(crate) fn subtree_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.push_subtree_elements(node_id, &mut out);
        out
    }

    fn push_subtree_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            if self.element(node_id).is_some() {
                out.push(node_id);
            }
            for child in self.children(node_id) {
                self.push_subtree_elements(*child, out);
            }
        })
    }

    pub(crate) fn descendant_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.children(node_id) {
            self.push_subtree_elements(*child, &mut out);
        }
        out
    }

    pub(crate) fn document_elements(&self) -> Vec<NodeId> {
        self.descendant_elements(self.root)
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id)?.first().copied()
    }

    pub(crate) fn all_by_id(&self, id: &str) -> Vec<NodeId> {
        self.id_index.get(id).cloned().unwrap_or_default()
    }

    /// Recomputes the id index from the connected tree.
    pub(crate) fn reindex_ids(&mut self) {
        let mut index: HashMap<String, Vec<NodeId>> = HashMap::new();
        for node in self.document_elements() {
            if let Some(id) = self.element(node).and_then(|element| element.attrs.get("id")) {
                if !id.is_empty() {
                    index.entry(id.clone()).or_default().push(node);
                }
            }
        }
        self.id_index = index;
    }

    pub(crate) fn subtree_has_id(&self, subtree: NodeId) -> bool {
        self.subtree_elements(subtree).into_iter().any(|node| {
            self.element(node)
                .is_some_and(|element| element.attrs.get("id").is_some_and(|id| !id.is_empty()))
        })
    }

    /// Reindexes after `subtree` moved into or out of the document, skipping
    /// the walk when nothing in it carries an id.
    pub(crate) fn reindex_ids_for(&mut self, subtree: NodeId) {
        if self.subtree_has_id(subtree) {
            self.reindex_ids();
        }
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let at = self.children(parent).len();
        self.place_child(parent, child, at, "appendChild")
    }

    pub(crate) fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<()> {
        if self.parent(reference) != Some(parent) {
            return Err(Error::Runtime(
                "insertBefore reference is not a child of the parent".into(),
            ));
        }
        if child == reference {
            return Ok(());
        }
        let at = self
            .children(parent)
            .iter()
            .position(|node| *node == reference)
            .unwrap_or_default();
        self.place_child(parent, child, at, "insertBefore")
    }

    /// Places `child` directly after `target` under the same parent.
    pub(crate) fn insert_after(&mut self, target: NodeId, child: NodeId) -> Result<()> {
        let parent = self
            .parent(target)
            .ok_or_else(|| Error::Runtime("cannot insert after a detached node".into()))?;
        match self.node_after(parent, target) {
            Some(next) => self.insert_before(parent, child, next),
            None => self.append_child(parent, child),
        }
    }

    fn node_after(&self, parent: NodeId, target: NodeId) -> Option<NodeId> {
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|node| *node == target)?;
        siblings.get(pos + 1).copied()
    }

    /// Detaches `child` from wherever it is and inserts it at `at` among the
    /// children of `parent`, where `at` counts the children before the move.
    fn place_child(&mut self, parent: NodeId, child: NodeId, at: usize, op: &str) -> Result<()> {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return Err(Error::Runtime(format!("{op}: unknown node")));
        }
        if !self.can_have_children(parent) {
            return Err(Error::Runtime(format!("{op}: parent cannot have children")));
        }
        if child == self.root || self.ancestors_inclusive(parent).any(|node| node == child) {
            return Err(Error::Runtime(format!(
                "{op}: a node cannot be placed inside itself"
            )));
        }

        let mut at = at;
        if let Some(old_parent) = self.parent(child) {
            let siblings = &mut self.nodes[old_parent.0].children;
            if let Some(pos) = siblings.iter().position(|node| *node == child) {
                siblings.remove(pos);
                if old_parent == parent && pos < at {
                    at -= 1;
                }
            }
        }
        let siblings = &mut self.nodes[parent.0].children;
        siblings.insert(at.min(siblings.len()), child);
        self.nodes[child.0].parent = Some(parent);
        self.reindex_ids_for(child);
        Ok(())
    }

    pub(crate) fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.parent(child) != Some(parent) {
            return Err(Error::Runtime(
                "removeChild target is not a child of the parent".into(),
            ));
        }
        self.nodes[parent.0].children.retain(|node| *node != child);
        self.nodes[child.0].parent = None;
        self.reindex_ids_for(child);
        Ok(())
    }

    pub(crate) fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::Runtime("the document cannot be removed".into()));
        }
        match self.parent(node) {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(()),
        }
    }
}
