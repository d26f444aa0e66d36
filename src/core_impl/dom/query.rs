use super::*;

impl Dom {
    /// Every element in the document matching `selector`, in document order.
    pub(crate) fn select_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = parse_selector_list(selector)?;
        if let [single] = list.as_slice() {
            if let (1, Some(id)) = (single.compounds.len(), single.subject().and_then(Compound::bare_id)) {
                return Ok(self.all_by_id(id));
            }
        }
        Ok(self.keep_matching(self.document_elements(), &list))
    }

    pub(crate) fn select_first(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.select_all(selector)?.into_iter().next())
    }

    /// Matching elements strictly below `scope`. Ancestors of `scope` still
    /// take part in combinator matching.
    pub(crate) fn select_all_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let list = parse_selector_list(selector)?;
        Ok(self.keep_matching(self.descendant_elements(scope), &list))
    }

    fn keep_matching(&self, candidates: Vec<NodeId>, list: &[ComplexSelector]) -> Vec<NodeId> {
        candidates
            .into_iter()
            .filter(|node| {
                list.iter()
                    .any(|selector| self.matches_from(*node, selector, selector.compounds.len()))
            })
            .collect()
    }

    /// Matches `node_id` against the first `upto` compounds of `selector`,
    /// right to left. Descendant steps backtrack over every ancestor.
    fn matches_from(&self, node_id: NodeId, selector: &ComplexSelector, upto: usize) -> bool {
        let Some(last) = upto.checked_sub(1) else {
            return true;
        };
        if !self.matches_compound(node_id, &selector.compounds[last]) {
            return false;
        }
        let Some(relation) = last.checked_sub(1).map(|at| selector.relations[at]) else {
            return true;
        };

        match relation {
            Relation::Child => self
                .parent(node_id)
                .is_some_and(|parent| self.matches_from(parent, selector, last)),
            Relation::NextSibling => self
                .element_sibling(node_id, false)
                .is_some_and(|prev| self.matches_from(prev, selector, last)),
            Relation::Descendant => self
                .ancestors_inclusive(node_id)
                .skip(1)
                .any(|ancestor| self.matches_from(ancestor, selector, last)),
        }
    }

    fn matches_compound(&self, node_id: NodeId, compound: &Compound) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        if compound
            .tag
            .as_ref()
            .is_some_and(|tag| !element.tag_name.eq_ignore_ascii_case(tag))
        {
            return false;
        }
        if compound
            .id
            .as_ref()
            .is_some_and(|id| element.attrs.get("id") != Some(id))
        {
            return false;
        }
        compound.classes.iter().all(|class| element.has_class_name(class))
            && compound.attrs.iter().all(|filter| {
                let value = element.attrs.get(&filter.name);
                match &filter.test {
                    AttrTest::Present => value.is_some(),
                    AttrTest::Equals(expected) => value == Some(expected),
                    AttrTest::Prefix(prefix) => value
                        .is_some_and(|value| !prefix.is_empty() && value.starts_with(prefix.as_str())),
                }
            })
    }
}
