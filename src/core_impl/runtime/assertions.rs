use super::*;

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let text = self.dom.text_content(node);
        self.expect_at(selector, node, text == expected, expected, &text)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let value = self.dom.value(node)?;
        self.expect_at(selector, node, value == expected, expected, &value)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let found = self.dom.select_all(selector)?;
        let near = found.first().copied().unwrap_or(self.dom.root);
        self.expect_at(
            selector,
            near,
            found.len() == expected,
            &expected.to_string(),
            &found.len().to_string(),
        )
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let node = self.select_one(selector)?;
        let present = self.dom.class_contains(node, class_name)?;
        let describe = |present: bool| format!("class {class_name:?} present={present}");
        self.expect_at(
            selector,
            node,
            present == expected,
            &describe(expected),
            &describe(present),
        )
    }

    fn expect_at(
        &self,
        selector: &str,
        node: NodeId,
        holds: bool,
        expected: &str,
        actual: &str,
    ) -> Result<()> {
        if holds {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: self.node_snippet(node),
        })
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        self.dom.select_all(selector).map(|found| found.len())
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        self.dom.class_contains(self.select_one(selector)?, class_name)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        Ok(self.dom.text_content(self.select_one(selector)?))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        self.dom.value(self.select_one(selector)?)
    }

    /// Inline style value of `property`, or an empty string.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        self.dom.style_get(self.select_one(selector)?, property)
    }

    /// Serialized markup of the first match.
    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        Ok(self.dom.dump_node(self.select_one(selector)?))
    }

    pub fn location_hash(&self) -> &str {
        &self.location.hash
    }

    /// The `id` of the element the page last scrolled to, if any.
    pub fn scroll_target(&self) -> Option<String> {
        let node = self.location.scroll_target?;
        self.dom.attr(node, "id")
    }

    /// Submissions that went through since the last call.
    pub fn take_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.submissions)
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        match self.dom.select_first(selector)? {
            Some(node) => Ok(node),
            None => Err(Error::SelectorNotFound(selector.to_string())),
        }
    }

    pub(crate) fn node_snippet(&self, node: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node), 200)
    }
}
