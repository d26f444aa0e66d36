use super::*;

impl Dom {
    /// The live value of a control. A checkbox or radio without a `value`
    /// attribute reports `on`.
    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        let checkable = element.tag_name == "input"
            && element
                .attrs
                .get("type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio"));
        if checkable && !element.has_attr("value") {
            return Ok("on".into());
        }
        Ok(element.value.clone())
    }

    /// Sets a control value. For a `<select>` this picks the first option
    /// whose value equals `value`, or clears the selection when none does.
    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if !self.is_tag(node_id, "select") {
            return self.store_value(node_id, value.to_string());
        }

        let chosen = self
            .options_of(node_id)
            .into_iter()
            .find(|option| self.option_value(*option) == value);
        for option in self.options_of(node_id) {
            if Some(option) == chosen {
                self.set_attr(option, "selected", "")?;
            } else {
                self.remove_attr(option, "selected")?;
            }
        }
        let value = chosen.map(|option| self.option_value(option)).unwrap_or_default();
        self.store_value(node_id, value)
    }

    /// Seeds `<textarea>` and `<select>` values from their markup once the
    /// document is parsed.
    pub(crate) fn initialize_form_control_values(&mut self) -> Result<()> {
        for node in self.document_elements() {
            let initial = match self.tag_name(node) {
                Some("textarea") => {
                    let text = self.text_content(node);
                    // one newline right after the start tag belongs to the markup
                    let text = text
                        .strip_prefix("\r\n")
                        .or_else(|| text.strip_prefix('\n'))
                        .unwrap_or(&text);
                    text.to_string()
                }
                Some("select") => {
                    let options = self.options_of(node);
                    options
                        .iter()
                        .find(|option| self.attr(**option, "selected").is_some())
                        .or(options.first())
                        .map(|option| self.option_value(*option))
                        .unwrap_or_default()
                }
                _ => continue,
            };
            self.store_value(node, initial)?;
        }
        Ok(())
    }

    fn store_value(&mut self, node_id: NodeId, value: String) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        element.value = value;
        Ok(())
    }

    fn options_of(&self, select: NodeId) -> Vec<NodeId> {
        self.descendant_elements(select)
            .into_iter()
            .filter(|node| self.is_tag(*node, "option"))
            .collect()
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value,
            None => trim_page_whitespace(&self.text_content(option)).to_string(),
        }
    }
}
