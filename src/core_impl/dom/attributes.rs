use super::*;

impl Dom {
    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)?
            .attrs
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.has_attr(name))
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.has_attr(node_id, "disabled")
    }

    pub(crate) fn readonly(&self, node_id: NodeId) -> bool {
        self.has_attr(node_id, "readonly")
    }

    pub(crate) fn required(&self, node_id: NodeId) -> bool {
        self.has_attr(node_id, "required")
    }

    /// Live checkedness, which only starts out from the `checked` attribute.
    pub(crate) fn checked(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|element| element.checked)
    }

    pub(crate) fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("checked target is not an element".into()))?;
        element.checked = checked;
        Ok(())
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime(format!("cannot set `{name}` on a non-element")))?;
        let previous = element.attrs.insert(name.clone(), value.to_string());
        if name == "id" && previous.as_deref() != Some(value) {
            self.reindex_ids();
        }
        Ok(())
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime(format!("cannot remove `{name}` from a non-element")))?;
        if element.attrs.remove(&name).is_some() && name == "id" {
            self.reindex_ids();
        }
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("class list target is not an element".into()))?;
        Ok(element.has_class_name(class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        self.edit_classes(node_id, |names| {
            if !names.iter().any(|name| name == class_name) {
                names.push(class_name.to_string());
            }
        })
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        self.edit_classes(node_id, |names| names.retain(|name| name != class_name))
    }

    /// Returns whether the class is present afterwards.
    pub(crate) fn class_toggle(&mut self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let present = !self.class_contains(node_id, class_name)?;
        if present {
            self.class_add(node_id, class_name)?;
        } else {
            self.class_remove(node_id, class_name)?;
        }
        Ok(present)
    }

    fn edit_classes(&mut self, node_id: NodeId, edit: impl FnOnce(&mut Vec<String>)) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("class list target is not an element".into()))?;
        let mut names = element.class_names().map(str::to_string).collect::<Vec<_>>();
        edit(&mut names);
        element.set_class_names(&names);
        Ok(())
    }
}
