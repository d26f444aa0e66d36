use super::*;

/// Declarations of an inline `style` attribute, in source order. Property
/// names are lower-cased and a repeated property keeps its last value.
struct InlineStyle(Vec<(String, String)>);

impl InlineStyle {
    fn parse(source: Option<&str>) -> Self {
        let mut decls: Vec<(String, String)> = Vec::new();
        for decl in source.unwrap_or_default().split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                continue;
            }
            decls.retain(|(existing, _)| *existing != name);
            decls.push((name, value.trim().to_string()));
        }
        Self(decls)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(prop, _)| prop.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set(&mut self, name: String, value: &str) {
        let at = self.0.iter().position(|(prop, _)| *prop == name);
        match (at, value.is_empty()) {
            (Some(at), true) => {
                self.0.remove(at);
            }
            (Some(at), false) => self.0[at].1 = value.to_string(),
            (None, true) => {}
            (None, false) => self.0.push((name, value.to_string())),
        }
    }

    fn to_attr(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        let decls = self
            .0
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>();
        Some(decls.join(" "))
    }
}

impl Dom {
    pub(crate) fn style_get(&self, node_id: NodeId, name: &str) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;
        let style = InlineStyle::parse(element.attrs.get("style").map(String::as_str));
        Ok(style.get(name).unwrap_or_default().to_string())
    }

    /// Sets one inline declaration; an empty value removes it.
    pub(crate) fn style_set(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;
        let mut style = InlineStyle::parse(element.attrs.get("style").map(String::as_str));
        style.set(name.to_ascii_lowercase(), value);
        match style.to_attr() {
            Some(attr) => element.attrs.insert("style".into(), attr),
            None => element.attrs.remove("style"),
        };
        Ok(())
    }
}
