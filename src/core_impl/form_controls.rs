use super::*;

pub(crate) fn is_form_control(dom: &Dom, node_id: NodeId) -> bool {
    dom.tag_name(node_id)
        .is_some_and(|tag| matches!(tag, "input" | "select" | "textarea" | "button"))
}

fn input_type(dom: &Dom, node_id: NodeId) -> Option<String> {
    if !dom.is_tag(node_id, "input") {
        return None;
    }
    Some(
        dom.attr(node_id, "type")
            .unwrap_or_else(|| "text".to_string())
            .to_ascii_lowercase(),
    )
}

pub(crate) fn is_hidden_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id).is_some_and(|kind| kind == "hidden")
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    if dom.is_tag(node_id, "button") {
        return dom
            .attr(node_id, "type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }

    input_type(dom, node_id).is_some_and(|kind| kind == "submit" || kind == "image")
}

/// Disabled either directly or through an ancestor `fieldset`.
pub(crate) fn is_effectively_disabled(dom: &Dom, node_id: NodeId) -> bool {
    dom.disabled(node_id)
        || dom
            .ancestors_inclusive(node_id)
            .skip(1)
            .any(|ancestor| dom.is_tag(ancestor, "fieldset") && dom.disabled(ancestor))
}

/// The form that owns `target`: the target itself, the form named by its
/// `form` attribute, or its nearest ancestor form.
pub(crate) fn resolve_form_owner(dom: &Dom, target: NodeId) -> Option<NodeId> {
    if dom.is_tag(target, "form") {
        return Some(target);
    }
    if let Some(form_id) = dom.attr(target, "form") {
        let owner = dom.by_id(&form_id)?;
        return dom.is_tag(owner, "form").then_some(owner);
    }
    dom.nearest_ancestor_tagged(target, "form")
}

pub(crate) fn form_elements(dom: &Dom, form: NodeId) -> Result<Vec<NodeId>> {
    if !dom.is_tag(form, "form") {
        return Err(Error::Runtime("elements target is not a form".into()));
    }

    Ok(dom
        .document_elements()
        .into_iter()
        .filter(|node| is_form_control(dom, *node) && resolve_form_owner(dom, *node) == Some(form))
        .collect())
}

fn is_successful_control(dom: &Dom, control: NodeId) -> bool {
    if is_effectively_disabled(dom, control) {
        return false;
    }
    if dom.attr(control, "name").unwrap_or_default().is_empty() {
        return false;
    }
    if dom.is_tag(control, "button") {
        return false;
    }
    match input_type(dom, control).as_deref() {
        Some("button" | "submit" | "reset" | "file" | "image") => false,
        Some("checkbox" | "radio") => dom.checked(control),
        _ => true,
    }
}

pub(crate) fn form_data_entries(dom: &Dom, form: NodeId) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for control in form_elements(dom, form)? {
        if !is_successful_control(dom, control) {
            continue;
        }
        let name = dom.attr(control, "name").unwrap_or_default();
        out.push((name, dom.value(control)?));
    }
    Ok(out)
}

/// The other radio buttons sharing `radio`'s name and form owner.
pub(crate) fn radio_group(dom: &Dom, radio: NodeId) -> Vec<NodeId> {
    let Some(name) = dom.attr(radio, "name").filter(|name| !name.is_empty()) else {
        return Vec::new();
    };
    let owner = resolve_form_owner(dom, radio);
    dom.document_elements()
        .into_iter()
        .filter(|node| {
            *node != radio
                && input_type(dom, *node).as_deref() == Some("radio")
                && dom.attr(*node, "name").as_deref() == Some(name.as_str())
                && resolve_form_owner(dom, *node) == owner
        })
        .collect()
}
