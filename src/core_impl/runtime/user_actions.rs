use super::*;

impl Page {
    /// Replaces the value of a text control and fires `input`. Disabled,
    /// read-only and hidden controls ignore typing.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !matches!(self.dom.tag_name(target), Some("input" | "textarea")) {
            return Err(self.control_mismatch(selector, target, "input or textarea"));
        }
        if is_effectively_disabled(&self.dom, target)
            || self.dom.readonly(target)
            || is_hidden_input(&self.dom, target)
        {
            return Ok(());
        }

        stacker::grow(32 * 1024 * 1024, || {
            self.dom.set_value(target, text)?;
            self.dispatch_event(target, "input")?;
            Ok(())
        })
    }

    /// Chooses the option of a `<select>` whose value is `value`, then fires
    /// `input` and `change`. An unknown value leaves nothing selected.
    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.dom.is_tag(target, "select") {
            return Err(self.control_mismatch(selector, target, "select"));
        }
        if is_effectively_disabled(&self.dom, target) {
            return Ok(());
        }

        stacker::grow(32 * 1024 * 1024, || {
            self.dom.set_value(target, value)?;
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
            Ok(())
        })
    }

    /// Sets the checkedness of a checkbox or radio button. Events fire only
    /// when the state actually changes; checking a radio unchecks the rest of
    /// its group.
    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let kind = self
            .dom
            .attr(target, "type")
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !self.dom.is_tag(target, "input") || !matches!(kind.as_str(), "checkbox" | "radio") {
            return Err(self.control_mismatch(selector, target, "checkbox or radio input"));
        }
        if is_effectively_disabled(&self.dom, target) || self.dom.checked(target) == checked {
            return Ok(());
        }

        if kind == "radio" && checked {
            for other in radio_group(&self.dom, target) {
                self.dom.set_checked(other, false)?;
            }
        }
        self.dom.set_checked(target, checked)?;
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
            Ok(())
        })
    }

    fn control_mismatch(&self, selector: &str, target: NodeId, expected: &str) -> Error {
        let actual = match self.dom.tag_name(target) {
            Some("input") => format!(
                "input[type={}]",
                self.dom.attr(target, "type").unwrap_or_else(|| "text".into())
            ),
            Some(tag) => tag.to_string(),
            None => "non-element".into(),
        };
        Error::TypeMismatch {
            selector: selector.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || self.click_node(target))
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if is_effectively_disabled(&self.dom, target) {
            return Ok(());
        }

        let event = self.dispatch_event(target, "click")?;
        if event.default_prevented {
            return Ok(());
        }

        let Some(activator) = self.activation_target(target) else {
            return Ok(());
        };
        if self.dom.is_tag(activator, "a") {
            let href = self.dom.attr(activator, "href").unwrap_or_default();
            if let Some(fragment) = href.strip_prefix('#') {
                self.navigate_to_fragment(fragment);
            }
            return Ok(());
        }

        if let Some(form) = resolve_form_owner(&self.dom, activator) {
            self.submit_form(form)?;
        }
        Ok(())
    }

    /// The nearest inclusive ancestor with an activation behaviour: an
    /// anchor with `href` or a submit control.
    fn activation_target(&self, target: NodeId) -> Option<NodeId> {
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            if self.dom.is_tag(node, "a") && self.dom.attr(node, "href").is_some() {
                return Some(node);
            }
            if is_submit_control(&self.dom, node) {
                return Some(node);
            }
            cursor = self.dom.parent(node);
        }
        None
    }

    /// Default fragment navigation: sets the hash and scrolls to the element
    /// with that id, if any. `fragment` may carry its leading `#`.
    pub(crate) fn navigate_to_fragment(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let from = std::mem::replace(&mut self.location.hash, LocationState::hash_for(fragment));
        self.location.scroll_target = if fragment.is_empty() {
            None
        } else {
            self.dom.by_id(fragment)
        };
        self.trace_line(format!(
            "[page] navigate hash from={from:?} to={:?}",
            self.location.hash
        ));
    }

    /// Submits the form owning the element at `selector`.
    ///
    /// The `submit` event is dispatched first; native constraint validation
    /// is not performed.
    pub fn submit(&mut self, selector: &str) -> Result<SubmitOutcome> {
        let target = self.select_one(selector)?;
        let Some(form) = resolve_form_owner(&self.dom, target) else {
            return Ok(SubmitOutcome::NoForm);
        };
        stacker::grow(32 * 1024 * 1024, || self.submit_form(form))
    }

    pub(crate) fn submit_form(&mut self, form: NodeId) -> Result<SubmitOutcome> {
        let event = self.dispatch_event(form, "submit")?;
        if event.default_prevented {
            let label = self.trace_node_label(form);
            self.trace_line(format!("[page] submit form={label} outcome=cancelled"));
            return Ok(SubmitOutcome::Cancelled);
        }

        let submission = FormSubmission {
            form: self.form_label(form),
            action: self
                .dom
                .attr(form, "action")
                .filter(|action| !action.is_empty())
                .unwrap_or_else(|| self.location.url.clone()),
            method: normalize_form_method(self.dom.attr(form, "method").as_deref()),
            entries: form_data_entries(&self.dom, form)?,
        };
        self.trace_line(format!(
            "[page] submit form={} outcome=proceeded entries={}",
            submission.form,
            submission.entries.len()
        ));
        self.submissions.push(submission);
        Ok(SubmitOutcome::Proceeded)
    }

    fn form_label(&self, form: NodeId) -> String {
        self.dom
            .attr(form, "id")
            .filter(|id| !id.is_empty())
            .or_else(|| self.dom.attr(form, "name").filter(|name| !name.is_empty()))
            .unwrap_or_else(|| "form".to_string())
    }

    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let event = EventState::non_bubbling("mouseenter", target, self.timers.now_ms);
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_prepared_event(event)?;
            Ok(())
        })
    }

    pub fn unhover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let event = EventState::non_bubbling("mouseleave", target, self.timers.now_ms);
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_prepared_event(event)?;
            Ok(())
        })
    }
}

fn normalize_form_method(raw: Option<&str>) -> String {
    let method = raw.unwrap_or_default().trim().to_ascii_lowercase();
    match method.as_str() {
        "post" | "dialog" => method,
        _ => "get".to_string(),
    }
}
