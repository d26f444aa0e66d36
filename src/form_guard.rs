//! Client-side required-field validation for forms.
//!
//! One `submit` listener is bound per form. On every submission attempt each
//! required `input`, `textarea` and `select` inside the form is checked in
//! document order. An empty (or whitespace-only) field gets the
//! [`ERROR_CLASS`] class and exactly one `span.error-message` right after
//! it, and the submission is cancelled. A field that has become non-empty
//! loses both again. Nothing is remembered between attempts except what is
//! visible in the DOM.
//!
//! ```
//! use page_guard::{Page, SubmitOutcome, form_guard};
//!
//! let mut page = Page::from_html(
//!     r#"<form id="comment"><input id="title" required></form>"#,
//! )?;
//! form_guard::attach(&mut page);
//!
//! assert_eq!(page.submit("#comment")?, SubmitOutcome::Cancelled);
//! page.assert_text(".error-message", "This field is required")?;
//!
//! page.type_text("#title", "hello")?;
//! assert_eq!(page.submit("#comment")?, SubmitOutcome::Proceeded);
//! page.assert_count(".error-message", 0)?;
//! # Ok::<(), page_guard::Error>(())
//! ```

use super::*;

pub const ERROR_CLASS: &str = "error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Whether a field value counts as filled in: anything left after trimming
/// white space and line terminators.
pub fn is_value_present(value: &str) -> bool {
    !trim_page_whitespace(value).is_empty()
}

/// The part of a field the validity decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState<'a> {
    pub value: &'a str,
}

impl FieldState<'_> {
    pub fn is_valid(&self) -> bool {
        is_value_present(self.value)
    }
}

/// Outcome of one validation pass over a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub checked: usize,
    pub invalid: usize,
    pub messages_inserted: usize,
    pub messages_removed: usize,
    /// Messages that could not be placed, e.g. for a field without a parent.
    pub messages_skipped: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid == 0
    }
}

/// Binds validation to every form in the document.
///
/// Returns the number of forms that were newly bound; forms that already
/// carry the listener are left alone.
pub fn attach(page: &mut Page) -> usize {
    let forms = page
        .dom
        .document_elements()
        .into_iter()
        .filter(|node| page.dom.is_tag(*node, "form"))
        .collect::<Vec<_>>();
    bind_forms(page, forms)
}

/// Like [`attach`], limited to forms inside (or equal to) the first element
/// matching `root_selector`.
pub fn attach_within(page: &mut Page, root_selector: &str) -> Result<usize> {
    let root = page.select_one(root_selector)?;
    let mut forms = Vec::new();
    if page.dom.is_tag(root, "form") {
        forms.push(root);
    }
    forms.extend(page.dom.select_all_within(root, "form")?);
    Ok(bind_forms(page, forms))
}

fn bind_forms(page: &mut Page, forms: Vec<NodeId>) -> usize {
    let mut bound = 0;
    for form in forms {
        let added = page.listeners.add(
            form,
            "submit",
            Listener {
                capture: false,
                action: ListenerAction::GuardRequiredFields,
            },
        );
        if added {
            bound += 1;
        }
        let label = page.trace_node_label(form);
        page.trace_guard_line(format!("[guard] attach form={label} bound={added}"));
    }
    bound
}

enum MessageChange {
    Inserted,
    Removed,
    Unchanged,
}

impl Page {
    /// Runs one validation pass over the form at `selector` without
    /// submitting it. DOM effects are the same as for a submission attempt.
    pub fn validate_form(&mut self, selector: &str) -> Result<ValidationReport> {
        let form = self.select_one(selector)?;
        if !self.dom.is_tag(form, "form") {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form".into(),
                actual: self.dom.tag_name(form).unwrap_or("non-element").to_string(),
            });
        }
        Ok(self.validate_required_fields(form))
    }

    pub(crate) fn guard_submit_event(&mut self, event: &mut EventState) {
        // A submit bubbling up from a nested form belongs to that form's guard.
        if event.target != event.current_target {
            return;
        }
        let form = event.current_target;
        let report = self.validate_required_fields(form);
        if !report.is_valid() {
            event.prevent_default();
        }
        let label = self.trace_node_label(form);
        self.trace_guard_line(format!(
            "[guard] submit form={} checked={} invalid={} cancelled={}",
            label,
            report.checked,
            report.invalid,
            event.default_prevented
        ));
    }

    fn validate_required_fields(&mut self, form: NodeId) -> ValidationReport {
        let mut report = ValidationReport::default();
        for field in self.required_fields(form) {
            let value = self.dom.value(field).unwrap_or_default();
            let valid = FieldState { value: &value }.is_valid();
            report.checked += 1;
            if !valid {
                report.invalid += 1;
            }

            let change = if valid {
                self.clear_field_error(field)
            } else {
                self.show_field_error(field)
            };
            match change {
                Ok(MessageChange::Inserted) => report.messages_inserted += 1,
                Ok(MessageChange::Removed) => report.messages_removed += 1,
                Ok(MessageChange::Unchanged) => {}
                Err(err) => {
                    report.messages_skipped += 1;
                    let label = self.trace_node_label(field);
                    self.trace_guard_line(format!("[guard] skip field={label} reason={err}"));
                }
            }
        }
        report
    }

    fn required_fields(&self, form: NodeId) -> Vec<NodeId> {
        self.dom
            .descendant_elements(form)
            .into_iter()
            .filter(|node| {
                self.dom.required(*node)
                    && self
                        .dom
                        .tag_name(*node)
                        .is_some_and(|tag| matches!(tag, "input" | "textarea" | "select"))
            })
            .collect()
    }

    fn existing_error_message(&self, field: NodeId) -> Option<NodeId> {
        self.dom
            .element_sibling(field, true)
            .filter(|sibling| self.dom.class_contains(*sibling, ERROR_MESSAGE_CLASS).unwrap_or(false))
    }

    fn show_field_error(&mut self, field: NodeId) -> Result<MessageChange> {
        self.dom.class_add(field, ERROR_CLASS)?;
        if self.existing_error_message(field).is_some() {
            return Ok(MessageChange::Unchanged);
        }

        let parent = self
            .dom
            .parent(field)
            .ok_or_else(|| Error::Runtime("field has no parent".into()))?;
        if !self.dom.can_have_children(parent) {
            return Err(Error::Runtime("field parent cannot hold a message".into()));
        }

        let message = self.dom.create_detached_element("span");
        self.dom.class_add(message, ERROR_MESSAGE_CLASS)?;
        self.dom.set_text_content(message, REQUIRED_MESSAGE)?;
        self.dom.insert_after(field, message)?;
        Ok(MessageChange::Inserted)
    }

    fn clear_field_error(&mut self, field: NodeId) -> Result<MessageChange> {
        self.dom.class_remove(field, ERROR_CLASS)?;
        let Some(message) = self.existing_error_message(field) else {
            return Ok(MessageChange::Unchanged);
        };
        self.dom.remove_node(message)?;
        Ok(MessageChange::Removed)
    }
}
