use super::*;

impl Page {
    /// Turns tracing on or off. Off by default; while off nothing is
    /// recorded.
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace.timers = enabled;
    }

    pub fn set_trace_guard(&mut self, enabled: bool) {
        self.trace.guard = enabled;
    }

    /// Whether trace lines are also printed to stderr (the default).
    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.echo_stderr = enabled;
    }

    /// Caps the retained lines; the oldest are dropped first.
    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "the trace log must keep at least one line".into(),
            ));
        }
        self.trace.limit = max_entries;
        self.trace.trim();
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.lines.drain(..).collect()
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace.events {
            self.trace.record(line);
        }
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace.timers {
            self.trace.record(line);
        }
    }

    pub(crate) fn trace_guard_line(&mut self, line: String) {
        if self.trace.guard {
            self.trace.record(line);
        }
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        self.trace.record(line);
    }

    /// `tag#id`, `tag[name=..]`, `tag.class.list` or the bare tag, in that
    /// order of preference.
    pub(crate) fn trace_node_label(&self, node_id: NodeId) -> String {
        if node_id == self.dom.root {
            return "document".into();
        }
        let Some(element) = self.dom.element(node_id) else {
            return format!("node:{}", node_id.0);
        };

        let non_empty = |name: &str| element.attrs.get(name).filter(|value| !value.is_empty());
        let tag = &element.tag_name;
        if let Some(id) = non_empty("id") {
            format!("{tag}#{id}")
        } else if let Some(name) = non_empty("name") {
            format!("{tag}[name={name}]")
        } else {
            element
                .class_names()
                .fold(tag.clone(), |label, class| format!("{label}.{class}"))
        }
    }
}
