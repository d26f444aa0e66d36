use super::*;

impl Page {
    /// Dispatches a bubbling, cancelable event of type `kind` at `target`.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, kind: &str) -> Result<EventState> {
        let event = EventState::bubbling(kind, target, self.timers.now_ms);
        self.dispatch_prepared_event(event)
    }

    /// Runs capture listeners from the document down, then the target's own
    /// listeners (capture before bubble), then bubble listeners back up when
    /// the event bubbles.
    pub(crate) fn dispatch_prepared_event(&mut self, mut event: EventState) -> Result<EventState> {
        let target = event.target;
        let mut ancestors = self.dom.ancestors_inclusive(target).skip(1).collect::<Vec<_>>();
        ancestors.reverse();

        for node in &ancestors {
            self.run_phase(*node, Phase::Capture, &mut event)?;
        }
        self.run_phase(target, Phase::Target, &mut event)?;
        if event.bubbles {
            for node in ancestors.iter().rev() {
                self.run_phase(*node, Phase::Bubble, &mut event)?;
            }
        }

        if self.trace.enabled && self.trace.events {
            let target_label = self.trace_node_label(target);
            self.trace_event_line(format!(
                "[event] done {} target={target_label} outcome=completed default_prevented={} ts={}",
                event.kind, event.default_prevented, event.at_ms
            ));
        }
        Ok(event)
    }

    fn run_phase(&mut self, node_id: NodeId, phase: Phase, event: &mut EventState) -> Result<()> {
        event.phase = phase;
        event.current_target = node_id;

        let mut actions = Vec::new();
        if phase != Phase::Bubble {
            actions.extend(self.listeners.actions(node_id, &event.kind, true));
        }
        if phase != Phase::Capture {
            actions.extend(self.listeners.actions(node_id, &event.kind, false));
        }

        for action in actions {
            if self.trace.enabled && self.trace.events {
                let target_label = self.trace_node_label(event.target);
                let current_label = self.trace_node_label(node_id);
                self.trace_event_line(format!(
                    "[event] {} target={target_label} current={current_label} phase={} action={} default_prevented={}",
                    event.kind,
                    phase.label(),
                    action.label(),
                    event.default_prevented
                ));
            }
            self.run_listener_action(&action, event)?;
        }
        Ok(())
    }

    fn run_listener_action(&mut self, action: &ListenerAction, event: &mut EventState) -> Result<()> {
        match action {
            ListenerAction::GuardRequiredFields => {
                self.guard_submit_event(event);
                Ok(())
            }
            ListenerAction::SmoothScroll { duration_ms } => {
                self.smooth_scroll_to_anchor(event, *duration_ms)
            }
            ListenerAction::ToggleClassOnAll {
                selector,
                class_name,
            } => {
                for node in self.dom.select_all(selector)? {
                    self.dom.class_toggle(node, class_name)?;
                }
                Ok(())
            }
            ListenerAction::AddClass { class_name } => {
                self.dom.class_add(event.current_target, class_name)
            }
            ListenerAction::RemoveClass { class_name } => {
                self.dom.class_remove(event.current_target, class_name)
            }
        }
    }
}
