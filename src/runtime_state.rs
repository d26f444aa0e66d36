use super::*;

/// What a registered listener does when its event reaches it.
///
/// Behaviours are plain data so that registering the same behaviour twice on
/// the same node is detectable and deduplicated, the way `addEventListener`
/// ignores a repeated callback reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListenerAction {
    GuardRequiredFields,
    SmoothScroll { duration_ms: i64 },
    ToggleClassOnAll { selector: String, class_name: String },
    AddClass { class_name: String },
    RemoveClass { class_name: String },
}

impl ListenerAction {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::GuardRequiredFields => "guard_required_fields",
            Self::SmoothScroll { .. } => "smooth_scroll",
            Self::ToggleClassOnAll { .. } => "toggle_class_on_all",
            Self::AddClass { .. } => "add_class",
            Self::RemoveClass { .. } => "remove_class",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) capture: bool,
    pub(crate) action: ListenerAction,
}

/// Listeners per `(node, event type)`, in registration order.
#[derive(Debug, Default)]
pub(crate) struct ListenerStore {
    by_target: HashMap<(NodeId, String), Vec<Listener>>,
}

impl ListenerStore {
    /// Returns `false` when an identical listener was already registered.
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) -> bool {
        let registered = self.by_target.entry((node_id, event.to_string())).or_default();
        if registered.contains(&listener) {
            return false;
        }
        registered.push(listener);
        true
    }

    /// The actions to run on `node_id` for one dispatch phase.
    pub(crate) fn actions(&self, node_id: NodeId, event: &str, capture: bool) -> Vec<ListenerAction> {
        self.registered(node_id, event)
            .iter()
            .filter(|listener| listener.capture == capture)
            .map(|listener| listener.action.clone())
            .collect()
    }

    pub(crate) fn count(&self, node_id: NodeId, event: &str) -> usize {
        self.registered(node_id, event).len()
    }

    fn registered(&self, node_id: NodeId, event: &str) -> &[Listener] {
        match self.by_target.get(&(node_id, event.to_string())) {
            Some(listeners) => &listeners[..],
            None => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Capture,
    Target,
    Bubble,
}

impl Phase {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Target => "target",
            Self::Bubble => "bubble",
        }
    }
}

/// One event travelling through the tree. `submit`, `click`, `input` and
/// `change` bubble and can be cancelled; `mouseenter`/`mouseleave` do
/// neither.
#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) phase: Phase,
    pub(crate) at_ms: i64,
    pub(crate) bubbles: bool,
    pub(crate) cancelable: bool,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn bubbling(kind: &str, target: NodeId, at_ms: i64) -> Self {
        Self {
            kind: kind.to_string(),
            target,
            current_target: target,
            phase: Phase::Target,
            at_ms,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
        }
    }

    pub(crate) fn non_bubbling(kind: &str, target: NodeId, at_ms: i64) -> Self {
        Self {
            bubbles: false,
            cancelable: false,
            ..Self::bubbling(kind, target, at_ms)
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented |= self.cancelable;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerAction {
    RevealMessage(NodeId),
    DismissMessage(NodeId),
    CommitHash(String),
}

impl TimerAction {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::RevealMessage(node) => format!("reveal_message node={}", node.0),
            Self::DismissMessage(node) => format!("dismiss_message node={}", node.0),
            Self::CommitHash(hash) => format!("commit_hash {hash}"),
        }
    }
}

/// A timer still waiting to run. Timers run by `due_at`, ties broken by
/// `order` (scheduling order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct Timer {
    pub(crate) pending: PendingTimer,
    pub(crate) action: TimerAction,
}

/// The virtual clock and its queue.
#[derive(Debug)]
pub(crate) struct TimerQueue {
    pub(crate) now_ms: i64,
    pub(crate) step_limit: usize,
    timers: Vec<Timer>,
    scheduled: i64,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self {
            now_ms: 0,
            step_limit: 10_000,
            timers: Vec::new(),
            scheduled: 0,
        }
    }
}

impl TimerQueue {
    pub(crate) fn schedule(&mut self, delay_ms: i64, action: TimerAction) -> PendingTimer {
        self.scheduled += 1;
        let pending = PendingTimer {
            id: self.scheduled,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order: self.scheduled - 1,
        };
        self.timers.push(Timer {
            pending: pending.clone(),
            action,
        });
        pending
    }

    /// Removes the earliest timer, limited to those due by `due_limit`.
    pub(crate) fn pop_next(&mut self, due_limit: Option<i64>) -> Option<Timer> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| due_limit.is_none_or(|limit| timer.pending.due_at <= limit))
            .min_by_key(|(_, timer)| (timer.pending.due_at, timer.pending.order))?;
        Some(self.timers.remove(index))
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut pending = self
            .timers
            .iter()
            .map(|timer| timer.pending.clone())
            .collect::<Vec<_>>();
        pending.sort_by_key(|timer| (timer.due_at, timer.order));
        pending
    }

    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn contains(&self, action: &TimerAction) -> bool {
        self.timers.iter().any(|timer| timer.action == *action)
    }

    pub(crate) fn clear(&mut self) -> usize {
        let cleared = self.timers.len();
        self.timers.clear();
        cleared
    }
}

/// Trace lines kept in a ring of at most `limit` entries. Each category can
/// be muted on its own; `[page]` lines follow `enabled` alone.
#[derive(Debug)]
pub(crate) struct TraceLog {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) guard: bool,
    pub(crate) echo_stderr: bool,
    pub(crate) limit: usize,
    pub(crate) lines: VecDeque<String>,
}

impl Default for TraceLog {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            guard: true,
            echo_stderr: true,
            limit: 10_000,
            lines: VecDeque::new(),
        }
    }
}

impl TraceLog {
    pub(crate) fn record(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        if self.echo_stderr {
            eprintln!("{line}");
        }
        self.lines.push_back(line);
        self.trim();
    }

    pub(crate) fn trim(&mut self) {
        while self.lines.len() > self.limit {
            self.lines.pop_front();
        }
    }
}

/// The simulated `window.location`, reduced to what fragment navigation
/// needs, plus the element last scrolled to.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocationState {
    pub(crate) url: String,
    pub(crate) hash: String,
    pub(crate) scroll_target: Option<NodeId>,
}

impl LocationState {
    /// `#fragment`, or the empty string for an empty fragment.
    pub(crate) fn hash_for(fragment: &str) -> String {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if fragment.is_empty() {
            String::new()
        } else {
            format!("#{fragment}")
        }
    }
}

/// A form submission that was allowed to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: String,
    pub action: String,
    pub method: String,
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceeded,
    Cancelled,
    /// The target is neither a form nor owned by one.
    NoForm,
}

impl SubmitOutcome {
    pub fn proceeded(self) -> bool {
        matches!(self, Self::Proceeded)
    }
}
