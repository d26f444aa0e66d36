use super::*;

/// A parsed page with its behaviours, virtual clock and simulated location.
///
/// The page owns the DOM. Behaviours such as [`crate::form_guard`] and
/// [`crate::page_chrome`] register listeners on it and are driven by the
/// user actions (`type_text`, `select_option`, `set_checked`, `click`,
/// `submit`, `hover`) and by the timer controls.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) timers: TimerQueue,
    pub(crate) location: LocationState,
    pub(crate) submissions: Vec<FormSubmission>,
    pub(crate) trace: TraceLog,
}
