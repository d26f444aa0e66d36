//! Presentational bindings of the blog layout: in-page anchor scrolling,
//! the responsive menu toggle, nav hover styling and flash message fading.

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeOptions {
    pub anchor_selector: String,
    pub scroll_duration_ms: i64,
    pub menu_toggle_selector: String,
    pub menu_selector: String,
    pub menu_active_class: String,
    pub nav_link_selector: String,
    pub hover_class: String,
    pub message_selector: String,
    pub message_fade_in_ms: i64,
    pub message_visible_ms: i64,
    pub message_fade_out_ms: i64,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".into(),
            scroll_duration_ms: 800,
            menu_toggle_selector: ".menu-toggle".into(),
            menu_selector: "header nav ul".into(),
            menu_active_class: "active".into(),
            nav_link_selector: "header nav ul li a".into(),
            hover_class: "hover-effect".into(),
            message_selector: ".message".into(),
            message_fade_in_ms: 500,
            message_visible_ms: 3000,
            message_fade_out_ms: 500,
        }
    }
}

/// How many elements each binding was newly attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeBindings {
    pub anchors: usize,
    pub menu_toggles: usize,
    pub nav_links: usize,
    pub messages: usize,
}

pub fn attach(page: &mut Page, options: &ChromeOptions) -> Result<ChromeBindings> {
    for (name, value) in [
        ("scroll_duration_ms", options.scroll_duration_ms),
        ("message_fade_in_ms", options.message_fade_in_ms),
        ("message_visible_ms", options.message_visible_ms),
        ("message_fade_out_ms", options.message_fade_out_ms),
    ] {
        if value < 0 {
            return Err(Error::Runtime(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
    }

    let mut bindings = ChromeBindings::default();

    for anchor in page.dom.select_all(&options.anchor_selector)? {
        let action = ListenerAction::SmoothScroll {
            duration_ms: options.scroll_duration_ms,
        };
        if bind(page, anchor, "click", action) {
            bindings.anchors += 1;
        }
    }

    for toggle in page.dom.select_all(&options.menu_toggle_selector)? {
        let action = ListenerAction::ToggleClassOnAll {
            selector: options.menu_selector.clone(),
            class_name: options.menu_active_class.clone(),
        };
        if bind(page, toggle, "click", action) {
            bindings.menu_toggles += 1;
        }
    }

    for link in page.dom.select_all(&options.nav_link_selector)? {
        let enter = bind(
            page,
            link,
            "mouseenter",
            ListenerAction::AddClass {
                class_name: options.hover_class.clone(),
            },
        );
        let leave = bind(
            page,
            link,
            "mouseleave",
            ListenerAction::RemoveClass {
                class_name: options.hover_class.clone(),
            },
        );
        if enter || leave {
            bindings.nav_links += 1;
        }
    }

    let dismiss_after = options
        .message_fade_in_ms
        .saturating_add(options.message_visible_ms)
        .saturating_add(options.message_fade_out_ms);
    for message in page.dom.select_all(&options.message_selector)? {
        let reveal = TimerAction::RevealMessage(message);
        let dismiss = TimerAction::DismissMessage(message);
        if page.timers.contains(&reveal) || page.timers.contains(&dismiss) {
            continue;
        }
        page.schedule_timer(options.message_fade_in_ms, reveal);
        page.schedule_timer(dismiss_after, dismiss);
        bindings.messages += 1;
    }

    Ok(bindings)
}

fn bind(page: &mut Page, node: NodeId, event: &str, action: ListenerAction) -> bool {
    page.listeners.add(
        node,
        event,
        Listener {
            capture: false,
            action,
        },
    )
}

impl Page {
    /// Click handler of in-page anchors. A bare `#` keeps the default
    /// navigation. Any other fragment cancels it; when no element carries the
    /// fragment id the click ends there, leaving the hash untouched.
    pub(crate) fn smooth_scroll_to_anchor(
        &mut self,
        event: &mut EventState,
        duration_ms: i64,
    ) -> Result<()> {
        let anchor = event.current_target;
        let href = self.dom.attr(anchor, "href").unwrap_or_default();
        let Some(fragment) = href.strip_prefix('#').filter(|fragment| !fragment.is_empty()) else {
            return Ok(());
        };
        event.prevent_default();
        let Some(target) = self.dom.by_id(fragment) else {
            self.trace_line(format!("[page] anchor target missing fragment={fragment:?}"));
            return Ok(());
        };

        self.location.scroll_target = Some(target);
        self.schedule_timer(duration_ms, TimerAction::CommitHash(format!("#{fragment}")));
        Ok(())
    }
}
