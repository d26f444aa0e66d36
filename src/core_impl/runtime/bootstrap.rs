use super::*;

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_url("about:blank", html)
    }

    /// Parses `html` as the page at `url`. A fragment in `url` becomes the
    /// initial hash and scroll target.
    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        let (url, fragment) = url.split_once('#').unwrap_or((url, ""));
        let location = LocationState {
            url: url.to_string(),
            hash: LocationState::hash_for(fragment),
            scroll_target: (!fragment.is_empty())
                .then(|| dom.by_id(fragment))
                .flatten(),
        };

        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            timers: TimerQueue::default(),
            location,
            submissions: Vec::new(),
            trace: TraceLog::default(),
        })
    }

    /// Attaches required-field validation and the page chrome with default
    /// options, the way the blog's scripts run once on page load.
    pub fn install_blog_scripts(&mut self) -> Result<()> {
        let forms = crate::form_guard::attach(self);
        let chrome = crate::page_chrome::attach(self, &ChromeOptions::default())?;
        self.trace_line(format!(
            "[page] install_blog_scripts forms={} anchors={} menu_toggles={} nav_links={} messages={}",
            forms, chrome.anchors, chrome.menu_toggles, chrome.nav_links, chrome.messages
        ));
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "the timer step limit must be at least 1".into(),
            ));
        }
        self.timers.step_limit = max_steps;
        Ok(())
    }
}
