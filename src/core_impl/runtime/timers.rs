use super::*;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.timers.now_ms
    }

    /// Drops every queued timer and returns how many there were.
    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.timers.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.pending()
    }

    /// Moves the clock forward by `delta_ms` and runs what became due.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(format!(
                "cannot move the clock backwards (delta_ms={delta_ms})"
            )));
        }
        let from = self.timers.now_ms;
        self.timers.now_ms = from.saturating_add(delta_ms);
        let ran = self.drain_timers(Some(self.timers.now_ms))?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
            self.timers.now_ms
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.timers.now_ms;
        if target_ms < from {
            return Err(Error::Runtime(format!(
                "cannot move the clock backwards (target={target_ms}, now_ms={from})"
            )));
        }
        self.timers.now_ms = target_ms;
        let ran = self.drain_timers(Some(target_ms))?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs every queued timer, jumping the clock to each one's due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.timers.now_ms;
        let ran = self.drain_timers(None)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.timers.now_ms
        ));
        Ok(())
    }

    /// Runs the timers already due without moving the clock.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let now_ms = self.timers.now_ms;
        let ran = self.drain_timers(Some(now_ms))?;
        self.trace_timer_line(format!("[timer] run_due now_ms={now_ms} ran={ran}"));
        Ok(ran)
    }

    pub(crate) fn schedule_timer(&mut self, delay_ms: i64, action: TimerAction) -> i64 {
        let label = action.label();
        let timer = self.timers.schedule(delay_ms, action);
        self.trace_timer_line(format!(
            "[timer] schedule id={} due_at={} action={label}",
            timer.id, timer.due_at
        ));
        timer.id
    }

    /// Runs timers in due order until none is due by `due_limit` (`None`
    /// runs everything, advancing the clock as it goes).
    fn drain_timers(&mut self, due_limit: Option<i64>) -> Result<usize> {
        let mut ran = 0usize;
        while let Some(timer) = self.timers.pop_next(due_limit) {
            ran += 1;
            if ran > self.timers.step_limit {
                return Err(Error::Runtime(format!(
                    "timer queue exceeded max task steps: limit={}, now_ms={}, due_limit={}, pending_tasks={}",
                    self.timers.step_limit,
                    self.timers.now_ms,
                    due_limit.map_or_else(|| "none".to_string(), |limit| limit.to_string()),
                    self.timers.len() + 1
                )));
            }
            self.timers.now_ms = self.timers.now_ms.max(timer.pending.due_at);
            self.run_timer(timer)?;
        }
        Ok(ran)
    }

    fn run_timer(&mut self, timer: Timer) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} action={} now_ms={}",
            timer.pending.id,
            timer.pending.due_at,
            timer.action.label(),
            self.timers.now_ms
        ));

        match timer.action {
            // A message removed from the page in the meantime is left alone.
            TimerAction::RevealMessage(node) if self.dom.is_connected(node) => {
                if self.dom.style_get(node, "display")? == "none" {
                    self.dom.style_set(node, "display", "")?;
                }
            }
            TimerAction::DismissMessage(node) if self.dom.is_connected(node) => {
                self.dom.style_set(node, "display", "none")?;
            }
            TimerAction::RevealMessage(_) | TimerAction::DismissMessage(_) => {}
            TimerAction::CommitHash(hash) => self.navigate_to_fragment(&hash),
        }
        Ok(())
    }
}
