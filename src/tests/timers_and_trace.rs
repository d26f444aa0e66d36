use super::*;

const MESSAGES_HTML: &str = r#"
    <div class='message' id='m1'>one</div>
    <div class='message' id='m2'>two</div>
    <form id='f'><input id='title' required></form>
    "#;

fn page_with_messages() -> Result<Page> {
    let mut page = Page::from_html(MESSAGES_HTML)?;
    page.install_blog_scripts()?;
    Ok(page)
}

#[test]
fn pending_timers_are_ordered_by_due_time_then_insertion() -> Result<()> {
    let page = page_with_messages()?;
    let due = page
        .pending_timers()
        .iter()
        .map(|timer| timer.due_at)
        .collect::<Vec<_>>();
    assert_eq!(due, vec![500, 500, 4000, 4000]);
    let orders = page
        .pending_timers()
        .iter()
        .map(|timer| timer.order)
        .collect::<Vec<_>>();
    assert!(orders[0] < orders[1]);
    assert!(orders[2] < orders[3]);
    Ok(())
}

#[test]
fn run_due_timers_only_runs_what_is_due() -> Result<()> {
    let mut page = page_with_messages()?;
    assert_eq!(page.run_due_timers()?, 0);
    page.advance_time_to(500)?;
    assert_eq!(page.pending_timers().len(), 2);
    assert_eq!(page.run_due_timers()?, 0);
    Ok(())
}

#[test]
fn flush_runs_everything_and_moves_the_clock() -> Result<()> {
    let mut page = page_with_messages()?;
    page.flush()?;
    assert_eq!(page.now_ms(), 4000);
    assert!(page.pending_timers().is_empty());
    assert_eq!(page.style("#m1", "display")?, "none");
    Ok(())
}

#[test]
fn clear_all_timers_drops_the_queue() -> Result<()> {
    let mut page = page_with_messages()?;
    assert_eq!(page.clear_all_timers(), 4);
    page.advance_time(10_000)?;
    assert_eq!(page.style("#m1", "display")?, "");
    Ok(())
}

#[test]
fn invalid_clock_moves_are_errors() -> Result<()> {
    let mut page = page_with_messages()?;
    assert!(matches!(page.advance_time(-1), Err(Error::Runtime(_))));
    page.advance_time(10)?;
    assert!(matches!(page.advance_time_to(5), Err(Error::Runtime(_))));
    assert_eq!(page.now_ms(), 10);
    Ok(())
}

#[test]
fn timer_step_limit_stops_runaway_queues() -> Result<()> {
    let mut page = page_with_messages()?;
    assert!(page.set_timer_step_limit(0).is_err());
    page.set_timer_step_limit(3)?;
    match page.flush() {
        Err(Error::Runtime(msg)) => assert!(msg.contains("limit=3")),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn trace_is_off_by_default() -> Result<()> {
    let mut page = page_with_messages()?;
    page.submit("#f")?;
    page.flush()?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_records_guard_event_timer_and_page_lines() -> Result<()> {
    let mut page = Page::from_html(MESSAGES_HTML)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.install_blog_scripts()?;
    page.submit("#f")?;
    page.flush()?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line == "[guard] attach form=form#f bound=true"));
    assert!(
        logs.iter()
            .any(|line| line == "[guard] submit form=form#f checked=1 invalid=1 cancelled=true")
    );
    assert!(logs.iter().any(|line| line.starts_with("[event] submit target=form#f")));
    assert!(logs.iter().any(|line| line.starts_with("[timer] run ")));
    assert!(logs.iter().any(|line| line.starts_with("[page] install_blog_scripts forms=1")));
    assert!(logs.iter().any(|line| line == "[page] submit form=form#f outcome=cancelled"));
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_categories_can_be_muted() -> Result<()> {
    let mut page = Page::from_html(MESSAGES_HTML)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_guard(false);
    page.set_trace_timers(false);
    page.set_trace_events(false);
    page.install_blog_scripts()?;
    page.submit("#f")?;
    page.flush()?;

    let logs = page.take_trace_logs();
    assert!(!logs.is_empty());
    assert!(logs.iter().all(|line| line.starts_with("[page]")));
    Ok(())
}

#[test]
fn trace_log_limit_keeps_the_newest_lines() -> Result<()> {
    let mut page = Page::from_html(MESSAGES_HTML)?;
    assert!(page.set_trace_log_limit(0).is_err());
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_log_limit(2)?;
    page.install_blog_scripts()?;
    page.flush()?;

    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[1].starts_with("[timer] flush"));
    Ok(())
}
