use super::*;
use crate::page_chrome;

const LAYOUT_HTML: &str = r#"
    <header>
      <button class='menu-toggle' id='toggle'>Menu</button>
      <nav>
        <ul id='primary'>
          <li><a id='home' href='/'>Home</a></li>
          <li><a id='to-comments' href='#comments'>Comments</a></li>
        </ul>
        <ul id='secondary'><li><a id='login' href='/login/'>Login</a></li></ul>
      </nav>
    </header>
    <div class='message' id='saved' style='display: none'>Saved</div>
    <div class='message' id='welcome'>Welcome back</div>
    <a id='bare' href='#'>top</a>
    <a id='dangling' href='#nowhere'>nowhere</a>
    <section id='comments'></section>
    "#;

fn with_chrome() -> Result<Page> {
    let mut page = Page::from_html(LAYOUT_HTML)?;
    page_chrome::attach(&mut page, &ChromeOptions::default())?;
    Ok(page)
}

#[test]
fn attach_reports_bindings_and_deduplicates() -> Result<()> {
    let mut page = Page::from_html(LAYOUT_HTML)?;
    let first = page_chrome::attach(&mut page, &ChromeOptions::default())?;
    assert_eq!(
        first,
        ChromeBindings {
            anchors: 3,
            menu_toggles: 1,
            nav_links: 3,
            messages: 2,
        }
    );

    let second = page_chrome::attach(&mut page, &ChromeOptions::default())?;
    assert_eq!(second, ChromeBindings::default());
    assert_eq!(page.pending_timers().len(), 4);

    page.click("#toggle")?;
    page.assert_class("#primary", "active", true)?;
    Ok(())
}

#[test]
fn menu_toggle_flips_active_on_every_nav_list() -> Result<()> {
    let mut page = with_chrome()?;
    page.click("#toggle")?;
    page.assert_class("#primary", "active", true)?;
    page.assert_class("#secondary", "active", true)?;

    page.click("#toggle")?;
    page.assert_class("#primary", "active", false)?;
    page.assert_class("#secondary", "active", false)?;
    Ok(())
}

#[test]
fn hover_adds_and_unhover_removes_the_hover_class() -> Result<()> {
    let mut page = with_chrome()?;
    page.hover("#home")?;
    page.assert_class("#home", "hover-effect", true)?;
    page.assert_class("#login", "hover-effect", false)?;

    page.unhover("#home")?;
    page.assert_class("#home", "hover-effect", false)?;
    Ok(())
}

#[test]
fn smooth_scroll_commits_the_hash_after_the_scroll_duration() -> Result<()> {
    let mut page = with_chrome()?;
    page.click("#to-comments")?;

    assert_eq!(page.location_hash(), "");
    assert_eq!(page.scroll_target().as_deref(), Some("comments"));

    page.advance_time(799)?;
    assert_eq!(page.location_hash(), "");
    page.advance_time(1)?;
    assert_eq!(page.location_hash(), "#comments");
    Ok(())
}

#[test]
fn missing_anchor_target_cancels_navigation_and_bare_hash_keeps_it() -> Result<()> {
    let mut page = with_chrome()?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    let timers_before = page.pending_timers().len();

    page.click("#dangling")?;
    assert_eq!(page.location_hash(), "");
    assert_eq!(page.scroll_target(), None);
    assert_eq!(page.pending_timers().len(), timers_before);
    assert!(
        page.take_trace_logs()
            .iter()
            .any(|line| line == "[page] anchor target missing fragment=\"nowhere\"")
    );

    page.click("#bare")?;
    assert_eq!(page.location_hash(), "");
    assert!(
        page.take_trace_logs()
            .iter()
            .any(|line| line.starts_with("[page] navigate hash"))
    );
    assert_eq!(page.pending_timers().len(), timers_before);
    Ok(())
}

#[test]
fn flash_messages_fade_in_then_hide_at_four_seconds() -> Result<()> {
    let mut page = with_chrome()?;
    assert_eq!(page.style("#saved", "display")?, "none");

    page.advance_time(499)?;
    assert_eq!(page.style("#saved", "display")?, "none");
    page.advance_time(1)?;
    assert_eq!(page.style("#saved", "display")?, "");
    assert_eq!(page.style("#welcome", "display")?, "");

    page.advance_time_to(3999)?;
    assert_eq!(page.style("#saved", "display")?, "");
    assert_eq!(page.style("#welcome", "display")?, "");

    page.advance_time_to(4000)?;
    assert_eq!(page.style("#saved", "display")?, "none");
    assert_eq!(page.style("#welcome", "display")?, "none");
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn removed_messages_are_skipped_by_their_timers() -> Result<()> {
    let mut page = with_chrome()?;
    let welcome = page.select_one("#welcome")?;
    page.dom.remove_node(welcome)?;
    page.flush()?;
    assert_eq!(page.dom.attr(welcome, "style"), None);
    Ok(())
}

#[test]
fn custom_options_change_selectors_and_timings() -> Result<()> {
    let mut page = Page::from_html(LAYOUT_HTML)?;
    let options = ChromeOptions {
        scroll_duration_ms: 100,
        menu_active_class: "open".into(),
        hover_class: "lit".into(),
        message_visible_ms: 0,
        ..ChromeOptions::default()
    };
    page_chrome::attach(&mut page, &options)?;

    page.click("#toggle")?;
    page.assert_class("#primary", "open", true)?;
    page.hover("#login")?;
    page.assert_class("#login", "lit", true)?;

    page.click("#to-comments")?;
    page.advance_time(100)?;
    assert_eq!(page.location_hash(), "#comments");

    page.advance_time_to(1000)?;
    assert_eq!(page.style("#welcome", "display")?, "none");
    Ok(())
}

#[test]
fn negative_durations_are_rejected() -> Result<()> {
    let mut page = Page::from_html(LAYOUT_HTML)?;
    let options = ChromeOptions {
        message_fade_out_ms: -1,
        ..ChromeOptions::default()
    };
    match page_chrome::attach(&mut page, &options) {
        Err(Error::Runtime(msg)) => assert!(msg.contains("message_fade_out_ms")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn install_blog_scripts_wires_guard_and_chrome() -> Result<()> {
    let html = format!(
        "{LAYOUT_HTML}<form id='f'><textarea id='body' required></textarea></form>"
    );
    let mut page = Page::from_html(&html)?;
    page.install_blog_scripts()?;
    page.install_blog_scripts()?;

    assert_eq!(page.submit("#f")?, SubmitOutcome::Cancelled);
    page.assert_count(".error-message", 1)?;

    page.click("#toggle")?;
    page.assert_class("#primary", "active", true)?;
    assert_eq!(page.pending_timers().len(), 4);
    Ok(())
}
