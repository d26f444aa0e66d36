use super::*;

#[test]
fn doctype_comments_and_boolean_attributes_are_handled() -> Result<()> {
    let html = r#"<!DOCTYPE html>
        <!-- header partial -->
        <div id='wrap'><input id='title' required disabled><!-- inline --></div>
        "#;
    let page = Page::from_html(html)?;
    assert_eq!(
        page.dump_dom("#wrap")?,
        "<div id=\"wrap\"><input disabled=\"\" id=\"title\" required=\"\"></div>"
    );
    page.assert_count("input[required]", 1)?;
    page.assert_count("input[disabled]", 1)?;
    Ok(())
}

#[test]
fn attribute_forms_are_parsed() -> Result<()> {
    let html = r#"<a id=plain href="/a?x=1&amp;y=2" data-x='single' title=unquoted>t</a>"#;
    let page = Page::from_html(html)?;
    let link = page.select_one("#plain")?;
    assert_eq!(page.dom.attr(link, "href").as_deref(), Some("/a?x=1&y=2"));
    assert_eq!(page.dom.attr(link, "data-x").as_deref(), Some("single"));
    assert_eq!(page.dom.attr(link, "title").as_deref(), Some("unquoted"));
    Ok(())
}

#[test]
fn character_references_are_decoded_in_text() -> Result<()> {
    let page = Page::from_html(
        "<p id='t'>Fish &amp; Chips &lt;3 &#169; &#x41; &copy &unknown; &</p>",
    )?;
    page.assert_text("#t", "Fish & Chips <3 © A © &unknown; &")?;
    Ok(())
}

#[test]
fn script_and_style_bodies_are_raw_text() -> Result<()> {
    let html = r#"
        <script>
          if (a < b && c > d) { document.write("<p class='fake'>x</p>"); }
        </script>
        <style>p > a { color: red; }</style>
        <p id='real'>real</p>
        "#;
    let page = Page::from_html(html)?;
    page.assert_count("p", 1)?;
    page.assert_count(".fake", 0)?;
    let dump = page.dump_dom("style")?;
    assert_eq!(dump, "<style>p > a { color: red; }</style>");
    Ok(())
}

#[test]
fn title_text_is_decoded_but_not_parsed() -> Result<()> {
    let page = Page::from_html("<title>Tom &amp; <b>Jerry</b></title>")?;
    page.assert_text("title", "Tom & <b>Jerry</b>")?;
    page.assert_count("b", 0)?;
    Ok(())
}

#[test]
fn list_items_options_and_paragraphs_close_implicitly() -> Result<()> {
    let html = r#"
        <ul id='nav'><li>Home<li>Posts<li>About</ul>
        <select id='s'><option value='a'>A<option value='b' selected>B</select>
        <div id='d'><p>one<p>two<div>three</div></div>
        "#;
    let page = Page::from_html(html)?;
    page.assert_count("#nav > li", 3)?;
    page.assert_count("#s > option", 2)?;
    page.assert_count("#d > p", 2)?;
    page.assert_count("#d > div", 1)?;
    page.assert_value("#s", "b")?;
    Ok(())
}

#[test]
fn self_closing_and_void_tags_do_not_nest() -> Result<()> {
    let page = Page::from_html("<div id='a'><br><img src='x'/><span id='b'/></div><p id='c'></p>")?;
    page.assert_count("#a > br, #a > img, #a > span", 3)?;
    page.assert_count("#a p", 0)?;
    Ok(())
}

#[test]
fn textarea_value_drops_the_leading_newline() -> Result<()> {
    let page = Page::from_html("<textarea id='t'>\nline one\n&lt;b&gt;</textarea>")?;
    page.assert_value("#t", "line one\n<b>")?;
    Ok(())
}

#[test]
fn select_without_selection_uses_first_option() -> Result<()> {
    let page = Page::from_html(
        "<select id='s'><option>  First  </option><option value='2'>Second</option></select>",
    )?;
    page.assert_value("#s", "First")?;
    Ok(())
}

#[test]
fn stray_end_tags_and_lone_angle_brackets_are_tolerated() -> Result<()> {
    let page = Page::from_html("<div id='a'>1 < 2</span></div><p id='b'>after</p>")?;
    page.assert_text("#a", "1 < 2")?;
    page.assert_text("#b", "after")?;
    Ok(())
}

#[test]
fn malformed_markup_is_reported() {
    for html in [
        "<div><!-- never closed",
        "<div id='a'",
        "<input value=\"open>",
        "<script>let a = 1;",
    ] {
        match Page::from_html(html) {
            Err(Error::HtmlParse(_)) => {}
            other => panic!("expected parse error for {html:?}, got {other:?}"),
        }
    }
}

#[test]
fn nested_form_start_tags_are_dropped() -> Result<()> {
    let page = Page::from_html(
        "<form id=outer><input id=a required><form id=inner><input id=b value=x required></form></form><p id=after></p>",
    )?;
    page.assert_count("form", 1)?;
    page.assert_count("#inner", 0)?;
    page.assert_count("#outer > #a + #b", 1)?;
    page.assert_count("#outer #after", 0)?;
    page.assert_count("#after", 1)?;
    Ok(())
}
