use page_guard::{Page, SubmitOutcome, form_guard};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const FORM_GUARD_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/form_guard_property_test.txt";
const DEFAULT_FORM_GUARD_PROPTEST_CASES: u32 = 128;

fn form_guard_proptest_cases() -> u32 {
    std::env::var("PAGE_GUARD_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_FORM_GUARD_PROPTEST_CASES)
}

fn blank_value_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just(' '),
            Just('\t'),
            Just('\n'),
            Just('\r'),
            Just('\u{00A0}'),
            Just('\u{2003}'),
            Just('\u{2028}'),
            Just('\u{FEFF}'),
        ],
        0..=4,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn filled_value_strategy() -> BoxedStrategy<String> {
    (blank_value_strategy(), "[a-zA-Z0-9<>&\"']{1,8}", blank_value_strategy())
        .prop_map(|(before, word, after)| format!("{before}{word}{after}"))
        .boxed()
}

fn field_value_strategy() -> BoxedStrategy<String> {
    prop_oneof![blank_value_strategy(), filled_value_strategy()].boxed()
}

#[derive(Clone, Copy, Debug)]
enum FieldKind {
    Input,
    Textarea,
}

fn field_kind_strategy() -> BoxedStrategy<FieldKind> {
    prop_oneof![Just(FieldKind::Input), Just(FieldKind::Textarea)].boxed()
}

fn form_html(kinds: &[FieldKind]) -> String {
    let mut html = String::from("<form id='f'>");
    for (idx, kind) in kinds.iter().enumerate() {
        match kind {
            FieldKind::Input => html.push_str(&format!("<input id='f{idx}' name='f{idx}' required>")),
            FieldKind::Textarea => {
                html.push_str(&format!("<textarea id='f{idx}' name='f{idx}' required></textarea>"))
            }
        }
    }
    html.push_str("<button id='send'>Send</button></form>");
    html
}

fn is_blank(value: &str) -> bool {
    value
        .chars()
        .all(|ch| (ch.is_whitespace() && ch != '\u{0085}') || ch == '\u{FEFF}')
}

fn fail(err: page_guard::Error) -> proptest::test_runner::TestCaseError {
    proptest::test_runner::TestCaseError::fail(format!("{err:?}"))
}

fn assert_guard_state(page: &Page, values: &[String]) -> TestCaseResult {
    let blanks = values.iter().filter(|value| is_blank(value)).count();
    prop_assert_eq!(page.count(".error-message").map_err(fail)?, blanks);
    for (idx, value) in values.iter().enumerate() {
        let expected = usize::from(is_blank(value));
        let attached = page
            .count(&format!("#f{idx} + .error-message"))
            .map_err(fail)?;
        prop_assert_eq!(attached, expected, "field f{} with value {:?}", idx, value);
        prop_assert_eq!(
            page.has_class(&format!("#f{idx}"), "error").map_err(fail)?,
            expected == 1
        );
    }
    Ok(())
}

fn run_submission_rounds(kinds: &[FieldKind], rounds: &[Vec<String>]) -> TestCaseResult {
    let mut page = Page::from_html(&form_html(kinds)).map_err(fail)?;
    form_guard::attach(&mut page);

    for values in rounds {
        for (idx, value) in values.iter().enumerate() {
            page.type_text(&format!("#f{idx}"), value).map_err(fail)?;
        }
        let any_blank = values.iter().any(|value| is_blank(value));

        // Submitting the same state twice must not change the outcome or the DOM.
        for _ in 0..2 {
            let outcome = page.submit("#f").map_err(fail)?;
            let expected = if any_blank {
                SubmitOutcome::Cancelled
            } else {
                SubmitOutcome::Proceeded
            };
            prop_assert_eq!(outcome, expected);
            assert_guard_state(&page, values)?;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: form_guard_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(FORM_GUARD_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn presence_check_matches_blank_classification(value in field_value_strategy()) {
        prop_assert_eq!(form_guard::is_value_present(&value), !is_blank(&value));
    }

    #[test]
    fn submissions_track_blank_fields_exactly(
        (kinds, rounds) in (1usize..=5).prop_flat_map(|count| (
            vec(field_kind_strategy(), count),
            vec(vec(field_value_strategy(), count), 1..=4),
        ))
    ) {
        run_submission_rounds(&kinds, &rounds)?;
    }
}
