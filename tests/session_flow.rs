use chrono::Local;
use termfolio_lib::models::{Action, ConsentFlow, Effect, KeyInput, LogEntry, Style};
use termfolio_lib::services::catalog::{self, AVAILABLE_COMMANDS};
use termfolio_lib::services::render::to_href;
use termfolio_lib::services::Session;
use termfolio_lib::TerminalConfig;

fn booted() -> Session {
    let mut session = Session::new(&TerminalConfig::default(), Local::now());
    session.finish_boot();
    session
}

fn submit(session: &mut Session, text: &str) -> Vec<Effect> {
    session.set_input(text);
    session.submit()
}

/// Output lines printed after the most recent input echo.
fn last_output(session: &Session) -> Vec<String> {
    let log = session.log();
    let start = log
        .iter()
        .rposition(|e| matches!(e, LogEntry::Input { .. }))
        .map_or(0, |i| i + 1);
    log[start..]
        .iter()
        .filter_map(|e| e.output_text().map(str::to_string))
        .collect()
}

#[test]
fn every_table_command_prints_its_lines_in_order() {
    let skip = ["clear", "life"];
    for name in AVAILABLE_COMMANDS.iter().filter(|n| !skip.contains(n)) {
        let mut session = booted();
        submit(&mut session, name);
        let expected: Vec<String> = catalog::lookup(name)
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(last_output(&session), expected, "output of {name}");
    }
}

#[test]
fn unknown_input_is_reported_verbatim() {
    for input in ["foo", "Whoami", "ls -la", "system"] {
        let mut session = booted();
        assert!(submit(&mut session, input).is_empty());
        assert_eq!(
            last_output(&session),
            vec![format!("Command not found: {}", input), catalog::NOT_FOUND_HINT.to_string()]
        );
    }
}

#[test]
fn clear_always_collapses_to_one_empty_line() {
    let mut session = booted();
    for _ in 0..10 {
        submit(&mut session, "whoami");
    }
    submit(&mut session, "clear");
    assert_eq!(session.log().len(), 1);
    assert!(matches!(&session.log()[0], LogEntry::Output { text, .. } if text.is_empty()));

    submit(&mut session, "clear");
    assert_eq!(session.log().len(), 1);
}

#[test]
fn repeated_command_grows_history_once() {
    let mut session = booted();
    let before = session.history().len();
    submit(&mut session, "skills");
    submit(&mut session, "skills");
    assert_eq!(session.history().len(), before + 1);
    assert!(session.history().windows(2).all(|pair| pair[0] != pair[1]));
}

#[test]
fn history_up_stops_at_oldest_and_down_clears() {
    let mut session = booted();
    submit(&mut session, "whoami");
    submit(&mut session, "skills");

    for _ in 0..20 {
        session.key(KeyInput::ArrowUp);
    }
    assert_eq!(session.history_cursor(), Some(0));
    assert_eq!(session.input(), session.history()[0]);

    for _ in 0..20 {
        session.key(KeyInput::ArrowDown);
    }
    assert_eq!(session.history_cursor(), None);
    assert_eq!(session.input(), "");
}

#[test]
fn suggestion_rules() {
    let mut session = booted();
    session.set_input("");
    assert_eq!(session.suggestion(), None);
    session.set_input("xyz");
    assert_eq!(session.suggestion(), None);
    session.set_input("clear");
    assert_eq!(session.suggestion(), None);
    session.set_input("cl");
    assert_eq!(session.suggestion(), Some("clear"));
}

#[test]
fn life_consent_flow_navigates_exactly_once() {
    let mut session = booted();
    submit(&mut session, "life");
    assert_eq!(session.consent(), ConsentFlow::AwaitingConsent { terms_viewed: false });

    assert!(submit(&mut session, "y").is_empty());
    assert_eq!(last_output(&session), vec![catalog::CONSENT_VIEW_TERMS_FIRST.to_string()]);

    // the link inside the prompt line opens the terms
    let view = session.view();
    let trigger = view
        .lines
        .iter()
        .flat_map(|line| line.fragments.iter())
        .find_map(|f| match f {
            termfolio_lib::models::Fragment::Action { action, .. } => Some(action.clone()),
            _ => None,
        })
        .expect("terms trigger rendered");
    assert_eq!(trigger, Action::ShowTerms);
    session.trigger(&trigger);

    // main input is disabled while the overlay is open
    session.set_input("whoami");
    assert_eq!(session.input(), "");
    assert!(session.submit().is_empty());

    session.set_terms_input(catalog::TERMS_QUIT_TOKEN);
    session.submit_terms();
    assert_eq!(
        session.log().last().and_then(LogEntry::output_text),
        Some(catalog::TERMS_CLOSED)
    );

    let navigations: Vec<Effect> = [submit(&mut session, "y"), submit(&mut session, "y")]
        .concat()
        .into_iter()
        .filter(|e| matches!(e, Effect::Navigate { .. }))
        .collect();
    assert_eq!(navigations, vec![Effect::Navigate { path: "/life".into() }]);
}

#[test]
fn status_line_renders_as_label_and_value() {
    let session = booted();
    let view = session.view();
    let status = view
        .lines
        .iter()
        .find(|line| line.plain() == "Status: Online")
        .expect("boot prints a status line");
    assert!(status
        .fragments
        .iter()
        .any(|f| matches!(f, termfolio_lib::models::Fragment::Styled { style: Style::StatusValue, .. })));
}

#[test]
fn education_degrees_cycle_styles_in_order() {
    let mut session = booted();
    submit(&mut session, "education");
    let styles: Vec<Style> = session
        .view()
        .lines
        .iter()
        .flat_map(|line| line.fragments.clone())
        .filter_map(|f| match f {
            termfolio_lib::models::Fragment::Styled { style, .. }
                if matches!(style, Style::DegreePrimary | Style::DegreeSecondary | Style::DegreeTertiary) =>
            {
                Some(style)
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        styles,
        vec![Style::DegreePrimary, Style::DegreeSecondary, Style::DegreeTertiary]
    );
}

#[test]
fn href_examples() {
    assert_eq!(to_href("a@b.com").as_deref(), Some("mailto:a@b.com"));
    assert_eq!(to_href("www.x.com").as_deref(), Some("https://www.x.com"));
    assert_eq!(to_href("not a url"), None);
}
