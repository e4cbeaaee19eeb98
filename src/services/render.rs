/// Line renderer
/// Maps one output line to display fragments through an ordered rule list.
/// First matching rule wins.

use crate::models::{Action, Fragment, LogEntry, RenderedLine, Style};
use crate::services::catalog::{
    CURRENT_PERIOD, LIFE_PROMPT_LINE, POSITION_PREFIX, SECTION_MARKER, TERMS_MARKER,
};
use regex::Regex;
use std::sync::OnceLock;

/// Input to one rule.
#[derive(Debug, Clone, Copy)]
pub struct LineInput<'a> {
    pub text: &'a str,
    pub muted: bool,
    /// 1-based position of this line among the `"degree"` lines of the
    /// current render pass, 0 when the line is not a degree line.
    pub degree_ordinal: usize,
}

type RuleFn = fn(&LineInput) -> Option<Vec<Fragment>>;

pub struct Rule {
    pub name: &'static str,
    pub apply: RuleFn,
}

/// Evaluated top to bottom. `general` always matches.
pub static RULES: &[Rule] = &[
    Rule { name: "life_prompt", apply: life_prompt },
    Rule { name: "status", apply: status },
    Rule { name: "project_description", apply: project_description },
    Rule { name: "nda_details", apply: nda_details },
    Rule { name: "quoted_value", apply: quoted_value },
    Rule { name: "general", apply: general },
];

macro_rules! regex {
    ($re:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($re).expect("static regex"))
    }};
}

/// Resolve a value to a link target.
///
/// Bare addresses become `mailto:`, `http(s)://` is kept, `www.` gets an
/// `https://` scheme. Anything else is not a link.
pub fn to_href(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('@') && !trimmed.contains("://") && !trimmed.starts_with("www.") {
        return Some(format!("mailto:{}", trimmed));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    if trimmed.starts_with("www.") {
        return Some(format!("https://{}", trimmed));
    }
    None
}

/// Render one line. Always yields at least one fragment.
pub fn render_line(input: &LineInput) -> Vec<Fragment> {
    for rule in RULES {
        if let Some(fragments) = (rule.apply)(input) {
            return fragments;
        }
    }
    vec![Fragment::text(input.text)]
}

/// Which rule would handle a line. Handy for diagnostics.
pub fn matching_rule(input: &LineInput) -> &'static str {
    RULES
        .iter()
        .find(|rule| (rule.apply)(input).is_some())
        .map(|rule| rule.name)
        .unwrap_or("general")
}

/// Prompt glyph: `user@host:~$ `
pub fn render_prompt(user: &str, host: &str) -> Vec<Fragment> {
    vec![
        Fragment::styled(Style::PromptUser, user),
        Fragment::styled(Style::PromptAt, "@"),
        Fragment::styled(Style::PromptHost, host),
        Fragment::styled(Style::PromptColon, ":"),
        Fragment::styled(Style::PromptPath, "~"),
        Fragment::styled(Style::PromptSymbol, "$"),
        Fragment::text(" "),
    ]
}

/// Render a whole log in one pass. Degree ordinals are counted here,
/// from the start of `entries`, so every pass styles the same way.
pub fn render_log(entries: &[LogEntry], prompt: &[Fragment]) -> Vec<RenderedLine> {
    let mut degrees = 0;
    entries
        .iter()
        .map(|entry| match entry {
            LogEntry::Input { id, command } => {
                let mut fragments = prompt.to_vec();
                fragments.push(Fragment::text(command.as_str()));
                RenderedLine {
                    id: *id,
                    muted: false,
                    fragments,
                }
            }
            LogEntry::Output { id, text, muted } => {
                let degree_ordinal = if !*muted && is_degree_line(text) {
                    degrees += 1;
                    degrees
                } else {
                    0
                };
                let input = LineInput {
                    text,
                    muted: *muted,
                    degree_ordinal,
                };
                RenderedLine {
                    id: *id,
                    muted: *muted,
                    fragments: render_line(&input),
                }
            }
        })
        .collect()
}

fn is_degree_line(text: &str) -> bool {
    matches!(parse_quoted_value(text), Some(q) if q.key == "degree")
}

fn degree_style(ordinal: usize) -> Style {
    match ordinal {
        0 | 1 => Style::DegreePrimary,
        2 => Style::DegreeSecondary,
        _ => Style::DegreeTertiary,
    }
}

fn life_prompt(input: &LineInput) -> Option<Vec<Fragment>> {
    if input.text != LIFE_PROMPT_LINE {
        return None;
    }
    let Some(idx) = input.text.find(TERMS_MARKER) else {
        return Some(vec![Fragment::text(input.text)]);
    };
    let before = &input.text[..idx];
    let after = &input.text[idx + TERMS_MARKER.len()..];
    Some(vec![
        Fragment::text(before),
        Fragment::action(Action::ShowTerms, TERMS_MARKER),
        Fragment::text(after),
    ])
}

fn status(input: &LineInput) -> Option<Vec<Fragment>> {
    if input.muted {
        return None;
    }
    let rest = input.text.strip_prefix("Status:")?;
    Some(vec![
        Fragment::styled(Style::StatusLabel, "Status: "),
        Fragment::styled(Style::StatusValue, rest.trim()),
    ])
}

fn project_description(input: &LineInput) -> Option<Vec<Fragment>> {
    if input.muted {
        return None;
    }
    let caps = regex!(r"(?i)^\s*-\s*(.+?)\s+—\s+Show project description\s*$").captures(input.text)?;
    let title = caps.get(1)?.as_str().trim().to_string();
    Some(vec![
        Fragment::text(format!("  - {} — ", title)),
        Fragment::action(Action::ShowProject { title }, "Show project description"),
    ])
}

fn nda_details(input: &LineInput) -> Option<Vec<Fragment>> {
    if input.muted || !regex!(r"(?i)^Private \(NDA\):\s*Details\s*$").is_match(input.text) {
        return None;
    }
    Some(vec![
        Fragment::text("Private (NDA): "),
        Fragment::action(Action::ShowNdaDetails, "Details"),
    ])
}

struct QuotedValue<'a> {
    key: &'a str,
    prefix: &'a str,
    value: &'a str,
    suffix: &'a str,
}

fn parse_quoted_value(text: &str) -> Option<QuotedValue<'_>> {
    let caps = regex!(r#"^(\s*"(institution|degree)"\s*:\s*")([^"]*)(".*)$"#).captures(text)?;
    Some(QuotedValue {
        prefix: caps.get(1)?.as_str(),
        key: caps.get(2)?.as_str(),
        value: caps.get(3)?.as_str(),
        suffix: caps.get(4)?.as_str(),
    })
}

fn quoted_value(input: &LineInput) -> Option<Vec<Fragment>> {
    if input.muted {
        return None;
    }
    let parsed = parse_quoted_value(input.text)?;
    let style = if parsed.key == "institution" {
        Style::InstitutionValue
    } else {
        degree_style(input.degree_ordinal)
    };
    Some(vec![
        Fragment::text(parsed.prefix),
        Fragment::styled(style, parsed.value),
        Fragment::text(parsed.suffix),
    ])
}

fn general(input: &LineInput) -> Option<Vec<Fragment>> {
    let text = input.text;

    if text.trim_start().starts_with(SECTION_MARKER) {
        return Some(vec![Fragment::styled(Style::SectionHeader, text)]);
    }

    if text.starts_with(POSITION_PREFIX) {
        return Some(vec![Fragment::styled(Style::Position, text)]);
    }

    if let Some(caps) = regex!(r"^(\|\s*period:\s*)(.+)$").captures(text) {
        let value = caps[2].trim();
        let style = if value == CURRENT_PERIOD {
            Style::PeriodCurrent
        } else {
            Style::Period
        };
        return Some(vec![
            Fragment::text(&caps[1]),
            Fragment::styled(style, value),
        ]);
    }

    if let Some(caps) = regex!(r"(?i)^(\s*(?:\|\s*)?credential:\s*)(.+)$").captures(text) {
        if let Some(href) = to_href(&caps[2]).filter(|h| !h.starts_with("mailto:")) {
            return Some(vec![
                Fragment::text(&caps[1]),
                Fragment::styled(Style::LinkSymbol, "🔗"),
                Fragment::link(href, "Show credential"),
            ]);
        }
    }

    // "  - GitHub: https://..." or "  - Email: foo@bar.com"
    if let Some(caps) = regex!(r"^(\s*-\s*[^:]+:\s*)(.+)$").captures(text) {
        let value = caps[2].trim();
        if let Some(href) = to_href(value) {
            return Some(vec![Fragment::text(&caps[1]), Fragment::link(href, value)]);
        }
    }

    if let Some(href) = to_href(text) {
        return Some(vec![Fragment::link(href, text)]);
    }

    Some(vec![Fragment::text(text)])
}
