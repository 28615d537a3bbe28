//! Response parser — the one place that turns free-text model output into typed fields.
//!
//! Model output is not guaranteed to follow the requested format. Nothing here fails:
//! missing sections become `PARSE_FAILURE_PLACEHOLDER`, missing headlines an empty list.
//! Tests are pinned to real-shaped provider outputs; when a prompt changes its output
//! format, update the fixtures here.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const SHORT_AD_MARKER: &str = "【短文広告】";
pub const LONG_AD_MARKER: &str = "【長文広告】";

/// Substituted for any ad-copy section the model did not produce.
pub const PARSE_FAILURE_PLACEHOLDER: &str = "生成に失敗しました";

/// Short and long ad-copy variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    pub short: String,
    pub long: String,
}

fn short_section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"【短文広告】([\s\S]*?)(?:【長文広告】|$)").expect("static regex is valid")
    })
}

fn long_section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"【長文広告】([\s\S]*?)$").expect("static regex is valid"))
}

fn list_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.").expect("static regex is valid"))
}

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"「([^」]+)」").expect("static regex is valid"))
}

fn blank_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n[ \t\r]*\n").expect("static regex is valid"))
}

/// Splits an ad-copy response on the `【短文広告】` / `【長文広告】` markers.
///
/// short = text after the short marker up to the long marker (or end).
/// long  = text after the first long marker up to the end.
pub fn parse_ad_copy(response: &str) -> AdCopy {
    let short = short_section_re()
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| clean_section(m.as_str()));
    let long = long_section_re()
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| clean_section(m.as_str()));

    AdCopy {
        short: non_empty_or_placeholder(short),
        long: non_empty_or_placeholder(long),
    }
}

/// Trims whitespace and the markdown emphasis models like to wrap headings in.
fn clean_section(section: &str) -> String {
    section
        .trim()
        .trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
        .to_string()
}

fn non_empty_or_placeholder(section: Option<String>) -> String {
    match section {
        Some(s) if !s.is_empty() => s,
        _ => PARSE_FAILURE_PLACEHOLDER.to_string(),
    }
}

/// Extracts headline candidates from a numbered list of 「quoted」 lines.
///
/// Splits on `N.` markers, keeps pieces containing both 「 and 」, and takes the
/// first quoted span of each.
pub fn parse_headlines(response: &str) -> Vec<String> {
    list_number_re()
        .split(response)
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && piece.contains('「') && piece.contains('」'))
        .filter_map(|piece| {
            quoted_re()
                .captures(piece)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .filter(|headline| !headline.is_empty())
        .collect()
}

/// Splits generated prose into paragraphs on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    blank_line_re()
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
