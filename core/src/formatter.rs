//! Turns a plain-text bot reply into display blocks.
//!
//! Each non-blank line is classified on its own; there is no state carried
//! between lines. Replies without any markers are kept as a single
//! paragraph so ordinary answers render exactly as the backend wrote them.

use crate::blocks::{Availability, DisplayBlock};
use regex::Regex;
use std::sync::OnceLock;

const BULLET: char = '•';
const HEADER_MARKER: &str = "===";
const FIELD_SEPARATOR: char = '|';
const DESCRIPTION_SEPARATOR: &str = " - ";

static PRICE_REGEX: OnceLock<Regex> = OnceLock::new();
static COUNT_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn price_regex() -> &'static Regex {
    PRICE_REGEX.get_or_init(|| Regex::new(r"\$\d+(?:\.\d+)?").expect("price pattern"))
}

#[allow(clippy::expect_used)]
fn count_regex() -> &'static Regex {
    COUNT_REGEX.get_or_init(|| Regex::new(r"\((\d+)\s*products?\)").expect("count pattern"))
}

/// First `$amount` token in `text`, if any.
pub fn price_token(text: &str) -> Option<&str> {
    price_regex().find(text).map(|m| m.as_str())
}

/// Whether the reply carries anything the line classifier reacts to.
pub fn has_markers(text: &str) -> bool {
    text.contains('$') || text.contains("Stock") || text.contains(HEADER_MARKER) || text.contains(BULLET)
}

/// Format a completed reply. Never fails; blank input yields no blocks.
pub fn format_reply(text: &str) -> Vec<DisplayBlock> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if !has_markers(text) {
        return vec![DisplayBlock::plain(text)];
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

/// Classify one trimmed, non-empty line.
pub fn classify_line(line: &str) -> DisplayBlock {
    if let Some(title) = header_title(line) {
        return DisplayBlock::header(title);
    }
    if let Some(rest) = line.strip_prefix(BULLET) {
        return classify_bullet(rest.trim());
    }
    DisplayBlock::plain(line)
}

// Any line carrying `===` is a header; every `=` is dropped from the title.
fn header_title(line: &str) -> Option<String> {
    line.contains(HEADER_MARKER)
        .then(|| line.replace('=', "").trim().to_string())
}

fn classify_bullet(content: &str) -> DisplayBlock {
    if content.contains('$') && content.contains(FIELD_SEPARATOR) {
        product_card(content)
    } else if content.contains('(')
        && (content.contains("products)") || content.contains("product)"))
    {
        catalog_entry(content)
    } else if content.contains('$') && content.contains(DESCRIPTION_SEPARATOR) {
        recommendation(content)
    } else {
        DisplayBlock::bullet(content)
    }
}

// name | price | availability | category | brand
fn product_card(content: &str) -> DisplayBlock {
    let parts: Vec<&str> = content.split(FIELD_SEPARATOR).map(str::trim).collect();
    let field = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();

    DisplayBlock::ProductCard {
        name: field(0),
        price: field(1),
        availability: Availability::from_label(parts.get(2).copied().unwrap_or_default()),
        category: field(3),
        brand: field(4),
    }
}

// Electronics (12 products) - Gadgets and devices
fn catalog_entry(content: &str) -> DisplayBlock {
    let name = content.split('(').next().unwrap_or_default().trim().to_string();
    let count = count_regex()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| "0".to_string(), |m| m.as_str().to_string());
    let description = content
        .split_once(DESCRIPTION_SEPARATOR)
        .map(|(_, rest)| rest.split('(').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default();

    DisplayBlock::CategoryOrBrandEntry { name, count, description }
}

// Smart Watch ($89.99) - Tracks fitness
fn recommendation(content: &str) -> DisplayBlock {
    let (head, description) = content
        .split_once(DESCRIPTION_SEPARATOR)
        .unwrap_or((content, ""));
    let price = price_token(head).unwrap_or_default().to_string();
    let name: String = price_regex()
        .replace(head, "")
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .collect();

    DisplayBlock::Recommendation {
        name: name.trim().to_string(),
        price,
        description: description.trim().to_string(),
    }
}
