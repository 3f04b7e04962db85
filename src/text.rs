//! Plain-text processing: HTML stripping, entity decoding, wrapping.
//!
//! The Stack Exchange API returns question and answer bodies as HTML
//! fragments. Everything here is pure string work; the TUI viewport and
//! the one-shot printer both consume the output.

use textwrap::Options;

// ============================================================================
// HTML → PLAIN TEXT
// ============================================================================

/// Convert an HTML fragment to readable plain text.
///
/// Tags are stripped; block-level closers (`</p>`, `</pre>`, `</li>`,
/// headings, `<br>`) become newlines so paragraphs and code blocks keep
/// their shape. Hyperlinks keep their target: `<a href="U">text</a>`
/// renders as `text [U]`. Entities are decoded last so stray `&lt;` in
/// code does not get re-parsed as markup.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tag_rest = &rest[open + 1..];
        let Some(close) = tag_rest.find('>') else {
            // Unterminated tag: emit the remainder verbatim.
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = &tag_rest[..close];
        match block_break(tag) {
            Break::Newline => out.push('\n'),
            Break::Blank => out.push_str("\n\n"),
            Break::None => {}
        }
        if let Some(href) = link_target(tag) {
            // Emit the anchor text, then the target in brackets.
            let after = &tag_rest[close + 1..];
            if let Some(end) = after.to_ascii_lowercase().find("</a") {
                // The anchor body may itself carry markup (<code> links
                // are everywhere); strip it before appending.
                out.push_str(&strip_tags(&after[..end]));
                out.push_str(&format!(" [{}]", href));
                let after_anchor = &after[end..];
                let skip = after_anchor.find('>').map(|i| i + 1).unwrap_or(0);
                rest = &after_anchor[skip..];
                continue;
            }
        }
        rest = &tag_rest[close + 1..];
    }
    out.push_str(rest);

    collapse_blank_lines(&decode_entities(&out))
}

/// Drop tags, keeping only text content. No line-break handling; used
/// for inline contexts like anchor bodies.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open + 1..].find('>') {
            Some(close) => rest = &rest[open + 1 + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

enum Break {
    None,
    Newline,
    Blank,
}

/// Which line break, if any, a tag contributes to the text flow.
fn block_break(tag: &str) -> Break {
    let name = tag
        .trim_start_matches('/')
        .split([' ', '/', '\t', '\n'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let closing = tag.starts_with('/');
    match name.as_str() {
        "br" => Break::Newline,
        "li" if !closing => Break::Newline,
        "p" | "pre" | "blockquote" | "ul" | "ol" if closing => Break::Blank,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" if closing => Break::Blank,
        _ => Break::None,
    }
}

/// Extract the href from an opening `<a>` tag, if present.
fn link_target(tag: &str) -> Option<&str> {
    let lowered = tag.to_ascii_lowercase();
    if !lowered.starts_with("a ") && lowered != "a" {
        return None;
    }
    let at = lowered.find("href=")?;
    let value = &tag[at + 5..];
    let quote = value.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let value = &value[1..];
    let end = value.find(quote)?;
    Some(&value[..end])
}

/// Decode the HTML entities that appear in Stack Exchange bodies.
///
/// Named entities common in prose and code, plus numeric references.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let entity_rest = &rest[amp..];
        match entity_end(entity_rest) {
            Some((decoded, len)) => {
                out.push_str(&decoded);
                rest = &entity_rest[len..];
            }
            None => {
                out.push('&');
                rest = &entity_rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode a single entity at the start of `s`, returning the replacement
/// and the number of input bytes consumed (including the semicolon).
fn entity_end(s: &str) -> Option<(String, usize)> {
    // Entities are short; give up past 12 chars so `&` in prose stays cheap.
    let semi = s
        .char_indices()
        .take(12)
        .find(|&(_, c)| c == ';')
        .map(|(i, _)| i)?;
    let body = &s[1..semi];
    let decoded = match body {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => " ".to_string(),
        "hellip" => "…".to_string(),
        "mdash" => "—".to_string(),
        "ndash" => "–".to_string(),
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or(body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?.to_string()
        }
    };
    Some((decoded, semi + 1))
}

/// Trim trailing space per line and squeeze runs of 3+ newlines down to 2.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_matches('\n').to_string()
}

// ============================================================================
// EXCERPTS & WRAPPING
// ============================================================================

/// Single-line excerpt: whitespace collapsed, truncated on a char boundary
/// with an ellipsis when the text runs long.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", truncated.trim_end())
}

/// Wrap multi-line text to a display width, preserving paragraph breaks.
///
/// Words are never broken mid-word; lines that already fit pass through
/// unchanged, so code stays recognizable.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let options = Options::new(width).break_words(false);
    let mut out = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        for wrapped in textwrap::wrap(line, &options) {
            out.push(wrapped.into_owned());
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
