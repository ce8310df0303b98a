//! Tokenization and sentence segmentation.
//!
//! Words are whitespace-delimited runs. Leading and trailing punctuation is
//! split into separate tokens while word-internal symbols survive, so
//! `C/C++`, `Node.js` and `e-commerce` stay whole. Sentences end at terminal
//! punctuation, blank lines, bullets, and line breaks that start a new
//! capitalized item.

use std::sync::OnceLock;

use regex::Regex;

use super::doc::Span;
use super::lexicon::Lexicon;

/// A token before tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub span: Span,
}

const LEADING_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '“', '‘', '«', '<'];

const TRAILING_PUNCT: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\'', '”', '’', '»', '…', '>',
];

const BULLETS: &[char] = &['•', '▪', '●', '◦', '‣', '∙', '*', '-', '–', '—', '·'];

const TERMINALS: &[&str] = &[".", "!", "?", "…", "...", "?!", "!?"];

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+").expect("static regex"))
}

/// Split `text` into sentences of raw tokens.
pub fn tokenize(text: &str, lexicon: &Lexicon) -> Vec<Vec<RawToken>> {
    let mut sentences = Vec::new();
    let mut current: Vec<RawToken> = Vec::new();
    let mut prev_end = 0usize;

    for m in word_regex().find_iter(text) {
        let gap = &text[prev_end..m.start()];
        let newlines = gap.matches('\n').count();
        let at_line_start = prev_end == 0 || newlines > 0;
        prev_end = m.end();

        if newlines >= 2 {
            flush(&mut current, &mut sentences);
        }

        let chunk = m.as_str();
        if at_line_start && chunk.chars().all(|c| BULLETS.contains(&c)) {
            flush(&mut current, &mut sentences);
            continue;
        }

        if newlines == 1 && starts_new_line_item(chunk, current.last(), lexicon) {
            flush(&mut current, &mut sentences);
        }

        for token in split_chunk(chunk, m.start()) {
            let terminal = TERMINALS.contains(&token.text.as_str());
            current.push(token);
            if terminal {
                flush(&mut current, &mut sentences);
            }
        }
    }

    flush(&mut current, &mut sentences);
    sentences
}

fn flush(current: &mut Vec<RawToken>, sentences: &mut Vec<Vec<RawToken>>) {
    if !current.is_empty() {
        sentences.push(std::mem::take(current));
    }
}

/// A single line break begins a new sentence when the next line opens with a
/// capital and the previous line did not end mid-phrase.
fn starts_new_line_item(chunk: &str, last: Option<&RawToken>, lexicon: &Lexicon) -> bool {
    let Some(last) = last else {
        return false;
    };
    let capitalized = chunk
        .trim_start_matches(LEADING_PUNCT)
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());
    if !capitalized {
        return false;
    }
    let last_lower = last.text.to_lowercase();
    !(last.text == ","
        || last.text == "-"
        || lexicon.is_determiner(&last_lower)
        || lexicon.is_adposition(&last_lower)
        || lexicon.is_coordinator(&last_lower)
        || lexicon.is_possessive(&last_lower))
}

/// Split one whitespace-delimited chunk into punctuation and word tokens.
fn split_chunk(chunk: &str, offset: usize) -> Vec<RawToken> {
    let mut tokens = Vec::new();

    let core_start = chunk
        .char_indices()
        .find(|(_, c)| !LEADING_PUNCT.contains(c))
        .map(|(i, _)| i)
        .unwrap_or(chunk.len());
    let core_end = chunk[core_start..]
        .char_indices()
        .rev()
        .find(|(_, c)| !TRAILING_PUNCT.contains(c))
        .map(|(i, c)| core_start + i + c.len_utf8())
        .unwrap_or(core_start);

    if core_start == core_end {
        // All punctuation: keep runs of identical characters together.
        push_punct_runs(chunk, offset, &mut tokens);
        return tokens;
    }

    for (i, c) in chunk[..core_start].char_indices() {
        tokens.push(raw(c.to_string(), offset + i, offset + i + c.len_utf8()));
    }

    let core = &chunk[core_start..core_end];
    let possessive = ["'s", "’s", "'S", "’S"]
        .iter()
        .find(|suffix| core.ends_with(*suffix) && core.len() > suffix.len() + 1);
    match possessive {
        Some(suffix) => {
            let stem_end = core.len() - suffix.len();
            tokens.push(raw(
                core[..stem_end].to_string(),
                offset + core_start,
                offset + core_start + stem_end,
            ));
            tokens.push(raw(
                suffix.to_string(),
                offset + core_start + stem_end,
                offset + core_end,
            ));
        }
        None => tokens.push(raw(core.to_string(), offset + core_start, offset + core_end)),
    }

    push_punct_runs(&chunk[core_end..], offset + core_end, &mut tokens);
    tokens
}

fn push_punct_runs(s: &str, offset: usize, tokens: &mut Vec<RawToken>) {
    let mut run_start: Option<(usize, char)> = None;
    for (i, c) in s.char_indices() {
        match run_start {
            Some((_, rc)) if rc == c => {}
            Some((start, _)) => {
                tokens.push(raw(s[start..i].to_string(), offset + start, offset + i));
                run_start = Some((i, c));
            }
            None => run_start = Some((i, c)),
        }
    }
    if let Some((start, _)) = run_start {
        tokens.push(raw(s[start..].to_string(), offset + start, offset + s.len()));
    }
}

fn raw(text: String, start: usize, end: usize) -> RawToken {
    RawToken {
        text,
        span: Span::new(start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<Vec<String>> {
        tokenize(text, &Lexicon::default_english())
            .into_iter()
            .map(|s| s.into_iter().map(|t| t.text).collect())
            .collect()
    }

    #[test]
    fn splits_trailing_punctuation_and_sentences() {
        let s = words("Alice codes. Bob tests!");
        assert_eq!(s, vec![vec!["Alice", "codes", "."], vec!["Bob", "tests", "!"]]);
    }

    #[test]
    fn keeps_word_internal_symbols() {
        let s = words("Skills: C/C++, Node.js and e-commerce.");
        assert_eq!(
            s[0],
            vec!["Skills", ":", "C/C++", ",", "Node.js", "and", "e-commerce", "."]
        );
    }

    #[test]
    fn spans_point_into_source() {
        let text = "  (hello) world";
        let sentences = tokenize(text, &Lexicon::default_english());
        for t in &sentences[0] {
            assert_eq!(&text[t.span.start..t.span.end], t.text);
        }
        assert_eq!(sentences[0].len(), 4);
    }

    #[test]
    fn blank_lines_and_bullets_end_sentences() {
        let s = words("First part\n\nSecond part\n• third item");
        assert_eq!(s.len(), 3);
        assert_eq!(s[2], vec!["third", "item"]);
    }

    #[test]
    fn capitalized_line_starts_new_item() {
        let s = words("Skills: Python\nEducation: degree");
        assert_eq!(s.len(), 2);
        // A wrapped line after a preposition continues the sentence.
        let s = words("She studied at\nIIT Bombay");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn splits_possessive_suffix() {
        let s = words("Alice's project");
        assert_eq!(s[0], vec!["Alice", "'s", "project"]);
    }

    #[test]
    fn groups_ellipsis() {
        let s = words("Wait... done");
        assert_eq!(s, vec![vec!["Wait", "..."], vec!["done"]]);
    }
}
