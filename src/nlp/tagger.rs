//! Heuristic part-of-speech tagger.
//!
//! Closed-class words come straight from the lexicon. Open-class words are
//! resolved left to right using the previous tag and a peek at the next word:
//! a known verb after a determiner is a noun ("the design"), a known noun
//! right after a subject with no verb yet is a verb ("students research").
//! Runs of adjacent proper nouns are merged afterwards ("IIT Bombay").

use std::sync::OnceLock;

use regex::Regex;

use super::doc::{Pos, Span};
use super::lexicon::Lexicon;
use super::tokenizer::RawToken;

/// A token with its part-of-speech tag.
#[derive(Debug, Clone)]
pub struct Tagged {
    pub text: String,
    pub span: Span,
    pub pos: Pos,
    /// Possessive determiner-like pronoun ("my", "their").
    pub possessive: bool,
}

const LY_NOUNS: &[&str] = &[
    "family", "supply", "reply", "assembly", "ally", "rally", "italy", "july", "belly", "jelly",
    "bully", "fly", "holly", "anomaly", "monopoly", "butterfly",
];

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?\d[\d.,:/-]*(st|nd|rd|th|s|%|k|m)?$").expect("static regex")
    })
}

fn is_punct(word: &str) -> bool {
    word.chars()
        .all(|c| c.is_ascii_punctuation() || "“”‘’«»…–—•▪●◦·".contains(c))
}

/// Tag one sentence.
pub fn tag_sentence(tokens: &[RawToken], lexicon: &Lexicon) -> Vec<Tagged> {
    let mut tagged: Vec<Tagged> = Vec::with_capacity(tokens.len());
    let mut seen_verb = false;

    for (i, token) in tokens.iter().enumerate() {
        let lower = token.text.to_lowercase();
        let next = tokens.get(i + 1).map(|t| t.text.to_lowercase());
        let prev = tagged.last();

        let (pos, possessive) = tag_word(
            &token.text,
            &lower,
            i == 0,
            prev,
            next.as_deref(),
            seen_verb,
            lexicon,
        );
        if matches!(pos, Pos::Verb | Pos::Aux) {
            seen_verb = true;
        }
        tagged.push(Tagged {
            text: token.text.clone(),
            span: token.span,
            pos,
            possessive,
        });
    }

    tagged
}

/// Whether the next word could be the start of a noun phrase content word.
fn is_content_word(next: Option<&str>, lexicon: &Lexicon) -> bool {
    next.is_some_and(|w| !is_punct(w) && !lexicon.is_function_word(w))
}

fn tag_word(
    text: &str,
    lower: &str,
    sentence_initial: bool,
    prev: Option<&Tagged>,
    next: Option<&str>,
    seen_verb: bool,
    lexicon: &Lexicon,
) -> (Pos, bool) {
    if lexicon.is_coordinator(lower) {
        return (Pos::Cconj, false);
    }
    if is_punct(text) {
        return (Pos::Punct, false);
    }
    if !text.chars().any(char::is_alphanumeric) {
        return (Pos::Sym, false);
    }
    if number_regex().is_match(lower) {
        return (Pos::Num, false);
    }

    let prev_pos = prev.map(|p| p.pos);
    let prev_possessive = prev.is_some_and(|p| p.possessive);

    // Closed classes.
    if lower == "to" {
        let before_verb = next.is_some_and(|w| lexicon.verb_lemma(w).is_some() && !lexicon.is_noun(w));
        return (if before_verb { Pos::Part } else { Pos::Adp }, false);
    }
    if lower == "'s" || lower == "’s" {
        let after_nominal = prev_pos.is_some_and(Pos::is_nominal);
        return (if after_nominal { Pos::Part } else { Pos::Aux }, false);
    }
    if lexicon.is_possessive(lower) && is_content_word(next, lexicon) {
        return (Pos::Pron, true);
    }
    if lexicon.is_determiner(lower) {
        if lower == "that" && !is_content_word(next, lexicon) {
            return (Pos::Pron, false);
        }
        return (Pos::Det, false);
    }
    if lexicon.is_pronoun(lower) || lexicon.is_possessive(lower) {
        return (Pos::Pron, false);
    }
    if lexicon.is_adposition(lower) {
        return (Pos::Adp, false);
    }
    if lexicon.is_subordinator(lower) {
        return (Pos::Sconj, false);
    }
    if lexicon.is_auxiliary(lower) {
        return (Pos::Aux, false);
    }
    if lexicon.is_particle(lower) {
        return (Pos::Part, false);
    }
    if lexicon.is_adverb(lower) {
        return (Pos::Adv, false);
    }

    let capitalized = text.chars().next().is_some_and(char::is_uppercase);
    if capitalized {
        if !sentence_initial {
            return (Pos::Propn, false);
        }
        return (tag_sentence_initial(lower, next, lexicon), false);
    }

    let after_modifier = matches!(prev_pos, Some(Pos::Det | Pos::Adj | Pos::Num)) || prev_possessive;

    if lexicon.is_adjective(lower)
        && (is_content_word(next, lexicon) || matches!(prev_pos, Some(Pos::Aux | Pos::Adv)))
    {
        return (Pos::Adj, false);
    }

    if lexicon.verb_lemma(lower).is_some() {
        return (tag_known_verb(lower, prev, seen_verb, after_modifier, lexicon), false);
    }

    if lexicon.is_adjective(lower) {
        return (Pos::Adj, false);
    }
    if lexicon.is_noun(lower) {
        return (Pos::Noun, false);
    }
    if lower.ends_with("ly") && lower.chars().count() > 4 && !LY_NOUNS.contains(&lower) {
        return (Pos::Adv, false);
    }
    if lexicon.has_adjective_suffix(lower)
        && (is_content_word(next, lexicon) || matches!(prev_pos, Some(Pos::Aux | Pos::Adv)))
    {
        return (Pos::Adj, false);
    }
    if lower.ends_with("ed") && lower.chars().count() > 4 {
        return (if after_modifier { Pos::Adj } else { Pos::Verb }, false);
    }
    if lower.ends_with("ing")
        && lower.chars().count() > 5
        && matches!(prev_pos, Some(Pos::Aux | Pos::Pron | Pos::Part | Pos::Adp))
        && !prev_possessive
    {
        return (Pos::Verb, false);
    }
    (Pos::Noun, false)
}

/// Capitalized first word: a known word keeps its class, anything else is
/// taken as a proper noun.
fn tag_sentence_initial(lower: &str, next: Option<&str>, lexicon: &Lexicon) -> Pos {
    let next_is_verbal = next.is_some_and(|w| {
        lexicon.is_auxiliary(w) || (lexicon.verb_lemma(w).is_some() && !lexicon.is_noun(w))
    });
    let next_opens_object = next.is_some_and(|w| {
        lexicon.is_determiner(w) || lexicon.is_possessive(w) || lexicon.is_pronoun(w)
    });

    if lexicon.is_noun(lower) && !next_opens_object {
        return Pos::Noun;
    }
    if lexicon.verb_lemma(lower).is_some() {
        if next_is_verbal || next == Some(":") {
            return Pos::Noun;
        }
        return Pos::Verb;
    }
    if lexicon.is_noun(lower) {
        return Pos::Noun;
    }
    if lexicon.is_adjective(lower) {
        return Pos::Adj;
    }
    if lower.ends_with("ly") && lower.chars().count() > 4 && !LY_NOUNS.contains(&lower) {
        return Pos::Adv;
    }
    Pos::Propn
}

fn tag_known_verb(
    lower: &str,
    prev: Option<&Tagged>,
    seen_verb: bool,
    after_modifier: bool,
    lexicon: &Lexicon,
) -> Pos {
    let ambiguous = lexicon.is_noun(lower) || lexicon.is_adjective(lower);
    let as_nominal = if lexicon.is_adjective(lower) && !lexicon.is_noun(lower) {
        Pos::Adj
    } else {
        Pos::Noun
    };

    if after_modifier {
        return if lower.ends_with("ed") { Pos::Adj } else { as_nominal };
    }

    match prev.map(|p| p.pos) {
        Some(Pos::Adp) => {
            if lower.ends_with("ing") {
                Pos::Verb
            } else {
                as_nominal
            }
        }
        Some(Pos::Aux | Pos::Part | Pos::Pron | Pos::Adv) => Pos::Verb,
        Some(Pos::Noun | Pos::Propn) => {
            if lower.ends_with("ing") || !seen_verb || !ambiguous {
                Pos::Verb
            } else {
                as_nominal
            }
        }
        _ => {
            if ambiguous {
                as_nominal
            } else {
                Pos::Verb
            }
        }
    }
}

/// Merge runs of proper nouns separated by single spaces into one token.
pub fn merge_proper_runs(source: &str, tagged: Vec<Tagged>) -> Vec<Tagged> {
    let mut merged: Vec<Tagged> = Vec::with_capacity(tagged.len());
    for token in tagged {
        if let Some(last) = merged.last_mut() {
            let gap = &source[last.span.end..token.span.start];
            if last.pos == Pos::Propn && token.pos == Pos::Propn && (gap == " " || gap == "\t") {
                last.span.end = token.span.end;
                last.text = source[last.span.start..last.span.end].to_string();
                continue;
            }
        }
        merged.push(token);
    }
    merged
}
