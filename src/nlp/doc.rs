//! Parsed document: tokens with part-of-speech tags, dependency roles, and
//! sentence / noun-chunk groupings.
//!
//! A [`Doc`] is only constructed through [`DocBuilder::build`], which checks
//! that heads, children, sentences, and chunks are mutually consistent. Code
//! consuming a `Doc` can therefore index freely.

use std::fmt;
use std::ops::Range;

use super::error::{NlpError, NlpResult};

/// Byte-level source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Propn,
    Pron,
    Verb,
    Aux,
    Adj,
    Adv,
    Adp,
    Det,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
    Sym,
}

impl Pos {
    /// Common or proper noun.
    pub fn is_nominal(self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Propn => "PROPN",
            Pos::Pron => "PRON",
            Pos::Verb => "VERB",
            Pos::Aux => "AUX",
            Pos::Adj => "ADJ",
            Pos::Adv => "ADV",
            Pos::Adp => "ADP",
            Pos::Det => "DET",
            Pos::Cconj => "CCONJ",
            Pos::Sconj => "SCONJ",
            Pos::Part => "PART",
            Pos::Num => "NUM",
            Pos::Punct => "PUNCT",
            Pos::Sym => "SYM",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dependency relation of a token to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dep {
    Root,
    Nsubj,
    Dobj,
    Pobj,
    Attr,
    Prep,
    Pcomp,
    Det,
    Poss,
    Case,
    Amod,
    Compound,
    Nummod,
    Conj,
    Cc,
    Aux,
    Neg,
    Mark,
    Advmod,
    Acomp,
    Xcomp,
    Advcl,
    Appos,
    Punct,
    Dep,
}

impl Dep {
    pub fn as_str(self) -> &'static str {
        match self {
            Dep::Root => "ROOT",
            Dep::Nsubj => "nsubj",
            Dep::Dobj => "dobj",
            Dep::Pobj => "pobj",
            Dep::Attr => "attr",
            Dep::Prep => "prep",
            Dep::Pcomp => "pcomp",
            Dep::Det => "det",
            Dep::Poss => "poss",
            Dep::Case => "case",
            Dep::Amod => "amod",
            Dep::Compound => "compound",
            Dep::Nummod => "nummod",
            Dep::Conj => "conj",
            Dep::Cc => "cc",
            Dep::Aux => "aux",
            Dep::Neg => "neg",
            Dep::Mark => "mark",
            Dep::Advmod => "advmod",
            Dep::Acomp => "acomp",
            Dep::Xcomp => "xcomp",
            Dep::Advcl => "advcl",
            Dep::Appos => "appos",
            Dep::Punct => "punct",
            Dep::Dep => "dep",
        }
    }
}

impl fmt::Display for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token inside a [`Doc`].
#[derive(Debug, Clone)]
pub struct Token {
    /// Surface text. May span several source words for merged proper nouns.
    pub text: String,
    pub span: Span,
    pub pos: Pos,
    pub dep: Dep,
    /// Index of the syntactic head. A root token is its own head.
    pub head: usize,
    /// Indices of tokens whose head is this one, in document order.
    pub children: Vec<usize>,
}

impl Token {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Input for one token when assembling a [`Doc`].
#[derive(Debug, Clone)]
pub struct TokenSpec {
    pub text: String,
    pub span: Span,
    pub pos: Pos,
    pub dep: Dep,
    pub head: usize,
}

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    noun_chunks: Vec<Range<usize>>,
}

impl Doc {
    /// Source text the document was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sentences in order, each as a slice of tokens.
    pub fn sentences(&self) -> impl Iterator<Item = &[Token]> {
        self.sentences.iter().map(|r| &self.tokens[r.clone()])
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Syntactic children of `token`, in document order.
    pub fn children<'a>(&'a self, token: &'a Token) -> impl Iterator<Item = &'a Token> + 'a {
        token.children.iter().map(|&i| self.token(i))
    }

    /// Noun-chunk texts as they appear in the source.
    pub fn noun_chunks(&self) -> impl Iterator<Item = &str> {
        self.noun_chunks.iter().map(|r| {
            let start = self.tokens[r.start].span.start;
            let end = self.tokens[r.end - 1].span.end;
            &self.text[start..end]
        })
    }

    pub fn noun_chunk_ranges(&self) -> &[Range<usize>] {
        &self.noun_chunks
    }
}

/// Incremental, validating constructor for [`Doc`].
#[derive(Debug, Default)]
pub struct DocBuilder {
    text: String,
    tokens: Vec<TokenSpec>,
    sentences: Vec<Range<usize>>,
    noun_chunks: Vec<Range<usize>>,
}

impl DocBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Append a token and return its index.
    pub fn push(&mut self, spec: TokenSpec) -> usize {
        self.tokens.push(spec);
        self.tokens.len() - 1
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn sentence(&mut self, range: Range<usize>) -> &mut Self {
        self.sentences.push(range);
        self
    }

    pub fn noun_chunk(&mut self, range: Range<usize>) -> &mut Self {
        self.noun_chunks.push(range);
        self
    }

    /// Validate and assemble the document, deriving each token's children
    /// from the head indices.
    pub fn build(self) -> NlpResult<Doc> {
        let len = self.tokens.len();

        for (i, spec) in self.tokens.iter().enumerate() {
            if spec.head >= len {
                return Err(malformed(format!(
                    "token {i} (\"{}\") has head {} but the document has {len} tokens",
                    spec.text, spec.head
                )));
            }
            if spec.span.start > spec.span.end || self.text.get(spec.span.start..spec.span.end).is_none() {
                return Err(malformed(format!(
                    "token {i} (\"{}\") has span {}..{} outside the source text",
                    spec.text, spec.span.start, spec.span.end
                )));
            }
            if (spec.dep == Dep::Root) != (spec.head == i) {
                return Err(malformed(format!(
                    "token {i} (\"{}\") must be its own head exactly when it is ROOT",
                    spec.text
                )));
            }
        }

        let mut expected_start = 0;
        for range in &self.sentences {
            if range.start != expected_start || range.end <= range.start || range.end > len {
                return Err(malformed(format!(
                    "sentence {}..{} does not continue from token {expected_start}",
                    range.start, range.end
                )));
            }
            expected_start = range.end;
        }
        if expected_start != len {
            return Err(malformed(format!(
                "sentences cover {expected_start} of {len} tokens"
            )));
        }

        for range in &self.noun_chunks {
            if range.end <= range.start || range.end > len {
                return Err(malformed(format!(
                    "noun chunk {}..{} is empty or out of bounds",
                    range.start, range.end
                )));
            }
            let start = self.tokens[range.start].span.start;
            let end = self.tokens[range.end - 1].span.end;
            if start > end || self.text.get(start..end).is_none() {
                return Err(malformed(format!(
                    "noun chunk {}..{} does not map onto the source text",
                    range.start, range.end
                )));
            }
        }

        let mut children = vec![Vec::new(); len];
        for (i, spec) in self.tokens.iter().enumerate() {
            if spec.head != i {
                children[spec.head].push(i);
            }
        }

        let tokens = self
            .tokens
            .into_iter()
            .zip(children)
            .map(|(spec, children)| Token {
                text: spec.text,
                span: spec.span,
                pos: spec.pos,
                dep: spec.dep,
                head: spec.head,
                children,
            })
            .collect();

        Ok(Doc {
            text: self.text,
            tokens,
            sentences: self.sentences,
            noun_chunks: self.noun_chunks,
        })
    }
}

fn malformed(message: String) -> NlpError {
    NlpError::MalformedParse { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(text: &str, start: usize, pos: Pos, dep: Dep, head: usize) -> TokenSpec {
        TokenSpec {
            text: text.into(),
            span: Span::new(start, start + text.len()),
            pos,
            dep,
            head,
        }
    }

    #[test]
    fn children_are_derived_in_document_order() {
        let mut b = DocBuilder::new("big red dogs");
        b.push(spec("big", 0, Pos::Adj, Dep::Amod, 2));
        b.push(spec("red", 4, Pos::Adj, Dep::Amod, 2));
        b.push(spec("dogs", 8, Pos::Noun, Dep::Root, 2));
        b.sentence(0..3).noun_chunk(0..3);
        let doc = b.build().unwrap();

        let dogs = doc.token(2);
        let kids: Vec<&str> = doc.children(dogs).map(|t| t.text.as_str()).collect();
        assert_eq!(kids, vec!["big", "red"]);
        assert_eq!(doc.noun_chunks().collect::<Vec<_>>(), vec!["big red dogs"]);
    }

    #[test]
    fn rejects_out_of_bounds_head() {
        let mut b = DocBuilder::new("dogs");
        b.push(spec("dogs", 0, Pos::Noun, Dep::Nsubj, 7));
        b.sentence(0..1);
        let err = b.build().unwrap_err();
        assert!(matches!(err, NlpError::MalformedParse { .. }));
    }

    #[test]
    fn rejects_gapped_sentences() {
        let mut b = DocBuilder::new("a b");
        b.push(spec("a", 0, Pos::Noun, Dep::Root, 0));
        b.push(spec("b", 2, Pos::Noun, Dep::Root, 1));
        b.sentence(1..2);
        assert!(b.build().is_err());
    }

    #[test]
    fn rejects_root_with_foreign_head() {
        let mut b = DocBuilder::new("a b");
        b.push(spec("a", 0, Pos::Noun, Dep::Root, 1));
        b.push(spec("b", 2, Pos::Noun, Dep::Root, 1));
        b.sentence(0..2);
        assert!(b.build().is_err());
    }

    #[test]
    fn empty_document_is_valid() {
        let doc = DocBuilder::new("").build().unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.sentence_count(), 0);
    }
}
