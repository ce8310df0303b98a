//! Shallow rule-based dependency parser.
//!
//! Works one sentence at a time over tagged tokens:
//! 1. **Noun phrases**: maximal det/poss/num/adj/noun runs ending in a nominal,
//!    or a lone pronoun. Inner tokens attach to the phrase head.
//! 2. **Root**: the first main verb, else the first auxiliary (copula), else
//!    the first noun-phrase head.
//! 3. **Arcs**: a left-to-right pass that tracks the governing verb, a
//!    pending preposition, and a pending coordinator to label subjects,
//!    objects, prepositional objects and conjuncts.
//!
//! Noun chunks are the noun phrases whose head fills a nominal argument role.

use super::doc::{Dep, Pos};
use super::tagger::Tagged;

/// A dependency arc for one token, with a sentence-local head index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub dep: Dep,
    pub head: usize,
}

/// A noun phrase as a sentence-local inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounPhrase {
    pub start: usize,
    pub head: usize,
}

/// Sentence parse result.
#[derive(Debug, Clone)]
pub struct SentenceParse {
    pub arcs: Vec<Arc>,
    pub noun_phrases: Vec<NounPhrase>,
}

impl SentenceParse {
    /// Noun phrases whose head role makes them noun chunks.
    pub fn noun_chunks<'a>(&'a self, tags: &'a [Tagged]) -> impl Iterator<Item = NounPhrase> + 'a {
        self.noun_phrases.iter().copied().filter(move |np| {
            let pos = tags[np.head].pos;
            (pos.is_nominal() || pos == Pos::Pron)
                && matches!(
                    self.arcs[np.head].dep,
                    Dep::Nsubj
                        | Dep::Dobj
                        | Dep::Pobj
                        | Dep::Conj
                        | Dep::Appos
                        | Dep::Attr
                        | Dep::Root
                )
        })
    }
}

fn is_possessive_marker(t: &Tagged) -> bool {
    t.pos == Pos::Part && (t.text == "'s" || t.text == "’s" || t.text == "'S" || t.text == "’S")
}

/// Find noun phrases and return them with a token → phrase index map.
fn chunk_noun_phrases(tags: &[Tagged]) -> (Vec<NounPhrase>, Vec<Option<usize>>) {
    let n = tags.len();
    let mut phrases = Vec::new();
    let mut member_of = vec![None; n];
    let mut i = 0;

    while i < n {
        let t = &tags[i];
        let opens = matches!(t.pos, Pos::Det | Pos::Num | Pos::Adj | Pos::Noun | Pos::Propn)
            || (t.pos == Pos::Pron && t.possessive);

        if opens {
            let mut j = i;
            let mut last_nominal = None;
            while j < n {
                let tj = &tags[j];
                let inside = if j == i {
                    true
                } else {
                    matches!(tj.pos, Pos::Num | Pos::Adj | Pos::Noun | Pos::Propn)
                        || (is_possessive_marker(tj) && tags[j - 1].pos.is_nominal())
                };
                if !inside {
                    break;
                }
                if tj.pos.is_nominal() {
                    last_nominal = Some(j);
                }
                j += 1;
            }
            match last_nominal {
                Some(head) => {
                    let idx = phrases.len();
                    phrases.push(NounPhrase { start: i, head });
                    for slot in &mut member_of[i..=head] {
                        *slot = Some(idx);
                    }
                    i = head + 1;
                }
                None => i += 1,
            }
        } else if t.pos == Pos::Pron {
            member_of[i] = Some(phrases.len());
            phrases.push(NounPhrase { start: i, head: i });
            i += 1;
        } else {
            i += 1;
        }
    }

    (phrases, member_of)
}

/// Parse one tagged sentence.
pub fn parse_sentence(tags: &[Tagged]) -> SentenceParse {
    let n = tags.len();
    if n == 0 {
        return SentenceParse {
            arcs: Vec::new(),
            noun_phrases: Vec::new(),
        };
    }

    let (phrases, member_of) = chunk_noun_phrases(tags);
    let is_np_head = |i: usize| member_of[i].is_some_and(|p| phrases[p].head == i);

    let root = (0..n)
        .find(|&i| tags[i].pos == Pos::Verb)
        .or_else(|| (0..n).find(|&i| tags[i].pos == Pos::Aux))
        .or_else(|| phrases.first().map(|p| p.head))
        .unwrap_or(0);
    let copula = tags[root].pos == Pos::Aux;
    let nominal_root = is_np_head(root);

    let mut arcs: Vec<Option<Arc>> = vec![None; n];
    let set = |arcs: &mut Vec<Option<Arc>>, i: usize, dep: Dep, head: usize| {
        arcs[i] = Some(Arc { dep, head });
    };

    // Inner noun-phrase structure.
    for np in &phrases {
        for k in np.start..np.head {
            let dep = match tags[k].pos {
                Pos::Det => Dep::Det,
                Pos::Pron => Dep::Poss,
                Pos::Num => Dep::Nummod,
                Pos::Adj => Dep::Amod,
                Pos::Part => Dep::Case,
                _ if k + 1 < n && is_possessive_marker(&tags[k + 1]) => Dep::Poss,
                _ => Dep::Compound,
            };
            let head = if dep == Dep::Case { k - 1 } else { np.head };
            set(&mut arcs, k, dep, head);
        }
    }

    let next_verb_after = |i: usize| ((i + 1)..n).find(|&j| tags[j].pos == Pos::Verb);
    // A noun phrase directly followed by a finite verb opens a new clause.
    let finite_verb_follows = |h: usize| {
        let mut j = h + 1;
        while j < n && matches!(tags[j].pos, Pos::Adv | Pos::Aux) {
            j += 1;
        }
        j < n && tags[j].pos == Pos::Verb && !tags[j].text.to_lowercase().ends_with("ing")
    };

    let mut gov: Option<usize> = None;
    let mut pending_prep: Option<usize> = None;
    let mut pending_cc: Option<usize> = None;
    let mut pending_comma = false;
    let mut last_np: Option<usize> = None;
    let mut subject: Option<usize> = None;
    let mut has_object = vec![false; n];
    let mut clause_subject_of: Vec<Option<usize>> = vec![None; n];
    let mut clause_cc: Option<usize> = None;

    for i in 0..n {
        if i == root {
            set(&mut arcs, i, Dep::Root, i);
            if !nominal_root {
                gov = Some(i);
            } else {
                last_np = Some(i);
            }
            pending_cc = None;
            pending_comma = false;
            continue;
        }

        if member_of[i].is_some() && !is_np_head(i) {
            continue;
        }

        if is_np_head(i) {
            let h = i;
            if let Some(p) = pending_prep.take() {
                set(&mut arcs, h, Dep::Pobj, p);
            } else if (pending_cc.is_some() || pending_comma) && last_np.is_some() {
                if h > root && finite_verb_follows(h) {
                    if let Some(v) = next_verb_after(h) {
                        set(&mut arcs, h, Dep::Nsubj, v);
                        clause_subject_of[v] = Some(h);
                        clause_cc = pending_cc;
                    }
                } else {
                    let anchor = conj_anchor(&arcs, last_np.unwrap_or(root));
                    set(&mut arcs, h, Dep::Conj, anchor);
                    if let Some(c) = pending_cc {
                        set(&mut arcs, c, Dep::Cc, anchor);
                    }
                }
            } else if h < root && !nominal_root {
                if let Some(prev) = subject.replace(h) {
                    set(&mut arcs, prev, Dep::Dep, root);
                }
                set(&mut arcs, h, Dep::Nsubj, root);
            } else if let Some(g) = gov {
                if copula && g == root {
                    set(&mut arcs, h, Dep::Attr, root);
                } else if !has_object[g] {
                    set(&mut arcs, h, Dep::Dobj, g);
                    has_object[g] = true;
                } else {
                    set(&mut arcs, h, Dep::Dep, g);
                }
            } else if nominal_root {
                set(&mut arcs, h, Dep::Appos, root);
            } else {
                set(&mut arcs, h, Dep::Dep, root);
            }
            last_np = Some(h);
            pending_cc = None;
            pending_comma = false;
            continue;
        }

        let t = &tags[i];
        let lower = t.text.to_lowercase();
        match t.pos {
            Pos::Adp => {
                let head = if lower == "of" && last_np.is_some() && last_np == i.checked_sub(1) {
                    i - 1
                } else {
                    gov.or(last_np).unwrap_or(root)
                };
                set(&mut arcs, i, Dep::Prep, head);
                pending_prep = Some(i);
                pending_cc = None;
            }
            Pos::Cconj => {
                let head = last_np
                    .map(|l| conj_anchor(&arcs, l))
                    .or(gov)
                    .unwrap_or(root);
                set(&mut arcs, i, Dep::Cc, head);
                pending_cc = Some(i);
            }
            Pos::Punct => {
                set(&mut arcs, i, Dep::Punct, root);
                if t.text == "," {
                    pending_comma = true;
                }
            }
            Pos::Verb => {
                let governor = gov.unwrap_or(root);
                if let Some(p) = pending_prep.take() {
                    set(&mut arcs, i, Dep::Pcomp, p);
                } else if clause_subject_of[i].is_some() {
                    set(&mut arcs, i, Dep::Conj, root);
                    if let Some(c) = clause_cc.take() {
                        set(&mut arcs, c, Dep::Cc, root);
                    }
                } else if let Some(c) = pending_cc {
                    set(&mut arcs, i, Dep::Conj, governor);
                    set(&mut arcs, c, Dep::Cc, governor);
                } else if i > 0 && tags[i - 1].pos == Pos::Part && tags[i - 1].text.eq_ignore_ascii_case("to") {
                    set(&mut arcs, i, Dep::Xcomp, governor);
                } else {
                    set(&mut arcs, i, Dep::Advcl, root);
                }
                gov = Some(i);
                pending_cc = None;
                pending_comma = false;
            }
            Pos::Aux => {
                let head = next_verb_after(i).unwrap_or(root);
                set(&mut arcs, i, Dep::Aux, head);
            }
            Pos::Part => {
                if is_possessive_marker(t) && i > 0 {
                    set(&mut arcs, i, Dep::Case, i - 1);
                } else if lower == "to" {
                    let head = next_verb_after(i).unwrap_or(root);
                    set(&mut arcs, i, Dep::Aux, head);
                } else {
                    let head = next_verb_after(i).or(gov).unwrap_or(root);
                    set(&mut arcs, i, Dep::Neg, head);
                }
            }
            Pos::Adv => {
                set(&mut arcs, i, Dep::Advmod, gov.unwrap_or(root));
            }
            Pos::Adj => {
                if copula && gov == Some(root) {
                    set(&mut arcs, i, Dep::Acomp, root);
                } else if let Some(l) = last_np {
                    set(&mut arcs, i, Dep::Amod, l);
                } else {
                    set(&mut arcs, i, Dep::Dep, root);
                }
            }
            Pos::Sconj => {
                let head = next_verb_after(i).unwrap_or(root);
                set(&mut arcs, i, Dep::Mark, head);
            }
            Pos::Num if pending_prep.is_some() => {
                if let Some(p) = pending_prep.take() {
                    set(&mut arcs, i, Dep::Pobj, p);
                }
            }
            _ => set(&mut arcs, i, Dep::Dep, root),
        }
    }

    let arcs = arcs
        .into_iter()
        .enumerate()
        .map(|(i, arc)| match arc {
            Some(arc) if i == root => arc,
            Some(arc) if arc.head != i && arc.dep != Dep::Root => arc,
            _ => Arc {
                dep: Dep::Dep,
                head: root,
            },
        })
        .collect();

    SentenceParse {
        arcs,
        noun_phrases: phrases,
    }
}

/// First conjunct of a coordination chain.
fn conj_anchor(arcs: &[Option<Arc>], h: usize) -> usize {
    match arcs[h] {
        Some(Arc { dep: Dep::Conj, head }) => head,
        _ => h,
    }
}
