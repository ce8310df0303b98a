//! English lexicon: closed-class word lists, open-class seed vocabularies,
//! and inflection handling.
//!
//! The built-in lists cover common prose and resume vocabulary. A TOML
//! supplement can extend the open classes (verbs, adjectives, nouns, adverbs)
//! without recompiling.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{NlpError, NlpResult};

// ---------------------------------------------------------------------------
// Closed classes
// ---------------------------------------------------------------------------

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "no",
    "another", "such", "all", "both", "either", "neither", "several", "many", "few", "much",
    "most", "more", "less",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "who", "whom", "what", "which",
    "whoever", "something", "someone", "anything", "anyone", "everything", "everyone", "nothing",
    "one",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their", "whose"];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about", "over",
    "under", "between", "through", "during", "after", "before", "across", "against", "among",
    "around", "behind", "beyond", "near", "within", "without", "towards", "toward", "upon",
    "via", "per", "like", "including", "throughout", "inside", "outside", "along", "besides",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "&"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "since", "when",
    "where", "whether", "as", "so", "than", "once", "until",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "'s", "'re", "'ve", "'ll", "'d", "'m",
];

const PARTICLES: &[&str] = &["not", "n't", "'s", "’s"];

const ADVERBS: &[&str] = &[
    "also", "very", "too", "quite", "rather", "just", "only", "even", "still", "already",
    "always", "never", "often", "sometimes", "usually", "now", "then", "here", "there", "soon",
    "again", "well", "almost", "currently", "recently", "mainly", "mostly", "primarily",
    "especially", "together", "abroad", "later", "ever", "perhaps", "however", "therefore",
    "thus", "hence", "meanwhile",
];

// ---------------------------------------------------------------------------
// Open-class seeds
// ---------------------------------------------------------------------------

const VERBS: &[&str] = &[
    "study", "develop", "build", "work", "design", "implement", "create", "lead", "manage",
    "use", "learn", "teach", "write", "complete", "earn", "graduate", "attend", "join",
    "research", "analyze", "analyse", "improve", "optimize", "deploy", "maintain", "test",
    "train", "publish", "present", "organize", "collaborate", "contribute", "include",
    "involve", "focus", "specialize", "apply", "solve", "code", "launch", "establish", "found",
    "live", "visit", "travel", "move", "grow", "help", "support", "provide", "offer", "require",
    "need", "make", "take", "give", "get", "go", "run", "see", "know", "think", "find", "say",
    "tell", "become", "seem", "show", "explore", "enjoy", "love", "like", "want", "explain",
    "describe", "discuss", "cover", "contain", "consist", "produce", "cause", "allow", "enable",
    "reduce", "increase", "handle", "process", "store", "read", "play", "win", "begin", "start",
    "finish", "hold", "host", "serve", "receive", "achieve", "gain", "master", "practice",
    "participate", "intern", "volunteer", "mentor", "coordinate", "plan", "conduct", "perform",
    "evaluate", "integrate", "automate", "configure", "debug", "refactor", "migrate", "scale",
    "monitor", "simulate", "visualize", "compute", "transmit", "broadcast", "communicate",
    "connect", "share", "program", "enroll", "pursue", "obtain", "secure", "deliver",
    "streamline", "architect", "prototype", "investigate", "examine", "observe", "measure",
    "predict", "classify", "detect", "generate", "transform", "convert", "extract", "parse",
    "combine", "compare", "select", "define", "represent", "remain", "appear", "feel", "keep",
    "bring", "spend", "meet", "lose", "pay", "put", "set", "stand", "understand", "speak",
    "follow", "open", "close", "change", "form", "continue", "happen", "believe", "consider",
    "expect", "suggest", "report", "decide", "protect", "prepare", "mean", "call", "ask",
    "try", "look", "turn", "seek", "ensure", "assist", "rank", "score", "place", "locate",
    "situate", "base",
];

/// Irregular past-tense and participle forms mapped to their base form.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("built", "build"), ("wrote", "write"), ("written", "write"), ("made", "make"),
    ("led", "lead"), ("taught", "teach"), ("won", "win"), ("began", "begin"),
    ("begun", "begin"), ("took", "take"), ("taken", "take"), ("gave", "give"),
    ("given", "give"), ("got", "get"), ("gotten", "get"), ("ran", "run"), ("found", "find"),
    ("went", "go"), ("gone", "go"), ("saw", "see"), ("seen", "see"), ("held", "hold"),
    ("knew", "know"), ("known", "know"), ("grew", "grow"), ("grown", "grow"),
    ("became", "become"), ("spent", "spend"), ("brought", "bring"), ("thought", "think"),
    ("sought", "seek"), ("kept", "keep"), ("met", "meet"), ("paid", "pay"), ("said", "say"),
    ("told", "tell"), ("felt", "feel"), ("understood", "understand"), ("spoke", "speak"),
    ("spoken", "speak"), ("learnt", "learn"), ("lost", "lose"),
    ("meant", "mean"), ("stood", "stand"),
];

const ADJECTIVES: &[&str] = &[
    "new", "good", "great", "large", "small", "big", "little", "old", "young", "long", "short",
    "high", "low", "strong", "weak", "advanced", "basic", "technical", "national",
    "international", "local", "global", "modern", "recent", "early", "late", "popular",
    "important", "major", "minor", "main", "key", "best", "better", "first", "last", "next",
    "final", "full", "open", "free", "real", "different", "similar", "various", "own",
    "other", "same", "several", "deep", "fast", "quick", "simple", "complex", "efficient",
    "scalable", "robust", "secure", "distributed", "parallel", "concurrent", "functional",
    "object-oriented", "digital", "mobile", "online", "senior", "junior", "academic",
    "professional", "personal", "social", "public", "private", "human", "natural", "urban",
    "rural", "eastern", "western", "northern", "southern", "proficient", "fluent", "familiar",
    "responsible", "relevant", "current", "previous", "entire", "whole", "certain", "clear",
    "easy", "hard", "difficult", "possible", "available", "able", "happy", "fun", "interesting",
    "beautiful", "busy", "famous", "historic", "industrial", "commercial", "scientific",
    "statistical", "analytical", "hands-on", "real-time", "open-source", "full-stack",
];

const NOUNS: &[&str] = &[
    "skill", "skills", "education", "project", "projects", "experience", "certification",
    "certifications", "location", "locations", "summary", "objective", "language", "languages",
    "interest", "interests", "achievement", "achievements", "award", "awards", "hobby",
    "hobbies", "reference", "references", "contact", "profile", "overview", "introduction",
    "conclusion", "abstract", "student", "students", "engineer", "developer", "team", "company",
    "university", "college", "school", "course", "degree", "bachelor", "master", "thesis",
    "paper", "city", "region", "country", "state", "application", "software", "hardware",
    "system", "systems", "data", "algorithm", "algorithms", "structure", "structures",
    "programming", "research", "radio", "music", "logic", "topic", "graphics", "electronics",
    "mathematics", "physics", "statistics", "economics", "journal", "portal", "signal",
    "hospital", "festival", "proposal", "tutorial", "terminal", "capital", "manual", "rental",
    "animal", "material", "potential", "individual", "internship", "workshop", "database",
    "network", "networks", "machine", "learning", "model", "models", "code", "design", "work",
    "study", "studies", "test", "tests", "plan", "process", "support", "practice", "training",
    "teaching", "engineering", "computing", "marketing", "building", "testing", "planning",
    "reasoning", "processing", "people", "time", "year", "years", "month", "months", "day",
    "way", "thing", "things", "part", "group", "number", "world", "area", "place",
];

// ---------------------------------------------------------------------------
// Suffix heuristics
// ---------------------------------------------------------------------------

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ary", "ant", "ent",
];

/// Words ending in an adjective suffix that are overwhelmingly nouns.
const SUFFIX_NOUN_EXCEPTIONS: &[&str] = &[
    "student", "students", "agent", "client", "event", "content", "parent", "talent",
    "department", "management", "development", "government", "environment", "assignment",
    "achievement", "requirement", "equipment", "component", "assistant", "consultant",
    "participant", "restaurant", "plant", "library", "dictionary", "summary", "salary",
    "secretary", "boundary", "objective", "initiative", "executive", "detective", "archive",
    "table", "cable", "variable", "vegetable", "bible",
];

/// Open-class additions loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconSupplement {
    #[serde(default)]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub nouns: Vec<String>,
    #[serde(default)]
    pub adverbs: Vec<String>,
}

impl LexiconSupplement {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> NlpResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NlpError::LexiconRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|message| NlpError::LexiconParse {
            path: path.display().to_string(),
            message,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn word_count(&self) -> usize {
        self.verbs.len() + self.adjectives.len() + self.nouns.len() + self.adverbs.len()
    }
}

/// Word-class lookup tables used by the tagger.
#[derive(Debug, Clone)]
pub struct Lexicon {
    determiners: HashSet<String>,
    pronouns: HashSet<String>,
    possessives: HashSet<String>,
    adpositions: HashSet<String>,
    coordinators: HashSet<String>,
    subordinators: HashSet<String>,
    auxiliaries: HashSet<String>,
    particles: HashSet<String>,
    adverbs: HashSet<String>,
    verbs: HashSet<String>,
    irregular: Vec<(String, String)>,
    adjectives: HashSet<String>,
    nouns: HashSet<String>,
}

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Lexicon {
    /// The built-in English lexicon.
    pub fn default_english() -> Self {
        Self {
            determiners: set(DETERMINERS),
            pronouns: set(PRONOUNS),
            possessives: set(POSSESSIVES),
            adpositions: set(ADPOSITIONS),
            coordinators: set(COORDINATORS),
            subordinators: set(SUBORDINATORS),
            auxiliaries: set(AUXILIARIES),
            particles: set(PARTICLES),
            adverbs: set(ADVERBS),
            verbs: set(VERBS),
            irregular: IRREGULAR_VERBS
                .iter()
                .map(|(form, base)| (form.to_string(), base.to_string()))
                .collect(),
            adjectives: set(ADJECTIVES),
            nouns: set(NOUNS),
        }
    }

    /// Add the open-class words of a supplement (lower-cased).
    pub fn extend(&mut self, supplement: &LexiconSupplement) {
        let lower = |w: &String| w.trim().to_lowercase();
        self.verbs.extend(supplement.verbs.iter().map(lower));
        self.adjectives.extend(supplement.adjectives.iter().map(lower));
        self.nouns.extend(supplement.nouns.iter().map(lower));
        self.adverbs.extend(supplement.adverbs.iter().map(lower));
    }

    pub fn is_determiner(&self, word: &str) -> bool {
        self.determiners.contains(word)
    }

    pub fn is_pronoun(&self, word: &str) -> bool {
        self.pronouns.contains(word)
    }

    pub fn is_possessive(&self, word: &str) -> bool {
        self.possessives.contains(word)
    }

    pub fn is_adposition(&self, word: &str) -> bool {
        self.adpositions.contains(word)
    }

    pub fn is_coordinator(&self, word: &str) -> bool {
        self.coordinators.contains(word)
    }

    pub fn is_subordinator(&self, word: &str) -> bool {
        self.subordinators.contains(word)
    }

    pub fn is_auxiliary(&self, word: &str) -> bool {
        self.auxiliaries.contains(word)
    }

    pub fn is_particle(&self, word: &str) -> bool {
        self.particles.contains(word)
    }

    pub fn is_adverb(&self, word: &str) -> bool {
        self.adverbs.contains(word)
    }

    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    /// Known common noun, singular or plural.
    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains(word)
            || word
                .strip_suffix('s')
                .is_some_and(|stem| self.nouns.contains(stem))
    }

    /// Any closed-class word: these never start a proper noun.
    pub fn is_function_word(&self, word: &str) -> bool {
        self.is_determiner(word)
            || self.is_pronoun(word)
            || self.is_possessive(word)
            || self.is_adposition(word)
            || self.is_coordinator(word)
            || self.is_subordinator(word)
            || self.is_auxiliary(word)
            || self.is_particle(word)
            || self.is_adverb(word)
    }

    /// Resolve an inflected form to a known verb base, if any.
    pub fn verb_lemma(&self, word: &str) -> Option<String> {
        if self.verbs.contains(word) {
            return Some(word.to_string());
        }
        if let Some((_, base)) = self.irregular.iter().find(|(form, _)| form == word) {
            return Some(base.clone());
        }

        let known = |stem: &str| self.verbs.contains(stem).then(|| stem.to_string());

        if let Some(stem) = word.strip_suffix("ied").or_else(|| word.strip_suffix("ies")) {
            if let Some(base) = known(&format!("{stem}y")) {
                return Some(base);
            }
        }
        for suffix in ["ing", "ed", "es", "s", "d"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.len() < 2 {
                    continue;
                }
                if let Some(base) = known(stem) {
                    return Some(base);
                }
                // "coding" / "used": the silent e was dropped.
                if suffix == "ing" || suffix == "ed" {
                    if let Some(base) = known(&format!("{stem}e")) {
                        return Some(base);
                    }
                }
                // "planned" / "running": doubled final consonant.
                let bytes = stem.as_bytes();
                if bytes.len() >= 3 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
                    if let Some(base) = known(&stem[..stem.len() - 1]) {
                        return Some(base);
                    }
                }
            }
        }
        None
    }

    /// Whether the word looks adjectival by suffix alone.
    pub fn has_adjective_suffix(&self, word: &str) -> bool {
        if SUFFIX_NOUN_EXCEPTIONS.contains(&word) || self.is_noun(word) {
            return false;
        }
        word.chars().count() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::default_english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_lemma_handles_inflections() {
        let lex = Lexicon::default_english();
        assert_eq!(lex.verb_lemma("studied").as_deref(), Some("study"));
        assert_eq!(lex.verb_lemma("developed").as_deref(), Some("develop"));
        assert_eq!(lex.verb_lemma("coding").as_deref(), Some("code"));
        assert_eq!(lex.verb_lemma("planned").as_deref(), Some("plan"));
        assert_eq!(lex.verb_lemma("built").as_deref(), Some("build"));
        assert_eq!(lex.verb_lemma("uses").as_deref(), Some("use"));
        assert_eq!(lex.verb_lemma("algorithms"), None);
    }

    #[test]
    fn plural_nouns_are_known() {
        let lex = Lexicon::default_english();
        assert!(lex.is_noun("universities") || lex.is_noun("university"));
        assert!(lex.is_noun("courses"));
        assert!(!lex.is_noun("quickly"));
    }

    #[test]
    fn adjective_suffix_respects_exceptions() {
        let lex = Lexicon::default_english();
        assert!(lex.has_adjective_suffix("dangerous"));
        assert!(lex.has_adjective_suffix("innovative"));
        assert!(!lex.has_adjective_suffix("student"));
        assert!(!lex.has_adjective_suffix("journal"));
    }

    #[test]
    fn supplement_extends_open_classes() {
        let supplement = LexiconSupplement::from_toml(
            r#"
            verbs = ["Refine"]
            nouns = ["kubernetes"]
            "#,
        )
        .unwrap();
        assert_eq!(supplement.word_count(), 2);

        let mut lex = Lexicon::default_english();
        assert!(lex.verb_lemma("refined").is_none());
        lex.extend(&supplement);
        assert_eq!(lex.verb_lemma("refined").as_deref(), Some("refine"));
        assert!(lex.is_noun("kubernetes"));
    }

    #[test]
    fn malformed_supplement_is_rejected() {
        assert!(LexiconSupplement::from_toml("verbs = 3").is_err());
    }
}
