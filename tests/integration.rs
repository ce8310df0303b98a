//! End-to-end tests for the text → mind map pipeline.

use mindmapify::config::MindMapConfig;
use mindmapify::document;
use mindmapify::hierarchy::{ConceptSet, HierarchyExtractor, MindMap, OTHER_NODE};
use mindmapify::nlp::{self, LanguageModel, ModelTier, RuleModel};
use mindmapify::render::{self, Part};

const CORPUS: &[&str] = &[
    "Alice studied algorithms and data structures at IIT Bombay",
    "Priya developed software applications with Python and Java.",
    "Rahul Sharma\n\nSkills\n• C/C++, Python, Java\n• DBMS and programming\n\n\
     Education\nB.Tech degree from IIT Bombay. Completed a bootcamp course in data structures.\n\n\
     Projects\nBuilt a radio application for the city of Howrah. \
     Published research on software testing in the region.",
    "The quick brown fox jumps over the lazy dog. The dog sleeps in the city.",
    "She likes it.",
    "Alice re\u{FB01}ned the \u{FB01}le region. Bob studied \u{DF}ilk and stra\u{DF}e data with python.",
    "Python, Java, Rust, Go, Haskell, Scala, Kotlin, Swift, Ruby, Perl, Lua, Elixir and OCaml.",
];

fn assert_bounded(map: &MindMap) {
    assert!(map.nodes.len() <= 5, "too many nodes: {map:?}");
    for node in &map.nodes {
        assert!(node.children.len() <= 10, "too many children: {node:?}");
        for child in &node.children {
            assert!(child.children.len() <= 5, "too many grandchildren: {child:?}");
        }
    }
}

#[test]
fn readme_example() {
    let model = RuleModel::small();
    let map = HierarchyExtractor::default()
        .extract_text(&model, "Alice studied algorithms and data structures at IIT Bombay")
        .unwrap();

    assert_eq!(map.root, "Alice");
    let skills = map.node("Skills").expect("skills node");
    assert!(skills.child("Algorithms").is_some());
    let education = map.node("Education").expect("education node");
    assert!(education.child("Iit bombay").is_some());
    let other = map.node(OTHER_NODE).expect("other node");
    assert!(other.child("Data structures").is_some());
}

#[test]
fn blank_input_is_empty_map() {
    let model = RuleModel::small();
    let extractor = HierarchyExtractor::default();
    for text in ["", "   ", "\n\t\n"] {
        let map = extractor.extract_text(&model, text).unwrap();
        assert_eq!(map.root, "");
        assert!(map.nodes.is_empty());
        assert_eq!(serde_json::to_value(&map).unwrap(), serde_json::json!({"root": "", "nodes": []}));
    }
}

#[test]
fn every_map_is_bounded() {
    let model = RuleModel::small();
    let extractor = HierarchyExtractor::default();
    for text in CORPUS {
        assert_bounded(&extractor.extract_text(&model, text).unwrap());
    }
}

#[test]
fn category_names_come_from_concepts() {
    let model = RuleModel::small();
    let extractor = HierarchyExtractor::default();
    for text in CORPUS {
        let text = document::clean_text(text);
        let concepts = ConceptSet::from_doc(&model.parse(&text).unwrap());
        let map = extractor.extract_text(&model, &text).unwrap();
        for node in &map.nodes {
            for child in &node.children {
                assert!(
                    concepts.contains(&child.name.to_lowercase()),
                    "{:?} under {:?} is not a concept",
                    child.name,
                    node.name
                );
                if node.name != OTHER_NODE {
                    for leaf in &child.children {
                        assert!(concepts.contains(&leaf.to_lowercase()), "{leaf:?} is not a concept");
                    }
                }
            }
        }
    }
}

#[test]
fn empty_categories_are_dropped() {
    let model = RuleModel::small();
    let extractor = HierarchyExtractor::default();
    for text in CORPUS {
        let map = extractor.extract_text(&model, text).unwrap();
        assert!(map.nodes.iter().all(|n| !n.children.is_empty()));
    }
}

#[test]
fn extraction_is_deterministic() {
    let model = RuleModel::small();
    let extractor = HierarchyExtractor::default();
    for text in CORPUS {
        let first = serde_json::to_string(&extractor.extract_text(&model, text).unwrap()).unwrap();
        let second = serde_json::to_string(&extractor.extract_text(&model, text).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn custom_categories_from_config() {
    let config = MindMapConfig::from_toml(
        r#"
        [[categories]]
        name = "Languages"
        keywords = ["python", "java"]
        "#,
    )
    .unwrap();
    let model = nlp::load_model(&config.nlp).unwrap();
    assert_eq!(model.tier(), ModelTier::Small);

    let map = config
        .extractor()
        .extract_text(&model, "Priya developed software applications with Python and Java.")
        .unwrap();
    assert!(map.node("Languages").is_some());
    assert!(map.node("Skills").is_none());
}

#[test]
fn lexicon_supplement_loads_large_tier() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon = dir.path().join("lexicon.toml");
    std::fs::write(&lexicon, "nouns = [\"kubernetes\"]\nverbs = [\"containerize\"]\n").unwrap();

    let mut config = MindMapConfig::default();
    config.nlp.lexicon_path = Some(lexicon);
    let model = nlp::load_model(&config.nlp).unwrap();
    assert_eq!(model.tier(), ModelTier::Large);
    assert_eq!(model.name(), "en_rule_lg");
}

#[test]
fn mermaid_of_extracted_map() {
    let model = RuleModel::small();
    let map = HierarchyExtractor::default()
        .extract_text(&model, "Alice studied algorithms and data structures at IIT Bombay")
        .unwrap();

    let all = render::mermaid(&map, &Part::All);
    assert!(all.starts_with("graph TD\nR[\"Alice\"]\nR --> N0[\"Skills\"]"));
    assert!(all.contains("[\"Algorithms\"]"));

    let education = render::mermaid(&map, &Part::Named("Education".into()));
    assert!(education.contains("R --> N0[\"Education\"]"));
    assert!(education.contains("N0 --> C00[\"Iit bombay\"]"));
    assert!(!education.contains("Skills"));
}
