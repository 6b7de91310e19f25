use std::fs;

use jokes::{JokeCollection, JokeError, ProfanityList};
use tempfile::tempdir;

const CSV: &str = "\
alice,http://x,Why did the chicken cross the road? To get to the other side!,42,2020-01-01
bob,http://y,\"This is darn funny, darn it.\",7,2020-01-02
carol,http://z,Plain & <simple>,13,2020-01-03
";

#[test]
fn csv_to_both_exports() {
    let dir = tempdir().unwrap();
    let list_path = dir.path().join("profanities.txt");
    let data_path = dir.path().join("jokes.csv");
    fs::write(&list_path, "darn it\ndarn\n").unwrap();
    fs::write(&data_path, CSV).unwrap();

    let list = ProfanityList::from_path(&list_path).unwrap();
    let jokes = JokeCollection::from_path(&data_path, &list).unwrap();
    assert_eq!(jokes.len(), 3);

    let bob = jokes.get(1).unwrap();
    // "darn it" goes first, then the remaining lone "darn"
    assert_eq!(bob.profanity_count(), 2);
    assert_eq!(bob.to_string(), "This is #### funny , #### ## .");

    let xml_path = dir.path().join("out.xml");
    let json_path = dir.path().join("out.json");
    jokes.save_xml(&xml_path).unwrap();
    jokes.save_json(&json_path).unwrap();

    let xml = fs::read_to_string(&xml_path).unwrap();
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "jokes");
    let nodes: Vec<_> = root.children().filter(|n| n.is_element()).collect();
    assert_eq!(nodes.len(), 3);

    let field = |i: usize, name: &str| {
        nodes[i]
            .children()
            .find(|n| n.has_tag_name(name))
            .and_then(|n| n.text())
            .unwrap_or("")
            .to_string()
    };
    assert_eq!(field(1, "text"), "This is darn funny, darn it.");
    assert_eq!(field(1, "profanity_score"), "2");
    assert_eq!(field(2, "text"), "Plain & <simple>");
    assert_eq!(field(0, "score"), "42");

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["2"]["text"], "This is darn funny, darn it.");
    assert_eq!(json["2"]["profanity_score"], 2);
    assert_eq!(json["1"]["rating"], 42);
    assert_eq!(json["3"]["author"], "carol");

    // The mapping export loads back as a nested-mapping dataset.
    let reloaded = JokeCollection::from_path(&json_path, &list).unwrap();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.get(1).unwrap().profanity_count(), 2);
    assert_eq!(reloaded.best().unwrap().author(), "alice");
}

#[test]
fn control_characters_still_give_parseable_xml() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("jokes.csv");
    fs::write(&data_path, "dan,http://f,Form\u{000C}feed joke.,3,t\u{0001}\n").unwrap();

    let jokes = JokeCollection::from_path(&data_path, &ProfanityList::empty()).unwrap();
    assert_eq!(jokes.get(0).unwrap().raw_text(), "Form\u{000C}feed joke.");

    let xml = jokes.to_xml_string();
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let joke = doc.root_element().children().find(|n| n.is_element()).unwrap();
    let text = |name: &str| joke.children().find(|n| n.has_tag_name(name)).and_then(|n| n.text());
    assert_eq!(text("text"), Some("Form\u{FFFD}feed joke."));
    assert_eq!(text("time"), Some("t\u{FFFD}"));
    assert_eq!(text("score"), Some("3"));
}

#[test]
fn malformed_csv_row_returns_no_records() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("bad.csv");
    fs::write(&data_path, "a,l,fine,1,t\nb,l,bad,abc,t\n").unwrap();

    let err = JokeCollection::from_path(&data_path, &ProfanityList::empty()).unwrap_err();
    assert_eq!(err.row(), Some(2));
    assert!(matches!(err, JokeError::Row { .. }));
}

#[test]
fn missing_profanity_list_is_fatal() {
    let dir = tempdir().unwrap();
    let err = ProfanityList::from_path(dir.path().join("nope.txt")).unwrap_err();
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn presentations_follow_load_order() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("jokes.csv");
    fs::write(&data_path, CSV).unwrap();

    let jokes = JokeCollection::from_path(&data_path, &ProfanityList::empty()).unwrap();
    let shown = jokes.presentations();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].build_up, "Why did the chicken cross the road ?");
    assert_eq!(shown[0].punch_line, "To get to the other side !");
}
