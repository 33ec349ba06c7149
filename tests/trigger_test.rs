use std::path::{Path, PathBuf};

use txt2csv_bot::config::parse_config;
use txt2csv_bot::trigger::TriggerEvaluator;

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn test_default_configuration_trigger() {
    let config = parse_config("").unwrap().rooted_at(Path::new("/work/repo"));
    let trigger = TriggerEvaluator::from_config(&config, Path::new("/work/repo")).unwrap();

    assert!(trigger.should_run(&paths(&["faturas/2025-05.txt"])));
    assert!(trigger.should_run(&paths(&["src/itau_batch_txt2csv.py"])));
    assert!(!trigger.should_run(&paths(&["docs/README.md", ".github/workflows/ci.yml"])));
}

#[test]
fn test_configured_patterns_replace_defaults() {
    let config = parse_config(
        r#"
converter:
  script: tools/convert.py
trigger:
  paths:
    - "faturas/*.txt"
    - "layouts/**/*.yaml"
"#,
    )
    .unwrap();
    let trigger = TriggerEvaluator::from_config(&config, Path::new("/unused")).unwrap();

    assert!(trigger.is_match(Path::new("faturas/jan.txt")));
    assert!(trigger.is_match(Path::new("layouts/itau/v2.yaml")));
    assert!(trigger.is_match(Path::new("tools/convert.py")));
    assert!(!trigger.is_match(Path::new("notes/jan.txt")));
    assert!(!trigger.is_match(Path::new("faturas/2025/jan.txt")));
    assert!(!trigger.is_match(Path::new("src/itau_batch_txt2csv.py")));
}

#[test]
fn test_empty_pattern_list_only_watches_converter() {
    let config = parse_config("trigger:\n  paths: []\n").unwrap();
    let trigger = TriggerEvaluator::from_config(&config, Path::new("/unused")).unwrap();

    assert!(!trigger.should_run(&paths(&["faturas/jan.txt"])));
    assert!(trigger.should_run(&paths(&["src/itau_batch_txt2csv.py"])));
}
