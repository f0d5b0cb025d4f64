use arcana_cli::run;
use serde_json::Value;
use serial_test::serial;

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let argv = std::iter::once("arcana").chain(args.iter().copied());
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).to_string(),
        String::from_utf8_lossy(&err).to_string(),
    )
}

fn draw_json(args: &[&str]) -> Value {
    let mut full = vec!["draw", "--format", "json"];
    full.extend_from_slice(args);
    let (code, stdout, stderr) = run_args(&full);
    assert_eq!(code, 0, "stderr: {}", stderr);
    serde_json::from_str(&stdout).unwrap()
}

#[test]
#[serial]
fn three_card_demo_seed_is_reproducible() {
    let a = draw_json(&["--spread", "three_card", "--seed", "demo-seed"]);
    let b = draw_json(&["--spread", "three_card", "--seed", "demo-seed"]);
    assert_eq!(a, b);
    let positions: Vec<&str> = a["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_str().unwrap())
        .collect();
    assert_eq!(positions, vec!["past", "present", "future"]);
}

#[test]
#[serial]
fn full_deck_without_spread() {
    let json = draw_json(&["--cards", "78", "--seed", "1"]);
    let cards = json["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 78);
    let mut ids: Vec<&str> = cards.iter().map(|c| c["card_id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 78);
    assert!(cards.iter().all(|c| c["position"].is_null()));
}

#[test]
#[serial]
fn orientation_extremes() {
    let up = draw_json(&["--cards", "20", "--seed", "3", "--reversed-prob", "0"]);
    assert!(up["cards"].as_array().unwrap().iter().all(|c| c["orientation"] == "upright"));
    let down = draw_json(&["--cards", "20", "--seed", "3", "--reversed-prob", "1"]);
    assert!(down["cards"].as_array().unwrap().iter().all(|c| c["orientation"] == "reversed"));
}

#[test]
#[serial]
fn boundary_errors_exit_with_two() {
    for args in [
        vec!["draw", "--cards", "0"],
        vec!["draw", "--cards", "79"],
        vec!["draw", "--cards", "1", "--reversed-prob", "1.01"],
        vec!["draw", "--cards", "1", "--reversed-prob=-0.01"],
        vec!["draw", "--cards", "5", "--spread", "three_card"],
        vec!["draw", "--spread", "horseshoe"],
        vec!["draw", "--cards", "1", "--deck", "thoth"],
    ] {
        let (code, stdout, stderr) = run_args(&args);
        assert_eq!(code, 2, "args: {:?}", args);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("Error: Draw error:"), "stderr: {}", stderr);
    }
}

#[test]
#[serial]
fn text_output_lists_cards() {
    let (code, stdout, _) = run_args(&["draw", "--spread", "five_card", "--seed", "11"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Spread: five_card | Seed: 11 | Deck: rws"));
    for pos in ["issue", "action", "obstacle", "resource", "outcome"] {
        assert!(stdout.contains(&format!("[{}]", pos)));
    }
}

#[test]
#[serial]
fn template_narration_json() {
    let json = draw_json(&[
        "--spread",
        "single",
        "--seed",
        "5",
        "--narrate",
        "--narrator",
        "template",
    ]);
    assert!(json["meta"]["explain_with_llm"].as_bool().unwrap());
    assert!(json["llm"]["prompt"].as_str().unwrap().contains("pos=focus"));
    assert!(json["llm"]["response_text"].as_str().unwrap().contains("Advice:"));
    assert!(json["llm"]["error"].is_null());
}
