//! Focused unit tests covering the beaches search command.

use super::helpers::{Workspace, output};
use super::*;
use crate::beaches::{BeachesArgs, BeachesConfig, load_beaches, run_beaches_with};
use rstest::{fixture, rstest};
use serde_json::Value;

const BEACHES: &str = r#"[
    {"id": "carcavelos", "nome": "Praia de Carcavelos", "lat": 38.68, "lon": -9.33, "zone_tags": ["lisboa"]},
    {"id": "rocha", "name": "Praia da Rocha", "lat": 37.12, "lon": -8.54},
    {"id": "loriga", "nome": "Praia Fluvial de Loriga", "lat": 40.32, "lon": -7.69, "zone_tags": ["centro"]}
]"#;

struct Saved {
    _workspace: Workspace,
    args: BeachesArgs,
}

#[fixture]
fn saved() -> Saved {
    let workspace = Workspace::new();
    let beaches = workspace.write("beaches.json", BEACHES);
    Saved {
        _workspace: workspace,
        args: BeachesArgs {
            file: Some(beaches),
            ..BeachesArgs::default()
        },
    }
}

fn search(args: BeachesArgs, text: &str) -> String {
    let mut buffer = Vec::new();
    let with_search = BeachesArgs {
        search: Some(text.to_owned()),
        ..args
    };
    run_beaches_with(with_search, &mut buffer).expect("search should succeed");
    output(buffer)
}

#[rstest]
fn missing_search_text_names_the_variable(saved: Saved) {
    match BeachesConfig::try_from(saved.args).expect_err("search text is required") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SEARCH);
            assert_eq!(env, ENV_SEARCH);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn matches_are_listed_in_file_order(saved: Saved) {
    assert_eq!(
        search(saved.args, " PRAIA d"),
        "Praia de Carcavelos (carcavelos) [lisboa]\nPraia da Rocha (rocha)\n"
    );
}

#[rstest]
fn blank_search_prints_nothing(saved: Saved) {
    assert_eq!(search(saved.args, "   "), "");
}

#[rstest]
fn json_output_carries_coordinates(saved: Saved) {
    let args = BeachesArgs {
        format: Some("json".to_owned()),
        ..saved.args
    };
    let json: Value = serde_json::from_str(&search(args, "loriga")).expect("json output");
    let hits = json.as_array().expect("array of hits");
    assert_eq!(hits.len(), 1);
    assert_eq!(json[0]["id"].as_str(), Some("loriga"));
    assert_eq!(json[0]["lat"].as_f64(), Some(40.32));
}

#[rstest]
fn results_are_capped() {
    let workspace = Workspace::new();
    let many: Vec<Value> = (0..12)
        .map(|index| {
            serde_json::json!({
                "id": format!("b{index}"),
                "nome": format!("Praia {index}"),
                "lat": 38.0,
                "lon": -9.0,
            })
        })
        .collect();
    let path = workspace.write(
        "many.json",
        &serde_json::to_string(&many).expect("serialise beaches"),
    );
    let args = BeachesArgs {
        file: Some(path),
        ..BeachesArgs::default()
    };
    assert_eq!(search(args, "praia").lines().count(), 8);
}

#[rstest]
fn malformed_list_reports_the_path() {
    let workspace = Workspace::new();
    let path = workspace.write("beaches.json", r#"{"id": "not a list"}"#);
    match load_beaches(&path).expect_err("object is not a beach list") {
        CliError::ParseBeaches { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseBeaches, found {other:?}"),
    }
}
