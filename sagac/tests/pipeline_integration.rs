//! End-to-end tests for the analysis pipeline.
//!
//! These tests start from module source text and check the declarations,
//! paths and assertions that come out of `analyze_source`.

use pretty_assertions::assert_eq;
use sagac::{
    analyze_source, AnalysisOptions, Assertion, DeclarationKind, ModuleAnalysis, StepKind,
    Unsupported,
};

/// Analyze `source` with default options, panicking on syntax errors.
fn analyze(source: &str) -> ModuleAnalysis {
    analyze_with(source, &AnalysisOptions::default())
}

fn analyze_with(source: &str, options: &AnalysisOptions) -> ModuleAnalysis {
    match analyze_source(source, options) {
        Ok(analysis) => analysis,
        Err(errors) => panic!(
            "Parsing failed:\n{}",
            errors
                .iter()
                .map(|e| format!("  - {}", e.message))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

fn steps(analysis: &ModuleAnalysis, name: &str) -> Vec<Vec<(StepKind, String)>> {
    let declaration = analysis
        .declarations
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("no declaration named {name}"));
    declaration
        .paths
        .iter()
        .map(|path| {
            path.assertions
                .iter()
                .map(|Assertion { step, effect }| (*step, effect.clone()))
                .collect()
        })
        .collect()
}

const CLIENT_SAGAS: &str = r#"
import { call, put, select } from "redux-saga/effects"
import * as api from "../api/client"
import * as clientActions from "../actions/client"
import * as formHelpers from "../helpers/form"

export const getClient = state => state.client

export function* fetchClient({ id }) {
  try {
    const client = yield call(api.fetchClient, id)
    yield put(clientActions.fetchClientSucceeded(client))
  } catch (error) {
    yield put(clientActions.fetchClientFailed(error))
  }
}

export function* saveClient({ id, values }) {
  const client = yield select(getClient)
  if (client.locked) {
    yield put(clientActions.saveClientRejected(id))
  } else {
    yield call(api.saveClient, id, values)
    yield put(formHelpers.reset(`client-${id}`))
  }
}

function* notExported() {
  yield call(api.secret)
}
"#;

// ============================================================
// Classification
// ============================================================

#[test]
fn test_exports_in_source_order() {
    let analysis = analyze(CLIENT_SAGAS);
    assert!(analysis.is_clean(), "unexpected failures: {:?}", analysis.failures);

    let summary: Vec<_> = analysis
        .declarations
        .iter()
        .map(|d| (d.kind, d.name.as_str(), d.paths.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (DeclarationKind::Select, "getClient", 1),
            (DeclarationKind::Saga, "fetchClient", 2),
            (DeclarationKind::Saga, "saveClient", 2),
        ]
    );
}

// ============================================================
// Paths and assertions
// ============================================================

#[test]
fn test_try_catch_paths() {
    let analysis = analyze(CLIENT_SAGAS);
    assert_eq!(
        steps(&analysis, "fetchClient"),
        vec![
            vec![
                (StepKind::Next, "call(api.fetchClient, sampleId)".to_string()),
                (StepKind::Next, "put(clientActions.fetchClientSucceeded(client))".to_string()),
            ],
            vec![(StepKind::Throw, "put(clientActions.fetchClientFailed(error))".to_string())],
        ]
    );
    let fetch = &analysis.declarations[1];
    assert_eq!(fetch.params, vec!["{ id: sampleId }"]);
    assert_eq!(fetch.paths[0].variation, "");
    assert_eq!(fetch.paths[1].variation, "fail to ");
}

#[test]
fn test_if_else_paths_share_the_prefix() {
    let analysis = analyze(CLIENT_SAGAS);
    assert_eq!(
        steps(&analysis, "saveClient"),
        vec![
            vec![
                (StepKind::Next, "select(getClient)".to_string()),
                (StepKind::Next, "put(clientActions.saveClientRejected(id))".to_string()),
            ],
            vec![
                (StepKind::Next, "select(getClient)".to_string()),
                (StepKind::Next, "call(api.saveClient, id, sampleValues)".to_string()),
                (StepKind::Next, r#"put(formHelpers.reset("client-${id}"))"#.to_string()),
            ],
        ]
    );
}

#[test]
fn test_consequent_only_if_does_not_fork() {
    let analysis = analyze(
        "export function* guarded({ a, b }) {
            if (cond) { yield call(fn, a); return }
            yield call(fn2, b)
        }",
    );
    let saga = &analysis.declarations[0];
    assert_eq!(saga.paths.len(), 1);
    assert_eq!(saga.paths[0].variation, "");
    assert_eq!(
        steps(&analysis, "guarded"),
        vec![vec![(StepKind::Next, "call(fn, sampleA)".to_string())]]
    );
}

#[test]
fn test_return_in_both_arms_stops_the_body() {
    let analysis = analyze(
        "export function* both() {
            if (ok) { yield call(a); return } else { yield call(b); return }
            yield call(unreachable)
        }",
    );
    assert_eq!(
        steps(&analysis, "both"),
        vec![
            vec![(StepKind::Next, "call(a)".to_string())],
            vec![(StepKind::Next, "call(b)".to_string())],
        ]
    );
}

#[test]
fn test_options_change_prefix_and_marker() {
    let options = AnalysisOptions {
        placeholder_prefix: "mock".to_string(),
        variation_marker: "not ".to_string(),
    };
    let analysis = analyze_with(CLIENT_SAGAS, &options);
    let fetch = &analysis.declarations[1];
    assert_eq!(fetch.params, vec!["{ id: mockId }"]);
    assert_eq!(fetch.paths[1].variation, "not ");
    assert_eq!(fetch.paths[0].assertions[0].effect, "call(api.fetchClient, mockId)");
}

// ============================================================
// Syntax outside the traced statements
// ============================================================

#[test]
fn test_labels_regexes_and_classes_parse() {
    let analysis = analyze(
        r#"
export class Store extends Base {
  match(text) { return /^\w+$/.test(text) }
}

export function* importRows({ rows }) {
  outer: for (const row of rows) {
    for (const cell of row) { if (!cell) continue outer }
  }
  yield call(validate, 'a', /^\d+$/g)
  yield put(done(rows))
}
"#,
    );
    assert!(analysis.is_clean(), "{:?}", analysis.failures);
    assert_eq!(analysis.declarations.len(), 1);
    assert_eq!(
        steps(&analysis, "importRows"),
        vec![vec![
            (StepKind::Next, r"call(validate, 'a', /^\d+$/g)".to_string()),
            (StepKind::Next, "put(done(rows))".to_string()),
        ]]
    );
}

// ============================================================
// Failures
// ============================================================

#[test]
fn test_syntax_error_rejects_the_module() {
    let errors = analyze_source("export function* broken( {", &AnalysisOptions::default())
        .expect_err("module should not parse");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code.as_deref(), Some(sagac::parser::SYNTAX_ERROR));
}

#[test]
fn test_unsupported_constructs_are_reported_per_declaration() {
    let analysis = analyze(
        "export function* plain(action) { yield call(handle, action) }
         export function* computed() { yield call(fn, a.b.c) }
         export function* fine() { yield call(ok) }",
    );
    assert_eq!(analysis.declarations.len(), 1);
    assert_eq!(analysis.declarations[0].name, "fine");

    let failures: Vec<_> = analysis
        .failures
        .iter()
        .map(|f| (f.declaration.as_str(), f.source.node()))
        .collect();
    assert_eq!(
        failures,
        vec![("plain", "Identifier"), ("computed", "MemberExpression")]
    );
    assert!(matches!(
        analysis.failures[0].source,
        Unsupported::ParameterPattern { .. }
    ));
}

#[test]
fn test_failure_renders_as_diagnostic() {
    let source = "export function* plain(action) {}";
    let analysis = analyze(source);
    let diagnostic = analysis.failures[0].to_diagnostic();
    let rendered = diagnostic.render("plain.js", source, false);
    assert!(rendered.contains("unsupported parameter pattern `Identifier`"), "{rendered}");
    assert!(rendered.contains("plain.js"), "{rendered}");
}

#[test]
fn test_failure_location_after_multibyte_comment() {
    let source = "// réglé à l'été\nexport function* plain(action) {}\n";
    let analysis = analyze(source);
    let rendered = analysis.failures[0].to_diagnostic().render("plain.js", source, false);
    assert!(rendered.contains("plain.js:2:24"), "{rendered}");
    assert!(rendered.contains("export function* plain(action) {}"), "{rendered}");
}

#[test]
fn test_analysis_serializes_to_json() {
    let analysis = analyze(CLIENT_SAGAS);
    let json = serde_json::to_value(&analysis).expect("analysis serializes");
    assert_eq!(json["declarations"][1]["kind"], "saga");
    assert_eq!(json["declarations"][1]["paths"][1]["assertions"][0]["step"], "throw");
    assert_eq!(json["failures"].as_array().map(Vec::len), Some(0));
}
