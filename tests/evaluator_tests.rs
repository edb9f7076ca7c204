mod common;

use common::{ScriptedTransport, status};
use serde_json::json;
use solas_lang::evaluator::{Evaluator, ExecutionContext};
use solas_lang::{Credentials, ExecError, Value, compile};

fn execute(
  source: &str,
  credentials: &Credentials,
  transport: &mut ScriptedTransport,
) -> (Result<(), ExecError>, ExecutionContext, String) {
  let program = compile(source, credentials).expect("source should compile");
  let mut out = Vec::new();
  let mut evaluator = Evaluator::new(&mut *transport, &mut out);
  let result = evaluator.execute(&program);
  let context = evaluator.into_context();
  (result, context, String::from_utf8(out).unwrap())
}

fn run_offline(source: &str) -> (Result<(), ExecError>, ExecutionContext, String) {
  execute(source, &Credentials::new(), &mut ScriptedTransport::default())
}

fn ints(values: &[i64]) -> Value {
  Value::List(values.iter().copied().map(Value::Int).collect())
}

const FETCH_WITH_RETRY: &str = r#"
stream data from @net.api("https://example.com/todos/1") {
  secure with @env.api_key
  retry(3)
  emit "Network Success: {data['title']}"
}
emit "done"
"#;

// ===== Growth =====

#[test]
fn grows_fibonacci_sequence() {
  let (result, context, out) =
    run_offline("grow s to 5 { init [1,1] step: tail(2).sum }\nemit s");
  result.unwrap();
  assert_eq!(context.get("s"), Some(&ints(&[1, 1, 2, 3, 5, 8])));
  assert_eq!(out, "[1, 1, 2, 3, 5, 8]\n");
}

#[test]
fn sum_of_last_two_with_single_seed() {
  let (result, context, _) = run_offline("grow s to 2 { init [1] step: tail(2).sum }");
  result.unwrap();
  assert_eq!(context.get("s"), Some(&ints(&[1, 1, 2])));
}

#[test]
fn other_step_expressions_run_each_iteration() {
  let (result, context, _) = run_offline(
    "grow t to 2 {\n  init [1, 1, 1]\n  step: tail(3).sum\n}\ngrow m to 2 { init [4, 2] step: tail(2).max }",
  );
  result.unwrap();
  assert_eq!(context.get("t"), Some(&ints(&[1, 1, 1, 3, 5])));
  assert_eq!(context.get("m"), Some(&ints(&[4, 2, 4, 4])));
}

#[test]
fn opaque_step_fails_at_execution() {
  let (result, context, _) = run_offline("grow s to 3 { init [1] step: 1 2 }");
  assert!(matches!(result, Err(ExecError::UnsupportedStep(text)) if text == "1 2"));
  assert_eq!(context.get("s"), Some(&ints(&[1])));
}

#[test]
fn step_naming_the_sequence_sees_it_grow() {
  let (result, context, _) = run_offline("grow s to 3 { init [1] step: s.len }\nemit s");
  result.unwrap();
  assert_eq!(context.get("s"), Some(&ints(&[1, 1, 2, 3])));
}

#[test]
fn growth_overflow_is_reported() {
  let (result, _, _) =
    run_offline("grow s to 1 { init [9223372036854775807, 1] step: tail(2).sum }");
  assert!(matches!(result, Err(ExecError::Overflow(_))));
}

// ===== Fetch =====

#[test]
fn retry_succeeds_on_third_attempt() {
  let credentials: Credentials = [("api_key", "SOLAS_DEMO_TOKEN_123")].into_iter().collect();
  let mut transport = ScriptedTransport::new([
    status(500),
    status(503),
    Ok(json!({"userId": 1, "title": "delectus aut autem"})),
  ]);

  let (result, context, out) = execute(FETCH_WITH_RETRY, &credentials, &mut transport);
  result.unwrap();

  assert_eq!(out, "Network Success: delectus aut autem\ndone\n");
  assert_eq!(transport.requests.len(), 3);
  assert!(context.drifts().is_empty());
  assert_eq!(
    transport.requests[0].headers.get("Authorization").map(String::as_str),
    Some("Bearer SOLAS_DEMO_TOKEN_123")
  );
  assert!(matches!(context.get("data"), Some(Value::Map(_))));
}

#[test]
fn exhausted_retries_drift_once_and_skip_body() {
  let mut transport = ScriptedTransport::new([status(500), status(500), status(500)]);

  let (result, context, out) = execute(FETCH_WITH_RETRY, &Credentials::new(), &mut transport);
  result.unwrap();

  assert_eq!(transport.requests.len(), 3);
  assert_eq!(context.drifts().len(), 1);
  assert_eq!(
    out,
    "Drifting from error: HTTP status 500 from https://example.com/todos/1\ndone\n"
  );
  assert_eq!(context.get("data"), None);
}

#[test]
fn missing_credential_still_sends_request() {
  let mut transport = ScriptedTransport::new([Ok(json!({"title": "t"}))]);
  let (result, _, _) = execute(FETCH_WITH_RETRY, &Credentials::new(), &mut transport);
  result.unwrap();
  assert_eq!(
    transport.requests[0].headers.get("Authorization").map(String::as_str),
    Some("Bearer MISSING_KEY")
  );
}

#[test]
fn body_errors_fail_the_attempt_and_drift() {
  let source = "stream d from @net.api(\"u\") {\n  retry(2)\n  emit \"{d['missing']}\"\n}\nemit \"after\"";
  let mut transport =
    ScriptedTransport::new([Ok(json!({"title": "t"})), Ok(json!({"title": "t"}))]);
  let (result, context, out) = execute(source, &Credentials::new(), &mut transport);
  result.unwrap();

  assert_eq!(transport.requests.len(), 2);
  assert_eq!(context.drifts(), ["key 'missing' not found".to_string()]);
  assert_eq!(out, "Drifting from error: key 'missing' not found\nafter\n");
}

#[test]
fn body_error_is_retried_until_a_clean_attempt() {
  let source = "stream d from @net.api(\"u\") {\n  retry(3)\n  emit \"{d['title']}\"\n}";
  let mut transport = ScriptedTransport::new([
    Ok(json!({"other": 1})),
    status(502),
    Ok(json!({"title": "ok"})),
  ]);
  let (result, context, out) = execute(source, &Credentials::new(), &mut transport);
  result.unwrap();

  assert_eq!(transport.requests.len(), 3);
  assert!(context.drifts().is_empty());
  assert_eq!(out, "ok\n");
}

#[test]
fn body_statements_see_the_response() {
  let source = r#"stream todos from @net.api("u") {
  store todos as cached
  grow s to 1 { init [1, 2] step: tail(2).sum }
  emit "{todos[0].title} {todos[-1]['id']}"
}
recall cached into again
emit again"#;
  let mut transport = ScriptedTransport::new([Ok(json!([
    {"id": 1, "title": "first"},
    {"id": 2, "title": "second"}
  ]))]);
  let (result, context, out) = execute(source, &Credentials::new(), &mut transport);
  result.unwrap();

  assert_eq!(
    out,
    "first 2\n[{\"id\": 1, \"title\": \"first\"}, {\"id\": 2, \"title\": \"second\"}]\n"
  );
  assert_eq!(context.get("s"), Some(&ints(&[1, 2, 3])));
}

// ===== Persistence =====

#[test]
fn store_then_recall() {
  let (result, context, out) = run_offline("store \"X\" as k\nrecall k into v\nemit v");
  result.unwrap();
  assert_eq!(out, "X\n");
  assert_eq!(context.store().get("k"), Some(&Value::str("X")));
}

#[test]
fn recall_of_missing_key_is_null() {
  let (result, context, out) = run_offline("recall missing into v\nemit v");
  result.unwrap();
  assert_eq!(context.get("v"), Some(&Value::Null));
  assert_eq!(out, "null\n");
}

#[test]
fn store_survives_into_next_run() {
  let first = compile("store 42 as answer", &Credentials::new()).unwrap();
  let second = compile("recall answer into a\nemit a", &Credentials::new()).unwrap();

  let mut evaluator = Evaluator::new(ScriptedTransport::default(), Vec::new());
  evaluator.execute(&first).unwrap();
  let mut carried = evaluator.into_context();
  carried.set("unrelated", Value::Bool(true));

  let mut out = Vec::new();
  let mut evaluator = Evaluator::with_context(carried, ScriptedTransport::default(), &mut out);
  evaluator.execute(&second).unwrap();
  drop(evaluator);
  assert_eq!(String::from_utf8(out).unwrap(), "42\n");
}

// ===== Emission =====

#[test]
fn emitted_quotes_and_braces_are_preserved() {
  let (result, _, out) = run_offline("emit \"it's {not a placeholder} }{ [x]\"\nemit \"after\"");
  result.unwrap();
  assert_eq!(out, "it's {not a placeholder} }{ [x]\nafter\n");
}

#[test]
fn undefined_placeholder_is_an_error() {
  let (result, _, _) = run_offline("emit \"hello {nobody}\"");
  assert!(matches!(result, Err(ExecError::UndefinedName(name)) if name == "nobody"));
}

#[test]
fn raw_statements_fail_at_execution() {
  let (result, _, out) = run_offline("emit \"start\"\ndrift -> @core.static_buffer");
  assert!(matches!(result, Err(ExecError::Unsupported { line: 2, .. })));
  assert_eq!(out, "start\n");
}

// ===== Values =====

#[test]
fn json_converts_to_values() {
  let value = Value::from(json!({"a": [1, 2.5, null, true], "b": "x"}));
  assert_eq!(value.to_string(), "{\"a\": [1, 2.5, null, true], \"b\": \"x\"}");
  assert_eq!(value.type_name(), "map");
}
