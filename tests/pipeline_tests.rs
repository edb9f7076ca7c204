mod common;

use common::ScriptedTransport;
use serde_json::json;
use solas_lang::{Credentials, Offline, SolasConfig, SolasError, compile, run};
use solas_parser::{ErrorCode, Stage};

const DEMO: &str = r#"
// Intent: Securely fetch data and grow a sequence
emit "Solas Engine v1.0 Active"

stream data from @net.api("https://jsonplaceholder.typicode.com/todos/1") {
    secure with @env.api_key
    retry(2)
    emit "Network Success: {data['title']}"
}

grow sequence to 5 {
    init [1, 1]
    step: tail(2).sum
}
emit sequence
"#;

fn demo_credentials() -> Credentials {
  SolasConfig::from_toml("[credentials]\napi_key = \"SOLAS_DEMO_TOKEN_123\"\n")
    .unwrap()
    .credentials()
}

#[test]
fn demo_program_end_to_end() {
  let mut transport = ScriptedTransport::new([Ok(json!({
    "userId": 1,
    "id": 1,
    "title": "delectus aut autem",
    "completed": false
  }))]);
  let mut out = Vec::new();

  let context = run(DEMO, &demo_credentials(), &mut transport, &mut out).unwrap();

  assert_eq!(
    String::from_utf8(out).unwrap(),
    "Solas Engine v1.0 Active\nNetwork Success: delectus aut autem\n[1, 1, 2, 3, 5, 8]\n"
  );
  assert!(context.drifts().is_empty());
  assert_eq!(transport.requests.len(), 1);
  assert_eq!(
    transport.requests[0].url,
    "https://jsonplaceholder.typicode.com/todos/1"
  );
}

#[test]
fn demo_program_offline_drifts_and_continues() {
  let mut out = Vec::new();
  let context = run(DEMO, &demo_credentials(), Offline, &mut out).unwrap();

  let text = String::from_utf8(out).unwrap();
  assert_eq!(
    text,
    "Solas Engine v1.0 Active\n\
     Drifting from error: request to https://jsonplaceholder.typicode.com/todos/1 failed: network access is disabled\n\
     [1, 1, 2, 3, 5, 8]\n"
  );
  assert_eq!(context.drifts().len(), 1);
}

#[test]
fn lexical_errors_become_lex_diagnostics() {
  let diagnostic = compile("emit a\nrefract if a or b", &Credentials::new()).unwrap_err();
  assert_eq!(diagnostic.stage, Stage::Lex);
  assert_eq!(diagnostic.line, 2);
  assert_eq!(diagnostic.code, Some(ErrorCode::E1001));
  assert!(diagnostic.message.contains("'or'"));
}

#[test]
fn complexity_overflow_halts_before_lowering() {
  let source = "refract if a and b and c\nrefract if d and e\n";
  let diagnostic = compile(source, &Credentials::new()).unwrap_err();
  assert_eq!(diagnostic.stage, Stage::Lex);
  assert_eq!(diagnostic.code, Some(ErrorCode::E1003));
}

#[test]
fn malformed_statements_become_match_diagnostics() {
  let diagnostic = compile("emit a\n\ngrow s to many { }", &Credentials::new()).unwrap_err();
  assert_eq!(diagnostic.stage, Stage::Match);
  assert_eq!(diagnostic.line, 3);
  assert!(diagnostic.message.contains("'grow'"));
}

#[test]
fn compile_errors_surface_through_run() {
  let result = run("x ? y", &Credentials::new(), Offline, Vec::new());
  assert!(matches!(result, Err(SolasError::Compile(_))));
}

#[test]
fn compiled_listing_hides_credentials() {
  let listing = compile(DEMO, &demo_credentials()).unwrap().to_string();
  assert!(listing.contains("Bearer ****"));
  assert!(!listing.contains("SOLAS_DEMO_TOKEN_123"));
}
