//! Integration tests for statement lowering.

use solas_codegen::{
    Credentials, LoweredProgram, MISSING_CREDENTIAL, Operation, Output, Step, Template, lower,
};
use solas_parser::ast::{Expr, StatementKind};
use solas_parser::parse;

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
    [("api_key", "SOLAS_DEMO_TOKEN_123")].into_iter().collect()
}

fn lower_source(source: &str, credentials: &Credentials) -> LoweredProgram {
    let program = parse(source).expect("source should parse");
    lower(&program, credentials)
}

#[test]
fn test_growth_lowers_to_seed_and_loop() {
    let lowered = lower_source(
        "grow s to 5 { init [1,1] step: tail(2).sum }",
        &Credentials::new(),
    );
    assert_eq!(
        lowered.operations(),
        &[
            Operation::Assign {
                target: "s".to_string(),
                value: Expr::List(vec![Expr::int(1), Expr::int(1)]),
            },
            Operation::Loop {
                sequence: "s".to_string(),
                times: 5,
                step: Step::SumLastTwo,
            },
        ]
    );
}

#[test]
fn test_unsupported_step_is_kept_opaque() {
    let lowered = lower_source("grow s to 2 { init [1] step: 1 2 }", &Credentials::new());
    assert_eq!(
        lowered.operations()[1],
        Operation::Loop {
            sequence: "s".to_string(),
            times: 2,
            step: Step::Opaque("1 2".to_string()),
        }
    );
}

#[test]
fn test_fetch_injects_bearer_token_and_attempts() {
    let lowered = lower_source(DEMO, &demo_credentials());
    let policies = lowered.retry_policies();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0].attempts(), 2);
    assert_eq!(
        policies[0].headers.get("Authorization").map(String::as_str),
        Some("Bearer SOLAS_DEMO_TOKEN_123")
    );

    let intent = policies[0].intent("https://example.com");
    assert_eq!(intent.url, "https://example.com");
    assert_eq!(intent.headers, policies[0].headers);
}

#[test]
fn test_missing_credential_resolves_to_sentinel() {
    let lowered = lower_source(DEMO, &Credentials::new());
    let header = lowered.retry_policies()[0]
        .headers
        .get("Authorization")
        .cloned();
    assert_eq!(header, Some(format!("Bearer {}", MISSING_CREDENTIAL)));
}

#[test]
fn test_fetch_without_directives_has_no_headers_and_one_attempt() {
    let lowered = lower_source(
        "stream d from @net.api(\"https://example.com\") {\n emit d\n}",
        &Credentials::new(),
    );
    let policy = lowered.retry_policies()[0];
    assert_eq!(policy.attempts(), 1);
    assert!(policy.headers.is_empty());
}

#[test]
fn test_fetch_body_is_lowered_in_order() {
    let source = r#"stream d from @net.api("u") {
    retry(3)
    store d as last
    recall last into copy
    emit "got {copy}"
}"#;
    let lowered = lower_source(source, &Credentials::new());
    assert_eq!(lowered.len(), 1);
    let Operation::HttpFetch { target, body, .. } = &lowered.operations()[0] else {
        panic!("expected a fetch");
    };
    assert_eq!(target, "d");
    let names: Vec<_> = body.iter().map(Operation::name).collect();
    assert_eq!(names, vec!["MapPut", "MapGet", "Print"]);
}

#[test]
fn test_storage_lowering() {
    let lowered = lower_source("store \"X\" as k\nrecall missing into v", &Credentials::new());
    assert_eq!(
        lowered.operations(),
        &[
            Operation::MapPut {
                key: "k".to_string(),
                value: Expr::Str("X".to_string()),
            },
            Operation::MapGet {
                key: "missing".to_string(),
                target: "v".to_string(),
            },
        ]
    );
}

#[test]
fn test_emission_keeps_text_verbatim() {
    let lowered = lower_source("emit \"say 'hi' {not a placeholder} }\"", &Credentials::new());
    let Operation::Print(Output::Template(template)) = &lowered.operations()[0] else {
        panic!("expected a template print");
    };
    assert!(template.is_literal());
    assert_eq!(template.to_string(), "say 'hi' {not a placeholder} }");
}

#[test]
fn test_emission_of_value() {
    let lowered = lower_source("emit sequence", &Credentials::new());
    assert_eq!(
        lowered.operations(),
        &[Operation::Print(Output::Value(Expr::ident("sequence")))]
    );
}

#[test]
fn test_unrecognized_statement_becomes_raw() {
    let lowered = lower_source("emit a\ndrift -> @core.static_buffer", &Credentials::new());
    assert_eq!(
        lowered.operations()[1],
        Operation::Raw {
            text: "drift -> @core.static_buffer".to_string(),
            line: 2,
        }
    );
}

#[test]
fn test_lowering_is_deterministic() {
    let program = parse(DEMO).unwrap();
    let credentials = demo_credentials();
    assert_eq!(lower(&program, &credentials), lower(&program, &credentials));

    for statement in &program.statements {
        let lowerer = solas_codegen::Lowerer::new(&credentials);
        assert_eq!(
            lowerer.lower_statement(statement),
            lowerer.lower_statement(statement)
        );
    }
}

#[test]
fn test_listing_masks_secrets() {
    let listing = lower_source(DEMO, &demo_credentials()).to_string();
    assert!(listing.contains("print \"Solas Engine v1.0 Active\""));
    assert!(listing.contains("data = fetch GET \"https://jsonplaceholder.typicode.com/todos/1\" (attempts: 2)"));
    assert!(listing.contains("header Authorization: Bearer ****"));
    assert!(listing.contains("print \"Network Success: {data['title']}\""));
    assert!(listing.contains("repeat 5: sequence.append(sum of last two)"));
    assert!(!listing.contains("SOLAS_DEMO_TOKEN_123"));
}

#[test]
fn test_credentials_debug_hides_secrets() {
    let rendered = format!("{:?}", demo_credentials());
    assert!(rendered.contains("api_key"));
    assert!(!rendered.contains("SOLAS_DEMO_TOKEN_123"));
}

#[test]
fn test_demo_program_shape() {
    let program = parse(DEMO).unwrap();
    assert!(matches!(program.statements[1].kind, StatementKind::Fetch(_)));

    let lowered = lower(&program, &demo_credentials());
    let names: Vec<_> = lowered.iter().map(Operation::name).collect();
    assert_eq!(names, vec!["Print", "HttpFetch", "Assign", "Loop", "Print"]);
    assert_eq!(
        lowered.operations()[0],
        Operation::Print(Output::Template(Template::parse("Solas Engine v1.0 Active")))
    );
}
