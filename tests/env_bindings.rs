// tests/env_bindings.rs

use makeup::exec::{EnvBinding, parse_env_bindings};

#[test]
fn keeps_only_lines_with_equals() {
    let output = "\
make[1]: Entering directory '/srv/api'
PORT=8080
building config...
DATABASE_URL=postgres://localhost/api
";
    assert_eq!(
        parse_env_bindings(output),
        vec![
            EnvBinding::new("PORT", "8080"),
            EnvBinding::new("DATABASE_URL", "postgres://localhost/api"),
        ]
    );
}

#[test]
fn splits_at_first_equals_only() {
    assert_eq!(
        EnvBinding::parse_line("QUERY=a=1&b=2"),
        Some(EnvBinding::new("QUERY", "a=1&b=2"))
    );
}

#[test]
fn trims_whitespace_around_key_and_value() {
    assert_eq!(
        EnvBinding::parse_line("  LOG_LEVEL = debug \r"),
        Some(EnvBinding::new("LOG_LEVEL", "debug"))
    );
}

#[test]
fn quotes_are_kept_verbatim() {
    assert_eq!(
        EnvBinding::parse_line(r#"GREETING="hello world""#),
        Some(EnvBinding::new("GREETING", r#""hello world""#))
    );
}

#[test]
fn empty_values_are_kept() {
    assert_eq!(
        EnvBinding::parse_line("EMPTY="),
        Some(EnvBinding::new("EMPTY", ""))
    );
}

#[test]
fn empty_keys_and_plain_lines_are_dropped() {
    assert_eq!(EnvBinding::parse_line("=orphan"), None);
    assert_eq!(EnvBinding::parse_line("   =orphan"), None);
    assert_eq!(EnvBinding::parse_line("no binding here"), None);
    assert!(parse_env_bindings("").is_empty());
}

#[test]
fn diagnostic_lines_with_equals_are_still_bindings() {
    // Known limitation of the KEY=VALUE heuristic.
    assert_eq!(
        parse_env_bindings("cflags = -O2\n"),
        vec![EnvBinding::new("cflags", "-O2")]
    );
}

#[test]
fn order_is_preserved_for_shadowing() {
    let bindings = parse_env_bindings("A=1\nB=2\nA=3\n");
    let keys: Vec<_> = bindings.iter().map(|b| b.to_string()).collect();
    assert_eq!(keys, vec!["A=1", "B=2", "A=3"]);
}
