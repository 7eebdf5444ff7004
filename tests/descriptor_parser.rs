// tests/descriptor_parser.rs

use std::path::PathBuf;

use makeup::descriptor::{Check, Directive, Include, Override, parse, parse_directives};
use makeup::errors::MakeupError;

fn parse_str(src: &str) -> Result<makeup::descriptor::Descriptor, MakeupError> {
    parse(src.as_bytes(), "/project/main.mk")
}

fn expect_parse_error(src: &str) -> (usize, String) {
    match parse_str(src) {
        Err(MakeupError::Parse { line, message }) => (line, message),
        Err(e) => panic!("Expected Parse error, got: {:?}", e),
        Ok(d) => panic!("Expected error, got Ok: {:?}", d),
    }
}

#[test]
fn round_trip_keeps_literal_values() {
    let src = "\
# check go version
# equal go1.22

include ./api/api.mk

# override
api/env:
\t@echo PORT=8080
";
    let descriptor = parse_str(src).unwrap();

    assert_eq!(
        descriptor.checks,
        vec![Check {
            cmd: "go version".to_string(),
            equals: "go1.22".to_string(),
        }]
    );
    assert_eq!(descriptor.includes, vec![Include::new("./api/api.mk")]);
    assert_eq!(
        descriptor.overrides,
        vec![Override {
            component: "api".to_string(),
            target: "env".to_string(),
        }]
    );
    assert_eq!(descriptor.full_path, PathBuf::from("/project/main.mk"));
}

#[test]
fn values_are_not_trimmed_beyond_the_prefix() {
    let src = "# check echo  spaced \n# equal  spaced \ninclude  ./a.mk\n";
    let descriptor = parse_str(src).unwrap();

    assert_eq!(descriptor.checks[0].cmd, "echo  spaced ");
    assert_eq!(descriptor.checks[0].equals, " spaced ");
    assert_eq!(descriptor.includes[0].path, PathBuf::from(" ./a.mk"));
}

#[test]
fn directives_come_back_in_source_order() {
    let src = "\
include ./b/b.mk
# extern github.com/acme/worker
include ./vendor/worker/worker.mk
include ./a/a.mk
";
    let directives = parse_directives(src.as_bytes()).unwrap();

    assert_eq!(
        directives,
        vec![
            Directive::Include(Include::new("./b/b.mk")),
            Directive::Include(Include::with_extern(
                "./vendor/worker/worker.mk",
                "github.com/acme/worker"
            )),
            Directive::Include(Include::new("./a/a.mk")),
        ]
    );
}

#[test]
fn blank_lines_between_pairs_are_skipped() {
    let src = "# check true\n\n\n   \n# equal \n\n# extern vendored\n\n\ninclude ./w.mk\n";
    let descriptor = parse_str(src).unwrap();

    assert_eq!(descriptor.checks.len(), 1);
    assert_eq!(descriptor.checks[0].equals, "");
    assert_eq!(
        descriptor.includes,
        vec![Include::with_extern("./w.mk", "vendored")]
    );
}

#[test]
fn long_runs_of_blank_lines_are_skipped() {
    let src = format!(
        "include ./a.mk\n{}include ./b.mk\n",
        "\n".repeat(100_000)
    );
    let descriptor = parse_str(&src).unwrap();

    assert_eq!(
        descriptor.includes,
        vec![Include::new("./a.mk"), Include::new("./b.mk")]
    );
}

#[test]
fn line_numbers_count_skipped_blank_lines() {
    let src = format!("# check true\n{}include ./a.mk\n", "\n".repeat(500));
    let (line, _) = expect_parse_error(&src);
    assert_eq!(line, 502);
}

#[test]
fn unrecognised_lines_are_ignored() {
    let src = "\
.PHONY: all
# a human comment
all:
\t$(MAKE) build
# equal stray
Include ./capitalised.mk
include ./real.mk
";
    let descriptor = parse_str(src).unwrap();

    assert!(descriptor.checks.is_empty());
    assert!(descriptor.overrides.is_empty());
    assert_eq!(descriptor.includes, vec![Include::new("./real.mk")]);
}

#[test]
fn crlf_line_endings_are_accepted() {
    let src = "# check uname\r\n# equal Linux\r\ninclude ./a/a.mk\r\n";
    let descriptor = parse_str(src).unwrap();

    assert_eq!(descriptor.checks[0].cmd, "uname");
    assert_eq!(descriptor.checks[0].equals, "Linux");
    assert_eq!(descriptor.includes[0].path, PathBuf::from("./a/a.mk"));
}

#[test]
fn last_line_without_newline_is_parsed() {
    let descriptor = parse_str("include ./a/a.mk").unwrap();
    assert_eq!(descriptor.includes, vec![Include::new("./a/a.mk")]);
}

#[test]
fn check_followed_by_other_directive_is_an_error() {
    let (line, message) = expect_parse_error("# check go version\ninclude ./a.mk\n");
    assert_eq!(line, 2);
    assert!(message.contains("equal"), "message: {message}");
}

#[test]
fn dangling_check_at_end_of_file_is_an_error() {
    let (line, message) = expect_parse_error("include ./a.mk\n# check go version\n\n");
    assert_eq!(line, 2);
    assert!(message.contains("ends here"), "message: {message}");
}

#[test]
fn extern_without_include_is_an_error() {
    let (line, _) = expect_parse_error("# extern github.com/acme/x\n# check true\n# equal \n");
    assert_eq!(line, 2);

    let (line, _) = expect_parse_error("# extern github.com/acme/x\n");
    assert_eq!(line, 1);
}

#[test]
fn override_target_shapes() {
    for bad in [
        "api:",
        "api/env",
        "a/b/c:",
        "/env:",
        "api/:",
        "include ./api.mk",
    ] {
        let src = format!("# override\n{bad}\n");
        let (line, _) = expect_parse_error(&src);
        assert_eq!(line, 2, "target line {bad:?}");
    }

    let descriptor = parse_str("# override\nworker/env: deps/a/b\n").unwrap();
    assert_eq!(
        descriptor.overrides,
        vec![Override {
            component: "worker".to_string(),
            target: "env".to_string(),
        }]
    );
}

#[test]
fn override_for_unknown_component_is_accepted() {
    let descriptor = parse_str("include ./a/a.mk\n# override\nghost/env:\n").unwrap();

    assert!(descriptor.has_override("ghost", "env"));
    assert!(!descriptor.has_override("a", "env"));
}

#[test]
fn component_name_strips_extension() {
    let descriptor = parse_str("include ./services/api/api.mk\ninclude worker\n").unwrap();

    assert_eq!(descriptor.includes[0].component_name(), "api");
    assert_eq!(descriptor.includes[1].component_name(), "worker");
}
