// tests/descriptor_properties.rs

use proptest::prelude::*;

use makeup::descriptor::parse;
use makeup::errors::MakeupError;

// Valid standalone directive blocks that may surround a broken pair.
fn valid_block() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|p| format!("include ./{p}/{p}.mk\n")),
        ("[a-z ]{1,12}", "[a-z0-9.]{0,8}")
            .prop_map(|(cmd, eq)| format!("# check {cmd}\n# equal {eq}\n")),
        ("[a-z./]{1,16}", "[a-z]{1,8}")
            .prop_map(|(label, p)| format!("# extern {label}\ninclude ./{p}.mk\n")),
        ("[a-z]{1,8}", "[a-z]{1,8}").prop_map(|(c, t)| format!("# override\n{c}/{t}:\n")),
        Just("\n".to_string()),
        Just(".PHONY: all\n".to_string()),
    ]
}

// Lines that are not blank and cannot complete the given pair.
fn non_equal_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|p| format!("include ./{p}.mk")),
        "[a-z ]{1,8}".prop_map(|c| format!("# check {c}")),
        "[a-z]{1,8}".prop_map(|l| format!("# extern {l}")),
        Just("# override".to_string()),
        "[a-z]{1,8}:",
        Just("# equal".to_string()),
    ]
}

fn non_include_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,8}".prop_map(|c| format!("# check {c}")),
        "[a-z]{1,8}".prop_map(|e| format!("# equal {e}")),
        Just("# override".to_string()),
        "[a-z]{1,8}".prop_map(|p| format!("Include ./{p}.mk")),
        "[a-z]{1,8}".prop_map(|p| format!("include{p}")),
    ]
}

fn is_parse_error(src: &str) -> bool {
    matches!(
        parse(src.as_bytes(), "/project/main.mk"),
        Err(MakeupError::Parse { .. })
    )
}

proptest! {
    #[test]
    fn check_without_equal_is_always_an_error(
        before in proptest::collection::vec(valid_block(), 0..4),
        cmd in "[a-z ]{1,12}",
        next in proptest::option::of(non_equal_line()),
        after in proptest::collection::vec(valid_block(), 0..4),
    ) {
        let mut src: String = before.concat();
        src.push_str(&format!("# check {cmd}\n"));
        // `None` leaves the check cut off by end of file.
        if let Some(line) = next {
            src.push_str(&line);
            src.push('\n');
            src.push_str(&after.concat());
        }
        prop_assert!(is_parse_error(&src), "source parsed: {:?}", src);
    }

    #[test]
    fn extern_without_include_is_always_an_error(
        before in proptest::collection::vec(valid_block(), 0..4),
        label in "[a-z./]{1,16}",
        next in proptest::option::of(non_include_line()),
        after in proptest::collection::vec(valid_block(), 0..4),
    ) {
        let mut src: String = before.concat();
        src.push_str(&format!("# extern {label}\n"));
        if let Some(line) = next {
            src.push_str(&line);
            src.push('\n');
            src.push_str(&after.concat());
        }
        prop_assert!(is_parse_error(&src), "source parsed: {:?}", src);
    }

    #[test]
    fn override_needs_exactly_one_slash_before_colon(
        parts in proptest::collection::vec("[a-z]{1,6}", 1..5),
        tail in "[a-z/ ]{0,8}",
    ) {
        let head = parts.join("/");
        let src = format!("# override\n{head}:{tail}\n");
        let ok = parse(src.as_bytes(), "/project/main.mk");
        if parts.len() == 2 {
            let descriptor = ok.unwrap();
            prop_assert_eq!(&descriptor.overrides[0].component, &parts[0]);
            prop_assert_eq!(&descriptor.overrides[0].target, &parts[1]);
        } else {
            prop_assert!(is_parse_error(&src));
        }
    }

    #[test]
    fn valid_blocks_always_parse(blocks in proptest::collection::vec(valid_block(), 0..8)) {
        let src = blocks.concat();
        prop_assert!(parse(src.as_bytes(), "/project/main.mk").is_ok(), "failed: {:?}", src);
    }
}
