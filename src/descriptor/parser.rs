// src/descriptor/parser.rs

//! Line-oriented parser for the root descriptor.
//!
//! The descriptor is an ordinary build file with a few comment-embedded
//! directives layered on top:
//!
//! ```text
//! # check go version
//! # equal go1.22
//!
//! include ./api/api.mk
//!
//! # extern github.com/acme/worker
//! include ./vendor/worker/worker.mk
//!
//! # override
//! api/env:
//! 	@echo "PORT=8080"
//! ```
//!
//! Anything that is not a directive is ignored, so the same file stays a
//! valid input for the delegate build tool. Pair directives (`check`/`equal`,
//! `extern`/`include`, `override`/target line) consume exactly two non-blank
//! lines; a pair that is broken or cut off by end of file is an error.

use std::io::BufRead;
use std::path::PathBuf;

use crate::descriptor::model::{Check, Descriptor, Directive, Include, Override};
use crate::errors::{MakeupError, Result};

/// Directive keywords, each recognised by a literal, case-sensitive prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Include,
    Check,
    Equal,
    Extern,
    Override,
}

impl Keyword {
    const ALL: [Keyword; 5] = [
        Keyword::Include,
        Keyword::Check,
        Keyword::Equal,
        Keyword::Extern,
        Keyword::Override,
    ];

    fn prefix(self) -> &'static str {
        match self {
            Keyword::Include => "include ",
            Keyword::Check => "# check ",
            Keyword::Equal => "# equal ",
            Keyword::Extern => "# extern ",
            Keyword::Override => "# override",
        }
    }

    /// Match a line against the keyword prefixes, returning the keyword and
    /// the remainder of the line after the prefix.
    fn classify(text: &str) -> Option<(Keyword, &str)> {
        Keyword::ALL
            .into_iter()
            .find_map(|kw| text.strip_prefix(kw.prefix()).map(|rest| (kw, rest)))
    }
}

/// A non-blank line together with its 1-based line number.
#[derive(Debug)]
struct Line {
    number: usize,
    text: String,
}

/// Reads lines, dropping the terminator and skipping blank lines.
struct LineReader<R> {
    inner: R,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, number: 0 }
    }

    /// Next non-blank line, or `None` at end of stream.
    fn next_line(&mut self) -> Result<Option<Line>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.inner.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.number += 1;

            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }

            if buf.trim().is_empty() {
                continue;
            }

            return Ok(Some(Line {
                number: self.number,
                text: buf,
            }));
        }
    }
}

struct Parser<R> {
    lines: LineReader<R>,
}

impl<R: BufRead> Parser<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }

    fn parse_all(mut self) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        while let Some(line) = self.lines.next_line()? {
            if let Some(directive) = self.directive(&line)? {
                directives.push(directive);
            }
        }
        Ok(directives)
    }

    fn directive(&mut self, line: &Line) -> Result<Option<Directive>> {
        let Some((keyword, rest)) = Keyword::classify(&line.text) else {
            return Ok(None);
        };

        let directive = match keyword {
            Keyword::Include => Directive::Include(Include::new(rest)),
            Keyword::Check => Directive::Check(self.check(line, rest)?),
            Keyword::Extern => Directive::Include(self.extern_include(line, rest)?),
            Keyword::Override => Directive::Override(self.override_target(line)?),
            // A stray `equal` outside a check pair is just a comment.
            Keyword::Equal => return Ok(None),
        };

        Ok(Some(directive))
    }

    fn check(&mut self, line: &Line, cmd: &str) -> Result<Check> {
        let next = self.expect_next(line, "'# check' must be followed by '# equal'")?;
        match Keyword::classify(&next.text) {
            Some((Keyword::Equal, equals)) => Ok(Check {
                cmd: cmd.to_string(),
                equals: equals.to_string(),
            }),
            _ => Err(parse_error(
                next.number,
                format!(
                    "line following check is not an 'equal' value (got {})",
                    next.text
                ),
            )),
        }
    }

    fn extern_include(&mut self, line: &Line, label: &str) -> Result<Include> {
        let next = self.expect_next(line, "'# extern' must be followed by 'include'")?;
        match Keyword::classify(&next.text) {
            Some((Keyword::Include, path)) => Ok(Include::with_extern(path, label)),
            _ => Err(parse_error(
                next.number,
                format!(
                    "line following extern is not an 'include' statement (got {})",
                    next.text
                ),
            )),
        }
    }

    fn override_target(&mut self, line: &Line) -> Result<Override> {
        let next = self.expect_next(line, "'# override' must be followed by a target line")?;
        parse_override_target(&next.text).ok_or_else(|| {
            parse_error(
                next.number,
                format!(
                    "line following override is not a '<component>/<target>:' rule (got {})",
                    next.text
                ),
            )
        })
    }

    /// Read the second line of a directive pair; end of file is an error.
    fn expect_next(&mut self, opener: &Line, missing: &str) -> Result<Line> {
        self.lines.next_line()?.ok_or_else(|| {
            parse_error(
                opener.number,
                format!("{missing}, but the file ends here"),
            )
        })
    }
}

/// Parse `component/target:`; the text before the first `:` must hold
/// exactly one `/` with something on both sides.
fn parse_override_target(text: &str) -> Option<Override> {
    let (head, _) = text.split_once(':')?;
    let (component, target) = head.split_once('/')?;
    if component.is_empty() || target.is_empty() || target.contains('/') {
        return None;
    }
    Some(Override {
        component: component.to_string(),
        target: target.to_string(),
    })
}

fn parse_error(line: usize, message: String) -> MakeupError {
    MakeupError::Parse { line, message }
}

/// Parse a descriptor stream into its directives, in source order.
pub fn parse_directives<R: BufRead>(reader: R) -> Result<Vec<Directive>> {
    Parser::new(reader).parse_all()
}

/// Parse a descriptor stream into a [`Descriptor`] rooted at `full_path`.
pub fn parse<R: BufRead>(reader: R, full_path: impl Into<PathBuf>) -> Result<Descriptor> {
    let directives = parse_directives(reader)?;
    Ok(Descriptor::from_directives(directives, full_path))
}
