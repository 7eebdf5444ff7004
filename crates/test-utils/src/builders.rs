#![allow(dead_code)]

use std::path::PathBuf;

use makeup::descriptor::{Check, Descriptor, Directive, Include, Override};

/// Builder for `Descriptor` to simplify test setup.
///
/// Directives are kept in the order they are added, just like the parser
/// would produce them.
pub struct DescriptorBuilder {
    directives: Vec<Directive>,
    full_path: PathBuf,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            full_path: PathBuf::from("/project/main.mk"),
        }
    }

    pub fn at(mut self, full_path: impl Into<PathBuf>) -> Self {
        self.full_path = full_path.into();
        self
    }

    pub fn include(mut self, path: &str) -> Self {
        self.directives.push(Directive::Include(Include::new(path)));
        self
    }

    pub fn extern_include(mut self, label: &str, path: &str) -> Self {
        self.directives
            .push(Directive::Include(Include::with_extern(path, label)));
        self
    }

    pub fn check(mut self, cmd: &str, equals: &str) -> Self {
        self.directives.push(Directive::Check(Check {
            cmd: cmd.to_string(),
            equals: equals.to_string(),
        }));
        self
    }

    pub fn override_target(mut self, component: &str, target: &str) -> Self {
        self.directives.push(Directive::Override(Override {
            component: component.to_string(),
            target: target.to_string(),
        }));
        self
    }

    pub fn build(self) -> Descriptor {
        Descriptor::from_directives(self.directives, self.full_path)
    }
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
