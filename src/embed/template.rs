//! Template types for typed variable injection.
//!
//! Placeholders are written `__NAME__`. Substitution happens in a single
//! left-to-right pass, so substituted values are never scanned again: a
//! payload that happens to contain `__DATA__` stays as typed.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// `(NAME, value)` pairs; values must already be escaped for their
    /// position in the template.
    fn vars(&self) -> Vec<(&'static str, String)>;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        substitute(self.content, &vars.vars())
    }
}

/// Replace every `__NAME__` whose name appears in `vars`. Unknown
/// placeholders are left in place.
pub fn substitute(content: &str, vars: &[(&str, String)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(content.len() + extra);
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let hit = vars.iter().find(|(name, _)| {
            after
                .strip_prefix(name)
                .is_some_and(|tail| tail.starts_with("__"))
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 2..];
            }
            None => {
                out.push_str("__");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
