//! `${key}` placeholder substitution.
//!
//! Interpolation takes a snapshot of every resolvable property and rewrites
//! each value once against that snapshot. It is deliberately single-pass:
//! with `a=${b}`, `b=${c}`, `c=X` the result is `a=${c}`, `b=X`, `c=X`.

use crate::source::{MapSource, PropertySource};

/// Replace `${name}` placeholders using a lookup function.
///
/// Placeholders do not nest and `${` cannot be escaped. Unknown names and an
/// unterminated `${` are kept as literal text. Substituted text is not
/// scanned again.
pub fn replace_placeholders<'a, F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated: emit the remainder as-is
            result.push_str(&rest[start..]);
            return result;
        };

        let name = &after[..end];
        match lookup(name) {
            Some(value) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

/// Produce a detached, interpolated copy of `config`.
///
/// Keys appear in the order `config` enumerates them; a key listed twice
/// (e.g. by several layers of a combined source) is taken once.
pub fn interpolate<S: PropertySource + ?Sized>(config: &S) -> MapSource {
    let mut snapshot = MapSource::new();
    for key in config.keys() {
        if snapshot.contains_key(&key) {
            continue;
        }
        if let Some(value) = config.get_property(&key) {
            snapshot.insert(key, value);
        }
    }

    snapshot
        .iter()
        .map(|(key, value)| {
            let resolved = replace_placeholders(value, |name| snapshot.get(name));
            (key.to_string(), resolved)
        })
        .collect()
}
