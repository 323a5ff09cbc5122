use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Reserved placeholder name resolved from the session clipboard instead of
/// the variable table. A table entry with the same name shadows it.
pub const CLIPBOARD_VARIABLE: &str = "clipboardContent";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\$\{([^{}]+)\}").expect("placeholder regex must compile"))
}

/// Replaces every `${name}` occurrence with the table's value for `name`.
/// Names absent from the table are offered to `reserved`; if that also
/// declines, the literal placeholder text stays in place, so partially
/// resolvable templates pass through unchanged and re-substitution is a
/// no-op once every placeholder is gone.
pub fn substitute_with<F>(
    template: &str,
    variables: &BTreeMap<String, String>,
    mut reserved: F,
) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let regex = placeholder_regex();
    let mut output = String::new();
    let mut last_index = 0usize;
    for captures in regex.captures_iter(template) {
        let Some(full) = captures.get(0) else {
            continue;
        };
        let Some(name) = captures.get(1) else {
            continue;
        };
        output.push_str(&template[last_index..full.start()]);
        if let Some(value) = variables.get(name.as_str()) {
            output.push_str(value);
        } else if let Some(value) = reserved(name.as_str()) {
            output.push_str(&value);
        } else {
            output.push_str(full.as_str());
        }
        last_index = full.end();
    }
    output.push_str(&template[last_index..]);
    output
}

/// Table-only substitution, with no reserved names.
pub fn substitute(template: &str, variables: &BTreeMap<String, String>) -> String {
    substitute_with(template, variables, |_| None)
}
