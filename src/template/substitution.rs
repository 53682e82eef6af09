//! Placeholder substitution engine for email templates

use super::types::Bindings;

/// Substitute `${token}` placeholders in a template string.
///
/// The template is scanned once from left to right. At each position the
/// earliest occurring bound token is replaced; when two tokens start at the
/// same position the one bound first wins. Replacement values are copied
/// verbatim and never scanned again, and tokens without a binding are left
/// in place.
pub fn render(template: &str, bindings: &Bindings) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((index, token, value)) = next_match(rest, bindings) {
        result.push_str(&rest[..index]);
        result.push_str(value);
        rest = &rest[index + token.len()..];
    }

    result.push_str(rest);
    result
}

/// Find the earliest bound token in `text`, returning its byte offset.
///
/// Position decides first and binding order only breaks ties. For
/// well-formed `${name}` tokens this is the same as applying bindings in
/// list order: two distinct tokens cannot overlap at different offsets,
/// since each ends at its first `}`.
fn next_match<'a>(text: &str, bindings: &'a Bindings) -> Option<(usize, &'a str, &'a str)> {
    let mut best: Option<(usize, &'a str, &'a str)> = None;

    for (token, value) in bindings.iter() {
        if token.is_empty() {
            continue;
        }
        if let Some(index) = text.find(token) {
            // Strictly less keeps the first binding on ties
            if best.map_or(true, |(found, _, _)| index < found) {
                best = Some((index, token, value));
            }
        }
    }

    best
}

/// List the `${name}` placeholders present in a text, in order of first
/// appearance and without duplicates.
pub fn placeholders(text: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let mut rest = text;
    let mut offset = 0;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let token = &text[offset + start..offset + start + len + 1];
        if !found.contains(&token) {
            found.push(token);
        }
        offset += start + len + 1;
        rest = &text[offset..];
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        let bindings = Bindings::new().bind("${name}", "World");

        assert_eq!(render("Hello, ${name}!", &bindings), "Hello, World!");
    }

    #[test]
    fn test_render_multiple_occurrences() {
        let bindings = Bindings::new()
            .bind("${courseId}", "CS101")
            .bind("${carrier}", "email");

        let rendered = render(
            "Course ${courseId} updated. Visit ${courseId} via ${carrier}.",
            &bindings,
        );
        assert_eq!(rendered, "Course CS101 updated. Visit CS101 via email.");
    }

    #[test]
    fn test_unbound_token_survives() {
        let bindings = Bindings::new().bind("${userName}", "Alice");

        let rendered = render("Dear ${userName}, see ${submitUrl}", &bindings);
        assert_eq!(rendered, "Dear Alice, see ${submitUrl}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let bindings = Bindings::new()
            .bind("${a}", "${b}")
            .bind("${b}", "B");

        assert_eq!(render("${a} ${b}", &bindings), "${b} B");
    }

    #[test]
    fn test_disjoint_tokens_are_order_independent() {
        let template = "${x} and ${y} and ${x}";
        let forward = Bindings::new().bind("${x}", "1").bind("${y}", "2");
        let backward = Bindings::new().bind("${y}", "2").bind("${x}", "1");

        assert_eq!(render(template, &forward), "1 and 2 and 1");
        assert_eq!(render(template, &forward), render(template, &backward));
    }

    #[test]
    fn test_first_binding_wins_on_tie() {
        let bindings = Bindings::new()
            .bind("${user", "prefix")
            .bind("${userName}", "full");

        assert_eq!(render("${userName}", &bindings), "prefixName}");
    }

    #[test]
    fn test_earlier_position_beats_binding_order_for_overlapping_keys() {
        // Malformed keys that overlap at different offsets
        let bindings = Bindings::new().bind("b}", "late").bind("${ab", "early");

        assert_eq!(render("${ab}", &bindings), "early}");
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let bindings = Bindings::new().bind("", "boom").bind("${v}", "ok");

        assert_eq!(render("a ${v} b", &bindings), "a ok b");
    }

    #[test]
    fn test_render_without_bindings() {
        assert_eq!(render("plain ${text}", &Bindings::new()), "plain ${text}");
        assert_eq!(render("", &Bindings::new().bind("${a}", "x")), "");
    }

    #[test]
    fn test_placeholders() {
        let tokens = placeholders("Hi ${userName}, ${courseName} (${userName}) ${broken");
        assert_eq!(tokens, vec!["${userName}", "${courseName}"]);
    }

    #[test]
    fn test_placeholders_none() {
        assert!(placeholders("No tokens here $ { }").is_empty());
    }
}
