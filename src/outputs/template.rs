//! Flat `{{PLACEHOLDER}}` substitution engine.
//!
//! Templates are plain strings with literal `{{KEY}}` tokens. Rendering walks
//! the bindings in order and replaces every occurrence of each token with its
//! bound value, one key at a time over the whole intermediate string. Because
//! substitution re-scans the accumulated output, a bound value that itself
//! contains a later key's token will be expanded too. That behavior is relied
//! on by callers (card fragments are bound into the page before the page's
//! own tokens) and must survive any engine swap.
//!
//! The engine sits behind [`ExpandTemplate`] so a stricter implementation —
//! for example one that rejects unresolved tokens — can replace
//! [`FlatTemplate`] without touching call sites.
//!
//! No HTML escaping happens here. Callers bind pre-built HTML-safe fragments.

/// A template expansion strategy.
///
/// Bindings are an ordered slice, not a map: substitution order is part of
/// the contract (see the module docs on re-scanning).
pub trait ExpandTemplate {
    /// Replace every `{{KEY}}` token in `template` with its bound value.
    ///
    /// Keys with no matching token are a no-op. Tokens with no bound key are
    /// left as literal text in the output.
    fn expand(&self, template: &str, bindings: &[(&str, String)]) -> String;
}

/// The production engine: sequential whole-string replacement per key.
#[derive(Debug, Default)]
pub struct FlatTemplate;

impl ExpandTemplate for FlatTemplate {
    fn expand(&self, template: &str, bindings: &[(&str, String)]) -> String {
        let mut rendered = template.to_string();
        for (key, value) in bindings {
            let token = format!("{{{{{key}}}}}");
            rendered = rendered.replace(&token, value);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(template: &str, bindings: &[(&str, String)]) -> String {
        FlatTemplate.expand(template, bindings)
    }

    #[test]
    fn replaces_single_token() {
        let out = expand("Hola {{NAME}}", &[("NAME", "mundo".to_string())]);
        assert_eq!(out, "Hola mundo");
    }

    #[test]
    fn replaces_all_occurrences_of_a_token() {
        let out = expand(
            "{{X}} y {{X}} y {{X}}",
            &[("X", "uno".to_string())],
        );
        assert_eq!(out, "uno y uno y uno");
    }

    #[test]
    fn unbound_tokens_are_left_verbatim() {
        let out = expand("{{KNOWN}} {{UNKNOWN}}", &[("KNOWN", "ok".to_string())]);
        assert_eq!(out, "ok {{UNKNOWN}}");
    }

    #[test]
    fn keys_without_tokens_are_a_noop() {
        let out = expand("static text", &[("MISSING", "value".to_string())]);
        assert_eq!(out, "static text");
    }

    #[test]
    fn literal_text_outside_tokens_is_untouched() {
        let template = "before {{A}} after, brace soup {{ A }} {A}";
        let out = expand(template, &[("A", "x".to_string())]);
        // Only the exact token form is replaced.
        assert_eq!(out, "before x after, brace soup {{ A }} {A}");
    }

    #[test]
    fn bound_value_containing_later_token_is_expanded() {
        // Documented re-scan effect: A's value carries B's token, and B is
        // bound after A, so the nested token gets substituted too.
        let out = expand(
            "{{A}}",
            &[
                ("A", "value with {{B}} inside".to_string()),
                ("B", "nested".to_string()),
            ],
        );
        assert_eq!(out, "value with nested inside");
    }

    #[test]
    fn bound_value_containing_earlier_token_is_not_expanded() {
        let out = expand(
            "{{A}} {{B}}",
            &[
                ("A", "plain".to_string()),
                ("B", "carries {{A}}".to_string()),
            ],
        );
        assert_eq!(out, "plain carries {{A}}");
    }

    #[test]
    fn empty_template_renders_empty() {
        assert_eq!(expand("", &[("A", "x".to_string())]), "");
    }

    #[test]
    fn empty_bindings_render_template_verbatim() {
        assert_eq!(expand("{{A}} {{B}}", &[]), "{{A}} {{B}}");
    }
}
