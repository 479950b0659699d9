/// One rung of a priority ladder: a named extractor tried in sequence.
pub(crate) struct Rule<T> {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<T>,
}

impl<T> Rule<T> {
    pub const fn new(name: &'static str, apply: fn(&str) -> Option<T>) -> Self {
        Self { name, apply }
    }
}

/// Runs `rules` in order against `text` and returns the first hit.
pub(crate) fn first_match<T>(ladder: &str, rules: &[Rule<T>], text: &str) -> Option<T> {
    for rule in rules {
        if let Some(found) = (rule.apply)(text) {
            tracing::debug!("{} ladder: rule '{}' matched", ladder, rule.name);
            return Some(found);
        }
        tracing::trace!("{} ladder: rule '{}' fell through", ladder, rule.name);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(text: &str) -> Option<String> {
        text.chars()
            .any(|c| c.is_ascii_digit())
            .then(|| "digits".to_string())
    }

    fn anything(text: &str) -> Option<String> {
        (!text.is_empty()).then(|| "anything".to_string())
    }

    #[test]
    fn test_first_match_respects_order() {
        let rules = [Rule::new("digits", digits), Rule::new("anything", anything)];

        assert_eq!(first_match("test", &rules, "a1").as_deref(), Some("digits"));
        assert_eq!(first_match("test", &rules, "ab").as_deref(), Some("anything"));
        assert_eq!(first_match("test", &rules, ""), None);
    }
}
