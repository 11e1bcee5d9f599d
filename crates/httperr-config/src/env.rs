use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are left untouched so commented-out
/// settings never require their variables.
pub fn expand_env(input: &str) -> Result<String, String> {
    let lines = input
        .split('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                Ok(line.to_owned())
            } else {
                expand_line(line)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };
        out.push_str(&line[last..whole.start()]);
        out.push_str(&resolve(&captures)?);
        last = whole.end();
    }

    out.push_str(&line[last..]);
    Ok(out)
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[server]\nlisten_address = \"127.0.0.1:3000\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_set_variable() {
        temp_env::with_var("HTTPERR_TEST_DOMAIN", Some("billing"), || {
            let result = expand_env("domain = \"{{ env.HTTPERR_TEST_DOMAIN }}\"").unwrap();
            assert_eq!(result, "domain = \"billing\"");
        });
    }

    #[test]
    fn uses_default_when_unset() {
        temp_env::with_var_unset("HTTPERR_TEST_UNSET", || {
            let result = expand_env("log_filter = \"{{ env.HTTPERR_TEST_UNSET | default(\"warn\") }}\"").unwrap();
            assert_eq!(result, "log_filter = \"warn\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("HTTPERR_TEST_MISSING", || {
            let err = expand_env("a = \"{{ env.HTTPERR_TEST_MISSING }}\"").unwrap_err();
            assert!(err.contains("HTTPERR_TEST_MISSING"));
        });
    }

    #[test]
    fn rejects_other_scopes() {
        let err = expand_env("a = \"{{ secrets.TOKEN }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("HTTPERR_TEST_MISSING", || {
            let input = "  # domain = \"{{ env.HTTPERR_TEST_MISSING }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
