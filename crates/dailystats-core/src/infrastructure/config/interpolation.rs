use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),

    #[error("Recursive interpolation limit exceeded")]
    RecursionLimit,
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

const MAX_RECURSION_DEPTH: usize = 10;

/// `${NAME}` or `${NAME:-default}`; defaults may hold further references
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-((?:[^{}]|\{[^{}]*\})*))?\}")
        .expect("Invalid regex pattern")
});

pub fn interpolate(input: &str) -> InterpolationResult<String> {
    interpolate_with_depth(input, 0)
}

fn interpolate_with_depth(input: &str, depth: usize) -> InterpolationResult<String> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(InterpolationError::RecursionLimit);
    }

    let mut output = String::with_capacity(input.len());
    let mut last_end = 0;

    for cap in VAR_PATTERN.captures_iter(input) {
        let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        output.push_str(&input[last_end..whole.start()]);

        match std::env::var(name.as_str()) {
            Ok(value) => output.push_str(&value),
            Err(_) => match cap.get(2) {
                Some(default) => {
                    output.push_str(&interpolate_with_depth(default.as_str(), depth + 1)?)
                }
                None => {
                    return Err(InterpolationError::RequiredVarNotFound(
                        name.as_str().to_string(),
                    ))
                }
            },
        }

        last_end = whole.end();
    }

    output.push_str(&input[last_end..]);
    Ok(output)
}

/// Interpolates every string in a parsed TOML document in place
pub fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => {
            *s = interpolate(s)?;
        }
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_toml(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn has_variables(input: &str) -> bool {
    VAR_PATTERN.is_match(input)
}
