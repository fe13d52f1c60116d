//! Compact rendering of job arguments.

use crate::types::JobArgument;

/// Shown when a job has no arguments.
pub const NO_ARGUMENTS: &str = "<none>";

/// Maximum number of items shown for a nested list argument.
pub const NESTED_ITEM_LIMIT: usize = 10;

/// Render a job's argument list as a single display line.
///
/// Top-level values are joined with `", "`. A nested list shows at most
/// [`NESTED_ITEM_LIMIT`] items in brackets, with `...` appended when items were
/// cut. Lists nested deeper than that use their plain text form.
pub fn format_arguments(args: &[JobArgument]) -> String {
    let rendered = args
        .iter()
        .map(render_top_level)
        .collect::<Vec<_>>()
        .join(", ");

    if rendered.is_empty() {
        NO_ARGUMENTS.to_string()
    } else {
        rendered
    }
}

fn render_top_level(arg: &JobArgument) -> String {
    match arg {
        JobArgument::List(items) => {
            let cutoff = items.len().min(NESTED_ITEM_LIMIT);
            let shown = items[..cutoff]
                .iter()
                .map(plain_text)
                .collect::<Vec<_>>()
                .join(", ");
            let ellipsis = if cutoff < items.len() { "..." } else { "" };
            format!("[{}{}]", shown, ellipsis)
        }
        other => plain_text(other),
    }
}

fn plain_text(arg: &JobArgument) -> String {
    match arg {
        JobArgument::Null => "null".to_string(),
        JobArgument::Number(n) => format_number(n),
        JobArgument::Text(s) => s.clone(),
        JobArgument::List(items) => items.iter().map(plain_text).collect::<Vec<_>>().join(","),
        JobArgument::Other(value) => match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

/// Integral floats print without a fractional part.
fn format_number(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            return f.to_string();
        }
    }
    n.to_string()
}
