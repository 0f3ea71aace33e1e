use crate::shell::{MapShell, ShellError};

// Splits off the first whitespace separated word. The remainder keeps its inner spacing.
fn next_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], text[end..].trim_start())),
        None => Some((text, "")),
    }
}

pub fn read_command_line(line: &str, dispatch: &mut dyn MapShell) -> Result<(), ShellError> {
    let line = line.trim_end();
    let Some((command, rest)) = next_word(line) else {
        return Ok(());
    };
    match command {
        "insert" | "assign" => {
            let Some((key, value)) = next_word(rest) else {
                return Err(ShellError::Invalid(format!("Missing key in: {line}")));
            };
            if value.is_empty() {
                return Err(ShellError::Invalid(format!("Missing value in: {line}")));
            }
            if command == "insert" {
                dispatch.insert(key, value)
            } else {
                dispatch.assign(key, value)
            }
        }
        "get" | "remove" | "contains" => {
            let Some((key, trailing)) = next_word(rest) else {
                return Err(ShellError::Invalid(format!("Missing key in: {line}")));
            };
            if !trailing.is_empty() {
                return Err(ShellError::Invalid(format!("Unexpected arguments in: {line}")));
            }
            match command {
                "get" => dispatch.get(key),
                "remove" => dispatch.remove(key),
                _ => dispatch.contains(key),
            }
        }
        "clear" => dispatch.clear(),
        "len" => dispatch.len(),
        "stats" => dispatch.stats(),
        "options" => dispatch.options(),
        "setoption" => {
            let mut words = rest.split_whitespace();
            if words.next() != Some("name") {
                return Err(ShellError::Invalid(format!(
                    "Missing 'name' parameter in: {line}"
                )));
            }
            let Some(option_name) = words.next() else {
                return Err(ShellError::Invalid(format!("Missing 'name' value in: {line}")));
            };
            let Some(value_literal) = words.next() else {
                return dispatch.set_option(option_name, None);
            };
            if value_literal != "value" {
                return Err(ShellError::Invalid(format!(
                    "Invalid 'value' parameter in: {line}"
                )));
            }
            let Some(value) = words.next() else {
                return Err(ShellError::Invalid(format!("Missing 'value' value in: {line}")));
            };
            dispatch.set_option(option_name, Some(value))
        }
        "quit" => dispatch.quit(),
        _ => Err(ShellError::Invalid(format!("Invalid command: {line}"))),
    }
}
