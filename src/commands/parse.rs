// Argument parsing for chat commands: quoted splitting and string -> value coercion

use super::CommandError;

/// Split arguments on whitespace, grouping double-quoted spans into one argument.
///
/// `addalias cat "Song the archer" no` yields `["addalias", "cat", "Song the archer", "no"]`.
/// Quotes may start mid-word; an unterminated quote is an error.
pub fn split_args(input: &str) -> Result<Vec<String>, CommandError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnclosedQuote);
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

/// Coerce a yes/no style argument
pub fn parse_bool(name: &'static str, value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" | "enable" | "on" => Ok(true),
        "no" | "n" | "false" | "f" | "0" | "disable" | "off" => Ok(false),
        _ => Err(CommandError::BadArgument {
            name,
            expected: "bool",
            value: value.to_string(),
        }),
    }
}

/// Coerce an integer argument
pub fn parse_int(name: &'static str, value: &str) -> Result<i64, CommandError> {
    value.trim().parse().map_err(|_| CommandError::BadArgument {
        name,
        expected: "int",
        value: value.to_string(),
    })
}

/// Optional integer argument at `index`, defaulting to 0
pub fn int_or_zero(args: &[String], index: usize, name: &'static str) -> Result<i64, CommandError> {
    args.get(index).map_or(Ok(0), |value| parse_int(name, value))
}

/// Required argument at `index`
pub fn required<'a>(args: &'a [String], index: usize, name: &'static str) -> Result<&'a str, CommandError> {
    args.get(index)
        .map(String::as_str)
        .ok_or(CommandError::MissingArgument(name))
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
