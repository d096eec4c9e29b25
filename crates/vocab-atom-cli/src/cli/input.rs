//! Parsing of the line protocol read from stdin.
//!
//! ```text
//! prepare <set-id> [category ...]
//! fetch
//! clear
//! phase
//! quit
//! ```

use anyhow::bail;
use vocab_atom::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward a command to the orchestrator.
    Command(Command),
    /// Print the current phase.
    Phase,
    /// Stop reading and shut down.
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let input = match verb.to_ascii_lowercase().as_str() {
        "prepare" => {
            let Some(set_id) = words.next() else {
                bail!("usage: prepare <set-id> [category ...]");
            };
            let categories: Vec<String> = words.by_ref().map(str::to_owned).collect();
            Input::Command(Command::Prepare {
                set_id: set_id.to_owned(),
                category_names: (!categories.is_empty()).then_some(categories),
            })
        }
        "fetch" => Input::Command(Command::Fetch),
        "clear" => Input::Command(Command::Clear),
        "phase" => Input::Phase,
        "quit" | "exit" => Input::Quit,
        other => bail!("unknown command `{other}`"),
    };

    if !matches!(input, Input::Command(Command::Prepare { .. })) && words.next().is_some() {
        bail!("`{verb}` takes no arguments");
    }

    Ok(Some(input))
}
