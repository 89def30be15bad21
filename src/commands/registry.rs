// Command registry - the fixed table of chat commands, their aliases and help text

use serde::Serialize;
use strsim::normalized_levenshtein;

/// Minimum similarity for a "did you mean" suggestion (0.0 to 1.0)
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Which handler a command dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Roll,
    ListAliases,
    AddAlias,
    RemoveAlias,
    TestRegex,
    Fact,
    SparkCalc,
    SkinSparkCalc,
    Time,
    Info,
    Help,
}

/// A chat command definition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommandDefinition {
    pub kind: CommandKind,
    /// Primary name (e.g., "sparkcalc")
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Restricted to the bot owners and hidden from help
    pub owner_only: bool,
    /// Argument synopsis shown in help
    pub usage: &'static str,
    pub help: &'static str,
}

impl CommandDefinition {
    /// Whether `name` is this command's name or one of its aliases
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

pub const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        kind: CommandKind::Roll,
        name: "roll",
        aliases: &["dice"],
        owner_only: false,
        usage: "<count>d<sides>[+-x/<modifier>]",
        help: "Rolls dice, such as 3d6+2. Up to 10,000 dice at a time.",
    },
    CommandDefinition {
        kind: CommandKind::ListAliases,
        name: "alias",
        aliases: &["aliases"],
        owner_only: false,
        usage: "<word>",
        help: "Gets the aliases for a given word.",
    },
    CommandDefinition {
        kind: CommandKind::AddAlias,
        name: "addalias",
        aliases: &["setalias"],
        owner_only: true,
        usage: "<word> <alias> [is_proper_noun=yes]",
        help: "Adds an alias to a given word.",
    },
    CommandDefinition {
        kind: CommandKind::RemoveAlias,
        name: "rmalias",
        aliases: &["delalias"],
        owner_only: true,
        usage: "<word> <alias>",
        help: "Removes an alias from a given word.",
    },
    CommandDefinition {
        kind: CommandKind::TestRegex,
        name: "testregex",
        aliases: &["test", "regex"],
        owner_only: true,
        usage: "<text>",
        help: "Runs the alias rewriter over the given text.",
    },
    CommandDefinition {
        kind: CommandKind::Fact,
        name: "song",
        aliases: &["tweyen"],
        owner_only: false,
        usage: "",
        help: "Gets a fact about Song. Or Tweyen. Depends on Silva's mood.",
    },
    CommandDefinition {
        kind: CommandKind::SparkCalc,
        name: "sparkcalc",
        aliases: &["spark"],
        owner_only: false,
        usage: "[crystals=0] [single_tickets=0] [ten_tickets=0]",
        help: "Calculates how many draws you have and how close you are to a spark. \
               300 crystals per draw, single tickets are worth one draw and ten-draw tickets ten.",
    },
    CommandDefinition {
        kind: CommandKind::SkinSparkCalc,
        name: "skinsparkcalc",
        aliases: &["skincalc"],
        owner_only: false,
        usage: "[crystals=0]",
        help: "Calculates how close you are to a spark on the skin gacha. 200 crystals per draw.",
    },
    CommandDefinition {
        kind: CommandKind::Time,
        name: "jst",
        aliases: &["time"],
        owner_only: false,
        usage: "",
        help: "Sends the current time, in JST.",
    },
    CommandDefinition {
        kind: CommandKind::Info,
        name: "info",
        aliases: &["blame", "github", "credits"],
        owner_only: false,
        usage: "",
        help: "Outputs running info about this bot.",
    },
    CommandDefinition {
        kind: CommandKind::Help,
        name: "help",
        aliases: &[],
        owner_only: false,
        usage: "[command]",
        help: "Shows this message.",
    },
];

/// Look up a command by name or alias (case-insensitive)
pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    let name = name.to_lowercase();
    COMMANDS.iter().find(|c| c.answers_to(&name))
}

/// Closest public command name or alias, if any is similar enough
pub fn suggest_command(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    COMMANDS
        .iter()
        .filter(|c| !c.owner_only)
        .flat_map(|c| std::iter::once(c.name).chain(c.aliases.iter().copied()))
        .map(|candidate| (candidate, normalized_levenshtein(&name, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
