// Chat command router - turns a prefixed message line into a reply
//
// Platform-agnostic: the caller supplies who sent the line and where, and
// delivers the returned text however its chat client does.

mod facts;
mod parse;
mod registry;

pub use facts::{FactError, FactResponse, FactSource, FileFactSource};
pub use parse::{parse_bool, parse_int, split_args};
pub use registry::{find_command, suggest_command, CommandDefinition, CommandKind, COMMANDS};

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::aliases::{AliasError, AliasRewriter, AliasStore};
use crate::dice::{DiceError, DiceExpression, DiceRoll};
use crate::session::BotSession;
use crate::spark::{calculate_skin_spark, calculate_spark, skin_spark_message, spark_message};
use crate::text::{jst_time_message, location_label};
use parse::{int_or_zero, required};

/// Lines Silva says when the fact source is down
const DRUNK_LINES: &[&str] = &[
    "Hic... _hic..._ Soooooooong...where are youuuuu....",
    "Heyyyyyy. Another beer! I ran out!",
    "I love beer. More beeeeeeeeeeer!",
    "Zzzzzz...",
    "Beer! Beer! Beer! Beer! Beer!",
];

const NO_FACT: &str = "I couldn't get a fact at this time, sorry!";

const REPOSITORY_URL: &str = "https://github.com/brasstax/silva";

/// Who sent a command line, and from where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub author_id: u64,
    /// Name used in replies
    pub display_name: String,
    /// Server name; `None` for a direct message
    pub guild: Option<String>,
}

impl CommandContext {
    pub fn new(author_id: u64, display_name: impl Into<String>, guild: Option<String>) -> Self {
        Self {
            author_id,
            display_name: display_name.into(),
            guild,
        }
    }

    pub fn location(&self) -> &str {
        location_label(self.guild.as_deref())
    }
}

/// Error types for command parsing and dispatch
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Command \"{0}\" is not found")]
    UnknownCommand(String),
    #[error("{0} is a required argument that is missing.")]
    MissingArgument(&'static str),
    #[error("Converting to \"{expected}\" failed for parameter \"{name}\" (got \"{value}\").")]
    BadArgument {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Expected closing quotation mark.")]
    UnclosedQuote,
    #[error("You do not own this bot.")]
    NotOwner,
}

/// The bot: alias store, fact source, session and a shared RNG
pub struct Bot {
    store: Arc<dyn AliasStore>,
    facts: Arc<dyn FactSource>,
    session: Arc<BotSession>,
    prefix: String,
    rng: Mutex<ChaCha8Rng>,
}

impl Bot {
    /// Create a bot. A seed makes every roll and alias choice reproducible.
    pub fn new(
        store: Arc<dyn AliasStore>,
        facts: Arc<dyn FactSource>,
        session: Arc<BotSession>,
        prefix: impl Into<String>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            store,
            facts,
            session,
            prefix: prefix.into(),
            rng: Mutex::new(rng),
        }
    }

    pub fn session(&self) -> &BotSession {
        &self.session
    }

    /// Rewrite text with the aliases currently in the store
    pub async fn rewrite(&self, text: &str) -> Result<String, AliasError> {
        let mapping = self.store.get_all_aliases().await?;
        let rewriter = AliasRewriter::new(&mapping);
        let mut rng = self.rng.lock();
        Ok(rewriter.rewrite(text, &mut *rng))
    }

    /// Parse and roll a dice expression
    pub fn roll(&self, expression: &str) -> Result<DiceRoll, DiceError> {
        let dice = DiceExpression::parse(expression)?;
        let mut rng = self.rng.lock();
        Ok(dice.roll(&mut *rng))
    }

    /// Handle one chat line. Returns `None` when the line is not a command.
    pub async fn handle_message(&self, ctx: &CommandContext, line: &str) -> Option<String> {
        let body = line.trim().strip_prefix(self.prefix.as_str())?;
        let body = body.trim_start();
        if body.is_empty() {
            return None;
        }

        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };

        match self.dispatch(ctx, name, rest).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                crate::warn!(
                    "{} from {} caused an error: {}",
                    ctx.display_name,
                    ctx.location(),
                    e
                );
                Some(self.to_user_error(ctx, line.trim(), &e))
            }
        }
    }

    /// Map a command error to the reply shown in chat
    fn to_user_error(&self, ctx: &CommandContext, content: &str, error: &CommandError) -> String {
        let mut reply = format!("{}, I don't know what `{}` means.", ctx.display_name, content);
        if let CommandError::UnknownCommand(name) = error {
            if let Some(suggestion) = suggest_command(name) {
                reply += &format!(" Did you mean `{}{}`?", self.prefix, suggestion);
            }
        }
        reply
    }

    async fn dispatch(
        &self,
        ctx: &CommandContext,
        name: &str,
        rest: &str,
    ) -> Result<String, CommandError> {
        let command =
            find_command(name).ok_or_else(|| CommandError::UnknownCommand(name.to_lowercase()))?;

        if command.owner_only && !self.session.is_owner(ctx.author_id) {
            return Err(CommandError::NotOwner);
        }

        crate::info!(
            "{} requested by {} in {}.",
            command.name,
            ctx.display_name,
            ctx.location()
        );

        match command.kind {
            // Rest-of-line commands
            CommandKind::Roll => self.roll_command(ctx, rest),
            CommandKind::TestRegex => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("text"));
                }
                Ok(self
                    .rewrite(rest)
                    .await
                    .unwrap_or_else(|e| e.to_string()))
            }
            CommandKind::Fact => Ok(self.fact_command().await),
            CommandKind::Time => Ok(jst_time_message(chrono::Utc::now())),
            CommandKind::Info => Ok(self.info_text()),
            CommandKind::Help => Ok(help_text(&self.prefix, rest)),
            // Commands with positional arguments
            CommandKind::ListAliases => {
                let args = split_args(rest)?;
                let word = required(&args, 0, "word")?;
                Ok(self.list_aliases_command(word).await)
            }
            CommandKind::AddAlias => {
                let args = split_args(rest)?;
                let word = required(&args, 0, "word")?;
                let alias = required(&args, 1, "alias")?;
                let is_proper_noun = match args.get(2) {
                    Some(value) => parse_bool("is_proper_noun", value)?,
                    None => true,
                };
                Ok(match self.store.add_alias(word, alias, is_proper_noun).await {
                    Ok(_) => format!("Alias \"{}\" added for \"{}.\"", alias, word),
                    Err(e) => e.to_string(),
                })
            }
            CommandKind::RemoveAlias => {
                let args = split_args(rest)?;
                let word = required(&args, 0, "word")?;
                let alias = required(&args, 1, "alias")?;
                Ok(match self.store.remove_alias(word, alias).await {
                    Ok(()) => format!("\"{}\" removed as alias from \"{}.\"", alias, word),
                    Err(e) => e.to_string(),
                })
            }
            CommandKind::SparkCalc => {
                let args = split_args(rest)?;
                let crystals = int_or_zero(&args, 0, "crystals")?;
                let singles = int_or_zero(&args, 1, "singles")?;
                let tens = int_or_zero(&args, 2, "tens")?;
                Ok(match calculate_spark(crystals, tens, singles) {
                    Ok(progress) => {
                        let mut rng = self.rng.lock();
                        spark_message(&ctx.display_name, crystals, tens, singles, &progress, &mut *rng)
                    }
                    Err(e) => format!("{}, {}", e, ctx.display_name),
                })
            }
            CommandKind::SkinSparkCalc => {
                let args = split_args(rest)?;
                let crystals = int_or_zero(&args, 0, "crystals")?;
                Ok(match calculate_skin_spark(crystals) {
                    Ok(progress) => {
                        let mut rng = self.rng.lock();
                        skin_spark_message(&ctx.display_name, crystals, &progress, &mut *rng)
                    }
                    Err(e) => format!("{}, {}", e, ctx.display_name),
                })
            }
        }
    }

    fn roll_command(&self, ctx: &CommandContext, expression: &str) -> Result<String, CommandError> {
        if expression.is_empty() {
            return Err(CommandError::MissingArgument("dice"));
        }
        Ok(match self.roll(expression) {
            Ok(roll) => format!(
                "{}, you rolled **{}** ({}).",
                ctx.display_name,
                roll.total,
                roll.expression.notation()
            ),
            Err(e) => e.to_string(),
        })
    }

    async fn list_aliases_command(&self, word: &str) -> String {
        match self.store.get_alias(word).await {
            Ok(Some(aliases)) if !aliases.is_empty() => {
                format!("Aliases for \"{}\": {}", word, aliases.join(", "))
            }
            Ok(_) => format!("No aliases found for \"{}.\"", word),
            Err(e) => e.to_string(),
        }
    }

    async fn fact_command(&self) -> String {
        let fact = match self.facts.fetch_fact().await {
            Ok(fact) => fact,
            Err(e) => {
                crate::warn!("Could not get cat fact: {}", e);
                return NO_FACT.to_string();
            }
        };

        if fact.status >= 400 {
            crate::info!("Status from fact source: {} {}", fact.status, fact.text);
            return self.drunk_reply();
        }

        match self.rewrite(&fact.text).await {
            Ok(text) => text,
            Err(e) => {
                crate::warn!("Could not load aliases for fact: {}", e);
                NO_FACT.to_string()
            }
        }
    }

    fn info_text(&self) -> String {
        let author = match self.session.owner_ids.first() {
            Some(owner) => format!("<@{}>", owner),
            None => "unknown".to_string(),
        };
        format!(
            "Silva ({url})\nAuthor: {author}\nVersion: {version}",
            url = REPOSITORY_URL,
            author = author,
            version = env!("CARGO_PKG_VERSION")
        )
    }

    fn drunk_reply(&self) -> String {
        let line = {
            let mut rng = self.rng.lock();
            DRUNK_LINES.choose(&mut *rng).copied().unwrap_or(DRUNK_LINES[0])
        };
        let mut reply = format!("{} (Silva has had a bit too much to drink.", line);
        match self.session.owner_ids.first() {
            Some(owner) => {
                reply += &format!(" <@{}>, please check why Silva isn't working right.)", owner)
            }
            None => reply += " Please check why Silva isn't working right.)",
        }
        reply
    }
}

/// Help for every public command, or usage for one command
fn help_text(prefix: &str, topic: &str) -> String {
    let topic = topic.trim();
    if !topic.is_empty() {
        return match find_command(topic).filter(|c| !c.owner_only) {
            Some(command) => {
                let mut text = format!("{}{} {}", prefix, command.name, command.usage)
                    .trim_end()
                    .to_string();
                text += &format!("\n{}", command.help);
                if !command.aliases.is_empty() {
                    text += &format!("\nAliases: {}", command.aliases.join(", "));
                }
                text
            }
            None => format!("No command called \"{}\" found.", topic),
        };
    }

    let mut text = String::from("Commands:");
    for command in COMMANDS.iter().filter(|c| !c.owner_only) {
        text += &format!("\n  {}{}: {}", prefix, command.name, command.help);
    }
    text += &format!("\nType {}help <command> for more info on a command.", prefix);
    text
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
