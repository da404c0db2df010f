//! Prefix command parsing.

use super::help::{self, CommandSpec};

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Balance,
    Pay { recipient_id: i64, amount: i64 },
    Bet { variant: String, wager: i64 },
    History,
    Leaderboard,
    Help,
}

impl Command {
    /// Stable name used for metrics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Balance => help::BALANCE.name,
            Command::Pay { .. } => help::PAY.name,
            Command::Bet { .. } => help::BET.name,
            Command::History => help::HISTORY.name,
            Command::Leaderboard => help::TOP.name,
            Command::Help => help::HELP.name,
        }
    }
}

/// Why a prefixed message could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command `{name}`. Try `{prefix}help`.")]
    UnknownCommand { name: String, prefix: String },

    #[error("Missing <{argument}>. Usage: `{usage}`")]
    MissingArgument { argument: &'static str, usage: String },

    #[error("`{0}` is not a valid amount of coins.")]
    InvalidAmount(String),

    #[error("`{0}` is not a user mention or id.")]
    InvalidRecipient(String),
}

/// Turns message content into commands.
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
    variants: Vec<String>,
}

impl CommandParser {
    /// `variants` are the gambling variant names accepted as shorthand commands.
    pub fn new<I, S>(prefix: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            variants: variants.into_iter().map(|v| v.into().to_lowercase()).collect(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse a message. Returns `None` when it is not addressed to the bot.
    pub fn parse(&self, content: &str) -> Option<Result<Command, CommandError>> {
        let body = content.trim_start().strip_prefix(self.prefix.as_str())?;
        let mut words = body.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        Some(self.parse_command(&name, &args))
    }

    fn parse_command(&self, name: &str, args: &[&str]) -> Result<Command, CommandError> {
        if let Some(spec) = help::lookup(name) {
            return match spec.name {
                "balance" => Ok(Command::Balance),
                "pay" => {
                    let recipient = self.arg(spec, args, 0, "user")?;
                    let amount = self.arg(spec, args, 1, "amount")?;
                    Ok(Command::Pay {
                        recipient_id: parse_recipient(recipient)?,
                        amount: parse_amount(amount)?,
                    })
                }
                "bet" => {
                    let variant = self.arg(spec, args, 0, "game")?;
                    let wager = self.arg(spec, args, 1, "wager")?;
                    Ok(Command::Bet {
                        variant: help::resolve_variant_alias(&variant.to_lowercase()).to_string(),
                        wager: parse_amount(wager)?,
                    })
                }
                "history" => Ok(Command::History),
                "top" => Ok(Command::Leaderboard),
                _ => Ok(Command::Help),
            };
        }

        let variant = help::resolve_variant_alias(name);
        if self.variants.iter().any(|v| v == variant) {
            let wager = args.first().ok_or_else(|| CommandError::MissingArgument {
                argument: "wager",
                usage: format!("{}{} <wager>", self.prefix, variant),
            })?;
            return Ok(Command::Bet {
                variant: variant.to_string(),
                wager: parse_amount(wager)?,
            });
        }

        Err(CommandError::UnknownCommand {
            name: name.to_string(),
            prefix: self.prefix.clone(),
        })
    }

    fn arg<'a>(
        &self,
        spec: &CommandSpec,
        args: &[&'a str],
        index: usize,
        argument: &'static str,
    ) -> Result<&'a str, CommandError> {
        args.get(index).copied().ok_or_else(|| CommandError::MissingArgument {
            argument,
            usage: spec.usage(&self.prefix),
        })
    }
}

/// Accept `<@id>`, `<@!id>` or a bare id.
pub fn parse_recipient(raw: &str) -> Result<i64, CommandError> {
    let id = raw
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|inner| inner.trim_start_matches('!'))
        .unwrap_or(raw);

    id.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| CommandError::InvalidRecipient(raw.to_string()))
}

/// Parse an integer amount. Sign is kept so the ledger can reject it.
pub fn parse_amount(raw: &str) -> Result<i64, CommandError> {
    raw.replace('_', "")
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parser() -> CommandParser {
        CommandParser::new("c!", ["coinflip", "dice", "slots"])
    }

    #[test_case("c!balance", Command::Balance ; "balance")]
    #[test_case("c!BAL", Command::Balance ; "balance alias uppercase")]
    #[test_case("c!pay <@42> 30", Command::Pay { recipient_id: 42, amount: 30 } ; "pay mention")]
    #[test_case("c!give <@!42> 1_000", Command::Pay { recipient_id: 42, amount: 1000 } ; "pay nick mention")]
    #[test_case("c!pay 42 -5", Command::Pay { recipient_id: 42, amount: -5 } ; "negative amount kept")]
    #[test_case("c!bet Dice 10", Command::Bet { variant: "dice".into(), wager: 10 } ; "bet")]
    #[test_case("c!bet cf 10", Command::Bet { variant: "coinflip".into(), wager: 10 } ; "bet alias")]
    #[test_case("c!coinflip 25", Command::Bet { variant: "coinflip".into(), wager: 25 } ; "variant shorthand")]
    #[test_case("c!roll 5", Command::Bet { variant: "dice".into(), wager: 5 } ; "variant alias shorthand")]
    #[test_case("  c!top", Command::Leaderboard ; "leading whitespace")]
    #[test_case("c!history", Command::History ; "history")]
    #[test_case("c!help", Command::Help ; "help")]
    fn test_parse_valid(content: &str, expected: Command) {
        assert_eq!(parser().parse(content), Some(Ok(expected)));
    }

    #[test_case("hello there" ; "plain chat")]
    #[test_case("balance" ; "missing prefix")]
    fn test_not_a_command(content: &str) {
        assert_eq!(parser().parse(content), None);
    }

    #[test]
    fn test_unknown_command() {
        let err = parser().parse("c!steal 10").unwrap().unwrap_err();
        assert_eq!(
            err,
            CommandError::UnknownCommand {
                name: "steal".into(),
                prefix: "c!".into()
            }
        );
        assert!(err.to_string().contains("c!help"));
    }

    #[test]
    fn test_bare_prefix_is_unknown() {
        let err = parser().parse("c!").unwrap().unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand { ref name, .. } if name.is_empty()));
    }

    #[test]
    fn test_missing_argument_shows_usage() {
        let err = parser().parse("c!pay <@42>").unwrap().unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingArgument {
                argument: "amount",
                usage: "c!pay <@user> <amount>".into()
            }
        );
    }

    #[test_case("c!pay <@42> lots", CommandError::InvalidAmount("lots".into()) ; "amount")]
    #[test_case("c!pay @bob 5", CommandError::InvalidRecipient("@bob".into()) ; "recipient")]
    #[test_case("c!pay <@0> 5", CommandError::InvalidRecipient("<@0>".into()) ; "zero id")]
    #[test_case("c!dice ten", CommandError::InvalidAmount("ten".into()) ; "wager")]
    fn test_invalid_arguments(content: &str, expected: CommandError) {
        assert_eq!(parser().parse(content), Some(Err(expected)));
    }
}
