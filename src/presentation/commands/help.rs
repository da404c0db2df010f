//! Command table and the custom help listing.

use crate::domain::PayoutTable;

/// Static description of one chat command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub args: &'static str,
    pub description: &'static str,
}

impl CommandSpec {
    /// Usage line with the given prefix, e.g. "c!pay <@user> <amount>".
    pub fn usage(&self, prefix: &str) -> String {
        if self.args.is_empty() {
            format!("{}{}", prefix, self.name)
        } else {
            format!("{}{} {}", prefix, self.name, self.args)
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

pub const BALANCE: CommandSpec = CommandSpec {
    name: "balance",
    aliases: &["bal"],
    args: "",
    description: "Show your coin balance",
};

pub const PAY: CommandSpec = CommandSpec {
    name: "pay",
    aliases: &["give"],
    args: "<@user> <amount>",
    description: "Send coins to another user",
};

pub const BET: CommandSpec = CommandSpec {
    name: "bet",
    aliases: &["gamble"],
    args: "<game> <wager>",
    description: "Wager coins on a game (or use the game name directly)",
};

pub const HISTORY: CommandSpec = CommandSpec {
    name: "history",
    aliases: &[],
    args: "",
    description: "Show your recent games",
};

pub const TOP: CommandSpec = CommandSpec {
    name: "top",
    aliases: &["leaderboard"],
    args: "",
    description: "Show the richest users",
};

pub const HELP: CommandSpec = CommandSpec {
    name: "help",
    aliases: &[],
    args: "",
    description: "Show this message",
};

/// Every command in help order.
pub const COMMANDS: &[CommandSpec] = &[BALANCE, PAY, BET, HISTORY, TOP, HELP];

/// Short names accepted for gambling variants.
pub const VARIANT_ALIASES: &[(&str, &str)] = &[("cf", "coinflip"), ("flip", "coinflip"), ("roll", "dice")];

/// Find a command by name or alias (lowercase).
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.matches(name))
}

/// Resolve a variant alias to its full name.
pub fn resolve_variant_alias(name: &str) -> &str {
    VARIANT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, full)| *full)
        .unwrap_or(name)
}

/// Help message listing commands and the games with their odds.
pub fn render_help(prefix: &str, payouts: &PayoutTable) -> String {
    let mut out = String::from("🎲 **Cheapo Bot commands**\n");

    for spec in COMMANDS {
        out.push_str(&format!("`{}`: {}", spec.usage(prefix), spec.description));
        if !spec.aliases.is_empty() {
            let aliases: Vec<String> = spec.aliases.iter().map(|a| format!("{}{}", prefix, a)).collect();
            out.push_str(&format!(" (also {})", aliases.join(", ")));
        }
        out.push('\n');
    }

    out.push_str("\n🎰 **Games**\n");
    for (name, rule) in payouts.iter() {
        out.push_str(&format!(
            "`{}{} <wager>`: {:.0}% chance to win, pays {}x\n",
            prefix,
            name,
            rule.win_probability * 100.0,
            rule.payout_multiplier
        ));
    }

    out.push_str("\nChat to earn coins: every 10 messages pays a reward.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PayoutRule;

    #[test]
    fn test_lookup_by_alias() {
        assert_eq!(lookup("bal").map(|s| s.name), Some("balance"));
        assert_eq!(lookup("leaderboard").map(|s| s.name), Some("top"));
        assert!(lookup("steal").is_none());
    }

    #[test]
    fn test_usage_includes_prefix() {
        assert_eq!(PAY.usage("c!"), "c!pay <@user> <amount>");
        assert_eq!(BALANCE.usage("!"), "!balance");
    }

    #[test]
    fn test_help_lists_every_command_and_game() {
        let payouts = PayoutTable::new([("coinflip", PayoutRule::new(0.5, 2))]);
        let help = render_help("c!", &payouts);

        for spec in COMMANDS {
            assert!(help.contains(&spec.usage("c!")), "missing {}", spec.name);
        }
        assert!(help.contains("c!coinflip <wager>"));
        assert!(help.contains("50% chance"));
    }
}
