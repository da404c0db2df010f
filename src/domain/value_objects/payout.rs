//! Gambling payout rules.

use std::collections::BTreeMap;

/// Odds and payout for one gambling variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutRule {
    /// Probability in [0, 1] that a play wins
    pub win_probability: f64,

    /// Total return on a win, stake included
    pub payout_multiplier: u32,
}

impl PayoutRule {
    pub fn new(win_probability: f64, payout_multiplier: u32) -> Self {
        Self {
            win_probability: win_probability.clamp(0.0, 1.0),
            payout_multiplier: payout_multiplier.max(1),
        }
    }

    /// Net balance change for a play with the given wager.
    ///
    /// A win returns `wager * multiplier` including the stake, so the balance
    /// grows by `wager * (multiplier - 1)`. A loss forfeits the wager.
    pub fn delta(&self, wager: i64, won: bool) -> i64 {
        if won {
            wager.saturating_mul(i64::from(self.payout_multiplier) - 1)
        } else {
            -wager
        }
    }
}

/// Named payout rules, looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct PayoutTable {
    rules: BTreeMap<String, PayoutRule>,
}

impl PayoutTable {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, PayoutRule)>,
        S: AsRef<str>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(name, rule)| (name.as_ref().trim().to_lowercase(), rule))
                .collect(),
        }
    }

    /// Resolve a variant name to its canonical name and rule.
    pub fn get(&self, name: &str) -> Option<(&str, PayoutRule)> {
        self.rules
            .get_key_value(name.trim().to_lowercase().as_str())
            .map(|(name, rule)| (name.as_str(), *rule))
    }

    /// Variant names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Variants with their rules, alphabetical.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayoutRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_win_and_loss() {
        let coinflip = PayoutRule::new(0.5, 2);
        assert_eq!(coinflip.delta(50, true), 50);
        assert_eq!(coinflip.delta(50, false), -50);

        let dice = PayoutRule::new(1.0 / 6.0, 6);
        assert_eq!(dice.delta(10, true), 50);
    }

    #[test]
    fn test_even_money_multiplier_of_one() {
        let push = PayoutRule::new(1.0, 1);
        assert_eq!(push.delta(40, true), 0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = PayoutTable::new([("CoinFlip", PayoutRule::new(0.5, 2))]);
        let (name, rule) = table.get(" COINFLIP ").unwrap();
        assert_eq!(name, "coinflip");
        assert_eq!(rule.payout_multiplier, 2);
        assert!(table.get("roulette").is_none());
    }

    #[test]
    fn test_rule_is_clamped() {
        let rule = PayoutRule::new(3.0, 0);
        assert_eq!(rule.win_probability, 1.0);
        assert_eq!(rule.payout_multiplier, 1);
    }
}
