use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;

use crate::sharable::{Sharable, ShareToken};

/// The set of attributes a world group shares between its worlds.
///
/// Meta-groupings such as `all` are expanded when parsed, so two `Shares`
/// compare equal whenever they cover the same sharables, however they were
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shares {
    set: BTreeSet<Sharable>,
}

impl Shares {
    /// Shares covering nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares covering every sharable.
    pub fn all() -> Self {
        Sharable::ALL.into_iter().collect()
    }

    /// Parse tokens, logging and dropping any that are not recognized.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (shares, unknown) = Self::parse_tokens(tokens);
        for token in unknown {
            warn!(token = %token, "ignoring unknown share");
        }
        shares
    }

    /// Parse tokens, returning the unrecognized ones alongside the shares.
    pub fn parse_tokens<I, S>(tokens: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut shares = Self::new();
        let mut unknown = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            match ShareToken::parse(token) {
                Some(parsed) => shares.set.extend(parsed.expand().iter().copied()),
                None => unknown.push(token.to_string()),
            }
        }
        (shares, unknown)
    }

    /// Tokens in canonical order.
    pub fn to_tokens(&self) -> Vec<String> {
        self.set.iter().map(|s| s.token().to_string()).collect()
    }

    /// Returns true if the sharable was not already present.
    pub fn add(&mut self, sharable: Sharable) -> bool {
        self.set.insert(sharable)
    }

    /// Returns true if the sharable was present.
    pub fn remove(&mut self, sharable: Sharable) -> bool {
        self.set.remove(&sharable)
    }

    /// Whether the sharable is shared.
    pub fn contains(&self, sharable: Sharable) -> bool {
        self.set.contains(&sharable)
    }

    /// Whether nothing is shared.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Number of shared sharables.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Shared sharables in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Sharable> + '_ {
        self.set.iter().copied()
    }

    /// Whether every sharable is shared.
    pub fn is_sharing_all(&self) -> bool {
        self.set.len() == Sharable::ALL.len()
    }

    /// Sharables present in both.
    pub fn intersection(&self, other: &Shares) -> Shares {
        self.set.intersection(&other.set).copied().collect()
    }

    /// Sharables present in either.
    pub fn union(&self, other: &Shares) -> Shares {
        self.set.union(&other.set).copied().collect()
    }
}

impl FromIterator<Sharable> for Shares {
    fn from_iter<I: IntoIterator<Item = Sharable>>(iter: I) -> Self {
        Self {
            set: iter.into_iter().collect(),
        }
    }
}

impl Extend<Sharable> for Shares {
    fn extend<I: IntoIterator<Item = Sharable>>(&mut self, iter: I) {
        self.set.extend(iter);
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tokens().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_equals_full_expansion() {
        let from_all = Shares::from_tokens(["ALL"]);
        let tokens: Vec<&str> = Sharable::ALL.iter().rev().map(|s| s.token()).collect();
        assert_eq!(from_all, Shares::from_tokens(tokens));
        assert!(from_all.is_sharing_all());
    }

    #[test]
    fn order_and_case_do_not_matter() {
        assert_eq!(
            Shares::from_tokens(["Health", "INVENTORY"]),
            Shares::from_tokens(["inventory", "health"])
        );
    }

    #[test]
    fn groupings_are_expanded_not_stored() {
        let shares = Shares::from_tokens(["stats"]);
        assert!(shares.contains(Sharable::Health));
        assert!(shares.contains(Sharable::PotionEffects));
        assert!(!shares.contains(Sharable::Inventory));
        assert!(!shares.to_tokens().contains(&"stats".to_string()));
    }

    #[test]
    fn unknown_tokens_are_reported() {
        let (shares, unknown) = Shares::parse_tokens(["inventory", "mana", "Gold"]);
        assert_eq!(shares.to_tokens(), vec!["inventory"]);
        assert_eq!(unknown, vec!["mana".to_string(), "Gold".to_string()]);
    }

    #[test]
    fn tokens_are_canonical_order() {
        let shares = Shares::from_tokens(["economy", "health", "inventory"]);
        assert_eq!(shares.to_tokens(), vec!["inventory", "health", "economy"]);
        assert_eq!(shares.to_string(), "inventory, health, economy");
    }

    #[test]
    fn add_remove_contains() {
        let mut shares = Shares::new();
        assert!(shares.add(Sharable::Hunger));
        assert!(!shares.add(Sharable::Hunger));
        assert!(shares.contains(Sharable::Hunger));
        assert!(shares.remove(Sharable::Hunger));
        assert!(shares.is_empty());
    }

    #[test]
    fn set_operations() {
        let a = Shares::from_tokens(["inventory", "health"]);
        let b = Shares::from_tokens(["health", "economy"]);
        assert_eq!(a.intersection(&b).to_tokens(), vec!["health"]);
        assert_eq!(a.union(&b).len(), 3);
    }
}
