// Copyright 2025 the Dendrite Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Production rules: a symbol maps to a fixed or a stochastic replacement.

use alloc::string::String;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::rng::Mulberry32;

/// Replacement for a single symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Production {
    /// Always replaced by this string.
    Fixed(String),
    /// Replaced by one equally-likely alternative, chosen by the seeded generator.
    Stochastic(SmallVec<[String; 4]>),
}

impl Production {
    /// Choose the replacement text, advancing `rng` once for stochastic rules.
    ///
    /// An empty alternative list yields `None` and leaves `rng` untouched.
    pub fn choose(&self, rng: &mut Mulberry32) -> Option<&str> {
        match self {
            Self::Fixed(s) => Some(s),
            Self::Stochastic(alts) => rng.pick(alts.len()).map(|i| alts[i].as_str()),
        }
    }

    /// Whether this production consumes randomness.
    pub fn is_stochastic(&self) -> bool {
        matches!(self, Self::Stochastic(_))
    }
}

/// An immutable-once-built mapping from symbols to productions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    map: HashMap<char, Production>,
}

impl Rules {
    /// An empty rule set (every symbol is identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a deterministic rule `symbol → replacement`.
    #[must_use]
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.map.insert(symbol, Production::Fixed(replacement.into()));
        self
    }

    /// Add a stochastic rule picking one of `alternatives`.
    #[must_use]
    pub fn with_alternatives<I, S>(mut self, symbol: char, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alts = alternatives.into_iter().map(Into::into).collect();
        self.map.insert(symbol, Production::Stochastic(alts));
        self
    }

    /// The production for `symbol`, if any.
    pub fn get(&self, symbol: char) -> Option<&Production> {
        self.map.get(&symbol)
    }

    /// Number of symbols with a rule.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no symbol has a rule.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
