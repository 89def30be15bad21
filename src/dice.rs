//! Dice expression parsing and rolling.
//!
//! Accepts `<count>d<sides>[<op><value>]`, where `op` is one of `+`, `-`,
//! `x`/`*` (multiply) or `/` (floor division). Whitespace anywhere in the
//! expression is ignored.

use rand::Rng;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Most dice a single expression may roll
pub const MAX_DICE: u32 = 10_000;

static DICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)d([0-9]+)(?:([+\-x*/])([0-9]+))?$").expect("dice pattern is valid")
});

/// Error types for dice expressions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The text is not a dice expression
    #[error("{0} is not a valid set of dice.")]
    InvalidExpression(String),
    /// More than `MAX_DICE` dice requested
    #[error("I'm not rolling more than 10,000 dice.")]
    TooManyDice(u64),
}

/// Operator applied to the dice total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modifier {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Modifier {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Modifier::Add),
            "-" => Some(Modifier::Subtract),
            "x" | "*" => Some(Modifier::Multiply),
            "/" => Some(Modifier::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Modifier::Add => '+',
            Modifier::Subtract => '-',
            Modifier::Multiply => 'x',
            Modifier::Divide => '/',
        }
    }

    /// Apply the operator; overflow saturates, division floors
    fn apply(&self, total: i64, value: i64) -> i64 {
        match self {
            Modifier::Add => total.saturating_add(value),
            Modifier::Subtract => total.saturating_sub(value),
            Modifier::Multiply => total.saturating_mul(value),
            Modifier::Divide => total.div_euclid(value),
        }
    }
}

/// A parsed dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceExpression {
    pub dice_count: u32,
    pub dice_type: u32,
    pub mod_type: Modifier,
    pub mod_value: u32,
}

/// The outcome of rolling a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceRoll {
    pub expression: DiceExpression,
    /// Sum of the dice before the modifier
    pub dice_total: i64,
    /// Final result after the modifier
    pub total: i64,
}

impl DiceExpression {
    /// Parse an expression such as `3d6+2` or `1d20 x 3`.
    pub fn parse(input: &str) -> Result<Self, DiceError> {
        let roll: String = input.split_whitespace().collect();
        let invalid = || DiceError::InvalidExpression(roll.clone());

        let captures = DICE_PATTERN.captures(&roll).ok_or_else(invalid)?;

        // Digits only, so a failed parse means the count overflowed
        let requested: u64 = captures[1].parse().unwrap_or(u64::MAX);
        if requested > u64::from(MAX_DICE) {
            return Err(DiceError::TooManyDice(requested));
        }
        let dice_count = requested as u32;
        let dice_type: u32 = captures[2].parse().map_err(|_| invalid())?;
        let (mod_type, mod_value) = match (captures.get(3), captures.get(4)) {
            (Some(op), Some(value)) => (
                Modifier::from_symbol(op.as_str()).ok_or_else(invalid)?,
                value.as_str().parse::<u32>().map_err(|_| invalid())?,
            ),
            _ => (Modifier::Add, 0),
        };

        if dice_type == 0 && dice_count > 0 {
            return Err(invalid());
        }
        if mod_type == Modifier::Divide && mod_value == 0 {
            return Err(invalid());
        }

        Ok(Self {
            dice_count,
            dice_type,
            mod_type,
            mod_value,
        })
    }

    /// Roll every die, sum them and apply the modifier.
    ///
    /// Each draw is independent and uniform over `1..=dice_type`.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> DiceRoll {
        let dice_total: i64 = (0..self.dice_count)
            .map(|_| i64::from(rng.gen_range(1..=self.dice_type)))
            .sum();
        let total = self.mod_type.apply(dice_total, i64::from(self.mod_value));
        DiceRoll {
            expression: *self,
            dice_total,
            total,
        }
    }

    /// Compact form such as `3d6+2`; a `+0` modifier is left off
    pub fn notation(&self) -> String {
        if self.mod_type == Modifier::Add && self.mod_value == 0 {
            format!("{}d{}", self.dice_count, self.dice_type)
        } else {
            format!(
                "{}d{}{}{}",
                self.dice_count,
                self.dice_type,
                self.mod_type.symbol(),
                self.mod_value
            )
        }
    }

}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A dicebag with {}d{} and a modifier of {}{}.",
            self.dice_count,
            self.dice_type,
            self.mod_type.symbol(),
            self.mod_value
        )
    }
}

#[cfg(test)]
#[path = "dice_test.rs"]
mod tests;
