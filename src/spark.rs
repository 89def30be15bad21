//! Spark calculator - draws available and progress toward a guaranteed spark.
//!
//! A regular spark needs 300 draws; one draw costs 300 crystals, a ten-draw
//! ticket is worth ten and a single ticket one. The skin gacha only takes
//! crystals, 200 per draw, and sparks at 40,000 crystals.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::text::plural_suffix;

/// Crystals per regular draw
pub const CRYSTALS_PER_DRAW: i64 = 300;
/// Crystals per skin draw
pub const CRYSTALS_PER_SKIN_DRAW: i64 = 200;
/// Draws needed for a spark
pub const DRAWS_PER_SPARK: i64 = 300;
/// Crystals needed for a skin spark
pub const CRYSTALS_PER_SKIN_SPARK: i64 = 40_000;

/// Chance (out of 100) of an encouraging line before the first spark
const ENCOURAGEMENT_CHANCE: u32 = 25;

const ENCOURAGEMENTS: &[&str] = &[
    "You've got this!",
    "Ganbaruby!",
    "<:ganbaruby:275832773464293377>",
    "<:gobu:284812336580263938>",
    "I hope you like your spark!",
    "May your spark shower you with the draws you want.",
    "Silva, with her heart of silver, believes in you!",
    "I'm excited for you and I can't wait for your spark.",
];

/// Error types for spark calculations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SparkError {
    #[error("{0}")]
    InvalidDraws(&'static str),
}

/// Draws available and percentage of the way to a spark
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparkProgress {
    pub draws: i64,
    /// Percent of one spark; 150.0 means one spark plus half of the next
    pub percentage: f64,
}

impl SparkProgress {
    /// Whole sparks available
    pub fn sparks(&self) -> i64 {
        (self.percentage / 100.0).floor() as i64
    }
}

/// Draws and spark percentage for the regular gacha
pub fn calculate_spark(crystals: i64, tens: i64, singles: i64) -> Result<SparkProgress, SparkError> {
    if crystals < 0 {
        return Err(SparkError::InvalidDraws("Crystals cannot be less than 0"));
    }
    if tens < 0 {
        return Err(SparkError::InvalidDraws("Ten-draw tickets cannot be less than 0"));
    }
    if singles < 0 {
        return Err(SparkError::InvalidDraws("Single tickets cannot be less than 0"));
    }
    let draws = (crystals / CRYSTALS_PER_DRAW)
        .saturating_add(tens.saturating_mul(10))
        .saturating_add(singles);
    Ok(SparkProgress {
        draws,
        percentage: draws as f64 / DRAWS_PER_SPARK as f64 * 100.0,
    })
}

/// Draws and spark percentage for the skin gacha
pub fn calculate_skin_spark(crystals: i64) -> Result<SparkProgress, SparkError> {
    if crystals < 0 {
        return Err(SparkError::InvalidDraws("Crystals cannot be less than 0"));
    }
    Ok(SparkProgress {
        draws: crystals / CRYSTALS_PER_SKIN_DRAW,
        percentage: crystals as f64 / CRYSTALS_PER_SKIN_SPARK as f64 * 100.0,
    })
}

/// Sentence describing how close the player is to their next spark
pub fn describe_progress(progress: &SparkProgress) -> String {
    let remainder = progress.percentage % 100.0;
    match progress.sparks() {
        0 => format!(" You are {:.2}% closer to your next spark.", progress.percentage),
        1 => format!(
            " You have one spark and you're {:.2}% closer to a spark after.",
            remainder
        ),
        n => format!(
            " You have {} sparks and you're {:.2}% closer to a spark after.",
            n, remainder
        ),
    }
}

/// Maybe pick an encouraging line; always once a spark is reached
pub fn encouragement<R: Rng + ?Sized>(progress: &SparkProgress, rng: &mut R) -> Option<&'static str> {
    if rng.gen_range(1..=100) <= ENCOURAGEMENT_CHANCE || progress.percentage >= 100.0 {
        ENCOURAGEMENTS.choose(rng).copied()
    } else {
        None
    }
}

/// Full reply for the spark command
pub fn spark_message<R: Rng + ?Sized>(
    name: &str,
    crystals: i64,
    tens: i64,
    singles: i64,
    progress: &SparkProgress,
    rng: &mut R,
) -> String {
    let mut msg = format!("{},", name);
    msg += &format!(" you have {} crystal{},", crystals, plural_suffix(crystals));
    msg += &format!(" {} ten-draw ticket{},", tens, plural_suffix(tens));
    msg += &format!(" and {} single-draw ticket{}.", singles, plural_suffix(singles));
    msg += &format!(" You have **{} roll{}**.", progress.draws, plural_suffix(progress.draws));
    msg += &describe_progress(progress);
    if let Some(line) = encouragement(progress, rng) {
        msg += &format!(" {}", line);
    }
    if crystals == 0 && tens == 0 && singles == 0 {
        msg += "\n If you're not sure how this command works, check the help on \"sparkcalc\".";
    }
    msg
}

/// Full reply for the skin spark command
pub fn skin_spark_message<R: Rng + ?Sized>(
    name: &str,
    crystals: i64,
    progress: &SparkProgress,
    rng: &mut R,
) -> String {
    let mut msg = format!("{},", name);
    msg += &format!(" you have {} crystal{}.", crystals, plural_suffix(crystals));
    msg += &format!(" You have **{} roll{}**.", progress.draws, plural_suffix(progress.draws));
    msg += &describe_progress(progress);
    if let Some(line) = encouragement(progress, rng) {
        msg += &format!(" {}", line);
    }
    if crystals == 0 {
        msg += "\n If you're not sure how this command works, check the help on \"sparkcalc\".";
    }
    msg
}

#[cfg(test)]
#[path = "spark_test.rs"]
mod tests;
