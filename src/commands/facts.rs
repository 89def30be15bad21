// Fact sources for the song/tweyen command

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// HTTP-style status for a fact that was found
pub const STATUS_OK: u16 = 200;
/// HTTP-style status when the source has nothing to give
pub const STATUS_NOT_FOUND: u16 = 404;

/// A fetched fact with the status the source reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactResponse {
    pub status: u16,
    pub text: String,
}

/// Error types for fact fetching
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactError {
    #[error("Fact source unavailable: {0}")]
    Unavailable(String),
}

/// Where the fact command gets its raw text.
///
/// Statuses of 400 and above are treated as a failed upstream.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self) -> Result<FactResponse, FactError>;
}

/// Reads facts from a text file, one per line, and picks one at random
#[derive(Debug)]
pub struct FileFactSource {
    path: PathBuf,
    rng: Mutex<ChaCha8Rng>,
}

impl FileFactSource {
    /// A seed makes the sequence of picked facts reproducible
    pub fn new(path: PathBuf, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            path,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl FactSource for FileFactSource {
    async fn fetch_fact(&self) -> Result<FactResponse, FactError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FactError::Unavailable(format!("{:?}: {}", self.path, e)))?;

        let facts: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let picked = facts.choose(&mut *self.rng.lock()).copied();
        Ok(match picked {
            Some(fact) => FactResponse {
                status: STATUS_OK,
                text: fact.to_string(),
            },
            None => FactResponse {
                status: STATUS_NOT_FOUND,
                text: String::new(),
            },
        })
    }
}
