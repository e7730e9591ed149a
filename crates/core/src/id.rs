//! Fallback id generation for records without a usable id.
//!
//! The normalizer takes an `&mut dyn IdGenerator` so callers choose between
//! random tokens, a counter, or content hashes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::record::RawRecord;

/// Alphabet for random tokens (lowercase base-36)
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of random tokens
const TOKEN_LEN: usize = 9;

/// Number of hex digits kept from a content hash
const HASH_PREFIX_LEN: usize = 12;

/// Produces ids for records whose id field is missing or falsy.
///
/// Implementations must never return an empty string.
pub trait IdGenerator {
    fn next_id(&mut self, record: &RawRecord) -> String;

    /// Called before each full recompute of the same record set.
    fn begin_pass(&mut self) {}
}

/// Random 9-character base-36 tokens. No uniqueness guarantee.
pub struct RandomIdGenerator {
    rng: StdRng,
}

impl RandomIdGenerator {
    /// Seed from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self, _record: &RawRecord) -> String {
        (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[self.rng.random_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }
}

/// Monotonic counter ids: `task-1`, `task-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("task-")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, _record: &RawRecord) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Ids derived from a SHA-256 of the record's canonical JSON.
///
/// Identical records get `-2`, `-3`... suffixes so ids stay distinct within
/// one generator.
#[derive(Debug, Clone, Default)]
pub struct ContentHashIdGenerator {
    seen: HashMap<String, usize>,
}

impl ContentHashIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for ContentHashIdGenerator {
    // Duplicate suffixes count within one pass, so a recompute reproduces
    // the same ids.
    fn begin_pass(&mut self) {
        self.seen.clear();
    }

    fn next_id(&mut self, record: &RawRecord) -> String {
        // serde_json::Map is key-ordered, so this encoding is canonical.
        let canonical = serde_json::to_string(record.as_map()).unwrap_or_default();
        let digest = Sha256::digest(canonical.as_bytes());
        let hash: String = digest
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
            .chars()
            .take(HASH_PREFIX_LEN)
            .collect();

        let count = self.seen.entry(hash.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            hash
        } else {
            format!("{}-{}", hash, count)
        }
    }
}

/// Id generation strategy, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Hash,
    Sequential,
    Random,
}

impl IdStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdStrategy::Hash => "hash",
            IdStrategy::Sequential => "sequential",
            IdStrategy::Random => "random",
        }
    }

    /// Build a fresh generator for this strategy.
    pub fn generator(&self) -> Box<dyn IdGenerator + Send> {
        match self {
            IdStrategy::Hash => Box::new(ContentHashIdGenerator::new()),
            IdStrategy::Sequential => Box::new(SequentialIdGenerator::default()),
            IdStrategy::Random => Box::new(RandomIdGenerator::new()),
        }
    }
}

impl std::fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(IdStrategy::Hash),
            "sequential" | "seq" => Ok(IdStrategy::Sequential),
            "random" => Ok(IdStrategy::Random),
            _ => Err(format!(
                "invalid id strategy '{}'. Valid values: hash, sequential, random",
                s
            )),
        }
    }
}
