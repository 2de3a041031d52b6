use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    EngineError,
    config::EngineConfig,
    core::{Piece, Shape},
};

/// Minimum number of pieces kept in the queue: the active one and a preview.
const MIN_QUEUED: usize = 2;

/// Ordered queue of pieces fed by the 7-bag randomizer.
///
/// The front of the queue is the active piece; the one after it is shown as
/// the next piece. Whenever fewer than two pieces remain, a freshly shuffled
/// permutation of all seven shapes is appended, so every consecutive group of
/// seven pieces (counted from the start) contains each shape exactly once.
///
/// # Example
///
/// ```
/// use tetros_engine::{EngineConfig, PieceQueue};
///
/// let config = EngineConfig::default();
/// let mut queue = PieceQueue::new(&config);
///
/// let first = queue.pop_active().unwrap();
/// queue.replenish(&config);
/// assert!(queue.len() >= 2);
/// assert_eq!(first.cells().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    pieces: VecDeque<Piece>,
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the PCG generator that shuffles each bag. The same
/// seed always yields the same piece sequence. Seeds are written as 32
/// lowercase hex characters, both by [`Display`](fmt::Display) and by serde.
///
/// # Example
///
/// ```
/// use tetros_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789ABCDEF0123456789abcdef".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdef0123456789abcdef");
/// assert!("xyz".parse::<PieceSeed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

/// A seed string that is not 32 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceSeedParseError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {input}")]
    InvalidDigit { input: String },
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = PieceSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(PieceSeedParseError::InvalidLength { len: s.len() });
        }
        // `from_str_radix` would also accept a leading sign.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PieceSeedParseError::InvalidDigit {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| PieceSeedParseError::InvalidDigit {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed::from_bytes(seed)
    }
}

impl PieceQueue {
    /// Creates a filled queue with a random seed.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(config: &EngineConfig, seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.to_bytes()),
            pieces: VecDeque::with_capacity(Shape::LEN + MIN_QUEUED),
        };
        this.replenish(config);
        this
    }

    /// Appends shuffled bags until at least two pieces are queued.
    pub fn replenish(&mut self, config: &EngineConfig) {
        while self.pieces.len() < MIN_QUEUED {
            let mut bag = Shape::ALL;
            bag.shuffle(&mut self.rng);
            self.pieces
                .extend(bag.into_iter().map(|shape| Piece::spawn(shape, config)));
        }
    }

    /// Drops every queued piece and refills from the same generator.
    pub fn reset(&mut self, config: &EngineConfig) {
        self.pieces.clear();
        self.replenish(config);
    }

    pub fn active(&self) -> Result<&Piece, EngineError> {
        self.pieces.front().ok_or(EngineError::EmptyQueue)
    }

    pub fn active_mut(&mut self) -> Result<&mut Piece, EngineError> {
        self.pieces.front_mut().ok_or(EngineError::EmptyQueue)
    }

    /// Removes the active piece from the front of the queue.
    ///
    /// The queue is not refilled; call [`Self::replenish`] afterwards.
    pub fn pop_active(&mut self) -> Result<Piece, EngineError> {
        self.pieces.pop_front().ok_or(EngineError::EmptyQueue)
    }

    /// The piece that becomes active after the current one locks.
    #[must_use]
    pub fn upcoming(&self) -> Option<&Piece> {
        self.pieces.get(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
