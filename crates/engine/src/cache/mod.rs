//! Set-Associative Cache Store.
//!
//! This module holds the cache contents for the simulator. The store owns a
//! fixed table of sets, each holding `ways` lines; lines record validity, the
//! block tag, the address that loaded them, and an age counter used by the
//! replacement policy.
//!
//! The store itself is policy-free: the simulation loop asks a
//! [`ReplacementPolicy`](policies::ReplacementPolicy) for a victim and then
//! calls [`Cache::load`].

/// Cache geometry and the address codec.
pub mod geometry;

/// Cache replacement policy implementations.
pub mod policies;

pub use self::geometry::Geometry;

use serde::Serialize;
use tracing::info;

use crate::common::SimError;
use crate::config::CacheConfig;

/// One storage slot within a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// Address of the access that loaded the block.
    pub addr: u64,
    /// Simulated accesses since the line was last loaded.
    pub age: u64,
}

/// A group of `ways` lines sharing one index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheSet {
    index: usize,
    lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if the line table cannot be reserved.
    pub fn new(index: usize, ways: usize) -> Result<Self, SimError> {
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(ways)
            .map_err(|source| SimError::Allocation {
                what: "cache lines",
                count: ways,
                source,
            })?;
        lines.resize(ways, CacheLine::default());
        Ok(Self { index, lines })
    }

    /// Position of this set in the cache.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Lines of the set in way order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Returns the first valid way holding `tag`.
    pub fn lookup(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Fills `way` with a block, resetting its age.
    ///
    /// # Panics
    ///
    /// Panics if `way` is not below the associativity.
    pub fn load(&mut self, way: usize, tag: u64, addr: u64) {
        self.lines[way] = CacheLine {
            valid: true,
            tag,
            addr,
            age: 0,
        };
    }

    /// Ages every line in the set by one access.
    pub fn tick(&mut self) {
        for line in &mut self.lines {
            line.age = line.age.saturating_add(1);
        }
    }
}

/// The full cache: geometry plus every set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cache {
    geometry: Geometry,
    sets: Vec<CacheSet>,
}

impl Cache {
    /// Creates an empty cache with the given geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if the set or line tables cannot be
    /// reserved.
    pub fn new(geometry: Geometry) -> Result<Self, SimError> {
        let count = geometry.sets();
        let mut sets = Vec::new();
        sets.try_reserve_exact(count)
            .map_err(|source| SimError::Allocation {
                what: "cache sets",
                count,
                source,
            })?;
        for index in 0..count {
            sets.push(CacheSet::new(index, geometry.ways())?);
        }

        info!(
            size = geometry.size_bytes(),
            line = geometry.line_bytes(),
            ways = geometry.ways(),
            sets = geometry.sets(),
            "cache constructed"
        );

        Ok(Self { geometry, sets })
    }

    /// Validates `config` and creates an empty cache from it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] for unrepresentable shapes and
    /// [`SimError::Allocation`] if storage cannot be reserved.
    pub fn from_config(config: &CacheConfig) -> Result<Self, SimError> {
        Self::new(Geometry::new(config)?)
    }

    /// The cache geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// All sets in index order.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// The set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Looks up `tag` in the set at `index`.
    ///
    /// # Returns
    ///
    /// The way of the first valid line whose tag matches, or `None` on a miss
    /// (including an out-of-range index).
    pub fn lookup(&self, index: usize, tag: u64) -> Option<usize> {
        self.sets.get(index).and_then(|set| set.lookup(tag))
    }

    /// Loads a block into `way` of the set at `index`.
    ///
    /// Overwrites whatever the line held; the model has no dirty state to
    /// write back.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `way` is outside the geometry.
    pub fn load(&mut self, index: usize, way: usize, tag: u64, addr: u64) {
        self.sets[index].load(way, tag, addr);
    }

    /// Ages every line in every set by one access.
    pub fn tick(&mut self) {
        for set in &mut self.sets {
            set.tick();
        }
    }
}
