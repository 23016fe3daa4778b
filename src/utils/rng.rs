use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Deterministic per-stream random numbers derived from one master seed.
///
/// Each aircraft draws from its own named stream so the spawn spread and
/// training resets of one aircraft never shift the sequence of another.
#[derive(Resource, Debug, Clone)]
pub struct RngManager {
    master_seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master_seed: seed,
            streams: HashMap::new(),
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Fresh RNG for a name, hashed together with the master seed.
    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }

    /// Persistent stream for a name; advances between calls.
    pub fn stream(&mut self, name: &str) -> &mut ChaCha8Rng {
        let seeded = self.get_rng(name);
        self.streams.entry(name.to_string()).or_insert(seeded)
    }

    /// Placement stream owned by one aircraft.
    pub fn aircraft_stream(&mut self, handle: usize) -> &mut ChaCha8Rng {
        self.stream(&format!("placement_{handle}"))
    }
}
