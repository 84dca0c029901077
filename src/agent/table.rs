//! Storage for learned action values.
//!
//! The table maps an encoded state to one value per card-type action. Entries
//! come into existence lazily through `get_or_insert_default` the first time
//! a state is observed, and the table never shrinks. Checkpoints are JSON
//! with string-rendered state keys so any tool can inspect them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::game::encoding::EncodedState;
use crate::game::NUM_CARD_TYPES;

/// Number of action slots per state: one per card-type index.
pub const NUM_ACTIONS: usize = NUM_CARD_TYPES;

/// The learned mapping from encoded state to per-action values.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: FxHashMap<EncodedState, [f64; NUM_ACTIONS]>,
}

impl QTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity.
    ///
    /// Use this when resuming training with an estimate of how many states
    /// the run will visit, to avoid rehashing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Get the value vector for a state, inserting an all-zero vector if the
    /// state has never been observed.
    ///
    /// This is the only way entries are created; lookups elsewhere never
    /// insert implicitly.
    pub fn get_or_insert_default(&mut self, state: EncodedState) -> &mut [f64; NUM_ACTIONS] {
        self.values.entry(state).or_insert([0.0; NUM_ACTIONS])
    }

    /// Get the value vector for a state, if present.
    pub fn get(&self, state: &EncodedState) -> Option<&[f64; NUM_ACTIONS]> {
        self.values.get(state)
    }

    /// Number of states observed so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has observed no states.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Export the table to its serializable checkpoint format.
    pub fn export(&self) -> TableExport {
        let mut values = FxHashMap::default();
        for (state, vector) in &self.values {
            values.insert(state.key(), vector.to_vec());
        }
        TableExport {
            saved_at: unix_timestamp(),
            num_states: self.values.len(),
            values,
        }
    }

    /// Rebuild a table from a checkpoint export.
    ///
    /// Malformed keys and short value vectors are tolerated: bad keys are
    /// skipped and short vectors are zero-padded, so a partially damaged
    /// checkpoint still loads what it can.
    pub fn import(data: TableExport) -> Self {
        let mut values = FxHashMap::default();
        for (key, vector) in data.values {
            if let Some(state) = EncodedState::from_key(&key) {
                let mut slots = [0.0; NUM_ACTIONS];
                for (slot, value) in slots.iter_mut().zip(vector) {
                    *slot = value;
                }
                values.insert(state, slots);
            }
        }
        Self { values }
    }

    /// Save the table as JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string(&self.export())?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }

    /// Load a table from a JSON checkpoint.
    pub fn load_json<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let data: TableExport = serde_json::from_str(&json)?;
        Ok(Self::import(data))
    }

    /// Load a table, substituting an empty one if the file is missing or
    /// unreadable. Callers that want to report the failure use
    /// [`QTable::load_json`] instead.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        Self::load_json(path).unwrap_or_default()
    }
}

/// Serializable checkpoint format for a [`QTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableExport {
    /// Unix seconds at export time.
    pub saved_at: String,
    /// Number of states exported.
    pub num_states: usize,
    /// Per-state action values, keyed by the state's string rendering.
    pub values: FxHashMap<String, Vec<f64>>,
}

/// Simple timestamp without external dependencies.
fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", duration.as_secs())
}
