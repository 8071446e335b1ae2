//! Station table: the mapping from station name to running statistics

use hashbrown::HashMap;
use hashbrown::hash_map::EntryRef;

use crate::app::models::{Observation, StationStats};

/// Mapping from station name to its running statistics
///
/// Entries are created on first sight of a station and updated in place
/// afterwards; nothing is ever removed individually.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    stations: HashMap<String, StationStats>,
}

impl StationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table sized for `capacity` stations
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stations: HashMap::with_capacity(capacity),
        }
    }

    /// Fold one value into the entry for `station`, creating it if needed
    ///
    /// Existing stations are found without allocating; the name is copied
    /// only when a new entry is inserted.
    #[inline]
    pub fn upsert(&mut self, station: &str, value: f32) {
        match self.stations.entry_ref(station) {
            EntryRef::Occupied(mut entry) => entry.get_mut().record(value),
            EntryRef::Vacant(entry) => {
                entry.insert(StationStats::new(value));
            }
        }
    }

    /// Fold a parsed observation into the table
    #[inline]
    pub fn record(&mut self, observation: &Observation<'_>) {
        self.upsert(observation.station, observation.value);
    }

    /// Statistics for one station
    pub fn get(&self, station: &str) -> Option<&StationStats> {
        self.stations.get(station)
    }

    /// Number of distinct stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when no observation has been recorded
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Iterate over entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StationStats)> {
        self.stations.iter().map(|(name, stats)| (name.as_str(), stats))
    }
}

impl<'a> Extend<Observation<'a>> for StationTable {
    fn extend<I: IntoIterator<Item = Observation<'a>>>(&mut self, observations: I) {
        for observation in observations {
            self.record(&observation);
        }
    }
}

impl<'a> FromIterator<Observation<'a>> for StationTable {
    fn from_iter<I: IntoIterator<Item = Observation<'a>>>(observations: I) -> Self {
        let mut table = StationTable::new();
        table.extend(observations);
        table
    }
}
