use std::collections::HashMap;

/// A cached leaf evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry {
    pub key: u64,
    pub score: f64,
}

/// Fingerprint -> score memo for cutoff evaluations.
///
/// Unbounded and never invalidated: entries survive across moves and games
/// for the lifetime of the owning searcher. Keys carry board contents only,
/// so a table must not be shared between searchers that evaluate for
/// different symbols or with different evaluators.
#[derive(Default, Debug, Clone)]
pub struct Tt {
    map: HashMap<u64, f64>,
}

impl Tt {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: u64) -> Option<f64> { self.map.get(&key).copied() }

    pub fn put(&mut self, e: Entry) {
        self.map.insert(e.key, e.score);
    }

    pub fn len(&self) -> usize { self.map.len() }
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    pub fn clear(&mut self) { self.map.clear(); }

    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.map.iter().map(|(&key, &score)| Entry { key, score })
    }
}

impl FromIterator<Entry> for Tt {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut tt = Tt::new();
        for e in iter { tt.put(e); }
        tt
    }
}
