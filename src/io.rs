//! Saving and restoring a player's zobrist table and evaluation cache.
//!
//! Blobs are little-endian and magic-prefixed:
//!
//! ```text
//! cache  "<sym>_tt":      b"REVTT001" u8 symbol  u8 evaluator  u64 count  count x (u64 key, f64 score)
//! table  "<sym>_zobrist": b"REVZB001" u32 size   size*size*2 x u64
//! ```
//!
//! Loading never fails outward: a missing blob means "start fresh", and a
//! corrupt or mismatched one is logged and treated the same way.

use crate::board::reversi::MAX_SIZE;
use crate::board::Symbol;
use crate::search::eval::Evaluator;
use crate::search::tt::{Entry, Tt};
use crate::search::zobrist::ZobristTable;
use anyhow::{bail, Context, Result};
use log::warn;
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

pub const TT_MAGIC: &[u8; 8] = b"REVTT001";
pub const ZOBRIST_MAGIC: &[u8; 8] = b"REVZB001";
const TT_RECORD_SIZE: usize = 8 + 8;

/// Key-value blob storage injected into searchers for persistence.
pub trait BlobStore {
    /// `Ok(None)` when nothing has been stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// One `<key>.bin` file per blob inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self { Self { dir: dir.as_ref().to_path_buf() } }
    fn path(&self, key: &str) -> PathBuf { self.dir.join(format!("{key}.bin")) }
}

impl BlobStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        let mut f = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("open blob: {}", path.display())),
        };
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes).with_context(|| format!("read blob: {}", path.display()))?;
        Ok(Some(bytes))
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        create_dir_all(&self.dir).with_context(|| format!("create store dir: {}", self.dir.display()))?;
        let path = self.path(key);
        let mut w = BufWriter::new(File::create(&path).with_context(|| format!("create blob: {}", path.display()))?);
        w.write_all(bytes)?;
        w.flush()?;
        Ok(())
    }
}

/// In-process store, mostly for tests and short-lived runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.blobs.len() }
    pub fn is_empty(&self) -> bool { self.blobs.is_empty() }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> { Ok(self.blobs.get(key).cloned()) }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

pub fn tt_key(symbol: Symbol) -> String { format!("{symbol}_tt") }
pub fn zobrist_key(symbol: Symbol) -> String { format!("{symbol}_zobrist") }

pub fn encode_tt(symbol: Symbol, evaluator: Evaluator, tt: &Tt) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + 2 + 8 + tt.len() * TT_RECORD_SIZE);
    buf.extend_from_slice(TT_MAGIC);
    buf.push(symbol.index() as u8);
    buf.push(evaluator.tag());
    buf.extend_from_slice(&(tt.len() as u64).to_le_bytes());
    for e in tt.entries() {
        buf.extend_from_slice(&e.key.to_le_bytes());
        buf.extend_from_slice(&e.score.to_le_bytes());
    }
    buf
}

/// Decode a cache blob, rejecting one written for another symbol or evaluator.
pub fn decode_tt(bytes: &[u8], symbol: Symbol, evaluator: Evaluator) -> Result<Tt> {
    let mut r = bytes;
    let mut magic = [0u8; 8];
    r.read_exact(&mut magic).context("read magic")?;
    if &magic != TT_MAGIC { bail!("bad cache magic"); }
    let mut b1 = [0u8; 1];
    r.read_exact(&mut b1).context("read symbol")?;
    let stored_symbol = Symbol::from_index(b1[0]).context("unknown symbol tag")?;
    r.read_exact(&mut b1).context("read evaluator")?;
    let stored_eval = b1[0];
    if stored_symbol != symbol || stored_eval != evaluator.tag() {
        bail!("cache was written for {stored_symbol} with evaluator tag {stored_eval}, expected {symbol}/{evaluator}");
    }
    let mut b8 = [0u8; 8];
    r.read_exact(&mut b8).context("read count")?;
    let count = u64::from_le_bytes(b8) as usize;
    if r.len() != count.saturating_mul(TT_RECORD_SIZE) {
        bail!("cache holds {} bytes of records, expected {} entries", r.len(), count);
    }
    let mut tt = Tt::new();
    for _ in 0..count {
        r.read_exact(&mut b8).context("read key")?;
        let key = u64::from_le_bytes(b8);
        r.read_exact(&mut b8).context("read score")?;
        let score = f64::from_le_bytes(b8);
        tt.put(Entry { key, score });
    }
    Ok(tt)
}

pub fn encode_zobrist(table: &ZobristTable) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + 4 + table.keys().len() * 8);
    buf.extend_from_slice(ZOBRIST_MAGIC);
    buf.extend_from_slice(&(table.size() as u32).to_le_bytes());
    for k in table.keys() { buf.extend_from_slice(&k.to_le_bytes()); }
    buf
}

pub fn decode_zobrist(bytes: &[u8]) -> Result<ZobristTable> {
    let mut r = bytes;
    let mut magic = [0u8; 8];
    r.read_exact(&mut magic).context("read magic")?;
    if &magic != ZOBRIST_MAGIC { bail!("bad zobrist magic"); }
    let mut b4 = [0u8; 4];
    r.read_exact(&mut b4).context("read size")?;
    let size = u32::from_le_bytes(b4) as usize;
    if size == 0 || size > MAX_SIZE { bail!("zobrist blob for unsupported board size {size}"); }
    let expected = size * size * 2;
    if r.len() != expected * 8 { bail!("zobrist blob has {} key bytes, expected {}", r.len(), expected * 8); }
    let mut keys = Vec::with_capacity(expected);
    let mut b8 = [0u8; 8];
    for _ in 0..expected {
        r.read_exact(&mut b8).context("read key")?;
        keys.push(u64::from_le_bytes(b8));
    }
    ZobristTable::from_keys(size, keys).context("zobrist key count mismatch")
}

pub fn save_tt(store: &mut dyn BlobStore, symbol: Symbol, evaluator: Evaluator, tt: &Tt) -> Result<()> {
    store.save(&tt_key(symbol), &encode_tt(symbol, evaluator, tt)).context("save cache")
}

pub fn save_zobrist(store: &mut dyn BlobStore, symbol: Symbol, table: &ZobristTable) -> Result<()> {
    store.save(&zobrist_key(symbol), &encode_zobrist(table)).context("save zobrist table")
}

/// `None` when absent or unreadable; the caller starts from an empty cache.
pub fn load_tt(store: &dyn BlobStore, symbol: Symbol, evaluator: Evaluator) -> Option<Tt> {
    let key = tt_key(symbol);
    match store.load(&key) {
        Ok(Some(bytes)) => match decode_tt(&bytes, symbol, evaluator) {
            Ok(tt) => Some(tt),
            Err(e) => {
                warn!("ignoring cache blob {key}: {e:#}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("could not load cache blob {key}: {e:#}");
            None
        }
    }
}

/// `None` when absent or unreadable; the caller generates a fresh table.
pub fn load_zobrist(store: &dyn BlobStore, symbol: Symbol) -> Option<ZobristTable> {
    let key = zobrist_key(symbol);
    match store.load(&key) {
        Ok(Some(bytes)) => match decode_zobrist(&bytes) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("ignoring zobrist blob {key}: {e:#}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("could not load zobrist blob {key}: {e:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_cache_is_rejected() {
        let tt: Tt = [Entry { key: 1, score: 2.5 }, Entry { key: 9, score: -1.0 }].into_iter().collect();
        let bytes = encode_tt(Symbol::X, Evaluator::Combined, &tt);
        assert!(decode_tt(&bytes, Symbol::X, Evaluator::Combined).is_ok());
        assert!(decode_tt(&bytes[..bytes.len() - 3], Symbol::X, Evaluator::Combined).is_err());
    }

    #[test]
    fn mismatched_owner_is_rejected() {
        let tt: Tt = [Entry { key: 1, score: 2.5 }].into_iter().collect();
        let bytes = encode_tt(Symbol::X, Evaluator::Combined, &tt);
        assert!(decode_tt(&bytes, Symbol::O, Evaluator::Combined).is_err());
        assert!(decode_tt(&bytes, Symbol::X, Evaluator::Corner).is_err());
    }

    #[test]
    fn corrupt_blobs_load_as_none() {
        let mut store = MemoryStore::new();
        store.save(&tt_key(Symbol::O), b"garbage").unwrap();
        store.save(&zobrist_key(Symbol::O), b"REVZB001\x08\x00").unwrap();
        assert!(load_tt(&store, Symbol::O, Evaluator::Combined).is_none());
        assert!(load_zobrist(&store, Symbol::O).is_none());
    }
}
