//! Snapshot files for a [`Game`].
//!
//! A snapshot is an 8-byte magic marker, a little-endian `u16` format
//! version and the bincode encoding of the whole game graph. Decoding
//! rejects foreign files, unknown versions, truncated data, trailing bytes
//! and graphs that break engine invariants.

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bincode::Options;

use crate::core::{Game, GameError, IdGenerator};

pub const MAGIC: &[u8; 8] = b"NAVLBTL\0";
pub const FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = MAGIC.len() + 2;
const MAX_SNAPSHOT_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug)]
pub enum PersistError {
    /// The location is empty or blank.
    InvalidArgument(String),
    /// Nothing exists at the location.
    NotFound(PathBuf),
    /// The bytes are not a well-formed snapshot.
    CorruptFormat(String),
    /// The underlying read or write failed.
    Io(io::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::InvalidArgument(msg) => write!(f, "Invalid save location: {}", msg),
            PersistError::NotFound(path) => write!(f, "No saved game at {}", path.display()),
            PersistError::CorruptFormat(msg) => write!(f, "Corrupt save file: {}", msg),
            PersistError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<GameError> for PersistError {
    fn from(err: GameError) -> Self {
        PersistError::CorruptFormat(err.to_string())
    }
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_SNAPSHOT_BYTES)
        .reject_trailing_bytes()
}

/// Default location for a named save: `saves/<name>.save`.
pub fn default_save_path(name: &str) -> PathBuf {
    Path::new("saves").join(format!("{}.save", name))
}

/// Encode `game` into snapshot bytes.
pub fn encode(game: &Game) -> Result<Vec<u8>, PersistError> {
    let body = codec()
        .serialize(game)
        .map_err(|e| PersistError::CorruptFormat(e.to_string()))?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decode snapshot bytes and check the restored graph.
pub fn decode(bytes: &[u8]) -> Result<Game, PersistError> {
    if bytes.len() < HEADER_LEN {
        return Err(PersistError::CorruptFormat("file too short".into()));
    }
    let (header, body) = bytes.split_at(HEADER_LEN);
    if &header[..MAGIC.len()] != MAGIC {
        return Err(PersistError::CorruptFormat("not a naval battle save".into()));
    }
    let version = u16::from_le_bytes([header[MAGIC.len()], header[MAGIC.len() + 1]]);
    if version != FORMAT_VERSION {
        return Err(PersistError::CorruptFormat(format!(
            "unsupported format version {}",
            version
        )));
    }
    let game: Game = codec()
        .deserialize(body)
        .map_err(|e| PersistError::CorruptFormat(e.to_string()))?;
    game.check_integrity()?;
    Ok(game)
}

/// Write a snapshot of `game` to `path`, creating parent directories.
/// The file is written as `<name>.tmp` next to `path` and renamed over it.
pub fn save(game: &Game, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(PersistError::InvalidArgument("path is empty".into()));
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| PersistError::InvalidArgument(format!("{} names no file", path.display())))?;
    let bytes = encode(game)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // an existing save is replaced only once the new bytes are fully on disk
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    if let Err(e) = write_file(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    log::info!("saved game {} to {}", game.id(), path.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    out.write_all(bytes)?;
    out.flush()?;
    out.get_ref().sync_all()
}

/// Read a snapshot from `path`. On success `ids` is moved past every id
/// in the restored game.
pub fn load(path: impl AsRef<Path>, ids: &mut IdGenerator) -> Result<Game, PersistError> {
    let path = path.as_ref();
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(PersistError::InvalidArgument("path is empty".into()));
    }
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PersistError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let game = decode(&bytes)?;
    ids.reseed_from(&game);
    log::info!(
        "loaded game {} from {} ({})",
        game.id(),
        path.display(),
        game.phase()
    );
    Ok(game)
}

impl crate::core::Session {
    /// Snapshot the running game.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        save(self.game(), path)
    }

    /// Restore a session from a snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let mut ids = IdGenerator::new();
        let game = load(path, &mut ids)?;
        Ok(Self::with_ids(game, ids))
    }
}
