//! JSON file game store
//!
//! The file is the only copy of the tables. Every call reloads it while
//! holding an advisory lock on a sidecar `.lock` file, shared for reads and
//! exclusive for writes, so handles in one process or several see each
//! other's writes. A mutation is applied to the freshly loaded tables and
//! written to a temp file that is renamed over the store; a failed write
//! leaves the file as it was.

use super::tables::Tables;
use super::{GameStore, StoreError};
use crate::core::Word;
use crate::game::{Guess, Outcome, Session, SessionId, UserId};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Store persisted as a single JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`, creating it with `dictionary` if missing
    ///
    /// The dictionary only seeds a new file; an existing file keeps its own.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed,
    /// or if a new file cannot be written.
    #[instrument(skip(path, dictionary), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, dictionary: Vec<Word>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let lock_path = path.with_extension("json.lock");

        let _lock = FileLock::exclusive(&lock_path)?;
        match load(&path) {
            Ok(_) => info!("Loaded game store"),
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!(words = dictionary.len(), "Creating new game store");
                write_snapshot(&path, &Tables::with_dictionary(dictionary))?;
            }
            Err(e) => return Err(e),
        }

        Ok(Self { path, lock_path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Answer `query` from the current file contents
    fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        let _lock = FileLock::shared(&self.lock_path)?;
        Ok(query(&load(&self.path)?))
    }

    /// Reload, apply `change`, persist
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _lock = FileLock::exclusive(&self.lock_path)?;
        let mut tables = load(&self.path)?;
        let value = change(&mut tables)?;
        if let Err(e) = write_snapshot(&self.path, &tables) {
            warn!(path = %self.path.display(), error = %e, "Snapshot write failed");
            return Err(e);
        }
        Ok(value)
    }
}

/// Advisory lock on the store's sidecar file, released when dropped
struct FileLock {
    _file: File,
}

impl FileLock {
    fn shared(path: &Path) -> Result<Self, StoreError> {
        let file = open_lock_file(path)?;
        FileExt::lock_shared(&file)?;
        Ok(Self { _file: file })
    }

    fn exclusive(path: &Path) -> Result<Self, StoreError> {
        let file = open_lock_file(path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self { _file: file })
    }
}

fn open_lock_file(path: &Path) -> io::Result<File> {
    // Never removed: another process may be waiting on this inode
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}

fn load(path: &Path) -> Result<Tables, StoreError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_snapshot(path: &Path, tables: &Tables) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = File::create(&tmp)?;
        serde_json::to_writer_pretty(&mut file, tables)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "Snapshot written");
    Ok(())
}

impl GameStore for JsonFileStore {
    #[instrument(skip(self))]
    fn create_session(
        &self,
        owner: &UserId,
        secret: &Word,
        date: NaiveDate,
    ) -> Result<SessionId, StoreError> {
        self.mutate(|tables| tables.create_session(owner, secret, date))
    }

    fn get_session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        self.read(|tables| tables.get(id).cloned())
    }

    fn get_active_session(
        &self,
        owner: &UserId,
        date: NaiveDate,
    ) -> Result<Option<Session>, StoreError> {
        self.read(|tables| tables.active(owner, date).cloned())
    }

    #[instrument(skip(self, guess), fields(guess = %guess.word))]
    fn append_guess(&self, id: SessionId, guess: &Guess) -> Result<(), StoreError> {
        self.mutate(|tables| tables.append_guess(id, guess))
    }

    #[instrument(skip(self))]
    fn set_outcome(&self, id: SessionId, outcome: Outcome) -> Result<(), StoreError> {
        self.mutate(|tables| tables.set_outcome(id, outcome))
    }

    #[instrument(skip(self, guess), fields(guess = %guess.word))]
    fn record_guess(
        &self,
        id: SessionId,
        guess: &Guess,
        outcome: Outcome,
    ) -> Result<(), StoreError> {
        self.mutate(|tables| tables.record_guess(id, guess, outcome))
    }

    fn count_terminal_sessions(
        &self,
        owner: &UserId,
        date: NaiveDate,
    ) -> Result<usize, StoreError> {
        self.read(|tables| tables.count_terminal(owner, date))
    }

    fn sessions_for(&self, owner: &UserId, date: NaiveDate) -> Result<Vec<Session>, StoreError> {
        self.read(|tables| tables.sessions_for(owner, date))
    }

    fn get_dictionary(&self) -> Result<Vec<Word>, StoreError> {
        self.read(|tables| tables.dictionary().to_vec())
    }
}
