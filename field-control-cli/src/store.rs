use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use field_control_playoff as playoff;
use playoff::store::{Alliance, Match, MatchType, ScheduledBreak};
use playoff::{MemoryStore, Store};

use crate::Result;

/// An event store kept as a single JSON document on disk.
///
/// The whole document is loaded by [`open`] and only written back by [`save`].
///
/// [`open`]: Self::open
/// [`save`]: Self::save
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonStore {
    /// Loads the store at `path`. A missing file is treated as an empty store.
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_owned();

        let inner = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("Creating new event store at {}", path.display());
                MemoryStore::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self { path, inner })
    }

    /// Writes the store back to its file. The previous file is only replaced once the new
    /// document was written completely.
    pub fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");

        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, &self.inner)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.path)?;

        log::debug!("Saved event store to {}", self.path.display());
        Ok(())
    }

    #[inline]
    pub fn save_alliance(&mut self, alliance: Alliance) {
        self.inner.save_alliance(alliance);
    }
}

impl Store for JsonStore {
    #[inline]
    fn read_alliances(&self) -> playoff::Result<Vec<Alliance>> {
        self.inner.read_alliances()
    }

    #[inline]
    fn read_matches_by_type(&self, kind: MatchType) -> playoff::Result<Vec<Match>> {
        self.inner.read_matches_by_type(kind)
    }

    #[inline]
    fn read_scheduled_breaks_by_match_type(
        &self,
        kind: MatchType,
    ) -> playoff::Result<Vec<ScheduledBreak>> {
        self.inner.read_scheduled_breaks_by_match_type(kind)
    }

    #[inline]
    fn create_match(&mut self, r#match: Match) -> playoff::Result<Match> {
        self.inner.create_match(r#match)
    }

    #[inline]
    fn update_match(&mut self, r#match: &Match) -> playoff::Result<()> {
        self.inner.update_match(r#match)
    }

    #[inline]
    fn create_scheduled_break(
        &mut self,
        scheduled_break: ScheduledBreak,
    ) -> playoff::Result<ScheduledBreak> {
        self.inner.create_scheduled_break(scheduled_break)
    }
}
