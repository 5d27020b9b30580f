//! CSV loader for the flat per-player extract.
//!
//! One row per participant per game, in the column layout of the public
//! match-data exports: `gameid`, `date`, `game`, `participantid`,
//! `playername`, `teamname`, and per-row statistics. Unknown columns are
//! ignored; blank or unreadable statistics load as absent.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::adapter::outbound::timestamp::parse_timestamp;
use crate::domain::{GameHeader, ParticipantRow};
use crate::error::Result;
use crate::port::outbound::source::{FlatExtract, ResultSource};

/// One raw CSV record.
#[derive(Debug, Deserialize)]
struct ExtractRecord {
    #[serde(default)]
    gameid: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    game: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    participantid: Option<u32>,
    #[serde(default)]
    playername: Option<String>,
    #[serde(default)]
    teamname: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    kills: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    deaths: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    assists: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    dragons: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    barons: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    towers: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    inhibitors: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    gamelength: Option<u32>,
}

/// Non-negative whole count from text such as `"4"`, `"4.0"` or `""`.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.as_deref().and_then(parse_count))
}

fn parse_count(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(value) = text.parse::<u32>() {
        return Some(value);
    }
    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(value as u32)
    } else {
        None
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl ExtractRecord {
    fn into_row(self) -> Option<ParticipantRow> {
        let played_at = self.date.as_deref().and_then(parse_timestamp)?;
        Some(ParticipantRow {
            game_id: non_blank(self.gameid)?,
            played_at,
            ordinal: u8::try_from(self.game?).ok()?,
            participant_id: u16::try_from(self.participantid?).ok()?,
            team: non_blank(self.teamname)?,
            player: non_blank(self.playername),
            kills: self.kills,
            deaths: self.deaths,
            assists: self.assists,
            dragons: self.dragons,
            barons: self.barons,
            towers: self.towers,
            inhibitors: self.inhibitors,
            game_length: self.gamelength,
        })
    }
}

/// [`FlatExtract`] loaded from a CSV file into memory.
#[derive(Debug)]
pub struct CsvExtract {
    path: PathBuf,
    rows: Vec<ParticipantRow>,
}

impl CsvExtract {
    /// Load every usable row of the file.
    ///
    /// A missing file loads as an empty extract so totals settlement can
    /// still run; rows without a game id, date, ordinal, participant or
    /// team are skipped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read as CSV.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            warn!(path = %path.display(), "Player extract not found, player markets stay pending");
            return Ok(Self {
                path,
                rows: Vec::new(),
            });
        }

        let mut reader = ::csv::ReaderBuilder::new()
            .flexible(true)
            .trim(::csv::Trim::Headers)
            .from_path(&path)?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for record in reader.deserialize::<ExtractRecord>() {
            match record?.into_row() {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(path = %path.display(), skipped, "Skipped incomplete extract rows");
        }
        info!(path = %path.display(), rows = rows.len(), "Loaded player extract");
        Ok(Self { path, rows })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ResultSource for CsvExtract {
    fn source_name(&self) -> &str {
        "extract"
    }
}

impl FlatExtract for CsvExtract {
    fn team_games_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<GameHeader>> {
        Ok(GameHeader::from_rows(self.rows.iter().filter(|row| {
            let day = row.played_at.date();
            day >= from && day <= to
        })))
    }

    fn rows_for_games(&self, game_ids: &[String]) -> Result<Vec<ParticipantRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| game_ids.contains(&row.game_id))
            .cloned()
            .collect())
    }
}
