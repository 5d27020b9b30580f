use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use riftbet::adapter::outbound::sqlite::database::connection::{
    create_pool, run_bets_migrations, run_history_migrations,
};
use riftbet::adapter::outbound::sqlite::{SqliteMapResultStore, SqliteWagerStore};
use riftbet::domain::{EventId, EventInfo, MapIndex, Wager, WagerId};
use riftbet::infrastructure::config::settings::Config;
use riftbet::testkit::config::config_toml_with;
use tempfile::TempDir;

/// Column order of the flat extract fixtures.
pub const EXTRACT_HEADER: &str = "gameid,datacompleteness,league,date,game,participantid,side,position,playername,teamname,kills,deaths,assists,dragons,barons,towers,inhibitors,gamelength";

/// Temporary wager database, history database and extract for one test.
pub struct TempDb {
    dir: TempDir,
    wagers: SqliteWagerStore,
    history: SqliteMapResultStore,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");

        let bets = create_pool(&path_str(&dir.path().join("bets.db"))).expect("create bets pool");
        run_bets_migrations(&bets).expect("run bets migrations");
        let history =
            create_pool(&path_str(&dir.path().join("history.db"))).expect("create history pool");
        run_history_migrations(&history).expect("run history migrations");

        Self {
            dir,
            wagers: SqliteWagerStore::new(bets),
            history: SqliteMapResultStore::new(history),
        }
    }

    pub fn wagers(&self) -> &SqliteWagerStore {
        &self.wagers
    }

    pub fn bets_path(&self) -> PathBuf {
        self.dir.path().join("bets.db")
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.path().join("history.db")
    }

    pub fn extract_path(&self) -> PathBuf {
        self.dir.path().join("players.csv")
    }

    /// Seed an event scheduled at `at` (`%Y-%m-%d %H:%M:%S`).
    pub fn event(&self, id: &str, home: &str, away: &str, at: &str) {
        let scheduled = NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").expect("timestamp");
        self.wagers
            .insert_event(&EventInfo::new(id, home, away, Some(scheduled)))
            .expect("insert event");
    }

    /// Seed an open wager and return its assigned id.
    pub fn wager(&self, event: &str, market: &str, selection: &str, line: &str, odds: rust_decimal::Decimal) -> WagerId {
        self.wagers
            .insert_wager(&Wager::new(WagerId::new(0), event, market, selection, line, odds))
            .expect("insert wager")
    }

    /// Seed concluded counters for one map as `(stat, home, away)`.
    pub fn map_result(&self, event: &str, teams: (&str, &str), map: i64, counters: &[(&str, &str, &str)]) {
        self.history
            .insert_map(
                &EventId::new(event),
                teams,
                MapIndex::new(map).expect("map index"),
                counters,
            )
            .expect("insert map");
    }

    /// Write the flat extract with the standard header.
    pub fn extract(&self, rows: &[&str]) {
        let mut content = String::from(EXTRACT_HEADER);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(self.extract_path(), content).expect("write extract");
    }

    pub fn config_toml(&self, extra: &str) -> String {
        config_toml_with(&self.bets_path(), &self.history_path(), &self.extract_path(), extra)
    }

    pub fn config(&self, extra: &str) -> Config {
        Config::parse_toml(&self.config_toml(extra)).expect("parse config")
    }

    /// Write the configuration to disk for CLI tests.
    pub fn config_file(&self, extra: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        fs::write(&path, self.config_toml(extra)).expect("write config");
        path
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}
