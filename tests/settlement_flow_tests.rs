//! End-to-end settlement over real SQLite stores and a CSV extract.

mod harness;

use chrono::{DateTime, TimeZone, Utc};
use riftbet::domain::{PendingAge, WagerStatus};
use riftbet::infrastructure::bootstrap;
use riftbet::port::outbound::store::WagerStore;
use rust_decimal_macros::dec;

use harness::temp_db::TempDb;

const PLAYED_AT: &str = "2024-06-01 10:00:00";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap()
}

fn settle(db: &TempDb, extra: &str) -> riftbet::application::settlement::SettlementReport {
    bootstrap::build_driver(&db.config(extra), false)
        .expect("build driver")
        .run(now())
        .expect("settlement run")
}

fn series_extract(db: &TempDb) {
    db.extract(&[
        "G-1,complete,LCK,2024-06-01 10:05:00,1,100,Blue,team,,T1,20,12,40,3,1,9,2,1900",
        "G-1,complete,LCK,2024-06-01 10:05:00,1,200,Red,team,,Gen.G,12,20,25,1,0,3,0,1900",
        "G-1,complete,LCK,2024-06-01 10:05:00,1,7,Red,jng,River,Gen.G,2,5,7,,,,,1900",
        // Gen.G on blue side in game 2; team order differs from the event.
        "G-2,complete,LCK,2024-06-01 11:00:00,2,100,Blue,team,,Gen.G,15,9,30,4,1,8,1,2100",
        "G-2,complete,LCK,2024-06-01 11:00:00,2,200,Red,team,,T1,9,15,18,1,0,4,0,2100",
        "G-2,complete,LCK,2024-06-01 11:00:00,2,2,Blue,jng,River,Gen.G,4,1,11,,,,,2100",
    ]);
}

#[test]
fn totals_under_dragons_settles_lost() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 1 - Totals", "Under Total Dragons", "4.5", dec!(2.2));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("dragons", "3", "2"), ("kills", "20", "12")]);

    let report = settle(&db, "");

    assert_eq!(report.lost(), 1);
    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Lost);
    assert_eq!(wager.actual_value, Some(dec!(5)));
    assert_eq!(wager.actual_profit, Some(dec!(-1)));
    assert!(wager.verified);
}

#[test]
fn player_kills_settle_from_matched_extract() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 2 - Player Total Kills", "Over River", "3.5", dec!(1.9));
    series_extract(&db);

    let report = settle(&db, "");

    assert_eq!(report.won(), 1);
    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Won);
    assert_eq!(wager.actual_value, Some(dec!(4)));
    assert_eq!(wager.actual_profit, Some(dec!(0.9)));
}

#[test]
fn series_running_past_midnight_settles_late_map() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", "2024-06-01 22:00:00");
    let id = db.wager("e1", "Map 2 - Player Total Kills", "Over Faker", "4.5", dec!(1.833));
    db.extract(&[
        "G-1,complete,LCK,2024-06-01 22:30:00,1,100,Blue,team,,T1,14,9,30,2,1,8,1,1800",
        "G-1,complete,LCK,2024-06-01 22:30:00,1,200,Red,team,,Gen.G,9,14,20,2,0,4,0,1800",
        "G-2,complete,LCK,2024-06-02 00:10:00,2,100,Blue,team,,Gen.G,11,17,22,1,0,3,0,2000",
        "G-2,complete,LCK,2024-06-02 00:10:00,2,200,Red,team,,T1,17,11,35,3,1,9,2,2000",
        "G-2,complete,LCK,2024-06-02 00:10:00,2,9,Red,mid,Faker,T1,6,1,8,,,,,2000",
    ]);

    let report = settle(&db, "");

    assert_eq!(report.won(), 1);
    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Won);
    assert_eq!(wager.actual_value, Some(dec!(6)));
    assert_eq!(wager.actual_profit, Some(dec!(0.833)));
}

#[test]
fn second_run_leaves_stored_fields_identical() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.66));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("kills", "20", "12")]);

    settle(&db, "");
    let first = db.wagers().get(id).unwrap().unwrap();
    let report = settle(&db, "");
    let second = db.wagers().get(id).unwrap().unwrap();

    assert_eq!(first.actual_profit, Some(dec!(0.66)));
    assert_eq!(first, second);
    assert_eq!(report.pending_before, 0);
    assert!(report.settled.is_empty());
}

#[test]
fn missing_result_keeps_wager_pending_and_untouched() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 3 - Totals", "Over Total Barons", "1.5", dec!(1.8));
    series_extract(&db);

    let report = settle(&db, "");

    assert_eq!(report.still_pending(), 1);
    assert_eq!(report.pending[0].reason.label(), "result_unavailable");
    assert!(report.pending[0].reason.is_transient());
    assert_eq!(report.pending[0].age, PendingAge::Recent);

    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Pending);
    assert_eq!(wager.actual_value, None);
    assert_eq!(wager.actual_profit, None);
    assert!(!wager.verified);
}

#[test]
fn unmarked_market_resolves_against_first_map() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Totals", "Over Total Towers", "10.5", dec!(1.8));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("towers", "9", "3")]);
    db.map_result("e1", ("T1", "Gen.G"), 2, &[("towers", "2", "4")]);

    settle(&db, "");

    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Won);
    assert_eq!(wager.actual_value, Some(dec!(12)));
}

#[test]
fn totals_fall_back_to_extract_team_rows() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 2 - Totals", "Under Total Kills", "25.5", dec!(1.8));
    series_extract(&db);

    let report = settle(&db, "[settlement]\ntotals_extract_fallback = false");
    assert_eq!(report.still_pending(), 1);

    settle(&db, "");
    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Won);
    assert_eq!(wager.actual_value, Some(dec!(24)));
}

#[test]
fn duration_lines_in_minutes_use_converted_counter() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 1 - Totals", "Over Game Duration", "31.5", dec!(1.8));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("game_duration", "32:10", "32:10")]);

    settle(&db, "[settlement]\nduration_unit = \"minutes\"");

    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Won);
    assert_eq!(wager.actual_value, Some(dec!(32.17)));
}

#[test]
fn exact_tie_respects_review_policy() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 1 - Totals", "Over Total Kills", "32", dec!(1.8));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("kills", "20", "12")]);

    let report = settle(&db, "[settlement]\ntie_policy = \"review\"");
    assert_eq!(report.needs_review().count(), 1);
    assert_eq!(db.wagers().get(id).unwrap().unwrap().status, WagerStatus::Pending);

    settle(&db, "");
    let wager = db.wagers().get(id).unwrap().unwrap();
    assert_eq!(wager.status, WagerStatus::Lost);
    assert_eq!(wager.actual_value, Some(dec!(32)));
}

#[test]
fn dry_run_reports_without_writing() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    let id = db.wager("e1", "Map 1 - Totals", "Under Total Dragons", "4.5", dec!(2.2));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("dragons", "3", "2")]);

    let report = bootstrap::build_driver(&db.config(""), true)
        .unwrap()
        .run(now())
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.lost(), 1);
    assert_eq!(db.wagers().get(id).unwrap().unwrap().status, WagerStatus::Pending);
}

#[test]
fn future_and_unparseable_wagers_stay_open() {
    let db = TempDb::create();
    db.event("later", "T1", "Gen.G", "2024-06-09 10:00:00");
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    db.wager("later", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.8));
    db.wager("e1", "Map 1 - Totals", "Over First Blood", "0.5", dec!(1.8));

    let report = settle(&db, "");

    assert_eq!(report.pending_before, 2);
    assert_eq!(report.still_pending(), 2);
    assert_eq!(report.ages.future, 1);
    assert_eq!(report.needs_review().count(), 1);
    assert_eq!(report.needs_review().next().unwrap().reason.label(), "unparsed");
}

#[test]
fn summary_reflects_settled_wagers() {
    let db = TempDb::create();
    db.event("e1", "T1", "Gen.G", PLAYED_AT);
    db.wager("e1", "Map 1 - Totals", "Under Total Dragons", "4.5", dec!(2.2));
    db.wager("e1", "Map 1 - Totals", "Over Total Kills", "27.5", dec!(1.66));
    db.wager("e1", "Map 4 - Totals", "Over Total Kills", "27.5", dec!(1.9));
    db.map_result("e1", ("T1", "Gen.G"), 1, &[("dragons", "3", "2"), ("kills", "20", "12")]);

    settle(&db, "");
    let summary = db.wagers().summary().unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.won, 1);
    assert_eq!(summary.lost, 1);
    assert_eq!(summary.open, 1);
    assert_eq!(summary.net_profit, dec!(-0.34));
    assert_eq!(summary.win_rate(), Some(dec!(50)));
}
