use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_db_with_data, sc, setup_test_db};

#[test]
fn test_init_seeds_default_locations() {
    let db_path = setup_test_db("init_seed");

    sc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Seeded 14 default locations"));

    sc().args(["--db", &db_path, "locations"])
        .assert()
        .success()
        .stdout(contains("L Abdomen (Front)"))
        .stdout(contains("R Arm (Back)"))
        .stdout(contains("R Buttock"))
        .stdout(contains("custom").not());
}

#[test]
fn test_init_twice_does_not_reseed() {
    let db_path = setup_test_db("init_twice");
    init_db(&db_path);

    sc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Seeded").not());
}

#[test]
fn test_change_closes_active_entry() {
    let db_path = setup_test_db("change_closes");
    init_db_with_data(&db_path);

    sc().args(["--db", &db_path, "history"])
        .assert()
        .success()
        .stdout(contains("2025-09-01T08:00:00Z"))
        .stdout(contains("72.5"))
        .stdout(contains("active"))
        .stdout(contains("sore, red area"));
}

#[test]
fn test_change_accepts_legacy_location_names() {
    let db_path = setup_test_db("change_legacy");
    init_db(&db_path);

    sc().args([
        "--db",
        &db_path,
        "change",
        "Left Side Abdomen",
        "--at",
        "2025-10-01T07:00:00Z",
    ])
    .assert()
    .success()
    .stdout(contains("Site changed"));

    sc().args(["--db", &db_path, "history", "--location", "L Abdomen (Side)"])
        .assert()
        .success()
        .stdout(contains("L Abdomen (Side)"));
}

#[test]
fn test_change_unknown_location_fails() {
    let db_path = setup_test_db("change_unknown");
    init_db(&db_path);

    sc().args(["--db", &db_path, "change", "Nowhere"])
        .assert()
        .failure()
        .stderr(contains("No location named 'Nowhere'"));
}

#[test]
fn test_change_before_active_start_fails() {
    let db_path = setup_test_db("change_backwards");
    init_db_with_data(&db_path);

    sc().args([
        "--db",
        &db_path,
        "change",
        "L Buttock",
        "--at",
        "2025-09-02T00:00:00Z",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date format"));
}

#[test]
fn test_history_date_filters() {
    let db_path = setup_test_db("history_filters");
    init_db_with_data(&db_path);

    sc().args(["--db", &db_path, "history", "--from", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("R Thigh (Side)"))
        .stdout(contains("L Abdomen (Front)").not());

    sc().args(["--db", &db_path, "history", "--to", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("L Abdomen (Front)"))
        .stdout(contains("R Thigh (Side)").not());

    sc().args(["--db", &db_path, "history", "--from", "01/09/2025"])
        .assert()
        .failure();
}

#[test]
fn test_del_and_edit_entries() {
    let db_path = setup_test_db("del_edit");
    init_db_with_data(&db_path);

    sc().args([
        "--db",
        &db_path,
        "edit",
        "--id",
        "2",
        "--end",
        "2025-09-05T08:30:00Z",
        "--note",
        "",
    ])
    .assert()
    .success()
    .stdout(contains("Entry 2 updated"));

    sc().args(["--db", &db_path, "history"])
        .assert()
        .success()
        .stdout(contains("24.0"))
        .stdout(contains("sore, red area").not());

    sc().args(["--db", &db_path, "del", "--id", "1"])
        .assert()
        .success()
        .stdout(contains("Deleted entry 1"));

    sc().args(["--db", &db_path, "del", "--id", "1"])
        .assert()
        .failure()
        .stderr(contains("No site change entry with id 1"));

    sc().args([
        "--db",
        &db_path,
        "edit",
        "--id",
        "2",
        "--end",
        "2025-09-01T00:00:00Z",
    ])
    .assert()
    .failure();
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    init_db_with_data(&db_path);

    sc().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("change"))
        .stdout(contains("R Thigh (Side)"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    sc().args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Locations:"))
        .stdout(contains("(1 active)"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_locations_add_custom_zones() {
    let db_path = setup_test_db("locations_add");
    init_db(&db_path);

    sc().args(["--db", &db_path, "locations", "--add", "Hip", "--sided"])
        .assert()
        .success()
        .stdout(contains("Added L Hip, R Hip"));

    sc().args(["--db", &db_path, "locations", "--add", "Lower Back"])
        .assert()
        .success()
        .stdout(contains("Added Lower Back"));

    sc().args(["--db", &db_path, "locations"])
        .assert()
        .success()
        .stdout(contains("R Hip"))
        .stdout(contains("custom"));

    sc().args([
        "--db",
        &db_path,
        "change",
        "Lower Back",
        "--at",
        "2025-10-01T07:00:00Z",
    ])
    .assert()
    .success();

    sc().args(["--db", &db_path, "locations", "--add", "Hip"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    sc().args(["--db", &db_path, "locations", "--sided"])
        .assert()
        .failure();
}

#[test]
fn test_locations_disable_enable_delete_and_move() {
    let db_path = setup_test_db("locations_manage");
    init_db(&db_path);

    sc().args(["--db", &db_path, "locations", "--disable", "L Arm (Back)"])
        .assert()
        .success()
        .stdout(contains("Zone 'Back Arm' disabled (2 location(s) changed)"));

    sc().args(["--db", &db_path, "locations", "--enable", "Back Arm"])
        .assert()
        .success()
        .stdout(contains("enabled (2 location(s) changed)"));

    sc().args(["--db", &db_path, "locations", "--delete", "Buttock"])
        .assert()
        .failure()
        .stderr(contains("is a default zone"));

    sc().args(["--db", &db_path, "locations", "--add", "Hip"])
        .assert()
        .success();
    sc().args(["--db", &db_path, "change", "Hip", "--at", "2025-10-01T07:00:00Z"])
        .assert()
        .success();

    sc().args(["--db", &db_path, "locations", "--delete", "Hip"])
        .assert()
        .success()
        .stdout(contains("disabled 1 location(s) instead of deleting"));

    sc().args(["--db", &db_path, "locations", "--move", "Buttock", "--to", "1"])
        .assert()
        .success()
        .stdout(contains("Moved 'Buttock' to position 1"));

    let out = sc()
        .args(["--db", &db_path, "locations"])
        .output()
        .expect("list locations");
    let listing = String::from_utf8_lossy(&out.stdout);
    let first_row = listing.lines().nth(2).expect("first data row");
    assert!(first_row.contains("L Buttock"), "{first_row}");
}
