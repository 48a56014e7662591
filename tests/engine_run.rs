use std::path::PathBuf;

use arbor::{
    engine::{EngineBuilder, EngineSettings},
    scenario::{ScenarioError, ScenarioLoader},
    snapshot, Engine, Scenario,
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn load(name: &str) -> Scenario {
    scenario_loader()
        .load(PathBuf::from("scenarios").join(name))
        .expect("scenario parses")
}

fn build_engine(scenario: &Scenario, snapshot_dir: PathBuf, interval: u64) -> Engine {
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        snapshot_interval_days: interval,
        snapshot_dir,
    };
    EngineBuilder::new(settings, scenario.build_tree(), scenario.weather_generator()).build()
}

#[test]
fn scenario_loader_reads_fixtures() {
    let london = load("london_orchard.yaml");
    assert_eq!(london.name, "london_orchard");
    assert_eq!(london.days(None).unwrap(), 5 * 365);
    assert_eq!(london.weather.temperature_c, 20.0);

    let highlands = load("blighted_highlands.yaml");
    assert_eq!(highlands.weather.disease_factor, 0.35);
    assert_eq!(highlands.weather.sunlight, 1.0);
    assert!(!highlands.weather.variation.is_constant());
}

#[test]
fn missing_scenario_is_an_error() {
    let err = scenario_loader()
        .load("scenarios/does_not_exist.yaml")
        .unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
    assert!(err.to_string().contains("failed to read scenario file"));
}

#[test]
fn engine_runs_deterministically() {
    let scenario = load("blighted_highlands.yaml");
    let temp = tempfile::tempdir().unwrap();

    let mut engine_a = build_engine(&scenario, temp.path().join("a"), 0);
    let (records_a, _) = engine_a.run(400).unwrap();
    let mut engine_b = build_engine(&scenario, temp.path().join("b"), 0);
    let (records_b, _) = engine_b.run(400).unwrap();

    assert_eq!(records_a, records_b);
    assert_eq!(engine_a.current_day(), 400);
}

#[test]
fn five_year_run_summary() {
    let scenario = load("london_orchard.yaml");
    let temp = tempfile::tempdir().unwrap();
    let mut engine = build_engine(&scenario, temp.path().to_path_buf(), 0);
    let (records, summary) = engine.run(scenario.days(None).unwrap()).unwrap();

    assert_eq!(records.len(), 1825);
    assert_eq!(summary.days, 1825);
    assert!(summary.total_fruit > 0);
    assert_eq!(
        summary.total_fruit,
        records
            .iter()
            .map(|r| u64::from(r.snapshot.fruit_count))
            .sum::<u64>()
    );
    assert_eq!(records[365].day_of_year, 1);
    assert_eq!(summary.last.as_ref(), records.last().map(|r| &r.snapshot));
    assert!(records
        .windows(2)
        .all(|w| w[1].snapshot.tree_size >= w[0].snapshot.tree_size));
}

#[test]
fn engine_runs_hook_each_day() {
    let scenario = load("london_orchard.yaml");
    let temp = tempfile::tempdir().unwrap();
    let mut engine = build_engine(&scenario, temp.path().to_path_buf(), 0);

    let mut days = Vec::new();
    engine
        .run_with_hook(6, |record| days.push(record.day))
        .expect("run succeeds");

    assert_eq!(days, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn engine_emits_snapshots() {
    let scenario = load("blighted_highlands.yaml");
    let temp = tempfile::tempdir().unwrap();
    let snapshot_dir = temp.path().join("snaps");
    let mut engine = build_engine(&scenario, snapshot_dir.clone(), 30);
    engine.run(65).unwrap();

    let scenario_dir = snapshot_dir.join("blighted_highlands");
    assert!(scenario_dir.join("day_000030.json").exists());
    assert!(scenario_dir.join("day_000060.json").exists());
    assert!(!scenario_dir.join("day_000065.json").exists());

    let data = std::fs::read_to_string(scenario_dir.join("day_000030.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(value["scenario"], "blighted_highlands");
    assert_eq!(value["day"], 30);
    assert_eq!(value["snapshot"]["has_leaves"], false);
    assert!(value["snapshot"]["health_status"].is_string());
}

#[test]
fn series_export_contains_every_day() {
    let scenario = load("london_orchard.yaml");
    let temp = tempfile::tempdir().unwrap();
    let mut engine = build_engine(&scenario, temp.path().to_path_buf(), 0);
    let (records, summary) = engine.run(10).unwrap();

    let out = temp.path().join("out").join("series.json");
    snapshot::write_series(&out, &scenario.name, &summary, &records).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["days"].as_array().map(Vec::len), Some(10));
    assert_eq!(value["summary"]["days"], 10);
    assert_eq!(value["days"][0]["snapshot"]["health_status"], "Healthy");
}
