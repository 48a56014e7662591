pub mod energy;
pub mod engine;
pub mod environment;
pub mod growth;
pub mod health;
pub mod scenario;
pub mod snapshot;
pub mod tree;
pub mod weather;

pub use engine::{DayRecord, Engine, EngineBuilder, EngineSettings, RunSummary};
pub use scenario::{Scenario, ScenarioLoader};
pub use tree::{create_tree, EnvironmentInputs, Snapshot, Tree, TreeState};
