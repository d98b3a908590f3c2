pub mod loader;
pub mod logging;
pub mod presets;
pub mod report;

pub use loader::{BracketLoader, BracketRecord, PresetError, PresetLoader};
pub use presets::{DEFAULT_PRESET, PresetRegistry};
pub use report::{ComparisonReport, PresetList, ResultReport, SweepReport};
