pub mod command_unit;
pub mod feature_directory;
pub mod logging;
pub mod scaffold;

pub use command_unit::{CommandUnit, ManifestUnitProvider};
pub use feature_directory::discover;
pub use logging::{Logger, LoggerConfig};
