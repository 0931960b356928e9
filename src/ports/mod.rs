mod feature_unit;

pub use feature_unit::{FeatureUnit, UnitProvider};
