mod descriptors;
mod scripted_unit;

#[allow(unused_imports)]
pub use descriptors::{descriptor, descriptor_with_deps};
#[allow(unused_imports)]
pub use scripted_unit::{Behavior, StaticUnitProvider};
