pub mod document;
pub mod loader;
pub mod resolver;
pub mod value;

pub use document::{ConfigDocument, DocumentFormat};
pub use loader::{
    DEFAULT_CONFIG_FILE, DocumentSource, LoadedDocument, load_document, load_document_or_default,
};
pub use resolver::{FeatureConfig, default_section_name, overlay, resolve, section_name_for};
pub use value::{SettingValue, Settings};
