pub mod init;
pub mod list;
pub mod run;
pub mod show;

pub use list::Catalog;
pub use run::RunRequest;
pub use show::FeatureDetail;
