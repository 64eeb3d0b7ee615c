pub mod config;
pub mod dataset;
pub mod dump;
pub mod error;
pub mod models;
pub mod reader;
pub mod trainset;
pub mod utils;

pub use config::Config;
pub use dataset::{train_test_split, BuiltinDataset, Dataset, DownloadPolicy, Fetcher};
pub use error::{Error, Result};
pub use models::*;
pub use reader::{LineFormat, Reader};
pub use trainset::Trainset;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
