//! Configuration for Products API

use core_config::{
    AppInfo, FromEnv, app_info, env_flag, server::ServerConfig, upload::UploadConfig,
};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub environment: Environment,
    /// Replace the catalogue with sample data at startup
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let upload = UploadConfig::from_env()?;
        let seed_sample_data = env_flag("SEED_SAMPLE_DATA", false)?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            upload,
            environment,
            seed_sample_data,
        })
    }
}
