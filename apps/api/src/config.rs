use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use domain_import::{BlobConfig, SpoonacularConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding meal documents
    pub meals_collection: String,
    pub spoonacular: SpoonacularConfig,
    /// Image re-hosting; `None` disables images on import
    pub blob: Option<BlobConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let meals_collection = env_or_default("MEALS_COLLECTION", "meals");
        let spoonacular = SpoonacularConfig::from_env()?;
        // Blob storage is optional; imports degrade to image-less meals
        let blob = BlobConfig::from_env().ok();

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            meals_collection,
            spoonacular,
            blob,
        })
    }
}
