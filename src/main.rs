use dotenvy::dotenv;
use party_catalog::{
    config::{self, database},
    core::{
        filter::{CatalogFilter, list_catalog},
        resource::external_view,
    },
    errors::Result,
    media::DatabaseMediaStore,
    migrations,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let config_path = std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let app_config = config::app::load_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Initialize the database and bring the schema up to date
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    let applied = migrations::run_pending(&db)
        .await
        .inspect_err(|e| error!("Failed to run migrations: {}", e))?;
    info!("Database ready ({} migration(s) applied)", applied.len());

    // 5. Filter from `key=value` arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let filter = CatalogFilter::from_params(args.iter().filter_map(|arg| arg.split_once('=')));

    // 6. Print the external view of every matching product, one JSON object per line
    let media = DatabaseMediaStore::new(&db, &app_config.media.base_url);
    let products = list_catalog(&db, &filter).await?;
    info!("{} product(s) match {:?}", products.len(), filter);

    for product in &products {
        let view = external_view(&media, product).await?;
        println!("{}", serde_json::to_string(&view)?);
    }

    Ok(())
}
