use imgdrop_core::Config;

// Use mimalloc as the global allocator for lower fragmentation, especially on
// musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, routes)
    let (state, router) = imgdrop_api::setup::initialize_app(config).await?;

    // Start the server
    imgdrop_api::setup::server::start_server(state, router).await?;

    Ok(())
}
