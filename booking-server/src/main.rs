use booking_server::{Config, Server, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), None);

    print_banner();
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        timezone = %config.timezone,
        "Starting booking server"
    );

    Server::new(config).run().await?;
    Ok(())
}
