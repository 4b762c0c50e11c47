use mealie_import::{import_directory, ImporterConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ImporterConfig::load()?;
    let report = import_directory(&config).await?;

    println!("{}", report.summary());
    Ok(())
}
