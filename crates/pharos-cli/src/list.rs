use pharos_config::{
    error::{ConfigError, Result},
    provider::JsonFileProvider,
    satis::Satis,
};
use tracing::info;

/// Prints the repositories recorded in the manifest at `manifest`.
pub fn list_repositories(manifest: &str, json: bool) -> Result<()> {
    let provider = JsonFileProvider::load(manifest)?;
    let satis = Satis::new(Some(provider))?;
    let repositories = satis.repositories();

    if json {
        let body = serde_json::to_string_pretty(&repositories).map_err(ConfigError::JsonSer)?;
        println!("{body}");
        return Ok(());
    }

    if repositories.is_empty() {
        info!("No repositories recorded in {}", manifest);
        return Ok(());
    }

    for repository in repositories {
        println!("{} - {}", repository.kind, repository.url);
    }
    Ok(())
}
