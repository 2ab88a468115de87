use pharos_config::{error::Result, provider::JsonFileProvider, satis::Satis};
use tracing::debug;

/// Records `urls` in the manifest at `manifest` and writes it back.
pub fn add_repositories(manifest: &str, urls: &[String], mode: u32) -> Result<()> {
    let provider = JsonFileProvider::load(manifest)?;
    let mut satis = Satis::new(Some(provider))?;

    debug!("Recording {} repositories", urls.len());
    satis.add_repositories(urls.iter().cloned());

    satis.write_file(manifest, mode)
}
