use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("No configuration provider applied")]
    #[diagnostic(
        code(pharos_config::missing_provider),
        help("Load the manifest into a provider before constructing the registry")
    )]
    MissingProvider,

    #[error("Malformed `repositories` section: {source}")]
    #[diagnostic(
        code(pharos_config::malformed_repositories),
        help("`repositories` must be an array of type/url objects; fix the manifest by hand")
    )]
    MalformedRepositories {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    #[diagnostic(
        code(pharos_config::json_parse),
        help("Check the manifest file for JSON syntax errors")
    )]
    JsonParse(#[source] serde_json::Error),

    #[error("Manifest root must be a JSON object")]
    #[diagnostic(
        code(pharos_config::manifest_shape),
        help("The manifest file has to contain a top-level object of settings")
    )]
    ManifestNotAnObject,

    #[error("JSON serialization error: {0}")]
    #[diagnostic(
        code(pharos_config::json_serialize),
        help("Check the manifest content for values that cannot be encoded")
    )]
    JsonSer(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(pharos_config::io))]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
