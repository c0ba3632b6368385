mod destinations;
mod run;

use std::path::Path;

use adpost::PostConfig;
use anyhow::{Context, Result};

use crate::cli::{Cli, Commands};

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run { content } => {
            run::execute(&cli.config, cli.destinations.as_deref(), content.as_deref()).await
        }
        Commands::Destinations => destinations::execute(&cli.config, cli.destinations.as_deref()),
    }
}

/// Loads and validates the run configuration, with the destination list
/// optionally coming from its own file.
pub(crate) fn load_config(
    config_path: &Path,
    destinations_path: Option<&Path>,
) -> Result<PostConfig> {
    let mut config = PostConfig::from_file(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    if let Some(path) = destinations_path {
        config
            .load_destinations(path)
            .with_context(|| format!("loading destinations from {}", path.display()))?;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_config_with_separate_destination_file() {
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            config_file,
            r#"{{"credentials": {{"email": "ops@example.com", "password": "hunter2"}}}}"#
        )
        .unwrap();

        let mut dest_file = tempfile::NamedTempFile::new().unwrap();
        write!(dest_file, r#"[{{"serverId": "1", "channelId": "2"}}]"#).unwrap();

        let config = load_config(config_file.path(), Some(dest_file.path())).unwrap();
        assert_eq!(config.destinations.len(), 1);
        assert_eq!(config.destinations[0].channel_id, "2");
    }

    #[test]
    fn load_config_rejects_empty_credentials() {
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            config_file,
            r#"{{"credentials": {{"email": "", "password": ""}}}}"#
        )
        .unwrap();

        assert!(load_config(config_file.path(), None).is_err());
    }
}
