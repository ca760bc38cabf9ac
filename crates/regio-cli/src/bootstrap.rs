use std::path::Path;

use anyhow::Context;
use regio_config::RegioConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RegioConfig> {
    load_dotenv()?;

    let mut config = RegioConfig::load().context("failed to load regio configuration")?;
    if let Some(db) = &flags.db {
        config.store.path.clone_from(db);
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    load_dotenv_from(&cwd)
}

/// Load `<dir>/.env` if present. Variables already set are left alone.
fn load_dotenv_from(dir: &Path) -> anyhow::Result<()> {
    let env_path = dir.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_dotenv_from;

    #[test]
    fn dotenv_in_dir_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "REGIO_BOOTSTRAP_TEST_ROOT_TITLE=Zhongguo\n",
        )
        .unwrap();

        load_dotenv_from(dir.path()).unwrap();
        assert_eq!(
            std::env::var("REGIO_BOOTSTRAP_TEST_ROOT_TITLE").as_deref(),
            Ok("Zhongguo")
        );
    }

    #[test]
    fn missing_dotenv_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dotenv_from(dir.path()).is_ok());
    }
}
