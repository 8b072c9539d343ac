//! Configuration loader tests using an isolated base directory.

use std::path::PathBuf;

use anyhow::Result;
use mobility_analysis::config::ConfigLoader;

#[test]
fn missing_env_files_fall_back_to_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf()).load()?;

    assert_eq!(config.ingestion_root, PathBuf::from("data/raw_data"));
    assert_eq!(config.log_level, "info");
    assert_eq!(config.db_max_connections, 5);
    Ok(())
}

#[test]
fn env_file_values_are_loaded_and_local_wins() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join(".env"),
        "MOBILITY_DATABASE_URL=sqlite://base.db\nMOBILITY_LOG_LEVEL=debug\n",
    )?;
    std::fs::write(dir.path().join(".env.local"), "MOBILITY_LOG_LEVEL=warn\n")?;

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf()).load()?;

    assert_eq!(config.database_url, "sqlite://base.db");
    assert_eq!(config.log_level, "warn");
    Ok(())
}

#[test]
fn unprefixed_keys_are_ignored() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join(".env"),
        "DATABASE_URL=postgres://elsewhere\nMOBILITY_LOG_FORMAT=json\n",
    )?;

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf()).load()?;

    assert_eq!(config.log_format, "json");
    assert_ne!(config.database_url, "postgres://elsewhere");
    Ok(())
}
