//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use regio_config::RegioConfig;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
base_url = "https://regions.example.com/api"
timeout_secs = 3
user_agent = "regio-test"

[store]
path = "/var/cache/regio.db"

[general]
root_title = "Regions"
"#,
        )?;

        let config: RegioConfig = Figment::from(Serialized::defaults(RegioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.remote.base_url, "https://regions.example.com/api");
        assert_eq!(config.remote.timeout_secs, 3);
        assert_eq!(config.remote.user_agent, "regio-test");
        assert_eq!(config.store.path, "/var/cache/regio.db");
        assert_eq!(config.general.root_title, "Regions");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
timeout_secs = 30
"#,
        )?;

        let config: RegioConfig = Figment::from(Serialized::defaults(RegioConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.remote.base_url, "http://guolin.tech/api");
        assert_eq!(config.general.root_title, "China");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".regio")?;
        jail.create_file(
            ".regio/config.toml",
            r#"
[general]
root_title = "Local"
"#,
        )?;

        let config = RegioConfig::load().expect("config loads");
        assert_eq!(config.general.root_title, "Local");
        Ok(())
    });
}
