use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};

/// Lay out a base directory with a configuration and credentials file.
pub fn write_layout(base: &Path, server_uri: &str, entities: &[&str], token: &str) {
    let configuration = base.join("configuration");
    let secrets = base.join("secrets");
    fs::create_dir_all(&configuration).unwrap();
    fs::create_dir_all(&secrets).unwrap();

    let config = json!({
        "nozbe": {
            "credentials_file": { "directory": "secrets", "file_name": "credentials.json" },
            "entities": entities,
            "endpoints": {
                "refresh_token": format!("{}/oauth/secret/refresh", server_uri),
                "data": format!("{}/list", server_uri)
            }
        },
        "general": {
            "data": { "directory": "data" },
            "datetime_format": "%Y%m%d_%H%M%S"
        }
    });
    fs::write(
        configuration.join("app_configuration.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
    fs::write(
        secrets.join("credentials.json"),
        json!({ "access_token": token }).to_string(),
    )
    .unwrap();
}

/// Run the CLI binary against `base` without blocking the test runtime.
pub async fn run_cli(base: &Path, extra: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nozbe"));
    cmd.arg("--base-dir").arg(base).args(extra);
    cmd.env_remove("RUST_LOG");

    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
        .await
        .expect("CLI task panicked")
}

/// Output files for `entity` in the data directory.
pub fn output_files(base: &Path, entity: &str) -> Vec<PathBuf> {
    let data_dir = base.join("data");
    let Ok(entries) = fs::read_dir(&data_dir) else {
        return Vec::new();
    };

    let prefix = format!("{}_", entity);
    entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".json"))
        })
        .collect()
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
