//! File Vault - Entry Point
//!
//! Demonstration run of the vault core against the in-memory store: create a
//! folder, upload files, list, search, and export the folder as a ZIP.

use std::io::Cursor;
use std::sync::Arc;

use log::{error, info};

use file_vault::config::VaultConfig;
use file_vault::error::{VaultError, handlers};
use file_vault::resource::{ResourceManager, UploadFile};
use file_vault::store::MemoryStore;

fn main() {
    // env_logger picks up RUST_LOG from the environment.
    env_logger::init();

    let config = match VaultConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Launching file vault demo with {:?}", config);

    let store = Arc::new(MemoryStore::new());
    let vault = ResourceManager::new(store, config);
    if let Err(e) = run_demo(&vault) {
        handlers::handle_error(&e);
        std::process::exit(1);
    }
}

fn run_demo(vault: &ResourceManager) -> Result<(), VaultError> {
    let tenant = 7;

    vault.create_directory(tenant, "pictures")?;
    vault.upload_files(
        tenant,
        "pictures",
        vec![
            upload("cat.png", b"not really a png"),
            upload("trip/beach.png", b"sand"),
        ],
    )?;

    for info in vault.list_directory(tenant, "pictures")? {
        info!("listed: {}{} ({} bytes)", info.path, info.name, info.size);
    }
    for info in vault.search(tenant, "png")? {
        info!("search hit: {}{}", info.path, info.name);
    }

    let download = vault.download(tenant, "pictures")?;
    info!("download prepared: {}", download.name);
    match download.body {
        file_vault::resource::DownloadBody::Folder(stream) => {
            let mut sink = Cursor::new(Vec::new());
            stream.write_to(&mut sink)?;
            info!("zipped folder: {} archive bytes", sink.into_inner().len());
        }
        file_vault::resource::DownloadBody::File(_) => {}
    }

    vault.delete(tenant, "pictures")?;
    info!("demo session complete");
    Ok(())
}

fn upload(name: &str, data: &[u8]) -> UploadFile {
    UploadFile {
        filename: name.to_string(),
        content_type: "application/octet-stream".to_string(),
        size: data.len() as u64,
        data: Box::new(Cursor::new(data.to_vec())),
    }
}
