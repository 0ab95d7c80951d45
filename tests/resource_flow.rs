//! End-to-end flows through the public vault API over the in-memory store.

use std::collections::BTreeSet;
use std::io::{Cursor, Read};
use std::sync::Arc;

use file_vault::ResourceManager;
use file_vault::config::VaultConfig;
use file_vault::error::{ErrorCategory, VaultError};
use file_vault::resource::{DownloadBody, ResourceType, UploadFile};
use file_vault::store::MemoryStore;

fn vault() -> ResourceManager {
    ResourceManager::new(Arc::new(MemoryStore::new()), VaultConfig::default())
}

fn upload(name: &str, data: &[u8]) -> UploadFile {
    UploadFile {
        filename: name.to_string(),
        content_type: "application/octet-stream".to_string(),
        size: data.len() as u64,
        data: Box::new(Cursor::new(data.to_vec())),
    }
}

#[test]
fn tenant_seven_pictures_scenario() {
    let vault = vault();

    vault.create_directory(7, "pictures").unwrap();
    vault
        .upload_files(7, "pictures", vec![upload("cat.png", &[7u8; 5000])])
        .unwrap();

    let info = vault.get_info(7, "pictures/cat.png").unwrap();
    assert_eq!(info.path, "pictures/");
    assert_eq!(info.name, "cat.png");
    assert_eq!(info.size, 5000);
    assert_eq!(info.resource_type, ResourceType::File);
}

#[test]
fn traversal_attempt_is_rejected_before_any_store_access() {
    let vault = vault();
    let err = vault.get_info(7, "../etc").unwrap_err();
    assert!(matches!(err, VaultError::InvalidPath(_)));
    assert_eq!(err.category(), ErrorCategory::BadInput);
}

#[test]
fn folder_download_zips_the_subtree_with_relative_entry_names() {
    let vault = vault();

    vault.create_directory(7, "docs").unwrap();
    vault
        .upload_files(
            7,
            "docs",
            vec![upload("a.txt", b"alpha"), upload("sub/b.txt", b"beta")],
        )
        .unwrap();

    let download = vault.download(7, "docs").unwrap();
    assert_eq!(download.name, "docs.zip");

    let stream = match download.body {
        DownloadBody::Folder(stream) => stream,
        DownloadBody::File(_) => panic!("expected a folder download"),
    };
    let mut sink = Cursor::new(Vec::new());
    stream.write_to(&mut sink).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(sink.into_inner())).unwrap();
    let names: BTreeSet<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        BTreeSet::from(["a.txt".to_string(), "sub/b.txt".to_string()])
    );

    let mut contents = String::new();
    archive
        .by_name("sub/b.txt")
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "beta");
}

#[test]
fn full_lifecycle_create_upload_list_search_delete() {
    let vault = vault();

    vault.create_directory(3, "work").unwrap();
    vault
        .upload_files(3, "work", vec![upload("Notes.TXT", b"n"), upload("img.png", b"i")])
        .unwrap();

    let listed: Vec<String> = vault
        .list_directory(3, "work")
        .unwrap()
        .into_iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&"Notes.TXT".to_string()));

    let hits = vault.search(3, "notes").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Notes.TXT");

    vault.delete(3, "work").unwrap();
    assert!(matches!(
        vault.list_directory(3, "work"),
        Err(VaultError::NotFound(_))
    ));
    assert!(vault.list_directory(3, "").unwrap().is_empty());
}

#[test]
fn error_categories_are_stable_across_the_api() {
    let vault = vault();

    assert_eq!(
        vault.create_directory(1, "a//b").unwrap_err().category(),
        ErrorCategory::BadInput
    );
    assert_eq!(
        vault.delete(1, "missing").unwrap_err().category(),
        ErrorCategory::NotFound
    );

    vault.create_directory(1, "dir").unwrap();
    assert_eq!(
        vault.create_directory(1, "dir").unwrap_err().category(),
        ErrorCategory::Conflict
    );
    assert_eq!(
        vault
            .upload_files(1, "ghost", vec![upload("f.txt", b"x")])
            .unwrap_err()
            .category(),
        ErrorCategory::NotFound
    );
}
