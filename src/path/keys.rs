//! Key codec
//!
//! Translates tenant id + logical path into object-store keys and back.
//! A trailing `/` on a key marks a directory; its absence marks a file.

/// Per-tenant namespace prefix, `user-{id}-files/`
pub fn tenant_prefix(tenant_id: u64) -> String {
    format!("user-{}-files/", tenant_id)
}

/// Build the object key for a tenant-relative logical path
///
/// The path must already be validated; a leading `/` is tolerated and
/// stripped.
pub fn to_key(tenant_id: u64, path: &str) -> String {
    format!("{}{}", tenant_prefix(tenant_id), path.trim_start_matches('/'))
}

/// Append the directory-marker slash if missing
pub fn add_dir_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Strip the directory-marker slash if present
pub fn strip_dir_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Parent of a key: everything through the last `/`, the trailing marker
/// slash stripped first. `"a/b/c"` and `"a/b/c/"` both yield `"a/b/"`.
pub fn parent_of(key: &str) -> &str {
    let trimmed = strip_dir_slash(key);
    match trimmed.rfind('/') {
        Some(slash) => &trimmed[..=slash],
        None => "",
    }
}

/// Object name: everything after the last `/` of the slash-stripped key,
/// with the marker slash re-appended when the object is a directory
pub fn object_name(key: &str, is_directory: bool) -> String {
    let trimmed = strip_dir_slash(key);
    let name = match trimmed.rfind('/') {
        Some(slash) => &trimmed[slash + 1..],
        None => trimmed,
    };
    if is_directory {
        format!("{}/", name)
    } else {
        name.to_string()
    }
}

/// Strip a tenant's prefix from a key, yielding the tenant-relative path
pub fn strip_tenant_prefix<'a>(key: &'a str, tenant_id: u64) -> &'a str {
    let prefix = tenant_prefix(tenant_id);
    key.strip_prefix(prefix.as_str()).unwrap_or(key)
}

/// Every ancestor directory of a tenant-relative directory path, shallowest
/// first, the directory itself included, the tenant root excluded.
/// `"docs/img"` yields `["docs/", "docs/img/"]`.
pub fn ancestor_dirs(relative_dir: &str) -> Vec<String> {
    let trimmed = strip_dir_slash(relative_dir.trim_start_matches('/'));
    if trimmed.is_empty() {
        return Vec::new();
    }
    let mut ancestors = Vec::new();
    for (i, c) in trimmed.char_indices() {
        if c == '/' {
            ancestors.push(format!("{}/", &trimmed[..i]));
        }
    }
    ancestors.push(format!("{}/", trimmed));
    ancestors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_prefix_scopes_keys() {
        assert_eq!(tenant_prefix(7), "user-7-files/");
        assert_eq!(to_key(7, "pictures/cat.png"), "user-7-files/pictures/cat.png");
        assert_eq!(to_key(7, "/pictures"), "user-7-files/pictures");
    }

    #[test]
    fn parent_and_name_round_trip() {
        let key = to_key(7, "docs/img/cat.png");
        assert_eq!(parent_of(&key), "user-7-files/docs/img/");
        assert_eq!(object_name(&key, false), "cat.png");
        assert_eq!(format!("{}{}", parent_of(&key), object_name(&key, false)), key);

        let dir_key = to_key(7, "docs/img/");
        assert_eq!(parent_of(&dir_key), "user-7-files/docs/");
        assert_eq!(object_name(&dir_key, true), "img/");
        assert_eq!(
            format!("{}{}", parent_of(&dir_key), object_name(&dir_key, true)),
            dir_key
        );
    }

    #[test]
    fn parent_of_is_idempotent_under_re_encoding() {
        let key = to_key(3, "a/b/c");
        let parent = parent_of(&key);
        assert_eq!(parent_of(parent), "user-3-files/a/");
        assert_eq!(parent_of(&add_dir_slash(strip_dir_slash(parent))), "user-3-files/a/");
    }

    #[test]
    fn slash_helpers() {
        assert_eq!(add_dir_slash("a/b"), "a/b/");
        assert_eq!(add_dir_slash("a/b/"), "a/b/");
        assert_eq!(strip_dir_slash("a/b/"), "a/b");
        assert_eq!(strip_dir_slash("a/b"), "a/b");
    }

    #[test]
    fn strips_tenant_prefix_for_display() {
        assert_eq!(strip_tenant_prefix("user-7-files/docs/a.txt", 7), "docs/a.txt");
        assert_eq!(strip_tenant_prefix("docs/a.txt", 7), "docs/a.txt");
    }

    #[test]
    fn ancestors_shallowest_first() {
        assert_eq!(ancestor_dirs("docs/img"), vec!["docs/", "docs/img/"]);
        assert_eq!(ancestor_dirs("docs/"), vec!["docs/"]);
        assert!(ancestor_dirs("").is_empty());
        assert!(ancestor_dirs("/").is_empty());
    }
}
