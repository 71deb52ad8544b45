//! Test utility functions for devbench integration scenarios

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a configuration root whose snapshot template holds the given files
///
/// `files` maps template-relative paths to contents; parent directories are
/// created as needed.
pub fn root_with_template(files: &[(&str, &str)]) -> TempDir {
    let root = TempDir::new().expect("create temp config root");
    let template = root.path().join("empty_databases");
    fs::create_dir_all(&template).expect("create template dir");
    for (rel, contents) in files {
        write_file(&template.join(rel), contents);
    }
    root
}

/// Seed the working databases directory under `root` with the given files
pub fn seed_databases(root: &Path, files: &[(&str, &str)]) {
    let databases = root.join("databases");
    fs::create_dir_all(&databases).expect("create databases dir");
    for (rel, contents) in files {
        write_file(&databases.join(rel), contents);
    }
}

/// Create a file (and its parents) with the given contents
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write file");
}

/// Collect a directory tree as sorted (relative path, contents) pairs
pub fn dir_listing(root: &Path) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    collect(root, root, &mut entries);
    entries.sort();
    entries
}

fn collect(base: &Path, dir: &Path, out: &mut Vec<(String, String)>) {
    for entry in fs::read_dir(dir).expect("read dir").flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(base, &path, out);
        } else {
            let rel = path
                .strip_prefix(base)
                .expect("path under base")
                .to_string_lossy()
                .replace('\\', "/");
            let contents = fs::read_to_string(&path).expect("read file");
            out.push((rel, contents));
        }
    }
}

/// Assert two directory trees hold the same files with the same contents
pub fn assert_dirs_identical(left: &Path, right: &Path) {
    assert_eq!(
        dir_listing(left),
        dir_listing(right),
        "directory trees differ:\n  left:  {}\n  right: {}",
        left.display(),
        right.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_with_template_creates_nested_files() {
        let root = root_with_template(&[("docs/data/doc.json", "{}"), ("top.txt", "hi")]);

        let template = root.path().join("empty_databases");
        assert_eq!(
            fs::read_to_string(template.join("docs/data/doc.json")).unwrap(),
            "{}"
        );
        assert_eq!(
            dir_listing(&template),
            vec![
                ("docs/data/doc.json".to_string(), "{}".to_string()),
                ("top.txt".to_string(), "hi".to_string()),
            ]
        );
    }

    #[test]
    fn test_assert_dirs_identical_accepts_equal_trees() {
        let root = root_with_template(&[("a.txt", "same")]);
        seed_databases(root.path(), &[("a.txt", "same")]);

        assert_dirs_identical(
            &root.path().join("empty_databases"),
            &root.path().join("databases"),
        );
    }

    #[test]
    #[should_panic(expected = "directory trees differ")]
    fn test_assert_dirs_identical_rejects_differing_trees() {
        let root = root_with_template(&[("a.txt", "template")]);
        seed_databases(root.path(), &[("a.txt", "working")]);

        assert_dirs_identical(
            &root.path().join("empty_databases"),
            &root.path().join("databases"),
        );
    }
}
