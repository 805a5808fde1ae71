use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::warn;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Files accepted by `accept`, in path order.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Walk `base_dir` (or the `includes` below it) and collect every file that
/// is not ignored and that `accept` takes.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    accept: impl Fn(&Path) -> bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = p.as_str(), "invalid ignore pattern: {}", e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                    Err(e) => warn!(pattern = inc.as_str(), "invalid include pattern: {}", e),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn!(path = %path.display(), "include path does not exist");
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && accept(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn resources(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("js" | "go" | "html" | "php")
        )
    }

    fn names(result: &ScanResult, base: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| f.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_accepted_files_in_order() {
        let dir = tempdir().unwrap();
        let base = dir.path();

        File::create(base.join("strings.js")).unwrap();
        File::create(base.join("index.php")).unwrap();
        File::create(base.join("style.css")).unwrap();
        fs::create_dir(base.join("locale")).unwrap();
        File::create(base.join("locale/en.go")).unwrap();

        let result = scan_files(base, &[], &[], resources);
        assert_eq!(names(&result, base), vec!["index.php", "locale/en.go", "strings.js"]);
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_ignores() {
        let dir = tempdir().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("node_modules/pkg")).unwrap();
        File::create(base.join("node_modules/pkg/lib.js")).unwrap();
        fs::create_dir(base.join("build")).unwrap();
        File::create(base.join("build/out.html")).unwrap();
        File::create(base.join("app.js")).unwrap();

        let result = scan_files(
            base,
            &[],
            &["**/node_modules/**".to_owned(), "build".to_owned()],
            resources,
        );
        assert_eq!(names(&result, base), vec!["app.js"]);
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("www/en")).unwrap();
        File::create(base.join("www/en/index.html")).unwrap();
        fs::create_dir(base.join("tools")).unwrap();
        File::create(base.join("tools/gen.js")).unwrap();

        let literal = scan_files(base, &["www".to_owned()], &[], resources);
        assert_eq!(names(&literal, base), vec!["www/en/index.html"]);

        let globbed = scan_files(base, &["*/en".to_owned()], &[], resources);
        assert_eq!(names(&globbed, base), vec!["www/en/index.html"]);
    }

    #[test]
    fn test_missing_include_is_skipped() {
        let dir = tempdir().unwrap();
        let result = scan_files(dir.path(), &["nowhere".to_owned()], &[], resources);
        assert!(result.files.is_empty());
    }
}
