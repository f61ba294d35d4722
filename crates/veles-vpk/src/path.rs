//! Path handling for VPK lookups.
//!
//! VPK directory trees always use `/` separators; queries may arrive with
//! either separator and in any case. Paths are handled as plain strings
//! rather than [`std::path::Path`] so behavior does not vary by host
//! platform.

/// A lookup path split into the triple the index is keyed by.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PathParts {
    /// Extension including the leading dot, or `""` when the filename has
    /// none.
    pub extension: String,
    /// Parent directory without a leading separator.
    pub directory: String,
    /// Filename stem without the extension.
    pub filename: String,
}

/// Split a lookup path into case-folded `(extension, directory, filename)`.
///
/// Follows filesystem-path conventions: the extension is the suffix after
/// the last dot (dot included), a lone leading `.` marks a dotfile rather
/// than an extension, and a single leading separator is stripped from the
/// directory.
pub(crate) fn split(path: &str) -> PathParts {
    let path = path.replace('\\', "/");

    let (directory, basename) = match path.rsplit_once('/') {
        Some((directory, basename)) => {
            (directory.strip_prefix('/').unwrap_or(directory), basename)
        }
        None => ("", path.as_str()),
    };

    let (filename, extension) = match basename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, format!(".{extension}")),
        _ => (basename, String::new()),
    };

    PathParts {
        extension: extension.to_ascii_lowercase(),
        directory: directory.to_ascii_lowercase(),
        filename: filename.to_ascii_lowercase(),
    }
}

/// Lexically normalize a path.
///
/// Converts `\` separators to `/`, resolves `.` and `..` components, and
/// drops empty components, which also strips leading, trailing, and
/// doubled separators. The root forms `""`, `"/"`, and `"\"` all normalize
/// to `""`.
pub(crate) fn normalize(path: &str) -> String {
    let mut components: Vec<&str> = Vec::new();
    for component in path.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => match components.last() {
                Some(&"..") | None => components.push(".."),
                Some(_) => {
                    components.pop();
                }
            },
            other => components.push(other),
        }
    }
    components.join("/")
}

/// Parent of a normalized path, or `""` when it has none.
pub(crate) fn parent(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Final component of a normalized path.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_path() {
        let parts = split("Materials/Concrete/Floor.VMT");
        assert_eq!(parts.extension, ".vmt");
        assert_eq!(parts.directory, "materials/concrete");
        assert_eq!(parts.filename, "floor");
    }

    #[test]
    fn test_split_strips_one_leading_separator() {
        let parts = split("/a/b/c.txt");
        assert_eq!(parts.directory, "a/b");

        let parts = split("/c.txt");
        assert_eq!(parts.directory, "");
        assert_eq!(parts.filename, "c");
    }

    #[test]
    fn test_split_backslash_separators() {
        let parts = split(r"models\weapons\shotgun.mdl");
        assert_eq!(parts.extension, ".mdl");
        assert_eq!(parts.directory, "models/weapons");
        assert_eq!(parts.filename, "shotgun");
    }

    #[test]
    fn test_split_dotfile_and_extensionless() {
        let parts = split("scripts/.config");
        assert_eq!(parts.extension, "");
        assert_eq!(parts.filename, ".config");

        let parts = split("readme");
        assert_eq!(parts.extension, "");
        assert_eq!(parts.directory, "");
        assert_eq!(parts.filename, "readme");
    }

    #[test]
    fn test_split_multiple_dots() {
        let parts = split("sound/ambient.cache.bin");
        assert_eq!(parts.extension, ".bin");
        assert_eq!(parts.filename, "ambient.cache");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("models/weapons/"), "models/weapons");
        assert_eq!(normalize(r"models\weapons"), "models/weapons");
        assert_eq!(normalize("a/./b/../c"), "a/c");
        assert_eq!(normalize("a//b"), "a/b");
        assert_eq!(normalize("../a"), "../a");
    }

    #[test]
    fn test_normalize_root_forms() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize(r"\"), "");
    }

    #[test]
    fn test_parent_and_file_name() {
        assert_eq!(parent("models/weapons"), "models");
        assert_eq!(parent("models"), "");
        assert_eq!(parent(""), "");
        assert_eq!(file_name("models/weapons"), "weapons");
        assert_eq!(file_name("models"), "models");
    }
}
