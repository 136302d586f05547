use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters allowed to survive in an uploaded filename. Everything
    /// else (path separators, control characters, spaces, shell metachars)
    /// is stripped before the name touches the filesystem.
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
}

/// Sanitize an uploaded filename for use inside the file-store.
///
/// Takes the last path component (so `../../etc/passwd` and
/// `C:\evil\shell.jpg` both collapse to their basename), strips every
/// character outside `[A-Za-z0-9._-]`, and refuses names that end up empty
/// or consist only of dots.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let basename = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(basename, "");
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_filename("car.jpg"), Some("car.jpg".to_string()));
        assert_eq!(
            sanitize_filename("my-car_01.PNG"),
            Some("my-car_01.PNG".to_string())
        );
    }

    #[test]
    fn strips_path_components() {
        assert_eq!(
            sanitize_filename("../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(
            sanitize_filename(r"C:\uploads\car.jpg"),
            Some("car.jpg".to_string())
        );
    }

    #[test]
    fn strips_control_and_special_chars() {
        assert_eq!(
            sanitize_filename("car name\x00!.jpg"),
            Some("carname.jpg".to_string())
        );
    }

    #[test]
    fn rejects_names_with_nothing_left() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("...."), None);
        assert_eq!(sanitize_filename("////"), None);
    }

    #[test]
    fn leading_dots_do_not_survive() {
        assert_eq!(sanitize_filename(".hidden.png"), Some("hidden.png".to_string()));
    }
}
