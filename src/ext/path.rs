use std::path::{Path, PathBuf};

/// Extension trait for Path with the helpers kiln needs for template paths
pub trait PathExt {
    /// The directory a template lives in. A bare file name yields an empty
    /// path, which joins relative to the working directory.
    ///
    /// # Examples
    /// ```
    /// use kiln::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// assert_eq!(Path::new("deploy/web.yml").template_dir(), PathBuf::from("deploy"));
    /// assert_eq!(Path::new("web.yml").template_dir(), PathBuf::new());
    /// ```
    fn template_dir(&self) -> PathBuf;

    /// Final component for log lines, falling back to the whole path.
    fn display_name(&self) -> String;
}

impl PathExt for Path {
    fn template_dir(&self) -> PathBuf {
        self.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    fn display_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_dir_of_nested_and_bare_paths() {
        assert_eq!(
            Path::new("/srv/config/deploy/web.yml").template_dir(),
            PathBuf::from("/srv/config/deploy")
        );
        assert_eq!(Path::new("web.yml").template_dir(), PathBuf::new());
        assert_eq!(Path::new("/").template_dir(), PathBuf::new());
    }

    #[test]
    fn display_name_uses_the_file_name() {
        assert_eq!(Path::new("deploy/web.yml.j2").display_name(), "web.yml.j2");
        assert_eq!(Path::new("/").display_name(), "/");
    }
}
