use crate::models::Clipping;
use crate::parser::parse_clippings;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("The file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("The file '{}' is empty", .0.display())]
    Empty(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn read_clippings(path: &Path) -> Result<Vec<Clipping>, ReadError> {
    let io_error = |source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }

    if fs::metadata(path).map_err(io_error)?.len() == 0 {
        return Err(ReadError::Empty(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(io_error)?;
    let clippings = parse_clippings(&content);

    let without_metadata = clippings.iter().filter(|c| c.date.is_none()).count();
    if without_metadata > 0 {
        debug!("{} clippings have no metadata line", without_metadata);
    }

    info!("Read {} clippings from {}", clippings.len(), path.display());

    Ok(clippings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTENT: &str = "Book Title 1 (Author Name 1)
- Your Highlight on page 10 | location 100-105 | Added on Monday, January 2, 2023

This is the first highlighted text.
==========
Book Title 2 (Author Name 2)
- Your Highlight on page 20 | location 200-205 | Added on Tuesday, January 3, 2023

This is the second highlighted text.
==========
";

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("My Clippings.txt");

        let result = read_clippings(&path);

        assert!(matches!(result, Err(ReadError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_read_empty_file() {
        let file = NamedTempFile::new().unwrap();

        let result = read_clippings(file.path());

        assert!(matches!(result, Err(ReadError::Empty(_))));
    }

    #[test]
    fn test_read_clippings() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONTENT.as_bytes()).unwrap();

        let clippings = read_clippings(file.path()).unwrap();

        assert_eq!(clippings.len(), 2);
        assert_eq!(
            clippings[0].title_author.as_deref(),
            Some("Book Title 1 (Author Name 1)")
        );
        assert_eq!(clippings[1].page, Some(20));
        assert_eq!(
            clippings[1].text.as_deref(),
            Some("This is the second highlighted text.")
        );
    }

    #[test]
    fn test_read_separators_only() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"==========\n==========\n").unwrap();

        let clippings = read_clippings(file.path()).unwrap();

        assert!(clippings.is_empty());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0xfd]).unwrap();

        let result = read_clippings(file.path());

        assert!(matches!(result, Err(ReadError::Io { .. })));
    }
}
