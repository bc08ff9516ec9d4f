//! CSV snapshots of liked and saved lists.
//!
//! Snapshot files mirror the user's current state: when there is nothing to
//! write, the file is not produced and a stale copy at the same path is
//! removed.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::{ListView, Location};

/// Writes every location of the liked lists as `Name,Type` rows.
///
/// # Returns
///
/// `Ok(Some(path))` when a file was written, `Ok(None)` when there were no
/// rows (any existing file at `path` is removed).
pub fn write_liked_locations(path: &Path, liked: &[ListView]) -> Result<Option<PathBuf>> {
    let rows: Vec<[&str; 2]> = liked
        .iter()
        .flat_map(|list| list.locations.iter())
        .map(|location| [location.name.as_str(), location.category.as_str()])
        .collect();

    write_snapshot(path, &["Name", "Type"], &rows)
}

/// Writes every location of the saved lists as `List Name,Name,Type` rows.
///
/// Same return convention as [`write_liked_locations`].
pub fn write_saved_lists(path: &Path, saved: &[ListView]) -> Result<Option<PathBuf>> {
    let rows: Vec<[&str; 3]> = saved
        .iter()
        .flat_map(|list| {
            list.locations.iter().map(move |location| {
                [
                    list.name.as_str(),
                    location.name.as_str(),
                    location.category.as_str(),
                ]
            })
        })
        .collect();

    write_snapshot(path, &["List Name", "Name", "Type"], &rows)
}

/// Writes a single list as `name,category,latitude,longitude` rows.
pub fn write_list_csv(path: &Path, locations: &[Location]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    writer
        .write_record(["name", "category", "latitude", "longitude"])
        .context("Failed to write CSV header")?;
    for location in locations {
        writer
            .write_record([
                location.name.clone(),
                location.category.to_string(),
                location.latitude.to_string(),
                location.longitude.to_string(),
            ])
            .with_context(|| format!("Failed to write row for '{}'", location.name))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

fn write_snapshot<const N: usize>(
    path: &Path,
    header: &[&str; N],
    rows: &[[&str; N]],
) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove stale file: {}", path.display()))?;
            debug!(path = %path.display(), "Removed stale snapshot");
        }
        return Ok(None);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    writer
        .write_record(header)
        .context("Failed to write CSV header")?;
    for row in rows {
        writer.write_record(row).context("Failed to write CSV row")?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    debug!(path = %path.display(), rows = rows.len(), "Wrote snapshot");
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    fn list(name: &str, locations: Vec<Location>) -> ListView {
        ListView {
            name: name.to_string(),
            owner: "ana".to_string(),
            likes: 0,
            locations,
        }
    }

    #[test]
    fn test_write_liked_locations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("liked_locations.csv");
        let liked = vec![
            list("A", vec![Location::new("Club X", Category::Nightclub, 1.0, 2.0)]),
            list("B", vec![Location::new("Pub, Old Town", Category::Bar, 1.0, 2.0)]),
        ];

        let written = write_liked_locations(&path, &liked).unwrap();

        assert_eq!(written, Some(path.clone()));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Name,Type\nClub X,Nightclub\n\"Pub, Old Town\",Bar\n");
    }

    #[test]
    fn test_write_saved_lists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved_lists.csv");
        let saved = vec![list(
            "Date Night",
            vec![
                Location::new("Trattoria", Category::Restaurant, 1.0, 2.0),
                Location::new("Pub", Category::Bar, 1.0, 2.0),
            ],
        )];

        write_saved_lists(&path, &saved).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "List Name,Name,Type\nDate Night,Trattoria,Restaurant\nDate Night,Pub,Bar\n"
        );
    }

    #[test]
    fn test_empty_snapshot_removes_stale_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("liked_locations.csv");
        fs::write(&path, "Name,Type\nOld,Bar\n").unwrap();

        let written = write_liked_locations(&path, &[]).unwrap();

        assert_eq!(written, None);
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_snapshot_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved_lists.csv");

        assert_eq!(write_saved_lists(&path, &[list("Empty", vec![])]).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_list_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Mine_saved.csv");

        write_list_csv(&path, &[Location::new("Club X", Category::Nightclub, 47.4245, 9.3767)])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "name,category,latitude,longitude\nClub X,Nightclub,47.4245,9.3767\n"
        );
    }
}
