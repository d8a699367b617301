//! Public body directory.
//!
//! Maps institution names and portal URLs to the numeric ids the draft form
//! expects. Loaded from a CSV export with `name`, `url` (or `url_name`) and
//! `id` columns; read-only once loaded.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error_handling::DirectoryError;

/// One institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicBody {
    pub id: String,
    pub name: String,
    /// Portal URL or bare `url_name` slug
    pub url: String,
}

impl PublicBody {
    /// Last path segment of `url`.
    pub fn slug(&self) -> &str {
        slug_of(&self.url)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublicBodyDirectory {
    bodies: Vec<PublicBody>,
}

impl PublicBodyDirectory {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DirectoryError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_reader(file)?;
        log::debug!(
            "Loaded {} public bodies from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    /// Reads CSV with a header row. Rows without an id are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let column = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let name_col = column(&["name"]).ok_or(DirectoryError::MissingColumn { column: "name" })?;
        let id_col = column(&["id"]).ok_or(DirectoryError::MissingColumn { column: "id" })?;
        let url_col = column(&["url", "url_name"]);

        let mut bodies = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let id = record.get(id_col).unwrap_or_default();
            if id.is_empty() {
                continue;
            }
            bodies.push(PublicBody {
                id: id.to_string(),
                name: record.get(name_col).unwrap_or_default().to_string(),
                url: url_col
                    .and_then(|c| record.get(c))
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        Ok(Self { bodies })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Looks a body up by numeric id, exact name (case-insensitive), portal
    /// URL or the URL's trailing slug.
    pub fn resolve(&self, key: &str) -> Option<&PublicBody> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        if key.chars().all(|c| c.is_ascii_digit()) {
            if let Some(body) = self.bodies.iter().find(|b| b.id == key) {
                return Some(body);
            }
        }
        if let Some(body) = self
            .bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(key))
        {
            return Some(body);
        }
        let slug = slug_of(key);
        self.bodies
            .iter()
            .filter(|b| !b.url.is_empty())
            .find(|b| b.url == key || b.slug() == slug)
    }

    /// Bodies whose name contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&PublicBody> {
        let needle = query.trim().to_lowercase();
        self.bodies
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn slug_of(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}
