use crate::error::{FengShuiError, FsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

/// Span used for a boundary type the catalog does not know about.
pub const DEFAULT_BOUNDARY_SPAN: i32 = 30;

// Type names the scoring rules single out.
pub const BED: &str = "bed";
pub const DESK: &str = "desk";
pub const DOOR: &str = "door";
pub const WINDOW: &str = "window";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ObjectCategory {
    Furniture,
    Boundary,
}

/// Geometry of one object type, in grid cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub width: i32,
    pub height: i32,
    #[serde(rename = "type")]
    pub category: ObjectCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ObjectSpec {
    pub fn furniture(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            category: ObjectCategory::Furniture,
            icon: None,
        }
    }

    pub fn boundary(span: i32) -> Self {
        Self {
            width: span,
            height: 0,
            category: ObjectCategory::Boundary,
            icon: None,
        }
    }

    fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// The versioned object catalog: type name -> geometry and category.
///
/// One grid cell is one catalog unit. `grid_cell_size` and `units` are
/// carried along for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCatalog {
    pub objects: BTreeMap<String, ObjectSpec>,
    #[serde(default = "default_grid_cell_size")]
    pub grid_cell_size: u32,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_grid_cell_size() -> u32 {
    12
}

fn default_units() -> String {
    "inches".to_string()
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "type")]
    kind: String,
    width: i32,
    height: i32,
    category: ObjectCategory,
    #[serde(default)]
    icon: Option<String>,
}

impl Default for ObjectCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ObjectCatalog {
    /// Built-in catalog used whenever no catalog file is supplied.
    pub fn standard() -> Self {
        let mut objects = BTreeMap::new();
        objects.insert(
            BED.to_string(),
            ObjectSpec::furniture(80, 60).with_icon("bed"),
        );
        objects.insert(
            DESK.to_string(),
            ObjectSpec::furniture(48, 24).with_icon("desk"),
        );
        objects.insert(
            DOOR.to_string(),
            ObjectSpec::boundary(30).with_icon("door_front_door"),
        );
        objects.insert(
            WINDOW.to_string(),
            ObjectSpec::boundary(24).with_icon("window"),
        );

        Self {
            objects,
            grid_cell_size: default_grid_cell_size(),
            units: default_units(),
        }
    }

    pub fn from_json_str(content: &str) -> FsResult<Self> {
        let catalog: ObjectCatalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads `type,width,height,category[,icon]` rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> FsResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut objects = BTreeMap::new();
        for row in rdr.deserialize::<CatalogRow>() {
            let row = row?;
            objects.insert(
                row.kind.to_lowercase(),
                ObjectSpec {
                    width: row.width,
                    height: row.height,
                    category: row.category,
                    icon: row.icon.filter(|s| !s.is_empty()),
                },
            );
        }

        let catalog = Self {
            objects,
            grid_cell_size: default_grid_cell_size(),
            units: default_units(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from `.json` or `.csv`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FsResult<Self> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        if is_csv {
            Self::from_csv_reader(File::open(path)?)
        } else {
            Self::from_json_str(&fs::read_to_string(path)?)
        }
    }

    /// Loads the catalog at `path`, falling back to [`ObjectCatalog::standard`]
    /// when no path is given, the file is missing, or it fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("Using built-in object catalog");
            return Self::standard();
        };

        if !path.exists() {
            warn!(
                "Catalog file {:?} not found. Using built-in object catalog.",
                path
            );
            return Self::standard();
        }

        match Self::load_from_file(path) {
            Ok(catalog) => {
                info!(
                    "Loaded {} object types from {:?}",
                    catalog.objects.len(),
                    path
                );
                catalog
            }
            Err(e) => {
                warn!(
                    "Failed to load catalog {:?}: {}. Using built-in object catalog.",
                    path, e
                );
                Self::standard()
            }
        }
    }

    pub fn validate(&self) -> FsResult<()> {
        if self.objects.is_empty() {
            return Err(FengShuiError::Config(
                "catalog defines no object types".to_string(),
            ));
        }
        for (kind, spec) in &self.objects {
            if spec.width < 0 || spec.height < 0 {
                return Err(FengShuiError::Config(format!(
                    "object '{}' has negative dimensions {}x{}",
                    kind, spec.width, spec.height
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<&ObjectSpec> {
        self.objects.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.objects.contains_key(kind)
    }

    /// Unknown types are never boundaries.
    pub fn is_boundary(&self, kind: &str) -> bool {
        self.get(kind)
            .is_some_and(|spec| spec.category == ObjectCategory::Boundary)
    }

    /// Grid footprint `(width, height)`, at least 1x1. Unknown types are 1x1.
    pub fn footprint(&self, kind: &str) -> (i32, i32) {
        match self.get(kind) {
            Some(spec) => (spec.width.max(1), spec.height.max(1)),
            None => (1, 1),
        }
    }

    /// Length a boundary runs along its wall.
    pub fn boundary_span(&self, kind: &str) -> i32 {
        self.get(kind)
            .map(|spec| spec.width)
            .unwrap_or(DEFAULT_BOUNDARY_SPAN)
    }
}
