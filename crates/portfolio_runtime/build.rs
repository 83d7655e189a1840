use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CATALOG_FILE: &str = "app_catalog.toml";
const KNOWN_APP_IDS: &[&str] = &[
    "terminal",
    "about",
    "projects",
    "contact",
    "certifications",
    "settings",
    "trash",
    "phishing",
    "nmap",
    "metasploit",
    "john",
    "wireshark",
];
const LAUNCHER_GROUPS: &[&str] = &["apps", "attacks", "hidden"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowDefaults {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IconGrid {
    cell_size: u32,
    padding_x: f64,
    padding_y: f64,
    mobile_breakpoint: f64,
    mobile_max_cell_size: f64,
    mobile_columns: u32,
    mobile_gutter: f64,
    mobile_padding_x: f64,
    mobile_padding_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    app_id: String,
    title: String,
    desktop_label: Option<String>,
    category: String,
    description: Option<String>,
    launcher: String,
    desktop_cell: Option<[i32; 2]>,
    mobile_cell: Option<[i32; 2]>,
    window: WindowDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DockEntry {
    entry_id: String,
    label: String,
    app_id: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileItem {
    id: String,
    name: String,
    kind: String,
    content: Option<String>,
    date_created: String,
    date_modified: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Folder {
    id: String,
    name: String,
    position: Point,
    #[serde(default)]
    items: Vec<FileItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Catalog {
    schema_version: u32,
    icon_grid: IconGrid,
    #[serde(rename(deserialize = "app"))]
    apps: Vec<AppEntry>,
    dock: Vec<DockEntry>,
    folder_window: WindowDefaults,
    #[serde(default, rename(deserialize = "folder"))]
    folders: Vec<Folder>,
    #[serde(default)]
    trash: Vec<FileItem>,
}

fn validate(catalog: &Catalog) -> Result<(), String> {
    if catalog.schema_version != 1 {
        return Err(format!(
            "catalog schema mismatch: expected 1 found {}",
            catalog.schema_version
        ));
    }
    if catalog.icon_grid.cell_size == 0 || catalog.icon_grid.mobile_columns == 0 {
        return Err("icon grid sizes must be non-zero".to_string());
    }

    let mut app_ids = HashSet::new();
    let mut desktop_cells = HashSet::new();
    let mut mobile_cells = HashSet::new();
    for app in &catalog.apps {
        if !KNOWN_APP_IDS.contains(&app.app_id.as_str()) {
            return Err(format!("unknown app id `{}`", app.app_id));
        }
        if !app_ids.insert(app.app_id.as_str()) {
            return Err(format!("duplicate app id `{}`", app.app_id));
        }
        if !LAUNCHER_GROUPS.contains(&app.launcher.as_str()) {
            return Err(format!(
                "app `{}` has unknown launcher group `{}`",
                app.app_id, app.launcher
            ));
        }
        if let Some(cell) = app.desktop_cell {
            if !desktop_cells.insert(cell) {
                return Err(format!("app `{}` reuses desktop cell {cell:?}", app.app_id));
            }
        }
        if let Some(cell) = app.mobile_cell {
            if !mobile_cells.insert(cell) {
                return Err(format!("app `{}` reuses mobile cell {cell:?}", app.app_id));
            }
        }
        if app.window.width <= 0 || app.window.height <= 0 {
            return Err(format!("app `{}` has an empty default window", app.app_id));
        }
    }
    if let Some(missing) = KNOWN_APP_IDS.iter().find(|id| !app_ids.contains(**id)) {
        return Err(format!("app `{missing}` has no catalog entry"));
    }

    let mut dock_ids = HashSet::new();
    for entry in &catalog.dock {
        if !dock_ids.insert(entry.entry_id.as_str()) {
            return Err(format!("duplicate dock entry `{}`", entry.entry_id));
        }
        match (&entry.app_id, &entry.url) {
            (Some(app_id), None) if app_ids.contains(app_id.as_str()) => {}
            (Some(app_id), None) => {
                return Err(format!(
                    "dock entry `{}` references unknown app `{app_id}`",
                    entry.entry_id
                ))
            }
            (None, Some(url)) if url.starts_with("https://") => {}
            _ => {
                return Err(format!(
                    "dock entry `{}` needs exactly one of app_id or an https url",
                    entry.entry_id
                ))
            }
        }
    }

    let mut folder_ids = HashSet::new();
    for folder in &catalog.folders {
        if !folder_ids.insert(folder.id.as_str()) {
            return Err(format!("duplicate folder id `{}`", folder.id));
        }
    }
    Ok(())
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join(CATALOG_FILE);
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: Catalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if let Err(err) = validate(&catalog) {
        panic!("invalid {}: {err}", path.display());
    }

    let json = serde_json::to_string_pretty(&catalog).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated desktop catalog JSON.\n\
pub const DESKTOP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
