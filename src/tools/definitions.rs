// Tool definitions handed to the model

use crate::brain::ToolDefinition;
use crate::tools::action::{FIND_NEXT, FIND_ON_PAGE, OPEN_PATH, PAGE_DOWN, PAGE_UP, TOOL_NAMES};
use crate::tools::error::ToolConfigError;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ToolEntry {
    description: Option<String>,
}

/// The fixed browser tool set
#[derive(Debug, Clone)]
pub struct ToolSet {
    definitions: Vec<ToolDefinition>,
}

impl ToolSet {
    /// Build the tool set, preferring descriptions from `overrides`
    pub fn new(overrides: &HashMap<String, String>) -> Self {
        let definitions = TOOL_NAMES
            .iter()
            .map(|name| {
                let description = overrides
                    .get(*name)
                    .cloned()
                    .unwrap_or_else(|| default_description(name).to_string());
                ToolDefinition {
                    name: name.to_string(),
                    description,
                    input_schema: input_schema(name),
                }
            })
            .collect();

        Self { definitions }
    }

    /// Build the tool set from a tools.toml file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let overrides = load_tool_descriptions(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "failed to load tool descriptions, using defaults");
            HashMap::new()
        });
        Self::new(&overrides)
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}

fn default_description(name: &str) -> &'static str {
    match name {
        OPEN_PATH => {
            "Open a local file, a directory or a web page at the given path or URL in the \
             text-based file browser and return the first page of its content."
        }
        PAGE_UP => {
            "Scroll the viewport up one page in the current document and return the new \
             viewport content."
        }
        PAGE_DOWN => {
            "Scroll the viewport down one page in the current document and return the new \
             viewport content."
        }
        FIND_ON_PAGE => {
            "Scroll the viewport to the first page, starting from the current one, that \
             contains the search string (case-insensitive). Equivalent to Ctrl+F."
        }
        FIND_NEXT => "Scroll the viewport to the next occurrence of the last search string.",
        _ => "",
    }
}

fn input_schema(name: &str) -> serde_json::Value {
    match name {
        OPEN_PATH => json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The relative or absolute path of a local file or directory, or an http(s) URL"
                }
            },
            "required": ["path"]
        }),
        FIND_ON_PAGE => json!({
            "type": "object",
            "properties": {
                "search_string": {
                    "type": "string",
                    "description": "The string to search for on the page"
                }
            },
            "required": ["search_string"]
        }),
        _ => json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    }
}

/// Load tool descriptions from a TOML file of `[tool] description = "..."` tables
pub fn load_tool_descriptions(path: &Path) -> Result<HashMap<String, String>, ToolConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "tools.toml not found, using default descriptions");
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)?;
    let entries: HashMap<String, ToolEntry> = toml::from_str(&content)?;

    let descriptions: HashMap<String, String> = entries
        .into_iter()
        .filter_map(|(name, entry)| entry.description.map(|d| (name, d)))
        .collect();

    for name in descriptions.keys() {
        if !TOOL_NAMES.contains(&name.as_str()) {
            warn!(tool = %name, "tools.toml describes an unknown tool");
        }
    }

    debug!(path = %path.display(), tool_count = descriptions.len(), "loaded tool descriptions from config");
    Ok(descriptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_set() {
        let tools = ToolSet::default();
        let names: Vec<_> = tools.definitions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, TOOL_NAMES);

        for def in tools.definitions() {
            assert!(!def.description.is_empty());
            assert!(def.input_schema.is_object());
        }

        let open = &tools.definitions()[0];
        assert_eq!(open.input_schema["required"], json!(["path"]));
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.toml");
        std::fs::write(
            &path,
            "[open_path]\ndescription = \"Open a surf report\"\n\n[page_up]\n",
        )
        .unwrap();

        let descriptions = load_tool_descriptions(&path).unwrap();
        assert_eq!(descriptions.len(), 1);

        let tools = ToolSet::load(&path);
        assert_eq!(tools.definitions()[0].description, "Open a surf report");
        assert_eq!(tools.definitions()[1].description, default_description(PAGE_UP));
    }

    #[test]
    fn test_load_missing_file() {
        let descriptions = load_tool_descriptions(Path::new("/nonexistent/tools.toml")).unwrap();
        assert!(descriptions.is_empty());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.toml");
        std::fs::write(&path, "open_path = [").unwrap();

        assert!(load_tool_descriptions(&path).is_err());
        let tools = ToolSet::load(&path);
        assert_eq!(tools.definitions().len(), 5);
    }
}
