//! NotebookRead and NotebookEdit tools.

use serde::Deserialize;
use tracing::info;

use crate::error::ToolResult;
use crate::notebook::{CellType, Notebook, NotebookError};
use crate::server::ToolDefinition;
use crate::storage::FileStore;

#[derive(Debug, Deserialize)]
pub struct NotebookReadParams {
    pub notebook_path: String,
    #[serde(default)]
    pub cell_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotebookEditParams {
    pub notebook_path: String,
    pub new_source: String,
    #[serde(default)]
    pub cell_id: Option<String>,
    #[serde(default)]
    pub edit_mode: EditMode,
    #[serde(default)]
    pub cell_type: Option<CellType>,
}

/// What `NotebookEdit` does with the target cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Replace,
    Insert,
    Delete,
}

pub fn read_definition() -> ToolDefinition {
    ToolDefinition {
        name: "NotebookRead".to_owned(),
        description: "Reads a Jupyter notebook (.ipynb file) and returns all of the cells with their outputs."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "notebook_path": {
                    "type": "string",
                    "description": "The absolute path to the Jupyter notebook file to read (must be absolute, not relative)"
                },
                "cell_id": {
                    "type": "string",
                    "description": "The ID of a specific cell to read. If not provided, all cells will be read."
                }
            },
            "required": ["notebook_path"]
        }),
    }
}

pub fn edit_definition() -> ToolDefinition {
    ToolDefinition {
        name: "NotebookEdit".to_owned(),
        description: "Completely replaces the contents of a specific cell in a Jupyter notebook \
            (.ipynb file) with new source, or inserts/deletes a cell."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "notebook_path": {
                    "type": "string",
                    "description": "The absolute path to the Jupyter notebook file to edit (must be absolute, not relative)"
                },
                "cell_id": {
                    "type": "string",
                    "description": "The ID of the cell to edit. When inserting a new cell, the new cell will be inserted after the cell with this ID, or at the beginning if not specified."
                },
                "new_source": {
                    "type": "string",
                    "description": "The new source for the cell"
                },
                "cell_type": {
                    "type": "string",
                    "enum": ["code", "markdown", "raw"],
                    "description": "The type of the cell (code, markdown or raw). If not specified, it defaults to the current cell type. If using edit_mode=insert, this is required."
                },
                "edit_mode": {
                    "type": "string",
                    "enum": ["replace", "insert", "delete"],
                    "description": "The type of edit to make (replace, insert, delete). Defaults to replace."
                }
            },
            "required": ["notebook_path", "new_source"]
        }),
    }
}

fn load(files: &FileStore, notebook_path: &str) -> ToolResult<(std::path::PathBuf, Notebook)> {
    let path = files.resolve(notebook_path)?;
    let json = files.read_text(&path)?;
    let notebook = Notebook::parse(&json)?;
    Ok((path, notebook))
}

pub fn execute_read(files: &FileStore, params: NotebookReadParams) -> ToolResult<String> {
    let (_, notebook) = load(files, &params.notebook_path)?;
    Ok(notebook.render(params.cell_id.as_deref())?)
}

pub fn execute_edit(files: &FileStore, params: NotebookEditParams) -> ToolResult<String> {
    let (path, mut notebook) = load(files, &params.notebook_path)?;

    let message = match params.edit_mode {
        EditMode::Insert => {
            let cell_type = params.cell_type.ok_or(NotebookError::MissingCellType)?;
            let id = notebook.insert_cell(
                params.cell_id.as_deref(),
                cell_type,
                &params.new_source,
            )?;
            format!(
                "Successfully inserted new {} cell with ID {id}",
                cell_type.as_str()
            )
        }
        EditMode::Delete => {
            let id = params
                .cell_id
                .ok_or(NotebookError::MissingCellId("deleting"))?;
            notebook.delete_cell(&id)?;
            format!("Successfully deleted cell with ID {id}")
        }
        EditMode::Replace => {
            let id = params
                .cell_id
                .ok_or(NotebookError::MissingCellId("replacing"))?;
            notebook.replace_cell(&id, &params.new_source, params.cell_type)?;
            format!("Successfully updated cell with ID {id}")
        }
    };

    files.write_text(&path, &notebook.to_json_pretty()?)?;
    info!(path = %path.display(), mode = ?params.edit_mode, "notebook edited");
    Ok(message)
}
