//! Jupyter notebook model used by `NotebookRead` / `NotebookEdit`.
//!
//! Only the fields the tools touch are typed; everything else (notebook
//! metadata, `nbformat`, per-cell metadata, outputs, attachments) is kept
//! in flattened maps so a read-modify-write cycle preserves it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notebook-level failures.
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("invalid notebook JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cell with ID {0} not found")]
    CellNotFound(String),

    #[error("cell_id is required when {0} a cell")]
    MissingCellId(&'static str),

    #[error("cell_type is required when inserting a new cell")]
    MissingCellType,
}

/// Kind of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

impl CellType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
        }
    }
}

/// Cell source as stored on disk: either one string or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for CellSource {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl CellSource {
    /// Split `text` into Jupyter's line-array form: every line keeps its
    /// trailing `\n` except the last.
    pub fn from_text(text: &str) -> Self {
        Self::Lines(text.split_inclusive('\n').map(str::to_owned).collect())
    }

    /// The full source text.
    pub fn text(&self) -> String {
        match self {
            Self::Lines(lines) => lines.concat(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// One notebook cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub cell_type: CellType,
    #[serde(default)]
    pub source: CellSource,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Cell {
    /// A fresh cell. Code cells start with empty outputs and a null
    /// execution count.
    pub fn new(id: String, cell_type: CellType, source: &str) -> Self {
        let mut cell = Self {
            id: Some(id),
            cell_type,
            source: CellSource::from_text(source),
            rest: Map::new(),
        };
        cell.rest.insert("metadata".to_owned(), Value::Object(Map::new()));
        cell.reset_execution_state();
        cell
    }

    /// Id of this cell; empty if ids were never assigned.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Outputs recorded for this cell, if any.
    pub fn outputs(&self) -> &[Value] {
        self.rest
            .get("outputs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Change the cell type, adding or dropping execution state to match.
    pub fn set_type(&mut self, cell_type: CellType) {
        if self.cell_type != cell_type {
            self.cell_type = cell_type;
            self.reset_execution_state();
        }
    }

    fn reset_execution_state(&mut self) {
        if self.cell_type == CellType::Code {
            self.rest.insert("outputs".to_owned(), Value::Array(Vec::new()));
            self.rest.insert("execution_count".to_owned(), Value::Null);
        } else {
            self.rest.remove("outputs");
            self.rest.remove("execution_count");
        }
    }
}

/// A parsed `.ipynb` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Notebook {
    /// Parse notebook JSON and assign positional ids to cells lacking one.
    pub fn parse(json: &str) -> Result<Self, NotebookError> {
        let mut notebook: Self = serde_json::from_str(json)?;
        notebook.ensure_cell_ids();
        Ok(notebook)
    }

    /// Serialize with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, NotebookError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Give every cell without an id the id `cell-<position>` (1-based),
    /// moving up to the next free number when that id is already set
    /// explicitly on another cell.
    ///
    /// Depends only on the document: the same document always gets the
    /// same ids, and running it twice changes nothing.
    pub fn ensure_cell_ids(&mut self) {
        let mut taken: HashSet<String> = self
            .cells
            .iter()
            .filter_map(|c| c.id.as_deref())
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect();

        for (index, cell) in self.cells.iter_mut().enumerate() {
            if cell.id.as_deref().is_none_or(str::is_empty) {
                let id = (index + 1..)
                    .map(|n| format!("cell-{n}"))
                    .find(|candidate| !taken.contains(candidate))
                    .unwrap_or_default();
                taken.insert(id.clone());
                cell.id = Some(id);
            }
        }
    }

    /// Position of the cell with `id`.
    pub fn position(&self, id: &str) -> Result<usize, NotebookError> {
        self.cells
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| NotebookError::CellNotFound(id.to_owned()))
    }

    /// Replace the source of cell `id`, optionally changing its type.
    pub fn replace_cell(
        &mut self,
        id: &str,
        source: &str,
        cell_type: Option<CellType>,
    ) -> Result<(), NotebookError> {
        let index = self.position(id)?;
        let cell = &mut self.cells[index];
        cell.source = CellSource::from_text(source);
        if let Some(cell_type) = cell_type {
            cell.set_type(cell_type);
        }
        Ok(())
    }

    /// Insert a new cell after `after` (or at the start) and return its id.
    pub fn insert_cell(
        &mut self,
        after: Option<&str>,
        cell_type: CellType,
        source: &str,
    ) -> Result<String, NotebookError> {
        let index = match after {
            Some(id) => self.position(id)? + 1,
            None => 0,
        };
        let id = self.next_free_id();
        self.cells.insert(index, Cell::new(id.clone(), cell_type, source));
        Ok(id)
    }

    /// Remove cell `id`.
    pub fn delete_cell(&mut self, id: &str) -> Result<Cell, NotebookError> {
        let index = self.position(id)?;
        Ok(self.cells.remove(index))
    }

    /// First `cell-<n>` not already taken, starting from the post-insert
    /// cell count.
    fn next_free_id(&self) -> String {
        (self.cells.len() + 1..)
            .map(|n| format!("cell-{n}"))
            .find(|candidate| self.cells.iter().all(|c| c.id() != candidate.as_str()))
            .unwrap_or_default()
    }

    /// Render all cells, or only `cell_id`, for display.
    pub fn render(&self, cell_id: Option<&str>) -> Result<String, NotebookError> {
        let selected: Vec<(usize, &Cell)> = match cell_id {
            Some(id) => {
                let index = self.position(id)?;
                vec![(index, &self.cells[index])]
            }
            None => self.cells.iter().enumerate().collect(),
        };

        let rendered: Vec<String> = selected
            .into_iter()
            .map(|(index, cell)| render_cell(index, cell))
            .collect();
        Ok(rendered.join("\n---\n"))
    }
}

fn render_cell(index: usize, cell: &Cell) -> String {
    let mut out = format!(
        "Cell {} ({}):\nID: {}\nSource:\n{}\n",
        index + 1,
        cell.cell_type.as_str(),
        cell.id(),
        cell.source.text()
    );

    let outputs = cell.outputs();
    if !outputs.is_empty() {
        out.push_str("Outputs:\n");
        for (i, output) in outputs.iter().enumerate() {
            let pretty = serde_json::to_string_pretty(output).unwrap_or_else(|_| output.to_string());
            out.push_str(&format!("  Output {}: {pretty}\n", i + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
  "cells": [
    {
      "cell_type": "markdown",
      "metadata": {},
      "source": ["# Title\n", "intro"]
    },
    {
      "cell_type": "code",
      "execution_count": 3,
      "metadata": {"tags": ["x"]},
      "outputs": [{"output_type": "stream", "name": "stdout", "text": ["hi\n"]}],
      "source": "print('hi')"
    },
    {
      "id": "custom",
      "cell_type": "code",
      "execution_count": null,
      "metadata": {},
      "outputs": [],
      "source": []
    }
  ],
  "metadata": {"kernelspec": {"name": "python3"}},
  "nbformat": 4,
  "nbformat_minor": 5
}"##;

    fn sample() -> Notebook {
        Notebook::parse(SAMPLE).expect("sample parses")
    }

    fn ids(nb: &Notebook) -> Vec<&str> {
        nb.cells.iter().map(Cell::id).collect()
    }

    #[test]
    fn test_missing_ids_derived_from_position() {
        let nb = sample();
        assert_eq!(ids(&nb), vec!["cell-1", "cell-2", "custom"]);
    }

    #[test]
    fn test_id_assignment_is_idempotent() {
        let mut nb = sample();
        nb.ensure_cell_ids();
        let again = Notebook::parse(SAMPLE).expect("parse");
        assert_eq!(ids(&nb), ids(&again));
    }

    #[test]
    fn test_positional_id_skips_explicit_id() {
        let nb = Notebook::parse(
            r#"{"cells":[{"cell_type":"code","source":[]},{"id":"cell-1","cell_type":"code","source":[]}],"metadata":{},"nbformat":4,"nbformat_minor":5}"#,
        )
        .expect("parse");
        assert_eq!(ids(&nb), vec!["cell-2", "cell-1"]);
        assert_eq!(nb.position("cell-1").expect("explicit id"), 1);
    }

    #[test]
    fn test_source_forms() {
        let nb = sample();
        assert_eq!(nb.cells[0].source.text(), "# Title\nintro");
        assert_eq!(nb.cells[1].source.text(), "print('hi')");
        assert_eq!(
            CellSource::from_text("a\nb"),
            CellSource::Lines(vec!["a\n".to_owned(), "b".to_owned()])
        );
        assert_eq!(CellSource::from_text(""), CellSource::Lines(Vec::new()));
    }

    #[test]
    fn test_replace_keeps_outputs_when_type_unchanged() {
        let mut nb = sample();
        nb.replace_cell("cell-2", "print('bye')", None).expect("replace");
        assert_eq!(nb.cells[1].source.text(), "print('bye')");
        assert_eq!(nb.cells[1].outputs().len(), 1);
    }

    #[test]
    fn test_replace_with_type_change() {
        let mut nb = sample();
        nb.replace_cell("cell-2", "now prose", Some(CellType::Markdown))
            .expect("replace");
        let cell = &nb.cells[1];
        assert_eq!(cell.cell_type, CellType::Markdown);
        assert!(!cell.rest.contains_key("outputs"));
        assert!(!cell.rest.contains_key("execution_count"));
        assert!(cell.rest.contains_key("metadata"));

        nb.replace_cell("cell-1", "x = 1", Some(CellType::Code))
            .expect("replace");
        assert_eq!(nb.cells[0].rest.get("execution_count"), Some(&Value::Null));
        assert_eq!(nb.cells[0].rest.get("outputs"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn test_insert_after_and_at_start() {
        let mut nb = sample();
        let id = nb
            .insert_cell(Some("cell-1"), CellType::Code, "y = 2")
            .expect("insert");
        assert_eq!(id, "cell-4");
        assert_eq!(ids(&nb), vec!["cell-1", "cell-4", "cell-2", "custom"]);

        let first = nb.insert_cell(None, CellType::Markdown, "top").expect("insert");
        assert_eq!(first, "cell-5");
        assert_eq!(nb.cells[0].id(), "cell-5");
        assert!(!nb.cells[0].rest.contains_key("outputs"));
    }

    #[test]
    fn test_insert_skips_taken_ids() {
        let mut nb = Notebook::parse(
            r#"{"cells":[{"id":"cell-2","cell_type":"code","source":[]}],"metadata":{},"nbformat":4,"nbformat_minor":5}"#,
        )
        .expect("parse");
        let id = nb.insert_cell(None, CellType::Code, "").expect("insert");
        assert_eq!(id, "cell-3");
    }

    #[test]
    fn test_delete_and_unknown_id() {
        let mut nb = sample();
        let removed = nb.delete_cell("custom").expect("delete");
        assert_eq!(removed.id(), "custom");
        assert_eq!(nb.cells.len(), 2);
        assert!(matches!(
            nb.delete_cell("custom"),
            Err(NotebookError::CellNotFound(id)) if id == "custom"
        ));
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let nb = sample();
        let json = nb.to_json_pretty().expect("serialize");
        let value: Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["nbformat"], 4);
        assert_eq!(value["metadata"]["kernelspec"]["name"], "python3");
        assert_eq!(value["cells"][1]["metadata"]["tags"][0], "x");
        assert_eq!(value["cells"][1]["execution_count"], 3);
        assert_eq!(value["cells"][0]["id"], "cell-1");
        assert!(json.contains("\n  \"cells\""));
    }

    #[test]
    fn test_render_all_and_single() {
        let nb = sample();
        let all = nb.render(None).expect("render");
        assert!(all.starts_with("Cell 1 (markdown):\nID: cell-1\nSource:\n# Title\nintro\n"));
        assert!(all.contains("\n---\nCell 2 (code):"));
        assert!(all.contains("Outputs:\n  Output 1: {"));

        let one = nb.render(Some("custom")).expect("render");
        assert!(one.starts_with("Cell 3 (code):\nID: custom\n"));
        assert!(!one.contains("---"));

        assert!(matches!(
            nb.render(Some("nope")),
            Err(NotebookError::CellNotFound(_))
        ));
    }
}
