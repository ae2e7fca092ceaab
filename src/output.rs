use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::emitter::CellOptions;
use crate::error::Result;
use crate::table::{self, Record};

pub const TABLE_FILE: &str = "table.tex";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub root: PathBuf,
    pub table_number: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub table_dir: PathBuf,
    pub table_file: PathBuf,
    pub graph_files: Vec<PathBuf>,
}

impl Session {
    pub fn new(root: impl Into<PathBuf>, table_number: usize) -> Self {
        Self {
            root: root.into(),
            table_number,
        }
    }

    pub fn table_dir(&self) -> PathBuf {
        self.root.join(format!("table_{:03}", self.table_number))
    }

    pub fn graph_path(&self, graph_number: usize) -> PathBuf {
        self.table_dir()
            .join(format!("graph_{graph_number:04}.tikz"))
    }
}

/// Nothing is written unless all records render.
pub fn export_table(
    session: &Session,
    records: &[Record],
    options: &CellOptions,
) -> Result<ExportSummary> {
    let cells = table::render_cells(records, options)?;
    let document = table::assemble(&cells);

    let table_dir = session.table_dir();
    fs::create_dir_all(&table_dir)?;

    let mut graph_files = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let path = session.graph_path(i + 1);
        write_file(&path, cell)?;
        graph_files.push(path);
    }

    let table_file = table_dir.join(TABLE_FILE);
    write_file(&table_file, &document)?;
    info!(dir = %table_dir.display(), graphs = graph_files.len(), "table exported");

    Ok(ExportSummary {
        table_dir,
        table_file,
        graph_files,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut text = contents.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text)?;
    Ok(())
}
