use std::io::Read;

use tracing::{debug, info};

use crate::annotate::{self, CellLabels};
use crate::emitter::{self, CellOptions};
use crate::error::{Error, Result};
use crate::graph6;
use crate::layout;
use crate::tikz_renderer;

pub const CELLS_PER_ROW: usize = 6;
pub const TABLE_HEADER: &str = "\\begin{longtable}{|c|c|c|c|c|c|}\n\\hline\n";
pub const TABLE_FOOTER: &str = "\\\\ \\hline\n\\end{longtable}\n";
pub const ROW_SEPARATOR: &str = "\\\\ \\hline\n";
pub const COLUMN_SEPARATOR: &str = "&";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Column {
    /// The row ends before this column.
    #[default]
    Missing,
    /// The column is present but empty.
    Blank,
    Text(String),
}

impl Column {
    fn from_field(field: Option<&str>) -> Self {
        match field {
            None => Column::Missing,
            Some("") => Column::Blank,
            Some(text) => Column::Text(text.to_string()),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Column::Text(text) => Some(text),
            Column::Missing | Column::Blank => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub graph6: String,
    pub upper_left: Column,
    pub upper_right: Column,
    pub lower_right: Column,
    pub lower_left: Column,
}

impl Record {
    /// `row` is 1-based.
    pub fn from_fields<'a>(row: usize, fields: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut fields = fields.into_iter();
        let name = fields
            .next()
            .ok_or(Error::MissingColumn { row, column: "name" })?;
        let graph6 = fields
            .next()
            .ok_or(Error::MissingColumn { row, column: "graph6" })?;
        Ok(Record {
            name: name.to_string(),
            graph6: graph6.to_string(),
            upper_left: Column::from_field(fields.next()),
            upper_right: Column::from_field(fields.next()),
            lower_right: Column::from_field(fields.next()),
            lower_left: Column::from_field(fields.next()),
        })
    }

    pub fn labels(&self) -> CellLabels {
        let owned = |c: &Column| c.label().map(str::to_string);
        CellLabels {
            title: (!self.name.is_empty()).then(|| self.name.clone()),
            upper_left: owned(&self.upper_left),
            upper_right: owned(&self.upper_right),
            lower_right: owned(&self.lower_right),
            lower_left: owned(&self.lower_left),
        }
    }
}

/// Reads records from CSV with a header row. Rows may be ragged.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    csv.records()
        .enumerate()
        .map(|(i, row)| {
            let row_number = i + 1;
            Record::from_fields(row_number, row?.iter())
        })
        .collect()
}

pub fn render_cell(record: &Record, row: usize, options: &CellOptions) -> Result<String> {
    let graph = graph6::decode(&record.graph6).map_err(|source| Error::Record {
        row,
        name: record.name.clone(),
        source,
    })?;
    let layout = layout::compute(&graph, options.layout);
    let mut picture = emitter::emit(&graph, &layout, options)?;
    annotate::annotate(&mut picture, &record.labels())?;
    debug!(
        row,
        name = %record.name,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        annotations = picture.annotations.len(),
        "cell composed"
    );
    Ok(tikz_renderer::render(&picture))
}

pub fn render_cells(records: &[Record], options: &CellOptions) -> Result<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| render_cell(record, i + 1, options))
        .collect()
}

pub fn assemble(cells: &[String]) -> String {
    let mut out = String::from(TABLE_HEADER);
    for (i, cell) in cells.iter().enumerate() {
        out.push_str(cell);
        let count = i + 1;
        if count == cells.len() {
            out.push('\n');
        } else if count % CELLS_PER_ROW == 0 {
            out.push_str(ROW_SEPARATOR);
        } else {
            out.push_str(COLUMN_SEPARATOR);
        }
    }
    out.push_str(TABLE_FOOTER);
    out
}

pub fn compose_table(records: &[Record], options: &CellOptions) -> Result<String> {
    let cells = render_cells(records, options)?;
    info!(cells = cells.len(), "table composed");
    Ok(assemble(&cells))
}
