use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("graph error: {0}")]
    Graph(#[from] neo4rs::Error),

    #[error("sheet index {index} is out of range ({count} sheets in workbook)")]
    SheetIndex { index: usize, count: usize },

    #[error("label {0:?} contains characters outside [A-Za-z0-9_]")]
    InvalidLabel(String),
}
