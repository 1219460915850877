use files::FileId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Unknown file: {0}")]
    UnknownFile(FileId),
    #[error("UrlParseError: {0}")]
    UrlParseError(#[from] url::ParseError),
}
