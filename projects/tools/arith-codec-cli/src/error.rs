use arith_codec::CodecError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to map input file: {0}")]
    Mmap(String),
    #[error("Only one input may be read from standard input")]
    BothInputsStdin,
}
