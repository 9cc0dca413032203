mod decoder;
mod encoder;
mod error;
mod vector;

pub mod declaration;

pub use declaration::ArrayDeclaration;
pub use decoder::{parse, LineStatus, LogParser, ParseOutcome, MAX_PARAMS};
pub use encoder::{render, ArrayRenderer, MissingValues};
pub use error::{ParamsError, ParamsResult};
pub use vector::ParameterVector;
