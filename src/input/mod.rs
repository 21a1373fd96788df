//! Sample ingestion - turn typed text and data files into numeric samples

pub mod diagnostics;
pub mod parser;

pub use diagnostics::InputError;
pub use parser::{parse_sample_list, read_samples_csv, read_samples_file, read_samples_xlsx};
