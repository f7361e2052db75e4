//! Dataset sources and CSV persistence

mod csv_store;
mod iris;

pub use csv_store::{read_dataset, write_dataset};
pub use iris::{load_iris, IRIS_CLASS_NAMES, IRIS_ROWS};
