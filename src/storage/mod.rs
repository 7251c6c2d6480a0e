// Storage module - CSV ingestion into resident datasets

mod csv_loader;

pub use csv_loader::{load_dir, load_file, parse_cell, read_csv};
