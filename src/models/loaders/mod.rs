pub mod toml_loader;

pub use toml_loader::{load_page_fixture, parse_page_fixture};
