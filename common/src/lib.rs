//! Address Navigator Common Library
//!
//! CLIとWeb(WASM)で共有される型・抽出契約・状態遷移

pub mod types;
pub mod error;
pub mod rows;
pub mod image;
pub mod maps;
pub mod prompts;
pub mod parser;
pub mod gemini;
pub mod services;
pub mod store;
pub mod app;
pub mod controller;

pub use types::{ActivePlan, Address, SavedPlan};
pub use error::{Error, Result};
pub use rows::expand_house_numbers;
pub use image::{thumbnail_dimensions, to_data_url, split_data_url, decode_data_url};
pub use maps::map_search_url;
pub use parser::parse_addresses;
pub use services::{AddressExtractor, ImageCodec, KeyValueStore};
pub use store::{MemoryStore, PlanStore};
pub use app::{AppError, AppState, PendingSave, Screen, View};
pub use controller::{run_extraction, run_save, Controller};
