//! Output writers for the raw model reply and the rendered card.
//!
//! # Submodules
//!
//! - [`text`]: Writes the raw model reply as UTF-8 text
//! - [`png`]: Encodes the card canvas as PNG
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── scraping_result.txt   # raw model reply
//! └── scraping_result.png   # 1080×1080 card
//! ```
//!
//! Both writers overwrite existing files in place; there is no temp-file
//! rename and no backup of the previous run.

pub mod png;
pub mod text;
