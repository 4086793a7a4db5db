//! Output generation for the landing page and the JSON manifest.
//!
//! # Submodules
//!
//! - [`index_page`]: Renders the issues into the static landing page
//! - [`json`]: Writes the same issues as a JSON manifest
//!
//! # Output Structure
//!
//! ```text
//! src/
//! ├── 2025-05-06.html   # issue pages (input)
//! ├── 2025-05-07.html
//! └── index.html        # landing page (output)
//! ```

pub mod index_page;
pub mod json;
