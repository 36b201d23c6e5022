//! Rendering modules for the static site output.
//!
//! # Submodules
//!
//! - [`template`]: flat `{{PLACEHOLDER}}` substitution behind a trait seam
//! - [`site`]: card/page composition and the stylesheet asset copy
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── index.html   # the composed news page
//! └── styles.css   # byte-for-byte copy of templates/styles.css
//! ```

pub mod site;
pub mod template;
