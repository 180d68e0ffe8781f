//! Output directory layout and file naming.

pub mod paths;

pub use paths::{
    bootstrap_output_tree, carousel_child_filename, ensure_dir, handle_dir, post_filename,
    thumbnail_filename,
};
