pub mod formatter;

pub use formatter::{
    format_bar, format_catalog, format_catalog_json, format_result, format_result_json,
    format_score, should_use_colors,
};
