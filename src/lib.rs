pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod labels;
pub mod pipeline;
pub mod process;
pub mod quality;
pub mod schema;
