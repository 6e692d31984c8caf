pub mod cdreview_env;
pub mod dataset;
