pub mod analyzers;
pub mod archive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod source;
pub mod storage;
