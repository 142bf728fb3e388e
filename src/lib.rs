mod common;

pub mod catalog;
pub mod config;
pub mod data_model;
pub mod metrics;
pub mod parser;
pub mod probe;
pub mod probe_engine;
pub mod ranking;
pub mod report;
pub mod runtime;
pub mod settings;
pub mod storage;
