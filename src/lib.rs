pub mod catalog;
pub mod client;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod model;
pub mod precondition;
pub mod startup;
