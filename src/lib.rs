pub mod config;
pub mod docs;
pub mod error;
pub mod response;

pub mod dashboard;
pub mod database;
pub mod draft;
pub mod export;
pub mod file_processing;
pub mod filter;
pub mod handlers;
pub mod identifier;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod storage;
pub mod wizard;
