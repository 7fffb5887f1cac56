pub mod abstract_trait;
pub mod config;
pub mod di;
pub mod domain;
pub mod forecast;
pub mod handler;
pub mod middleware;
pub mod ml_client;
pub mod model;
pub mod repository;
pub mod service;
pub mod state;
