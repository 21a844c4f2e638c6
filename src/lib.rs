pub mod availability;
pub mod config;
pub mod environment;
pub mod errors;
pub mod group_store;
pub mod member;
pub mod normalization;
pub mod pages;
pub mod routes;
pub mod session;
pub mod slug;
pub mod store;
pub mod urls;
