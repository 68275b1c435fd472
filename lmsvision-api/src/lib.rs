//! # LMSVision API Server Library
//!
//! This library provides the core functionality for the LMSVision API
//! server: a learning-management backend exposing a single action-routed
//! endpoint for registration, login, course management, and enrollment.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `response`: The uniform success envelope
//! - `routes`: Action dispatcher and handlers
//! - `uploads`: Image upload validation and storage

pub mod app;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod uploads;
