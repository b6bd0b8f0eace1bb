//! HTTP service predicting used car prices from eight vehicle features
//! with a pre-trained ONNX regressor.

pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod routes;
