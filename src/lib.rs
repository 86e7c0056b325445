// src/lib.rs
//! Scrapes software reviews from G2, Capterra and GetApp for a date window.

pub mod crawler;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod interrupt;
pub mod request;
pub mod review;
pub mod settings;
pub mod sites;
pub mod store;
pub mod text;
