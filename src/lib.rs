//! procurescan - procurement document text extraction and classification.
//!
//! Pulls text out of PDFs, images, spreadsheets, CSV, plain text and email,
//! classifies the document as an RFQ, purchase order or delivery notice, and
//! extracts labeled fields from RFQs and purchase orders.

pub mod cli;
pub mod config;
pub mod extract;
pub mod models;
pub mod services;
pub mod utils;
