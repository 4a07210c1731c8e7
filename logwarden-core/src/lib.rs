//! Logwarden Core
//!
//! Core types and pure logic for the Logwarden log scanning pipeline.
//!
//! This crate contains:
//! - Domain types: Parsed log entries, stored log records, scan aggregates
//! - DTOs: Request/response bodies exchanged with the hosted backend
//! - Parser: Raw event-log text to normalized entries
//! - Formatter: Normalized entry back to canonical submission text
//! - Sample: Simulated Windows event log used by automatic scans

pub mod domain;
pub mod dto;
pub mod format;
pub mod parser;
pub mod sample;
