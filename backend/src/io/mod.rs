//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. It owns the
//! request/response DTO mapping and the translation of domain errors into
//! HTTP status codes; no business rules live here.

pub mod rest;
