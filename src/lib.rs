//! Game Dict API: backend for a crowdsourced glossary of gaming terms.
//!
//! This crate provides the JSON API behind the Game Dict clients:
//! - Game and word search with capped nested previews
//! - Random discovery of words and games
//! - Voting, authorship and moderation flags
//! - Game/word links with attribution

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod metadata;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
