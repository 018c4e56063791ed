//! An embeddable comment thread engine.
//!
//! A [`gateway::CommentSection`] owns a [`store::CommentStore`] holding
//! top-level comments with one level of replies, tracks which entries have an
//! editor or reply composer open, and reports every change to optional host
//! hooks. [`view`] turns the store into display rows and relative timestamps.

pub mod common;
pub mod config;
pub mod gateway;
pub mod store;
pub mod view;
