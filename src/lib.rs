//! # scribe
//!
//! A token-writer pipeline for rendering syntax trees to source text.
//!
//! An external tree walker drives the [`TokenWriter`](scribe::writer::TokenWriter)
//! contract in depth-first order; a chain of decorators augments the token
//! stream (required spacing, out-of-tree trivia, output-location capture) and
//! a terminal text writer accumulates the characters. See the
//! [pipeline module](scribe::pipeline) for the supported compositions.

pub mod scribe;
