//! This crate implements the lexical analysis phase of the Quark front end. This phase is
//! responsible for turning the source text into a stream of typed tokens.
//!
//! The entry point is [`tokenizer::Tokenizer`], which produces one [`token::Token`] per call until
//! it reaches the end of the input.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod token;
pub mod tokenizer;
