//! This crate provides the expression tree and parser for the Quark programming language. This
//! phase is responsible for assembling the tokens into expression trees.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod parser;
pub mod precedence;
pub mod syntax_tree;
