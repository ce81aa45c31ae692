//! Structured terms exchanged as message content.
//!
//! A term is a self-describing, typed, nested value: integers, strings,
//! byte sequences, atoms, tuples, and lists. This module is the value model
//! only — byte-level marshalling is delegated to serde, so the gateway
//! never reimplements the runtime's own encoding.

use serde::{Deserialize, Serialize};

/// A structured message value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v", rename_all = "snake_case")]
pub enum Term {
    /// Signed integer.
    Int(i64),
    /// UTF-8 string.
    Str(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Symbolic constant.
    Atom(String),
    /// Fixed-arity ordered sequence.
    Tuple(Vec<Term>),
    /// Variable-length ordered sequence.
    List(Vec<Term>),
}

impl Term {
    /// Shorthand for a tuple term.
    pub fn tuple(items: Vec<Term>) -> Self {
        Term::Tuple(items)
    }

    /// Shorthand for a byte-sequence term.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Term::Bytes(bytes.into())
    }

    /// Integer value, if this term is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// String slice, if this term is a string or an atom.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Str(s) | Term::Atom(s) => Some(s),
            _ => None,
        }
    }

    /// Tuple elements, if this term is a tuple.
    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the term's shape, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Term::Int(_) => "int",
            Term::Str(_) => "str",
            Term::Bytes(_) => "bytes",
            Term::Atom(_) => "atom",
            Term::Tuple(_) => "tuple",
            Term::List(_) => "list",
        }
    }
}
