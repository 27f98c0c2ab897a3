//! # cil
//!
//! A compiler front end for the CIL (Common Intermediate Language) SELinux
//! policy language.
//!
//! The pipeline goes source text -> tokens -> generic parenthesized parse
//! tree -> typed AST. Name resolution and binary policy emission are later
//! stages that consume the AST produced here; they are not part of this
//! crate.
//!
//! For testing guidelines see the [testing module](crate::cil::testing).

pub mod cil;
