//! Core data structures for parsed fragment and scaffold structures.
//!
//! - [`atom`] – Atom with element, Cartesian coordinates, and formal charge.
//! - [`types`] – Periodic table elements and bond order classifications.
//! - [`system`] – A parsed structure: atoms in file order, bonds, and labels.
//! - [`metadata`] – Per-atom labels (atom name, residue, chain) as written in the file.
//!
//! Atom positions inside a [`System`](system::System) are 0-based, while the
//! public lookups that mirror file records ([`System::atom_name`](system::System::atom_name),
//! [`System::find_atom`](system::System::find_atom)) are 1-based.

pub mod atom;
pub mod metadata;
pub mod system;
pub mod types;
