//! Hydrogen perception for parsed structures.
//!
//! Structure files rarely agree on whether hydrogens are written out. The
//! attachment-atom search therefore asks for the *total* hydrogen count of an
//! atom: explicit hydrogens bonded to it plus implicit hydrogens implied by
//! the element's default valence ([`ValenceTable`]).

mod hydrogens;
mod valence;

pub use hydrogens::{explicit_hydrogens, explicit_valence, implicit_hydrogens, total_hydrogens};
pub use valence::{ChargeRule, ElementValence, ValenceError, ValenceTable};
