use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order string: '{0}'")]
pub struct ParseBondOrderError(String);

/// Elements in atomic-number order.
#[rustfmt::skip]
const ELEMENTS: [Element; 118] = {
    use Element as E;
    [
        E::H, E::He, E::Li, E::Be, E::B, E::C, E::N, E::O, E::F, E::Ne,
        E::Na, E::Mg, E::Al, E::Si, E::P, E::S, E::Cl, E::Ar, E::K, E::Ca,
        E::Sc, E::Ti, E::V, E::Cr, E::Mn, E::Fe, E::Co, E::Ni, E::Cu, E::Zn,
        E::Ga, E::Ge, E::As, E::Se, E::Br, E::Kr, E::Rb, E::Sr, E::Y, E::Zr,
        E::Nb, E::Mo, E::Tc, E::Ru, E::Rh, E::Pd, E::Ag, E::Cd, E::In, E::Sn,
        E::Sb, E::Te, E::I, E::Xe, E::Cs, E::Ba, E::La, E::Ce, E::Pr, E::Nd,
        E::Pm, E::Sm, E::Eu, E::Gd, E::Tb, E::Dy, E::Ho, E::Er, E::Tm, E::Yb,
        E::Lu, E::Hf, E::Ta, E::W, E::Re, E::Os, E::Ir, E::Pt, E::Au, E::Hg,
        E::Tl, E::Pb, E::Bi, E::Po, E::At, E::Rn, E::Fr, E::Ra, E::Ac, E::Th,
        E::Pa, E::U, E::Np, E::Pu, E::Am, E::Cm, E::Bk, E::Cf, E::Es, E::Fm,
        E::Md, E::No, E::Lr, E::Rf, E::Db, E::Sg, E::Bh, E::Hs, E::Mt, E::Ds,
        E::Rg, E::Cn, E::Nh, E::Fl, E::Mc, E::Lv, E::Ts, E::Og,
    ]
};

#[rustfmt::skip]
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr",
    "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf",
    "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po",
    "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs",
    "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Element {
    // Period 1
    H = 1, He,
    // Period 2
    Li, Be, B, C, N, O, F, Ne,
    // Period 3
    Na, Mg, Al, Si, P, S, Cl, Ar,
    // Period 4
    K, Ca, Sc, Ti, V, Cr, Mn, Fe, Co, Ni,
    Cu, Zn, Ga, Ge, As, Se, Br, Kr,
    // Period 5
    Rb, Sr, Y, Zr, Nb, Mo, Tc, Ru, Rh, Pd,
    Ag, Cd, In, Sn, Sb, Te, I, Xe,
    // Period 6
    Cs, Ba, La, Ce, Pr, Nd, Pm, Sm, Eu, Gd,
    Tb, Dy, Ho, Er, Tm, Yb, Lu, Hf, Ta, W,
    Re, Os, Ir, Pt, Au, Hg, Tl, Pb, Bi, Po,
    At, Rn,
    // Period 7
    Fr, Ra, Ac, Th, Pa, U, Np, Pu, Am, Cm,
    Bk, Cf, Es, Fm, Md, No, Lr, Rf, Db, Sg,
    Bh, Hs, Mt, Ds, Rg, Cn, Nh, Fl, Mc, Lv,
    Ts, Og,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::H)
    }

    /// Single-bond covalent radius in Ångströms (Cordero et al., 2008).
    ///
    /// Elements outside the organic and common counter-ion set fall back to
    /// 1.50 Å, which is only used for proximity bond perception.
    pub fn covalent_radius(&self) -> f64 {
        match self {
            Element::H => 0.31,
            Element::Li => 1.28,
            Element::Be => 0.96,
            Element::B => 0.84,
            Element::C => 0.76,
            Element::N => 0.71,
            Element::O => 0.66,
            Element::F => 0.57,
            Element::Na => 1.66,
            Element::Mg => 1.41,
            Element::Al => 1.21,
            Element::Si => 1.11,
            Element::P => 1.07,
            Element::S => 1.05,
            Element::Cl => 1.02,
            Element::K => 2.03,
            Element::Ca => 1.76,
            Element::Fe => 1.32,
            Element::Cu => 1.32,
            Element::Zn => 1.22,
            Element::Ge => 1.20,
            Element::As => 1.19,
            Element::Se => 1.20,
            Element::Br => 1.20,
            Element::Sn => 1.39,
            Element::Te => 1.38,
            Element::I => 1.39,
            _ => 1.50,
        }
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[self.atomic_number() as usize - 1]
    }

    pub fn from_atomic_number(z: u8) -> Option<Element> {
        ELEMENTS.get((z as usize).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SYMBOLS
            .iter()
            .position(|&symbol| symbol == s)
            .map(|i| ELEMENTS[i])
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    pub fn value(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    /// Raises the order by one step, saturating at [`BondOrder::Triple`].
    ///
    /// PDB files encode multiple bonds by repeating a `CONECT` pair; each
    /// repetition promotes the bond once. Aromatic bonds are left unchanged.
    pub fn promoted(self) -> Self {
        match self {
            BondOrder::Single => BondOrder::Double,
            BondOrder::Double | BondOrder::Triple => BondOrder::Triple,
            BondOrder::Aromatic => BondOrder::Aromatic,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" => Ok(BondOrder::Single),
            "double" | "2" => Ok(BondOrder::Double),
            "triple" | "3" => Ok(BondOrder::Triple),
            "aromatic" | "ar" => Ok(BondOrder::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}
