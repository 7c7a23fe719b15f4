//! Adds support for SBML-qual import and export to `BooleanNetwork`.
//!
//! Only the Boolean subset of SBML-qual is supported: every qualitative species must have
//! `maxLevel` at most one, and every transition has a single output whose function terms
//! describe when the output is `1`. Positions of `generalGlyph` elements of the first
//! SBML layout are transferred as a `Layout`.
//!
//! ```rust
//! use biodivine_aeon_core::{BooleanNetwork, Layout};
//! use std::convert::TryFrom;
//!
//! let network = BooleanNetwork::try_from("a -> b\nb -| a\n$a: !b\n$b: a").unwrap();
//! let sbml = network.to_sbml(None);
//! let (imported, layout) = BooleanNetwork::try_from_sbml(&sbml).unwrap();
//! assert_eq!(network, imported);
//! assert_eq!(Layout::new(), layout);
//! ```

/// Contains code for parsing SBML models using the `roxmltree` library. It is not 100% SBML-qual
/// compliant, but covers the files produced by common qualitative modelling tools.
mod import;

/// A crude SBML export module. It dumps a `BooleanNetwork` into valid SBML-qual XML.
mod export;

/// Namespace of SBML level 3 core.
pub const SBML: &str = "http://www.sbml.org/sbml/level3/version1/core";
/// Namespace of the SBML-qual package.
pub const SBML_QUAL: &str = "http://www.sbml.org/sbml/level3/version1/qual/version1";
/// Namespace of the SBML layout package.
pub const SBML_LAYOUT: &str = "http://www.sbml.org/sbml/level3/version1/layout/version1";
/// Namespace of MathML content markup.
pub const MATHML: &str = "http://www.w3.org/1998/Math/MathML";
