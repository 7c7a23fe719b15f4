//! Conversions between the supported model formats.
//!
//! Every conversion decodes the input into a `BooleanNetwork` (plus its `Layout`) and encodes
//! that network into the output format. Nothing is transcoded textually, so the output is
//! semantically equivalent to the input, but operators, whitespace and variable order may
//! differ.
//!
//! ```rust
//! use biodivine_aeon_core::conversions::convert;
//! use biodivine_aeon_core::ModelFormat;
//!
//! let bnet = convert(ModelFormat::Aeon, ModelFormat::Bnet, "a -> b\nb -| a\n$a: !b\n$b: a").unwrap();
//! assert_eq!("targets,factors\na, !b\nb, a\n", bnet);
//! ```

use crate::error::{ConversionError, DecodeError};
use crate::{BooleanNetwork, Layout, ModelFormat};

/// Read a network (and the layout of its variables, if the format has one) from `text`.
pub fn decode(format: ModelFormat, text: &str) -> Result<(BooleanNetwork, Layout), DecodeError> {
    match format {
        ModelFormat::Aeon => BooleanNetwork::try_from_aeon(text),
        ModelFormat::Bnet => BooleanNetwork::try_from_bnet(text).map(|it| (it, Layout::new())),
        ModelFormat::Sbml => BooleanNetwork::try_from_sbml(text),
    }
}

/// Write `network` in the given format. The `layout` is kept by `.aeon` and SBML and
/// dropped by `.bnet`.
pub fn encode(
    format: ModelFormat,
    network: &BooleanNetwork,
    layout: &Layout,
) -> Result<String, ConversionError> {
    match format {
        ModelFormat::Aeon => Ok(network.to_aeon_with_layout(layout)),
        ModelFormat::Bnet => network.to_bnet(false),
        ModelFormat::Sbml => Ok(network.to_sbml(Some(layout))),
    }
}

/// Convert a model from `format_in` to `format_out`.
pub fn convert(
    format_in: ModelFormat,
    format_out: ModelFormat,
    text: &str,
) -> Result<String, ConversionError> {
    let (network, layout) = decode(format_in, text)?;
    tracing::debug!(
        from = %format_in,
        to = %format_out,
        variables = network.num_vars(),
        "Converting model."
    );
    encode(format_out, &network, &layout)
}

#[cfg(test)]
mod tests {
    use crate::conversions::{convert, decode};
    use crate::error::ConversionError;
    use crate::test_models::{AEON_MODEL, BNET_MODEL, SBML_MODEL};
    use crate::{BooleanNetwork, ModelFormat};
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    #[test]
    fn aeon_and_bnet() {
        let expected = BooleanNetwork::try_from(AEON_MODEL).unwrap();

        let bnet = convert(ModelFormat::Aeon, ModelFormat::Bnet, AEON_MODEL).unwrap();
        let (network, layout) = decode(ModelFormat::Bnet, &bnet).unwrap();
        assert_eq!(expected, network);
        assert!(layout.is_empty());

        let aeon = convert(ModelFormat::Bnet, ModelFormat::Aeon, BNET_MODEL).unwrap();
        assert_eq!(expected, BooleanNetwork::try_from(aeon.as_str()).unwrap());
    }

    #[test]
    fn aeon_and_sbml() {
        // Regulations are written in the order of SBML transitions.
        let aeon = "#position:a:1,2\n#position:b:-3.5,0\nb -| a\na -> b\n$a: !b\n$b: a\n";
        let sbml = convert(ModelFormat::Aeon, ModelFormat::Sbml, aeon).unwrap();
        let back = convert(ModelFormat::Sbml, ModelFormat::Aeon, &sbml).unwrap();
        assert_eq!(aeon, back);

        let expected = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        let aeon = convert(ModelFormat::Sbml, ModelFormat::Aeon, SBML_MODEL).unwrap();
        assert_eq!(expected, BooleanNetwork::try_from(aeon.as_str()).unwrap());
    }

    #[test]
    fn conversion_errors() {
        let error = convert(ModelFormat::Aeon, ModelFormat::Sbml, "a -> b\n$b: !a").unwrap_err();
        match error {
            ConversionError::Decode(error) => {
                assert_eq!(ModelFormat::Aeon, error.format);
                assert_eq!(1, error.issues.len());
            }
            other => panic!("Unexpected error: {:?}", other),
        }

        // `b` has a regulator, but no update function.
        let error = convert(ModelFormat::Aeon, ModelFormat::Bnet, "a -> b\n$a: true").unwrap_err();
        assert!(matches!(
            error,
            ConversionError::Encode {
                format: ModelFormat::Bnet,
                ..
            }
        ));
    }
}
