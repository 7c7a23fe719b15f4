//! Reading of SBML layout glyphs.

use crate::sbml::import::{child_tags, read_unique_child};
use crate::sbml::SBML_LAYOUT;
use roxmltree::Node;

/// Read positions of all `generalGlyph`s in the first layout of the model, as pairs of the
/// referenced SBML id and its coordinates.
///
/// Returns an empty list if the model has no layout. Glyphs without a reference or a position
/// are skipped.
pub fn read_sbml_layout(model: Node) -> Result<Vec<(String, (f64, f64))>, String> {
    let layout_list = match read_unique_child(model, (SBML_LAYOUT, "listOfLayouts")) {
        Ok(list) => list,
        Err(_) => return Ok(Vec::new()),
    };

    // If there are multiple layouts, just pick the first one.
    let layout = match child_tags(layout_list, (SBML_LAYOUT, "layout")).first() {
        Some(layout) => *layout,
        None => return Ok(Vec::new()),
    };

    let mut result = Vec::new();
    let glyph_list = read_unique_child(layout, (SBML_LAYOUT, "listOfAdditionalGraphicalObjects"));
    if let Ok(glyph_list) = glyph_list {
        for glyph in child_tags(glyph_list, (SBML_LAYOUT, "generalGlyph")) {
            let reference = match glyph.attribute((SBML_LAYOUT, "reference")) {
                Some(reference) => reference,
                None => continue,
            };
            let position = read_unique_child(glyph, (SBML_LAYOUT, "boundingBox"))
                .and_then(|bounding_box| {
                    read_unique_child(bounding_box, (SBML_LAYOUT, "position"))
                });
            if let Ok(position) = position {
                let x = position.attribute((SBML_LAYOUT, "x")).map(str_to_f64);
                let y = position.attribute((SBML_LAYOUT, "y")).map(str_to_f64);
                let x = x.transpose()?.unwrap_or(0.0);
                let y = y.transpose()?.unwrap_or(0.0);
                result.push((reference.to_string(), (x, y)));
            }
        }
    }

    Ok(result)
}

fn str_to_f64(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid numeric value: {}.", value))
}
