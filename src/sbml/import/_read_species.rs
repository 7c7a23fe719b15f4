use crate::error::{ModelError, SemanticError, SemanticErrorKind};
use crate::sbml::import::{child_tags, read_unique_child, sbml_error};
use crate::sbml::SBML_QUAL;
use roxmltree::Node;

/// Approximate representation of a Boolean SBML specie. Only the ID is required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SbmlSpecie {
    pub id: String,
    pub name: Option<String>,
}

/// Read all qualitative species of the model. Species that cannot be read are reported
/// in `issues` and skipped.
pub fn read_species(model: Node, issues: &mut Vec<ModelError>) -> Result<Vec<SbmlSpecie>, ModelError> {
    let list = read_unique_child(model, (SBML_QUAL, "listOfQualitativeSpecies"))?;

    let mut result = Vec::new();
    for specie in child_tags(list, (SBML_QUAL, "qualitativeSpecies")) {
        let id = match specie.attribute((SBML_QUAL, "id")) {
            Some(id) => id.to_string(),
            None => {
                issues.push(sbml_error(specie, "Qualitative specie with a missing ID."));
                continue;
            }
        };
        let max_level = match specie.attribute((SBML_QUAL, "maxLevel")) {
            None => None,
            Some(level) => match level.trim().parse::<u32>() {
                Ok(level) => Some(level),
                Err(_) => {
                    let message = format!("Invalid maxLevel value `{}` of `{}`.", level, id);
                    issues.push(sbml_error(specie, message));
                    continue;
                }
            },
        };
        if let Some(level) = max_level.filter(|it| *it > 1) {
            let message = format!(
                "Specie `{}` is not Boolean (max level {}). Only Boolean models are supported.",
                id, level
            );
            let error = SemanticError::new(SemanticErrorKind::NonBooleanDomain, vec![id], message);
            issues.push(error.into());
            continue;
        }
        result.push(SbmlSpecie {
            name: specie.attribute((SBML_QUAL, "name")).map(|s| s.to_string()),
            id,
        });
    }

    Ok(result)
}
