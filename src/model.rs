//! An editable Boolean network together with the positions of its variables.
//!
//! `BooleanNetworkModel` is the handle that editors and bindings work with: it wraps a
//! `BooleanNetwork` and a `Layout`, exposes all-or-nothing mutations, and connects the model
//! to the format adapters, the validator and the attractor computation.
//!
//! ```rust
//! use biodivine_aeon_core::model::BooleanNetworkModel;
//! use biodivine_aeon_core::{ModelFormat, Monotonicity};
//!
//! let mut model = BooleanNetworkModel::new();
//! assert!(model.add_variable("a"));
//! assert!(model.add_variable("b"));
//! assert!(!model.add_variable("a"));
//! model
//!     .add_regulation("a", "b", true, Some(Monotonicity::Activation))
//!     .unwrap()
//!     .set_update_function("b", "a")
//!     .unwrap();
//! assert!(model.to_text(ModelFormat::Aeon).unwrap().contains("$b: a"));
//! ```

use crate::computation::{AnalysisConfig, ComputationResult};
use crate::conversions::{decode, encode};
use crate::error::{
    ComputationError, ConversionError, DecodeError, FunctionError, ModelError, StructuralError,
};
use crate::validation::{check_network_function, ValidationReport};
use crate::{BooleanNetwork, FnUpdate, Layout, ModelFormat, Monotonicity, RegulatoryGraph, VariableId};

/// Horizontal gap between the current layout and a newly added variable.
const NEW_VARIABLE_OFFSET: f64 = 10.0;

/// An editable `BooleanNetwork` with a position for every variable.
///
/// Every mutation either succeeds completely or fails and leaves the model unchanged.
/// Successful mutations return the model again, so they can be chained.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanNetworkModel {
    network: BooleanNetwork,
    layout: Layout,
}

impl Default for BooleanNetworkModel {
    fn default() -> Self {
        BooleanNetworkModel::new()
    }
}

impl BooleanNetworkModel {
    /// An empty model.
    pub fn new() -> BooleanNetworkModel {
        BooleanNetworkModel {
            network: BooleanNetwork::new(RegulatoryGraph::new(Vec::new())),
            layout: Layout::new(),
        }
    }

    /// Read a model in the given format. Variables without a stored position are placed
    /// next to the variables that have one.
    pub fn from_text(format: ModelFormat, text: &str) -> Result<BooleanNetworkModel, DecodeError> {
        let (network, layout) = decode(format, text)?;
        let mut model = BooleanNetworkModel {
            network,
            layout: Layout::new(),
        };
        for var in model.network.variables() {
            let name = model.network.get_variable_name(var).clone();
            let position = match layout.get(&name) {
                Some(position) => *position,
                None => model.infer_new_position(),
            };
            model.layout.insert(name, position);
        }
        Ok(model)
    }

    /// Write the model in the given format.
    pub fn to_text(&self, format: ModelFormat) -> Result<String, ConversionError> {
        encode(format, &self.network, &self.layout)
    }

    /// Returns true if the model has zero variables.
    pub fn is_empty(&self) -> bool {
        self.network.num_vars() == 0
    }

    pub fn as_network(&self) -> &BooleanNetwork {
        &self.network
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Add a new variable positioned next to the existing ones.
    ///
    /// Returns `false` (and changes nothing) if the name is invalid or already used.
    pub fn add_variable(&mut self, name: &str) -> bool {
        let position = self.infer_new_position();
        self.add_variable_at(name, position)
    }

    /// Add a new variable at the given position. Returns `false` if the name is invalid
    /// or already used.
    pub fn add_variable_at(&mut self, name: &str, position: (f64, f64)) -> bool {
        match self.network.add_variable(name) {
            Ok(_) => {
                self.layout.insert(name.to_string(), position);
                true
            }
            Err(error) => {
                tracing::debug!(%error, "Variable not added.");
                false
            }
        }
    }

    /// Remove a variable that is not used by any regulation. Its update function and
    /// position are removed with it.
    pub fn remove_variable(&mut self, name: &str) -> Result<&mut Self, StructuralError> {
        let variable = self.find(name)?;
        self.network.remove_variable(variable)?;
        self.layout.remove(name);
        Ok(self)
    }

    pub fn add_regulation(
        &mut self,
        regulator: &str,
        target: &str,
        essential: bool,
        monotonicity: Option<Monotonicity>,
    ) -> Result<&mut Self, ModelError> {
        self.network
            .add_regulation(regulator, target, essential, monotonicity)?;
        Ok(self)
    }

    pub fn remove_regulation(
        &mut self,
        regulator: &str,
        target: &str,
    ) -> Result<&mut Self, StructuralError> {
        self.network.remove_regulation(regulator, target)?;
        Ok(self)
    }

    /// Parse `expression` and make it the update function of `variable`. All problems of the
    /// function are reported at once.
    pub fn set_update_function(
        &mut self,
        variable: &str,
        expression: &str,
    ) -> Result<&mut Self, FunctionError> {
        self.network
            .set_update_function_from_str(variable, expression)?;
        Ok(self)
    }

    /// Remove the update function of `variable`. Returns the removed function, if any.
    pub fn clear_update_function(
        &mut self,
        variable: &str,
    ) -> Result<Option<FnUpdate>, StructuralError> {
        let variable = self.find(variable)?;
        Ok(self.network.clear_update_function(variable))
    }

    pub fn set_display_name(
        &mut self,
        variable: &str,
        display_name: Option<String>,
    ) -> Result<&mut Self, StructuralError> {
        let variable = self.find(variable)?;
        self.network.set_display_name(variable, display_name);
        Ok(self)
    }

    pub fn position(&self, variable: &str) -> Option<(f64, f64)> {
        self.layout.get(variable).cloned()
    }

    pub fn set_position(
        &mut self,
        variable: &str,
        position: (f64, f64),
    ) -> Result<&mut Self, StructuralError> {
        self.find(variable)?;
        self.layout.insert(variable.to_string(), position);
        Ok(self)
    }

    /// Validate `expression` as the update function of `variable` without changing the model.
    ///
    /// The expression may use placeholder functions. The other regulations and update
    /// functions of the model are the context of the check.
    pub fn check_update_function(
        &self,
        variable: &str,
        expression: &str,
    ) -> Result<ValidationReport, StructuralError> {
        let variable = self.find(variable)?;
        Ok(check_network_function(&self.network, variable, expression))
    }

    /// Start the attractor analysis of a snapshot of this model. Later changes to the model do
    /// not affect the computation.
    pub fn start_computation(
        &self,
        config: AnalysisConfig,
    ) -> Result<ComputationResult, ComputationError> {
        ComputationResult::start(&self.network, config)
    }

    fn find(&self, name: &str) -> Result<VariableId, StructuralError> {
        self.network
            .find_variable(name)
            .ok_or_else(|| StructuralError::UnknownVariable(name.to_string()))
    }

    /// Right of the current bounding box, vertically centred. The origin for an empty model.
    fn infer_new_position(&self) -> (f64, f64) {
        if self.layout.is_empty() {
            return (0.0, 0.0);
        }
        let (mut low, mut high) = ((f64::INFINITY, f64::INFINITY), (f64::NEG_INFINITY, f64::NEG_INFINITY));
        for (x, y) in self.layout.values() {
            low = (low.0.min(*x), low.1.min(*y));
            high = (high.0.max(*x), high.1.max(*y));
        }
        (high.0 + NEW_VARIABLE_OFFSET, low.1 + (high.1 - low.1) / 2.0)
    }
}
