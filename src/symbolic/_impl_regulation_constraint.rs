use crate::error::{SemanticError, SemanticErrorKind};
use crate::symbolic::{RegulationConstraint, SymbolicContext};
use crate::{Monotonicity, Regulation, RegulatoryGraph, VariableId};
use biodivine_lib_bdd::{bdd, Bdd};

impl RegulationConstraint {
    /// Compute a BDD representing all instantiations of a (partial) function where the given
    /// `input` is observable (also called essential).
    ///
    /// In particular:
    ///  - `ctx` is a symbolic encoding of a network.
    ///  - `fn_is_true` is a BDD representing a (partially unknown) function.
    ///  - `input` refers to the function input which should be considered observable.
    ///
    /// Note that if `fn_is_true` is fully specified, then the result is always `true` or `false`.
    /// If `input` does not appear in `fn_is_true` at all, the result is always `false`.
    pub fn mk_observability(ctx: &SymbolicContext, fn_is_true: &Bdd, input: VariableId) -> Bdd {
        /*
                  "Exists an input vector where output of `f` changes due to the input `r`."
           (implicit \exists p_1, ..., p_m):
               \exists s_1, ..., s_n:
                   a <- \exists s_r: F(s_1, ..., s_r, ..., s_n, p_1, ..., p_m) = 1 and s_r = 1
                   b <- \exists s_r: F(s_1, ..., s_r, ..., s_n, p_1, ..., p_m) = 1 and s_r = 0
                   a != b
        */
        let input = ctx.get_state_variable(input);
        let input_is_true = ctx.bdd_variable_set().mk_var(input);
        let input_is_false = input_is_true.not();
        let fn_x1_to_1 = bdd!(fn_is_true & input_is_true).var_exists(input);
        let fn_x0_to_1 = bdd!(fn_is_true & input_is_false).var_exists(input);
        bdd!(fn_x1_to_1 ^ fn_x0_to_1).exists(ctx.state_variables())
    }

    /// Compute a BDD representing all instantiations of a (partial) function where the given
    /// `input` is an activator (also called positively monotonic).
    ///
    /// If `input` does not appear in `fn_is_true` at all, the result is always `true`.
    pub fn mk_activation(ctx: &SymbolicContext, fn_is_true: &Bdd, input: VariableId) -> Bdd {
        /*
               "Exists an input where the functions monotonicity in `r` is reversed."
           (implicit \exists p_1, ..., p_m):
               not \exists s_1, ..., s_m:
                   a <- \exists s_r: F(s_1, ..., s_r, ..., s_n, p_1, ..., p_m) = 0 and s_r = 1
                   b <- \exists s_r: F(s_1, ..., s_r, ..., s_n, p_1, ..., p_m) = 1 and s_r = 0
                   a & b   // "I can go from 1 to 0 by increasing s_r."
        */
        let input = ctx.get_state_variable(input);
        let input_is_true = ctx.bdd_variable_set().mk_var(input);
        let input_is_false = input_is_true.not();
        let fn_is_false = fn_is_true.not();
        let fn_x1_to_0 = bdd!(fn_is_false & input_is_true).var_exists(input);
        let fn_x0_to_1 = bdd!(fn_is_true & input_is_false).var_exists(input);
        bdd!(fn_x0_to_1 & fn_x1_to_0)
            .exists(ctx.state_variables())
            .not()
    }

    /// The same as [RegulationConstraint::mk_activation], but with negative monotonicity instead
    /// of positive monotonicity.
    pub fn mk_inhibition(ctx: &SymbolicContext, fn_is_true: &Bdd, input: VariableId) -> Bdd {
        let input = ctx.get_state_variable(input);
        let input_is_true = ctx.bdd_variable_set().mk_var(input);
        let input_is_false = input_is_true.not();
        let fn_is_false = fn_is_true.not();
        let fn_x0_to_0 = bdd!(fn_is_false & input_is_false).var_exists(input);
        let fn_x1_to_1 = bdd!(fn_is_true & input_is_true).var_exists(input);
        bdd!(fn_x0_to_0 & fn_x1_to_1)
            .exists(ctx.state_variables())
            .not()
    }

    /// Infer the *most specific* [Regulation] which is still sufficient to correctly
    /// cover the relationship between `regulator` and `target` in the provided function
    /// (represented as a `fn_is_true` [Bdd]).
    ///
    /// In particular:
    ///  - If `regulator` has no effect on `target`, return `None`.
    ///  - If `regulator` has an effect on `target` only for some instantiations of
    ///    `fn_is_true`, return a regulation with `essential = false`.
    ///  - If `regulator` impacts `target` in every instantiation of `fn_is_true`,
    ///    return `essential = true`.
    ///  - If all instantiations are positively/negatively monotonous, return a monotonic
    ///    regulation, otherwise return `monotonicity = None`.
    pub fn infer_sufficient_regulation(
        ctx: &SymbolicContext,
        regulator: VariableId,
        target: VariableId,
        fn_is_true: &Bdd,
    ) -> Option<Regulation> {
        let obs = Self::mk_observability(ctx, fn_is_true, regulator);
        let essential = if obs.is_true() {
            true
        } else if !obs.is_false() {
            false
        } else {
            return None;
        };

        let act = Self::mk_activation(ctx, fn_is_true, regulator);
        let inh = Self::mk_inhibition(ctx, fn_is_true, regulator);

        let monotonicity = if act.is_true() {
            Some(Monotonicity::Activation)
        } else if inh.is_true() {
            Some(Monotonicity::Inhibition)
        } else {
            None
        };

        Some(Regulation {
            regulator,
            target,
            essential,
            monotonicity,
        })
    }

    /// Check that the (partial) function `fn_is_true` of the target of `regulation` satisfies
    /// the declared essentiality and monotonicity.
    ///
    /// Returns the `Bdd` of all instantiations of `fn_is_true` that satisfy both constraints,
    /// together with an error for every constraint that no instantiation can satisfy.
    pub fn check_regulation(
        ctx: &SymbolicContext,
        graph: &RegulatoryGraph,
        regulation: &Regulation,
        fn_is_true: &Bdd,
    ) -> (Bdd, Vec<SemanticError>) {
        let regulator = graph.get_variable_name(regulation.regulator);
        let target = graph.get_variable_name(regulation.target);
        let mut errors = Vec::new();

        let observability = if regulation.essential {
            Self::mk_observability(ctx, fn_is_true, regulation.regulator)
        } else {
            ctx.mk_constant(true)
        };
        if observability.is_false() {
            errors.push(SemanticError::new(
                SemanticErrorKind::ObservabilityViolation,
                vec![regulator.clone(), target.clone()],
                format!("`{}` has no effect in `{}`.", regulator, target),
            ));
        }

        let (monotonicity, sign) = match regulation.monotonicity {
            Some(Monotonicity::Activation) => (
                Self::mk_activation(ctx, fn_is_true, regulation.regulator),
                "activating",
            ),
            Some(Monotonicity::Inhibition) => (
                Self::mk_inhibition(ctx, fn_is_true, regulation.regulator),
                "inhibiting",
            ),
            None => (ctx.mk_constant(true), "monotonous"),
        };
        if monotonicity.is_false() {
            errors.push(SemanticError::new(
                SemanticErrorKind::MonotonicityViolation,
                vec![regulator.clone(), target.clone()],
                format!("`{}` is not {} in `{}`.", regulator, sign, target),
            ));
        }

        (bdd!(observability & monotonicity), errors)
    }
}
