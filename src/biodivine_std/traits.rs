/// A very basic set trait.
///
/// Notice that we do not assume anything about the members of the set, we can't
/// iterate them or even retrieve them.
///
/// Also notice that there is no complement method available. To implement complement,
/// use `minus` with an appropriate `unit` set.
pub trait Set: Clone {
    fn union(&self, other: &Self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
    fn minus(&self, other: &Self) -> Self;

    fn is_empty(&self) -> bool;
    fn is_subset(&self, other: &Self) -> bool;
}

/// A finite transition system that can be explored one step at a time in both directions.
///
/// Both operators work on whole sets of states: `post` returns every state reachable from
/// `set` in one step and `pre` returns every state that can reach `set` in one step.
pub trait TransitionSystem {
    type States: Set;

    /// The set of all states of the system.
    fn unit(&self) -> Self::States;
    fn post(&self, set: &Self::States) -> Self::States;
    fn pre(&self, set: &Self::States) -> Self::States;
}
