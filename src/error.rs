use crate::solver::variable::Variable;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while building a problem instance.
///
/// Solving never errors: an unsatisfiable instance is a defined outcome
/// reported as `None` by the engine, and propagation emptying a domain is
/// reported the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("edge references unknown variable `{0}`")]
    UnknownVariable(Variable),

    #[error("edge connects variable `{0}` to itself")]
    SelfLoop(Variable),

    #[error("no domain declared for variable `{0}`")]
    MissingDomain(Variable),

    #[error("domain declared for unknown variable `{0}`")]
    UndeclaredVariable(Variable),

    #[error("no constraint declared between `{0}` and `{1}`")]
    UnknownEdge(Variable, Variable),
}
