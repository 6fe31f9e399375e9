//! Evaluation dispatch.
//!
//! The tree knows nothing about values. Every node hands its work to a
//! caller-supplied [`Backend`], which decides what a value is, what the
//! operators do, where variables live and which functions exist. The same
//! parser can therefore drive any number of interpreters.

use crate::ast::{ArgList, BinOp, Expr, LiteralKind, Restriction, UnaryOp};

/// The six operations an evaluation backend provides.
///
/// `Handle` is whatever the backend uses to represent a value; the tree
/// threads handles through evaluation without ever looking inside them.
pub trait Backend {
    type Handle;
    type Error;

    /// Reads a variable.
    fn load(&mut self, name: &str) -> Result<Self::Handle, Self::Error>;

    /// Binds a variable, replacing any previous binding.
    fn save(&mut self, name: &str, value: Self::Handle) -> Result<(), Self::Error>;

    /// Applies a binary operator.
    fn bin(
        &mut self,
        op: BinOp,
        lhs: Self::Handle,
        rhs: Self::Handle,
    ) -> Result<Self::Handle, Self::Error>;

    /// Applies a unary operator. The grammar does not produce unary nodes yet.
    fn unary(&mut self, op: UnaryOp, operand: Self::Handle) -> Result<Self::Handle, Self::Error>;

    /// Calls a function with already evaluated arguments.
    fn fcall(&mut self, name: &str, args: Vec<Self::Handle>) -> Result<Self::Handle, Self::Error>;

    /// Turns literal text into a value.
    fn convert(
        &mut self,
        text: &str,
        kind: LiteralKind,
        restriction: Restriction,
    ) -> Result<Self::Handle, Self::Error>;
}

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError<E> {
    /// The backend rejected an operation
    Backend(E),

    /// An argument list was evaluated as a standalone expression
    ArgListEvaluated,

    /// A node that must produce a value produced none (e.g. a nested assignment)
    MissingValue(String),
}

impl<E: std::fmt::Display> std::fmt::Display for EvalError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::Backend(e) => write!(f, "{}", e),
            EvalError::ArgListEvaluated => write!(
                f,
                "argument list cannot be evaluated directly; use ArgList::eval_all"
            ),
            EvalError::MissingValue(node) => write!(f, "'{}' produced no value", node),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for EvalError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Backend(e) => Some(e),
            _ => None,
        }
    }
}

pub type EvalResult<T, E> = Result<T, EvalError<E>>;

impl Expr {
    /// Evaluates the tree against `backend`.
    ///
    /// Returns `None` (the null handle) for nodes that produce no value,
    /// which is only ever an assignment.
    pub fn eval<B: Backend>(&self, backend: &mut B) -> EvalResult<Option<B::Handle>, B::Error> {
        match self {
            Expr::Variable(name) => backend.load(name).map(Some).map_err(EvalError::Backend),
            Expr::Literal(literal) => backend
                .convert(&literal.text, literal.kind, literal.restriction)
                .map(Some)
                .map_err(EvalError::Backend),
            Expr::Assignment { name, value } => {
                let value = value.eval_value(backend)?;
                backend.save(name, value).map_err(EvalError::Backend)?;
                Ok(None)
            }
            Expr::ArgList(_) => Err(EvalError::ArgListEvaluated),
            Expr::Call { name, args } => {
                let values = args.eval_all(backend)?;
                backend
                    .fcall(name, values)
                    .map(Some)
                    .map_err(EvalError::Backend)
            }
            Expr::BinaryOp { op, left, right } => {
                // left strictly before right; backends may have side effects
                let lhs = left.eval_value(backend)?;
                let rhs = right.eval_value(backend)?;
                backend
                    .bin(*op, lhs, rhs)
                    .map(Some)
                    .map_err(EvalError::Backend)
            }
        }
    }

    /// Evaluates a child that has to produce a value.
    fn eval_value<B: Backend>(&self, backend: &mut B) -> EvalResult<B::Handle, B::Error> {
        self.eval(backend)?
            .ok_or_else(|| EvalError::MissingValue(self.to_string()))
    }
}

impl ArgList {
    /// Evaluates every argument left to right.
    pub fn eval_all<B: Backend>(&self, backend: &mut B) -> EvalResult<Vec<B::Handle>, B::Error> {
        let mut values = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            values.push(arg.eval_value(backend)?);
        }
        Ok(values)
    }
}
