//! Core data structures for the computation graph.
//!
//! The graph is built from scalar nodes behind `Value` handles, which are
//! reference-counted so that the same subexpression can be shared by several
//! consumers. A node records how it was produced: its forward value, the
//! operation tag, and one `(parent, local partial)` edge per operand
//! occurrence. All of that is fixed at construction; only the accumulated
//! gradient cell is ever written afterwards, by the backward pass.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::GradError;
use crate::ops;

/// Global counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a new unique node ID.
fn next_node_id() -> u64 {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Unique identifier for a node in the computation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

/// The operation that produced a node.
///
/// Informational only: the backward pass reads the per-edge partials stored
/// on the node, never this tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// A leaf created directly from a number; has no parents.
    Leaf,
    /// Addition: left + right
    Add,
    /// Subtraction: left - right
    Sub,
    /// Multiplication: left * right
    Mul,
    /// Division: left / right
    Div,
    /// Power with a constant exponent: base^exponent
    Pow(f64),
    /// Rectified linear unit: max(0, input)
    Relu,
    /// Logistic sigmoid: 1 / (1 + exp(-input))
    Sigmoid,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Leaf => write!(f, "none"),
            Op::Add => write!(f, "+"),
            Op::Sub => write!(f, "-"),
            Op::Mul => write!(f, "*"),
            Op::Div => write!(f, "/"),
            Op::Pow(exponent) => write!(f, "^{}", exponent),
            Op::Relu => write!(f, "relu"),
            Op::Sigmoid => write!(f, "sigmoid"),
        }
    }
}

/// Internal node structure holding the forward value, the gradient cell, and
/// the edges to the node's parents.
pub(crate) struct Node {
    pub(crate) id: NodeId,
    pub(crate) op: Op,
    pub(crate) value: f64,
    /// Accumulated derivative of some designated output w.r.t. this node.
    /// Written only by the backward pass and by `zero_grad`.
    pub(crate) grad: Cell<f64>,
    /// One `(parent, local partial)` entry per operand occurrence, in operand
    /// order. An operand used twice (as in `x + x`) contributes two edges
    /// whose backward contributions are summed, never collapsed.
    pub(crate) edges: Vec<(Value, f64)>,
}

/// A scalar in the computation graph.
///
/// `Value` is a reference-counted handle to a node. Cloning is cheap and
/// yields another handle to the same node, so a value can feed several
/// downstream operations. The subgraph reachable from a value is owned
/// collectively by the handles into it and is released together when the
/// last handle drops; parent edges never form cycles because an operation
/// can only reference nodes that already exist.
#[derive(Clone)]
pub struct Value(Rc<Node>);

impl Value {
    /// Create a leaf node holding `value`, with no operation tag, no parents
    /// and a zero gradient.
    pub fn new(value: f64) -> Self {
        Value::from_node(Op::Leaf, value, Vec::new())
    }

    pub(crate) fn from_node(op: Op, value: f64, edges: Vec<(Value, f64)>) -> Self {
        Value(Rc::new(Node {
            id: NodeId(next_node_id()),
            op,
            value,
            grad: Cell::new(0.0),
            edges,
        }))
    }

    /// The unique ID of this value's node.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The forward-computed value, fixed at construction.
    pub fn value(&self) -> f64 {
        self.0.value
    }

    /// The accumulated gradient: the derivative of the output a backward pass
    /// was started from, with respect to this node. Zero until a backward
    /// pass has run.
    pub fn grad(&self) -> f64 {
        self.0.grad.get()
    }

    /// The operation tag this node was produced by.
    pub fn op(&self) -> Op {
        self.0.op
    }

    /// Whether this is a leaf node (created directly from a number).
    pub fn is_leaf(&self) -> bool {
        self.0.edges.is_empty()
    }

    /// Handles to the parent nodes, in operand order. A parent used twice
    /// appears twice.
    pub fn parents(&self) -> Vec<Value> {
        self.0.edges.iter().map(|(parent, _)| parent.clone()).collect()
    }

    /// Reset the accumulated gradient to zero.
    ///
    /// Gradients accumulate across backward passes; callers that need
    /// isolated gradients reset them between passes.
    pub fn zero_grad(&self) {
        self.0.grad.set(0.0);
    }

    pub(crate) fn set_grad(&self, grad: f64) {
        self.0.grad.set(grad);
    }

    pub(crate) fn accumulate_grad(&self, contribution: f64) {
        self.0.grad.set(self.0.grad.get() + contribution);
    }

    pub(crate) fn edges(&self) -> &[(Value, f64)] {
        &self.0.edges
    }

    // === Fallible operations ===

    /// Divide by `other`: `self / other`.
    ///
    /// Fails with [`GradError::DivisionByZero`] when `other`'s value is
    /// exactly zero.
    pub fn div(&self, other: impl Into<Value>) -> Result<Value, GradError> {
        ops::div(self, &other.into())
    }

    /// Reversed division: `lhs / self`, with the partials reflecting the true
    /// left/right roles.
    ///
    /// Fails with [`GradError::DivisionByZero`] when `self`'s value is
    /// exactly zero.
    pub fn rdiv(&self, lhs: impl Into<Value>) -> Result<Value, GradError> {
        ops::div(&lhs.into(), self)
    }

    /// Raise to a constant power: `self^exponent`.
    ///
    /// Fails with [`GradError::UndefinedPower`] when the result or its
    /// derivative `exponent * self^(exponent - 1)` is undefined over the
    /// reals, e.g. a negative base with a non-integer exponent.
    pub fn powf(&self, exponent: f64) -> Result<Value, GradError> {
        ops::powf(self, exponent)
    }

    // === Infallible unary operations ===

    /// Reversed subtraction: `lhs - self`, with the partials reflecting the
    /// true left/right roles.
    pub fn rsub(&self, lhs: impl Into<Value>) -> Value {
        ops::sub(&lhs.into(), self)
    }

    /// Rectified linear unit: `max(0, self)`. The derivative at 0 is taken
    /// to be 0.
    pub fn relu(&self) -> Value {
        ops::relu(self)
    }

    /// Logistic sigmoid: `1 / (1 + exp(-self))`.
    pub fn sigmoid(&self) -> Value {
        ops::sigmoid(self)
    }

    /// Propagate gradients from this node back through its ancestor subgraph.
    ///
    /// See [`crate::backward::backward`] for the exact semantics, including
    /// how repeated calls accumulate.
    pub fn backward(&self) {
        crate::backward::backward(self)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value(value={}, grad={}, op={})",
            self.value(),
            self.grad(),
            self.op()
        )
    }
}

// === Operator overloads ===
//
// Infallible arithmetic is exposed through std::ops for every combination of
// owned/borrowed operands, with `f64` on either side auto-promoted to a leaf
// node. The operands always keep their true left/right roles, so e.g.
// `2.0 - x` records the partials of `lhs - rhs` with `x` on the right.
// Division is deliberately absent here: it can fail, so it is only available
// as the fallible `Value::div` / `Value::rdiv` methods.

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $ctor:path) => {
        impl std::ops::$trait<Value> for Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                $ctor(&self, &rhs)
            }
        }

        impl std::ops::$trait<&Value> for Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                $ctor(&self, rhs)
            }
        }

        impl std::ops::$trait<Value> for &Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                $ctor(self, &rhs)
            }
        }

        impl std::ops::$trait<&Value> for &Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                $ctor(self, rhs)
            }
        }

        impl std::ops::$trait<f64> for Value {
            type Output = Value;
            fn $method(self, rhs: f64) -> Value {
                $ctor(&self, &Value::new(rhs))
            }
        }

        impl std::ops::$trait<f64> for &Value {
            type Output = Value;
            fn $method(self, rhs: f64) -> Value {
                $ctor(self, &Value::new(rhs))
            }
        }

        impl std::ops::$trait<Value> for f64 {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                $ctor(&Value::new(self), &rhs)
            }
        }

        impl std::ops::$trait<&Value> for f64 {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                $ctor(&Value::new(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, ops::add);
impl_binary_op!(Sub, sub, ops::sub);
impl_binary_op!(Mul, mul, ops::mul);

impl std::ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        self * -1.0
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        &self * -1.0
    }
}
