pub mod custom;
pub mod math;
pub mod operators;

use crate::error::ExpressionError;
use crate::expression::Value;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub type UnaryRule = fn(f64) -> Result<f64, ExpressionError>;
pub type BinaryRule = fn(f64, f64) -> Result<f64, ExpressionError>;
pub type InfixRule = fn(f64, f64) -> Result<Value, ExpressionError>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// A named entry of the registry. Each variant carries its own evaluation rule.
#[derive(Debug, Copy, Clone)]
pub enum Operation {
    Constant(f64),
    /// Prefix function taking one argument, e.g. `sin(x)` or unary `minus`.
    UnaryFunction(UnaryRule),
    /// Prefix function taking two comma-separated arguments, e.g. `log(x, base)`.
    BinaryFunction(BinaryRule),
    Infix {
        precedence: u8,
        associativity: Associativity,
        rule: InfixRule,
    },
    Postfix(UnaryRule),
}

impl Operation {
    /// Number of operands the operation pops at evaluation time.
    pub fn arity(&self) -> usize {
        match self {
            Operation::Constant(_) => 0,
            Operation::UnaryFunction(_) | Operation::Postfix(_) => 1,
            Operation::BinaryFunction(_) | Operation::Infix { .. } => 2,
        }
    }

    pub fn is_prefix_function(&self) -> bool {
        matches!(
            self,
            Operation::UnaryFunction(_) | Operation::BinaryFunction(_)
        )
    }
}

/// Name -> operation lookup table.
///
/// Built-in math entries are registered first, then operators, then the
/// curated overrides, so a later registration shadows an earlier one with the
/// same name. The process-wide instance is read-only once built.
pub struct Registry {
    operations: HashMap<&'static str, Operation>,
}

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        register_functions(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// The shared registry used by the pipeline.
    pub fn global() -> &'static Registry {
        &REGISTRY
    }

    pub fn register(&mut self, name: &'static str, operation: Operation) {
        self.operations.insert(name, operation);
    }

    pub fn register_constant(&mut self, name: &'static str, value: f64) {
        self.register(name, Operation::Constant(value));
    }

    pub fn register_unary(&mut self, name: &'static str, rule: UnaryRule) {
        self.register(name, Operation::UnaryFunction(rule));
    }

    pub fn register_binary(&mut self, name: &'static str, rule: BinaryRule) {
        self.register(name, Operation::BinaryFunction(rule));
    }

    pub fn register_infix(
        &mut self,
        name: &'static str,
        precedence: u8,
        associativity: Associativity,
        rule: InfixRule,
    ) {
        self.register(
            name,
            Operation::Infix {
                precedence,
                associativity,
                rule,
            },
        );
    }

    pub fn register_postfix(&mut self, name: &'static str, rule: UnaryRule) {
        self.register(name, Operation::Postfix(rule));
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(Operation::Constant(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constant(name).is_some()
    }

    pub fn is_prefix_function(&self, name: &str) -> bool {
        self.get(name).is_some_and(Operation::is_prefix_function)
    }

    pub fn is_postfix_operator(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Operation::Postfix(_)))
    }

    pub fn is_infix_operator(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Operation::Infix { .. }))
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.get(name).map(Operation::arity)
    }

    /// Binding strength of an infix operator; `None` for anything else.
    pub fn precedence(&self, name: &str) -> Option<u8> {
        match self.get(name) {
            Some(Operation::Infix { precedence, .. }) => Some(*precedence),
            _ => None,
        }
    }

    pub fn associativity(&self, name: &str) -> Option<Associativity> {
        match self.get(name) {
            Some(Operation::Infix { associativity, .. }) => Some(*associativity),
            _ => None,
        }
    }

    /// Constant names in alphabetical order.
    pub fn constant_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .operations
            .iter()
            .filter(|(_, operation)| matches!(operation, Operation::Constant(_)))
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn register_functions(registry: &mut Registry) {
    math::register(registry);
    operators::register(registry);
    custom::register(registry);
}
