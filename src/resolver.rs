//! # resolver.rs
//!
//! Resolves every name in a parsed tree against the fixed symbol registry.
//!
//! After this stage an expression can only fail numerically: every variable
//! names a registered variable, every constant has been folded to its value,
//! and every call names a registered function with exactly the registered
//! number of arguments. Unknown names and arity mismatches abort compilation
//! here, with the byte offset of the offending name.

use std::collections::BTreeSet;

use crate::ast::AstNode;
use crate::error::CompileError;
use crate::registry;

/// A validated tree together with the variable names it depends on.
#[derive(Debug)]
pub(crate) struct Resolved {
    /// The tree with constants folded to `Number` nodes.
    pub node: AstNode,
    /// Sorted, deduplicated free variable names.
    pub variables: Vec<String>,
}

/// Walks the tree, binding names against the registry.
///
/// Constant names are rewritten to their numeric value; variable names are
/// collected. Lookup order for an identifier is variable first, then
/// constant, so a registered variable name always shadows a constant.
///
/// # Errors
///
/// - [`CompileError::UnknownIdentifier`] when a name is neither a registered
///   variable, constant, nor function.
/// - [`CompileError::ArityMismatch`] when a call's argument count differs
///   from the registered arity.
pub(crate) fn resolve(node: AstNode) -> Result<Resolved, CompileError> {
    let mut variables = BTreeSet::new();
    let node = resolve_node(node, &mut variables)?;
    Ok(Resolved {
        node,
        variables: variables.into_iter().collect(),
    })
}

fn resolve_node(
    node: AstNode,
    variables: &mut BTreeSet<String>,
) -> Result<AstNode, CompileError> {
    match node {
        AstNode::Number(_) => Ok(node),
        AstNode::Variable { name, position } => {
            if registry::is_variable(&name) {
                variables.insert(name.clone());
                Ok(AstNode::Variable { name, position })
            } else if let Some(value) = registry::constant(&name) {
                Ok(AstNode::Number(value))
            } else {
                Err(CompileError::UnknownIdentifier { name, position })
            }
        }
        AstNode::UnaryOp { kind, expr } => Ok(AstNode::UnaryOp {
            kind,
            expr: Box::new(resolve_node(*expr, variables)?),
        }),
        AstNode::BinaryOp { kind, left, right } => Ok(AstNode::BinaryOp {
            kind,
            left: Box::new(resolve_node(*left, variables)?),
            right: Box::new(resolve_node(*right, variables)?),
        }),
        AstNode::Call { name, position, args } => {
            let func = registry::function(&name).ok_or_else(|| {
                CompileError::UnknownIdentifier {
                    name: name.clone(),
                    position,
                }
            })?;
            if args.len() != func.arity() {
                return Err(CompileError::ArityMismatch {
                    name,
                    expected: func.arity(),
                    got: args.len(),
                    position,
                });
            }
            let args = args
                .into_iter()
                .map(|arg| resolve_node(arg, variables))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AstNode::Call { name, position, args })
        }
    }
}
