/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     param.rs
 * Purpose:  Declarations shared between the parser and the interpreter:
 *           parameters, functions, classes and test blocks.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the PROSE programming language project.
 *
 * PROSE is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::ast::{Expr, Stmt};

/// Represents **one declared parameter** of a function, method or lambda.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name: String,

    /// Optional default value:
    /// `takes name and greeting defaulting to "Hello"`
    ///
    /// Evaluated in the function's defining scope when the caller leaves the
    /// parameter out.
    pub default: Option<Expr>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Expr) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// What a callable runs when invoked.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// `and does the following. ... End function.`
    Block(Vec<Stmt>),

    /// `and gives back EXPR`: the value of the expression is the result.
    Expression(Expr),
}

/// A named function, a method, or an inline lambda.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// `None` for inline lambdas.
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: FunctionBody,
    pub is_async: bool,
    pub line: usize,
}

impl FunctionDecl {
    /// Number of parameters without a default value.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| p.default.is_none()).count()
    }

    /// Human-readable arity: `2` or `between 1 and 3`.
    pub fn arity_label(&self) -> String {
        let min = self.required_params();
        let max = self.params.len();
        if min == max {
            max.to_string()
        } else {
            format!("between {} and {}", min, max)
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.required_params() && count <= self.params.len()
    }
}

/// `Define a class called Dog that extends Animal with properties name and age.`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,

    /// Own property names, in declaration order.
    pub properties: Vec<String>,

    /// Single parent class, looked up by name at use time.
    pub parent: Option<String>,

    pub line: usize,
}

/// `Test "name". ... End test.`
#[derive(Debug, Clone, PartialEq)]
pub struct TestDecl {
    pub name: String,
    pub body: Vec<Stmt>,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(params: Vec<Param>) -> FunctionDecl {
        FunctionDecl {
            name: Some("greet".into()),
            params,
            body: FunctionBody::Block(Vec::new()),
            is_async: false,
            line: 1,
        }
    }

    #[test]
    fn arity_with_defaults() {
        let f = decl(vec![
            Param::new("name"),
            Param::with_default("greeting", Expr::Text("Hello".into())),
        ]);

        assert_eq!(f.required_params(), 1);
        assert_eq!(f.arity_label(), "between 1 and 2");
        assert!(f.accepts(1));
        assert!(f.accepts(2));
        assert!(!f.accepts(0));
        assert!(!f.accepts(3));
    }

    #[test]
    fn arity_without_defaults() {
        let f = decl(vec![Param::new("a"), Param::new("b")]);
        assert_eq!(f.arity_label(), "2");
    }
}
