// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-route authentication metadata.
//!
//! Visibility is declared on a [`Controller`] (a path prefix) and optionally
//! overridden on individual handlers. Declarations are resolved once, when
//! the route is registered, into a [`RouteTable`] keyed by method and path
//! pattern. The auth middleware looks routes up by axum's matched path.

use std::collections::HashMap;

use axum::http::Method;

use super::guard::Strategy;

/// Declared visibility of a controller or handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Resolve controller and handler declarations into "is this route public".
///
/// The handler declaration wins, then the controller's; undeclared routes
/// are private.
pub fn resolve_public(controller: Option<Visibility>, handler: Option<Visibility>) -> bool {
    matches!(handler.or(controller), Some(Visibility::Public))
}

/// Resolved authentication policy of one route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    pub public: bool,
    /// Overrides the authenticator's default strategy
    pub strategy: Option<Strategy>,
    /// At least one of these roles is required; empty means none
    pub roles: Vec<String>,
}

/// A group of routes sharing a path prefix and a default visibility.
#[derive(Debug, Clone)]
pub struct Controller {
    prefix: String,
    visibility: Option<Visibility>,
}

impl Controller {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            visibility: None,
        }
    }

    /// Mark every handler of this controller public unless it says otherwise.
    pub fn public(mut self) -> Self {
        self.visibility = Some(Visibility::Public);
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Some(Visibility::Private);
        self
    }

    /// Declare a handler at `prefix + suffix`.
    pub fn handler(&self, method: Method, suffix: &str) -> RouteDecl {
        RouteDecl {
            method,
            path: format!("{}{}", self.prefix, suffix),
            controller: self.visibility,
            handler: None,
            strategy: None,
            roles: Vec::new(),
        }
    }
}

/// A handler declaration, before resolution.
#[derive(Debug, Clone)]
pub struct RouteDecl {
    method: Method,
    path: String,
    controller: Option<Visibility>,
    handler: Option<Visibility>,
    strategy: Option<Strategy>,
    roles: Vec<String>,
}

impl RouteDecl {
    pub fn public(mut self) -> Self {
        self.handler = Some(Visibility::Public);
        self
    }

    pub fn private(mut self) -> Self {
        self.handler = Some(Visibility::Private);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Lookup table from (method, path pattern) to resolved policy.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: HashMap<(Method, String), RoutePolicy>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a declaration and record it. A later declaration for the same
    /// method and path replaces the earlier one.
    pub fn register(&mut self, decl: RouteDecl) {
        let policy = RoutePolicy {
            public: resolve_public(decl.controller, decl.handler),
            strategy: decl.strategy,
            roles: decl.roles,
        };
        self.entries.insert((decl.method, decl.path), policy);
    }

    pub fn with(mut self, decl: RouteDecl) -> Self {
        self.register(decl);
        self
    }

    /// Policy for a matched route. Unknown routes get the default
    /// (private) policy; `HEAD` falls back to the `GET` entry.
    pub fn policy(&self, method: &Method, path: &str) -> RoutePolicy {
        let lookup = |method: &Method| self.entries.get(&(method.clone(), path.to_string()));

        lookup(method)
            .or_else(|| {
                if *method == Method::HEAD {
                    lookup(&Method::GET)
                } else {
                    None
                }
            })
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
