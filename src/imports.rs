//! Import extraction from Python source files
//!
//! The file is parsed into a real syntax tree and every statement body is
//! walked, so imports nested in functions, classes, conditionals and
//! `try` blocks are found. The walk is structural: it does not care
//! whether an import is reachable.

use std::collections::BTreeSet;
use std::path::Path;

use rustpython_parser::{Mode, ast};
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::file_utils::read_source_file;

/// Extract the module names imported by a Python file.
///
/// An unreadable or unparseable file is logged and treated as a file with
/// no imports.
pub fn extract_imports(path: &Path) -> BTreeSet<String> {
    let result = read_source_file(path).and_then(|source| parse_imports(&source));
    match result {
        Ok(imports) => {
            debug!(file = %path.display(), count = imports.len(), "extracted imports");
            imports
        }
        Err(e) => {
            warn!("Error reading file {}: {}", path.display(), e);
            BTreeSet::new()
        }
    }
}

/// Parse Python source text and collect its imported module names.
///
/// `import a.b as c` contributes `a.b`; `from x.y import z` contributes
/// `x.y`. Relative imports contribute their module path without the
/// leading dots, and `from . import z` contributes nothing.
pub fn parse_imports(source: &str) -> Result<BTreeSet<String>, ExtractError> {
    let module = rustpython_parser::parse(source, Mode::Module, "<dropped>")
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut imports = BTreeSet::new();
    if let ast::Mod::Module(module) = module {
        collect_from_body(&module.body, &mut imports);
    }
    Ok(imports)
}

fn collect_from_body(body: &[ast::Stmt], imports: &mut BTreeSet<String>) {
    for stmt in body {
        collect_from_stmt(stmt, imports);
    }
}

fn collect_from_stmt(stmt: &ast::Stmt, imports: &mut BTreeSet<String>) {
    match stmt {
        ast::Stmt::Import(import) => {
            for alias in &import.names {
                imports.insert(alias.name.as_str().to_string());
            }
        }
        ast::Stmt::ImportFrom(import_from) => {
            if let Some(module) = &import_from.module {
                imports.insert(module.as_str().to_string());
            }
        }
        ast::Stmt::FunctionDef(def) => collect_from_body(&def.body, imports),
        ast::Stmt::AsyncFunctionDef(def) => collect_from_body(&def.body, imports),
        ast::Stmt::ClassDef(def) => collect_from_body(&def.body, imports),
        ast::Stmt::If(stmt) => {
            collect_from_body(&stmt.body, imports);
            collect_from_body(&stmt.orelse, imports);
        }
        ast::Stmt::For(stmt) => {
            collect_from_body(&stmt.body, imports);
            collect_from_body(&stmt.orelse, imports);
        }
        ast::Stmt::AsyncFor(stmt) => {
            collect_from_body(&stmt.body, imports);
            collect_from_body(&stmt.orelse, imports);
        }
        ast::Stmt::While(stmt) => {
            collect_from_body(&stmt.body, imports);
            collect_from_body(&stmt.orelse, imports);
        }
        ast::Stmt::With(stmt) => collect_from_body(&stmt.body, imports),
        ast::Stmt::AsyncWith(stmt) => collect_from_body(&stmt.body, imports),
        ast::Stmt::Try(stmt) => {
            collect_from_body(&stmt.body, imports);
            collect_from_handlers(&stmt.handlers, imports);
            collect_from_body(&stmt.orelse, imports);
            collect_from_body(&stmt.finalbody, imports);
        }
        ast::Stmt::TryStar(stmt) => {
            collect_from_body(&stmt.body, imports);
            collect_from_handlers(&stmt.handlers, imports);
            collect_from_body(&stmt.orelse, imports);
            collect_from_body(&stmt.finalbody, imports);
        }
        ast::Stmt::Match(stmt) => {
            for case in &stmt.cases {
                collect_from_body(&case.body, imports);
            }
        }
        _ => {}
    }
}

fn collect_from_handlers(handlers: &[ast::ExceptHandler], imports: &mut BTreeSet<String>) {
    for handler in handlers {
        if let ast::ExceptHandler::ExceptHandler(handler) = handler {
            collect_from_body(&handler.body, imports);
        }
    }
}
