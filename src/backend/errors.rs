//! Define error types for generation and output.
//!
//! These errors represent *backend* failures (as opposed to loading the model). None of them is
//! recoverable: the first one aborts the run and no partial output set is promised.

use miette::Diagnostic;
use thiserror::Error;

/// Failure of the output sink.
#[derive(Debug, Error, Diagnostic)]
pub enum SinkError {
    #[error("cannot open unit `{requested}` while `{open}` is still open")]
    #[diagnostic(code(modelgen::sink::unit_already_open))]
    UnitAlreadyOpen { open: String, requested: String },

    #[error("no output unit is open")]
    #[diagnostic(code(modelgen::sink::no_open_unit))]
    NoOpenUnit,

    #[error("cannot write output unit `{unit}`")]
    #[diagnostic(code(modelgen::sink::io), help("check that the output directory is writable"))]
    Io {
        unit: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a generation run.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),

    #[error("namespaces `{first}` and `{second}` both map to module `{module}`")]
    #[diagnostic(
        code(modelgen::generate::module_collision),
        help("module names replace `.` and `@` with `_`; rename one of the namespaces")
    )]
    ModuleCollision {
        module: String,
        first: String,
        second: String,
    },

    #[error("namespace `{namespace}` maps to module `{module}`, which is reserved")]
    #[diagnostic(
        code(modelgen::generate::reserved_module),
        help("`utils`, `mod` and Rust keywords cannot name a generated module; rename the namespace")
    )]
    ReservedModule { namespace: String, module: String },

    #[error("`{declaration}` has members `{first}` and `{second}` that both map to field `{field}`")]
    #[diagnostic(code(modelgen::generate::member_collision))]
    MemberCollision {
        declaration: String,
        field: String,
        first: String,
        second: String,
    },
}

