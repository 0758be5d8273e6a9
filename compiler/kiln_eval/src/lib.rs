//! Kiln Eval - class evaluation for the Kiln compiler.
//!
//! Classes are singletons: each class body runs at most once per compilation,
//! in a scope built from its parent class's scope and the resource it was
//! included for.
//!
//! # Architecture
//!
//! - [`ScopeTree`]: arena of scopes with parent links, namespaces and bindings
//! - [`Compilation`]: per-compilation state (scopes, class memo, tags)
//! - [`ClassEvaluator`]: the evaluation algorithm, driving [`ClassBody`]
//!   implementations supplied by the caller
//!
//! Class declarations and names come from `kiln_ir`.

mod compilation;
mod errors;
mod evaluator;
mod scope;
mod stack;
mod value;

use std::sync::Once;

pub use compilation::Compilation;
pub use errors::{ClassError, ScopeError};
pub use evaluator::{ClassBody, ClassEvaluator};
pub use scope::{ScopeId, ScopeTree};
pub use stack::ensure_sufficient_stack;
pub use value::Value;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for class evaluation.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=kiln_eval=debug` or `RUST_LOG=kiln_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
