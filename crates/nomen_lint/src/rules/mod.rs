//! Built-in lint rules.

pub(crate) mod suffix_convention;

pub use suffix_convention::SuffixConvention;

use crate::LintEngine;
use nomen_config::NamingConfig;

/// Registers every built-in rule with the engine.
pub fn register_builtin_rules(engine: &mut LintEngine, naming: &NamingConfig) {
    engine.register(Box::new(SuffixConvention::new(naming.clone())));
}
