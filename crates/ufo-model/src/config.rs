use serde::{Deserialize, Serialize};

/// How vertex records treat names missing from the symbol tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolPolicy {
    /// Every name must be declared before loading; unknown names reject the record.
    Strict,
    /// Unknown names are interned with a placeholder descriptor once the record validates.
    #[default]
    Intern,
}

/// Options controlling vertex validation during [`Registry::load`](crate::Registry::load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Treatment of undeclared particle, Lorentz and coupling names.
    #[serde(default)]
    pub symbol_policy: SymbolPolicy,
    /// Reject vertices whose Lorentz structures declare a different leg count.
    #[serde(default = "default_check_lorentz_arity")]
    pub check_lorentz_arity: bool,
}

fn default_check_lorentz_arity() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            symbol_policy: SymbolPolicy::default(),
            check_lorentz_arity: default_check_lorentz_arity(),
        }
    }
}

impl RegistryConfig {
    /// Configuration requiring every symbol to be declared up front.
    pub fn strict() -> Self {
        Self {
            symbol_policy: SymbolPolicy::Strict,
            ..Self::default()
        }
    }
}
