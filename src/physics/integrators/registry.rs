//! Name-based lookup of integration schemes

use super::{
    ExplicitEuler, Integrator, RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint, Scheme,
    VelocityVerlet,
};
use crate::physics::math::{Coordinate, Scalar};
use std::collections::HashMap;

/// Every built-in scheme, in listing order
fn builtin<C: Coordinate>() -> [Box<dyn Integrator<C>>; 4] {
    [
        Box::new(ExplicitEuler),
        Box::new(RungeKuttaSecondOrderMidpoint),
        Box::new(RungeKuttaFourthOrder),
        Box::new(VelocityVerlet),
    ]
}

/// Resolves integrator names and aliases to boxed schemes
///
/// Lookup is case-sensitive. The built-in aliases come from each scheme's
/// [`Scheme::aliases`]; more can be added with [`IntegratorRegistry::add_alias`].
#[derive(Debug, Clone)]
pub struct IntegratorRegistry {
    aliases: HashMap<String, String>,
}

impl IntegratorRegistry {
    pub fn new() -> Self {
        let mut aliases = HashMap::new();
        for scheme in builtin::<Scalar>() {
            for alias in scheme.aliases() {
                aliases.insert(alias.to_string(), scheme.name().to_string());
            }
        }

        Self { aliases }
    }

    /// Registers `alias` for the canonical scheme `target`
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), String> {
        if !self.list_available().iter().any(|name| name == target) {
            return Err(format!(
                "Cannot alias '{}' to unknown integrator '{}'",
                alias, target
            ));
        }

        self.aliases.insert(alias.to_string(), target.to_string());
        Ok(())
    }

    /// Canonical name for `name`, following at most one alias
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(|s| s.as_str()).unwrap_or(name)
    }

    pub fn create<C: Coordinate>(&self, name: &str) -> Result<Box<dyn Integrator<C>>, String> {
        let resolved_name = self.resolve(name);

        builtin::<C>()
            .into_iter()
            .find(|scheme| scheme.name() == resolved_name)
            .ok_or_else(|| {
                let aliases: Vec<String> = self
                    .list_aliases()
                    .into_iter()
                    .map(|(alias, _)| alias)
                    .collect();
                format!(
                    "Unknown integrator: '{}'. Available integrators: {}. Aliases: {}",
                    name,
                    self.list_available().join(", "),
                    aliases.join(", ")
                )
            })
    }

    pub fn list_available(&self) -> Vec<String> {
        builtin::<Scalar>()
            .iter()
            .map(|scheme| scheme.name().to_string())
            .collect()
    }

    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
