//! Test registry - the ordered catalog of test units
//!
//! Units declared with [`test_case!`](crate::test_case) and friends are
//! submitted through `inventory` at link time, so no declaration depends on
//! another one having been initialized first. The process-wide registry is
//! built from those submissions the first time a [`RegistryGuard`] is
//! acquired and released when the last guard is dropped.

use crate::error::RegistryError;
use crate::unit::{TestId, TestUnit, SEPARATOR};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

/// Inventory entry submitted by the declaration macros
pub struct TestRegistration(pub &'static TestUnit);

inventory::collect!(TestRegistration);

/// An ordered, non-owning collection of test units.
///
/// Insertion order is the order used by listing and by running everything.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    units: Vec<&'static TestUnit>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every unit declared in the program.
    ///
    /// Declarations are ordered by source file, then line, so the order is
    /// deterministic and follows the source. Invalid declarations are skipped.
    pub fn collect() -> Self {
        let mut declared: Vec<&'static TestUnit> = Vec::new();
        for registration in inventory::iter::<TestRegistration> {
            declared.push(registration.0);
        }
        declared.sort_by(|a, b| a.file().cmp(b.file()).then_with(|| a.line().cmp(&b.line())));

        let mut registry = Registry::new();
        for unit in declared {
            if let Err(err) = registry.register(unit) {
                warn!(%err, "skipping declared test unit");
            }
        }

        debug!(count = registry.len(), "collected declared test units");
        registry
    }

    /// Append a unit.
    ///
    /// Duplicate identities are accepted; lookups return the first one.
    pub fn register(&mut self, unit: &'static TestUnit) -> Result<(), RegistryError> {
        if unit.suite().contains(SEPARATOR) {
            return Err(RegistryError::SeparatorInSuite {
                suite: unit.suite().to_string(),
                name: unit.name().to_string(),
            });
        }
        if unit.name().is_empty() {
            return Err(RegistryError::EmptyName {
                suite: unit.suite().to_string(),
            });
        }

        let id = unit.id();
        if !id.is_addressable() {
            warn!(test = %id, "test name contains '-' and cannot be selected by name");
        }

        trace!(test = %id, file = unit.file(), line = unit.line(), "registered test unit");
        self.units.push(unit);
        Ok(())
    }

    /// Iterate over units in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'static TestUnit> + '_ {
        self.units.iter().copied()
    }

    /// Find the first unit with exactly this identity
    pub fn find(&self, id: &TestId<'_>) -> Option<&'static TestUnit> {
        self.iter().find(|unit| id.matches(unit))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

struct Slot {
    holders: usize,
    registry: Option<Registry>,
}

static SLOT: Mutex<Slot> = parking_lot::const_mutex(Slot {
    holders: 0,
    registry: None,
});

/// Counted handle on the process-wide registry.
///
/// The first acquisition builds the registry, later ones share it, and the
/// registry (including any units registered explicitly through a guard) is
/// released when the last guard is dropped.
#[must_use = "the registry is released when the last guard is dropped"]
pub struct RegistryGuard {
    _private: (),
}

impl RegistryGuard {
    /// Take a handle on the process-wide registry, building it if needed
    pub fn acquire() -> Self {
        let mut slot = SLOT.lock();
        if slot.holders == 0 {
            slot.registry = Some(Registry::collect());
            debug!("process registry created");
        }
        slot.holders += 1;
        trace!(holders = slot.holders, "registry guard acquired");
        Self { _private: () }
    }

    /// Append a unit to the process-wide registry, after every declared unit
    pub fn register(&self, unit: &'static TestUnit) -> Result<(), RegistryError> {
        let mut slot = SLOT.lock();
        slot.registry.get_or_insert_with(Registry::new).register(unit)
    }

    /// Copy of the current registry contents.
    ///
    /// Test bodies run against the snapshot so the slot is never locked
    /// while user code executes.
    pub fn snapshot(&self) -> Registry {
        SLOT.lock().registry.clone().unwrap_or_default()
    }

    /// Number of live guards
    pub fn holders() -> usize {
        SLOT.lock().holders
    }

    /// Whether the process-wide registry currently exists
    pub fn is_live() -> bool {
        SLOT.lock().registry.is_some()
    }
}

impl Drop for RegistryGuard {
    fn drop(&mut self) {
        let mut slot = SLOT.lock();
        slot.holders = slot.holders.saturating_sub(1);
        trace!(holders = slot.holders, "registry guard released");
        if slot.holders == 0 {
            slot.registry = None;
            debug!("process registry released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Checks;
    use serial_test::serial;

    fn noop(_: &mut Checks<'_>) {}

    static ALPHA: TestUnit = TestUnit::new("", "Alpha", noop, "a.rs", 1);
    static BETA: TestUnit = TestUnit::new("Events", "Beta", noop, "a.rs", 2);
    static GAMMA: TestUnit = TestUnit::new("", "Gamma", noop, "a.rs", 3);
    static BETA_AGAIN: TestUnit = TestUnit::new("Events", "Beta", noop, "b.rs", 9);
    static HYPHEN_SUITE: TestUnit = TestUnit::new("Bad-Suite", "Case", noop, "c.rs", 1);
    static NAMELESS: TestUnit = TestUnit::new("Events", "", noop, "c.rs", 2);
    static HYPHEN_NAME: TestUnit = TestUnit::new("", "SuiteA-TestX", noop, "c.rs", 3);

    fn names(registry: &Registry) -> Vec<String> {
        registry.iter().map(|u| u.id().to_string()).collect()
    }

    #[test]
    fn test_register_preserves_insertion_order() {
        let mut registry = Registry::new();
        registry.register(&GAMMA).unwrap();
        registry.register(&ALPHA).unwrap();
        registry.register(&BETA).unwrap();

        assert_eq!(names(&registry), vec!["Gamma", "Alpha", "Events-Beta"]);
        assert_eq!(names(&registry), names(&registry));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_find_first_match_wins() {
        let mut registry = Registry::new();
        registry.register(&BETA).unwrap();
        registry.register(&BETA_AGAIN).unwrap();

        let found = registry.find(&TestId::parse("Events-Beta")).unwrap();
        assert_eq!(found.file(), "a.rs");
        assert!(registry.find(&TestId::parse("Beta")).is_none());
    }

    #[test]
    fn test_register_rejects_separator_in_suite() {
        let mut registry = Registry::new();
        let err = registry.register(&HYPHEN_SUITE).unwrap_err();
        assert_eq!(
            err,
            RegistryError::SeparatorInSuite {
                suite: "Bad-Suite".to_string(),
                name: "Case".to_string(),
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register(&NAMELESS),
            Err(RegistryError::EmptyName { .. })
        ));
    }

    #[test]
    fn test_hyphenated_default_name_is_listed_but_not_found() {
        let mut registry = Registry::new();
        registry.register(&HYPHEN_NAME).unwrap();

        assert_eq!(names(&registry), vec!["SuiteA-TestX"]);
        assert!(registry.find(&TestId::parse("SuiteA-TestX")).is_none());
    }

    #[test]
    #[serial]
    fn test_guard_builds_once_and_releases_on_last_drop() {
        assert_eq!(RegistryGuard::holders(), 0);
        assert!(!RegistryGuard::is_live());

        let first = RegistryGuard::acquire();
        first.register(&ALPHA).unwrap();

        let second = RegistryGuard::acquire();
        assert_eq!(RegistryGuard::holders(), 2);
        // A second acquisition shares the existing registry.
        assert_eq!(names(&second.snapshot()), vec!["Alpha"]);

        drop(first);
        assert!(RegistryGuard::is_live());
        assert_eq!(names(&second.snapshot()), vec!["Alpha"]);

        drop(second);
        assert_eq!(RegistryGuard::holders(), 0);
        assert!(!RegistryGuard::is_live());

        let fresh = RegistryGuard::acquire();
        assert!(fresh.snapshot().is_empty());
    }

    #[test]
    #[serial]
    fn test_guard_register_validates() {
        let guard = RegistryGuard::acquire();
        assert!(guard.register(&HYPHEN_SUITE).is_err());
        guard.register(&BETA).unwrap();
        assert_eq!(names(&guard.snapshot()), vec!["Events-Beta"]);
    }
}
