//! Open code-list machinery for ISO/OGC extensible enumerations.
//!
//! ISO code lists are not closed enums: a conformant implementation must
//! accept code names unknown at compile time and turn them into first-class
//! values. Each code-list type therefore keeps a process-wide registry of
//! its values. `value_of` looks a name up in that registry and, on a miss,
//! creates and registers a new value instead of failing.
//!
//! Lookup is by exact, case-sensitive name match on the trimmed input.
//! Values are handles around a shared entry; equality is identity (two
//! handles are equal when they point at the same registered entry), so
//! `T::value_of(v.name()) == v` holds for every registered value `v`.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Shared payload of a single code-list value.
#[derive(Debug)]
pub struct CodeEntry {
    name: String,
    identifier: Option<String>,
    ordinal: usize,
}

impl CodeEntry {
    pub fn new(name: impl Into<String>, identifier: Option<&str>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.map(str::to_owned),
            ordinal,
        }
    }

    /// The code name, e.g. "AVERAGE".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The UML identifier from the standard, e.g. "average".
    /// Runtime-created codes have none.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Position in registration order. Declared constants come first.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Contract implemented by every code-list type.
pub trait CodeList: Clone + fmt::Debug + Sized + 'static {
    /// UML identifier of the code list itself, e.g. "CV_CommonPointRule".
    const LIST_IDENTIFIER: &'static str;

    fn entry(&self) -> &CodeEntry;

    fn name(&self) -> &str {
        self.entry().name()
    }

    fn identifier(&self) -> Option<&str> {
        self.entry().identifier()
    }

    fn ordinal(&self) -> usize {
        self.entry().ordinal()
    }

    /// Snapshot of every value registered so far, in registration order.
    fn values() -> Vec<Self>;

    /// Returns the value with the given name, creating and registering a
    /// new one when no registered value matches. Never fails.
    fn value_of(name: &str) -> Self;

    /// The values of the code list this value belongs to.
    fn family(&self) -> Vec<Self> {
        Self::values()
    }
}

/// Locks a code-list registry, recovering the guard if a previous holder
/// panicked. Registries only ever append, so a poisoned lock still guards
/// a structurally sound list.
pub fn lock_registry<T>(registry: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Declares an open code-list type.
///
/// Generates the handle struct, its process-wide registry seeded with the
/// declared constants, an accessor function per constant, the [`CodeList`]
/// implementation, identity equality, `Display`, and serde support
/// (serialized as the code name, deserialized through `value_of`).
#[macro_export]
macro_rules! code_list {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($list_id:literal) {
            $(
                $(#[$vmeta:meta])*
                $accessor:ident => ($vname:literal, $vid:literal)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name(::std::sync::Arc<$crate::codelist::CodeEntry>);

        impl $name {
            fn registry() -> &'static ::std::sync::Mutex<Vec<$name>> {
                static REGISTRY: ::std::sync::LazyLock<::std::sync::Mutex<Vec<$name>>> =
                    ::std::sync::LazyLock::new(|| {
                        let mut seed: Vec<$name> = Vec::new();
                        $(
                            seed.push($name(::std::sync::Arc::new(
                                $crate::codelist::CodeEntry::new(
                                    $vname,
                                    Some($vid),
                                    seed.len(),
                                ),
                            )));
                        )*
                        ::std::sync::Mutex::new(seed)
                    });
                &REGISTRY
            }

            $(
                $(#[$vmeta])*
                $vis fn $accessor() -> $name {
                    <$name as $crate::codelist::CodeList>::value_of($vname)
                }
            )*
        }

        impl $crate::codelist::CodeList for $name {
            const LIST_IDENTIFIER: &'static str = $list_id;

            fn entry(&self) -> &$crate::codelist::CodeEntry {
                &self.0
            }

            fn values() -> Vec<Self> {
                $crate::codelist::lock_registry(Self::registry()).clone()
            }

            fn value_of(name: &str) -> Self {
                let name = name.trim();
                let mut values = $crate::codelist::lock_registry(Self::registry());
                if let Some(existing) = values.iter().find(|v| {
                    <$name as $crate::codelist::CodeList>::name(v) == name
                }) {
                    return existing.clone();
                }
                let created = $name(::std::sync::Arc::new(
                    $crate::codelist::CodeEntry::new(name, None, values.len()),
                ));
                values.push(created.clone());
                created
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl ::std::cmp::Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                // Names are unique within the registry, so hashing the name
                // is consistent with identity equality.
                <$name as $crate::codelist::CodeList>::name(self).hash(state);
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<$name as $crate::codelist::CodeList>::name(self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(<$name as $crate::codelist::CodeList>::name(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let name = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(<$name as $crate::codelist::CodeList>::value_of(&name))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::codelist::CodeList;

    crate::code_list! {
        /// Test-only code list.
        pub struct Flavour("TST_Flavour") {
            sweet => ("SWEET", "sweet"),
            sour => ("SOUR", "sour"),
        }
    }

    #[test]
    fn test_declared_constants_registered() {
        let values = Flavour::values();
        assert!(values.len() >= 2);
        assert_eq!(values[0].name(), "SWEET");
        assert_eq!(values[0].identifier(), Some("sweet"));
        assert_eq!(values[1].ordinal(), 1);
        assert_eq!(Flavour::LIST_IDENTIFIER, "TST_Flavour");
    }

    #[test]
    fn test_value_of_known_name_is_identity() {
        let sweet = Flavour::sweet();
        let looked_up = Flavour::value_of(sweet.name());
        assert_eq!(looked_up, sweet);
        // No duplicate was registered for the known name.
        let count = Flavour::values()
            .iter()
            .filter(|v| v.name() == "SWEET")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_value_of_unknown_name_creates_once() {
        let first = Flavour::value_of("UMAMI");
        assert_eq!(first.name(), "UMAMI");
        assert_eq!(first.identifier(), None);

        let second = Flavour::value_of("UMAMI");
        assert_eq!(second, first);
        let count = Flavour::values()
            .iter()
            .filter(|v| v.name() == "UMAMI")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_concurrent_value_of_registers_once() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let barrier = Arc::new(Barrier::new(16));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    Flavour::value_of("BITTER")
                })
            })
            .collect();
        let values: Vec<Flavour> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Every thread got the same handle and only one entry exists.
        assert!(values.iter().all(|v| *v == values[0]));
        let count = Flavour::values()
            .iter()
            .filter(|v| v.name() == "BITTER")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_value_of_trims_input() {
        let spaced = Flavour::value_of("  SOUR ");
        assert_eq!(spaced, Flavour::sour());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let lower = Flavour::value_of("sweet");
        assert_ne!(lower, Flavour::sweet());
        assert_eq!(lower.name(), "sweet");
    }

    #[test]
    fn test_family_matches_values() {
        let sweet = Flavour::sweet();
        let family: Vec<String> = sweet.family().iter().map(|v| v.name().to_owned()).collect();
        let values: Vec<String> = Flavour::values()
            .iter()
            .map(|v| v.name().to_owned())
            .collect();
        assert_eq!(family, values);
    }

    #[test]
    fn test_serde_round_trip() {
        let sweet = Flavour::sweet();
        let json = serde_json::to_string(&sweet).unwrap();
        assert_eq!(json, "\"SWEET\"");
        let back: Flavour = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sweet);
    }
}
