//! Statically declared benchmark routines and the metadata the driver needs to decide whether
//! (and how) to run them.

use std::fmt;

use thiserror::Error;

use crate::routines::RoutineError;
use crate::workload::Workload;

/// Every registered routine name starts with this prefix.
pub const ROUTINE_PREFIX: &str = "benchmark";

/// Whether the library a routine exercises is compiled into this build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(String),
}

pub type RoutineBody = Box<dyn Fn(&Workload) -> Result<(), RoutineError>>;

fn always_available() -> Availability {
    Availability::Available
}

/// A named, parameterless (apart from the workload) write-and-save routine.
pub struct Routine {
    name: &'static str,
    skip: Option<&'static str>,
    probe: fn() -> Availability,
    body: RoutineBody,
}

impl Routine {
    pub fn new(
        name: &'static str,
        body: impl Fn(&Workload) -> Result<(), RoutineError> + 'static,
    ) -> Self {
        Self {
            name,
            skip: None,
            probe: always_available,
            body: Box::new(body),
        }
    }

    /// Mark the routine as known-broken; the driver reports `reason` instead of running it.
    pub fn skip(mut self, reason: &'static str) -> Self {
        self.skip = Some(reason);
        self
    }

    /// Attach a capability probe checked before the routine is timed.
    pub fn requires(mut self, probe: fn() -> Availability) -> Self {
        self.probe = probe;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn skip_reason(&self) -> Option<&'static str> {
        self.skip
    }

    pub fn availability(&self) -> Availability {
        (self.probe)()
    }

    pub fn invoke(&self, workload: &Workload) -> Result<(), RoutineError> {
        (self.body)(workload)
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine")
            .field("name", &self.name)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("routine name '{0}' does not start with '{prefix}'", prefix = ROUTINE_PREFIX)]
    MissingPrefix(String),
    #[error("routine '{0}' is already registered")]
    Duplicate(String),
}

#[derive(Debug, Default)]
pub struct Registry {
    routines: Vec<Routine>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, routine: Routine) -> Result<(), RegistryError> {
        if !routine.name.starts_with(ROUTINE_PREFIX) {
            return Err(RegistryError::MissingPrefix(routine.name.to_string()));
        }
        if self.get(routine.name).is_some() {
            return Err(RegistryError::Duplicate(routine.name.to_string()));
        }
        self.routines.push(routine);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Routine> {
        self.routines.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Routines ordered by name, the order results are reported in.
    pub fn sorted(&self) -> Vec<&Routine> {
        let mut routines: Vec<&Routine> = self.routines.iter().collect();
        routines.sort_by_key(|r| r.name);
        routines
    }
}
