//! Passive capture of host content registrations.
//!
//! Registration order between content modules and this add-on's own startup
//! is unspecified by the host, so everything third-party is captured eagerly
//! and filtered later, once namespace opt-ins are known to be complete. The
//! observers stay armed for the lifetime of the process; the accumulated
//! records are consumed exactly once, at bootstrap.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::constants::FIRST_PARTY_PREFIX;
use crate::host::{NamespaceInfo, RegistrationEvents};

/// A captured data-package registration.
#[derive(Debug, Clone)]
pub struct DataPackageRecord {
    pub namespace: String,
    pub package: serde_json::Value,
}

/// A captured skill registration.
#[derive(Debug, Clone)]
pub struct SkillRecord {
    pub name: String,
    pub namespace: NamespaceInfo,
    pub media: String,
}

/// Accumulated registrations awaiting the bootstrap snapshot.
#[derive(Debug, Default)]
pub struct CaptureLog {
    pub data_packages: Vec<DataPackageRecord>,
    pub skills: Vec<SkillRecord>,
}

/// Owns the capture accumulator and the internal reload guard.
///
/// Clones share the same accumulator, which is what lets the installed
/// handlers outlive the borrow of the registrar.
#[derive(Clone, Default)]
pub struct ContentCapture {
    log: Rc<RefCell<CaptureLog>>,
    reload_active: Rc<Cell<bool>>,
}

impl ContentCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the capture observers on the host's registration surface.
    pub fn attach(&self, registrar: &mut dyn RegistrationEvents) {
        let log = Rc::clone(&self.log);
        let guard = Rc::clone(&self.reload_active);

        registrar.on_data_package_registered(Box::new(move |event| {
            // First-party packages are core game data, not mod content.
            if event.namespace.starts_with(FIRST_PARTY_PREFIX) || guard.get() {
                return;
            }

            log.borrow_mut().data_packages.push(DataPackageRecord {
                namespace: event.namespace.clone(),
                package: event.package.clone(),
            });
        }));

        let log = Rc::clone(&self.log);
        let guard = Rc::clone(&self.reload_active);

        registrar.on_skill_registered(Box::new(move |event| {
            if !event.namespace.is_modded || guard.get() {
                return;
            }

            log.borrow_mut().skills.push(SkillRecord {
                name: event.local_id.clone(),
                namespace: event.namespace.clone(),
                media: event.media.clone(),
            });
        }));
    }

    /// Take the accumulated records, leaving the accumulator empty.
    pub fn take(&self) -> CaptureLog {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Suppress capture while the add-on performs its own internal reload,
    /// so re-registrations triggered by the bootstrap are not mistaken for
    /// mod content.
    pub(crate) fn begin_reload(&self) {
        self.reload_active.set(true);
    }

    pub(crate) fn end_reload(&self) {
        self.reload_active.set(false);
    }
}
