//! Well-known dexopt reasons, priority classes and the per-reason defaults.

use std::collections::HashMap;

use crate::{
    enums::CompilerFilter,
    error::{Error, Field, Result},
    validation::{validate_priority_class, validate_reason},
};

pub const FIRST_BOOT: &str = "first-boot";
pub const BOOT_AFTER_OTA: &str = "boot-after-ota";
pub const BOOT_AFTER_MAINLINE_UPDATE: &str = "boot-after-mainline-update";
pub const INSTALL: &str = "install";
pub const INSTALL_FAST: &str = "install-fast";
pub const INSTALL_BULK: &str = "install-bulk";
pub const INSTALL_BULK_SECONDARY: &str = "install-bulk-secondary";
pub const INSTALL_BULK_DOWNGRADED: &str = "install-bulk-downgraded";
pub const INSTALL_BULK_SECONDARY_DOWNGRADED: &str = "install-bulk-secondary-downgraded";
pub const BG_DEXOPT: &str = "bg-dexopt";
pub const INACTIVE: &str = "inactive";
pub const CMDLINE: &str = "cmdline";
/// Only extract and verify, the compiler filter and priority are implied.
pub const VDEX: &str = "vdex";
/// A caller-defined reason, which must come with an explicit compiler filter
/// and priority class.
pub const CUSTOM: &str = "custom";

pub const PRIORITY_BOOT: u8 = 100;
pub const PRIORITY_INTERACTIVE_FAST: u8 = 80;
pub const PRIORITY_INTERACTIVE: u8 = 60;
pub const PRIORITY_BACKGROUND: u8 = 40;

pub const PRIORITY_MIN: u8 = 0;
pub const PRIORITY_MAX: u8 = 100;

const DEFAULTS: &[(&str, CompilerFilter, u8)] = &[
    (FIRST_BOOT, CompilerFilter::Verify, PRIORITY_BOOT),
    (BOOT_AFTER_OTA, CompilerFilter::Verify, PRIORITY_BOOT),
    (BOOT_AFTER_MAINLINE_UPDATE, CompilerFilter::Verify, PRIORITY_BOOT),
    (INSTALL, CompilerFilter::SpeedProfile, PRIORITY_INTERACTIVE),
    (INSTALL_FAST, CompilerFilter::Skip, PRIORITY_INTERACTIVE_FAST),
    (INSTALL_BULK, CompilerFilter::SpeedProfile, PRIORITY_INTERACTIVE),
    (INSTALL_BULK_SECONDARY, CompilerFilter::Verify, PRIORITY_INTERACTIVE),
    (INSTALL_BULK_DOWNGRADED, CompilerFilter::Verify, PRIORITY_INTERACTIVE),
    (INSTALL_BULK_SECONDARY_DOWNGRADED, CompilerFilter::Verify, PRIORITY_INTERACTIVE),
    (BG_DEXOPT, CompilerFilter::SpeedProfile, PRIORITY_BACKGROUND),
    (INACTIVE, CompilerFilter::Verify, PRIORITY_BACKGROUND),
    (CMDLINE, CompilerFilter::Verify, PRIORITY_INTERACTIVE),
];

/// Default compiler filter and priority class for each reason.
///
/// [Default] gives the built-in table. `vdex` and `custom` have no defaults,
/// and neither does any reason the table does not know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonMapping {
    compiler_filters: HashMap<String, CompilerFilter>,
    priority_classes: HashMap<String, u8>,
}

impl Default for ReasonMapping {
    fn default() -> Self {
        let mut mapping = ReasonMapping::empty();
        for &(reason, filter, priority) in DEFAULTS {
            mapping.compiler_filters.insert(reason.to_owned(), filter);
            mapping.priority_classes.insert(reason.to_owned(), priority);
        }
        mapping
    }
}

impl ReasonMapping {
    /// A mapping without a single default.
    pub fn empty() -> Self {
        ReasonMapping {
            compiler_filters: HashMap::new(),
            priority_classes: HashMap::new(),
        }
    }

    pub fn compiler_filter_for(&self, reason: &str) -> Option<CompilerFilter> {
        self.compiler_filters.get(reason).copied()
    }

    pub fn priority_class_for(&self, reason: &str) -> Option<u8> {
        self.priority_classes.get(reason).copied()
    }

    /// Overrides the default compiler filter of `reason`.
    pub fn set_compiler_filter(
        &mut self,
        reason: impl Into<String>,
        filter: CompilerFilter,
    ) -> Result<&mut Self> {
        let reason = overridable_reason(reason.into())?;
        log::debug!("Default compiler filter for {reason:?} is now {filter}");
        self.compiler_filters.insert(reason, filter);
        Ok(self)
    }

    /// Overrides the default priority class of `reason`.
    pub fn set_priority_class(
        &mut self,
        reason: impl Into<String>,
        value: i32,
    ) -> Result<&mut Self> {
        let reason = overridable_reason(reason.into())?;
        let value = validate_priority_class(value)?;
        log::debug!("Default priority class for {reason:?} is now {value}");
        self.priority_classes.insert(reason, value);
        Ok(self)
    }
}

/// `vdex` and `custom` must never gain defaults, the rules for them rely on
/// the fields being given explicitly or not at all.
fn overridable_reason(reason: String) -> Result<String> {
    if reason == VDEX || reason == CUSTOM {
        return Err(Error::invalid(Field::Reason, format!("{reason:?} has no defaults")));
    }
    validate_reason(&reason, None, None)?;
    Ok(reason)
}
