//! Cross-field legality rules of dexopt params.
//!
//! Every rule is a pure function returning the first violation it finds.
//! [Builder::build](crate::Builder::build) runs them in the order they are
//! declared here.

use crate::{
    enums::CompilerFilter,
    error::{Error, Field, Result},
    flags::{has_flag, DexoptFlags},
    reason::{CUSTOM, PRIORITY_MAX, PRIORITY_MIN, VDEX},
};

/// Checks the reason and what it implies for the compiler filter and the
/// priority class.
///
/// An empty compiler filter token counts as unset.
pub fn validate_reason(
    reason: &str,
    compiler_filter: Option<&str>,
    priority_class: Option<i32>,
) -> Result<()> {
    if reason.is_empty() {
        return Err(Error::invalid(Field::Reason, "must not be empty"));
    }
    let has_filter = compiler_filter.map_or(false, |f| !f.is_empty());
    let has_priority = priority_class.is_some();
    match reason {
        VDEX if has_filter => Err(Error::invalid(
            Field::CompilerFilter,
            format!("must not be set when reason is {VDEX:?}"),
        )),
        VDEX if has_priority => Err(Error::invalid(
            Field::PriorityClass,
            format!("must not be set when reason is {VDEX:?}"),
        )),
        CUSTOM if !has_filter => Err(Error::invalid(
            Field::CompilerFilter,
            format!("must be set when reason is {CUSTOM:?}"),
        )),
        CUSTOM if !has_priority => Err(Error::invalid(
            Field::PriorityClass,
            format!("must be set when reason is {CUSTOM:?}"),
        )),
        _ => Ok(()),
    }
}

pub fn validate_compiler_filter(token: &str) -> Result<CompilerFilter> {
    token
        .parse()
        .map_err(|e| Error::invalid(Field::CompilerFilter, format!("{e}")))
}

pub fn validate_priority_class(value: i32) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| (PRIORITY_MIN..=PRIORITY_MAX).contains(v))
        .ok_or_else(|| {
            Error::invalid(
                Field::PriorityClass,
                format!("{value} is not within [{PRIORITY_MIN}, {PRIORITY_MAX}]"),
            )
        })
}

/// A split name and the single split flag travel together, and only make
/// sense for primary dex files without dependencies.
pub fn validate_split(flags: DexoptFlags, split_name: Option<&str>) -> Result<()> {
    let Some(split_name) = split_name else {
        if has_flag(flags, DexoptFlags::FOR_SINGLE_SPLIT) {
            return Err(Error::invalid(
                Field::SplitName,
                "must be set when FOR_SINGLE_SPLIT is set",
            ));
        }
        return Ok(());
    };
    if split_name.is_empty() {
        return Err(Error::invalid(Field::SplitName, "must not be empty when set"));
    }
    let required = [
        (DexoptFlags::ON_PRIMARY_DEX, "ON_PRIMARY_DEX"),
        (DexoptFlags::FOR_SINGLE_SPLIT, "FOR_SINGLE_SPLIT"),
    ];
    let forbidden = [
        (DexoptFlags::ON_SECONDARY_DEX, "ON_SECONDARY_DEX"),
        (DexoptFlags::SHOULD_INCLUDE_DEPENDENCIES, "SHOULD_INCLUDE_DEPENDENCIES"),
    ];
    for (flag, name) in required {
        if !has_flag(flags, flag) {
            return Err(Error::invalid(
                Field::Flags,
                format!("{name} must be set when a split name is given"),
            ));
        }
    }
    for (flag, name) in forbidden {
        if has_flag(flags, flag) {
            return Err(Error::invalid(
                Field::Flags,
                format!("{name} must not be set when a split name is given"),
            ));
        }
    }
    Ok(())
}
