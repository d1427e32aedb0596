use crate::{
    error::Result,
    flags::DexoptFlags,
    params::DexoptParams,
    validation::{
        validate_compiler_filter, validate_priority_class, validate_reason, validate_split,
    },
};

/// Accumulates the fields of a [DexoptParams].
///
/// Setters never fail, every rule is checked at once by [Builder::build].
/// The only exception is the reason, which is mandatory and is checked by
/// [Builder::new].
///
/// ```
/// # use dexopt_params::{reason, Builder, DexoptFlags};
/// let params = Builder::new(reason::INSTALL)?
///     .set_flags(DexoptFlags::ON_PRIMARY_DEX | DexoptFlags::FOR_SINGLE_SPLIT)
///     .set_split_name("split_0")
///     .set_compiler_filter("speed")
///     .build()?;
/// assert_eq!(params.split_name(), Some("split_0"));
/// # Ok::<(), dexopt_params::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    pub(crate) flags: DexoptFlags,
    pub(crate) compiler_filter: Option<String>,
    pub(crate) priority_class: Option<i32>,
    pub(crate) reason: String,
    pub(crate) split_name: Option<String>,
}

impl Builder {
    /// Starts building params for the given reason, with only
    /// [DexoptFlags::ON_PRIMARY_DEX] set.
    pub fn new(reason: impl Into<String>) -> Result<Self> {
        let reason = reason.into();
        validate_reason(&reason, None, None)?;
        Ok(Builder {
            flags: DexoptFlags::ON_PRIMARY_DEX,
            compiler_filter: None,
            priority_class: None,
            reason,
            split_name: None,
        })
    }

    pub fn set_flags(&mut self, flags: DexoptFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Only touches the bits in `mask`, taking their values from `flags`.
    pub fn set_flags_masked(&mut self, flags: DexoptFlags, mask: DexoptFlags) -> &mut Self {
        self.flags = (self.flags & !mask) | (flags & mask);
        self
    }

    /// An empty token is the same as no compiler filter.
    pub fn set_compiler_filter(&mut self, token: impl Into<String>) -> &mut Self {
        self.compiler_filter = Some(token.into());
        self
    }

    pub fn clear_compiler_filter(&mut self) -> &mut Self {
        self.compiler_filter = None;
        self
    }

    pub fn set_priority_class(&mut self, value: i32) -> &mut Self {
        self.priority_class = Some(value);
        self
    }

    pub fn clear_priority_class(&mut self) -> &mut Self {
        self.priority_class = None;
        self
    }

    pub fn set_split_name(&mut self, split_name: impl Into<String>) -> &mut Self {
        self.split_name = Some(split_name.into());
        self
    }

    pub fn clear_split_name(&mut self) -> &mut Self {
        self.split_name = None;
        self
    }

    /// Validates the accumulated fields and snapshots them.
    ///
    /// Rules are checked in order reason, compiler filter, priority class and
    /// split, and only the first violation is reported.
    pub fn build(&self) -> Result<DexoptParams> {
        let result = self.validated();
        match &result {
            Ok(params) => log::debug!("Built dexopt params: {params:?}"),
            Err(e) => log::debug!("Rejected dexopt params for reason {:?}: {e}", self.reason),
        }
        result
    }

    fn validated(&self) -> Result<DexoptParams> {
        let compiler_filter = self.compiler_filter.as_deref().filter(|f| !f.is_empty());

        validate_reason(&self.reason, compiler_filter, self.priority_class)?;
        let compiler_filter = compiler_filter.map(validate_compiler_filter).transpose()?;
        let priority_class = self.priority_class.map(validate_priority_class).transpose()?;
        validate_split(self.flags, self.split_name.as_deref())?;

        Ok(DexoptParams {
            flags: self.flags,
            compiler_filter,
            priority_class,
            reason: self.reason.clone(),
            split_name: self.split_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Field, reason};

    #[test]
    fn empty_reason_fails_eagerly() {
        let err = Builder::new("").unwrap_err();
        assert_eq!(err.field(), Some(Field::Reason));
    }

    #[test]
    fn masked_flags_keep_other_bits() {
        let mut builder = Builder::new(reason::INSTALL).unwrap();
        builder.set_flags(DexoptFlags::ON_PRIMARY_DEX | DexoptFlags::FORCE);
        builder.set_flags_masked(
            DexoptFlags::ON_SECONDARY_DEX,
            DexoptFlags::ON_PRIMARY_DEX | DexoptFlags::ON_SECONDARY_DEX,
        );
        assert_eq!(builder.flags, DexoptFlags::ON_SECONDARY_DEX | DexoptFlags::FORCE);
    }

    #[test]
    fn empty_filter_is_unset() {
        let params = Builder::new(reason::VDEX)
            .unwrap()
            .set_compiler_filter("")
            .build()
            .unwrap();
        assert_eq!(params.compiler_filter(), None);
    }

    #[test]
    fn reusing_the_builder_does_not_touch_built_params() {
        let mut builder = Builder::new(reason::INSTALL).unwrap();
        builder.set_compiler_filter("speed");
        let first = builder.build().unwrap();
        builder.set_compiler_filter("verify").set_priority_class(10);
        let second = builder.build().unwrap();

        assert_eq!(first.compiler_filter().map(|f| f.as_str()), Some("speed"));
        assert_eq!(first.priority_class(), None);
        assert_eq!(second.compiler_filter().map(|f| f.as_str()), Some("verify"));
        assert_eq!(second.priority_class(), Some(10));
    }

    #[test]
    fn first_violation_wins() {
        // bad filter, bad priority and a dangling split flag at once
        let err = Builder::new(reason::INSTALL)
            .unwrap()
            .set_compiler_filter("nope")
            .set_priority_class(500)
            .set_flags(DexoptFlags::FOR_SINGLE_SPLIT)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some(Field::CompilerFilter));

        let err = Builder::new(reason::INSTALL)
            .unwrap()
            .set_priority_class(500)
            .set_flags(DexoptFlags::FOR_SINGLE_SPLIT)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some(Field::PriorityClass));
    }
}
