use std::io::{self, Read, Write};

use crate::{
    builder::Builder,
    codec::{invalid_data, WireReadable, WireReader, WireWritable, WireWriter},
    enums::CompilerFilter,
    error::{Error, Field, Result},
    flags::{has_flag, DexoptFlags},
    reason::ReasonMapping,
    validation::{validate_priority_class, validate_reason, validate_split},
};

/// The finalized, read-only parameters of a dexopt request.
///
/// Only [Builder::build] and [DexoptParams::from_wire_format] create these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DexoptParams {
    pub(crate) flags: DexoptFlags,
    pub(crate) compiler_filter: Option<CompilerFilter>,
    pub(crate) priority_class: Option<u8>,
    pub(crate) reason: String,
    pub(crate) split_name: Option<String>,
}

impl DexoptParams {
    pub fn flags(&self) -> DexoptFlags {
        self.flags
    }

    pub fn has_flag(&self, bit: DexoptFlags) -> bool {
        has_flag(self.flags, bit)
    }

    pub fn compiler_filter(&self) -> Option<CompilerFilter> {
        self.compiler_filter
    }

    pub fn priority_class(&self) -> Option<u8> {
        self.priority_class
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn split_name(&self) -> Option<&str> {
        self.split_name.as_deref()
    }

    /// The explicit compiler filter, or the default of the reason.
    pub fn effective_compiler_filter(&self, mapping: &ReasonMapping) -> Option<CompilerFilter> {
        self.compiler_filter.or_else(|| mapping.compiler_filter_for(&self.reason))
    }

    /// The explicit priority class, or the default of the reason.
    pub fn effective_priority_class(&self, mapping: &ReasonMapping) -> Option<u8> {
        self.priority_class.or_else(|| mapping.priority_class_for(&self.reason))
    }

    /// A fresh builder holding exactly the fields of these params.
    pub fn to_builder(&self) -> Builder {
        Builder {
            flags: self.flags,
            compiler_filter: self.compiler_filter.map(|f| f.as_str().to_owned()),
            priority_class: self.priority_class.map(i32::from),
            reason: self.reason.clone(),
            split_name: self.split_name.clone(),
        }
    }

    /// Runs the builder rules against these params.
    ///
    /// [from_wire_format](DexoptParams::from_wire_format) trusts the producer
    /// of the payload, so call this when the bytes came from somewhere that
    /// should not be trusted.
    pub fn validate(&self) -> Result<()> {
        validate_reason(
            &self.reason,
            self.compiler_filter.map(CompilerFilter::as_str),
            self.priority_class.map(i32::from),
        )?;
        if let Some(priority_class) = self.priority_class {
            validate_priority_class(i32::from(priority_class))?;
        }
        validate_split(self.flags, self.split_name.as_deref())
    }

    pub fn to_wire_format(&self) -> Result<Vec<u8>> {
        let mut writer = WireWriter::new(Vec::new());
        self.write(&mut writer).map_err(Error::Encoding)?;
        let bytes = writer.into_inner();
        log::trace!("Encoded dexopt params for {:?} into {} bytes", self.reason, bytes.len());
        Ok(bytes)
    }

    /// Decodes params from bytes produced by
    /// [to_wire_format](DexoptParams::to_wire_format).
    ///
    /// The cross-field rules are not checked, see [DexoptParams::validate].
    pub fn from_wire_format(bytes: &[u8]) -> Result<Self> {
        let params = Self::read(&mut WireReader::new(bytes)).map_err(Error::MalformedWireData)?;
        log::trace!("Decoded dexopt params from {} bytes: {params:?}", bytes.len());
        Ok(params)
    }
}

const FLAGS: u8 = 1;
const COMPILER_FILTER: u8 = 2;
const PRIORITY_CLASS: u8 = 3;
const REASON: u8 = 4;
const SPLIT_NAME: u8 = 5;

/// Unset priority class on the wire.
const PRIORITY_NONE: i32 = -1;

impl WireWritable for DexoptParams {
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()> {
        FLAGS.write(write)?;
        self.flags.write(write)?;

        COMPILER_FILTER.write(write)?;
        self.compiler_filter.map_or("", CompilerFilter::as_str).write(write)?;

        PRIORITY_CLASS.write(write)?;
        self.priority_class.map_or(PRIORITY_NONE, i32::from).write(write)?;

        REASON.write(write)?;
        self.reason.write(write)?;

        if let Some(split_name) = &self.split_name {
            SPLIT_NAME.write(write)?;
            split_name.write(write)?;
        }
        Ok(())
    }
}

impl WireReadable for DexoptParams {
    fn read<R: Read>(read: &mut WireReader<R>) -> io::Result<Self> {
        let mut flags = DexoptFlags::empty();
        let mut compiler_filter = None;
        let mut priority_class = None;
        let mut reason = None;
        let mut split_name = None;

        let mut last_tag = 0;
        while let Some(tag) = read.read_field_tag()? {
            if tag <= last_tag {
                return Err(invalid_data(format!("Field {tag} is duplicated or out of order")));
            }
            last_tag = tag;
            match tag {
                FLAGS => flags = DexoptFlags::read(read)?,
                COMPILER_FILTER => compiler_filter = Some(read_compiler_filter(read)?),
                PRIORITY_CLASS => priority_class = Some(read_priority_class(read)?),
                REASON => reason = Some(read_reason(read)?),
                SPLIT_NAME => split_name = Some(String::read(read)?),
                _ => return Err(invalid_data(format!("Unknown field {tag}"))),
            }
        }

        let missing = |field: Field| invalid_data(format!("Missing required field {field}"));
        Ok(DexoptParams {
            flags,
            compiler_filter: compiler_filter.ok_or_else(|| missing(Field::CompilerFilter))?,
            priority_class: priority_class.ok_or_else(|| missing(Field::PriorityClass))?,
            reason: reason.ok_or_else(|| missing(Field::Reason))?,
            split_name,
        })
    }
}

fn read_compiler_filter<R: Read>(read: &mut WireReader<R>) -> io::Result<Option<CompilerFilter>> {
    let token = String::read(read)?;
    if token.is_empty() {
        return Ok(None);
    }
    token.parse().map(Some).map_err(|e| invalid_data(format!("{e}")))
}

fn read_reason<R: Read>(read: &mut WireReader<R>) -> io::Result<String> {
    let reason = String::read(read)?;
    if reason.is_empty() {
        return Err(invalid_data("Reason must not be empty"));
    }
    Ok(reason)
}

fn read_priority_class<R: Read>(read: &mut WireReader<R>) -> io::Result<Option<u8>> {
    match i32::read(read)? {
        PRIORITY_NONE => Ok(None),
        value => validate_priority_class(value)
            .map(Some)
            .map_err(|e| invalid_data(format!("{e}"))),
    }
}
