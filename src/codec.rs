use std::{
    io::{self, Error, ErrorKind, Read, Write},
    ops::{Deref, DerefMut},
};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use paste::paste;

#[derive(Debug)]
pub struct WireWriter<W: Write> {
    write: W,
}

impl<W: Write> WireWriter<W> {
    pub fn new(write: W) -> Self {
        Self { write }
    }

    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: Write> Deref for WireWriter<W> {
    type Target = W;

    fn deref(&self) -> &Self::Target {
        &self.write
    }
}

impl<W: Write> DerefMut for WireWriter<W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.write
    }
}

#[derive(Debug)]
pub struct WireReader<R: Read> {
    read: R,
}

impl<R: Read> WireReader<R> {
    pub fn new(read: R) -> Self {
        Self { read }
    }

    /// Reads the number of the next tagged field.
    ///
    /// Unlike every other read, hitting the end of input here is not an
    /// error: a payload ends after its last field, so this returns `None`.
    pub(crate) fn read_field_tag(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0];
        loop {
            match self.read.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Deref for WireReader<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.read
    }
}

impl<R: Read> DerefMut for WireReader<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.read
    }
}

pub trait WireReadable: Sized {
    fn read<R: Read>(read: &mut WireReader<R>) -> io::Result<Self>;
}

pub trait WireWritable {
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()>;
}

pub(crate) fn invalid_data(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidData, message.into())
}

// read/write + i8/u8 methods do not have the endianness generic, eh

impl WireReadable for u8 {
    #[inline]
    fn read<R: Read>(read: &mut WireReader<R>) -> io::Result<Self> {
        read.read_u8()
    }
}

impl WireWritable for u8 {
    #[inline]
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()> {
        write.write_u8(*self)
    }
}

macro_rules! int_io {
    ($($types:ident),* $(,)?) => {
        $(
            impl WireReadable for $types {
                #[inline]
                fn read<R: Read>(reader: &mut WireReader<R>) -> io::Result<Self> {
                    paste! {
                        reader.[<read_ $types>]::<BigEndian>()
                    }
                }
            }

            impl WireWritable for $types {
                #[inline]
                fn write<W: Write>(&self, writer: &mut WireWriter<W>) -> io::Result<()> {
                    paste! {
                        writer.[<write_ $types>]::<BigEndian>(*self)
                    }
                }
            }
        )*
    };
}

int_io![u16, i32, u32];

/// Strings use the `java.io.DataOutputStream::writeUTF` layout: a u16 byte
/// length followed by modified UTF-8, so the JVM side can read them with a
/// plain `readUTF`.
impl WireReadable for String {
    fn read<R: Read>(read: &mut WireReader<R>) -> io::Result<Self> {
        let mut bytes = vec![0; u16::read(read)? as usize];
        read.read_exact(&mut bytes)?;
        cesu8::from_java_cesu8(&bytes)
            .map(|s| s.into_owned())
            .map_err(|_| invalid_data("String is not valid modified UTF-8"))
    }
}

impl WireWritable for str {
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()> {
        let bytes = cesu8::to_java_cesu8(self);
        let len = u16::try_from(bytes.len()).map_err(|_| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("String of {} bytes does not fit a u16 length", bytes.len()),
            )
        })?;
        len.write(write)?;
        write.write_all(&bytes)
    }
}

impl WireWritable for String {
    #[inline]
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()> {
        self.as_str().write(write)
    }
}
